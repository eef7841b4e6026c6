use crate::types::NicId;

/// Errors that can occur when driving a link endpoint or the interface table.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("endpoint is already attached to a dispatcher")]
    AlreadyAttached,

    #[error("endpoint is not attached to a dispatcher")]
    NotAttached,

    #[error("interface name '{0}' is already in use")]
    DuplicateName(String),

    #[error("unknown interface: {0}")]
    UnknownInterface(NicId),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Whether this error reports a broken caller contract rather than a
    /// runtime condition.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Error::AlreadyAttached | Error::NotAttached)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
