use super::LinkAddress;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration for a single simulated endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Hardware address reported by the endpoint.
    /// Default: empty
    pub link_address: LinkAddress,
}

impl EndpointConfig {
    pub fn with_link_address(link_address: impl Into<LinkAddress>) -> Self {
        Self {
            link_address: link_address.into(),
        }
    }
}

/// Configuration for the interface table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    /// Prefix prepended to names of interfaces created by the factories.
    /// Default: "test"
    pub name_prefix: String,
    /// Maximum interface name length; longer names are truncated.
    /// Default: 15
    pub max_name_len: usize,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            name_prefix: "test".to_string(),
            max_name_len: 15,
        }
    }
}

impl StackConfig {
    pub fn builder() -> StackConfigBuilder {
        StackConfigBuilder::default()
    }

    /// Check that factory-generated names can still carry a suffix.
    pub fn validate(&self) -> Result<()> {
        if self.max_name_len == 0 {
            return Err(Error::InvalidConfig(
                "max_name_len must be at least 1".to_string(),
            ));
        }
        if self.name_prefix.chars().count() >= self.max_name_len {
            return Err(Error::InvalidConfig(format!(
                "name prefix '{}' leaves no room within {} characters",
                self.name_prefix, self.max_name_len
            )));
        }
        Ok(())
    }
}

/// Builder for StackConfig.
#[derive(Debug, Clone, Default)]
pub struct StackConfigBuilder {
    config: StackConfig,
}

impl StackConfigBuilder {
    pub fn name_prefix(mut self, prefix: &str) -> Self {
        self.config.name_prefix = prefix.to_string();
        self
    }

    pub fn max_name_len(mut self, len: usize) -> Self {
        self.config.max_name_len = len;
        self
    }

    pub fn build(self) -> Result<StackConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
