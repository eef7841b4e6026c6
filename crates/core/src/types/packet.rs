use super::LinkAddress;

/// An owned packet handed to an endpoint for transmission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PacketBuffer {
    data: Vec<u8>,
}

impl PacketBuffer {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

/// Addressing the stack resolved for an outbound packet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    pub local_link_address: LinkAddress,
    pub remote_link_address: LinkAddress,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GsoKind {
    #[default]
    None,
    TcpV4,
    TcpV6,
}

/// Generic segmentation offload parameters attached to a write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gso {
    pub kind: GsoKind,
    pub header_len: u16,
    pub max_segment_size: u16,
}
