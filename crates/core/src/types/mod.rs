mod config;
mod packet;

pub use config::{EndpointConfig, StackConfig, StackConfigBuilder};
pub use packet::{Gso, GsoKind, PacketBuffer, Route};

use serde::{Deserialize, Serialize};
use smoltcp::wire::EthernetAddress;
use std::fmt;

/// Opaque hardware address of a link endpoint.
///
/// The stack treats the bytes as an uninterpreted value; an empty address
/// is valid and is what endpoints without a hardware address report.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkAddress(Vec<u8>);

impl LinkAddress {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Interpret the address as an ethernet MAC, if it has the right length.
    pub fn to_ethernet(&self) -> Option<EthernetAddress> {
        (self.0.len() == 6).then(|| EthernetAddress::from_bytes(&self.0))
    }
}

impl From<EthernetAddress> for LinkAddress {
    fn from(addr: EthernetAddress) -> Self {
        Self(addr.as_bytes().to_vec())
    }
}

impl From<[u8; 6]> for LinkAddress {
    fn from(bytes: [u8; 6]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Display for LinkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for LinkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LinkAddress({self})")
    }
}

/// Administrative state reported by a link controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkState {
    Started,
    Down,
    Closed,
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LinkState::Started => "started",
            LinkState::Down => "down",
            LinkState::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Identifier the interface table assigns to a registered interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NicId(pub u32);

impl fmt::Display for NicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nic{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_address_display() {
        let addr = LinkAddress::from([0x52, 0x54, 0x00, 0x00, 0x00, 0x01]);
        assert_eq!(addr.to_string(), "52:54:00:00:00:01");
        assert_eq!(LinkAddress::default().to_string(), "");
    }

    #[test]
    fn link_address_ethernet_conversion() {
        let mac = EthernetAddress([0x02, 0x00, 0x00, 0x00, 0x00, 0x2a]);
        let addr = LinkAddress::from(mac);
        assert_eq!(addr.as_bytes(), &[0x02, 0x00, 0x00, 0x00, 0x00, 0x2a]);
        assert_eq!(addr.to_ethernet(), Some(mac));

        assert_eq!(LinkAddress::new(vec![1, 2, 3]).to_ethernet(), None);
        assert_eq!(LinkAddress::default().to_ethernet(), None);
    }

    #[test]
    fn link_state_serde() {
        let json = serde_json::to_string(&LinkState::Started).unwrap();
        assert_eq!(json, "\"started\"");
        let state: LinkState = serde_json::from_str("\"closed\"").unwrap();
        assert_eq!(state, LinkState::Closed);
    }

    #[test]
    fn nic_id_display() {
        assert_eq!(NicId(3).to_string(), "nic3");
    }
}
