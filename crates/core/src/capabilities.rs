use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Capability flags a link endpoint advertises to the network stack.
///
/// Endpoints other than the noop link may report any combination; the
/// noop link reports [`LinkEndpointCapabilities::empty`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LinkEndpointCapabilities(u32);

impl LinkEndpointCapabilities {
    /// The link verifies inbound checksums itself.
    pub const RX_CHECKSUM_OFFLOAD: Self = Self(1 << 0);
    /// The link computes outbound checksums itself.
    pub const TX_CHECKSUM_OFFLOAD: Self = Self(1 << 1);
    /// The stack must resolve link addresses (e.g. ARP) before writing.
    pub const RESOLUTION_REQUIRED: Self = Self(1 << 2);
    /// Inbound checksums are trusted without verification.
    pub const SATURATED_RX_CHECKSUM: Self = Self(1 << 3);
    pub const LOOPBACK: Self = Self(1 << 4);
    /// The link segments oversized writes described by a `Gso`.
    pub const HARDWARE_GSO: Self = Self(1 << 5);

    const NAMES: [(Self, &'static str); 6] = [
        (Self::RX_CHECKSUM_OFFLOAD, "RX_CHECKSUM_OFFLOAD"),
        (Self::TX_CHECKSUM_OFFLOAD, "TX_CHECKSUM_OFFLOAD"),
        (Self::RESOLUTION_REQUIRED, "RESOLUTION_REQUIRED"),
        (Self::SATURATED_RX_CHECKSUM, "SATURATED_RX_CHECKSUM"),
        (Self::LOOPBACK, "LOOPBACK"),
        (Self::HARDWARE_GSO, "HARDWARE_GSO"),
    ];

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for LinkEndpointCapabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for LinkEndpointCapabilities {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for LinkEndpointCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        for (flag, name) in Self::NAMES {
            if self.contains(flag) {
                set.entry(&format_args!("{name}"));
            }
        }
        set.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_contains_nothing() {
        let caps = LinkEndpointCapabilities::empty();
        assert!(caps.is_empty());
        assert!(!caps.contains(LinkEndpointCapabilities::LOOPBACK));
        assert_eq!(format!("{caps:?}"), "{}");
    }

    #[test]
    fn combined_flags() {
        let mut caps = LinkEndpointCapabilities::RX_CHECKSUM_OFFLOAD;
        caps |= LinkEndpointCapabilities::LOOPBACK;
        assert!(caps.contains(LinkEndpointCapabilities::LOOPBACK));
        assert!(caps.contains(LinkEndpointCapabilities::RX_CHECKSUM_OFFLOAD));
        assert!(!caps.contains(LinkEndpointCapabilities::TX_CHECKSUM_OFFLOAD));
        assert_eq!(format!("{caps:?}"), "{RX_CHECKSUM_OFFLOAD, LOOPBACK}");
    }
}
