//! Capability contracts between a network stack and its link layer.
//!
//! A link is split in two halves: the [`LinkEndpoint`] is the data plane
//! the stack writes packets to and attaches its [`NetworkDispatcher`] on,
//! and the [`LinkController`] is the administrative surface that brings the
//! link up and down and reports each transition through a callback.

use crate::capabilities::LinkEndpointCapabilities;
use crate::error::Result;
use crate::types::{Gso, LinkAddress, LinkState, PacketBuffer, Route};

use smoltcp::wire::EthernetProtocol;
use std::sync::Arc;

/// Callback receiving administrative state transitions.
pub type StateChangeFn = Box<dyn Fn(LinkState) + Send + Sync>;

/// Hook run when a controller is brought up.
pub type UpFn = Box<dyn Fn() + Send + Sync>;

/// Hook run when promiscuous mode is toggled.
pub type PromiscuousModeFn = Box<dyn Fn(bool) + Send + Sync>;

/// Consumer of inbound packets, supplied by the stack on attach.
pub trait NetworkDispatcher: Send + Sync {
    fn deliver_network_packet(
        &self,
        remote: &LinkAddress,
        local: &LinkAddress,
        protocol: EthernetProtocol,
        packet: PacketBuffer,
    );
}

/// Data-plane surface of a link.
pub trait LinkEndpoint: Send + Sync {
    /// Maximum transmission unit. Zero means the link declares none.
    fn mtu(&self) -> u32;

    fn capabilities(&self) -> LinkEndpointCapabilities;

    /// Bytes of link-layer header the stack must reserve in front of packets.
    fn max_header_length(&self) -> u16;

    fn link_address(&self) -> LinkAddress;

    fn write_packet(
        &self,
        route: &Route,
        gso: Option<&Gso>,
        protocol: EthernetProtocol,
        packet: PacketBuffer,
    ) -> Result<()>;

    /// Write a batch of packets, returning how many were written.
    fn write_packets(
        &self,
        route: &Route,
        gso: Option<&Gso>,
        packets: Vec<PacketBuffer>,
        protocol: EthernetProtocol,
    ) -> Result<usize>;

    fn write_raw_packet(&self, packet: PacketBuffer) -> Result<()>;

    /// Attach a dispatcher, or detach the current one with `None`.
    ///
    /// Attaching twice or detaching while detached breaks the caller
    /// contract and is reported as `AlreadyAttached` / `NotAttached`.
    fn attach(&self, dispatcher: Option<Arc<dyn NetworkDispatcher>>) -> Result<()>;

    fn is_attached(&self) -> bool;

    /// Block until the current attachment ends.
    ///
    /// Returns immediately if nothing is attached.
    fn wait(&self);
}

/// Administrative surface of a link.
pub trait LinkController: Send + Sync {
    fn up(&self) -> Result<()>;

    fn down(&self) -> Result<()>;

    fn close(&self) -> Result<()>;

    /// Replace the callback receiving state transitions.
    fn set_on_state_change(&self, callback: StateChangeFn);

    fn set_promiscuous_mode(&self, enabled: bool) -> Result<()>;
}
