use crate::lock;

use noopnet_core::{
    EndpointConfig, Error, Gso, LinkAddress, LinkEndpoint, LinkEndpointCapabilities,
    NetworkDispatcher, PacketBuffer, Result, Route,
};
use smoltcp::wire::EthernetProtocol;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use tokio::sync::watch;

/// One-shot broadcast released when a dispatcher is detached.
///
/// Blocking waiters park on the condition variable; async waiters watch the
/// channel. Both observe the same single release.
struct AttachmentSignal {
    released: Mutex<bool>,
    cond: Condvar,
    watch: watch::Sender<bool>,
}

impl AttachmentSignal {
    fn new() -> Self {
        let (watch, _) = watch::channel(false);
        Self {
            released: Mutex::new(false),
            cond: Condvar::new(),
            watch,
        }
    }

    fn release(&self) {
        let mut released = lock(&self.released);
        debug_assert!(!*released, "attachment signal released twice");
        *released = true;
        self.cond.notify_all();
        drop(released);
        self.watch.send_replace(true);
    }

    fn wait(&self) {
        let released = lock(&self.released);
        let _released = self
            .cond
            .wait_while(released, |released| !*released)
            .unwrap_or_else(PoisonError::into_inner);
    }

    async fn wait_async(&self) {
        let mut rx = self.watch.subscribe();
        // The sender lives as long as `self`, so this only returns once released.
        let _ = rx.wait_for(|released| *released).await;
    }
}

/// Link endpoint that drops every outbound packet.
///
/// It declares no MTU, no capabilities and no link-layer header, and exists
/// to exercise interface management in the stack. Attaching a dispatcher
/// arms an attachment signal that [`NoopEndpoint::wait`] blocks on until the
/// dispatcher is detached again.
pub struct NoopEndpoint {
    link_address: LinkAddress,
    attached: Mutex<Option<Arc<AttachmentSignal>>>,
}

impl NoopEndpoint {
    pub fn new(config: EndpointConfig) -> Self {
        Self {
            link_address: config.link_address,
            attached: Mutex::new(None),
        }
    }

    /// Async counterpart of [`LinkEndpoint::wait`].
    pub async fn wait_async(&self) {
        let signal = lock(&self.attached).clone();
        if let Some(signal) = signal {
            signal.wait_async().await;
        }
    }
}

impl Default for NoopEndpoint {
    fn default() -> Self {
        Self::new(EndpointConfig::default())
    }
}

impl LinkEndpoint for NoopEndpoint {
    fn mtu(&self) -> u32 {
        0
    }

    fn capabilities(&self) -> LinkEndpointCapabilities {
        LinkEndpointCapabilities::empty()
    }

    fn max_header_length(&self) -> u16 {
        0
    }

    fn link_address(&self) -> LinkAddress {
        self.link_address.clone()
    }

    fn write_packet(
        &self,
        _route: &Route,
        _gso: Option<&Gso>,
        _protocol: EthernetProtocol,
        _packet: PacketBuffer,
    ) -> Result<()> {
        Ok(())
    }

    fn write_packets(
        &self,
        _route: &Route,
        _gso: Option<&Gso>,
        _packets: Vec<PacketBuffer>,
        _protocol: EthernetProtocol,
    ) -> Result<usize> {
        Ok(0)
    }

    fn write_raw_packet(&self, _packet: PacketBuffer) -> Result<()> {
        Ok(())
    }

    fn attach(&self, dispatcher: Option<Arc<dyn NetworkDispatcher>>) -> Result<()> {
        let mut attached = lock(&self.attached);
        match dispatcher {
            Some(_) => {
                if attached.is_some() {
                    tracing::error!("Endpoint {} attached twice", self.link_address);
                    return Err(Error::AlreadyAttached);
                }
                *attached = Some(Arc::new(AttachmentSignal::new()));
                tracing::debug!("Endpoint {} attached", self.link_address);
            }
            None => {
                let Some(signal) = attached.take() else {
                    tracing::error!("Endpoint {} detached while not attached", self.link_address);
                    return Err(Error::NotAttached);
                };
                drop(attached);
                signal.release();
                tracing::debug!("Endpoint {} detached", self.link_address);
            }
        }
        Ok(())
    }

    fn is_attached(&self) -> bool {
        lock(&self.attached).is_some()
    }

    fn wait(&self) {
        let signal = lock(&self.attached).clone();
        if let Some(signal) = signal {
            signal.wait();
        }
    }
}
