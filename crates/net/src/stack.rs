//! Minimal interface table owning endpoint/controller pairs.
//!
//! The table registers each interface's state-change callback on its
//! controller and attaches the shared [`NicDispatcher`] to its endpoint, the
//! same wiring a full network stack performs when a NIC is created.

use crate::lock;

use noopnet_core::{
    Error, LinkAddress, LinkController, LinkEndpoint, LinkState, NetworkDispatcher, NicId,
    PacketBuffer, Result, StackConfig,
};
use smoltcp::wire::EthernetProtocol;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Build an interface name from a prefix, truncated to `max_len` characters.
pub fn make_endpoint_name(prefix: &str, name: &str, max_len: usize) -> String {
    prefix.chars().chain(name.chars()).take(max_len).collect()
}

/// Dispatcher the stack attaches to every endpoint it owns.
///
/// It only counts what is delivered; the stack has no protocols above it.
#[derive(Debug, Default)]
pub struct NicDispatcher {
    delivered: AtomicU64,
}

impl NicDispatcher {
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }
}

impl NetworkDispatcher for NicDispatcher {
    fn deliver_network_packet(
        &self,
        remote: &LinkAddress,
        _local: &LinkAddress,
        protocol: EthernetProtocol,
        packet: PacketBuffer,
    ) {
        tracing::trace!(
            "Delivered {} bytes ({}) from {}",
            packet.len(),
            protocol,
            remote
        );
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }
}

#[derive(Debug, Default)]
struct IfStatus {
    link_state: Option<LinkState>,
    history: Vec<LinkState>,
    promiscuous: bool,
}

/// State the stack keeps for one registered interface.
pub struct IfState {
    id: NicId,
    name: String,
    endpoint: Arc<dyn LinkEndpoint>,
    controller: Arc<dyn LinkController>,
    status: Mutex<IfStatus>,
}

impl fmt::Debug for IfState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IfState")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl IfState {
    pub fn id(&self) -> NicId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn endpoint(&self) -> &Arc<dyn LinkEndpoint> {
        &self.endpoint
    }

    pub fn controller(&self) -> &Arc<dyn LinkController> {
        &self.controller
    }

    /// Last state the controller reported, `None` before the first event.
    pub fn link_state(&self) -> Option<LinkState> {
        lock(&self.status).link_state
    }

    /// Every state the controller reported, oldest first.
    pub fn state_history(&self) -> Vec<LinkState> {
        lock(&self.status).history.clone()
    }

    pub fn promiscuous(&self) -> bool {
        lock(&self.status).promiscuous
    }

    pub fn is_attached(&self) -> bool {
        self.endpoint.is_attached()
    }

    pub fn up(&self) -> Result<()> {
        self.controller.up()
    }

    pub fn down(&self) -> Result<()> {
        self.controller.down()
    }

    pub fn set_promiscuous_mode(&self, enabled: bool) -> Result<()> {
        self.controller.set_promiscuous_mode(enabled)?;
        lock(&self.status).promiscuous = enabled;
        Ok(())
    }

    fn on_state_change(&self, state: LinkState) {
        tracing::debug!("Interface {} ({}) is now {}", self.name, self.id, state);
        let mut status = lock(&self.status);
        status.link_state = Some(state);
        status.history.push(state);
    }
}

struct Interfaces {
    next_id: u32,
    by_id: BTreeMap<NicId, Arc<IfState>>,
}

/// Interface table of the stack under test.
pub struct Netstack {
    config: StackConfig,
    dispatcher: Arc<NicDispatcher>,
    interfaces: Mutex<Interfaces>,
}

impl Netstack {
    pub fn new(config: StackConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            dispatcher: Arc::new(NicDispatcher::default()),
            interfaces: Mutex::new(Interfaces {
                next_id: 1,
                by_id: BTreeMap::new(),
            }),
        })
    }

    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &Arc<NicDispatcher> {
        &self.dispatcher
    }

    /// Register an endpoint/controller pair under `name`.
    ///
    /// The controller's state-change callback is pointed at the new
    /// interface and the stack's dispatcher is attached to the endpoint.
    pub fn add_endpoint(
        &self,
        name: &str,
        endpoint: Arc<dyn LinkEndpoint>,
        controller: Arc<dyn LinkController>,
    ) -> Result<Arc<IfState>> {
        if name.is_empty() {
            return Err(Error::InvalidConfig(
                "interface name must not be empty".to_string(),
            ));
        }

        let mut interfaces = lock(&self.interfaces);
        if interfaces.by_id.values().any(|ifs| ifs.name == name) {
            tracing::warn!("Interface name {} is already in use", name);
            return Err(Error::DuplicateName(name.to_string()));
        }

        endpoint.attach(Some(self.dispatcher.clone() as Arc<dyn NetworkDispatcher>))?;

        let id = NicId(interfaces.next_id);
        let ifs = Arc::new(IfState {
            id,
            name: name.to_string(),
            endpoint,
            controller,
            status: Mutex::new(IfStatus::default()),
        });

        let weak = Arc::downgrade(&ifs);
        ifs.controller.set_on_state_change(Box::new(move |state| {
            if let Some(ifs) = weak.upgrade() {
                ifs.on_state_change(state);
            }
        }));

        interfaces.next_id += 1;
        interfaces.by_id.insert(id, ifs.clone());
        tracing::debug!(
            "Added interface {} ({}) with link address {}",
            name,
            id,
            ifs.endpoint.link_address()
        );
        Ok(ifs)
    }

    pub fn interface(&self, id: NicId) -> Option<Arc<IfState>> {
        lock(&self.interfaces).by_id.get(&id).cloned()
    }

    pub fn interface_by_name(&self, name: &str) -> Option<Arc<IfState>> {
        lock(&self.interfaces)
            .by_id
            .values()
            .find(|ifs| ifs.name == name)
            .cloned()
    }

    /// All registered interfaces, ordered by id.
    pub fn interfaces(&self) -> Vec<Arc<IfState>> {
        lock(&self.interfaces).by_id.values().cloned().collect()
    }

    /// Close an interface, detach its dispatcher and drop it from the table.
    ///
    /// Returns once the endpoint's attachment has ended.
    pub fn remove_interface(&self, id: NicId) -> Result<()> {
        let ifs = {
            let mut interfaces = lock(&self.interfaces);
            let ifs = interfaces
                .by_id
                .get(&id)
                .cloned()
                .ok_or(Error::UnknownInterface(id))?;
            if !ifs.endpoint.is_attached() {
                tracing::error!("Interface {} ({}) removed while detached", ifs.name, id);
                return Err(Error::NotAttached);
            }
            interfaces.by_id.remove(&id);
            ifs
        };

        ifs.endpoint.attach(None)?;
        ifs.controller.close()?;
        ifs.endpoint.wait();
        tracing::debug!("Removed interface {} ({})", ifs.name, id);
        Ok(())
    }
}
