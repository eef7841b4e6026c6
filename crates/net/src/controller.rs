use crate::lock;

use noopnet_core::{LinkController, LinkState, PromiscuousModeFn, Result, StateChangeFn, UpFn};
use std::sync::{Arc, Mutex};

type SharedStateChangeFn = Arc<dyn Fn(LinkState) + Send + Sync>;

/// Link controller that never fails and reports every transition.
///
/// The state-change callback is required up front so that no transition
/// can ever be emitted into the void; the owning stack replaces it with its
/// own through [`LinkController::set_on_state_change`]. Callbacks run on
/// the calling thread with no internal lock held.
pub struct NoopController {
    on_up: Option<UpFn>,
    on_state_change: Mutex<SharedStateChangeFn>,
    on_set_promiscuous_mode: Option<PromiscuousModeFn>,
}

impl NoopController {
    pub fn new(on_state_change: impl Fn(LinkState) + Send + Sync + 'static) -> Self {
        Self {
            on_up: None,
            on_state_change: Mutex::new(Arc::new(on_state_change)),
            on_set_promiscuous_mode: None,
        }
    }

    /// Run `hook` at the start of every `up()`, before `Started` is reported.
    pub fn with_on_up(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_up = Some(Box::new(hook));
        self
    }

    pub fn with_on_set_promiscuous_mode(
        mut self,
        hook: impl Fn(bool) + Send + Sync + 'static,
    ) -> Self {
        self.on_set_promiscuous_mode = Some(Box::new(hook));
        self
    }

    fn emit(&self, state: LinkState) {
        let callback = lock(&self.on_state_change).clone();
        tracing::debug!("Link state change: {}", state);
        callback(state);
    }
}

impl LinkController for NoopController {
    fn up(&self) -> Result<()> {
        if let Some(hook) = &self.on_up {
            hook();
        }
        self.emit(LinkState::Started);
        Ok(())
    }

    fn down(&self) -> Result<()> {
        self.emit(LinkState::Down);
        Ok(())
    }

    fn close(&self) -> Result<()> {
        self.emit(LinkState::Closed);
        Ok(())
    }

    fn set_on_state_change(&self, callback: StateChangeFn) {
        *lock(&self.on_state_change) = Arc::from(callback);
    }

    fn set_promiscuous_mode(&self, enabled: bool) -> Result<()> {
        if let Some(hook) = &self.on_set_promiscuous_mode {
            hook(enabled);
        }
        Ok(())
    }
}
