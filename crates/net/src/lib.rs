mod controller;
mod endpoint;
mod fixture;
mod stack;

pub use controller::NoopController;
pub use endpoint::NoopEndpoint;
pub use fixture::add_noop_endpoint;
pub use stack::{IfState, Netstack, NicDispatcher, make_endpoint_name};

pub use noopnet_core::{
    EndpointConfig, Error, LinkAddress, LinkController, LinkEndpoint, LinkState,
    NetworkDispatcher, NicId, Result, StackConfig,
};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering the data if a callback panicked while holding it.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
