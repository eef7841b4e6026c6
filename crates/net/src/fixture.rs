use crate::controller::NoopController;
use crate::endpoint::NoopEndpoint;
use crate::stack::{IfState, Netstack, make_endpoint_name};

use noopnet_core::{EndpointConfig, Result};
use std::sync::Arc;

/// Register a [`NoopEndpoint`]/[`NoopController`] pair on `stack`.
///
/// The interface is named with the stack's configured prefix, e.g. `eth0`
/// becomes `testeth0` under the default config.
pub fn add_noop_endpoint(stack: &Netstack, name: &str) -> Result<Arc<IfState>> {
    let config = stack.config();
    let name = make_endpoint_name(&config.name_prefix, name, config.max_name_len);

    let endpoint = Arc::new(NoopEndpoint::new(EndpointConfig::default()));
    let controller = Arc::new(NoopController::new(|state| {
        tracing::warn!("Link state {} reported before registration", state);
    }));
    stack.add_endpoint(&name, endpoint, controller)
}
