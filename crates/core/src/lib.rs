pub mod capabilities;
pub mod error;
pub mod link;
pub mod types;

pub use capabilities::LinkEndpointCapabilities;
pub use error::{Error, Result};
pub use link::{
    LinkController, LinkEndpoint, NetworkDispatcher, PromiscuousModeFn, StateChangeFn, UpFn,
};
pub use types::{
    EndpointConfig, Gso, GsoKind, LinkAddress, LinkState, NicId, PacketBuffer, Route,
    StackConfig, StackConfigBuilder,
};
