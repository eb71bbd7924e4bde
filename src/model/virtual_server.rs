//! Virtual server (listener) entity.

use serde::Serialize;

use crate::graph::PoolId;

use super::{Port, Status};

/// Default listener type.
pub const DEFAULT_TYPE: &str = "l4-load-balance";

/// Default load-balance method.
pub const DEFAULT_METHOD: &str = "LB_METHOD_ROUND_ROBIN";

/// Default layer-4 protocol.
pub const DEFAULT_PROTOCOL: &str = "tcp";

/// A listener definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VirtualServer {
    pub name: String,
    pub status: Status,
    /// Listener type (`l4-load-balance`, `l7-load-balance`, `standard`, ...).
    pub kind: String,
    pub address: String,
    pub port: Port,
    pub protocol: String,
    pub method: String,
    pub persistence: Option<String>,
    /// Main load-balance profile.
    pub profile: Option<String>,
    pub client_ssl_profile: Option<String>,
    /// Every attached profile, in source order.
    pub profiles: Vec<String>,
    pub interface: Option<String>,
    /// Name of the referenced pool, as written (partition stripped).
    pub pool_name: Option<String>,

    #[serde(skip)]
    pub(crate) pool: Option<PoolId>,
}

impl VirtualServer {
    /// Create a virtual server with every field at its default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: Status::default(),
            kind: DEFAULT_TYPE.to_string(),
            address: String::new(),
            port: Port::default(),
            protocol: DEFAULT_PROTOCOL.to_string(),
            method: DEFAULT_METHOD.to_string(),
            persistence: None,
            profile: None,
            client_ssl_profile: None,
            profiles: Vec::new(),
            interface: None,
            pool_name: None,
            pool: None,
        }
    }

    /// Resolved pool, set by the resolution pass.
    pub fn pool_id(&self) -> Option<PoolId> {
        self.pool
    }
}
