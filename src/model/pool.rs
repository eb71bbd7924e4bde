//! Pool and pool member entities.

use serde::Serialize;

use crate::graph::{MonitorId, RealServerId};

use super::{Port, Relation, Status};

/// Default pool address family.
pub const DEFAULT_TYPE: &str = "ipv4";

/// Default action when every member is down.
pub const DEFAULT_DOWN_ACTION: &str = "none";

/// Default member weight.
pub const DEFAULT_WEIGHT: u32 = 1;

/// A backend group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pool {
    pub name: String,
    pub kind: String,
    /// Load-balancing mode set on the pool itself, if any.
    pub method: Option<String>,
    pub health_check: bool,
    pub down_action: String,
    /// Health monitor names in source order (partition stripped).
    pub health_checks: Vec<String>,
    pub relation: Relation,
    pub members: Vec<PoolMember>,

    #[serde(skip)]
    pub(crate) monitors: Vec<MonitorId>,
}

impl Pool {
    /// Create a pool with every field at its default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: DEFAULT_TYPE.to_string(),
            method: None,
            health_check: true,
            down_action: DEFAULT_DOWN_ACTION.to_string(),
            health_checks: Vec::new(),
            relation: Relation::default(),
            members: Vec::new(),
            monitors: Vec::new(),
        }
    }

    /// Resolved health monitors, in `health_checks` order. Names without a
    /// matching monitor are absent.
    pub fn monitor_ids(&self) -> &[MonitorId] {
        &self.monitors
    }
}

/// One backend endpoint, owned by its pool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolMember {
    pub id: u32,
    pub port: Port,
    pub weight: u32,
    pub status: Status,
    pub backup: bool,
    /// Name of the referenced real server (partition stripped).
    pub real_server_name: String,

    #[serde(skip)]
    pub(crate) real_server: Option<RealServerId>,
}

impl PoolMember {
    /// Create a member with every field at its default.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            port: Port::default(),
            weight: DEFAULT_WEIGHT,
            status: Status::default(),
            backup: false,
            real_server_name: String::new(),
            real_server: None,
        }
    }

    /// Resolved real server, set by the resolution pass.
    pub fn real_server_id(&self) -> Option<RealServerId> {
        self.real_server
    }
}
