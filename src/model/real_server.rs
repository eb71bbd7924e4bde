//! Real server (backend host) entity.

use serde::Serialize;

use super::Status;

/// Default real server type.
pub const DEFAULT_TYPE: &str = "ip";

/// A backend host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealServer {
    pub name: String,
    /// IPv4 or IPv6 address, or a host name for `fqdn` servers.
    pub address: String,
    pub status: Status,
    pub kind: String,
    /// An `fqdn` server whose resolved addresses become members on their own.
    pub autopopulate: bool,
}

impl RealServer {
    /// Create a real server with every field at its default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: String::new(),
            status: Status::default(),
            kind: DEFAULT_TYPE.to_string(),
            autopopulate: false,
        }
    }

    pub fn is_ipv6(&self) -> bool {
        self.address.contains(':')
    }
}
