//! Health monitor entity.

use serde::Serialize;

/// Default monitor type.
pub const DEFAULT_TYPE: &str = "icmp";
pub const DEFAULT_INTERVAL: u32 = 10;
pub const DEFAULT_TIMEOUT: u32 = 5;
pub const DEFAULT_RETRY: u32 = 3;

/// A health check definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthMonitor {
    pub name: String,
    pub kind: String,
    pub interval: u32,
    pub timeout: u32,
    pub retry: u32,
    pub send: Option<String>,
    /// Expected response: a status code or a receive string.
    pub expected: Option<String>,
    pub hostname: Option<String>,
    /// Monitor this one inherits from, if the dialect records it.
    pub parent: Option<String>,
}

impl HealthMonitor {
    /// Create a monitor with every field at its default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: DEFAULT_TYPE.to_string(),
            interval: DEFAULT_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
            retry: DEFAULT_RETRY,
            send: None,
            expected: None,
            hostname: None,
            parent: None,
        }
    }
}
