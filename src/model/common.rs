//! Small value types shared by several entities.

use std::fmt;

use serde::Serialize;

/// A port: either a number or a service-name alias, never both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Port {
    Number(u16),
    Service(String),
}

impl Port {
    /// Numeric port; 0 for a service alias.
    pub fn number(&self) -> u16 {
        match self {
            Port::Number(n) => *n,
            Port::Service(_) => 0,
        }
    }

    /// Service-name alias, if this port is one.
    pub fn service(&self) -> Option<&str> {
        match self {
            Port::Number(_) => None,
            Port::Service(name) => Some(name),
        }
    }
}

impl Default for Port {
    fn default() -> Self {
        Port::Number(0)
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Port::Number(n) => write!(f, "{}", n),
            Port::Service(name) => write!(f, "{}", name),
        }
    }
}

/// Administrative status of a listener, member or server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Enable,
    Disable,
    /// Drained: existing connections stay, no new ones are sent.
    Maintain,
}

impl Status {
    /// Parse a status keyword. Unknown keywords keep the default.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.to_ascii_lowercase().as_str() {
            "disable" | "disabled" => Status::Disable,
            "maintain" | "maintenance" => Status::Maintain,
            _ => Status::Enable,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Enable => write!(f, "enable"),
            Status::Disable => write!(f, "disable"),
            Status::Maintain => write!(f, "maintain"),
        }
    }
}

/// How a pool combines the results of several health monitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    /// Every monitor must pass.
    #[default]
    And,
    /// Any monitor passing is enough.
    Or,
}

impl Relation {
    pub fn from_keyword(keyword: &str) -> Self {
        if keyword.eq_ignore_ascii_case("or") {
            Relation::Or
        } else {
            Relation::And
        }
    }
}
