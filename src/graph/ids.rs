//! Entity kinds and typed indices into the configuration collections.

use std::fmt;

/// The kind of a top-level entity collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    VirtualServer,
    Pool,
    RealServer,
    HealthMonitor,
    Certificate,
}

impl EntityKind {
    /// Every collection kind, in rendering order.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::VirtualServer,
        EntityKind::Pool,
        EntityKind::RealServer,
        EntityKind::HealthMonitor,
        EntityKind::Certificate,
    ];

    /// Get the short name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::VirtualServer => "virtual-server",
            EntityKind::Pool => "pool",
            EntityKind::RealServer => "real-server",
            EntityKind::HealthMonitor => "health-monitor",
            EntityKind::Certificate => "certificate",
        }
    }

    /// Plural label for summaries.
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::VirtualServer => "virtual servers",
            EntityKind::Pool => "pools",
            EntityKind::RealServer => "real servers",
            EntityKind::HealthMonitor => "health monitors",
            EntityKind::Certificate => "certificates",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub(crate) usize);

        impl $name {
            /// Position in the owning collection.
            pub fn index(self) -> usize {
                self.0
            }
        }
    };
}

entity_id!(
    /// Index of a pool in `Configuration::pools`.
    PoolId
);
entity_id!(
    /// Index of a monitor in `Configuration::health_monitors`.
    MonitorId
);
entity_id!(
    /// Index of a server in `Configuration::real_servers`.
    RealServerId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(EntityKind::VirtualServer.to_string(), "virtual-server");
        assert_eq!(EntityKind::HealthMonitor.plural(), "health monitors");
        assert_eq!(EntityKind::ALL.len(), 5);
    }

    #[test]
    fn test_id_index() {
        assert_eq!(PoolId(4).index(), 4);
        assert!(MonitorId(1) < MonitorId(2));
    }
}
