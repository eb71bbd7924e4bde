//! Vendor-neutral entity types.
//!
//! Every entity is constructed with its declared defaults first; mapping
//! then overwrites only the fields present in the source.

mod certificate;
mod common;
pub mod monitor;
pub mod pool;
pub mod real_server;
pub mod virtual_server;

pub use certificate::Certificate;
pub use common::{Port, Relation, Status};
pub use monitor::HealthMonitor;
pub use pool::{Pool, PoolMember};
pub use real_server::RealServer;
pub use virtual_server::VirtualServer;
