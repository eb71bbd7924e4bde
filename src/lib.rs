//! lbconv - Load-balancer configuration parser
//!
//! Reads configuration dumps from application delivery controllers in two
//! text dialects (`config`/`edit`/`set` and brace-delimited objects) and
//! turns them into one vendor-neutral, reference-resolved object graph.
//!
//! ```ignore
//! use lbconv::{parse_str, ParseOptions};
//!
//! let config = parse_str(&source, &ParseOptions::default())?;
//! for vs in config.virtual_servers() {
//!     let pool = config.pool_of(vs).map(|p| p.name.as_str());
//!     println!("{} -> {:?}", vs.name, pool);
//! }
//! ```

pub mod cli;
pub mod discovery;
pub mod error;
pub mod graph;
pub mod loader;
pub mod mapper;
pub mod model;
pub mod options;
pub mod output;
pub mod parser;
pub mod validation;

pub use error::{LbError, Result};
pub use graph::{Configuration, EntityKind, Metadata, MonitorId, PoolId, RealServerId, Resolution};
pub use loader::{parse_file, parse_str};
pub use model::{
    Certificate, HealthMonitor, Pool, PoolMember, Port, RealServer, Relation, Status, VirtualServer,
};
pub use options::{DialectChoice, ParseOptions};
pub use parser::Dialect;
pub use validation::{validate_configuration, Diagnostic, Severity, ValidationResult};
