//! The configuration graph.
//!
//! `Configuration` owns the five entity collections. The entity mapper
//! appends to them in document order; the resolution pass (see
//! [`Configuration::resolve`]) then links entities by name. Renderers only
//! read the finished graph.
//!
//! # Example
//!
//! ```ignore
//! use lbconv::{parse_str, ParseOptions};
//!
//! let config = parse_str(&source, &ParseOptions::default())?;
//! for vs in config.virtual_servers() {
//!     match config.pool_of(vs) {
//!         Some(pool) => println!("{} -> {}", vs.name, pool.name),
//!         None => println!("{} -> (no pool)", vs.name),
//!     }
//! }
//! ```

mod ids;
mod resolve;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Certificate, HealthMonitor, Pool, PoolMember, RealServer, VirtualServer};
use crate::parser::Dialect;

pub use ids::{EntityKind, MonitorId, PoolId, RealServerId};
pub use resolve::Resolution;

/// Free-form information about one parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    /// Vendor tag, e.g. `fortiadc` or `bigip`.
    pub vendor: String,
    pub dialect: Dialect,
    pub parsed_at: DateTime<Utc>,
    /// Objects or sections that were scanned but not modelled.
    pub skipped_blocks: usize,
}

/// Root container of a parsed load-balancer configuration.
#[derive(Debug, Clone, Serialize)]
pub struct Configuration {
    metadata: Metadata,
    virtual_servers: Vec<VirtualServer>,
    pools: Vec<Pool>,
    real_servers: Vec<RealServer>,
    health_monitors: Vec<HealthMonitor>,
    certificates: Vec<Certificate>,
}

impl Configuration {
    /// Create an empty configuration.
    pub fn new(dialect: Dialect, vendor: impl Into<String>) -> Self {
        Self {
            metadata: Metadata {
                vendor: vendor.into(),
                dialect,
                parsed_at: Utc::now(),
                skipped_blocks: 0,
            },
            virtual_servers: Vec::new(),
            pools: Vec::new(),
            real_servers: Vec::new(),
            health_monitors: Vec::new(),
            certificates: Vec::new(),
        }
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn virtual_servers(&self) -> &[VirtualServer] {
        &self.virtual_servers
    }

    pub fn pools(&self) -> &[Pool] {
        &self.pools
    }

    pub fn real_servers(&self) -> &[RealServer] {
        &self.real_servers
    }

    pub fn health_monitors(&self) -> &[HealthMonitor] {
        &self.health_monitors
    }

    pub fn certificates(&self) -> &[Certificate] {
        &self.certificates
    }

    /// Get a virtual server by exact name.
    pub fn virtual_server(&self, name: &str) -> Option<&VirtualServer> {
        self.virtual_servers.iter().find(|vs| vs.name == name)
    }

    /// Get a pool by exact name.
    pub fn pool(&self, name: &str) -> Option<&Pool> {
        self.pools.iter().find(|p| p.name == name)
    }

    /// Get a real server by exact name.
    pub fn real_server(&self, name: &str) -> Option<&RealServer> {
        self.real_servers.iter().find(|rs| rs.name == name)
    }

    /// Get a health monitor by exact name.
    pub fn health_monitor(&self, name: &str) -> Option<&HealthMonitor> {
        self.health_monitors.iter().find(|m| m.name == name)
    }

    /// Get a certificate by exact name.
    pub fn certificate(&self, name: &str) -> Option<&Certificate> {
        self.certificates.iter().find(|c| c.name == name)
    }

    /// The pool a virtual server resolved to, if any.
    pub fn pool_of(&self, vs: &VirtualServer) -> Option<&Pool> {
        vs.pool_id().and_then(|id| self.pools.get(id.index()))
    }

    /// The resolved monitors of a pool, in list order.
    pub fn monitors_of<'a>(&'a self, pool: &'a Pool) -> impl Iterator<Item = &'a HealthMonitor> {
        pool.monitor_ids()
            .iter()
            .filter_map(|id| self.health_monitors.get(id.index()))
    }

    /// The real server a pool member resolved to, if any.
    pub fn real_server_of(&self, member: &PoolMember) -> Option<&RealServer> {
        member
            .real_server_id()
            .and_then(|id| self.real_servers.get(id.index()))
    }

    /// Number of entities of one kind.
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::VirtualServer => self.virtual_servers.len(),
            EntityKind::Pool => self.pools.len(),
            EntityKind::RealServer => self.real_servers.len(),
            EntityKind::HealthMonitor => self.health_monitors.len(),
            EntityKind::Certificate => self.certificates.len(),
        }
    }

    /// Total number of top-level entities.
    pub fn len(&self) -> usize {
        EntityKind::ALL.iter().map(|&kind| self.count(kind)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Structural equality: every collection and resolved link matches.
    /// The parse timestamp is ignored.
    pub fn same_graph(&self, other: &Configuration) -> bool {
        self.metadata.vendor == other.metadata.vendor
            && self.metadata.dialect == other.metadata.dialect
            && self.metadata.skipped_blocks == other.metadata.skipped_blocks
            && self.virtual_servers == other.virtual_servers
            && self.pools == other.pools
            && self.real_servers == other.real_servers
            && self.health_monitors == other.health_monitors
            && self.certificates == other.certificates
    }

    pub(crate) fn add_skipped(&mut self, count: usize) {
        self.metadata.skipped_blocks += count;
    }

    pub(crate) fn push_virtual_server(&mut self, vs: VirtualServer) {
        self.virtual_servers.push(vs);
    }

    pub(crate) fn push_pool(&mut self, pool: Pool) {
        self.pools.push(pool);
    }

    pub(crate) fn push_real_server(&mut self, rs: RealServer) {
        self.real_servers.push(rs);
    }

    pub(crate) fn push_health_monitor(&mut self, monitor: HealthMonitor) {
        self.health_monitors.push(monitor);
    }

    /// Get the certificate with this name, appending a new one if missing.
    pub(crate) fn certificate_entry(&mut self, name: &str) -> &mut Certificate {
        let pos = match self.certificates.iter().position(|c| c.name == name) {
            Some(pos) => pos,
            None => {
                self.certificates.push(Certificate::new(name));
                self.certificates.len() - 1
            }
        };
        &mut self.certificates[pos]
    }
}
