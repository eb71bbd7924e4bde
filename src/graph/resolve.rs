//! Reference resolution.
//!
//! Runs after every entity has been mapped, so forward references resolve
//! the same as backward ones. Lookups use name indexes built once per
//! collection. Only the referencing entity's resolved field is written;
//! the collections being searched are left alone.

use std::collections::HashMap;

use tracing::debug;

use super::{Configuration, MonitorId, PoolId, RealServerId};

/// Counts from one resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    /// References that found their target.
    pub resolved: usize,
    /// References left dangling.
    pub dangling: usize,
}

/// Exact-match name index. The first entity with a name wins.
struct NameIndex<'a> {
    positions: HashMap<&'a str, usize>,
}

impl<'a> NameIndex<'a> {
    fn build<T>(items: &'a [T], name: impl Fn(&'a T) -> &'a str) -> Self {
        let mut positions = HashMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            positions.entry(name(item)).or_insert(i);
        }
        Self { positions }
    }

    fn get(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }
}

impl Configuration {
    /// Link entities by name.
    ///
    /// In order: virtual server to pool, pool to health monitors (list
    /// order kept, unknown names dropped), pool member to real server.
    /// Dangling references are left unresolved. Calling this again on a
    /// resolved graph produces the same links.
    pub fn resolve(&mut self) -> Resolution {
        let mut stats = Resolution::default();
        let Configuration {
            virtual_servers,
            pools,
            real_servers,
            health_monitors,
            ..
        } = self;

        let pool_index = NameIndex::build(pools.as_slice(), |p| p.name.as_str());
        for vs in virtual_servers.iter_mut() {
            vs.pool = None;
            let Some(name) = vs.pool_name.as_deref().filter(|n| !n.is_empty()) else {
                continue;
            };
            match pool_index.get(name) {
                Some(i) => {
                    vs.pool = Some(PoolId(i));
                    stats.resolved += 1;
                }
                None => {
                    debug!(virtual_server = %vs.name, pool = %name, "pool reference left dangling");
                    stats.dangling += 1;
                }
            }
        }

        let monitor_index = NameIndex::build(health_monitors.as_slice(), |m| m.name.as_str());
        for pool in pools.iter_mut() {
            let mut monitors = Vec::with_capacity(pool.health_checks.len());
            for name in &pool.health_checks {
                match monitor_index.get(name) {
                    Some(i) => {
                        monitors.push(MonitorId(i));
                        stats.resolved += 1;
                    }
                    None => {
                        debug!(pool = %pool.name, monitor = %name, "health monitor reference left dangling");
                        stats.dangling += 1;
                    }
                }
            }
            pool.monitors = monitors;
        }

        let server_index = NameIndex::build(real_servers.as_slice(), |rs| rs.name.as_str());
        for pool in pools.iter_mut() {
            for member in pool.members.iter_mut() {
                member.real_server = None;
                if member.real_server_name.is_empty() {
                    continue;
                }
                match server_index.get(&member.real_server_name) {
                    Some(i) => {
                        member.real_server = Some(RealServerId(i));
                        stats.resolved += 1;
                    }
                    None => {
                        debug!(
                            pool = %pool.name,
                            member = member.id,
                            real_server = %member.real_server_name,
                            "real server reference left dangling"
                        );
                        stats.dangling += 1;
                    }
                }
            }
        }

        stats
    }
}
