//! Validation checks for a resolved configuration.
//!
//! Each check takes a `&Configuration` and returns a `ValidationResult`.
//! Checks read the resolved links, so they expect `resolve()` to have run.

use std::collections::HashSet;

use crate::graph::{Configuration, EntityKind};

use super::warning::{Diagnostic, ValidationResult};

/// Check for references that did not resolve.
pub fn check_dangling_references(config: &Configuration) -> ValidationResult {
    let mut result = ValidationResult::new();

    for vs in config.virtual_servers() {
        let Some(pool) = vs.pool_name.as_deref().filter(|n| !n.is_empty()) else {
            continue;
        };
        if vs.pool_id().is_none() {
            result.push(
                Diagnostic::warning(
                    "lbconv::validate::dangling-pool",
                    format!(
                        "Virtual server '{}' references pool '{}' which does not exist",
                        vs.name, pool
                    ),
                )
                .with_help("Check the pool name or export the pool section too"),
            );
        }
    }

    for pool in config.pools() {
        let known: HashSet<&str> = config.monitors_of(pool).map(|m| m.name.as_str()).collect();
        for name in &pool.health_checks {
            if !known.contains(name.as_str()) {
                result.push(Diagnostic::warning(
                    "lbconv::validate::dangling-monitor",
                    format!(
                        "Pool '{}' references health monitor '{}' which does not exist",
                        pool.name, name
                    ),
                ));
            }
        }

        for member in &pool.members {
            if !member.real_server_name.is_empty() && member.real_server_id().is_none() {
                result.push(Diagnostic::warning(
                    "lbconv::validate::dangling-real-server",
                    format!(
                        "Pool '{}' member {} references real server '{}' which does not exist",
                        pool.name, member.id, member.real_server_name
                    ),
                ));
            }
        }
    }

    result
}

/// Check for names used twice within one collection. Only the first one
/// is reachable by reference.
pub fn check_duplicate_names(config: &Configuration) -> ValidationResult {
    let mut result = ValidationResult::new();

    let collections: [(EntityKind, Vec<&str>); 5] = [
        (
            EntityKind::VirtualServer,
            config.virtual_servers().iter().map(|v| v.name.as_str()).collect(),
        ),
        (
            EntityKind::Pool,
            config.pools().iter().map(|p| p.name.as_str()).collect(),
        ),
        (
            EntityKind::RealServer,
            config.real_servers().iter().map(|r| r.name.as_str()).collect(),
        ),
        (
            EntityKind::HealthMonitor,
            config.health_monitors().iter().map(|m| m.name.as_str()).collect(),
        ),
        (
            EntityKind::Certificate,
            config.certificates().iter().map(|c| c.name.as_str()).collect(),
        ),
    ];

    for (kind, names) in collections {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for name in names {
            if !seen.insert(name) && reported.insert(name) {
                result.push(
                    Diagnostic::warning(
                        "lbconv::validate::duplicate-name",
                        format!("Name '{}' is used by more than one {}", name, kind),
                    )
                    .with_help("References resolve to the first definition"),
                );
            }
        }
    }

    result
}

/// Check for certificates missing their certificate or key file.
pub fn check_incomplete_certificates(config: &Configuration) -> ValidationResult {
    let mut result = ValidationResult::new();

    for cert in config.certificates() {
        let missing = match (&cert.cert_file, &cert.key_file) {
            (Some(_), Some(_)) => continue,
            (None, Some(_)) => "certificate",
            (Some(_), None) => "key",
            (None, None) => "certificate and key",
        };
        result.push(Diagnostic::warning(
            "lbconv::validate::incomplete-certificate",
            format!("Certificate '{}' has no {} file", cert.name, missing),
        ));
    }

    result
}

/// Check for pools with health checking on but nothing to check with.
pub fn check_unmonitored_pools(config: &Configuration) -> ValidationResult {
    let mut result = ValidationResult::new();

    for pool in config.pools() {
        if pool.health_check && pool.health_checks.is_empty() {
            result.push(
                Diagnostic::warning(
                    "lbconv::validate::no-monitor",
                    format!("Pool '{}' has health checking enabled but no monitors", pool.name),
                )
                .with_help("Attach a health monitor or disable health checking"),
            );
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HealthMonitor, Pool, PoolMember, RealServer, VirtualServer};
    use crate::parser::Dialect;

    fn config() -> Configuration {
        Configuration::new(Dialect::EditSet, "fortiadc")
    }

    #[test]
    fn test_dangling_references() {
        let mut config = config();
        let mut vs = VirtualServer::new("vs");
        vs.pool_name = Some("missing".to_string());
        config.push_virtual_server(vs);

        let mut pool = Pool::new("p");
        pool.health_checks = vec!["HC".to_string(), "GONE".to_string()];
        let mut member = PoolMember::new(1);
        member.real_server_name = "rs".to_string();
        pool.members.push(member);
        config.push_pool(pool);
        config.push_health_monitor(HealthMonitor::new("HC"));
        config.resolve();

        let result = check_dangling_references(&config);
        let codes: Vec<&str> = result.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(
            codes,
            vec![
                "lbconv::validate::dangling-pool",
                "lbconv::validate::dangling-monitor",
                "lbconv::validate::dangling-real-server",
            ]
        );
        assert!(!result.has_errors());
    }

    #[test]
    fn test_duplicate_names_reported_once() {
        let mut config = config();
        config.push_pool(Pool::new("p"));
        config.push_pool(Pool::new("p"));
        config.push_pool(Pool::new("p"));
        config.push_real_server(RealServer::new("p"));

        let result = check_duplicate_names(&config);
        assert_eq!(result.warning_count(), 1);
        assert!(result.iter().next().unwrap().message.contains("pool"));
    }

    #[test]
    fn test_incomplete_certificates() {
        let mut config = config();
        config.certificate_entry("full").cert_file = Some("a.crt".to_string());
        config.certificate_entry("full").key_file = Some("a.key".to_string());
        config.certificate_entry("half").cert_file = Some("b.crt".to_string());

        let result = check_incomplete_certificates(&config);
        assert_eq!(result.warning_count(), 1);
        assert_eq!(
            result.iter().next().unwrap().message,
            "Certificate 'half' has no key file"
        );
    }

    #[test]
    fn test_unmonitored_pools() {
        let mut config = config();
        config.push_pool(Pool::new("checked"));
        let mut off = Pool::new("off");
        off.health_check = false;
        config.push_pool(off);

        let result = check_unmonitored_pools(&config);
        assert_eq!(result.warning_count(), 1);
        assert!(result.iter().next().unwrap().message.contains("'checked'"));
    }
}
