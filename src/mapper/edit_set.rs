//! Entity mapping for the edit-set dialect.

use tracing::debug;

use crate::graph::Configuration;
use crate::model::{HealthMonitor, Pool, PoolMember, RealServer, Relation, Status, VirtualServer};
use crate::parser::coerce::{
    bare_name, parse_leading_int, parse_port, to_bool, to_bool_or, to_int_or, to_string,
    to_string_array,
};
use crate::parser::{Block, Dialect, Item};

const DIALECT: Dialect = Dialect::EditSet;

const VIRTUAL_SERVERS: &str = "load-balance virtual-server";
const POOLS: &str = "load-balance pool";
const REAL_SERVERS: &str = "load-balance real-server";
const HEALTH_CHECKS: &str = "system health-check";
const CERTIFICATES: &str = "system certificate local";

/// Map every recognised section. Returns the number of top-level
/// sections that were not modelled.
pub(super) fn map(root: &Block, config: &mut Configuration) -> usize {
    let mut unmodelled = 0;

    for (path, value) in root.entries() {
        let Some(section) = value.as_block() else {
            continue;
        };
        match path {
            VIRTUAL_SERVERS => {
                for item in section.items() {
                    config.push_virtual_server(map_virtual_server(item));
                }
            }
            POOLS => {
                for item in section.items() {
                    config.push_pool(map_pool(item));
                }
            }
            REAL_SERVERS => {
                for item in section.items() {
                    config.push_real_server(map_real_server(item));
                }
            }
            HEALTH_CHECKS => {
                for item in section.items() {
                    config.push_health_monitor(map_health_monitor(item));
                }
            }
            CERTIFICATES => {
                for item in section.items() {
                    merge_certificate(item, config);
                }
            }
            _ => {
                debug!(section = %path, "section not modelled");
                unmodelled += 1;
            }
        }
    }

    unmodelled
}

fn status(body: &Block) -> Status {
    to_string(body.get("status"))
        .map(|s| Status::from_keyword(&s))
        .unwrap_or_default()
}

fn map_virtual_server(item: &Item) -> VirtualServer {
    let body = &item.body;
    let mut vs = VirtualServer::new(bare_name(&item.name));

    vs.status = status(body);
    if let Some(kind) = to_string(body.get("type")) {
        vs.kind = kind;
    }
    let address = to_string(body.get("address"))
        .filter(|a| a != "0.0.0.0")
        .or_else(|| to_string(body.get("address6")));
    if let Some(address) = address {
        vs.address = address;
    }
    if let Some(port) = to_string_array(body.get("port")).first() {
        vs.port = parse_port(port);
    }
    if let Some(protocol) = to_string(body.get("protocol")) {
        vs.protocol = protocol;
    }
    if let Some(method) = to_string(body.get("load-balance-method")) {
        vs.method = method;
    }
    vs.persistence = to_string(body.get("load-balance-persistence"));
    vs.profile = to_string(body.get("load-balance-profile"));
    vs.client_ssl_profile = to_string(body.get("client-ssl-profile"));
    vs.profiles = [&vs.profile, &vs.client_ssl_profile]
        .into_iter()
        .flatten()
        .cloned()
        .collect();
    vs.interface = to_string(body.get("interface"));
    vs.pool_name = to_string(body.get("load-balance-pool")).map(|p| bare_name(&p).to_string());

    vs
}

fn map_pool(item: &Item) -> Pool {
    let body = &item.body;
    let mut pool = Pool::new(bare_name(&item.name));

    if let Some(kind) = to_string(body.get("type")) {
        pool.kind = kind;
    }
    // `health-check-ctrl` is the switch; older dumps only carry `health-check`
    let switch = body
        .get("health-check-ctrl")
        .or_else(|| body.get("health-check"));
    pool.health_check = to_bool_or(switch, DIALECT, true);
    if let Some(action) = to_string(body.get("health-check-down-action")) {
        pool.down_action = action;
    }
    pool.health_checks = to_string_array(body.get("health-check-list"))
        .iter()
        .map(|name| bare_name(name).to_string())
        .collect();
    if let Some(relation) = to_string(body.get("health-check-relationship")) {
        pool.relation = Relation::from_keyword(&relation);
    }

    if let Some(members) = body.get_block("pool_member") {
        pool.members = members
            .items()
            .iter()
            .enumerate()
            .map(|(i, member)| map_member(member, i))
            .collect();
    }

    pool
}

fn map_member(item: &Item, ordinal: usize) -> PoolMember {
    let body = &item.body;
    let id = match parse_leading_int(&item.name) {
        0 => ordinal as u32 + 1,
        id => id,
    };
    let mut member = PoolMember::new(id);

    let port = body
        .get("port")
        .or_else(|| body.get("pool_member_service_port"));
    if let Some(port) = to_string_array(port).first() {
        member.port = parse_port(port);
    }
    member.weight = to_int_or(body.get("weight"), member.weight);
    member.status = status(body);
    member.backup = to_bool(body.get("backup"), DIALECT);
    if let Some(server) = to_string(body.get("real_server")) {
        member.real_server_name = bare_name(&server).to_string();
    }

    member
}

fn map_real_server(item: &Item) -> RealServer {
    let body = &item.body;
    let mut rs = RealServer::new(bare_name(&item.name));

    rs.status = status(body);
    if let Some(kind) = to_string(body.get("type")) {
        rs.kind = kind;
    }
    let address = if rs.kind == "fqdn" {
        to_string(body.get("fqdn"))
    } else {
        to_string(body.get("ip"))
            .filter(|ip| ip != "0.0.0.0")
            .or_else(|| to_string(body.get("ip6")).filter(|ip| ip != "::"))
    };
    if let Some(address) = address {
        rs.address = address;
    }

    rs
}

fn map_health_monitor(item: &Item) -> HealthMonitor {
    let body = &item.body;
    let mut monitor = HealthMonitor::new(bare_name(&item.name));

    if let Some(kind) = to_string(body.get("type")) {
        monitor.kind = kind;
    }
    monitor.interval = to_int_or(body.get("interval"), monitor.interval);
    monitor.timeout = to_int_or(body.get("timeout"), monitor.timeout);
    let retry = body.get("retry").or_else(|| body.get("down-retry"));
    monitor.retry = to_int_or(retry, monitor.retry);
    monitor.send = to_string(body.get("send-string"));
    monitor.expected = to_string(body.get("status-code"))
        .or_else(|| to_string(body.get("receive-string")));
    monitor.hostname = to_string(body.get("hostname"));

    monitor
}

fn merge_certificate(item: &Item, config: &mut Configuration) {
    let body = &item.body;
    let cert = config.certificate_entry(bare_name(&item.name));

    if let Some(file) = to_string(body.get("certificate")) {
        cert.cert_file = Some(file);
    }
    if let Some(file) = to_string(body.get("key")) {
        cert.key_file = Some(file);
    }
}
