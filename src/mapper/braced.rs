//! Entity mapping for the braced dialect.

use tracing::debug;

use crate::graph::Configuration;
use crate::model::{HealthMonitor, Pool, PoolMember, RealServer, Relation, Status, VirtualServer};
use crate::parser::coerce::{
    bare_name, looks_numeric, parse_endpoint, strip_route_domain, to_bool, to_int, to_int_or,
    to_string, to_string_array,
};
use crate::parser::{Block, Dialect, Item, Value};

const NODES: &str = "ltm node";
const POOLS: &str = "ltm pool";
const VIRTUALS: &str = "ltm virtual";
const MONITOR_PREFIX: &str = "ltm monitor ";
const SSL_CERTS: &str = "sys file ssl-cert";
const SSL_KEYS: &str = "sys file ssl-key";

/// File extensions dropped when pairing certificates with keys.
const CERT_EXTENSIONS: [&str; 4] = [".crt", ".cer", ".pem", ".key"];

/// Map every recognised object group. Returns the number of groups that
/// were not modelled.
pub(super) fn map(root: &Block, config: &mut Configuration) -> usize {
    let mut unmodelled = 0;

    for (path, value) in root.entries() {
        let Some(group) = value.as_block() else {
            continue;
        };
        for item in group.items() {
            match path {
                NODES => config.push_real_server(map_node(item)),
                POOLS => config.push_pool(map_pool(item)),
                VIRTUALS => config.push_virtual_server(map_virtual(item)),
                SSL_CERTS => {
                    let cert = config.certificate_entry(cert_stem(bare_name(&item.name)));
                    cert.cert_file = file_path(&item.body);
                }
                SSL_KEYS => {
                    let cert = config.certificate_entry(cert_stem(bare_name(&item.name)));
                    cert.key_file = file_path(&item.body);
                }
                _ => match path.strip_prefix(MONITOR_PREFIX) {
                    Some(kind) => config.push_health_monitor(map_monitor(item, kind)),
                    None => {
                        debug!(group = %path, "object group not modelled");
                        unmodelled += 1;
                        break;
                    }
                },
            }
        }
    }

    unmodelled
}

/// `state user-down` forces a node offline; `session user-disabled` only
/// stops new connections.
fn node_status(body: &Block) -> Status {
    let state = to_string(body.get("state"));
    let session = to_string(body.get("session"));
    if state.as_deref() == Some("user-down") {
        Status::Disable
    } else if session.as_deref() == Some("user-disabled") {
        Status::Maintain
    } else {
        Status::Enable
    }
}

fn map_node(item: &Item) -> RealServer {
    let body = &item.body;
    let mut rs = RealServer::new(bare_name(&item.name));

    rs.status = node_status(body);
    // `fqdn { name x }` on one line scans as a word list
    let fqdn = match body.get("fqdn") {
        Some(Value::Block(block)) => Some(block.clone()),
        Some(Value::List(words)) => Some(Block::from_pairs(words)),
        _ => None,
    };
    if let Some(fqdn) = fqdn {
        rs.kind = "fqdn".to_string();
        if let Some(name) = to_string(fqdn.get("name")) {
            rs.address = name;
        }
        rs.autopopulate = to_bool(fqdn.get("autopopulate"), Dialect::Braced);
    } else if let Some(address) = to_string(body.get("address")) {
        rs.address = strip_route_domain(&address).to_string();
    }

    rs
}

/// Parse a pool `monitor` expression.
///
/// `a and b` requires every monitor; `min N of { a b }` is satisfied by
/// any of them.
fn monitor_expression(value: Option<&Value>) -> (Vec<String>, Relation) {
    let tokens = to_string_array(value);
    let (names, relation): (Vec<&String>, Relation) = match tokens.first().map(String::as_str) {
        Some("min") => (
            tokens.iter().skip_while(|t| *t != "of").skip(1).collect(),
            Relation::Or,
        ),
        _ => (tokens.iter().filter(|t| *t != "and").collect(), Relation::And),
    };
    let names = names
        .into_iter()
        .map(|name| bare_name(name).to_string())
        .collect();
    (names, relation)
}

fn map_pool(item: &Item) -> Pool {
    let body = &item.body;
    let mut pool = Pool::new(bare_name(&item.name));

    pool.method = to_string(body.get("load-balancing-mode"));
    if let Some(action) = to_string(body.get("service-down-action")) {
        pool.down_action = action;
    }
    match body.get("monitor") {
        Some(Value::Null) => pool.health_check = false,
        Some(value) => {
            let (names, relation) = monitor_expression(Some(value));
            pool.health_checks = names;
            pool.relation = relation;
        }
        None => {}
    }

    let mut priority_groups = Vec::new();
    match body.get("members") {
        Some(Value::Block(members)) => {
            for (i, (key, value)) in members.entries().enumerate() {
                let (member, group) = map_member(key, value, i);
                if member.real_server_name.contains(':') {
                    pool.kind = "ipv6".to_string();
                }
                pool.members.push(member);
                priority_groups.push(group);
            }
        }
        Some(Value::List(keys)) => {
            for (i, key) in keys.iter().enumerate() {
                let (member, group) = map_member(key, &Value::Block(Block::new()), i);
                pool.members.push(member);
                priority_groups.push(group);
            }
        }
        _ => {}
    }

    // With priority group activation on, lower groups only take traffic
    // when the highest group falls below the minimum.
    if to_int(body.get("min-active-members")) > 0 {
        let top = priority_groups.iter().copied().max().unwrap_or(0);
        for (member, group) in pool.members.iter_mut().zip(&priority_groups) {
            member.backup = *group < top;
        }
    }

    pool
}

/// Map one `members` entry keyed `<address-or-node>:<port-or-service>`.
///
/// Returns the member and its priority group.
fn map_member(key: &str, value: &Value, ordinal: usize) -> (PoolMember, u32) {
    let owned;
    let body = match value {
        Value::Block(block) => block,
        Value::List(words) => {
            owned = Block::from_pairs(words);
            &owned
        }
        Value::Null | Value::Scalar(_) => {
            owned = Block::new();
            &owned
        }
    };

    let endpoint = parse_endpoint(key);
    let mut member = PoolMember::new(ordinal as u32 + 1);
    member.port = endpoint.port;

    // Node names keep their route domain, so the member reference does too.
    let mut server = endpoint.host.unwrap_or_default();
    if looks_numeric(&server) {
        if let Some(address) = to_string(body.get("address")) {
            server = address;
        }
    }
    member.real_server_name = server;
    member.weight = to_int_or(body.get("ratio"), member.weight);
    member.status = node_status(body);

    (member, to_int(body.get("priority-group")))
}

fn map_virtual(item: &Item) -> VirtualServer {
    let body = &item.body;
    let mut vs = VirtualServer::new(bare_name(&item.name));

    if body.contains_key("disabled") {
        vs.status = Status::Disable;
    }
    vs.kind = ["ip-forward", "l2-forward", "reject", "internal", "stateless"]
        .into_iter()
        .find(|kind| body.contains_key(kind))
        .unwrap_or("standard")
        .to_string();

    if let Some(destination) = to_string(body.get("destination")) {
        let endpoint = parse_endpoint(&destination);
        vs.address = endpoint.address.unwrap_or_default();
        vs.port = endpoint.port;
    }
    if let Some(protocol) = to_string(body.get("ip-protocol")) {
        vs.protocol = protocol;
    }
    vs.pool_name = to_string(body.get("pool")).map(|p| bare_name(&p).to_string());
    vs.persistence = to_string_array(body.get("persist"))
        .first()
        .map(|p| bare_name(p).to_string());
    vs.interface = to_string_array(body.get("vlans"))
        .first()
        .map(|v| bare_name(v).to_string());

    if let Some(profiles) = body.get_block("profiles") {
        for (name, settings) in profiles.entries() {
            let name = bare_name(name).to_string();
            match profile_context(settings).as_deref() {
                Some("clientside") => {
                    if vs.client_ssl_profile.is_none() {
                        vs.client_ssl_profile = Some(name.clone());
                    }
                }
                Some("serverside") => {}
                _ => {
                    if vs.profile.is_none() {
                        vs.profile = Some(name.clone());
                    }
                }
            }
            vs.profiles.push(name);
        }
    } else {
        vs.profiles = to_string_array(body.get("profiles"))
            .iter()
            .map(|p| bare_name(p).to_string())
            .collect();
        vs.profile = vs.profiles.first().cloned();
    }

    vs
}

/// The `context` setting of an attached profile, if any.
fn profile_context(settings: &Value) -> Option<String> {
    match settings {
        Value::Block(block) => to_string(block.get("context")),
        Value::List(words) => to_string(Block::from_pairs(words).get("context")),
        Value::Null | Value::Scalar(_) => None,
    }
}

fn map_monitor(item: &Item, kind: &str) -> HealthMonitor {
    let body = &item.body;
    let mut monitor = HealthMonitor::new(bare_name(&item.name));

    monitor.kind = kind.to_string();
    monitor.parent = to_string(body.get("defaults-from")).map(|p| bare_name(&p).to_string());
    monitor.interval = to_int_or(body.get("interval"), monitor.interval);
    monitor.timeout = to_int_or(body.get("timeout"), monitor.timeout);
    monitor.send = to_string(body.get("send"));
    monitor.expected = to_string(body.get("recv"));
    monitor.hostname = monitor.send.as_deref().and_then(host_header);

    monitor
}

/// Extract the `Host:` header value from a monitor send string.
fn host_header(send: &str) -> Option<String> {
    let start = send.to_ascii_lowercase().find("host:")? + "host:".len();
    let rest = send[start..].trim_start();
    let end = rest
        .find(|c: char| c == '\\' || c.is_whitespace())
        .unwrap_or(rest.len());
    let host = &rest[..end];
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

/// Certificate name with a trailing file extension removed.
fn cert_stem(name: &str) -> &str {
    CERT_EXTENSIONS
        .iter()
        .find_map(|ext| name.strip_suffix(ext))
        .unwrap_or(name)
}

/// Path of an ssl-cert / ssl-key file object.
fn file_path(body: &Block) -> Option<String> {
    to_string(body.get("source-path"))
        .map(|p| p.strip_prefix("file:").unwrap_or(&p).to_string())
        .or_else(|| to_string(body.get("cache-path")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Port;
    use crate::parser::braced::scan;

    fn mapped(source: &str) -> Configuration {
        let scanned = scan(source, &[]).unwrap();
        let mut config = Configuration::new(Dialect::Braced, "bigip");
        map(&scanned.root, &mut config);
        config
    }

    #[test]
    fn test_map_virtual_destination_service() {
        let source = r#"ltm virtual /Common/vs_https {
    destination /Common/10.0.0.5:https
    ip-protocol tcp
    pool /Common/web_pool
    persist {
        /Common/cookie {
            default yes
        }
    }
    profiles {
        /Common/http { }
        /Common/clientssl {
            context clientside
        }
    }
    vlans {
        /Common/external
    }
    disabled
}
"#;
        let config = mapped(source);
        let vs = config.virtual_server("vs_https").unwrap();

        assert_eq!(vs.address, "10.0.0.5");
        assert_eq!(vs.port.service(), Some("https"));
        assert_eq!(vs.port.number(), 0);
        assert_eq!(vs.status, Status::Disable);
        assert_eq!(vs.kind, "standard");
        assert_eq!(vs.pool_name.as_deref(), Some("web_pool"));
        assert_eq!(vs.persistence.as_deref(), Some("cookie"));
        assert_eq!(vs.profiles, vec!["http", "clientssl"]);
        assert_eq!(vs.profile.as_deref(), Some("http"));
        assert_eq!(vs.client_ssl_profile.as_deref(), Some("clientssl"));
        assert_eq!(vs.interface.as_deref(), Some("external"));
    }

    #[test]
    fn test_map_virtual_destination_numeric() {
        let source = "ltm virtual /Common/vs {\n    destination /Common/10.0.0.5:443\n    ip-forward\n}\n";
        let config = mapped(source);
        let vs = &config.virtual_servers()[0];

        assert_eq!(vs.port, Port::Number(443));
        assert_eq!(vs.port.service(), None);
        assert_eq!(vs.status, Status::Enable);
        assert_eq!(vs.kind, "ip-forward");
        assert!(vs.pool_name.is_none());
    }

    #[test]
    fn test_map_pool_members_and_monitors() {
        let source = r#"ltm pool /Common/web_pool {
    load-balancing-mode least-connections-member
    members {
        /Common/web01:80 {
            address 10.0.0.11
            ratio 3
        }
        /Common/10.0.0.12:http {
            address 10.0.0.99
            session user-disabled
        }
    }
    monitor /Common/HC_HTTP and /Common/HC_TCP
    service-down-action reset
}
"#;
        let config = mapped(source);
        let pool = config.pool("web_pool").unwrap();

        assert_eq!(pool.method.as_deref(), Some("least-connections-member"));
        assert_eq!(pool.down_action, "reset");
        assert_eq!(pool.health_checks, vec!["HC_HTTP", "HC_TCP"]);
        assert_eq!(pool.relation, Relation::And);
        assert!(pool.health_check);

        let named = &pool.members[0];
        assert_eq!(named.id, 1);
        // A node name is kept even when the body carries an address
        assert_eq!(named.real_server_name, "web01");
        assert_eq!(named.port, Port::Number(80));
        assert_eq!(named.weight, 3);

        let numeric = &pool.members[1];
        assert_eq!(numeric.id, 2);
        // A numeric-looking key is overridden by the body address
        assert_eq!(numeric.real_server_name, "10.0.0.99");
        assert_eq!(numeric.port, Port::Service("http".to_string()));
        assert_eq!(numeric.status, Status::Maintain);
    }

    #[test]
    fn test_map_pool_min_of_and_none() {
        let source = r#"ltm pool /Common/any_pool {
    monitor min 1 of { /Common/http /Common/tcp }
}
ltm pool /Common/bare_pool {
    monitor none
}
ltm pool /Common/default_pool {
}
"#;
        let config = mapped(source);

        let any = config.pool("any_pool").unwrap();
        assert_eq!(any.relation, Relation::Or);
        assert_eq!(any.health_checks, vec!["http", "tcp"]);

        assert!(!config.pool("bare_pool").unwrap().health_check);
        assert!(config.pool("default_pool").unwrap().health_check);
    }

    #[test]
    fn test_priority_group_backup() {
        let source = r#"ltm pool /Common/pga {
    min-active-members 1
    members {
        /Common/a:80 {
            priority-group 10
        }
        /Common/b:80 {
            priority-group 5
        }
    }
}
"#;
        let config = mapped(source);
        let pool = config.pool("pga").unwrap();

        assert!(!pool.members[0].backup);
        assert!(pool.members[1].backup);
    }

    #[test]
    fn test_map_nodes() {
        let source = r#"ltm node /Common/web01 {
    address 10.0.0.11%2
    state user-down
}
ltm node /Common/app {
    fqdn {
        name app.example.com
    }
}
"#;
        let config = mapped(source);

        let web = config.real_server("web01").unwrap();
        assert_eq!(web.address, "10.0.0.11");
        assert_eq!(web.status, Status::Disable);

        let app = config.real_server("app").unwrap();
        assert_eq!(app.kind, "fqdn");
        assert_eq!(app.address, "app.example.com");
    }

    #[test]
    fn test_single_line_fqdn_node() {
        let source = "ltm node /Common/app {\n    fqdn { autopopulate enabled name app.example.com }\n}\nltm node /Common/static {\n    fqdn {\n        autopopulate disabled\n        name static.example.com\n    }\n}\n";
        let config = mapped(source);

        let app = config.real_server("app").unwrap();
        assert_eq!(app.kind, "fqdn");
        assert_eq!(app.address, "app.example.com");
        assert!(app.autopopulate);

        let fixed = config.real_server("static").unwrap();
        assert_eq!(fixed.address, "static.example.com");
        assert!(!fixed.autopopulate);
    }

    #[test]
    fn test_member_in_route_domain_resolves_to_node() {
        let source = r#"ltm node /Common/10.1.1.1%2 {
    address 10.1.1.1%2
}
ltm pool /Common/rd_pool {
    members {
        /Common/10.1.1.1%2:80 {
            address 10.1.1.1%2
        }
    }
}
"#;
        let mut config = mapped(source);
        config.resolve();

        let node = &config.real_servers()[0];
        assert_eq!(node.name, "10.1.1.1%2");
        assert_eq!(node.address, "10.1.1.1");

        let member = &config.pool("rd_pool").unwrap().members[0];
        assert_eq!(member.real_server_name, "10.1.1.1%2");
        assert_eq!(member.port, Port::Number(80));
        assert_eq!(
            config.real_server_of(member).map(|rs| rs.name.as_str()),
            Some("10.1.1.1%2")
        );
    }

    #[test]
    fn test_map_monitor() {
        let source = r#"ltm monitor http /Common/HC_HTTP {
    defaults-from /Common/http
    interval 5
    timeout 16
    send "GET /health HTTP/1.1\r\nHost: www.example.com\r\n\r\n"
    recv "200 OK"
}
"#;
        let config = mapped(source);
        let monitor = config.health_monitor("HC_HTTP").unwrap();

        assert_eq!(monitor.kind, "http");
        assert_eq!(monitor.parent.as_deref(), Some("http"));
        assert_eq!(monitor.interval, 5);
        assert_eq!(monitor.timeout, 16);
        assert_eq!(monitor.expected.as_deref(), Some("200 OK"));
        assert_eq!(monitor.hostname.as_deref(), Some("www.example.com"));
    }

    #[test]
    fn test_certificate_and_key_merge() {
        let source = r#"sys file ssl-cert /Common/site.crt {
    cache-path /config/filestore/files_d/Common_d/certificate_d/site.crt_1
    source-path file:/var/tmp/site.crt
}
sys file ssl-key /Common/site.key {
    cache-path /config/filestore/files_d/Common_d/certificate_key_d/site.key_1
}
sys file ssl-cert /Common/lonely.crt {
}
"#;
        let config = mapped(source);

        assert_eq!(config.certificates().len(), 2);
        let site = config.certificate("site").unwrap();
        assert_eq!(site.cert_file.as_deref(), Some("/var/tmp/site.crt"));
        assert!(site.key_file.as_deref().unwrap().ends_with("site.key_1"));
        assert!(!config.certificate("lonely").unwrap().is_complete());
    }

    #[test]
    fn test_host_header() {
        assert_eq!(
            host_header(r"GET / HTTP/1.1\r\nHost: a.example\r\n"),
            Some("a.example".to_string())
        );
        assert_eq!(host_header("GET / HTTP/1.0"), None);
    }

    #[test]
    fn test_cert_stem() {
        assert_eq!(cert_stem("site.crt"), "site");
        assert_eq!(cert_stem("site.key"), "site");
        assert_eq!(cert_stem("site"), "site");
    }
}
