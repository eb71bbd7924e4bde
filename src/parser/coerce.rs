//! Value coercion from raw tree values to typed fields.
//!
//! Every helper here is total: malformed input coerces to a type default
//! instead of failing.

use crate::model::Port;

use super::tree::Value;
use super::Dialect;

/// Coerce a value to a boolean using the dialect's truthy set.
///
/// Absent and null values are `false`.
pub fn to_bool(value: Option<&Value>, dialect: Dialect) -> bool {
    let Some(token) = value.and_then(scalar_text) else {
        return false;
    };
    let truthy: &[&str] = match dialect {
        Dialect::EditSet => &["enable", "true", "1", "yes"],
        Dialect::Braced => &["enabled", "true", "1", "yes"],
    };
    truthy.contains(&token.to_ascii_lowercase().as_str())
}

/// Coerce a value to a boolean, using `default` when the key is absent.
pub fn to_bool_or(value: Option<&Value>, dialect: Dialect, default: bool) -> bool {
    match value {
        None => default,
        Some(_) => to_bool(value, dialect),
    }
}

/// Coerce a value to an integer from its leading numeric token.
///
/// `infinite`/`indefinite` and anything unparsable become 0.
pub fn to_int(value: Option<&Value>) -> u32 {
    value.and_then(scalar_text).map_or(0, parse_leading_int)
}

/// Coerce a value to an integer, using `default` when the key is absent.
pub fn to_int_or(value: Option<&Value>, default: u32) -> u32 {
    match value {
        None => default,
        Some(_) => to_int(value),
    }
}

/// Parse the first whitespace-separated token as an unsigned integer.
pub fn parse_leading_int(text: &str) -> u32 {
    let token = text.split_whitespace().next().unwrap_or("");
    match token {
        "infinite" | "indefinite" => 0,
        _ => token.parse().unwrap_or(0),
    }
}

/// Coerce a value to optional text. Lists are joined with single spaces;
/// null, blocks and empty text are `None`.
pub fn to_string(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::Scalar(s) => s.clone(),
        Value::List(words) => words.join(" "),
        Value::Null | Value::Block(_) => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Coerce a value to a list of tokens.
///
/// Scalars are split on whitespace, `{` / `}` bracket tokens are dropped,
/// and a nested block contributes its keys. Blank tokens are filtered out.
pub fn to_string_array(value: Option<&Value>) -> Vec<String> {
    let words: Vec<String> = match value {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Scalar(s)) => s.split_whitespace().map(str::to_string).collect(),
        Some(Value::List(words)) => words
            .iter()
            .flat_map(|w| w.split_whitespace())
            .map(str::to_string)
            .collect(),
        Some(Value::Block(block)) => block.keys().map(str::to_string).collect(),
    };

    words
        .into_iter()
        .map(|w| w.trim_matches(|c| c == '{' || c == '}').to_string())
        .filter(|w| !w.trim().is_empty())
        .collect()
}

/// Strip a partition path: `/Common/app/web` becomes `web`.
pub fn bare_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Drop a `%<route-domain>` suffix from an address.
pub fn strip_route_domain(address: &str) -> &str {
    address.split('%').next().unwrap_or(address)
}

/// Classify a port token.
///
/// A pure-digit token, or the literal `any`, is numeric (`any` is 0).
/// Anything else is a service-name alias and is never converted.
pub fn parse_port(token: &str) -> Port {
    if token == "any" {
        return Port::Number(0);
    }
    if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        return Port::Number(token.parse().unwrap_or(0));
    }
    Port::Service(token.to_string())
}

/// An address and port parsed from a braced-dialect destination or member key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Host part exactly as written, route domain included. This is the
    /// form node names take, so member keys match on it.
    pub host: Option<String>,
    /// `host` with any `%<route-domain>` suffix removed.
    pub address: Option<String>,
    pub port: Port,
}

/// Parse a composite `address+port` token from the braced dialect.
///
/// Accepted shapes, after dropping the partition path:
/// - `2001:db8::5.443`: bracket-free IPv6, port after the last dot
/// - `10.0.0.5:https` / `web01:80`: address or name, port after the colon
/// - `10.0.0.5.80`: dotted IPv4, port after the last dot
/// - `https`: bare service name, no address
pub fn parse_endpoint(text: &str) -> Endpoint {
    let token = bare_name(text.trim());
    let colons = token.matches(':').count();

    let (address, port) = if colons > 1 {
        match token.rsplit_once('.') {
            Some((addr, port)) => (Some(addr), parse_port(port)),
            None => (Some(token), Port::Number(0)),
        }
    } else if colons == 1 {
        let (addr, port) = token.split_once(':').unwrap_or((token, ""));
        (Some(addr), parse_port(port))
    } else {
        match token.matches('.').count() {
            0 => (None, parse_port(token)),
            4 => match token.rsplit_once('.') {
                Some((addr, port)) => (Some(addr), parse_port(port)),
                None => (Some(token), Port::Number(0)),
            },
            _ => (Some(token), Port::Number(0)),
        }
    };

    Endpoint {
        host: address.map(str::to_string),
        address: address.map(|a| strip_route_domain(a).to_string()),
        port,
    }
}

/// Heuristic used for pool-member keys: an identifier that starts with a
/// digit is taken to be an address rather than a node name.
pub fn looks_numeric(ident: &str) -> bool {
    ident.chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn scalar_text(value: &Value) -> Option<&str> {
    match value {
        Value::Scalar(s) => Some(s.as_str()),
        Value::List(words) => words.first().map(String::as_str),
        Value::Null | Value::Block(_) => None,
    }
}
