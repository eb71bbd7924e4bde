//! Scanner for the brace-delimited dialect.
//!
//! ```text
//! ltm pool /Common/web_pool {
//!     members {
//!         /Common/web01:80 {
//!             address 10.0.0.11
//!         }
//!     }
//!     monitor /Common/http and /Common/tcp
//! }
//! ```
//!
//! Each top-level object is `<type-path> <name> {` up to its matching `}`.
//! The closing brace is found by counting braces line by line, so rule and
//! profile bodies containing their own braces stay inside their object.
//! Recognised objects are parsed into the generic tree under their type
//! path (`ltm pool`, `ltm monitor http`, ...) as named items; everything
//! else is skipped.

use tracing::debug;

use crate::error::{LbError, Result};

use super::lexer::{brace_delta, is_blank_or_comment, tokenize_line, tokenize_lines, Token};
use super::tree::{Block, Item, Value};
use super::Dialect;

/// Result of scanning braced source.
#[derive(Debug, Clone, Default)]
pub struct BracedScan {
    /// Recognised objects, grouped by type path.
    pub root: Block,
    /// Number of top-level objects skipped.
    pub skipped: usize,
}

/// Scan braced source into a generic tree.
///
/// `skip_kinds` lists extra type-path prefixes to skip even when they are
/// otherwise recognised.
pub fn scan(source: &str, skip_kinds: &[String]) -> Result<BracedScan> {
    let lines: Vec<&str> = source.lines().collect();
    let mut groups: Vec<(String, Block)> = Vec::new();
    let mut skipped = 0;
    let mut pos = 0;

    while pos < lines.len() {
        let line = lines[pos];
        let line_no = pos + 1;

        if is_blank_or_comment(line) {
            pos += 1;
            continue;
        }

        let header = header_words(line);
        let Some(header) = header else {
            debug!(line = line_no, statement = %line.trim(), "ignoring top-level statement");
            pos += 1;
            continue;
        };

        let end = find_block_end(&lines, pos).ok_or_else(|| LbError::Unterminated {
            dialect: Dialect::Braced,
            construct: header.join(" "),
            line: line_no,
            help: Some("Check for a missing closing `}`".to_string()),
        })?;

        match recognise(&header, skip_kinds) {
            Some((type_path, name)) => {
                let body = parse_object_body(&lines[pos..=end]);
                let item = Item {
                    name: name.to_string(),
                    line: line_no,
                    body,
                };
                match groups.iter_mut().find(|(path, _)| *path == type_path) {
                    Some((_, group)) => group.push_item(item),
                    None => {
                        let mut group = Block::new();
                        group.push_item(item);
                        groups.push((type_path, group));
                    }
                }
            }
            None => {
                debug!(line = line_no, header = %header.join(" "), "skipping object");
                skipped += 1;
            }
        }

        pos = end + 1;
    }

    let mut root = Block::new();
    for (path, group) in groups {
        root.insert(path, Value::Block(group));
    }

    Ok(BracedScan { root, skipped })
}

/// Words before the first `{` on a line, or `None` when the line opens
/// no block.
fn header_words(line: &str) -> Option<Vec<String>> {
    let tokens = tokenize_line(line.trim(), true);
    let open = tokens.iter().position(|t| *t == Token::Open)?;
    let words: Vec<String> = tokens[..open]
        .iter()
        .filter_map(Token::text)
        .map(str::to_string)
        .collect();
    if words.is_empty() {
        None
    } else {
        Some(words)
    }
}

/// Index of the line on which the block opened at `start` closes.
fn find_block_end(lines: &[&str], start: usize) -> Option<usize> {
    let mut depth: i64 = 0;
    for (i, line) in lines.iter().enumerate().skip(start) {
        depth += brace_delta(line);
        if depth <= 0 {
            return Some(i);
        }
    }
    None
}

/// Match a header against the recognised object kinds.
///
/// Returns the type path the object is grouped under and its declared name.
fn recognise<'h>(header: &'h [String], skip_kinds: &[String]) -> Option<(String, &'h str)> {
    let words: Vec<&str> = header.iter().map(String::as_str).collect();
    let (type_path, name) = match words.as_slice() {
        ["ltm", kind @ ("node" | "pool" | "virtual"), name] => (format!("ltm {}", kind), *name),
        ["ltm", "monitor", kind, name] => (format!("ltm monitor {}", kind), *name),
        ["sys", "file", kind @ ("ssl-cert" | "ssl-key"), name] => {
            (format!("sys file {}", kind), *name)
        }
        _ => return None,
    };

    if skip_kinds.iter().any(|kind| type_path.starts_with(kind.as_str())) {
        return None;
    }
    Some((type_path, name))
}

/// Parse the lines of one recognised object into a block.
fn parse_object_body(lines: &[&str]) -> Block {
    let tokens = tokenize_lines(lines.iter().copied());
    let Some(open) = tokens.iter().position(|t| *t == Token::Open) else {
        return Block::new();
    };
    let mut parser = BodyParser {
        tokens: &tokens,
        pos: open + 1,
    };
    parser.block()
}

struct BodyParser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> BodyParser<'t> {
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    /// Parse statements up to and including the closing `}`.
    fn block(&mut self) -> Block {
        let mut block = Block::new();

        while let Some(token) = self.peek() {
            match token {
                Token::Close => {
                    self.pos += 1;
                    break;
                }
                Token::Newline => self.pos += 1,
                Token::Open => {
                    // Anonymous nested block: consume and discard
                    self.pos += 1;
                    self.block();
                }
                Token::Word(key) | Token::Quoted(key) => {
                    let key = key.clone();
                    self.pos += 1;
                    let value = self.statement_value();
                    block.insert(key, value);
                }
            }
        }

        block
    }

    /// Parse the value following a key, up to the end of the statement.
    fn statement_value(&mut self) -> Value {
        let mut words: Vec<Token> = Vec::new();

        while let Some(token) = self.peek() {
            match token {
                Token::Word(_) | Token::Quoted(_) => {
                    words.push(token.clone());
                    self.pos += 1;
                }
                Token::Open if words.is_empty() => {
                    self.pos += 1;
                    return self.braced_value();
                }
                Token::Open => {
                    // Inline list after other words, e.g. `min 1 of { a b }`
                    self.pos += 1;
                    words.push(Token::Word("{".to_string()));
                    words.extend(self.inline_words());
                    words.push(Token::Word("}".to_string()));
                }
                Token::Newline | Token::Close => break,
            }
        }

        match words.as_slice() {
            [] => Value::Scalar(String::new()),
            [Token::Word(word)] if word == "none" => Value::Null,
            [single] => Value::Scalar(single.text().unwrap_or_default().to_string()),
            many => Value::List(
                many.iter()
                    .filter_map(Token::text)
                    .map(str::to_string)
                    .collect(),
            ),
        }
    }

    /// Parse the content of `key { ... }` after the opening brace.
    ///
    /// Content on one line without nested braces is a list of words;
    /// anything else is a nested block.
    fn braced_value(&mut self) -> Value {
        let flat = matches!(
            self.tokens[self.pos..]
                .iter()
                .find(|t| matches!(t, Token::Newline | Token::Open | Token::Close)),
            Some(Token::Close)
        );

        if flat {
            let words: Vec<String> = self
                .inline_words()
                .iter()
                .filter_map(Token::text)
                .map(str::to_string)
                .collect();
            if words.is_empty() {
                Value::Block(Block::new())
            } else {
                Value::List(words)
            }
        } else {
            Value::Block(self.block())
        }
    }

    /// Collect words up to the matching `}`, flattening any nesting.
    fn inline_words(&mut self) -> Vec<Token> {
        let mut words = Vec::new();
        let mut depth = 0usize;

        while let Some(token) = self.peek() {
            self.pos += 1;
            match token {
                Token::Open => depth += 1,
                Token::Close if depth == 0 => break,
                Token::Close => depth -= 1,
                Token::Newline => {}
                Token::Word(_) | Token::Quoted(_) => words.push(token.clone()),
            }
        }

        words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items<'a>(root: &'a Block, path: &str) -> &'a [Item] {
        root.get_block(path).map(Block::items).unwrap_or(&[])
    }

    #[test]
    fn test_scan_pool_with_members() {
        let source = r#"ltm pool /Common/web_pool {
    load-balancing-mode least-connections-member
    members {
        /Common/web01:80 {
            address 10.0.0.11
        }
        /Common/10.0.0.12:http {
            address 10.0.0.12
            session user-disabled
        }
    }
    monitor /Common/http and /Common/tcp
}
"#;
        let scan = scan(source, &[]).unwrap();
        let pools = items(&scan.root, "ltm pool");

        assert_eq!(pools.len(), 1);
        assert_eq!(pools[0].name, "/Common/web_pool");

        let body = &pools[0].body;
        let members = body.get_block("members").unwrap();
        assert_eq!(
            members.keys().collect::<Vec<_>>(),
            vec!["/Common/web01:80", "/Common/10.0.0.12:http"]
        );
        assert_eq!(
            body.get("monitor"),
            Some(&Value::List(vec![
                "/Common/http".to_string(),
                "and".to_string(),
                "/Common/tcp".to_string()
            ]))
        );
    }

    #[test]
    fn test_skip_unrecognised_object_with_nested_braces() {
        let source = r#"ltm rule /Common/redirect {
    when HTTP_REQUEST {
        if { [HTTP::host] eq "a" } {
            HTTP::redirect "https://[HTTP::host]"
        }
    }
}
ltm profile http /Common/http_custom {
    defaults-from /Common/http
    enforcement { }
}
ltm node /Common/web01 {
    address 10.0.0.11
}
"#;
        let scan = scan(source, &[]).unwrap();

        assert_eq!(scan.skipped, 2);
        let nodes = items(&scan.root, "ltm node");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].line, 12);
        assert_eq!(
            nodes[0].body.get("address"),
            Some(&Value::Scalar("10.0.0.11".to_string()))
        );
    }

    #[test]
    fn test_rule_with_quoted_brace_does_not_swallow_following_objects() {
        let source = r#"ltm rule /Common/strip_quotes {
    when HTTP_REQUEST {
        set clean [string map {{"} {}} [HTTP::uri]]
    }
}
ltm pool /Common/p {
}
ltm node /Common/n {
    address 10.0.0.1
}
"#;
        let scan = scan(source, &[]).unwrap();

        assert_eq!(scan.skipped, 1);
        assert_eq!(items(&scan.root, "ltm pool").len(), 1);
        let nodes = items(&scan.root, "ltm node");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].line, 8);
    }

    #[test]
    fn test_monitor_grouped_by_type() {
        let source = "ltm monitor http /Common/HC_HTTP {\n    interval 5\n}\nltm monitor tcp /Common/HC_TCP {\n    interval 10\n}\n";
        let scan = scan(source, &[]).unwrap();

        assert_eq!(items(&scan.root, "ltm monitor http").len(), 1);
        assert_eq!(items(&scan.root, "ltm monitor tcp").len(), 1);
    }

    #[test]
    fn test_none_is_null_and_quotes_removed() {
        let source = "ltm virtual /Common/vs {\n    persist none\n    description \"front door\"\n    disabled\n}\n";
        let scan = scan(source, &[]).unwrap();
        let body = &items(&scan.root, "ltm virtual")[0].body;

        assert_eq!(body.get("persist"), Some(&Value::Null));
        assert_eq!(
            body.get("description"),
            Some(&Value::Scalar("front door".to_string()))
        );
        assert_eq!(body.get("disabled"), Some(&Value::Scalar(String::new())));
    }

    #[test]
    fn test_inline_lists_and_blocks() {
        let source = r#"ltm virtual /Common/vs {
    vlans { /Common/external /Common/internal }
    profiles { /Common/http { } /Common/clientssl { context clientside } }
    persist {
        /Common/cookie {
            default yes
        }
    }
}"#;
        let scan = scan(source, &[]).unwrap();
        let body = &items(&scan.root, "ltm virtual")[0].body;

        assert_eq!(
            body.get("vlans"),
            Some(&Value::List(vec![
                "/Common/external".to_string(),
                "/Common/internal".to_string()
            ]))
        );

        let profiles = body.get_block("profiles").unwrap();
        assert_eq!(
            profiles.keys().collect::<Vec<_>>(),
            vec!["/Common/http", "/Common/clientssl"]
        );
        assert_eq!(
            profiles.get("/Common/clientssl"),
            Some(&Value::List(vec!["context".to_string(), "clientside".to_string()]))
        );

        let persist = body.get_block("persist").unwrap();
        assert!(persist.get_block("/Common/cookie").is_some());
    }

    #[test]
    fn test_min_of_monitor_expression() {
        let source = "ltm pool /Common/p {\n    monitor min 1 of { /Common/http /Common/tcp }\n}\n";
        let scan = scan(source, &[]).unwrap();
        let body = &items(&scan.root, "ltm pool")[0].body;

        assert_eq!(
            body.get("monitor"),
            Some(&Value::List(
                ["min", "1", "of", "{", "/Common/http", "/Common/tcp", "}"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            ))
        );
    }

    #[test]
    fn test_single_line_object() {
        let source = "ltm node /Common/n1 { address 10.0.0.1 }\nltm node /Common/n2 {\n    address 10.0.0.2\n}\n";
        let scan = scan(source, &[]).unwrap();
        let nodes = items(&scan.root, "ltm node");

        assert_eq!(nodes.len(), 2);
        assert_eq!(
            nodes[0].body.get("address"),
            Some(&Value::Scalar("10.0.0.1".to_string()))
        );
    }

    #[test]
    fn test_skip_kinds_option() {
        let source = "ltm monitor http /Common/m {\n    interval 5\n}\nltm node /Common/n {\n    address 10.0.0.1\n}\n";
        let scan = scan(source, &["ltm monitor".to_string()]).unwrap();

        assert_eq!(scan.skipped, 1);
        assert!(scan.root.get_block("ltm monitor http").is_none());
        assert_eq!(items(&scan.root, "ltm node").len(), 1);
    }

    #[test]
    fn test_unterminated_block() {
        let source = "ltm node /Common/ok {\n}\nltm pool /Common/broken {\n    members {\n        /Common/a:80 { }\n";
        let err = scan(source, &[]).unwrap_err();

        match err {
            LbError::Unterminated { construct, line, .. } => {
                assert_eq!(construct, "ltm pool /Common/broken");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_skipped_block_is_still_an_error() {
        let source = "ltm rule /Common/r {\n    when HTTP_REQUEST {\n}\n";
        assert!(scan(source, &[]).is_err());
    }

    #[test]
    fn test_stray_top_level_lines_ignored() {
        let source = "#TMSH-VERSION: 15.1.0\n}\nsys global-settings\nltm node /Common/n {\n    address 10.0.0.1\n}\n";
        let scan = scan(source, &[]).unwrap();
        assert_eq!(items(&scan.root, "ltm node").len(), 1);
    }
}
