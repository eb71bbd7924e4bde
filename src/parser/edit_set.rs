//! Scanner for the `config` / `edit` / `set` dialect.
//!
//! ```text
//! config load-balance pool
//!     edit "web_pool"
//!         set health-check-list HC_HTTP HC_TCP
//!         config pool_member
//!             edit 1
//!                 set real_server rs1
//!             next
//!         end
//!     next
//! end
//! ```
//!
//! `config <path>` opens a nested block stored under `<path>`, `edit <name>`
//! opens an item appended to the enclosing block, `set` stores a value
//! (last write wins) and `unset` stores an explicit null. `next` and `end`
//! both close the innermost open block.

use tracing::debug;

use crate::error::{LbError, Result};

use super::lexer::{is_blank_or_comment, tokenize_line, Token};
use super::tree::{Block, Item, Value};
use super::Dialect;

/// Scan edit-set source into a generic tree.
pub fn scan(source: &str) -> Result<Block> {
    let lines: Vec<&str> = source.lines().collect();
    let mut scanner = Scanner { lines, pos: 0 };
    scanner.section(None)
}

/// The statement that opened a block, for error reporting.
struct Opener {
    construct: String,
    line: usize,
}

struct Scanner<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl Scanner<'_> {
    /// Read statements until the block opened by `opener` is closed, or to
    /// end of input at top level.
    fn section(&mut self, opener: Option<Opener>) -> Result<Block> {
        let mut block = Block::new();

        while self.pos < self.lines.len() {
            let line = self.lines[self.pos];
            self.pos += 1;
            let line_no = self.pos;

            if is_blank_or_comment(line) {
                continue;
            }

            let tokens = tokenize_line(line.trim(), false);
            let words: Vec<&str> = tokens.iter().filter_map(Token::text).collect();
            let Some((&keyword, args)) = words.split_first() else {
                continue;
            };

            match keyword {
                "config" => {
                    let path = args.join(" ");
                    let nested = self.section(Some(Opener {
                        construct: format!("config {}", path),
                        line: line_no,
                    }))?;
                    // A section opened again continues the earlier one
                    block.merge_block(path, nested);
                }
                "edit" => {
                    let name = args.first().copied().unwrap_or_default().to_string();
                    let body = self.section(Some(Opener {
                        construct: format!("edit {}", name),
                        line: line_no,
                    }))?;
                    block.push_item(Item {
                        name,
                        line: line_no,
                        body,
                    });
                }
                "set" => match args.split_first() {
                    Some((&key, values)) => block.insert(key, set_value(values)),
                    None => debug!(line = line_no, "ignoring `set` without a key"),
                },
                "unset" => match args.first() {
                    Some(&key) => block.insert(key, Value::Null),
                    None => debug!(line = line_no, "ignoring `unset` without a key"),
                },
                "next" | "end" => {
                    if opener.is_some() {
                        return Ok(block);
                    }
                    debug!(line = line_no, keyword, "ignoring terminator outside any block");
                }
                _ => debug!(line = line_no, statement = %line.trim(), "ignoring unknown statement"),
            }
        }

        match opener {
            None => Ok(block),
            Some(opener) => Err(LbError::Unterminated {
                dialect: Dialect::EditSet,
                construct: opener.construct,
                line: opener.line,
                help: Some("Every `config` needs an `end` and every `edit` a `next`".to_string()),
            }),
        }
    }
}

fn set_value(values: &[&str]) -> Value {
    match values {
        [] => Value::Scalar(String::new()),
        [single] => Value::Scalar(single.to_string()),
        many => Value::List(many.iter().map(|s| s.to_string()).collect()),
    }
}
