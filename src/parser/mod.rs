//! Block scanners for load-balancer configuration dumps.
//!
//! Two dialects are understood:
//!
//! - **edit-set**: `config <section>` / `edit "<name>"` / `set <key> <value>`
//!   statements closed by `next` / `end` (FortiADC style).
//! - **braced**: `<type-path> <name> { ... }` objects with nested braces
//!   (BIG-IP tmsh style).
//!
//! Both produce the same generic tree (see [`tree`]), which the entity
//! mapper turns into typed entities.
//!
//! # Usage
//!
//! ```ignore
//! use lbconv::parser::{scan, Dialect};
//!
//! let scanned = scan(&source, Dialect::Braced, &[])?;
//! println!("skipped {} objects", scanned.skipped);
//! ```

pub mod braced;
pub mod coerce;
pub mod edit_set;
pub mod lexer;
pub mod tree;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use coerce::{parse_endpoint, Endpoint};
pub use tree::{Block, Item, Value};

/// A configuration text grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// `config` / `edit` / `set` / `next` / `end`.
    EditSet,
    /// Brace-delimited objects.
    Braced,
}

impl Dialect {
    /// Guess the dialect from the first statement.
    ///
    /// A leading `config ` statement means edit-set; a line that opens a
    /// brace block means braced.
    pub fn detect(source: &str) -> Option<Dialect> {
        for line in source.lines() {
            if lexer::is_blank_or_comment(line) {
                continue;
            }
            let trimmed = line.trim();
            if trimmed.starts_with("config ") {
                return Some(Dialect::EditSet);
            }
            if trimmed.ends_with('{') {
                return Some(Dialect::Braced);
            }
        }
        None
    }

    /// Vendor tag recorded in the metadata when none is configured.
    pub fn default_vendor(&self) -> &'static str {
        match self {
            Dialect::EditSet => "fortiadc",
            Dialect::Braced => "bigip",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::EditSet => write!(f, "edit-set"),
            Dialect::Braced => write!(f, "braced"),
        }
    }
}

/// Output of a block scanner.
#[derive(Debug, Clone)]
pub struct Scan {
    pub dialect: Dialect,
    pub root: Block,
    /// Objects the scanner skipped without parsing.
    pub skipped: usize,
}

/// Scan source text in the given dialect.
///
/// `skip_kinds` only applies to the braced dialect.
pub fn scan(source: &str, dialect: Dialect, skip_kinds: &[String]) -> Result<Scan> {
    match dialect {
        Dialect::EditSet => Ok(Scan {
            dialect,
            root: edit_set::scan(source)?,
            skipped: 0,
        }),
        Dialect::Braced => {
            let scanned = braced::scan(source, skip_kinds)?;
            Ok(Scan {
                dialect,
                root: scanned.root,
                skipped: scanned.skipped,
            })
        }
    }
}
