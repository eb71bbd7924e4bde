use miette::Diagnostic;
use thiserror::Error;

use crate::parser::Dialect;

/// Main error type for lbconv operations
#[derive(Error, Diagnostic, Debug)]
pub enum LbError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(lbconv::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Input contains no configuration statements")]
    #[diagnostic(
        code(lbconv::empty),
        help("Check that the dump was exported completely")
    )]
    EmptyInput,

    #[error("Could not determine the configuration dialect")]
    #[diagnostic(
        code(lbconv::dialect),
        help("Pass --dialect edit-set or --dialect braced")
    )]
    UnknownDialect,

    #[error("Unterminated {dialect} block `{construct}` opened at line {line}")]
    #[diagnostic(code(lbconv::unterminated))]
    Unterminated {
        dialect: Dialect,
        construct: String,
        line: usize,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid options: {message}")]
    #[diagnostic(code(lbconv::options))]
    Options {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(lbconv::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, LbError>;
