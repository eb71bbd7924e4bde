//! Non-fatal checks over a resolved configuration.
//!
//! Parsing never fails on these; they are reported by `lbconv validate`
//! and counted by `lbconv inspect`.

mod checks;
mod warning;

pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::graph::Configuration;

/// Run all checks against a resolved configuration.
pub fn validate_configuration(config: &Configuration) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_dangling_references(config));
    result.merge(checks::check_duplicate_names(config));
    result.merge(checks::check_incomplete_certificates(config));
    result.merge(checks::check_unmonitored_pools(config));

    result
}
