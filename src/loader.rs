//! Parse entry points: source text or a file to a resolved configuration.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{LbError, Result};
use crate::graph::Configuration;
use crate::mapper::map_scan;
use crate::options::ParseOptions;
use crate::parser::lexer::is_blank_or_comment;
use crate::parser::scan;

/// Parse configuration text into a resolved configuration graph.
///
/// Scans the text in the configured (or detected) dialect, maps every
/// recognised object, then links entities by name. Dangling references
/// are left unresolved rather than reported as errors.
pub fn parse_str(source: &str, options: &ParseOptions) -> Result<Configuration> {
    if source.lines().all(is_blank_or_comment) {
        return Err(LbError::EmptyInput);
    }

    let dialect = options.resolve_dialect(source)?;
    let scanned = scan(source, dialect, &options.skip_kinds)?;

    let mut config = Configuration::new(dialect, options.vendor_for(dialect));
    map_scan(&scanned, &mut config);
    let links = config.resolve();

    info!(
        dialect = %dialect,
        virtual_servers = config.virtual_servers().len(),
        pools = config.pools().len(),
        real_servers = config.real_servers().len(),
        health_monitors = config.health_monitors().len(),
        certificates = config.certificates().len(),
        skipped = config.metadata().skipped_blocks,
        resolved = links.resolved,
        dangling = links.dangling,
        "parsed configuration"
    );

    Ok(config)
}

/// Read and parse a configuration file.
pub fn parse_file(path: &Path, options: &ParseOptions) -> Result<Configuration> {
    let source = fs::read_to_string(path).map_err(|e| LbError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read configuration: {}", e),
    })?;

    parse_str(&source, options)
}
