//! Inspect command implementation.
//!
//! Parses each input and prints per-kind entity counts. With `--json`
//! a summary array goes to stdout; with `--graph` the full resolved
//! configurations do.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;

use crate::discovery::collect_inputs;
use crate::error::{LbError, Result};
use crate::graph::{Configuration, EntityKind};
use crate::loader::parse_file;
use crate::output::{count, count_of, display_path, Reporter, Tone};
use crate::parser::Dialect;
use crate::validation::validate_configuration;

/// Parse configuration dumps and summarise what was found
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: super::InputArgs,

    /// Print a JSON summary to stdout
    #[arg(long, conflicts_with = "graph")]
    pub json: bool,

    /// Print the full resolved configuration as JSON to stdout
    #[arg(long)]
    pub graph: bool,
}

/// Machine-readable summary of one parsed file.
#[derive(Debug, Serialize)]
pub struct FileSummary {
    pub path: PathBuf,
    pub vendor: String,
    pub dialect: Dialect,
    pub parsed_at: DateTime<Utc>,
    pub skipped_blocks: usize,
    pub counts: BTreeMap<&'static str, usize>,
    pub diagnostics: usize,
}

impl FileSummary {
    pub fn new(path: &Path, config: &Configuration) -> Self {
        let meta = config.metadata();
        Self {
            path: path.to_path_buf(),
            vendor: meta.vendor.clone(),
            dialect: meta.dialect,
            parsed_at: meta.parsed_at,
            skipped_blocks: meta.skipped_blocks,
            counts: EntityKind::ALL
                .iter()
                .map(|&kind| (kind.name(), config.count(kind)))
                .collect(),
            diagnostics: validate_configuration(config).iter().count(),
        }
    }
}

pub fn run(args: InspectArgs) -> Result<()> {
    let reporter = Reporter::new();
    let options = args.input.parse_options()?;
    let files = collect_inputs(&args.input.paths);

    if files.is_empty() {
        reporter.step(Tone::Warning, "Warning", "no configuration files found");
        return Ok(());
    }

    let mut summaries = Vec::new();
    let mut graphs = Vec::new();

    for path in &files {
        reporter.step(Tone::Progress, "Parsing", &display_path(path));
        let config = parse_file(path, &options)?;

        let counts: Vec<String> = EntityKind::ALL
            .iter()
            .filter(|&&kind| config.count(kind) > 0)
            .map(|&kind| count_of(config.count(kind), kind))
            .collect();
        let detail = if counts.is_empty() {
            "no entities".to_string()
        } else {
            counts.join(", ")
        };
        reporter.step(
            Tone::Summary,
            "Found",
            &format!(
                "{} {}",
                detail,
                reporter.muted(&format!(
                    "({}, {} skipped)",
                    config.metadata().dialect,
                    config.metadata().skipped_blocks
                ))
            ),
        );

        summaries.push(FileSummary::new(path, &config));
        if args.graph {
            graphs.push(config);
        }
    }

    if args.json {
        write_json(&summaries)?;
    } else if args.graph {
        write_json(&graphs)?;
    }

    reporter.step(
        Tone::Progress,
        "Finished",
        &format!("inspecting {}", count(files.len(), "file", "files")),
    );
    Ok(())
}

fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let to_stdout = |message: String| LbError::Io {
        path: PathBuf::from("<stdout>"),
        message,
    };
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(|e| to_stdout(e.to_string()))?;
    writeln!(stdout).map_err(|e| to_stdout(e.to_string()))
}
