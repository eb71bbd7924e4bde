pub mod completions;
pub mod inspect;
pub mod validate;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::error::Result;
use crate::options::{DialectChoice, ParseOptions, OPTIONS_FILENAME};

/// lbconv - Load-balancer configuration parser
#[derive(Parser, Debug)]
#[command(name = "lbconv")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse configuration dumps and summarise what was found
    Inspect(inspect::InspectArgs),

    /// Parse configuration dumps and report problems
    Validate(validate::ValidateArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Inputs and parse settings shared by `inspect` and `validate`.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Configuration files or directories to scan
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Dialect of the inputs (default: detect per file)
    #[arg(long, value_enum)]
    pub dialect: Option<DialectChoice>,

    /// Vendor tag to record in the metadata
    #[arg(long)]
    pub vendor: Option<String>,

    /// Options file (default: ./lbconv.yaml when present)
    #[arg(long)]
    pub options: Option<PathBuf>,
}

impl InputArgs {
    /// Load the options file, then apply command-line overrides.
    pub fn parse_options(&self) -> Result<ParseOptions> {
        let mut options = match &self.options {
            Some(path) => ParseOptions::load(path)?,
            None if Path::new(OPTIONS_FILENAME).is_file() => {
                ParseOptions::load(Path::new(OPTIONS_FILENAME))?
            }
            None => ParseOptions::default(),
        };

        if let Some(dialect) = self.dialect {
            options.dialect = dialect;
        }
        if let Some(vendor) = &self.vendor {
            options.vendor = Some(vendor.clone());
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_inspect_flags() {
        let cli = Cli::parse_from([
            "lbconv", "-vv", "inspect", "a.conf", "--dialect", "edit-set", "--json",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Inspect(args) => {
                assert_eq!(args.input.dialect, Some(DialectChoice::EditSet));
                assert!(args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_flags_override_options_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("opts.yaml");
        std::fs::write(&path, "dialect: braced\nvendor: from-file\nskip_kinds: [ltm monitor]\n")
            .unwrap();

        let input = InputArgs {
            paths: vec![],
            dialect: None,
            vendor: Some("from-flag".to_string()),
            options: Some(path),
        };
        let options = input.parse_options().unwrap();

        assert_eq!(options.dialect, DialectChoice::Braced);
        assert_eq!(options.vendor.as_deref(), Some("from-flag"));
        assert_eq!(options.skip_kinds, vec!["ltm monitor"]);
    }
}
