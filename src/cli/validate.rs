use clap::Args;

use crate::discovery::collect_inputs;
use crate::error::{LbError, Result};
use crate::loader::parse_file;
use crate::output::{count, display_path, Reporter, Tone};
use crate::validation::validate_configuration;

/// Parse configuration dumps and report problems
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: super::InputArgs,

    /// Treat dangling references as errors (non-zero exit)
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let reporter = Reporter::new();
    let options = args.input.parse_options()?;
    let files = collect_inputs(&args.input.paths);

    let mut errors = 0;
    let mut warnings = 0;

    for path in &files {
        reporter.step(Tone::Progress, "Checking", &display_path(path));
        let config = parse_file(path, &options)?;

        let mut result = validate_configuration(&config);
        if args.strict {
            result = result.escalate_dangling();
        }
        reporter.diagnostics(&result);

        errors += result.error_count();
        warnings += result.warning_count();
    }

    let checked = count(files.len(), "file", "files");
    if errors > 0 {
        reporter.step(
            Tone::Failure,
            "Failed",
            &format!(
                "{}: {}, {}",
                checked,
                count(errors, "error", "errors"),
                count(warnings, "warning", "warnings")
            ),
        );
        return Err(LbError::Validation {
            message: format!("{} dangling reference(s)", errors),
            help: Some("Rerun without --strict to treat them as warnings".to_string()),
        });
    }

    if warnings > 0 {
        reporter.step(
            Tone::Warning,
            "Finished",
            &format!("{} with {}", checked, count(warnings, "warning", "warnings")),
        );
    } else {
        reporter.step(Tone::Progress, "Finished", &format!("{}, no problems found", checked));
    }

    Ok(())
}

