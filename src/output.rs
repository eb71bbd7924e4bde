//! Human-readable reporting for the lbconv CLI.
//!
//! Progress, summaries and diagnostics go to stderr with the verb
//! right-aligned in a fixed column. JSON written by `--json` and `--graph`
//! goes to stdout and never passes through here.

use std::env;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::graph::EntityKind;
use crate::validation::{Diagnostic, Severity, ValidationResult};

const VERB_COLUMN: usize = 12;

/// How a status line is coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Work being done or completed cleanly.
    Progress,
    /// A summary of what was found.
    Summary,
    Warning,
    Failure,
}

impl Tone {
    fn sgr(self) -> &'static str {
        match self {
            Tone::Progress => "1;32",
            Tone::Summary => "1;36",
            Tone::Warning => "1;33",
            Tone::Failure => "1;31",
        }
    }
}

impl From<Severity> for Tone {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Warning => Tone::Warning,
            Severity::Error => Tone::Failure,
        }
    }
}

/// Writes report lines to stderr, coloured only when stderr is a terminal.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new() -> Self {
        Self::with_color(io::stderr().is_terminal())
    }

    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    /// Report one step, e.g. `    Checking dumps/bigip.conf`.
    pub fn step(&self, tone: Tone, verb: &str, message: &str) {
        self.emit(&self.step_line(tone, verb, message));
    }

    /// Report every diagnostic in a result, with its help text indented below.
    pub fn diagnostics(&self, result: &ValidationResult) {
        for diagnostic in result.iter() {
            for line in self.diagnostic_lines(diagnostic) {
                self.emit(&line);
            }
        }
    }

    /// Grey out secondary detail such as `(braced, 2 skipped)`.
    pub fn muted(&self, text: &str) -> String {
        self.paint("2", text)
    }

    fn step_line(&self, tone: Tone, verb: &str, message: &str) -> String {
        let verb = format!("{verb:>VERB_COLUMN$}");
        format!("{} {}", self.paint(tone.sgr(), &verb), message)
    }

    fn diagnostic_lines(&self, d: &Diagnostic) -> Vec<String> {
        let label = format!("{}[{}]", d.severity, d.code);
        let mut lines = vec![format!(
            "  {}: {}",
            self.paint(Tone::from(d.severity).sgr(), &label),
            d.message
        )];
        if let Some(help) = &d.help {
            lines.push(format!("    {} {}", self.muted("help:"), help));
        }
        lines
    }

    fn paint(&self, sgr: &str, text: &str) -> String {
        if self.color {
            format!("\x1b[{sgr}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    fn emit(&self, line: &str) {
        // Write errors on stderr are ignored
        let _ = writeln!(io::stderr().lock(), "{line}");
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

/// A count with the right noun: `count(1, "file", "files")` gives `1 file`.
pub fn count(n: usize, singular: &str, plural: &str) -> String {
    let noun = if n == 1 { singular } else { plural };
    format!("{n} {noun}")
}

/// A count of entities, e.g. `1 real server` or `3 health monitors`.
pub fn count_of(n: usize, kind: EntityKind) -> String {
    count(n, &kind.name().replace('-', " "), kind.plural())
}

/// Show `path` relative to the working directory when it lies below it.
pub fn display_path(path: &Path) -> String {
    let relative = env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf));
    match relative {
        Some(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Some(rel) => rel.display().to_string(),
        None => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_nouns() {
        assert_eq!(count(1, "file", "files"), "1 file");
        assert_eq!(count(0, "file", "files"), "0 files");
        assert_eq!(count(2, "error", "errors"), "2 errors");
    }

    #[test]
    fn test_count_of_entity_kinds() {
        assert_eq!(count_of(1, EntityKind::RealServer), "1 real server");
        assert_eq!(count_of(3, EntityKind::HealthMonitor), "3 health monitors");
        assert_eq!(count_of(1, EntityKind::Pool), "1 pool");
    }

    #[test]
    fn test_step_line_aligns_verb() {
        let reporter = Reporter::with_color(false);
        assert_eq!(
            reporter.step_line(Tone::Progress, "Parsing", "bigip.conf"),
            "     Parsing bigip.conf"
        );
    }

    #[test]
    fn test_colour_wraps_only_the_verb() {
        let reporter = Reporter::with_color(true);
        assert_eq!(
            reporter.step_line(Tone::Failure, "Failed", "1 file"),
            "\x1b[1;31m      Failed\x1b[0m 1 file"
        );
        assert_eq!(reporter.muted("(braced)"), "\x1b[2m(braced)\x1b[0m");
    }

    #[test]
    fn test_diagnostic_lines() {
        let reporter = Reporter::with_color(false);
        let d = Diagnostic::warning("lbconv::validate::no-monitor", "pool 'web' has no monitor")
            .with_help("add a health check");

        assert_eq!(
            reporter.diagnostic_lines(&d),
            vec![
                "  warning[lbconv::validate::no-monitor]: pool 'web' has no monitor".to_string(),
                "    help: add a health check".to_string(),
            ]
        );
    }

    #[test]
    fn test_display_path_outside_cwd_stays_absolute() {
        let p = Path::new("/nonexistent/path/to/file");
        assert_eq!(display_path(p), "/nonexistent/path/to/file");
    }
}
