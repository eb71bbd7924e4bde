//! Parse options (`lbconv.yaml`).
//!
//! Every field is optional; an empty file or no file at all gives
//! auto-detection, the dialect's default vendor tag and no extra skips.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LbError, Result};
use crate::parser::Dialect;

/// The name of the options file looked up next to the inputs.
pub const OPTIONS_FILENAME: &str = "lbconv.yaml";

/// Dialect selection: detect from the source, or force one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DialectChoice {
    #[default]
    Auto,
    EditSet,
    Braced,
}

/// Options controlling one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub dialect: DialectChoice,

    /// Vendor tag recorded in the metadata. Defaults per dialect.
    pub vendor: Option<String>,

    /// Braced-dialect header prefixes to skip even when recognised
    /// (e.g. `ltm monitor` to drop all monitors).
    pub skip_kinds: Vec<String>,
}

impl ParseOptions {
    /// Load options from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| LbError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read options: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse options from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| LbError::Options {
            message: e.to_string(),
            help: Some(format!(
                "Check {} syntax; `dialect` takes auto, edit-set or braced",
                OPTIONS_FILENAME
            )),
        })
    }

    /// The dialect to parse `source` with.
    pub fn resolve_dialect(&self, source: &str) -> Result<Dialect> {
        match self.dialect {
            DialectChoice::EditSet => Ok(Dialect::EditSet),
            DialectChoice::Braced => Ok(Dialect::Braced),
            DialectChoice::Auto => Dialect::detect(source).ok_or(LbError::UnknownDialect),
        }
    }

    /// Vendor tag for a parse in `dialect`.
    pub fn vendor_for(&self, dialect: Dialect) -> String {
        self.vendor
            .clone()
            .unwrap_or_else(|| dialect.default_vendor().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_options() {
        let options = ParseOptions::parse(
            r#"
dialect: braced
vendor: f5-lab
skip_kinds:
  - ltm monitor
"#,
        )
        .unwrap();

        assert_eq!(options.dialect, DialectChoice::Braced);
        assert_eq!(options.vendor.as_deref(), Some("f5-lab"));
        assert_eq!(options.skip_kinds, vec!["ltm monitor"]);
    }

    #[test]
    fn test_parse_defaults() {
        let options = ParseOptions::parse("vendor: x\n").unwrap();
        assert_eq!(options.dialect, DialectChoice::Auto);
        assert!(options.skip_kinds.is_empty());

        assert_eq!(ParseOptions::parse("").unwrap(), ParseOptions::default());
    }

    #[test]
    fn test_parse_invalid_dialect() {
        let err = ParseOptions::parse("dialect: nginx\n").unwrap_err();
        assert!(matches!(err, LbError::Options { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ParseOptions::load(Path::new("/nonexistent/lbconv.yaml")).unwrap_err();
        assert!(matches!(err, LbError::Io { .. }));
    }

    #[test]
    fn test_resolve_dialect() {
        let auto = ParseOptions::default();
        assert_eq!(auto.resolve_dialect("config a\nend\n").unwrap(), Dialect::EditSet);
        assert!(matches!(
            auto.resolve_dialect("just words\n"),
            Err(LbError::UnknownDialect)
        ));

        let forced = ParseOptions {
            dialect: DialectChoice::Braced,
            ..Default::default()
        };
        assert_eq!(forced.resolve_dialect("config a\nend\n").unwrap(), Dialect::Braced);
    }

    #[test]
    fn test_vendor_for() {
        let options = ParseOptions::default();
        assert_eq!(options.vendor_for(Dialect::EditSet), "fortiadc");

        let options = ParseOptions {
            vendor: Some("custom".to_string()),
            ..Default::default()
        };
        assert_eq!(options.vendor_for(Dialect::Braced), "custom");
    }
}
