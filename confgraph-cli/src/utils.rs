//! Utility functions for CLI operations.
//!
//! This module provides helpers shared across commands: document loading
//! and saving, output rendering and value parsing.

use crate::error::CliError;
use clap::ValueEnum;
use confgraph::{Config, Rejected, Value};
use std::path::Path;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Output document format.
    pub format: OutputFormat,
}

/// Document format for printed output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// YAML document.
    #[default]
    Yaml,
    /// Pretty-printed JSON document.
    Json,
}

/// A parsed configuration document.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// Loaded from a YAML file.
    Yaml(serde_yaml::Value),
    /// Loaded from a `.json` file.
    Json(serde_json::Value),
}

impl Document {
    /// Loads a document, picking the parser from the file extension.
    ///
    /// Files ending in `.json` are read as JSON; everything else as YAML.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Err(CliError::InvalidArguments(format!(
                "File not found: {}",
                path.display()
            )));
        }
        let contents = std::fs::read_to_string(path)?;
        let document = if is_json(path) {
            Self::Json(serde_json::from_str(&contents)?)
        } else {
            Self::Yaml(serde_yaml::from_str(&contents)?)
        };
        log::debug!("loaded {}", path.display());
        Ok(document)
    }

    /// Writes the document back in its own format.
    pub fn save(&self, path: &Path) -> Result<(), CliError> {
        let contents = match self {
            Self::Yaml(value) => serde_yaml::to_string(value)?,
            Self::Json(value) => serde_json::to_string_pretty(value)? + "\n",
        };
        std::fs::write(path, contents)?;
        log::debug!("wrote {}", path.display());
        Ok(())
    }

    /// Applies the document to `config`, returning rejected values.
    pub fn apply_to(&self, config: &Config) -> Vec<Rejected> {
        match self {
            Self::Yaml(value) => config.apply(value),
            Self::Json(value) => config.apply(value),
        }
    }

    /// Stores the current values of `config` into the document.
    pub fn fetch_from(&mut self, config: &Config) -> Result<(), CliError> {
        match self {
            Self::Yaml(value) => config.fetch(value)?,
            Self::Json(value) => config.fetch(value)?,
        }
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Fetches `config` into an empty document and renders it.
pub fn render_config(config: &Config, format: OutputFormat) -> Result<String, CliError> {
    let rendered = match format {
        OutputFormat::Yaml => {
            let mut node = serde_yaml::Value::Null;
            config.fetch(&mut node)?;
            serde_yaml::to_string(&node)?
        }
        OutputFormat::Json => {
            let mut node = serde_json::Value::Null;
            config.fetch(&mut node)?;
            serde_json::to_string_pretty(&node)? + "\n"
        }
    };
    Ok(rendered)
}

/// Parses a command-line value as a YAML scalar or list.
///
/// Anything that does not parse (or parses to a mapping or null) is taken
/// as plain text.
pub fn parse_value(raw: &str) -> Value {
    serde_yaml::from_str::<Value>(raw).unwrap_or_else(|_| Value::Text(raw.to_string()))
}

/// Prints rejected values to stderr.
pub fn report_rejected(rejected: &[Rejected]) {
    for r in rejected {
        eprintln!("rejected {}: {}", r.path, r.error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_shapes() {
        assert_eq!(parse_value("42"), Value::Integer(42));
        assert_eq!(parse_value("true"), Value::Bool(true));
        assert_eq!(parse_value("0.5"), Value::Float(0.5));
        assert_eq!(parse_value("high"), Value::Text("high".into()));
        assert_eq!(parse_value("a: b"), Value::Text("a: b".into()));
    }

    #[test]
    fn test_is_json() {
        assert!(is_json(Path::new("settings.json")));
        assert!(is_json(Path::new("SETTINGS.JSON")));
        assert!(!is_json(Path::new("settings.yaml")));
        assert!(!is_json(Path::new("settings")));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Document::load(Path::new("/nonexistent/settings.yaml")).unwrap_err();
        assert!(matches!(err, CliError::InvalidArguments(_)));
    }

    #[test]
    fn test_load_and_save_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"enabled": false}"#).unwrap();

        let document = Document::load(&path).unwrap();
        assert_eq!(
            document,
            Document::Json(serde_json::json!({ "enabled": false }))
        );
        document.save(&path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("\"enabled\": false"));
    }
}
