//! Command to set one entry by dotted path.

use super::DEFAULT_CONFIG;
use crate::demo::Demo;
use crate::error::CliError;
use crate::utils::{parse_value, report_rejected, Document, GlobalOptions};
use clap::Args;
use std::path::PathBuf;

/// Set an entry through its validating write path.
///
/// Unlike `apply`, an invalid value is an error.
#[derive(Args)]
pub struct SetCommand {
    /// Dotted entry path (e.g. `video.fov`)
    #[arg(value_name = "PATH")]
    pub path: String,

    /// New value, parsed as a YAML scalar
    #[arg(value_name = "VALUE")]
    pub value: String,

    /// Document applied before setting the value
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Write the effective values back to --file
    #[arg(long, requires = "file")]
    pub write: bool,

    /// Config holding the entry
    #[arg(long, value_name = "KEY", default_value = DEFAULT_CONFIG)]
    pub config: String,
}

impl SetCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let demo = Demo::build()?;
        let config = super::select(&demo, &self.config)?;

        let mut document = match &self.file {
            Some(path) => {
                let document = Document::load(path)?;
                report_rejected(&document.apply_to(config));
                Some(document)
            }
            None => None,
        };

        let entry = config.find_entry(&self.path).ok_or_else(|| {
            CliError::InvalidArguments(format!("no entry at '{}'", self.path))
        })?;
        entry.set_value(parse_value(&self.value)).map_err(|e| {
            if e.is_validation() {
                CliError::SemanticFailure(e.to_string())
            } else {
                CliError::from(e)
            }
        })?;

        if !global.quiet {
            println!("{} = {}", self.path, entry.format(&entry.value()));
        }
        if entry.requires_restart() {
            log::warn!("{} takes effect after a restart", self.path);
        }

        if self.write {
            if let (Some(document), Some(path)) = (document.as_mut(), &self.file) {
                document.fetch_from(config)?;
                document.save(path)?;
            }
        }
        Ok(())
    }
}
