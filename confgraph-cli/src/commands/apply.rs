//! Command to apply a stored document to a config.

use super::DEFAULT_CONFIG;
use crate::demo::Demo;
use crate::error::CliError;
use crate::utils::{render_config, report_rejected, Document, GlobalOptions};
use clap::Args;
use std::path::PathBuf;

/// Apply a YAML or JSON document and print the effective values.
///
/// Values the document lacks keep their defaults. Values that cannot be
/// used are reported on stderr and also keep their defaults.
#[derive(Args)]
pub struct ApplyCommand {
    /// Document to apply (`.json` files are read as JSON, others as YAML)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Config to apply the document to
    #[arg(long, value_name = "KEY", default_value = DEFAULT_CONFIG)]
    pub config: String,

    /// Fail when any value is rejected
    #[arg(long)]
    pub strict: bool,
}

impl ApplyCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let demo = Demo::build()?;
        let config = super::select(&demo, &self.config)?;

        let document = Document::load(&self.file)?;
        let rejected = document.apply_to(config);
        report_rejected(&rejected);

        print!("{}", render_config(config, global.format)?);

        if self.strict && !rejected.is_empty() {
            return Err(CliError::SemanticFailure(format!(
                "{} value(s) rejected",
                rejected.len()
            )));
        }
        Ok(())
    }
}
