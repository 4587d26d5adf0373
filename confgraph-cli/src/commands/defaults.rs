//! Command to print the default values of a config.

use super::DEFAULT_CONFIG;
use crate::demo::Demo;
use crate::error::CliError;
use crate::utils::{render_config, GlobalOptions};
use clap::Args;

/// Fetch a freshly resolved config into an empty document and print it.
#[derive(Args)]
pub struct DefaultsCommand {
    /// Config to print
    #[arg(long, value_name = "KEY", default_value = DEFAULT_CONFIG)]
    pub config: String,
}

impl DefaultsCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let demo = Demo::build()?;
        let config = super::select(&demo, &self.config)?;
        print!("{}", render_config(config, global.format)?);
        Ok(())
    }
}
