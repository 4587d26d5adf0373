//! Command to show the main config of every mod id.

use crate::demo::Demo;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;

/// Show the main config per mod id.
#[derive(Args)]
pub struct MainConfigCommand {
    /// Only show this mod id
    #[arg(value_name = "MOD_ID")]
    pub mod_id: Option<String>,
}

impl MainConfigCommand {
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let demo = Demo::build()?;

        if let Some(mod_id) = &self.mod_id {
            let key = demo.registry.main_config(mod_id).ok_or_else(|| {
                CliError::SemanticFailure(format!("no main config for '{mod_id}'"))
            })?;
            println!("{key}");
            return Ok(());
        }

        for (mod_id, key) in demo.registry.main_configs() {
            match key {
                Some(key) => println!("{mod_id}: {key}"),
                None => println!("{mod_id}: (ambiguous)"),
            }
        }
        Ok(())
    }
}
