//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `tree`: Print the resolved config trees
//! - `defaults`: Print the default values of a config
//! - `apply`: Apply a stored document and print the effective values
//! - `set`: Set one entry by dotted path
//! - `main_config`: Show the main config of every mod id

pub mod apply;
pub mod defaults;
pub mod main_config;
pub mod set;
pub mod tree;

pub use apply::ApplyCommand;
pub use defaults::DefaultsCommand;
pub use main_config::MainConfigCommand;
pub use set::SetCommand;
pub use tree::TreeCommand;

use crate::demo::Demo;
use crate::error::CliError;
use confgraph::Config;

/// Key of the config commands act on when none is given.
pub const DEFAULT_CONFIG: &str = "demo";

/// Looks up a demo config by key.
pub(crate) fn select<'a>(demo: &'a Demo, key: &str) -> Result<&'a Config, CliError> {
    demo.config(key).ok_or_else(|| {
        let known: Vec<String> = demo.configs.iter().map(|c| c.key().to_string()).collect();
        CliError::InvalidArguments(format!(
            "unknown config '{key}' (known: {})",
            known.join(", ")
        ))
    })
}
