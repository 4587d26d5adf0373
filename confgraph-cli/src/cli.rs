//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    ApplyCommand, DefaultsCommand, MainConfigCommand, SetCommand, TreeCommand,
};
use crate::utils::{GlobalOptions, OutputFormat};
use clap::{Parser, Subcommand};

/// Inspect and synchronize the demonstration configuration tree.
#[derive(Parser)]
#[command(name = "confgraph")]
#[command(version, about = "Inspect and sync confgraph configuration trees", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Document format for printed configs
    #[arg(
        long,
        value_enum,
        value_name = "FORMAT",
        global = true,
        env = "CONFGRAPH_FORMAT",
        default_value_t = OutputFormat::Yaml
    )]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Collects the options every command receives.
    pub fn global_options(&self) -> GlobalOptions {
        GlobalOptions {
            verbose: self.verbose,
            quiet: self.quiet,
            format: self.format,
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the resolved config trees
    Tree(TreeCommand),

    /// Print the default values of a config
    Defaults(DefaultsCommand),

    /// Apply a stored document and print the effective values
    Apply(ApplyCommand),

    /// Set one entry by dotted path
    Set(SetCommand),

    /// Show the main config of every mod id
    MainConfig(MainConfigCommand),
}
