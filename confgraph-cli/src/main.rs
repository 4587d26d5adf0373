//! Main entry point for the confgraph CLI.
//!
//! This is a demonstration front end for the confgraph library. It resolves
//! a sample settings schema and provides commands for inspecting it:
//! - `tree`: Print the resolved config trees
//! - `defaults`: Print default values as YAML or JSON
//! - `apply`: Apply a stored document
//! - `set`: Set one entry by dotted path
//! - `main-config`: Show the main config of every mod id

use clap::Parser;
use confgraph_cli::cli::{Cli, Command};

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _logger = confgraph::init_logger(cli.verbose, cli.quiet);

    let global = cli.global_options();

    // Execute the command
    let result = match cli.command {
        Command::Tree(cmd) => cmd.execute(&global),
        Command::Defaults(cmd) => cmd.execute(&global),
        Command::Apply(cmd) => cmd.execute(&global),
        Command::Set(cmd) => cmd.execute(&global),
        Command::MainConfig(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
