//! Library exports for confgraph-cli.
//!
//! The binary in `main.rs` is a thin wrapper over these modules; exposing
//! them keeps the demo schema and commands reachable from unit tests.

pub mod cli;
pub mod commands;
pub mod demo;
pub mod error;
pub mod utils;

pub use cli::Cli;
