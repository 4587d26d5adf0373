//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with a temporary directory
//! - Command builder helpers
//! - Document fixtures

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with an isolated working directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Get a command builder for the confgraph binary.
    ///
    /// Environment variables that change output are cleared so tests do not
    /// depend on the caller's shell.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("confgraph").expect("Failed to find confgraph binary");
        cmd.env_remove("CONFGRAPH_FORMAT")
            .env_remove("CONFGRAPH_LOG_MODE")
            .current_dir(&self.temp_path);
        cmd
    }

    /// Write a file into the test environment and return its path.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Read a file from the test environment.
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.temp_path.join(name)).expect("Failed to read test file")
    }

    /// Run a command and return stdout, asserting success.
    pub fn stdout(&self, args: &[&str]) -> String {
        let output = self.command().args(args).output().expect("Failed to run command");
        assert!(
            output.status.success(),
            "Command {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// A stored client document with one rejected and one absent value.
#[allow(dead_code)]
pub const CLIENT_YAML: &str = "\
enabled: false
video:
  fov: 200
  quality: high
audio:
  volume: 25
";
