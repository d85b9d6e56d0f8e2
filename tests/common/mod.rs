//! Shared integration-test harness for running the `pretimed` binary as a
//! child process.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

/// Helpers for spawning the compiled `pretimed` binary.
pub struct PretimedProcess;

impl PretimedProcess {
    /// Runs the binary with the given arguments and captures its output.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_command(args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_pretimed"))
            .args(args)
            .output()
            .expect("failed to spawn pretimed")
    }

    /// Returns the path to a test fixture.
    #[must_use]
    pub fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }
}
