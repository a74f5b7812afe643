use anyhow::Result;

use crate::launcher::LaunchRequest;

/// Trait for spawning the assistant to enable mocking in tests
pub trait ProcessLauncher {
    /// Runs the program to completion with the terminal attached and returns
    /// its exit code
    fn run(&self, request: &LaunchRequest) -> Result<i32>;
}
