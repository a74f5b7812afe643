//! Test support utilities for cws integration tests
//!
//! Shared fixtures for driving the `cws` binary against a throwaway home
//! directory, workspace file and fake assistant. Not published.

pub mod patterns;
pub mod test_env;

pub use patterns::{assert_launched_with, workspace_json};
pub use test_env::CliTestEnvironment;
