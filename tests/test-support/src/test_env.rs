use anyhow::{Context, Result};
use assert_fs::TempDir;
use assert_fs::fixture::ChildPath;
use assert_fs::prelude::*;

/// Environment variable the fake assistant writes its log to
pub const LAUNCH_LOG_ENV: &str = "CWS_TEST_LAUNCH_LOG";

/// Records the working directory and every argument, one per line, then
/// exits with `$FAKE_EXIT` (default 0)
const FAKE_ASSISTANT: &str = r#"#!/bin/sh
{
  pwd -P
  for arg in "$@"; do
    printf '%s\n' "$arg"
  done
} > "$CWS_TEST_LAUNCH_LOG"
exit "${FAKE_EXIT:-0}"
"#;

/// Isolated home directory, workspace file and fake `claude` binary
pub struct CliTestEnvironment {
    pub home_dir: ChildPath,
    pub projects_dir: ChildPath,
    pub config_path: ChildPath,
    pub fake_assistant: ChildPath,
    pub launch_log: ChildPath,
    _temp_dir: TempDir,
}

impl CliTestEnvironment {
    /// Creates a new environment with an empty home and projects directory
    ///
    /// # Errors
    /// Returns an error if the temporary directories or the fake assistant
    /// cannot be created
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temporary directory")?;
        let home_dir = temp_dir.child("home");
        let projects_dir = temp_dir.child("projects");
        home_dir.create_dir_all()?;
        projects_dir.create_dir_all()?;

        let config_path = home_dir.child(".config/cws/workspaces.json");
        let fake_assistant = temp_dir.child("bin/claude");
        let launch_log = temp_dir.child("launch.log");

        fake_assistant.write_str(FAKE_ASSISTANT)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(
                fake_assistant.path(),
                std::fs::Permissions::from_mode(0o755),
            )?;
        }

        Ok(Self {
            home_dir,
            projects_dir,
            config_path,
            fake_assistant,
            launch_log,
            _temp_dir: temp_dir,
        })
    }

    /// Creates a directory under the projects directory and returns it
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created
    pub fn project(&self, name: &str) -> Result<ChildPath> {
        let dir = self.projects_dir.child(name);
        dir.create_dir_all()?;
        Ok(dir)
    }

    /// Execute a non-interactive CLI command from the projects directory
    ///
    /// # Errors
    /// Returns an error if the `cws` binary cannot be found
    pub fn run_command(&self, args: &[&str]) -> Result<assert_cmd::Command> {
        let mut cmd =
            assert_cmd::Command::cargo_bin("cws").context("Failed to find cws binary")?;

        cmd.current_dir(self.projects_dir.path())
            .env("HOME", self.home_dir.path())
            .env("CWS_CONFIG", self.config_path.path())
            .env("CWS_CLAUDE_BIN", self.fake_assistant.path())
            .env(LAUNCH_LOG_ENV, self.launch_log.path())
            .env_remove("CWS_LOG")
            .env_remove("FAKE_EXIT");

        cmd.args(args);
        Ok(cmd)
    }

    /// Contents of the workspace file
    ///
    /// # Errors
    /// Returns an error if the file does not exist
    pub fn read_config(&self) -> Result<String> {
        std::fs::read_to_string(self.config_path.path()).context("Failed to read workspace file")
    }

    /// Overwrites the workspace file
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub fn write_config(&self, contents: &str) -> Result<()> {
        self.config_path.write_str(contents)?;
        Ok(())
    }

    /// Lines written by the fake assistant, or `None` if it never ran
    ///
    /// # Errors
    /// Returns an error if the log exists but cannot be read
    pub fn launch_log_lines(&self) -> Result<Option<Vec<String>>> {
        if !self.launch_log.path().exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(self.launch_log.path())?;
        Ok(Some(contents.lines().map(str::to_string).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use predicates::prelude::*;

    #[test]
    fn test_environment_creation() -> Result<()> {
        let env = CliTestEnvironment::new()?;

        env.home_dir.assert(predicate::path::is_dir());
        env.projects_dir.assert(predicate::path::is_dir());
        env.fake_assistant.assert(predicate::str::contains("FAKE_EXIT"));
        env.config_path.assert(predicate::path::missing());
        assert!(env.launch_log_lines()?.is_none());

        Ok(())
    }

    #[test]
    fn test_project_creates_directory() -> Result<()> {
        let env = CliTestEnvironment::new()?;
        let dir = env.project("nested/app")?;
        dir.assert(predicate::path::is_dir());
        Ok(())
    }
}
