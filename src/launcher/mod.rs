//! Spawning the coding assistant.
//!
//! The assistant takes over the terminal until it exits: its standard streams
//! are inherited and this process only waits. A workspace launch sets the
//! working directory and passes each additional directory as `--add-dir <path>`.

use anyhow::{Context, Result};
use std::cell::RefCell;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

use crate::config::Workspace;
use crate::paths;
use crate::traits::ProcessLauncher;

/// Program launched when no override is configured
pub const DEFAULT_PROGRAM: &str = "claude";

/// Environment variable that overrides the launched program
pub const PROGRAM_ENV: &str = "CWS_CLAUDE_BIN";

/// Flag that precedes every additional directory
pub const ADD_DIR_FLAG: &str = "--add-dir";

/// What to spawn: an optional working directory and the argument list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchRequest {
    pub cwd: Option<PathBuf>,
    pub args: Vec<String>,
}

impl LaunchRequest {
    /// A launch in the current directory with no arguments
    #[must_use]
    pub fn bare() -> Self {
        Self::default()
    }

    /// A launch rooted at the workspace with one `--add-dir` pair per
    /// additional directory, in stored order
    #[must_use]
    pub fn for_workspace(workspace: &Workspace) -> Self {
        let args = workspace
            .dirs()
            .iter()
            .flat_map(|dir| [ADD_DIR_FLAG.to_string(), dir.clone()])
            .collect();

        Self {
            cwd: Some(PathBuf::from(&workspace.cwd)),
            args,
        }
    }
}

/// What the top-level selector settled on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchTarget {
    Bare,
    Workspace(Workspace),
}

/// Real launcher built on `std::process::Command`
pub struct CommandLauncher {
    program: String,
}

impl CommandLauncher {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Launcher for `$CWS_CLAUDE_BIN`, falling back to `claude`
    #[must_use]
    pub fn from_env() -> Self {
        let program = std::env::var(PROGRAM_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());
        Self::new(program)
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl ProcessLauncher for CommandLauncher {
    fn run(&self, request: &LaunchRequest) -> Result<i32> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&request.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        if let Some(cwd) = &request.cwd {
            cmd.current_dir(cwd);
        }

        debug!(program = %self.program, cwd = ?request.cwd, args = ?request.args, "launching");

        let status = cmd
            .status()
            .with_context(|| format!("Failed to launch '{}'. Is it installed?", self.program))?;

        debug!(?status, "assistant exited");
        // Signal termination has no code
        Ok(status.code().unwrap_or(0))
    }
}

/// Launcher that records requests instead of spawning, for tests
#[derive(Default)]
pub struct RecordingLauncher {
    pub exit_code: i32,
    requests: RefCell<Vec<LaunchRequest>>,
}

impl RecordingLauncher {
    #[must_use]
    pub fn with_exit_code(exit_code: i32) -> Self {
        Self {
            exit_code,
            requests: RefCell::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn requests(&self) -> Vec<LaunchRequest> {
        self.requests.borrow().clone()
    }
}

impl ProcessLauncher for RecordingLauncher {
    fn run(&self, request: &LaunchRequest) -> Result<i32> {
        self.requests.borrow_mut().push(request.clone());
        Ok(self.exit_code)
    }
}

/// Checks that the workspace's directories are still there
///
/// # Errors
/// Returns an error naming the first missing directory
pub fn revalidate(workspace: &Workspace) -> Result<()> {
    if !paths::exists(&workspace.cwd) {
        anyhow::bail!(
            "Working directory for '{}' no longer exists: {}",
            workspace.name,
            workspace.cwd
        );
    }
    if let Some(missing) = workspace.dirs().iter().find(|dir| !paths::exists(dir)) {
        anyhow::bail!(
            "Additional directory for '{}' no longer exists: {}",
            workspace.name,
            missing
        );
    }
    Ok(())
}

/// Launches the assistant with no workspace
///
/// # Errors
/// Returns an error if the program cannot be spawned
pub fn launch_bare(launcher: &dyn ProcessLauncher) -> Result<i32> {
    launcher.run(&LaunchRequest::bare())
}

/// Re-validates the workspace, then launches the assistant inside it
///
/// # Errors
/// Returns an error if:
/// - The working directory or an additional directory has been removed
/// - The program cannot be spawned
pub fn launch_workspace(workspace: &Workspace, launcher: &dyn ProcessLauncher) -> Result<i32> {
    revalidate(workspace)?;

    println!("Launching {} in {}", workspace.name, workspace.cwd);
    for dir in workspace.dirs() {
        println!("  + {}", dir);
    }

    launcher.run(&LaunchRequest::for_workspace(workspace))
}

/// Launches whatever the selector picked
///
/// # Errors
/// Returns an error if validation or spawning fails
pub fn launch_target(target: &LaunchTarget, launcher: &dyn ProcessLauncher) -> Result<i32> {
    match target {
        LaunchTarget::Bare => launch_bare(launcher),
        LaunchTarget::Workspace(workspace) => launch_workspace(workspace, launcher),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::path_to_string;

    fn workspace(cwd: &str, dirs: &[&str]) -> Workspace {
        let mut ws = Workspace {
            name: "app".to_string(),
            description: "app".to_string(),
            cwd: cwd.to_string(),
            add_dirs: None,
        };
        ws.set_dirs(dirs.iter().map(ToString::to_string).collect());
        ws
    }

    #[test]
    fn test_request_for_workspace_pairs_flags_in_order() {
        let ws = workspace("/srv/app", &["/srv/lib", "/srv/docs"]);
        let request = LaunchRequest::for_workspace(&ws);

        assert_eq!(request.cwd, Some(PathBuf::from("/srv/app")));
        assert_eq!(
            request.args,
            ["--add-dir", "/srv/lib", "--add-dir", "/srv/docs"]
        );
    }

    #[test]
    fn test_bare_request_has_no_cwd_or_args() {
        let request = LaunchRequest::bare();
        assert_eq!(request.cwd, None);
        assert!(request.args.is_empty());
    }

    #[test]
    fn test_launch_workspace_forwards_exit_code() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let cwd = path_to_string(temp.path());
        let launcher = RecordingLauncher::with_exit_code(42);

        let code = launch_workspace(&workspace(&cwd, &[]), &launcher)?;

        assert_eq!(code, 42);
        assert_eq!(launcher.requests().len(), 1);
        Ok(())
    }

    #[test]
    fn test_deleted_cwd_fails_before_spawn() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let cwd = temp.path().join("removed");
        std::fs::create_dir(&cwd)?;
        let ws = workspace(&path_to_string(&cwd), &[]);
        std::fs::remove_dir(&cwd)?;

        let launcher = RecordingLauncher::default();
        let result = launch_workspace(&ws, &launcher);

        assert!(result.is_err());
        assert!(launcher.requests().is_empty());
        Ok(())
    }

    #[test]
    fn test_deleted_additional_dir_fails_before_spawn() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let cwd = path_to_string(temp.path());
        let gone = path_to_string(&temp.path().join("gone"));

        let launcher = RecordingLauncher::default();
        let result = launch_workspace(&workspace(&cwd, &[&gone]), &launcher);

        assert!(matches!(result, Err(ref e) if e.to_string().contains("gone")));
        assert!(launcher.requests().is_empty());
        Ok(())
    }

    #[test]
    fn test_launch_target_bare() -> Result<()> {
        let launcher = RecordingLauncher::default();
        assert_eq!(launch_target(&LaunchTarget::Bare, &launcher)?, 0);
        assert_eq!(launcher.requests(), [LaunchRequest::bare()]);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_command_launcher_reports_exit_code() -> Result<()> {
        let launcher = CommandLauncher::new("false");
        assert_eq!(launcher.run(&LaunchRequest::bare())?, 1);
        Ok(())
    }

    #[test]
    fn test_command_launcher_missing_program() {
        let launcher = CommandLauncher::new("cws-definitely-not-installed");
        let result = launcher.run(&LaunchRequest::bare());
        assert!(matches!(result, Err(ref e) if e.to_string().contains("Is it installed")));
    }
}
