//! Command implementations, one module per subcommand.
//!
//! Each command loads the workspace file fresh, works on the in-memory list
//! and saves after every mutation. Commands that prompt have a
//! `*_with_provider` variant taking the store and a [`SelectionProvider`] so
//! flows can be driven by a script in tests.
//!
//! [`SelectionProvider`]: crate::selection::SelectionProvider

pub mod add;
pub mod completions;
pub mod edit;
pub mod launch;
pub mod list;
pub mod remove;

use anyhow::Result;

use crate::config::WorkspaceConfig;
use crate::selection::{MenuOption, SelectionProvider};

/// Prints a non-fatal problem and lets the caller carry on
pub(crate) fn warn(message: impl std::fmt::Display) {
    eprintln!("⚠ Warning: {}", message);
}

/// Menu entries for every workspace: the name with the description or
/// directory as detail
pub(crate) fn workspace_options(config: &WorkspaceConfig) -> Vec<MenuOption> {
    config
        .workspaces
        .iter()
        .map(|ws| {
            let detail = if ws.description.is_empty() || ws.description == ws.name {
                ws.cwd.clone()
            } else {
                format!("{} · {}", ws.description, ws.cwd)
            };
            MenuOption::new(ws.name.clone()).with_detail(detail)
        })
        .collect()
}

/// Resolves a workspace by name, or asks the user to pick one
///
/// Returns `Ok(None)` when the picker is cancelled.
///
/// # Errors
/// Returns an error if:
/// - No workspaces are configured
/// - The named workspace does not exist
/// - The selection prompt fails
pub(crate) fn resolve_target(
    config: &WorkspaceConfig,
    target: Option<&str>,
    prompt: &str,
    provider: &dyn SelectionProvider,
) -> Result<Option<usize>> {
    if config.is_empty() {
        anyhow::bail!("No workspaces configured. Run `cws add` to create one.");
    }

    match target {
        Some(name) => config
            .position_by_name(name)
            .map(Some)
            .ok_or_else(|| anyhow::anyhow!("Workspace '{}' not found", name)),
        None => provider.select(prompt, &workspace_options(config)),
    }
}
