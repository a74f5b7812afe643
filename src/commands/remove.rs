use anyhow::Result;

use crate::commands::resolve_target;
use crate::config::{ConfigStore, Workspace};
use crate::selection::{RealSelectionProvider, SelectionProvider};

/// Removes a workspace by name, or through a picker when no name is given
///
/// # Errors
/// Returns an error if:
/// - No workspaces are configured
/// - The named workspace doesn't exist
/// - Interactive selection fails
/// - Failed to save the workspace file
pub fn remove_workspace(target: Option<&str>) -> Result<Option<Workspace>> {
    let store = ConfigStore::from_env()?;
    remove_workspace_with_provider(&store, target, &RealSelectionProvider)
}

/// Removes a workspace with a custom store and selection provider (for testing)
///
/// Returns `Ok(None)` when the picker is cancelled.
///
/// # Errors
/// Returns an error if:
/// - No workspaces are configured
/// - The named workspace doesn't exist
/// - Interactive selection fails
/// - Failed to save the workspace file
pub fn remove_workspace_with_provider(
    store: &ConfigStore,
    target: Option<&str>,
    provider: &dyn SelectionProvider,
) -> Result<Option<Workspace>> {
    let mut config = store.load();

    let Some(index) = resolve_target(&config, target, "Select workspace to remove:", provider)?
    else {
        println!("Cancelled.");
        return Ok(None);
    };

    let removed = config.remove(index);
    store.save(&config)?;

    println!("✓ Removed workspace '{}' ({})", removed.name, removed.cwd);
    Ok(Some(removed))
}
