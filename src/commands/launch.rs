use anyhow::Result;

use crate::commands::add::{AddArgs, add_workspace_with_provider};
use crate::commands::edit::edit_workspace_with_provider;
use crate::commands::list::render_workspaces;
use crate::commands::remove::remove_workspace_with_provider;
use crate::commands::workspace_options;
use crate::config::ConfigStore;
use crate::launcher::{CommandLauncher, LaunchTarget, launch_target, launch_workspace};
use crate::selection::{MenuOption, RealSelectionProvider, SelectionProvider};
use crate::traits::ProcessLauncher;

const WELCOME_ADD: usize = 0;
const WELCOME_BARE: usize = 1;

const MANAGE_ADD: usize = 0;
const MANAGE_EDIT: usize = 1;
const MANAGE_DELETE: usize = 2;
const MANAGE_LIST: usize = 3;

/// Launches the named workspace, or shows the selector when no name is given.
/// Returns the assistant's exit code, or 0 when nothing was launched.
///
/// # Errors
/// Returns an error if:
/// - The named workspace doesn't exist
/// - A workspace directory has been removed since it was registered
/// - The assistant could not be spawned
pub fn launch(name: Option<&str>) -> Result<i32> {
    let store = ConfigStore::from_env()?;
    let launcher = CommandLauncher::from_env();

    match name {
        Some(name) => launch_by_name(&store, name, &launcher),
        None => match select_launch_target(&store, &RealSelectionProvider)? {
            Some(target) => launch_target(&target, &launcher),
            None => Ok(0),
        },
    }
}

/// Looks up a workspace by name and launches it
///
/// # Errors
/// Returns an error if the workspace doesn't exist or fails re-validation
pub fn launch_by_name(
    store: &ConfigStore,
    name: &str,
    launcher: &dyn ProcessLauncher,
) -> Result<i32> {
    let config = store.load();
    let workspace = config
        .find_by_name(name)
        .ok_or_else(|| anyhow::anyhow!("Workspace '{}' not found", name))?;
    launch_workspace(workspace, launcher)
}

/// Runs the top-level selector until the user picks something to launch
///
/// Returns `Ok(None)` when the user backs out without choosing.
///
/// # Errors
/// Returns an error if a prompt fails or an action taken from the manage menu
/// fails
pub fn select_launch_target(
    store: &ConfigStore,
    provider: &dyn SelectionProvider,
) -> Result<Option<LaunchTarget>> {
    loop {
        let config = store.load();

        if config.is_empty() {
            let options = [
                MenuOption::new("Add a workspace"),
                MenuOption::new("Launch without a workspace"),
            ];
            match provider.select("No workspaces yet. What would you like to do?", &options)? {
                Some(WELCOME_ADD) => {
                    if let Some(added) =
                        add_workspace_with_provider(store, AddArgs::default(), provider)?
                    {
                        return Ok(Some(LaunchTarget::Workspace(added)));
                    }
                }
                Some(WELCOME_BARE) => return Ok(Some(LaunchTarget::Bare)),
                _ => return Ok(None),
            }
            continue;
        }

        let count = config.workspaces.len();
        let mut options = workspace_options(&config);
        options.push(MenuOption::new("Launch without a workspace"));
        options.push(MenuOption::new("Manage workspaces…"));

        match provider.select("Select workspace:", &options)? {
            Some(i) if i < count => {
                return Ok(Some(LaunchTarget::Workspace(config.workspaces[i].clone())));
            }
            Some(i) if i == count => return Ok(Some(LaunchTarget::Bare)),
            Some(_) => manage(store, provider)?,
            None => return Ok(None),
        }
    }
}

/// The manage sub-menu. Returns to the selector afterwards.
fn manage(store: &ConfigStore, provider: &dyn SelectionProvider) -> Result<()> {
    let options = [
        MenuOption::new("Add workspace"),
        MenuOption::new("Edit workspace"),
        MenuOption::new("Delete workspace"),
        MenuOption::new("List workspaces"),
        MenuOption::new("Back"),
    ];

    match provider.select("Manage workspaces:", &options)? {
        Some(MANAGE_ADD) => {
            add_workspace_with_provider(store, AddArgs::default(), provider)?;
        }
        Some(MANAGE_EDIT) => edit_workspace_with_provider(store, None, provider)?,
        Some(MANAGE_DELETE) => {
            remove_workspace_with_provider(store, None, provider)?;
        }
        Some(MANAGE_LIST) => print!("{}", render_workspaces(&store.load())),
        _ => {}
    }
    Ok(())
}
