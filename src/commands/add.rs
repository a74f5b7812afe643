use anyhow::Result;

use crate::config::{ConfigStore, Workspace};
use crate::paths;
use crate::registry::NewWorkspace;
use crate::selection::{RealSelectionProvider, SelectionProvider};

/// Positional arguments of `cws add`
#[derive(Debug, Clone, Default)]
pub struct AddArgs {
    pub name: Option<String>,
    pub cwd: Option<String>,
    pub dirs: Vec<String>,
}

impl AddArgs {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.cwd.is_none() && self.dirs.is_empty()
    }
}

/// Adds a workspace, prompting for everything when no arguments are given
///
/// # Errors
/// Returns an error if:
/// - A directory does not exist
/// - The name or working directory is already registered
/// - Failed to save the workspace file
pub fn add_workspace(args: AddArgs) -> Result<Option<Workspace>> {
    let store = ConfigStore::from_env()?;
    add_workspace_with_provider(&store, args, &RealSelectionProvider)
}

/// Adds a workspace with a custom store and selection provider (for testing)
///
/// Returns `Ok(None)` when the interactive flow is cancelled.
///
/// # Errors
/// Returns an error if:
/// - A directory does not exist
/// - The name or working directory is already registered
/// - Failed to save the workspace file
pub fn add_workspace_with_provider(
    store: &ConfigStore,
    args: AddArgs,
    provider: &dyn SelectionProvider,
) -> Result<Option<Workspace>> {
    let new = if args.is_empty() {
        match prompt_new_workspace(provider)? {
            Some(new) => new,
            None => {
                println!("Cancelled.");
                return Ok(None);
            }
        }
    } else {
        from_args(args)?
    };

    let mut config = store.load();
    let added = config.add(new)?.clone();
    store.save(&config)?;

    println!("✓ Workspace added successfully!");
    println!("  Name: {}", added.name);
    println!("  Path: {}", added.cwd);
    for dir in added.dirs() {
        println!("  Additional: {}", dir);
    }

    Ok(Some(added))
}

fn from_args(args: AddArgs) -> Result<NewWorkspace> {
    let cwd = paths::resolve_path_string(args.cwd.as_deref())?;
    let add_dirs = args
        .dirs
        .iter()
        .map(|dir| paths::resolve_path_string(Some(dir)))
        .collect::<Result<Vec<_>>>()?;

    Ok(NewWorkspace {
        name: args.name,
        description: None,
        cwd,
        add_dirs,
    })
}

/// Walks the user through the fields of a new workspace
fn prompt_new_workspace(provider: &dyn SelectionProvider) -> Result<Option<NewWorkspace>> {
    let Some(cwd_input) = provider.get_text_input("Working directory:", Some("."))? else {
        return Ok(None);
    };
    let cwd = paths::resolve_path_string(Some(&cwd_input))?;
    if !paths::exists(&cwd) {
        anyhow::bail!("Directory does not exist: {}", cwd);
    }

    let default_name = paths::last_segment(&cwd).unwrap_or_default();
    let Some(name) = provider.get_text_input("Name:", Some(&default_name))? else {
        return Ok(None);
    };

    let Some(description) = provider.get_text_input("Description:", Some(&name))? else {
        return Ok(None);
    };

    let mut add_dirs = Vec::new();
    loop {
        let Some(dir) =
            provider.get_text_input("Additional directory (leave empty to finish):", None)?
        else {
            return Ok(None);
        };
        if dir.is_empty() {
            break;
        }
        add_dirs.push(paths::resolve_path_string(Some(&dir))?);
    }

    Ok(Some(NewWorkspace {
        name: Some(name),
        description: Some(description),
        cwd,
        add_dirs,
    }))
}
