//! Interactive field editor for a single workspace.
//!
//! The session is a loop over [`EditState`]: the field menu is shown again
//! after every change until the user picks "Done" or backs out of the menu.
//! Every change is saved immediately. Empty input on a prompt leaves the field
//! as it was.

use anyhow::Result;

use crate::commands::{resolve_target, warn};
use crate::config::{ConfigStore, WorkspaceConfig};
use crate::paths;
use crate::registry::RegistryError;
use crate::selection::{MenuOption, RealSelectionProvider, SelectionProvider};

const FIELD_NAME: usize = 0;
const FIELD_DESCRIPTION: usize = 1;
const FIELD_CWD: usize = 2;
const FIELD_DIRS: usize = 3;

const DIRS_ADD: usize = 0;
const DIRS_REMOVE: usize = 1;
const DIRS_CLEAR: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditState {
    ChoosingField,
    EditingDirectories,
    Finished,
}

/// Edits a workspace by name, or through a picker when no name is given
///
/// # Errors
/// Returns an error if:
/// - No workspaces are configured
/// - The named workspace doesn't exist
/// - A new working directory doesn't exist
/// - Failed to save the workspace file
pub fn edit_workspace(target: Option<&str>) -> Result<()> {
    let store = ConfigStore::from_env()?;
    edit_workspace_with_provider(&store, target, &RealSelectionProvider)
}

/// Edits a workspace with a custom store and selection provider (for testing)
///
/// # Errors
/// Returns an error if:
/// - No workspaces are configured
/// - The named workspace doesn't exist
/// - A new working directory doesn't exist
/// - Failed to save the workspace file
pub fn edit_workspace_with_provider(
    store: &ConfigStore,
    target: Option<&str>,
    provider: &dyn SelectionProvider,
) -> Result<()> {
    let mut config = store.load();

    let Some(index) = resolve_target(&config, target, "Select workspace to edit:", provider)?
    else {
        println!("Cancelled.");
        return Ok(());
    };

    let mut session = EditSession {
        store,
        config: &mut config,
        index,
        provider,
    };
    session.run()
}

struct EditSession<'a> {
    store: &'a ConfigStore,
    config: &'a mut WorkspaceConfig,
    index: usize,
    provider: &'a dyn SelectionProvider,
}

impl EditSession<'_> {
    fn run(&mut self) -> Result<()> {
        let mut state = EditState::ChoosingField;
        while state != EditState::Finished {
            state = match state {
                EditState::ChoosingField => self.choose_field()?,
                EditState::EditingDirectories => self.edit_directories()?,
                EditState::Finished => EditState::Finished,
            };
        }
        Ok(())
    }

    fn save(&self) -> Result<()> {
        self.store.save(self.config)
    }

    fn choose_field(&mut self) -> Result<EditState> {
        let ws = &self.config.workspaces[self.index];
        let options = vec![
            MenuOption::new("Name").with_detail(ws.name.clone()),
            MenuOption::new("Description").with_detail(ws.description.clone()),
            MenuOption::new("Working directory").with_detail(ws.cwd.clone()),
            MenuOption::new("Additional directories")
                .with_detail(format!("{} configured", ws.dirs().len())),
            MenuOption::new("Done"),
        ];
        let prompt = format!("Edit '{}':", ws.name);

        let next = match self.provider.select(&prompt, &options)? {
            Some(FIELD_NAME) => {
                self.edit_name()?;
                EditState::ChoosingField
            }
            Some(FIELD_DESCRIPTION) => {
                self.edit_description()?;
                EditState::ChoosingField
            }
            Some(FIELD_CWD) => {
                self.edit_cwd()?;
                EditState::ChoosingField
            }
            Some(FIELD_DIRS) => EditState::EditingDirectories,
            _ => EditState::Finished,
        };
        Ok(next)
    }

    fn prompt(&self, message: &str) -> Result<Option<String>> {
        Ok(self
            .provider
            .get_text_input(message, None)?
            .filter(|input| !input.is_empty()))
    }

    fn edit_name(&mut self) -> Result<()> {
        let current = self.config.workspaces[self.index].name.clone();
        let Some(name) = self.prompt(&format!("New name (current: {current}):"))? else {
            return Ok(());
        };

        match self.config.rename(self.index, &name) {
            Ok(()) => {
                self.save()?;
                println!("✓ Renamed '{}' to '{}'", current, name);
            }
            Err(e) => warn(e),
        }
        Ok(())
    }

    fn edit_description(&mut self) -> Result<()> {
        let current = self.config.workspaces[self.index].description.clone();
        let Some(description) = self.prompt(&format!("New description (current: {current}):"))?
        else {
            return Ok(());
        };

        self.config.set_description(self.index, &description);
        self.save()?;
        println!("✓ Description updated");
        Ok(())
    }

    fn edit_cwd(&mut self) -> Result<()> {
        let current = self.config.workspaces[self.index].cwd.clone();
        let Some(input) = self.prompt(&format!("New working directory (current: {current}):"))?
        else {
            return Ok(());
        };
        let cwd = paths::resolve_path_string(Some(&input))?;

        match self.config.set_cwd(self.index, &cwd) {
            Ok(()) => {
                self.save()?;
                println!("✓ Working directory set to {}", cwd);
            }
            Err(e @ RegistryError::MissingDirectory(_)) => return Err(e.into()),
            Err(e) => warn(e),
        }
        Ok(())
    }

    fn edit_directories(&mut self) -> Result<EditState> {
        let ws = &self.config.workspaces[self.index];
        let options = vec![
            MenuOption::new("Add directory"),
            MenuOption::new("Remove directory")
                .with_detail(format!("{} configured", ws.dirs().len())),
            MenuOption::new("Clear all"),
            MenuOption::new("Back"),
        ];

        match self
            .provider
            .select("Additional directories:", &options)?
        {
            Some(DIRS_ADD) => self.add_directory()?,
            Some(DIRS_REMOVE) => self.remove_directory()?,
            Some(DIRS_CLEAR) => {
                self.config.clear_dirs(self.index);
                self.save()?;
                println!("✓ Cleared additional directories");
            }
            _ => return Ok(EditState::ChoosingField),
        }
        Ok(EditState::EditingDirectories)
    }

    fn add_directory(&mut self) -> Result<()> {
        let Some(input) = self.prompt("Directory to add:")? else {
            return Ok(());
        };
        let dir = paths::resolve_path_string(Some(&input))?;

        match self.config.add_dir(self.index, &dir) {
            Ok(()) => {
                self.save()?;
                println!("✓ Added {}", dir);
            }
            Err(e) => warn(e),
        }
        Ok(())
    }

    fn remove_directory(&mut self) -> Result<()> {
        let dirs = self.config.workspaces[self.index].dirs().to_vec();
        if dirs.is_empty() {
            println!("No additional directories.");
            return Ok(());
        }

        let options: Vec<MenuOption> = dirs.iter().map(MenuOption::new).collect();
        let Some(dir_index) = self
            .provider
            .select("Select directory to remove:", &options)?
        else {
            return Ok(());
        };

        if let Some(removed) = self.config.remove_dir(self.index, dir_index) {
            self.save()?;
            println!("✓ Removed {}", removed);
        }
        Ok(())
    }
}
