//! In-memory operations over the loaded workspace list.
//!
//! Every mutation validates against the whole list before touching it, so a
//! rejected operation leaves the registry exactly as it was. Persisting the
//! result is the caller's job.

use thiserror::Error;

use crate::config::{Workspace, WorkspaceConfig};
use crate::paths;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Directory does not exist: {0}")]
    MissingDirectory(String),

    #[error("Additional directory does not exist: {0}")]
    MissingAdditionalDirectory(String),

    #[error("A workspace named '{0}' already exists")]
    DuplicateName(String),

    #[error("Workspace '{name}' already uses {cwd}")]
    DuplicateCwd { name: String, cwd: String },

    #[error("{0} is already the working directory")]
    DirectoryIsCwd(String),

    #[error("{0} is already an additional directory")]
    DirectoryAlreadyAdded(String),

    #[error("Could not determine a workspace name from {0}")]
    MissingName(String),
}

/// Input for [`WorkspaceConfig::add`]. Paths must already be resolved.
#[derive(Debug, Clone, Default)]
pub struct NewWorkspace {
    /// Defaults to the last segment of `cwd`
    pub name: Option<String>,
    /// Defaults to the name
    pub description: Option<String>,
    pub cwd: String,
    pub add_dirs: Vec<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl WorkspaceConfig {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty()
    }

    /// Case-insensitive exact match on the name
    #[must_use]
    pub fn position_by_name(&self, name: &str) -> Option<usize> {
        let wanted = name.to_lowercase();
        self.workspaces
            .iter()
            .position(|ws| ws.name.to_lowercase() == wanted)
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Workspace> {
        self.position_by_name(name).map(|i| &self.workspaces[i])
    }

    /// Exact match on the stored working directory
    #[must_use]
    pub fn find_by_cwd(&self, cwd: &str) -> Option<&Workspace> {
        self.workspaces.iter().find(|ws| ws.cwd == cwd)
    }

    fn name_taken_by_other(&self, name: &str, index: Option<usize>) -> bool {
        self.position_by_name(name)
            .is_some_and(|found| Some(found) != index)
    }

    fn cwd_owner_other_than(&self, cwd: &str, index: Option<usize>) -> Option<&Workspace> {
        self.workspaces
            .iter()
            .enumerate()
            .find(|(i, ws)| ws.cwd == cwd && Some(*i) != index)
            .map(|(_, ws)| ws)
    }

    /// Validates and appends a new workspace, returning a reference to it
    ///
    /// # Errors
    /// Returns an error if:
    /// - The working directory or an additional directory does not exist
    /// - The name matches an existing workspace (case-insensitive)
    /// - Another workspace already uses the working directory
    pub fn add(&mut self, new: NewWorkspace) -> Result<&Workspace, RegistryError> {
        let NewWorkspace {
            name,
            description,
            cwd,
            add_dirs,
        } = new;

        if !paths::exists(&cwd) {
            return Err(RegistryError::MissingDirectory(cwd));
        }
        if let Some(missing) = add_dirs.iter().find(|dir| !paths::exists(dir)) {
            return Err(RegistryError::MissingAdditionalDirectory(missing.clone()));
        }

        let name = non_empty(name)
            .or_else(|| paths::last_segment(&cwd))
            .ok_or_else(|| RegistryError::MissingName(cwd.clone()))?;

        if self.name_taken_by_other(&name, None) {
            return Err(RegistryError::DuplicateName(name));
        }
        if let Some(owner) = self.cwd_owner_other_than(&cwd, None) {
            return Err(RegistryError::DuplicateCwd {
                name: owner.name.clone(),
                cwd,
            });
        }

        let description = non_empty(description).unwrap_or_else(|| name.clone());
        let mut workspace = Workspace {
            name,
            description,
            cwd,
            add_dirs: None,
        };
        workspace.set_dirs(add_dirs);

        self.workspaces.push(workspace);
        let last = self.workspaces.len() - 1;
        Ok(&self.workspaces[last])
    }

    /// Removes and returns the workspace at `index`
    pub fn remove(&mut self, index: usize) -> Workspace {
        self.workspaces.remove(index)
    }

    /// Renames the workspace at `index`
    ///
    /// # Errors
    /// Returns an error if a different workspace already has the name
    pub fn rename(&mut self, index: usize, new_name: &str) -> Result<(), RegistryError> {
        if self.name_taken_by_other(new_name, Some(index)) {
            return Err(RegistryError::DuplicateName(new_name.to_string()));
        }
        self.workspaces[index].name = new_name.to_string();
        Ok(())
    }

    pub fn set_description(&mut self, index: usize, description: &str) {
        self.workspaces[index].description = description.to_string();
    }

    /// Moves the workspace at `index` to a new working directory, pruning any
    /// additional directory that now equals it
    ///
    /// # Errors
    /// Returns an error if:
    /// - The directory does not exist
    /// - Another workspace already uses the directory
    pub fn set_cwd(&mut self, index: usize, cwd: &str) -> Result<(), RegistryError> {
        if !paths::exists(cwd) {
            return Err(RegistryError::MissingDirectory(cwd.to_string()));
        }
        if let Some(owner) = self.cwd_owner_other_than(cwd, Some(index)) {
            return Err(RegistryError::DuplicateCwd {
                name: owner.name.clone(),
                cwd: cwd.to_string(),
            });
        }

        let workspace = &mut self.workspaces[index];
        workspace.cwd = cwd.to_string();
        let dirs = workspace.add_dirs.take().unwrap_or_default();
        workspace.set_dirs(dirs);
        Ok(())
    }

    /// Appends an additional directory to the workspace at `index`
    ///
    /// # Errors
    /// Returns an error if the directory does not exist, is the working
    /// directory, or is already present
    pub fn add_dir(&mut self, index: usize, dir: &str) -> Result<(), RegistryError> {
        let workspace = &mut self.workspaces[index];

        if !paths::exists(dir) {
            return Err(RegistryError::MissingAdditionalDirectory(dir.to_string()));
        }
        if workspace.cwd == dir {
            return Err(RegistryError::DirectoryIsCwd(dir.to_string()));
        }
        if workspace.dirs().iter().any(|existing| existing == dir) {
            return Err(RegistryError::DirectoryAlreadyAdded(dir.to_string()));
        }

        workspace
            .add_dirs
            .get_or_insert_with(Vec::new)
            .push(dir.to_string());
        Ok(())
    }

    /// Removes the additional directory at `dir_index`, if any
    pub fn remove_dir(&mut self, index: usize, dir_index: usize) -> Option<String> {
        let workspace = &mut self.workspaces[index];
        let mut dirs = workspace.add_dirs.take().unwrap_or_default();
        let removed = (dir_index < dirs.len()).then(|| dirs.remove(dir_index));
        workspace.set_dirs(dirs);
        removed
    }

    pub fn clear_dirs(&mut self, index: usize) {
        self.workspaces[index].add_dirs = None;
    }
}
