//! Persistence for the workspace list.
//!
//! The whole registry lives in a single JSON document:
//!
//! ```json
//! {
//!   "workspaces": [
//!     {
//!       "name": "api",
//!       "description": "Backend services",
//!       "cwd": "/home/me/code/api",
//!       "addDirs": ["/home/me/code/shared"]
//!     }
//!   ]
//! }
//! ```
//!
//! Loading is forgiving: a missing file is an empty registry, and a corrupt
//! file is reported as a warning and treated as empty so the tool stays usable.
//! Saving always rewrites the full document.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable that overrides the config file location
pub const CONFIG_PATH_ENV: &str = "CWS_CONFIG";

/// A named launch target: a working directory plus extra directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub name: String,

    /// Free-form text shown next to the name. Falls back to the name.
    #[serde(default)]
    pub description: String,

    /// Absolute, normalized working directory
    pub cwd: String,

    /// Additional directories passed to the assistant with `--add-dir`.
    ///
    /// `Some` always holds at least one entry; an empty set is stored as `None`
    /// so the key is left out of the file.
    #[serde(
        rename = "addDirs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub add_dirs: Option<Vec<String>>,
}

impl Workspace {
    /// Additional directories as a slice, empty when none are set
    #[must_use]
    pub fn dirs(&self) -> &[String] {
        self.add_dirs.as_deref().unwrap_or_default()
    }

    /// Replaces the additional directories, enforcing the stored-set rules:
    /// first occurrence wins, entries equal to `cwd` are dropped, and an empty
    /// result is stored as `None`.
    pub fn set_dirs(&mut self, dirs: Vec<String>) {
        let mut unique: Vec<String> = Vec::with_capacity(dirs.len());
        for dir in dirs {
            if dir != self.cwd && !unique.contains(&dir) {
                unique.push(dir);
            }
        }
        self.add_dirs = if unique.is_empty() { None } else { Some(unique) };
    }

    /// Restores invariants on a record read from disk
    fn normalized(mut self) -> Self {
        if self.description.is_empty() {
            self.description = self.name.clone();
        }
        let dirs = self.add_dirs.take().unwrap_or_default();
        self.set_dirs(dirs);
        self
    }
}

/// Root of the persisted document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    pub workspaces: Vec<Workspace>,
}

impl WorkspaceConfig {
    /// Parses a document, returning an error for malformed JSON or a document
    /// that is not shaped `{ "workspaces": [...] }`.
    ///
    /// # Errors
    /// Returns an error if the content cannot be parsed
    pub fn from_json(content: &str) -> Result<Self> {
        let parsed: WorkspaceConfig = serde_json::from_str(content)?;
        Ok(Self {
            workspaces: parsed
                .workspaces
                .into_iter()
                .map(Workspace::normalized)
                .collect(),
        })
    }

    /// Serializes as pretty-printed JSON with a trailing newline
    ///
    /// # Errors
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String> {
        let mut content =
            serde_json::to_string_pretty(self).context("Failed to serialize workspaces")?;
        content.push('\n');
        Ok(content)
    }
}

/// Reads and writes the workspace document at a fixed location.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Creates a store backed by an explicit file path
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at `$CWS_CONFIG`, or `~/.config/cws/workspaces.json`
    ///
    /// # Errors
    /// Returns an error if no override is set and the home directory cannot be
    /// determined
    pub fn from_env() -> Result<Self> {
        let path = if let Some(custom_path) = std::env::var_os(CONFIG_PATH_ENV) {
            PathBuf::from(custom_path)
        } else {
            Self::default_path()?
        };
        Ok(Self::new(path))
    }

    /// Default location of the workspace document under the home directory
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined
    pub fn default_path() -> Result<PathBuf> {
        Ok(dirs::home_dir()
            .context("Failed to get user home directory")?
            .join(".config")
            .join("cws")
            .join("workspaces.json"))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the workspace list. Never fails: an absent file is an empty list,
    /// and an unreadable or malformed file produces a warning and an empty list.
    #[must_use]
    pub fn load(&self) -> WorkspaceConfig {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no config file, starting empty");
                return WorkspaceConfig::default();
            }
            Err(e) => {
                eprintln!(
                    "⚠ Warning: Failed to read {}: {}",
                    self.path.display(),
                    e
                );
                eprintln!("  Continuing with no workspaces.");
                return WorkspaceConfig::default();
            }
        };

        if content.trim().is_empty() {
            return WorkspaceConfig::default();
        }

        match WorkspaceConfig::from_json(&content) {
            Ok(config) => {
                debug!(
                    path = %self.path.display(),
                    count = config.workspaces.len(),
                    "loaded workspaces"
                );
                config
            }
            Err(e) => {
                eprintln!("⚠ Warning: Invalid workspace file {}:", self.path.display());
                eprintln!("  {}", e);
                eprintln!("  Continuing with no workspaces. The file is replaced on the next save.");
                WorkspaceConfig::default()
            }
        }
    }

    /// Rewrites the full document, creating the config directory if needed
    ///
    /// # Errors
    /// Returns an error if:
    /// - Failed to create the config directory
    /// - Failed to write or replace the config file
    pub fn save(&self, config: &WorkspaceConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = config.to_json()?;

        // Write atomically: write to temp then rename
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        debug!(
            path = %self.path.display(),
            count = config.workspaces.len(),
            "saved workspaces"
        );
        Ok(())
    }
}
