//! # cws
//!
//! Saved workspaces for the `claude` coding assistant. A workspace is a named
//! working directory plus any number of additional directories; launching it
//! starts `claude` in that directory with one `--add-dir` per extra directory.
//!
//! ## Quick Start
//!
//! ```bash
//! # Register the current directory as a workspace
//! cws add myapp
//!
//! # Register a directory with two extra directories
//! cws add backend ~/code/api ~/code/shared ~/code/proto
//!
//! # Launch a workspace by name (case-insensitive)
//! cws backend
//!
//! # Pick interactively, or manage workspaces from the menu
//! cws
//! ```
//!
//! ## Module Structure
//!
//! - [`commands`] - Command implementations (add, edit, rm, ls, launch, completions)
//! - [`config`] - The workspace record and its JSON file store
//! - [`registry`] - Lookups and validated mutations over the workspace list
//! - [`paths`] - Resolution of `~`, relative and absolute directory input
//! - [`launcher`] - Spawning the assistant with an inherited terminal
//! - [`selection`] - Abstracts interactive selection prompts for testability
//! - [`traits`] - Defines the ProcessLauncher trait for testability

pub mod commands;
pub mod config;
pub mod launcher;
pub mod paths;
pub mod registry;
pub mod selection;
pub mod traits;

pub use anyhow::Result;
