//! Resolution of user-supplied directory strings.
//!
//! Workspace directories are stored as absolute, lexically normalized strings so
//! that two spellings of the same location (`~/code/app`, `../app`,
//! `/home/me/code/./app`) compare equal in the registry.

use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};

/// Resolves `input` against the process working directory and home directory.
///
/// - empty or missing input resolves to the current working directory
/// - a leading `~` is replaced by the home directory
/// - anything else is made absolute relative to the current working directory
///
/// # Errors
/// Returns an error if the current working directory cannot be determined
pub fn resolve_path(input: Option<&str>) -> Result<PathBuf> {
    let base = std::env::current_dir().context("Failed to determine current directory")?;
    let home = dirs::home_dir();
    Ok(resolve_path_from(input, &base, home.as_deref()))
}

/// Same as [`resolve_path`] but returns the path as a string, the form in
/// which workspace directories are stored.
///
/// # Errors
/// Returns an error if the current working directory cannot be determined
pub fn resolve_path_string(input: Option<&str>) -> Result<String> {
    resolve_path(input).map(|path| path_to_string(&path))
}

/// Pure core of [`resolve_path`] with injected base and home directories.
#[must_use]
pub fn resolve_path_from(input: Option<&str>, base: &Path, home: Option<&Path>) -> PathBuf {
    let raw = input.map(str::trim).unwrap_or_default();

    if raw.is_empty() {
        return normalize(base);
    }

    if let (Some(rest), Some(home)) = (raw.strip_prefix('~'), home) {
        let rest = rest.trim_start_matches(['/', '\\']);
        return normalize(&home.join(rest));
    }

    let candidate = Path::new(raw);
    if candidate.is_absolute() {
        normalize(candidate)
    } else {
        normalize(&base.join(candidate))
    }
}

/// Lexically normalizes a path: drops `.` components and folds `..` into the
/// preceding component. Symlinks are not followed.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                if !matches!(
                    normalized.components().next_back(),
                    None | Some(Component::RootDir | Component::Prefix(_))
                ) {
                    normalized.pop();
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    normalized
}

/// True iff something exists at `path`. Directories are not required.
#[must_use]
pub fn exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// Final path segment, used as the default workspace name.
#[must_use]
pub fn last_segment(path: &str) -> Option<String> {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
}

#[must_use]
pub fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> PathBuf {
        PathBuf::from("/work/projects")
    }

    fn home() -> PathBuf {
        PathBuf::from("/home/dev")
    }

    #[test]
    fn test_empty_input_resolves_to_base() {
        assert_eq!(resolve_path_from(None, &base(), Some(&home())), base());
        assert_eq!(resolve_path_from(Some(""), &base(), Some(&home())), base());
        assert_eq!(resolve_path_from(Some("   "), &base(), Some(&home())), base());
    }

    #[test]
    fn test_tilde_expands_to_home() {
        assert_eq!(resolve_path_from(Some("~"), &base(), Some(&home())), home());
        assert_eq!(
            resolve_path_from(Some("~/code/app"), &base(), Some(&home())),
            PathBuf::from("/home/dev/code/app")
        );
        // The marker is replaced, the remainder joined
        assert_eq!(
            resolve_path_from(Some("~app"), &base(), Some(&home())),
            PathBuf::from("/home/dev/app")
        );
    }

    #[test]
    fn test_relative_input_joins_base() {
        assert_eq!(
            resolve_path_from(Some("api"), &base(), Some(&home())),
            PathBuf::from("/work/projects/api")
        );
        assert_eq!(
            resolve_path_from(Some("./api/../web/"), &base(), Some(&home())),
            PathBuf::from("/work/projects/web")
        );
        assert_eq!(
            resolve_path_from(Some(".."), &base(), Some(&home())),
            PathBuf::from("/work")
        );
    }

    #[test]
    fn test_absolute_input_is_normalized() {
        assert_eq!(
            resolve_path_from(Some("/srv/./data/../www"), &base(), Some(&home())),
            PathBuf::from("/srv/www")
        );
        assert_eq!(
            resolve_path_from(Some("/../.."), &base(), Some(&home())),
            PathBuf::from("/")
        );
    }

    #[test]
    fn test_tilde_without_home_is_relative() {
        assert_eq!(
            resolve_path_from(Some("~/x"), &base(), None),
            PathBuf::from("/work/projects/~/x")
        );
    }

    #[test]
    fn test_exists_accepts_files_and_directories() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let file = temp.path().join("notes.txt");
        std::fs::write(&file, "x")?;

        assert!(exists(temp.path()));
        assert!(exists(&file));
        assert!(!exists(temp.path().join("missing")));
        Ok(())
    }

    #[test]
    fn test_last_segment() {
        assert_eq!(last_segment("/home/dev/myapp").as_deref(), Some("myapp"));
        assert_eq!(last_segment("/"), None);
    }
}
