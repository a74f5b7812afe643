use anyhow::Result;

use crate::config::{ConfigStore, WorkspaceConfig};
use crate::paths;

/// Prints every configured workspace, or bare names for shell completion
///
/// # Errors
/// Returns an error if the config location cannot be determined
pub fn list_workspaces(list_completions: bool) -> Result<()> {
    let store = ConfigStore::from_env()?;
    let config = store.load();

    if list_completions {
        for ws in &config.workspaces {
            println!("{}", ws.name);
        }
        return Ok(());
    }

    print!("{}", render_workspaces(&config));
    Ok(())
}

fn status(path: &str) -> &'static str {
    if paths::exists(path) { "✓" } else { "✗" }
}

/// Human-readable listing used by `cws ls` and the manage menu
#[must_use]
pub fn render_workspaces(config: &WorkspaceConfig) -> String {
    if config.is_empty() {
        return "No workspaces configured.\nRun `cws add` to create one.\n".to_string();
    }

    let mut out = String::new();
    for ws in &config.workspaces {
        if ws.description.is_empty() || ws.description == ws.name {
            out.push_str(&format!("{} {}\n", status(&ws.cwd), ws.name));
        } else {
            out.push_str(&format!(
                "{} {} - {}\n",
                status(&ws.cwd),
                ws.name,
                ws.description
            ));
        }
        out.push_str(&format!("    {}\n", ws.cwd));
        for dir in ws.dirs() {
            out.push_str(&format!("    + {} {}\n", dir, status(dir)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Workspace;
    use crate::paths::path_to_string;

    #[test]
    fn test_render_empty() {
        let out = render_workspaces(&WorkspaceConfig::default());
        assert!(out.starts_with("No workspaces configured."));
    }

    #[test]
    fn test_render_marks_missing_directories() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let cwd = path_to_string(temp.path());
        let gone = path_to_string(&temp.path().join("gone"));

        let mut ws = Workspace {
            name: "api".into(),
            description: "Backend".into(),
            cwd: cwd.clone(),
            add_dirs: None,
        };
        ws.set_dirs(vec![gone.clone()]);
        let out = render_workspaces(&WorkspaceConfig {
            workspaces: vec![ws],
        });

        assert!(out.contains("✓ api - Backend\n"));
        assert!(out.contains(&format!("    {}\n", cwd)));
        assert!(out.contains(&format!("    + {} ✗\n", gone)));
        Ok(())
    }
}
