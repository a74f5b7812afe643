use anyhow::{Context, Result};
use std::path::Path;

use crate::CliTestEnvironment;

/// Builds a workspace file with one record per `(name, cwd, dirs)` entry
#[must_use]
pub fn workspace_json(workspaces: &[(&str, &Path, Vec<&Path>)]) -> String {
    let records: Vec<String> = workspaces
        .iter()
        .map(|(name, cwd, dirs)| {
            let mut record = format!(
                "    {{\n      \"name\": {:?},\n      \"description\": {:?},\n      \"cwd\": {:?}",
                name,
                name,
                cwd.to_string_lossy()
            );
            if !dirs.is_empty() {
                let dirs: Vec<String> = dirs
                    .iter()
                    .map(|d| format!("{:?}", d.to_string_lossy()))
                    .collect();
                record.push_str(&format!(",\n      \"addDirs\": [{}]", dirs.join(", ")));
            }
            record.push_str("\n    }");
            record
        })
        .collect();
    format!("{{\n  \"workspaces\": [\n{}\n  ]\n}}\n", records.join(",\n"))
}

/// Asserts the fake assistant ran in `cwd` with exactly one `--add-dir`
/// pair per entry of `dirs`, in order
///
/// # Errors
/// Returns an error if the assistant never ran or its log is unreadable
pub fn assert_launched_with(env: &CliTestEnvironment, cwd: &Path, dirs: &[&Path]) -> Result<()> {
    let lines = env
        .launch_log_lines()?
        .context("The assistant was never launched")?;

    let mut expected = vec![
        std::fs::canonicalize(cwd)?
            .to_string_lossy()
            .into_owned(),
    ];
    for dir in dirs {
        expected.push("--add-dir".to_string());
        expected.push(std::fs::canonicalize(dir)?.to_string_lossy().into_owned());
    }

    assert_eq!(lines, expected, "Unexpected launch working directory or arguments");
    Ok(())
}
