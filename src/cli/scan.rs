//! State file discovery.
//!
//! Explicit file arguments are always taken. Directories are walked
//! recursively for `*.tfstate` and `*.tfstate.json`, skipping paths that match
//! an ignore pattern.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use walkdir::WalkDir;

/// Collect state files under `paths`, sorted and de-duplicated.
pub fn collect_state_files(paths: &[PathBuf], ignores: &[String]) -> Result<Vec<PathBuf>> {
    let patterns = ignores
        .iter()
        .map(|p| {
            Pattern::new(p).with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", p))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut files = BTreeSet::new();

    for path in paths {
        if path.is_file() {
            files.insert(path.clone());
            continue;
        }
        if !path.is_dir() {
            bail!("State path does not exist: {}", path.display());
        }

        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!("Cannot access path: {}", e);
                    continue;
                }
            };
            let entry_path = entry.path();
            let path_str = entry_path.to_string_lossy();

            if patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if entry_path.is_file() && is_state_file(entry_path) {
                files.insert(entry_path.to_path_buf());
            }
        }
    }

    Ok(files.into_iter().collect())
}

fn is_state_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".tfstate") || n.ends_with(".tfstate.json"))
}
