//! Source discovery.
//!
//! Collects the Python sources of a project and the names of its own
//! top-level packages.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Directory names never searched for sources.
const SKIPPED_DIRS: &[&str] = &[
    "__pycache__",
    "site-packages",
    "node_modules",
    "venv",
    "env",
];

/// Whether a directory named `name` is skipped during discovery.
pub fn is_skipped_dir(name: &str, exclude: &[String]) -> bool {
    name.starts_with('.')
        || name.ends_with(".egg-info")
        || SKIPPED_DIRS.contains(&name)
        || exclude.iter().any(|e| e == name)
}

/// Every `*.py` file under `root`, sorted.
pub fn python_sources(root: &Path, exclude: &[String]) -> Result<Vec<PathBuf>> {
    let mut sources = Vec::new();
    collect_sources(root, exclude, &mut sources)?;
    sources.sort();
    Ok(sources)
}

/// Directory symlinks are not followed. Subdirectories that cannot be read
/// are logged and skipped; only a failure to read `dir` itself is returned.
fn collect_sources(dir: &Path, exclude: &[String], sources: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();

        if file_type.is_symlink() && path.is_dir() {
            tracing::debug!("Not following directory symlink {}", path.display());
        } else if file_type.is_dir() {
            if is_skipped_dir(&name, exclude) {
                continue;
            }
            if let Err(e) = collect_sources(&path, exclude, sources) {
                tracing::warn!("Skipping unreadable directory {}: {}", path.display(), e);
            }
        } else if path.extension().is_some_and(|e| e == "py") {
            sources.push(path);
        }
    }
    Ok(())
}

/// Names of the project's own top-level packages and modules.
///
/// Packages are directories holding an `__init__.py`, at the root or
/// under `src/`. Modules are top-level `*.py` files other than `setup.py`.
pub fn local_packages(root: &Path) -> Result<Vec<String>> {
    let mut names = packages_in(root)?;
    let src = root.join("src");
    if src.is_dir() {
        names.extend(packages_in(&src)?);
    }

    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().is_none_or(|e| e != "py") {
            continue;
        }
        if let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) {
            if stem != "setup" {
                names.push(stem);
            }
        }
    }

    names.sort();
    names.dedup();
    Ok(names)
}

fn packages_in(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        if path.is_dir() && !is_skipped_dir(&name, &[]) && path.join("__init__.py").is_file() {
            names.push(name);
        }
    }
    Ok(names)
}
