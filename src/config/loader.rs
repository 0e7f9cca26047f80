//! Configuration file discovery and loading.

use crate::config::schema::ReqlintConfig;
use crate::error::{ReqlintError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project config file.
pub const CONFIG_FILE_NAME: &str = ".reqlint.yml";

/// Path of the project config file under `project_root`.
pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_FILE_NAME)
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `Io` if the file cannot be read.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ReqlintConfig> {
    let content = fs::read_to_string(path)?;
    parse_config(&content, path)
}

/// Parse YAML content into [`ReqlintConfig`].
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<ReqlintConfig> {
    if content.trim().is_empty() {
        return Ok(ReqlintConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| ReqlintError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// If `config_override` is provided, that file must exist. Otherwise the
/// project's `.reqlint.yml` is used when present and defaults when not.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<ReqlintConfig> {
    if let Some(override_path) = config_override {
        return load_config_file(override_path);
    }

    let path = config_path(project_root);
    if path.is_file() {
        tracing::debug!("Loading config from {}", path.display());
        load_config_file(&path)
    } else {
        Ok(ReqlintConfig::default())
    }
}
