//! Configuration schema definitions for reqlint.
//!
//! This module contains the struct that maps to the `.reqlint.yml`
//! file format.

use serde::{Deserialize, Serialize};

use crate::lint::OutputFormat;

/// Root configuration structure for `.reqlint.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReqlintConfig {
    /// Interpreter used to list and install packages
    pub python: String,

    /// Requirements file, relative to the project root
    pub requirements_file: String,

    /// `setup.py` used when there is no requirements file
    pub setup_file: String,

    /// Import names never reported as undeclared
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,

    /// Names added to the standard-library set
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_stdlib: Vec<String>,

    /// First-party packages in addition to the discovered ones
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub local_packages: Vec<String>,

    /// Directory names skipped when collecting sources
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    /// Default output format
    pub output: OutputFormat,
}

impl Default for ReqlintConfig {
    fn default() -> Self {
        Self {
            python: "python3".to_string(),
            requirements_file: "requirements.txt".to_string(),
            setup_file: "setup.py".to_string(),
            ignore: Vec::new(),
            extra_stdlib: Vec::new(),
            local_packages: Vec::new(),
            exclude: Vec::new(),
            output: OutputFormat::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: ReqlintConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, ReqlintConfig::default());
        assert_eq!(config.python, "python3");
        assert_eq!(config.requirements_file, "requirements.txt");
        assert_eq!(config.setup_file, "setup.py");
    }

    #[test]
    fn parses_all_fields() {
        let yaml = r#"
python: .venv/bin/python
requirements_file: requirements/base.txt
setup_file: build/setup.py
ignore: [vendored]
extra_stdlib: [_private_ext]
local_packages: [tools]
exclude: [docs]
output: json
"#;
        let config: ReqlintConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.python, ".venv/bin/python");
        assert_eq!(config.requirements_file, "requirements/base.txt");
        assert_eq!(config.setup_file, "build/setup.py");
        assert_eq!(config.ignore, vec!["vendored"]);
        assert_eq!(config.extra_stdlib, vec!["_private_ext"]);
        assert_eq!(config.local_packages, vec!["tools"]);
        assert_eq!(config.exclude, vec!["docs"]);
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn rejects_unknown_output_format() {
        let result: Result<ReqlintConfig, _> = serde_yaml::from_str("output: sarif");
        assert!(result.is_err());
    }
}
