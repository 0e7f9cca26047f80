//! Inventory backed by a Python interpreter.
//!
//! Runs the interpreter with a short `importlib.metadata` script that
//! prints every installed distribution as JSON, including the names listed
//! in its `top_level.txt`.

use std::process::{Command, Stdio};

use super::{InstalledPackage, Inventory, InventoryError};

/// Script printing `[{"name", "version", "top_level"}]` for the environment.
const LIST_SCRIPT: &str = r#"
import json
from importlib import metadata

out = []
for dist in metadata.distributions():
    name = dist.metadata.get("Name")
    if not name:
        continue
    text = dist.read_text("top_level.txt") or ""
    top = [line.strip() for line in text.splitlines() if line.strip()]
    out.append({"name": name, "version": dist.version, "top_level": top})
print(json.dumps(out))
"#;

/// Lists packages installed for a Python interpreter.
#[derive(Debug, Clone)]
pub struct PipInventory {
    python: String,
}

impl PipInventory {
    /// Create an inventory for the given interpreter (e.g. `python3` or a
    /// virtualenv's `bin/python`).
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }

    /// The interpreter this inventory queries.
    pub fn python(&self) -> &str {
        &self.python
    }
}

impl Inventory for PipInventory {
    fn packages(&self) -> Result<Vec<InstalledPackage>, InventoryError> {
        tracing::debug!("Querying installed packages via {}", self.python);

        let output = Command::new(&self.python)
            .arg("-c")
            .arg(LIST_SCRIPT)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| InventoryError::Unavailable {
                program: self.python.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(InventoryError::Failed {
                program: self.python.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let packages = parse_package_list(&output.stdout)?;
        tracing::debug!("Found {} installed packages", packages.len());
        Ok(packages)
    }
}

/// Decode the JSON package list printed by the interpreter.
pub fn parse_package_list(stdout: &[u8]) -> Result<Vec<InstalledPackage>, InventoryError> {
    serde_json::from_slice(stdout).map_err(|e| InventoryError::Malformed {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_package_list() {
        let json = br#"[
            {"name": "requests", "version": "2.31.0", "top_level": ["requests"]},
            {"name": "PyYAML", "version": "6.0.1", "top_level": ["_yaml", "yaml"]}
        ]"#;
        let packages = parse_package_list(json).unwrap();
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[1].name, "PyYAML");
        assert_eq!(packages[1].top_level, vec!["_yaml", "yaml"]);
    }

    #[test]
    fn malformed_output_is_an_error() {
        let err = parse_package_list(b"Traceback (most recent call last)").unwrap_err();
        assert!(matches!(err, InventoryError::Malformed { .. }));
    }

    #[test]
    fn missing_interpreter_is_unavailable() {
        let inventory = PipInventory::new("/nonexistent/bin/python-reqlint-test");
        let err = inventory.packages().unwrap_err();
        assert!(matches!(err, InventoryError::Unavailable { .. }));
    }

    #[test]
    fn remembers_interpreter() {
        assert_eq!(PipInventory::new("python3.12").python(), "python3.12");
    }
}
