//! Installed-package inventory.
//!
//! The inventory wraps the environment's package manager and reports the
//! packages currently installed. Queries are blocking, may be slow, and may
//! fail; a failed query makes the unsatisfied-requirements check
//! indeterminate for that pass rather than "all satisfied" or "all missing".
//!
//! # Modules
//!
//! - [`pip`] - Inventory backed by a Python interpreter's `importlib.metadata`

pub mod pip;

pub use pip::PipInventory;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A package installed in the target environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledPackage {
    /// Distribution name.
    pub name: String,
    /// Installed version string.
    pub version: String,
    /// Top-level importable names the distribution provides, if known.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_level: Vec<String>,
}

impl InstalledPackage {
    /// Create a package without top-level metadata.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            top_level: Vec::new(),
        }
    }

    /// Attach the top-level importable names.
    pub fn with_top_level<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.top_level = names.into_iter().map(Into::into).collect();
        self
    }
}

/// Failure to query the package manager.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// The package manager could not be started.
    #[error("Package manager '{program}' is unavailable: {message}")]
    Unavailable { program: String, message: String },

    /// The package manager ran but reported an error.
    #[error("Package manager '{program}' failed with exit code {code:?}: {stderr}")]
    Failed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The package manager's output could not be decoded.
    #[error("Could not read package list: {message}")]
    Malformed { message: String },
}

/// Source of the installed-package list for an environment.
///
/// Every call produces a fresh list; implementations must not cache
/// results across analysis passes.
pub trait Inventory: Send + Sync {
    /// List the installed packages.
    fn packages(&self) -> Result<Vec<InstalledPackage>, InventoryError>;
}

/// Inventory with a fixed answer.
#[derive(Debug, Clone)]
pub struct StaticInventory {
    result: Result<Vec<InstalledPackage>, InventoryError>,
}

impl StaticInventory {
    /// Inventory that always reports `packages`.
    pub fn new(packages: Vec<InstalledPackage>) -> Self {
        Self {
            result: Ok(packages),
        }
    }

    /// Inventory whose every query fails with `error`.
    pub fn failing(error: InventoryError) -> Self {
        Self { result: Err(error) }
    }
}

impl Inventory for StaticInventory {
    fn packages(&self) -> Result<Vec<InstalledPackage>, InventoryError> {
        self.result.clone()
    }
}
