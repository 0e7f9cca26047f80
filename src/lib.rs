//! reqlint - Requirement consistency checks for Python projects.
//!
//! reqlint compares a project's declared requirements against the packages
//! installed in its environment and against the packages its sources
//! import, and offers fixes for both kinds of mismatch.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `.reqlint.yml` loading
//! - [`error`] - Error types and result aliases
//! - [`index`] - Standard-library names and import-name resolution
//! - [`installer`] - Installing requirements into an environment
//! - [`inventory`] - Installed-package listing
//! - [`lint`] - Consistency driver, diagnostics and fixes
//! - [`project`] - Project units and their on-disk inputs
//! - [`requirements`] - Requirement parsing and matching
//! - [`resolver`] - Import coverage checks
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use reqlint::inventory::InstalledPackage;
//! use reqlint::requirements::{unsatisfied, Requirement};
//!
//! let declared = vec![
//!     Requirement::parse("flask>=2.0").unwrap(),
//!     Requirement::parse("requests").unwrap(),
//! ];
//! let installed = vec![InstalledPackage::new("Flask", "1.1.4")];
//!
//! let missing = unsatisfied(&declared, &installed);
//! assert_eq!(missing.len(), 2);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod installer;
pub mod inventory;
pub mod lint;
pub mod project;
pub mod requirements;
pub mod resolver;
pub mod ui;

pub use error::{ReqlintError, Result};
