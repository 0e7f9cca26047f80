//! Requirement parsing and matching.
//!
//! This module turns declared requirement strings into structured
//! [`Requirement`]s and decides whether they are satisfied by the
//! installed-package inventory.
//!
//! # Modules
//!
//! - [`requirement`] - Requirement and constraint-clause parsing
//! - [`version`] - Segment-wise version ordering
//! - [`matcher`] - Satisfaction checks against installed packages
//!
//! # Example
//!
//! ```
//! use reqlint::inventory::InstalledPackage;
//! use reqlint::requirements::{matches, Requirement};
//!
//! let req = Requirement::parse("flask>=1.0,<2.0").unwrap();
//! assert!(matches(&req, &[InstalledPackage::new("Flask", "1.5")]));
//! assert!(!matches(&req, &[InstalledPackage::new("flask", "2.0.0")]));
//! ```

pub mod matcher;
pub mod requirement;
pub mod version;

pub use matcher::{matches, unsatisfied};
pub use requirement::{normalize_name, Operator, Requirement, RequirementError, VersionConstraint};
pub use version::Version;
