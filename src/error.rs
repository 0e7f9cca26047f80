//! Error types for reqlint operations.
//!
//! This module defines [`ReqlintError`], the primary error type used by the
//! CLI and the collaborator adapters, and a [`Result`] type alias for
//! convenience.
//!
//! # Error Handling Strategy
//!
//! - Concern-specific errors ([`RequirementError`], [`InventoryError`],
//!   [`InstallError`]) live next to the code that raises them
//! - The consistency driver never propagates them: they become
//!   "skip" or "indeterminate" at the analysis boundary
//! - Use `anyhow::Error` (via `ReqlintError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

pub use crate::installer::InstallError;
pub use crate::inventory::InventoryError;
pub use crate::requirements::RequirementError;

/// Core error type for reqlint operations.
#[derive(Debug, Error)]
pub enum ReqlintError {
    /// Failed to parse the configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The project root does not exist or is not a directory.
    #[error("Project not found: {path}")]
    ProjectNotFound { path: PathBuf },

    /// A declared requirement could not be parsed.
    #[error(transparent)]
    Requirement(#[from] RequirementError),

    /// The package manager could not list installed packages.
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// The installer failed.
    #[error(transparent)]
    Install(#[from] InstallError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for reqlint operations.
pub type Result<T> = std::result::Result<T, ReqlintError>;
