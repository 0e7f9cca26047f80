//! Diagnostic output formatters.
//!
//! This module provides formatters for outputting diagnostics in
//! different formats (human-readable, JSON).

pub mod human;
pub mod json;

use crate::lint::Diagnostic;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Output format for check results.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Trait for formatting diagnostics.
pub trait DiagnosticFormatter {
    /// Format diagnostics to the given writer.
    fn format<W: Write>(&self, diagnostics: &[Diagnostic], writer: &mut W) -> std::io::Result<()>;
}

pub use human::HumanFormatter;
pub use json::JsonFormatter;
