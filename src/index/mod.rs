//! Standard-library and distribution index.
//!
//! # Modules
//!
//! - [`stdlib`] - Static set of standard-library top-level names
//! - [`qualified`] - Dotted names with component-wise prefix matching
//! - [`name_index`] - Per-pass index from import roots to their providers

pub mod name_index;
pub mod qualified;
pub mod stdlib;

pub use name_index::{import_form, NameIndex, Resolution};
pub use qualified::QualifiedName;
pub use stdlib::StdlibNames;
