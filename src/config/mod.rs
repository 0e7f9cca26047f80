//! Configuration loading and parsing for reqlint.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use reqlint::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".reqlint.yml"), "ignore: [vendored]").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.ignore, vec!["vendored".to_string()]);
//! assert_eq!(config.python, "python3");
//! ```

pub mod loader;
pub mod schema;

pub use loader::{config_path, load_config, load_config_file, parse_config, CONFIG_FILE_NAME};
pub use schema::ReqlintConfig;
