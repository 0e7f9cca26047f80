//! Command-line interface for reqlint.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, Commands, FixArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
