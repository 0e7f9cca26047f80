//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! dispatched via [`CommandDispatcher`], which loads the configuration
//! once and applies global overrides.

pub mod check;
pub mod dispatcher;
pub mod fix;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
