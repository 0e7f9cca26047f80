//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::lint::OutputFormat;

/// reqlint - Check that a Python project's requirements match its
/// environment and its imports.
#[derive(Debug, Parser)]
#[command(name = "reqlint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .reqlint.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Python interpreter used to list and install packages
    #[arg(long, global = true, env = "REQLINT_PYTHON")]
    pub python: Option<String>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check requirements against the environment and the imports (default)
    Check(CheckArgs),

    /// Install unsatisfied requirements and declare undeclared packages
    Fix(FixArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Project directories to check, one unit each (default: the project root)
    pub paths: Vec<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `fix` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct FixArgs {
    /// Install unsatisfied requirements
    #[arg(long)]
    pub install: bool,

    /// Add undeclared packages to the requirements artifact
    #[arg(long)]
    pub add: bool,

    /// Show what would change without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl FixArgs {
    /// Whether installs run. With neither flag given, both kinds run.
    pub fn wants_install(&self) -> bool {
        self.install || !self.add
    }

    /// Whether additions run.
    pub fn wants_add(&self) -> bool {
        self.add || !self.install
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["reqlint"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_check_with_paths_and_format() {
        let cli =
            Cli::try_parse_from(["reqlint", "check", "svc-a", "svc-b", "--format", "json"])
                .unwrap();
        match cli.command {
            Some(Commands::Check(args)) => {
                assert_eq!(args.paths.len(), 2);
                assert_eq!(args.format, Some(OutputFormat::Json));
                assert!(!args.strict);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["reqlint", "fix", "--python", "/venv/bin/python", "--debug"])
            .unwrap();
        assert_eq!(cli.python.as_deref(), Some("/venv/bin/python"));
        assert!(cli.debug);
    }

    #[test]
    fn fix_defaults_to_both_kinds() {
        let args = FixArgs::default();
        assert!(args.wants_install());
        assert!(args.wants_add());

        let only_add = FixArgs {
            add: true,
            ..FixArgs::default()
        };
        assert!(!only_add.wants_install());
        assert!(only_add.wants_add());
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Cli::try_parse_from(["reqlint", "check", "--format", "sarif"]).is_err());
    }
}
