//! Package installation.
//!
//! The installer is the collaborator an `InstallRequirements` fix hands
//! its requirement list to. It owns its own timeouts and retries; the
//! caller only learns success or failure.

use std::process::{Command, Stdio};

use thiserror::Error;

use crate::requirements::Requirement;

/// Failure to install requirements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstallError {
    /// The installer could not be started.
    #[error("Installer '{program}' is unavailable: {message}")]
    Unavailable { program: String, message: String },

    /// The installer ran but reported an error.
    #[error("Installing {requirements} failed with exit code {code:?}: {stderr}")]
    Failed {
        requirements: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The install worker stopped before reporting a result.
    #[error("Install was interrupted: {message}")]
    Interrupted { message: String },
}

/// Installs requirements into an environment.
pub trait Installer: Send + Sync {
    fn install(&self, requirements: &[Requirement]) -> Result<(), InstallError>;
}

/// Installs with `python -m pip install`.
#[derive(Debug, Clone)]
pub struct PipInstaller {
    python: String,
}

impl PipInstaller {
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }

    /// Arguments passed to the interpreter for `requirements`.
    pub fn arguments(requirements: &[Requirement]) -> Vec<String> {
        let mut args = vec!["-m".to_string(), "pip".to_string(), "install".to_string()];
        args.extend(requirements.iter().map(ToString::to_string));
        args
    }
}

impl Installer for PipInstaller {
    fn install(&self, requirements: &[Requirement]) -> Result<(), InstallError> {
        if requirements.is_empty() {
            return Ok(());
        }

        let args = Self::arguments(requirements);
        tracing::info!("Running {} {}", self.python, args.join(" "));

        let output = Command::new(&self.python)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| InstallError::Unavailable {
                program: self.python.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(InstallError::Failed {
                requirements: args[3..].join(" "),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}
