//! Rule identifiers and severities.
//!
//! - [`RuleId`] - Identifier of the check that produced a diagnostic
//! - [`Severity`] - Severity of a diagnostic; every check reports warnings

/// Unique identifier for a check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleId(pub String);

impl RuleId {
    /// Create a new rule ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A declared requirement is not satisfied by the environment.
    pub fn unsatisfied_requirement() -> Self {
        Self::new("unsatisfied-requirement")
    }

    /// An imported package is not declared in the project requirements.
    pub fn undeclared_package() -> Self {
        Self::new("undeclared-package")
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Severity {
    /// Inconsistency that should be addressed.
    #[default]
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
        }
    }
}
