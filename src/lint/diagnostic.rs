//! Diagnostic messages.
//!
//! This module provides the [`Diagnostic`] type for reporting unsatisfied
//! and undeclared requirements, each optionally carrying the fix that
//! would resolve it.

use super::context::UnitId;
use super::fix::FixDescriptor;
use super::rule::{RuleId, Severity};
use super::span::Span;

/// Where a diagnostic is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// The project unit as a whole.
    Unit(UnitId),
    /// A range in a source file.
    Span(Span),
}

/// A finding produced by the consistency checks.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The check that produced this diagnostic.
    pub rule_id: RuleId,
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// Unit the finding belongs to.
    pub unit: UnitId,
    /// Human-readable message.
    pub message: String,
    /// Attachment point.
    pub location: Location,
    /// Fix that resolves the finding.
    pub fix: Option<FixDescriptor>,
}

impl Diagnostic {
    /// Create a warning attached to a unit.
    pub fn new(rule_id: RuleId, unit: UnitId, message: impl Into<String>) -> Self {
        Self {
            rule_id,
            severity: Severity::Warning,
            message: message.into(),
            location: Location::Unit(unit.clone()),
            unit,
            fix: None,
        }
    }

    /// Attach to a source span instead of the unit.
    pub fn with_span(mut self, span: Span) -> Self {
        self.location = Location::Span(span);
        self
    }

    /// Add the fix for this diagnostic.
    pub fn with_fix(mut self, fix: FixDescriptor) -> Self {
        self.fix = Some(fix);
        self
    }

    /// The source span, if attached to one.
    pub fn span(&self) -> Option<&Span> {
        match &self.location {
            Location::Span(span) => Some(span),
            Location::Unit(_) => None,
        }
    }
}
