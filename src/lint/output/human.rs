//! Human-readable output formatter.
//!
//! Formats diagnostics for terminal display with optional color support.

use super::DiagnosticFormatter;
use crate::lint::{Diagnostic, Location, Severity};
use crate::ui::ReqlintTheme;
use console::Style;
use std::io::Write;

/// Formats diagnostics for human consumption.
pub struct HumanFormatter {
    /// Whether to use colors (ANSI escape codes).
    pub use_color: bool,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn severity_style(&self, severity: Severity) -> Style {
        ReqlintTheme::new()
            .severity(severity)
            .force_styling(self.use_color)
    }
}

impl DiagnosticFormatter for HumanFormatter {
    fn format<W: Write>(&self, diagnostics: &[Diagnostic], writer: &mut W) -> std::io::Result<()> {
        for diag in diagnostics {
            // Header line: warning[rule-id]: message
            let prefix = format!("{}[{}]", diag.severity, diag.rule_id);
            writeln!(
                writer,
                "{}: {}",
                self.severity_style(diag.severity).apply_to(prefix),
                diag.message
            )?;

            match &diag.location {
                Location::Span(span) => writeln!(writer, "  --> {}", span)?,
                Location::Unit(unit) => writeln!(writer, "  --> {}", unit)?,
            }

            if let Some(fix) = &diag.fix {
                writeln!(writer, "   = help: {}", fix.name())?;
            }

            writeln!(writer)?;
        }

        if !diagnostics.is_empty() {
            writeln!(writer, "Found {} warning(s)", diagnostics.len())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::{FixDescriptor, RuleId, Span, TargetArtifact, UnitId};

    fn render(diagnostics: &[Diagnostic]) -> String {
        let mut output = Vec::new();
        HumanFormatter::new(false)
            .format(diagnostics, &mut output)
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn formats_span_diagnostic() {
        let diagnostics = vec![Diagnostic::new(
            RuleId::undeclared_package(),
            UnitId::new("app"),
            "Package 'requests' is not listed in project requirements",
        )
        .with_span(Span::at("app.py", 10, 8, 8))];

        let output = render(&diagnostics);
        assert!(output.contains("warning[undeclared-package]"));
        assert!(output.contains("Package 'requests' is not listed"));
        assert!(output.contains("--> app.py:10:8"));
    }

    #[test]
    fn formats_unit_location() {
        let diagnostics = vec![Diagnostic::new(
            RuleId::unsatisfied_requirement(),
            UnitId::new("my-project"),
            "Package requirement 'flask' is not satisfied",
        )];
        assert!(render(&diagnostics).contains("--> my-project"));
    }

    #[test]
    fn formats_fix_name_as_help() {
        let diagnostics = vec![Diagnostic::new(
            RuleId::undeclared_package(),
            UnitId::new("app"),
            "msg",
        )
        .with_fix(FixDescriptor::add_requirement("yaml", TargetArtifact::None))];

        assert!(render(&diagnostics)
            .contains("= help: Add requirement 'yaml' to project requirements"));
    }

    #[test]
    fn formats_summary_line() {
        let diagnostics = vec![
            Diagnostic::new(RuleId::new("r1"), UnitId::new("a"), "warn"),
            Diagnostic::new(RuleId::new("r2"), UnitId::new("a"), "warn2"),
        ];

        let output = render(&diagnostics);
        assert!(output.contains("Found 2 warning(s)"));
        assert!(!output.contains("error"));
    }

    #[test]
    fn no_color_output_is_plain() {
        let diagnostics = vec![Diagnostic::new(RuleId::new("r"), UnitId::new("a"), "m")];
        assert!(!render(&diagnostics).contains('\u{1b}'));
    }

    #[test]
    fn no_summary_when_no_issues() {
        assert!(!render(&[]).contains("Found"));
    }
}
