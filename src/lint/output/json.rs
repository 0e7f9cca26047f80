//! JSON output formatter.
//!
//! Formats diagnostics as machine-readable JSON for tooling integration.

use super::DiagnosticFormatter;
use crate::lint::{Diagnostic, Span};
use serde::Serialize;
use std::io::Write;

/// Formats diagnostics as JSON.
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput {
    diagnostics: Vec<JsonDiagnostic>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonDiagnostic {
    rule_id: String,
    severity: String,
    message: String,
    unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_column: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fix: Option<String>,
}

#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    warnings: usize,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticFormatter for JsonFormatter {
    fn format<W: Write>(&self, diagnostics: &[Diagnostic], writer: &mut W) -> std::io::Result<()> {
        let json_diagnostics: Vec<_> = diagnostics
            .iter()
            .map(|d| {
                let span = d.span();
                JsonDiagnostic {
                    rule_id: d.rule_id.0.clone(),
                    severity: d.severity.to_string(),
                    message: d.message.clone(),
                    unit: d.unit.to_string(),
                    file: span.map(|s| s.file.display().to_string()),
                    line: span.map(|s| s.line),
                    column: span.map(|s| s.column),
                    end_column: span.map(Span::end_column),
                    fix: d.fix.as_ref().map(|f| f.name()),
                }
            })
            .collect();

        let summary = JsonSummary {
            total: diagnostics.len(),
            warnings: diagnostics.len(),
        };

        let output = JsonOutput {
            diagnostics: json_diagnostics,
            summary,
        };

        serde_json::to_writer_pretty(writer, &output).map_err(std::io::Error::other)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::{FixDescriptor, RuleId, UnitId};
    use crate::requirements::Requirement;

    fn render(diagnostics: &[Diagnostic]) -> serde_json::Value {
        let mut output = Vec::new();
        JsonFormatter::new().format(diagnostics, &mut output).unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn produces_valid_json() {
        let parsed = render(&[Diagnostic::new(
            RuleId::undeclared_package(),
            UnitId::new("app"),
            "Package 'requests' is not listed in project requirements",
        )]);
        assert!(parsed["diagnostics"].is_array());
        assert_eq!(parsed["summary"]["total"].as_u64().unwrap(), 1);
        assert_eq!(parsed["diagnostics"][0]["rule_id"], "undeclared-package");
        assert_eq!(parsed["diagnostics"][0]["severity"], "warning");
    }

    #[test]
    fn includes_location_when_present() {
        let parsed = render(&[Diagnostic::new(RuleId::new("r"), UnitId::new("app"), "msg")
            .with_span(Span::at("app.py", 10, 5, 8))]);
        assert_eq!(parsed["diagnostics"][0]["file"], "app.py");
        assert_eq!(parsed["diagnostics"][0]["line"], 10);
        assert_eq!(parsed["diagnostics"][0]["column"], 5);
        assert_eq!(parsed["diagnostics"][0]["end_column"], 13);
        assert_eq!(parsed["diagnostics"][0]["unit"], "app");
    }

    #[test]
    fn unit_diagnostics_name_the_unit() {
        let unit = UnitId::new("app");
        let parsed = render(&[Diagnostic::new(
            RuleId::unsatisfied_requirement(),
            unit.clone(),
            "msg",
        )
        .with_fix(FixDescriptor::install_requirements(
            unit,
            vec![Requirement::parse("flask").unwrap()],
        ))]);
        assert_eq!(parsed["diagnostics"][0]["unit"], "app");
        assert_eq!(parsed["diagnostics"][0]["fix"], "Install requirements");
        assert!(parsed["diagnostics"][0]["line"].is_null());
    }

    #[test]
    fn empty_output_has_zero_summary() {
        let parsed = render(&[]);
        assert_eq!(parsed["summary"]["total"], 0);
        assert_eq!(parsed["summary"]["warnings"], 0);
        assert!(parsed["summary"].get("errors").is_none());
        assert!(parsed["summary"].get("hints").is_none());
    }
}
