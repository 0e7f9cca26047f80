//! Colors for status lines and diagnostic severities.

use console::Style;

use crate::lint::Severity;

/// reqlint's visual theme.
#[derive(Debug, Clone)]
pub struct ReqlintTheme {
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub hint: Style,
}

impl Default for ReqlintTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqlintTheme {
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            hint: Style::new().cyan().dim(),
        }
    }

    /// Every style unstyled.
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            hint: Style::new(),
        }
    }

    /// Style of a diagnostic header at `severity`.
    pub fn severity(&self, severity: Severity) -> Style {
        match severity {
            Severity::Warning => self.warning.clone().bold(),
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        self.success.apply_to(format!("✓ {}", msg)).to_string()
    }

    pub fn format_warning(&self, msg: &str) -> String {
        self.warning.apply_to(format!("warning: {}", msg)).to_string()
    }

    pub fn format_error(&self, msg: &str) -> String {
        self.error.apply_to(format!("error: {}", msg)).to_string()
    }

    pub fn format_hint(&self, msg: &str) -> String {
        self.hint.apply_to(format!("hint: {}", msg)).to_string()
    }
}

/// Whether stdout output should be colored.
///
/// False under `NO_COLOR`, `--no-color`, `CLICOLOR=0`, or when stdout is
/// not a terminal.
pub fn should_use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::colors_enabled()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_messages_carry_a_prefix() {
        let theme = ReqlintTheme::plain();
        assert_eq!(theme.format_success("Done"), "✓ Done");
        assert_eq!(theme.format_warning("careful"), "warning: careful");
        assert_eq!(theme.format_error("broken"), "error: broken");
        assert_eq!(theme.format_hint("try this"), "hint: try this");
    }

    #[test]
    fn forced_severity_style_emits_escapes() {
        let theme = ReqlintTheme::new();
        let styled = theme
            .severity(Severity::Warning)
            .force_styling(true)
            .apply_to("warning")
            .to_string();
        assert!(styled.contains('\u{1b}'));
    }
}
