//! Output verbosity.

/// How much the CLI prints besides the diagnostics themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Per-unit details, status lines and hints.
    Verbose,
    /// Status lines and hints.
    #[default]
    Normal,
    /// Diagnostics, warnings and errors only.
    Quiet,
}

impl OutputMode {
    /// Per-unit inventory and import counts.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Success and progress lines.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Suggestions such as "run reqlint fix".
    pub fn shows_hints(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}
