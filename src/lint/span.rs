//! Source locations of import statements.

use std::fmt;
use std::path::PathBuf;

/// A run of `len` bytes on one line of a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub file: PathBuf,
    /// 1-based.
    pub line: usize,
    /// 1-based.
    pub column: usize,
    pub len: usize,
}

impl Span {
    pub fn at(file: impl Into<PathBuf>, line: usize, column: usize, len: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            len,
        }
    }

    /// Column just past the span.
    pub fn end_column(&self) -> usize {
        self.column + self.len
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}
