//! `setup(...)` call scanning.
//!
//! Finds the `setup(...)` call in a `setup.py`, the string elements of its
//! `install_requires=[...]` argument, and the byte offsets a fix needs to
//! append an element or synthesize the keyword argument.

use std::sync::LazyLock;

use regex::Regex;

/// Start of a `setup(` or `setuptools.setup(` call.
static SETUP_CALL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:^|[^\w.])(?:setuptools\.)?setup\s*\(")
        .expect("SETUP_CALL_REGEX must compile")
});

/// `install_requires=[` inside the call arguments.
static INSTALL_REQUIRES_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\binstall_requires\s*=\s*\[").expect("INSTALL_REQUIRES_REGEX must compile")
});

/// A single- or double-quoted string literal.
static STRING_LITERAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)'"#)
        .expect("STRING_LITERAL_REGEX must compile")
});

/// Insertion point for a new element or argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertionPoint {
    /// Byte offset just after the last existing item (or just after the
    /// opening bracket when there is none).
    pub offset: usize,
    /// Whether a separating comma must be written before the new item.
    pub needs_comma: bool,
    /// Whether there are existing items.
    pub has_items: bool,
}

impl InsertionPoint {
    /// Text to insert for `item` at this point.
    pub fn insertion(&self, item: &str) -> String {
        if self.needs_comma {
            format!(", {}", item)
        } else if self.has_items {
            format!(" {}", item)
        } else {
            item.to_string()
        }
    }
}

/// Locations inside a `setup(...)` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupCallSite {
    /// Where a new keyword argument goes.
    pub arguments: InsertionPoint,
    /// Where a new `install_requires` element goes, when the list exists.
    pub install_requires: Option<InsertionPoint>,
}

/// Result of scanning a `setup.py`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupScan {
    pub site: SetupCallSite,
    /// String elements of `install_requires`, in order.
    pub requirements: Vec<String>,
}

/// Scan `text` for the first `setup(...)` call.
pub fn scan_setup(text: &str) -> Option<SetupScan> {
    let call = SETUP_CALL_REGEX.find_iter(text).find(|m| {
        let name = m.start() + m.as_str().find("setup").unwrap_or(0);
        is_code(text.as_bytes(), name) && !is_definition(text, m.start())
    })?;
    let open = call.end() - 1;
    let close = find_closing(text, open)?;
    let args = &text[open + 1..close];

    let mut requirements = Vec::new();
    let mut install_requires = None;
    if let Some(kw) = INSTALL_REQUIRES_REGEX.find(args) {
        let list_open = open + 1 + kw.end() - 1;
        if let Some(list_close) = find_closing(text, list_open) {
            let body = &text[list_open + 1..list_close];
            requirements = STRING_LITERAL_REGEX
                .captures_iter(body)
                .filter_map(|c| c.get(1).or_else(|| c.get(2)))
                .map(|m| m.as_str().to_string())
                .collect();
            install_requires = Some(insertion_point(text, list_open, list_close));
        }
    }

    Some(SetupScan {
        site: SetupCallSite {
            arguments: insertion_point(text, open, close),
            install_requires,
        },
        requirements,
    })
}

/// Whether the match is `def setup(` rather than a call.
fn is_definition(text: &str, start: usize) -> bool {
    text[..start].trim_end().ends_with("def")
}

/// Whether byte `pos` lies outside comments and string literals.
fn is_code(bytes: &[u8], pos: usize) -> bool {
    let mut i = 0;
    while i < pos {
        match bytes[i] {
            b'#' => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            quote @ (b'"' | b'\'') => match skip_string(bytes, i, quote) {
                Some(end) => i = end,
                None => return false,
            },
            _ => i += 1,
        }
    }
    i == pos
}

fn insertion_point(text: &str, open: usize, close: usize) -> InsertionPoint {
    match last_significant(text.as_bytes(), open + 1, close) {
        Some(last) => InsertionPoint {
            offset: last + 1,
            needs_comma: text.as_bytes()[last] != b',',
            has_items: true,
        },
        None => InsertionPoint {
            offset: open + 1,
            needs_comma: false,
            has_items: false,
        },
    }
}

/// Index of the last byte in `from..to` that is neither whitespace nor
/// part of a comment.
fn last_significant(bytes: &[u8], from: usize, to: usize) -> Option<usize> {
    let mut last = None;
    let mut i = from;
    while i < to {
        match bytes[i] {
            b'#' => {
                while i < to && bytes[i] != b'\n' {
                    i += 1;
                }
                continue;
            }
            quote @ (b'"' | b'\'') => {
                let end = skip_string(bytes, i, quote)?.min(to);
                last = Some(end - 1);
                i = end;
                continue;
            }
            b if b.is_ascii_whitespace() => {}
            _ => last = Some(i),
        }
        i += 1;
    }
    last
}

/// Find the bracket closing the one at `open`, skipping nested brackets,
/// string literals and comments.
pub fn find_closing(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            b'#' => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                continue;
            }
            quote @ (b'"' | b'\'') => {
                i = skip_string(bytes, i, quote)?;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Skip a string literal starting at `start`; returns the index after it.
fn skip_string(bytes: &[u8], start: usize, quote: u8) -> Option<usize> {
    let triple =
        bytes.len() >= start + 3 && bytes[start + 1] == quote && bytes[start + 2] == quote;
    let mut i = if triple { start + 3 } else { start + 1 };
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => {
                if !triple {
                    return Some(i + 1);
                }
                if bytes.len() >= i + 3 && bytes[i + 1] == quote && bytes[i + 2] == quote {
                    return Some(i + 3);
                }
                i += 1;
            }
            _ => i += 1,
        }
    }
    None
}
