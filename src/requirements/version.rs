//! Version ordering for installed packages.
//!
//! A version splits into a numeric release (`1.4.2`) and a tail of tagged
//! phases (`rc1`, `.post2`, `.dev0`). Releases compare segment by segment
//! with missing trailing segments counted as `0`, so `2.0 == 2.0.0`.
//! Release numbers compare by magnitude without a width limit.
//!
//! On equal releases the tail decides: development and pre-release tags
//! (`dev`, `a`, `b`, `c`, `rc`, `alpha`, `beta`, `pre`, `preview`) sort
//! before the bare release, while `post`, `rev`, `r` and any other text
//! sort after it. A local label (`+cu118`) is ignored.

use std::cmp::Ordering;
use std::fmt;

/// An unbounded non-negative integer kept as its decimal digits.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Numeral(String);

impl Numeral {
    fn new(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            Self::zero()
        } else {
            Self(trimmed.to_string())
        }
    }

    fn zero() -> Self {
        Self("0".to_string())
    }
}

impl Ord for Numeral {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Numeral {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One tagged part of the version tail. Variant order is sort order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Phase {
    Dev(Numeral),
    Pre(u8, Numeral),
    Release,
    Post(Numeral),
    Other(String, Numeral),
}

impl Phase {
    fn tagged(word: &str, number: Numeral) -> Self {
        match word {
            "dev" => Phase::Dev(number),
            "a" | "alpha" => Phase::Pre(0, number),
            "b" | "beta" => Phase::Pre(1, number),
            "c" | "rc" | "pre" | "preview" => Phase::Pre(2, number),
            "post" | "rev" | "r" => Phase::Post(number),
            _ => Phase::Other(word.to_string(), number),
        }
    }
}

/// Split a tail such as `rc1.post2` into phases, terminated by `Release`.
fn parse_tail(tail: &str) -> Vec<Phase> {
    let lower = tail.to_ascii_lowercase();
    let mut phases = Vec::new();
    let mut rest = lower.as_str();

    while !rest.is_empty() {
        rest = rest.trim_start_matches(|c: char| !c.is_ascii_alphanumeric());
        let word_len = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        let (word, after) = rest.split_at(word_len);
        let after = after.trim_start_matches(['.', '-', '_']);
        let digit_len = after
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(after.len());
        let (digits, after) = after.split_at(digit_len);

        if word.is_empty() && digits.is_empty() {
            rest = after;
            continue;
        }
        let number = Numeral::new(digits);
        phases.push(if word.is_empty() {
            Phase::Post(number)
        } else {
            Phase::tagged(word, number)
        });
        rest = after;
    }

    phases.push(Phase::Release);
    phases
}

/// A parsed version string.
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    release: Vec<Numeral>,
    tail: Vec<Phase>,
}

impl Version {
    /// Parse a version string. Never fails; text that is not a release
    /// number becomes part of the tail.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let body = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);
        let body = body.split_once('+').map_or(body, |(public, _)| public);

        let mut release = Vec::new();
        let mut rest = body;
        loop {
            let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
            if digits == 0 {
                break;
            }
            release.push(Numeral::new(&rest[..digits]));
            rest = &rest[digits..];
            match rest.strip_prefix('.') {
                Some(next) if next.starts_with(|c: char| c.is_ascii_digit()) => rest = next,
                _ => break,
            }
        }

        Self {
            raw: trimmed.to_string(),
            release,
            tail: parse_tail(rest),
        }
    }

    /// The original text.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Number of explicit release segments.
    pub fn len(&self) -> usize {
        self.release.len()
    }

    /// Whether the version had no release segments at all.
    pub fn is_empty(&self) -> bool {
        self.release.is_empty()
    }

    /// Whether the first `count` release segments of `self` and `other`
    /// are equal.
    pub fn shares_prefix(&self, other: &Version, count: usize) -> bool {
        (0..count).all(|i| self.segment(i) == other.segment(i))
    }

    fn segment(&self, index: usize) -> Numeral {
        self.release
            .get(index)
            .cloned()
            .unwrap_or_else(Numeral::zero)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.release.len().max(other.release.len());
        for i in 0..len {
            match self.segment(i).cmp(&other.segment(i)) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        self.tail.cmp(&other.tail)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
