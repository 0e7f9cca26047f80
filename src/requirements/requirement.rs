//! Requirement declarations.
//!
//! A [`Requirement`] is parsed from one line of a requirements list or one
//! string element of a `setup(install_requires=[...])` call:
//!
//! ```text
//! name[extra1,extra2] op1 version1, op2 version2 ; marker  # comment
//! ```
//!
//! Parsing is lenient. A constraint clause with an unknown operator or an
//! empty version is dropped and the remaining clauses are kept; only an
//! empty or malformed name rejects the whole requirement.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::version::Version;

/// Leading distribution name, optional extras, and the constraint tail.
static REQUIREMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?)\s*(?:\[([^\]]*)\])?\s*(.*)$")
        .expect("REQUIREMENT_REGEX must compile")
});

/// Failure to parse a requirement as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequirementError {
    /// Nothing left after stripping comments and markers.
    #[error("Empty requirement")]
    Empty,

    /// The text does not start with a valid distribution name.
    #[error("Invalid requirement '{input}': expected a package name")]
    InvalidName { input: String },
}

/// Version comparison operator of a constraint clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `~=`
    Compatible,
}

impl Operator {
    /// Parse an operator token. Only the fixed operator set is accepted.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "==" => Some(Self::Eq),
            "!=" => Some(Self::Ne),
            ">=" => Some(Self::Ge),
            "<=" => Some(Self::Le),
            ">" => Some(Self::Gt),
            "<" => Some(Self::Lt),
            "~=" => Some(Self::Compatible),
            _ => None,
        }
    }

    /// The operator as written in a requirement.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Compatible => "~=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `operator version` clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VersionConstraint {
    pub operator: Operator,
    pub version: String,
}

impl VersionConstraint {
    /// Parse a single clause such as `>=1.0`. Returns `None` for an unknown
    /// operator or a missing version.
    pub fn parse(clause: &str) -> Option<Self> {
        let clause = clause.trim();
        let split = clause
            .find(|c: char| !matches!(c, '=' | '<' | '>' | '!' | '~'))
            .unwrap_or(clause.len());
        let (token, version) = clause.split_at(split);
        let operator = Operator::from_token(token)?;
        let version = version.trim();
        if version.is_empty() || version.contains(char::is_whitespace) {
            return None;
        }
        Some(Self {
            operator,
            version: version.to_string(),
        })
    }

    /// Evaluate the clause against an installed version.
    pub fn is_satisfied_by(&self, installed: &Version) -> bool {
        if let Some(prefix) = self.version.strip_suffix(".*") {
            let wanted = Version::parse(prefix);
            let same = installed.shares_prefix(&wanted, wanted.len());
            return match self.operator {
                Operator::Eq => same,
                Operator::Ne => !same,
                _ => installed >= &wanted,
            };
        }

        let wanted = Version::parse(&self.version);
        match self.operator {
            Operator::Eq => installed == &wanted,
            Operator::Ne => installed != &wanted,
            Operator::Ge => installed >= &wanted,
            Operator::Le => installed <= &wanted,
            Operator::Gt => installed > &wanted,
            Operator::Lt => installed < &wanted,
            Operator::Compatible => {
                if wanted.len() < 2 {
                    installed >= &wanted
                } else {
                    installed >= &wanted && installed.shares_prefix(&wanted, wanted.len() - 1)
                }
            }
        }
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.version)
    }
}

/// A declared dependency: a distribution name with optional extras and
/// version constraints. An empty constraint list means "any version".
#[derive(Debug, Clone)]
pub struct Requirement {
    name: String,
    extras: BTreeSet<String>,
    constraints: Vec<VersionConstraint>,
}

impl Requirement {
    /// Parse a requirement string.
    pub fn parse(input: &str) -> Result<Self, RequirementError> {
        let body = input.split('#').next().unwrap_or_default();
        let body = body.split(';').next().unwrap_or_default().trim();
        if body.is_empty() {
            return Err(RequirementError::Empty);
        }

        let caps = REQUIREMENT_REGEX
            .captures(body)
            .ok_or_else(|| RequirementError::InvalidName {
                input: input.trim().to_string(),
            })?;

        let name = caps[1].to_string();
        let extras = caps
            .get(2)
            .map(|m| {
                m.as_str()
                    .split(',')
                    .map(str::trim)
                    .filter(|e| !e.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let tail = caps.get(3).map_or("", |m| m.as_str()).trim();
        let tail = tail
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
            .unwrap_or(tail);

        let mut constraints = Vec::new();
        for clause in tail.split(',').map(str::trim).filter(|c| !c.is_empty()) {
            match VersionConstraint::parse(clause) {
                Some(constraint) => constraints.push(constraint),
                None => tracing::debug!("Dropping malformed clause '{}' of '{}'", clause, name),
            }
        }

        Ok(Self {
            name,
            extras,
            constraints,
        })
    }

    /// Distribution name as declared.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized name used for indexing and comparison.
    pub fn key(&self) -> String {
        normalize_name(&self.name)
    }

    /// Requested extras.
    pub fn extras(&self) -> &BTreeSet<String> {
        &self.extras
    }

    /// Version constraints in declaration order.
    pub fn constraints(&self) -> &[VersionConstraint] {
        &self.constraints
    }

    /// Whether an installed version satisfies every constraint.
    pub fn accepts(&self, installed: &Version) -> bool {
        self.constraints.iter().all(|c| c.is_satisfied_by(installed))
    }
}

impl PartialEq for Requirement {
    fn eq(&self, other: &Self) -> bool {
        let ours: BTreeSet<_> = self.constraints.iter().collect();
        let theirs: BTreeSet<_> = other.constraints.iter().collect();
        self.key() == other.key() && self.extras == other.extras && ours == theirs
    }
}

impl Eq for Requirement {}

impl FromStr for Requirement {
    type Err = RequirementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.extras.is_empty() {
            let extras: Vec<&str> = self.extras.iter().map(String::as_str).collect();
            write!(f, "[{}]", extras.join(","))?;
        }
        let clauses: Vec<String> = self.constraints.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", clauses.join(","))
    }
}

/// Normalize a distribution name: lowercase, with runs of `-`, `_` and
/// `.` collapsed to a single `-`.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_sep = false;
    for c in name.trim().chars() {
        if matches!(c, '-' | '_' | '.') {
            pending_sep = true;
            continue;
        }
        if pending_sep && !out.is_empty() {
            out.push('-');
        }
        pending_sep = false;
        out.push(c.to_ascii_lowercase());
    }
    out
}
