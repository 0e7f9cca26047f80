//! Dotted qualified names and component-wise prefix matching.

use std::fmt;

/// A dotted name such as `foo.bar.baz`, held as its components.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    components: Vec<String>,
}

impl QualifiedName {
    /// Split a dotted string. Empty components are discarded.
    pub fn from_dotted(dotted: &str) -> Self {
        Self::from_components(dotted.split('.'))
    }

    /// Build from individual components. Empty components are discarded.
    pub fn from_components<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            components: components
                .into_iter()
                .map(|c| c.as_ref().trim().to_string())
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }

    /// The components in order, root first.
    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// The root component.
    pub fn root(&self) -> Option<&str> {
        self.components.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Whether `prefix` is a component-wise prefix of `self` (or equal to
    /// it). Components compare ASCII case-insensitively; an empty prefix
    /// matches nothing.
    pub fn matches_prefix(&self, prefix: &QualifiedName) -> bool {
        !prefix.is_empty()
            && prefix.components.len() <= self.components.len()
            && prefix
                .components
                .iter()
                .zip(&self.components)
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }

    /// Whether a provided name covers an imported name: one is a dotted
    /// prefix of the other. `foo.bar` covers `foo.bar.baz` and `foo`, but
    /// `foobar` never covers `foo`.
    pub fn covers(&self, imported: &QualifiedName) -> bool {
        imported.matches_prefix(self) || self.matches_prefix(imported)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.components.join("."))
    }
}
