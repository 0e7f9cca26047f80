//! Import resolution.
//!
//! Decides whether the package named by an import statement is covered by
//! the standard library, the project itself, or a declared requirement.

use std::collections::HashSet;

use crate::index::{import_form, NameIndex, QualifiedName, Resolution};
use crate::lint::Span;
use crate::requirements::Requirement;

/// One imported name as delivered by the parsing layer.
///
/// `chain` holds the qualifier names of the reference with the package
/// reference first: `import foo.bar as b` and `from foo.bar import baz`
/// both arrive as `["foo", "bar"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReference {
    pub chain: Vec<String>,
    pub span: Option<Span>,
}

impl ImportReference {
    /// Build a reference from a dotted module path.
    pub fn from_dotted(dotted: &str) -> Self {
        Self {
            chain: dotted.split('.').map(str::to_string).collect(),
            span: None,
        }
    }

    /// Attach the source location of the reference.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// The root package name, if one can be determined.
    pub fn root(&self) -> Option<&str> {
        root_of(&self.chain)
    }
}

/// The package a qualifier chain starts from: the first element's name.
/// Returns `None` for an empty chain or a blank first element.
pub fn root_of<S: AsRef<str>>(chain: &[S]) -> Option<&str> {
    let first = chain.first()?.as_ref().trim();
    if first.is_empty() {
        None
    } else {
        Some(first)
    }
}

/// Outcome of checking one import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportCheck {
    /// The root could not be determined; nothing to report.
    Skipped,
    /// The import is covered.
    Covered,
    /// The root package is not declared anywhere.
    Undeclared { package: String },
}

/// Checks imports against the name index and the declared requirements.
pub struct ImportResolver<'i, 'a> {
    index: &'i NameIndex<'a>,
    declared: Vec<(QualifiedName, String)>,
    ignored: &'i HashSet<String>,
}

impl<'i, 'a> ImportResolver<'i, 'a> {
    /// Create a resolver for one pass.
    pub fn new(
        index: &'i NameIndex<'a>,
        requirements: &[Requirement],
        ignored: &'i HashSet<String>,
    ) -> Self {
        let declared = requirements
            .iter()
            .map(|r| (QualifiedName::from_dotted(&import_form(r.name())), r.key()))
            .collect();
        Self {
            index,
            declared,
            ignored,
        }
    }

    /// Check a single import reference.
    pub fn check(&self, reference: &ImportReference) -> ImportCheck {
        let Some(root) = reference.root() else {
            return ImportCheck::Skipped;
        };

        if self.ignored.contains(root) {
            return ImportCheck::Covered;
        }

        match self.index.resolve(root) {
            Resolution::Stdlib | Resolution::Local => return ImportCheck::Covered,
            Resolution::ProvidedBy(_) | Resolution::Unknown => {}
        }

        let imported = QualifiedName::from_dotted(root);
        if self.declared.iter().any(|(name, _)| name.covers(&imported)) {
            return ImportCheck::Covered;
        }

        let providers = self.index.providers_of(root);
        if self
            .declared
            .iter()
            .any(|(_, key)| providers.contains(&key.as_str()))
        {
            return ImportCheck::Covered;
        }

        ImportCheck::Undeclared {
            package: root.to_string(),
        }
    }
}
