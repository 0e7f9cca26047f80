//! Top-level name index for one analysis pass.
//!
//! Maps an import root to the standard library, a first-party package, or
//! the distributions that provide it. The index is built fresh for every
//! visit and never shared, so no invalidation is ever needed.

use crate::inventory::InstalledPackage;
use crate::requirements::Requirement;

use super::qualified::QualifiedName;
use super::stdlib::StdlibNames;

/// How an import root is classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Part of the standard library.
    Stdlib,
    /// One of the project's own packages.
    Local,
    /// Provided by the named (normalized) distribution.
    ProvidedBy(String),
    /// Nothing known provides it.
    Unknown,
}

/// A provided importable name and the distribution behind it.
#[derive(Debug, Clone)]
struct Provider {
    name: QualifiedName,
    distribution: String,
}

/// Name index for a single analysis pass.
#[derive(Debug, Clone)]
pub struct NameIndex<'a> {
    stdlib: &'a StdlibNames,
    local: Vec<QualifiedName>,
    providers: Vec<Provider>,
}

impl<'a> NameIndex<'a> {
    /// Create an index seeded only with the standard library.
    pub fn new(stdlib: &'a StdlibNames) -> Self {
        Self {
            stdlib,
            local: Vec::new(),
            providers: Vec::new(),
        }
    }

    /// Build the index for one pass from its three sources.
    ///
    /// `installed` is `None` when the inventory was unavailable; the index
    /// then knows only declared names.
    pub fn build<S: AsRef<str>>(
        stdlib: &'a StdlibNames,
        local_packages: &[S],
        requirements: &[Requirement],
        installed: Option<&[InstalledPackage]>,
    ) -> Self {
        let mut index = Self::new(stdlib);
        for name in local_packages {
            index.add_local(name.as_ref());
        }
        for req in requirements {
            index.add_provider(&import_form(req.name()), &req.key());
        }
        for pkg in installed.unwrap_or_default() {
            let distribution = crate::requirements::normalize_name(&pkg.name);
            index.add_provider(&import_form(&pkg.name), &distribution);
            for top in &pkg.top_level {
                index.add_provider(top, &distribution);
            }
        }
        tracing::debug!(
            "Built name index: {} local, {} provided names",
            index.local.len(),
            index.providers.len()
        );
        index
    }

    /// Record a first-party package name.
    pub fn add_local(&mut self, dotted: &str) {
        let name = QualifiedName::from_dotted(dotted);
        if !name.is_empty() {
            self.local.push(name);
        }
    }

    /// Record that `distribution` provides the importable name `dotted`.
    pub fn add_provider(&mut self, dotted: &str, distribution: &str) {
        let name = QualifiedName::from_dotted(dotted);
        if !name.is_empty() {
            self.providers.push(Provider {
                name,
                distribution: distribution.to_string(),
            });
        }
    }

    /// Classify an import root.
    pub fn resolve(&self, root: &str) -> Resolution {
        if self.stdlib.contains(root) {
            return Resolution::Stdlib;
        }
        let imported = QualifiedName::from_dotted(root);
        if self.local.iter().any(|l| l.covers(&imported)) {
            return Resolution::Local;
        }
        match self.providers_of(root).into_iter().next() {
            Some(distribution) => Resolution::ProvidedBy(distribution.to_string()),
            None => Resolution::Unknown,
        }
    }

    /// Every distinct distribution providing `root`, in insertion order
    /// (declared requirements first, then installed packages).
    pub fn providers_of(&self, root: &str) -> Vec<&str> {
        let imported = QualifiedName::from_dotted(root);
        let mut found: Vec<&str> = Vec::new();
        for provider in &self.providers {
            if provider.name.covers(&imported) && !found.contains(&provider.distribution.as_str())
            {
                found.push(&provider.distribution);
            }
        }
        found
    }
}

/// The importable spelling of a distribution name (`python-dateutil` ->
/// `python_dateutil`). Dots are kept so namespace distributions such as
/// `zope.interface` stay dotted.
pub fn import_form(distribution: &str) -> String {
    distribution.trim().replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(s: &str) -> Requirement {
        Requirement::parse(s).unwrap()
    }

    fn stdlib() -> StdlibNames {
        StdlibNames::from_names(["os", "sys"])
    }

    #[test]
    fn stdlib_wins() {
        let stdlib = stdlib();
        let index = NameIndex::build::<&str>(&stdlib, &[], &[req("os")], None);
        assert_eq!(index.resolve("os"), Resolution::Stdlib);
    }

    #[test]
    fn declared_requirement_provides_its_name() {
        let stdlib = stdlib();
        let index = NameIndex::build::<&str>(&stdlib, &[], &[req("Flask>=1.0")], None);
        assert_eq!(index.resolve("flask"), Resolution::ProvidedBy("flask".into()));
        assert_eq!(index.resolve("django"), Resolution::Unknown);
    }

    #[test]
    fn installed_top_level_maps_to_distribution() {
        let stdlib = stdlib();
        let installed = vec![InstalledPackage::new("PyYAML", "6.0").with_top_level(["yaml"])];
        let index = NameIndex::build::<&str>(&stdlib, &[], &[], Some(&installed));
        assert_eq!(index.resolve("yaml"), Resolution::ProvidedBy("pyyaml".into()));
    }

    #[test]
    fn dashed_distribution_gets_underscore_import_name() {
        let stdlib = stdlib();
        let index = NameIndex::build::<&str>(&stdlib, &[], &[req("my-lib")], None);
        assert_eq!(index.resolve("my_lib"), Resolution::ProvidedBy("my-lib".into()));
    }

    #[test]
    fn local_packages_use_prefix_rule() {
        let stdlib = stdlib();
        let index = NameIndex::build(&stdlib, &["acme.core"], &[], None);
        assert_eq!(index.resolve("acme"), Resolution::Local);
        assert_eq!(index.resolve("acmecorp"), Resolution::Unknown);
    }

    #[test]
    fn namespace_distribution_covers_root() {
        let stdlib = stdlib();
        let index = NameIndex::build::<&str>(&stdlib, &[], &[req("zope.interface")], None);
        assert_eq!(
            index.resolve("zope"),
            Resolution::ProvidedBy("zope-interface".into())
        );
    }

    #[test]
    fn providers_are_distinct_and_ordered() {
        let stdlib = stdlib();
        let installed = vec![
            InstalledPackage::new("attrs", "23.1").with_top_level(["attr", "attrs"]),
            InstalledPackage::new("attr-shim", "0.1").with_top_level(["attr"]),
        ];
        let index = NameIndex::build::<&str>(&stdlib, &[], &[req("attrs")], Some(&installed));
        assert_eq!(index.providers_of("attr"), vec!["attrs", "attr-shim"]);
    }

    #[test]
    fn missing_inventory_still_resolves_declared_names() {
        let stdlib = stdlib();
        let index = NameIndex::build::<&str>(&stdlib, &[], &[req("numpy")], None);
        assert_eq!(index.resolve("numpy"), Resolution::ProvidedBy("numpy".into()));
    }
}
