//! Requirement matching against the installed-package inventory.

use crate::inventory::InstalledPackage;

use super::requirement::{normalize_name, Requirement};
use super::version::Version;

/// Whether `requirement` is satisfied by one of the installed packages.
///
/// A package satisfies the requirement when its normalized name equals the
/// requirement's and its version passes every constraint clause. A
/// requirement without constraints is satisfied by presence alone.
pub fn matches(requirement: &Requirement, installed: &[InstalledPackage]) -> bool {
    let key = requirement.key();
    installed
        .iter()
        .filter(|pkg| normalize_name(&pkg.name) == key)
        .any(|pkg| requirement.accepts(&Version::parse(&pkg.version)))
}

/// The declared requirements not satisfied by `installed`, in declaration order.
pub fn unsatisfied(requirements: &[Requirement], installed: &[InstalledPackage]) -> Vec<Requirement> {
    requirements
        .iter()
        .filter(|req| !matches(req, installed))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg(name: &str, version: &str) -> InstalledPackage {
        InstalledPackage::new(name, version)
    }

    fn req(s: &str) -> Requirement {
        Requirement::parse(s).unwrap()
    }

    #[test]
    fn unconstrained_requirement_matches_by_presence() {
        let installed = vec![pkg("Requests", "2.31.0")];
        assert!(matches(&req("requests"), &installed));
        assert!(matches(&req("REQUESTS"), &installed));
        assert!(!matches(&req("flask"), &installed));
        assert!(!matches(&req("requests"), &[]));
    }

    #[test]
    fn range_constraints_evaluate_against_version() {
        let r = req("flask>=1.0,<2.0");
        assert!(!matches(&r, &[pkg("flask", "2.0.0")]));
        assert!(!matches(&r, &[pkg("flask", "0.9")]));
        assert!(matches(&r, &[pkg("flask", "1.5")]));
    }

    #[test]
    fn local_build_label_satisfies_base_release() {
        let installed = vec![pkg("torch", "2.1.0+cu118")];
        assert!(matches(&req("torch>=2.1.0"), &installed));
        assert!(matches(&req("torch==2.1.0"), &installed));
        assert!(!matches(&req("torch>2.1.0"), &installed));
    }

    #[test]
    fn post_release_satisfies_lower_bound() {
        let installed = vec![pkg("pkg", "1.0.post1")];
        assert!(matches(&req("pkg>=1.0"), &installed));
        assert!(matches(&req("pkg>1.0"), &installed));
        assert!(!matches(&req("pkg<1.0"), &installed));
        assert!(!matches(&req("pkg>=1.0.1"), &installed));
    }

    #[test]
    fn separator_variants_match() {
        let installed = vec![pkg("typing-extensions", "4.8.0")];
        assert!(matches(&req("typing_extensions>=4"), &installed));
    }

    #[test]
    fn unsatisfied_keeps_declaration_order() {
        let reqs = vec![req("b>=2"), req("a"), req("c==1.0")];
        let installed = vec![pkg("b", "1.0"), pkg("a", "0.1"), pkg("c", "1.0.0")];
        let missing = unsatisfied(&reqs, &installed);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].name(), "b");
    }
}
