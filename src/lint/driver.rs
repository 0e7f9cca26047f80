//! The consistency driver.
//!
//! One visit of a [`ProjectUnit`] runs two checks:
//!
//! 1. Whole-unit: which declared requirements the environment does not
//!    satisfy. At most one diagnostic per unit, carrying an
//!    `InstallRequirements` fix for the full unsatisfied list.
//! 2. Per import: whether the imported root package is covered by the
//!    standard library, the project itself, or a declared requirement.
//!
//! A unit whose suppression flag is raised in the [`AnalysisContext`]
//! produces nothing. Each visit builds its own name index and queries the
//! inventory afresh, so concurrent visits share only the context.

use std::collections::HashSet;

use crate::index::{NameIndex, StdlibNames};
use crate::lint::context::AnalysisContext;
use crate::lint::fix::FixDescriptor;
use crate::lint::{Diagnostic, RuleId};
use crate::project::ProjectUnit;
use crate::requirements::{unsatisfied, Requirement};
use crate::resolver::{ImportCheck, ImportResolver};

/// Where a visit ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitState {
    Idle,
    Checking,
    Suppressed,
}

/// What the inventory told the visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryStatus {
    /// The query succeeded with this many packages.
    Available(usize),
    /// The query failed; unsatisfied requirements were not reported.
    Indeterminate,
    /// The unit has no environment to query.
    NoEnvironment,
    /// The visit stopped before querying.
    NotQueried,
}

/// Result of visiting one unit.
#[derive(Debug, Clone)]
pub struct VisitOutcome {
    pub state: VisitState,
    pub inventory: InventoryStatus,
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs the requirement checks over project units.
#[derive(Debug, Clone, Default)]
pub struct ConsistencyDriver {
    stdlib: StdlibNames,
    ignored: HashSet<String>,
}

impl ConsistencyDriver {
    pub fn new(stdlib: StdlibNames) -> Self {
        Self {
            stdlib,
            ignored: HashSet::new(),
        }
    }

    /// Import roots never reported as undeclared.
    pub fn with_ignored<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored.extend(names.into_iter().map(Into::into));
        self
    }

    /// Visit `unit` and collect its diagnostics.
    pub fn visit(&self, ctx: &AnalysisContext, unit: &ProjectUnit) -> VisitOutcome {
        if ctx.is_suppressed(unit.id()) {
            tracing::debug!("{}: Idle -> Suppressed", unit.id());
            return VisitOutcome {
                state: VisitState::Suppressed,
                inventory: InventoryStatus::NotQueried,
                diagnostics: Vec::new(),
            };
        }

        tracing::debug!("{}: Idle -> Checking", unit.id());
        let requirements = unit.requirements();
        let mut diagnostics = Vec::new();

        let (installed, inventory) = match unit.environment() {
            Some(env) => match env.packages() {
                Ok(packages) => {
                    let count = packages.len();
                    (Some(packages), InventoryStatus::Available(count))
                }
                Err(e) => {
                    tracing::warn!(
                        "{}: cannot list installed packages, skipping requirement check: {}",
                        unit.id(),
                        e
                    );
                    (None, InventoryStatus::Indeterminate)
                }
            },
            None => (None, InventoryStatus::NoEnvironment),
        };

        if let Some(installed) = &installed {
            let missing = unsatisfied(&requirements, installed);
            if !missing.is_empty() {
                diagnostics.push(
                    Diagnostic::new(
                        RuleId::unsatisfied_requirement(),
                        unit.id().clone(),
                        unsatisfied_message(&missing),
                    )
                    .with_fix(FixDescriptor::install_requirements(
                        unit.id().clone(),
                        missing,
                    )),
                );
            }
        }

        let index = NameIndex::build(
            &self.stdlib,
            unit.local_packages(),
            &requirements,
            installed.as_deref(),
        );
        let resolver = ImportResolver::new(&index, &requirements, &self.ignored);
        for reference in unit.imports() {
            let ImportCheck::Undeclared { package } = resolver.check(reference) else {
                continue;
            };
            let mut diagnostic = Diagnostic::new(
                RuleId::undeclared_package(),
                unit.id().clone(),
                format!("Package '{}' is not listed in project requirements", package),
            );
            if let Some(span) = &reference.span {
                diagnostic = diagnostic.with_span(span.clone());
            }
            diagnostics.push(
                diagnostic.with_fix(FixDescriptor::add_requirement(
                    package,
                    unit.artifact().clone(),
                )),
            );
        }

        tracing::debug!(
            "{}: Checking -> Idle ({} diagnostics)",
            unit.id(),
            diagnostics.len()
        );
        VisitOutcome {
            state: VisitState::Idle,
            inventory,
            diagnostics,
        }
    }

    /// Visit every unit, one scoped thread per unit. Outcomes are returned
    /// in the order of `units`.
    pub fn visit_all(&self, ctx: &AnalysisContext, units: &[ProjectUnit]) -> Vec<VisitOutcome> {
        std::thread::scope(|s| {
            let handles: Vec<_> = units
                .iter()
                .map(|unit| s.spawn(move || self.visit(ctx, unit)))
                .collect();
            handles
                .into_iter()
                .zip(units)
                .map(|(handle, unit)| {
                    handle.join().unwrap_or_else(|_| {
                        tracing::warn!("{}: visit panicked", unit.id());
                        VisitOutcome {
                            state: VisitState::Idle,
                            inventory: InventoryStatus::NotQueried,
                            diagnostics: Vec::new(),
                        }
                    })
                })
                .collect()
        })
    }
}

fn unsatisfied_message(missing: &[Requirement]) -> String {
    let quoted: Vec<String> = missing.iter().map(|r| format!("'{}'", r)).collect();
    if missing.len() == 1 {
        format!("Package requirement {} is not satisfied", quoted[0])
    } else {
        format!("Package requirements {} are not satisfied", quoted.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{InstalledPackage, Inventory, InventoryError, StaticInventory};
    use crate::lint::context::UnitId;
    use crate::lint::fix::TargetArtifact;
    use crate::lint::Span;
    use crate::resolver::ImportReference;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn driver() -> ConsistencyDriver {
        ConsistencyDriver::new(StdlibNames::from_names(["os", "sys"]))
    }

    fn unit(
        declared: &[&str],
        installed: Vec<InstalledPackage>,
        imports: &[&str],
    ) -> ProjectUnit {
        ProjectUnit::new(UnitId::new("app"))
            .with_environment(Arc::new(StaticInventory::new(installed)))
            .with_declared(declared.iter().copied())
            .with_imports(imports.iter().map(|i| ImportReference::from_dotted(i)))
    }

    #[test]
    fn scenario_declared_but_not_installed() {
        let unit = unit(&["flask>=1.0"], vec![], &["flask"]);
        let outcome = driver().visit(&AnalysisContext::new(), &unit);

        assert_eq!(outcome.state, VisitState::Idle);
        assert_eq!(outcome.inventory, InventoryStatus::Available(0));
        assert_eq!(outcome.diagnostics.len(), 1);
        let diag = &outcome.diagnostics[0];
        assert_eq!(diag.rule_id, RuleId::unsatisfied_requirement());
        assert_eq!(diag.message, "Package requirement 'flask>=1.0' is not satisfied");
        match &diag.fix {
            Some(FixDescriptor::InstallRequirements { unit, requirements }) => {
                assert_eq!(unit.as_str(), "app");
                assert_eq!(requirements.len(), 1);
                assert_eq!(requirements[0].name(), "flask");
            }
            other => panic!("unexpected fix: {:?}", other),
        }
    }

    #[test]
    fn scenario_undeclared_import() {
        let path = PathBuf::from("/p/requirements.txt");
        let unit = unit(&[], vec![], &["os", "requests"])
            .with_artifact(TargetArtifact::RequirementsFile { path: path.clone() });
        let outcome = driver().visit(&AnalysisContext::new(), &unit);

        assert_eq!(outcome.diagnostics.len(), 1);
        let diag = &outcome.diagnostics[0];
        assert_eq!(diag.rule_id, RuleId::undeclared_package());
        assert_eq!(
            diag.message,
            "Package 'requests' is not listed in project requirements"
        );
        match &diag.fix {
            Some(FixDescriptor::AddRequirement { package, target }) => {
                assert_eq!(package, "requests");
                assert_eq!(target, &TargetArtifact::RequirementsFile { path });
            }
            other => panic!("unexpected fix: {:?}", other),
        }
    }

    #[test]
    fn scenario_inventory_failure_is_indeterminate() {
        let unit = ProjectUnit::new(UnitId::new("app"))
            .with_environment(Arc::new(StaticInventory::failing(
                InventoryError::Unavailable {
                    program: "python3".into(),
                    message: "not found".into(),
                },
            )))
            .with_declared(["flask>=1.0"]);
        let outcome = driver().visit(&AnalysisContext::new(), &unit);

        assert_eq!(outcome.inventory, InventoryStatus::Indeterminate);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn multiple_unsatisfied_requirements_share_one_diagnostic() {
        let unit = unit(
            &["flask>=1.0", "requests", "attrs"],
            vec![InstalledPackage::new("attrs", "23.1.0")],
            &[],
        );
        let outcome = driver().visit(&AnalysisContext::new(), &unit);

        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(
            outcome.diagnostics[0].message,
            "Package requirements 'flask>=1.0', 'requests' are not satisfied"
        );
    }

    #[test]
    fn suppressed_unit_yields_nothing() {
        let ctx = AnalysisContext::new();
        let unit = unit(&["flask>=1.0"], vec![], &["requests"]);

        let guard = ctx.suppress(unit.id());
        let outcome = driver().visit(&ctx, &unit);
        assert_eq!(outcome.state, VisitState::Suppressed);
        assert_eq!(outcome.inventory, InventoryStatus::NotQueried);
        assert!(outcome.diagnostics.is_empty());

        drop(guard);
        assert_eq!(driver().visit(&ctx, &unit).diagnostics.len(), 2);
    }

    #[test]
    fn suppression_is_per_unit() {
        let ctx = AnalysisContext::new();
        let _guard = ctx.suppress(&UnitId::new("other"));
        let unit = unit(&["flask"], vec![], &[]);
        assert_eq!(driver().visit(&ctx, &unit).diagnostics.len(), 1);
    }

    #[test]
    fn unit_without_environment_checks_imports_only() {
        let unit = ProjectUnit::new(UnitId::new("app"))
            .with_declared(["flask"])
            .with_imports([
                ImportReference::from_dotted("flask"),
                ImportReference::from_dotted("numpy"),
            ]);
        let outcome = driver().visit(&AnalysisContext::new(), &unit);

        assert_eq!(outcome.inventory, InventoryStatus::NoEnvironment);
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(outcome.diagnostics[0].rule_id, RuleId::undeclared_package());
    }

    #[test]
    fn local_and_ignored_imports_are_not_reported() {
        let unit = unit(&[], vec![], &["myapp.models", "vendored", "sys"])
            .with_local_packages(["myapp"]);
        let outcome = driver()
            .with_ignored(["vendored"])
            .visit(&AnalysisContext::new(), &unit);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn import_diagnostic_carries_span() {
        let span = Span::at("app.py", 3, 8, 8);
        let unit = ProjectUnit::new(UnitId::new("app"))
            .with_imports([ImportReference::from_dotted("requests").with_span(span.clone())]);
        let outcome = driver().visit(&AnalysisContext::new(), &unit);
        assert_eq!(outcome.diagnostics[0].span(), Some(&span));
    }

    #[test]
    fn empty_import_chain_is_skipped() {
        let unit = ProjectUnit::new(UnitId::new("app")).with_imports([ImportReference {
            chain: vec![],
            span: None,
        }]);
        assert!(driver()
            .visit(&AnalysisContext::new(), &unit)
            .diagnostics
            .is_empty());
    }

    #[test]
    fn malformed_declarations_are_skipped() {
        let unit = unit(&["", ">=1.0", "attrs"], vec![], &[]);
        let outcome = driver().visit(&AnalysisContext::new(), &unit);
        assert_eq!(
            outcome.diagnostics[0].message,
            "Package requirement 'attrs' is not satisfied"
        );
    }

    struct CountingInventory(AtomicUsize);

    impl Inventory for CountingInventory {
        fn packages(&self) -> Result<Vec<InstalledPackage>, InventoryError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    #[test]
    fn every_visit_queries_inventory_afresh() {
        let inventory = Arc::new(CountingInventory(AtomicUsize::new(0)));
        let unit = ProjectUnit::new(UnitId::new("app")).with_environment(inventory.clone());
        let ctx = AnalysisContext::new();
        driver().visit(&ctx, &unit);
        driver().visit(&ctx, &unit);
        assert_eq!(inventory.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn concurrent_visits_share_only_the_context() {
        let ctx = AnalysisContext::new();
        let units: Vec<ProjectUnit> = (0..4)
            .map(|i| {
                ProjectUnit::new(UnitId::new(format!("unit-{}", i)))
                    .with_environment(Arc::new(StaticInventory::new(vec![])))
                    .with_declared(["flask"])
            })
            .collect();
        let _guard = ctx.suppress(units[0].id());

        let outcomes = driver().visit_all(&ctx, &units);
        let counts: Vec<usize> = outcomes.iter().map(|o| o.diagnostics.len()).collect();
        assert_eq!(counts, vec![0, 1, 1, 1]);
        assert_eq!(outcomes[0].state, VisitState::Suppressed);
    }
}
