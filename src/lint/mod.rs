//! Requirement-consistency checks.
//!
//! # Overview
//!
//! The lint layer consists of:
//!
//! - **Driver** - Visits a project unit and runs both checks ([`ConsistencyDriver`])
//! - **Context** - Per-unit suppression flags shared with running fixes ([`AnalysisContext`])
//! - **Diagnostics** - Findings with a location and an optional fix ([`Diagnostic`])
//! - **Fixes** - Inert descriptions of remedial actions ([`FixDescriptor`])
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use reqlint::index::StdlibNames;
//! use reqlint::inventory::StaticInventory;
//! use reqlint::lint::{AnalysisContext, ConsistencyDriver, UnitId};
//! use reqlint::project::ProjectUnit;
//! use reqlint::resolver::ImportReference;
//!
//! let unit = ProjectUnit::new(UnitId::new("app"))
//!     .with_environment(Arc::new(StaticInventory::new(vec![])))
//!     .with_declared(["flask>=1.0"])
//!     .with_imports([ImportReference::from_dotted("os")]);
//!
//! let driver = ConsistencyDriver::new(StdlibNames::python3());
//! let outcome = driver.visit(&AnalysisContext::new(), &unit);
//!
//! assert_eq!(outcome.diagnostics.len(), 1);
//! assert_eq!(
//!     outcome.diagnostics[0].message,
//!     "Package requirement 'flask>=1.0' is not satisfied"
//! );
//! ```

pub mod context;
pub mod diagnostic;
pub mod driver;
pub mod fix;
pub mod output;
pub mod rule;
pub mod span;

pub use context::{AnalysisContext, SuppressionGuard, UnitId};
pub use diagnostic::{Diagnostic, Location};
pub use driver::{ConsistencyDriver, InventoryStatus, VisitOutcome, VisitState};
pub use fix::{
    FixContext, FixDescriptor, FixEngine, FixOutcome, FixPlan, FixResult, InstallTask,
    TargetArtifact, TextEdit,
};
pub use output::{DiagnosticFormatter, HumanFormatter, JsonFormatter, OutputFormat};
pub use rule::{RuleId, Severity};
pub use span::Span;
