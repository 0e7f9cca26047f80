//! Analysis context shared by visits and fix execution.
//!
//! The only mutable state the checks depend on is a per-unit
//! "suppress diagnostics" flag. It is false by default, raised when an
//! install fix starts, and lowered when that fix finishes, whether it
//! succeeded or failed. Visits read it before running any check.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Identity of a project unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(String);

impl UnitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Suppression flags keyed by unit identity.
///
/// Shared between concurrent visits and background fix execution; each
/// flag is an atomic, so reads never block on a running install.
#[derive(Debug, Default)]
pub struct AnalysisContext {
    flags: RwLock<HashMap<UnitId, Arc<AtomicBool>>>,
}

impl AnalysisContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether diagnostics for `unit` are currently suppressed.
    pub fn is_suppressed(&self, unit: &UnitId) -> bool {
        self.flags
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(unit)
            .is_some_and(|flag| flag.load(Ordering::Acquire))
    }

    /// Raise the flag for `unit` until the returned guard is dropped.
    pub fn suppress(&self, unit: &UnitId) -> SuppressionGuard {
        let flag = self.flag(unit);
        flag.store(true, Ordering::Release);
        tracing::debug!("Suppressing diagnostics for {}", unit);
        SuppressionGuard {
            unit: unit.clone(),
            flag,
        }
    }

    fn flag(&self, unit: &UnitId) -> Arc<AtomicBool> {
        if let Some(flag) = self
            .flags
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(unit)
        {
            return Arc::clone(flag);
        }
        let mut flags = self.flags.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(flags.entry(unit.clone()).or_default())
    }
}

/// Keeps a unit's diagnostics suppressed while alive.
///
/// Dropping the guard lowers the flag on every exit path, including
/// installer errors and panics on the fix thread.
#[derive(Debug)]
pub struct SuppressionGuard {
    unit: UnitId,
    flag: Arc<AtomicBool>,
}

impl SuppressionGuard {
    /// The unit this guard suppresses.
    pub fn unit(&self) -> &UnitId {
        &self.unit
    }
}

impl Drop for SuppressionGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
        tracing::debug!("Diagnostics for {} resumed", self.unit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_start_unsuppressed() {
        let ctx = AnalysisContext::new();
        assert!(!ctx.is_suppressed(&UnitId::new("a")));
    }

    #[test]
    fn guard_suppresses_until_dropped() {
        let ctx = AnalysisContext::new();
        let unit = UnitId::new("a");

        let guard = ctx.suppress(&unit);
        assert!(ctx.is_suppressed(&unit));
        assert_eq!(guard.unit(), &unit);

        drop(guard);
        assert!(!ctx.is_suppressed(&unit));
    }

    #[test]
    fn suppression_is_per_unit() {
        let ctx = AnalysisContext::new();
        let _guard = ctx.suppress(&UnitId::new("a"));
        assert!(ctx.is_suppressed(&UnitId::new("a")));
        assert!(!ctx.is_suppressed(&UnitId::new("b")));
    }

    #[test]
    fn guard_resets_flag_when_thread_panics() {
        let ctx = Arc::new(AnalysisContext::new());
        let unit = UnitId::new("a");
        let guard = ctx.suppress(&unit);

        let handle = std::thread::spawn(move || {
            let _guard = guard;
            panic!("installer blew up");
        });
        assert!(handle.join().is_err());
        assert!(!ctx.is_suppressed(&unit));
    }

    #[test]
    fn flag_is_visible_across_threads() {
        let ctx = Arc::new(AnalysisContext::new());
        let unit = UnitId::new("a");
        let _guard = ctx.suppress(&unit);

        let seen = {
            let ctx = Arc::clone(&ctx);
            let unit = unit.clone();
            std::thread::spawn(move || ctx.is_suppressed(&unit))
                .join()
                .unwrap()
        };
        assert!(seen);
    }
}
