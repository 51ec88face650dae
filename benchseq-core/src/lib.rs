#![warn(missing_docs)]
//! Benchseq Core - Scheduling Layer
//!
//! Declarative, strictly sequential benchmark scheduling over an external
//! engine:
//! - `Harness` context: name stack, FIFO run queue, comparison slot
//! - Registration API: `group`, `compare`, `bench`/`bench_async`
//! - `Engine` seam with a criterion-backed production engine
//! - Link-time suite registry via `inventory`
//!
//! Declaration never executes anything; `Harness::run` drains the queue one
//! task at a time and each task settles fully before the next starts.

mod case;
mod engine;
mod harness;

pub use case::{AsyncFn, Case, CaseFuture, CaseGroup, CaseOptions, ExecMode, Routine, SyncFn};
pub use engine::{
    CriterionEngine, DEFAULT_SAMPLE_SIZE, Engine, EngineError, MIN_SAMPLE_SIZE, RunSettings,
};
pub use harness::{Harness, PlanEntry, PlanKind, RunError, RunSummary};

/// Suite definition registered via `benchseq::suite!` or constructed directly.
///
/// A suite is a plain function declaring groups, comparisons, and cases
/// against the harness it receives.
#[derive(Debug, Clone, Copy)]
pub struct SuiteDef {
    /// Unique suite name; also the CLI filter key.
    pub name: &'static str,
    /// Registration function invoked against the harness.
    pub register: fn(&mut Harness),
}

impl SuiteDef {
    /// Create a suite definition.
    pub const fn new(name: &'static str, register: fn(&mut Harness)) -> Self {
        Self { name, register }
    }
}

// Collect all registered suites
inventory::collect!(SuiteDef);

/// Anchor to prevent LTO from stripping inventory entries
#[used]
#[doc(hidden)]
pub static REGISTRY_ANCHOR: fn() = || {
    for _ in inventory::iter::<SuiteDef> {}
};

/// All registered suites, sorted by name for a deterministic run order.
pub fn registered_suites() -> Vec<&'static SuiteDef> {
    let mut suites: Vec<&'static SuiteDef> = inventory::iter::<SuiteDef>.into_iter().collect();
    suites.sort_by_key(|s| s.name);
    suites
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_nothing(_h: &mut Harness) {}

    inventory::submit! {
        SuiteDef::new("zz_registry_order", register_nothing)
    }
    inventory::submit! {
        SuiteDef::new("aa_registry_order", register_nothing)
    }

    #[test]
    fn test_registered_suites_sorted_by_name() {
        let suites = registered_suites();
        let first = suites
            .iter()
            .position(|s| s.name == "aa_registry_order")
            .expect("sentinel suite registered");
        let second = suites
            .iter()
            .position(|s| s.name == "zz_registry_order")
            .expect("sentinel suite registered");

        assert!(first < second);
        let names: Vec<&str> = suites.iter().map(|s| s.name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }
}
