#![warn(missing_docs)]
//! # Benchseq
//!
//! Declarative, strictly sequential benchmark scheduling over criterion.
//!
//! Benchseq is a thin layer that owns *what runs when*: you declare named
//! cases and comparison groups against a [`Harness`], and the runner
//! executes them one at a time in declaration order. Warm-up, sampling,
//! statistics, and per-case console output all belong to criterion.
//!
//! - **Deferred declaration**: registration only enqueues; nothing executes
//!   until the runner drains the queue
//! - **Nested names**: scopes join into labels like `io -> read -> small`
//! - **Comparisons**: cases inside `compare` run and report as one group
//! - **Explicit async**: `bench_async` cases run on a tokio runtime owned by
//!   the engine; the mode is never guessed from the closure
//! - **Suite registry**: `suite!` registers definition functions at link
//!   time; the CLI filters and runs them in sorted order
//!
//! ## Quick Start
//!
//! ```no_run
//! use benchseq::prelude::*;
//!
//! fn strings(h: &mut Harness) {
//!     h.group("strings", |h| {
//!         h.compare("concat", |h| {
//!             h.bench("push_str", || {
//!                 let mut s = String::with_capacity(16);
//!                 s.push_str("hello");
//!                 s.push_str(" world");
//!                 s
//!             });
//!             h.bench("format", || format!("{} {}", "hello", "world"));
//!         });
//!     });
//! }
//! benchseq::suite!(strings);
//!
//! fn main() {
//!     if let Err(e) = benchseq::run() {
//!         eprintln!("Error: {e}");
//!         std::process::exit(1);
//!     }
//! }
//! ```
//!
//! Wire the binary up in `Cargo.toml` with `harness = false` so cargo hands
//! the command line over:
//!
//! ```toml
//! [[bench]]
//! name = "benchmarks"
//! harness = false
//! ```

// Re-export core types
pub use benchseq_core::{
    AsyncFn, Case, CaseFuture, CaseGroup, CaseOptions, CriterionEngine, DEFAULT_SAMPLE_SIZE,
    Engine, EngineError, ExecMode, Harness, MIN_SAMPLE_SIZE, PlanEntry, PlanKind, Routine,
    RunError, RunSettings, RunSummary, SuiteDef, SyncFn, registered_suites,
};

// Re-export the CLI surface
pub use benchseq_cli::{Cli, Commands, RunnerConfig, SeqConfig, run_with_cli};

/// Internal re-exports for macro expansion
#[doc(hidden)]
pub mod internal {
    pub use inventory;
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{CaseOptions, Harness, RunSettings, suite};
}

/// Register a suite definition function at link time.
///
/// A suite is a plain `fn(&mut Harness)`. `suite!(my_suite)` registers it
/// under its own name; `suite!("custom-name", path::to::suite)` sets the
/// name explicitly. Registered suites are picked up by [`run`] and
/// [`registered_suites`], sorted by name.
#[macro_export]
macro_rules! suite {
    ($register:ident) => {
        $crate::suite!(::core::stringify!($register), $register);
    };
    ($name:expr, $register:path) => {
        $crate::internal::inventory::submit! {
            $crate::SuiteDef {
                name: $name,
                register: $register,
            }
        }
    };
}

/// Run the Benchseq CLI harness.
///
/// Call this from your benchmark binary's `main()`:
/// ```ignore
/// fn main() {
///     if let Err(e) = benchseq::run() {
///         eprintln!("Error: {e}");
///         std::process::exit(1);
///     }
/// }
/// ```
pub use benchseq_cli::run;
