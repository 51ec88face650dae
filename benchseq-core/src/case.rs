//! Benchmark cases and comparison groups.
//!
//! A `Case` pairs a named routine with optional per-case overrides. Cases
//! collect into a `CaseGroup` while a comparison's tasks run, or form a
//! singleton group when declared standalone.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Future produced by an asynchronous case body for one engine iteration.
pub type CaseFuture = Pin<Box<dyn Future<Output = ()>>>;

/// Boxed synchronous case body.
pub type SyncFn = Box<dyn FnMut()>;

/// Boxed asynchronous case body; called once per engine iteration.
pub type AsyncFn = Box<dyn FnMut() -> CaseFuture>;

/// How a case body is driven by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecMode {
    /// Plain closure, called directly.
    Sync,
    /// Future-producing closure, driven on the engine's runtime.
    Async,
}

impl fmt::Display for ExecMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecMode::Sync => f.write_str("sync"),
            ExecMode::Async => f.write_str("async"),
        }
    }
}

/// A case body with its execution mode fixed at registration.
///
/// The mode comes from which constructor (and therefore which `Harness`
/// registration method) produced the routine; it is never inferred from the
/// closure itself.
pub enum Routine {
    /// Synchronous body.
    Sync(SyncFn),
    /// Future-producing body.
    Async(AsyncFn),
}

impl Routine {
    /// Wrap a synchronous closure. The closure's output is consumed through
    /// `black_box` so the computation cannot be optimized away.
    pub fn sync<O, F>(mut f: F) -> Self
    where
        F: FnMut() -> O + 'static,
    {
        Routine::Sync(Box::new(move || {
            let _ = std::hint::black_box(f());
        }))
    }

    /// Wrap a future-producing closure. The awaited output is consumed
    /// through `black_box`.
    pub fn future<F, Fut>(mut f: F) -> Self
    where
        F: FnMut() -> Fut + 'static,
        Fut: Future + 'static,
    {
        Routine::Async(Box::new(move || -> CaseFuture {
            let fut = f();
            Box::pin(async move {
                let _ = std::hint::black_box(fut.await);
            })
        }))
    }

    /// The mode this routine is driven in.
    pub fn mode(&self) -> ExecMode {
        match self {
            Routine::Sync(_) => ExecMode::Sync,
            Routine::Async(_) => ExecMode::Async,
        }
    }
}

impl fmt::Debug for Routine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Routine").field(&self.mode()).finish()
    }
}

/// Per-case overrides for the engine's run settings.
///
/// Unset fields inherit the global `RunSettings` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaseOptions {
    /// Samples the engine collects for this case.
    pub sample_size: Option<usize>,
    /// Warm-up phase length for this case.
    pub warm_up_time: Option<Duration>,
    /// Measurement phase length for this case.
    pub measurement_time: Option<Duration>,
}

/// A single named unit of timed work.
pub struct Case {
    name: String,
    routine: Routine,
    options: CaseOptions,
}

impl Case {
    /// Create a case. `name` is the short name; scope lives in the group label.
    pub fn new(name: impl Into<String>, routine: Routine, options: CaseOptions) -> Self {
        Self {
            name: name.into(),
            routine,
            options,
        }
    }

    /// Short (unqualified) case name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execution mode fixed at registration.
    pub fn mode(&self) -> ExecMode {
        self.routine.mode()
    }

    /// Per-case overrides.
    pub fn options(&self) -> &CaseOptions {
        &self.options
    }

    /// Decompose into name, routine, and options for execution.
    pub fn into_parts(self) -> (String, Routine, CaseOptions) {
        (self.name, self.routine, self.options)
    }
}

impl fmt::Debug for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Case")
            .field("name", &self.name)
            .field("mode", &self.mode())
            .field("options", &self.options)
            .finish()
    }
}

/// An ordered set of cases run and reported together.
///
/// Built while a comparison's tasks execute; consumed by the engine when the
/// group runs. Standalone cases get a singleton group under their own label.
pub struct CaseGroup {
    label: String,
    cases: Vec<Case>,
}

impl CaseGroup {
    /// Create an empty group under a fully-qualified label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            cases: Vec::new(),
        }
    }

    /// Fully-qualified group label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Append a case; declaration order is preserved through execution.
    pub fn push(&mut self, case: Case) {
        self.cases.push(case);
    }

    /// Cases in declaration order.
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    /// Number of cases in the group.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Whether the group holds no cases.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Decompose into label and cases for execution.
    pub fn into_parts(self) -> (String, Vec<Case>) {
        (self.label, self.cases)
    }
}

impl fmt::Debug for CaseGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaseGroup")
            .field("label", &self.label)
            .field("cases", &self.cases)
            .finish()
    }
}
