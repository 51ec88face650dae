//! The scheduler context: name stack, run queue, and runner.
//!
//! Declaration methods only enqueue work; nothing executes until `run` (or
//! `run_with`) drains the queue strictly FIFO. Group headers and the
//! completion line print here; per-case statistics print inside the engine.

use std::collections::{HashSet, VecDeque};
use std::future::Future;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::SuiteDef;
use crate::case::{Case, CaseGroup, CaseOptions, ExecMode, Routine};
use crate::engine::{CriterionEngine, Engine, EngineError, RunSettings};

/// Scope names are joined with this separator to form labels.
const LABEL_SEPARATOR: &str = " -> ";

/// A deferred unit of scheduled work.
type Task = Box<dyn FnOnce(&mut RunState<'_>) -> Result<(), RunError>>;

/// State threaded through tasks while the queue drains.
struct RunState<'a> {
    engine: &'a mut dyn Engine,
    /// The comparison group currently collecting cases. At most one; empty
    /// before and after every group run.
    current: Option<CaseGroup>,
    /// (group label, case name) pairs already run; a repeat never reaches
    /// the engine.
    seen_cases: HashSet<(String, String)>,
    groups_run: usize,
    cases_run: usize,
}

/// Error from a run. The first failure stops the drain; remaining tasks are
/// dropped, never retried.
#[derive(Debug, Error)]
pub enum RunError {
    /// A comparison's setup ran while another comparison was active.
    #[error("Cannot nest compare blocks: {label}")]
    NestedCompare {
        /// Label of the inner comparison.
        label: String,
    },

    /// A comparison finished with no active group. Unreachable through the
    /// declaration API; kept explicit instead of panicking.
    #[error("No active comparison group for: {label}")]
    MissingGroup {
        /// Label of the comparison being finished.
        label: String,
    },

    /// A group reached the runner with an empty label.
    #[error("Benchmark group label is empty")]
    EmptyLabel,

    /// A case reached the runner with an empty name.
    #[error("Benchmark case name is empty in group: {label}")]
    EmptyName {
        /// Label of the group holding the nameless case.
        label: String,
    },

    /// The same group label and case name pair ran twice in one run.
    #[error("Duplicate benchmark case {name:?} in group: {label}")]
    DuplicateCase {
        /// Label of the group the case repeats in.
        label: String,
        /// Short name of the repeated case.
        name: String,
    },

    /// The engine failed while running a group.
    #[error("Benchmark engine failed: {0}")]
    Engine(#[from] EngineError),
}

/// Counters from a completed run.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    /// Tasks drained from the queue.
    pub tasks: usize,
    /// Groups run: comparisons plus standalone singletons.
    pub groups: usize,
    /// Cases measured.
    pub cases: usize,
    /// Wall time for the whole drain.
    pub elapsed: Duration,
}

/// What a plan entry was declared as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanKind {
    /// Organizational scope from `group`.
    Group,
    /// Comparison from `compare`.
    Compare,
    /// Case from `bench*` or `bench_async*`.
    Case {
        /// Mode the case was registered with.
        mode: ExecMode,
    },
}

/// Declaration log record; lets hosts list a harness without running it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    /// Short (unqualified) name.
    pub name: String,
    /// Fully-qualified label.
    pub label: String,
    /// Nesting depth at declaration (0 = top level).
    pub depth: usize,
    /// What was declared.
    pub kind: PlanKind,
}

/// The scheduler context.
///
/// Owns the name stack, the FIFO run queue, and the declaration plan.
/// Independent harnesses share no state; build as many as you like.
#[derive(Default)]
pub struct Harness {
    names: Vec<String>,
    queue: VecDeque<Task>,
    plan: Vec<PlanEntry>,
}

impl Harness {
    /// Create an empty harness.
    pub fn new() -> Self {
        Self::default()
    }

    fn label(&self) -> String {
        self.names.join(LABEL_SEPARATOR)
    }

    /// Declare an organizational scope.
    ///
    /// Schedules a header line, then runs `body` immediately so nested
    /// declarations enqueue in order. Never touches the comparison slot:
    /// cases declared directly inside a `group` are standalone.
    pub fn group(&mut self, name: impl Into<String>, body: impl FnOnce(&mut Harness)) {
        let name = name.into();
        self.names.push(name.clone());
        let label = self.label();
        self.plan.push(PlanEntry {
            name,
            label: label.clone(),
            depth: self.names.len() - 1,
            kind: PlanKind::Group,
        });

        self.queue.push_back(Box::new(move |_state| {
            println!("\n\nBenchmark set: {label}\n");
            Ok(())
        }));

        body(self);
        self.names.pop();
    }

    /// Declare a comparison: cases registered inside `body` collect into one
    /// group, run together when the comparison's finish task executes.
    ///
    /// Comparisons must not nest. The violation surfaces when the inner
    /// setup task runs, not at declaration.
    pub fn compare(&mut self, name: impl Into<String>, body: impl FnOnce(&mut Harness)) {
        let name = name.into();
        self.names.push(name.clone());
        let label = self.label();
        self.plan.push(PlanEntry {
            name,
            label: label.clone(),
            depth: self.names.len() - 1,
            kind: PlanKind::Compare,
        });

        let setup_label = label.clone();
        self.queue.push_back(Box::new(move |state| {
            if state.current.is_some() {
                return Err(RunError::NestedCompare { label: setup_label });
            }
            println!("\n\nComparing: {setup_label}\n");
            state.current = Some(CaseGroup::new(setup_label));
            Ok(())
        }));

        body(self);

        self.queue.push_back(Box::new(move |state| {
            let group = state
                .current
                .take()
                .ok_or_else(|| RunError::MissingGroup { label })?;
            run_group(state, group)
        }));
        self.names.pop();
    }

    /// Register a synchronous case with default options.
    pub fn bench<O, F>(&mut self, name: impl Into<String>, f: F)
    where
        F: FnMut() -> O + 'static,
    {
        self.bench_with(name, CaseOptions::default(), f);
    }

    /// Register a synchronous case with per-case overrides.
    pub fn bench_with<O, F>(&mut self, name: impl Into<String>, options: CaseOptions, f: F)
    where
        F: FnMut() -> O + 'static,
    {
        self.case(name.into(), Routine::sync(f), options);
    }

    /// Register an asynchronous case with default options. The closure's
    /// future is driven to completion on the engine's runtime each iteration.
    pub fn bench_async<F, Fut>(&mut self, name: impl Into<String>, f: F)
    where
        F: FnMut() -> Fut + 'static,
        Fut: Future + 'static,
    {
        self.bench_async_with(name, CaseOptions::default(), f);
    }

    /// Register an asynchronous case with per-case overrides.
    pub fn bench_async_with<F, Fut>(&mut self, name: impl Into<String>, options: CaseOptions, f: F)
    where
        F: FnMut() -> Fut + 'static,
        Fut: Future + 'static,
    {
        self.case(name.into(), Routine::future(f), options);
    }

    /// Shared case registration. Whether the case is standalone is decided
    /// when its task runs, against the comparison slot's state at that time.
    fn case(&mut self, name: String, routine: Routine, options: CaseOptions) {
        self.names.push(name.clone());
        let label = self.label();
        self.plan.push(PlanEntry {
            name: name.clone(),
            label: label.clone(),
            depth: self.names.len() - 1,
            kind: PlanKind::Case {
                mode: routine.mode(),
            },
        });
        self.names.pop();

        self.queue.push_back(Box::new(move |state| {
            let case = Case::new(name, routine, options);
            match state.current.as_mut() {
                // Inside a comparison: collect under the short name. The
                // enclosing finish task runs the whole group.
                Some(group) => {
                    group.push(case);
                    Ok(())
                }
                // Standalone: run immediately as a singleton group under the
                // fully-qualified label.
                None => {
                    let mut group = CaseGroup::new(label);
                    group.push(case);
                    run_group(state, group)
                }
            }
        }));
    }

    /// Register suite definitions in the order given.
    pub fn load<I>(&mut self, suites: I)
    where
        I: IntoIterator<Item = &'static SuiteDef>,
    {
        for def in suites {
            (def.register)(self);
        }
    }

    /// Declaration log, in declaration order.
    pub fn plan(&self) -> &[PlanEntry] {
        &self.plan
    }

    /// Number of queued tasks.
    pub fn task_count(&self) -> usize {
        self.queue.len()
    }

    /// Drain the queue against the criterion engine.
    pub fn run(self, settings: RunSettings) -> Result<RunSummary, RunError> {
        let mut engine = CriterionEngine::new(settings);
        self.run_with(&mut engine)
    }

    /// Drain the queue strictly FIFO against `engine`.
    ///
    /// Each task settles fully before the next is dequeued; async case
    /// bodies are driven inside their group's run. On success, prints the
    /// completion line and returns the run's counters.
    pub fn run_with(mut self, engine: &mut dyn Engine) -> Result<RunSummary, RunError> {
        let started = Instant::now();
        let mut state = RunState {
            engine,
            current: None,
            seen_cases: HashSet::new(),
            groups_run: 0,
            cases_run: 0,
        };

        let mut tasks = 0;
        while let Some(task) = self.queue.pop_front() {
            task(&mut state)?;
            tasks += 1;
        }

        state.engine.finish()?;
        println!("\nBenchmarks complete.");

        Ok(RunSummary {
            tasks,
            groups: state.groups_run,
            cases: state.cases_run,
            elapsed: started.elapsed(),
        })
    }
}

/// Shared group-run path for comparisons and standalone singletons.
///
/// Criterion treats empty and repeated benchmark ids as assertion failures,
/// so label hygiene is checked here first, on the error path. The same short
/// case name in two different groups is fine.
fn run_group(state: &mut RunState<'_>, group: CaseGroup) -> Result<(), RunError> {
    if group.label().is_empty() {
        return Err(RunError::EmptyLabel);
    }
    for case in group.cases() {
        if case.name().is_empty() {
            return Err(RunError::EmptyName {
                label: group.label().to_string(),
            });
        }
        let id = (group.label().to_string(), case.name().to_string());
        if state.seen_cases.contains(&id) {
            return Err(RunError::DuplicateCase {
                label: id.0,
                name: id.1,
            });
        }
        state.seen_cases.insert(id);
    }

    println!("Running {} ...", group.label());
    state.groups_run += 1;
    state.cases_run += group.len();
    state.engine.run_group(group)?;
    Ok(())
}
