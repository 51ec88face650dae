//! Engine seam between the scheduler and criterion.
//!
//! The runner hands finished `CaseGroup`s to an `Engine`. The production
//! engine materializes each group as a criterion benchmark group, so warm-up,
//! sampling, statistics, and per-case console reporting all come from
//! criterion. Test code substitutes its own `Engine` to observe scheduling
//! without measuring anything.

use std::time::Duration;

use criterion::Criterion;
use thiserror::Error;

use crate::case::{CaseGroup, CaseOptions, ExecMode, Routine};

/// Default number of samples collected per case (matches criterion).
pub const DEFAULT_SAMPLE_SIZE: usize = 100;

/// Minimum samples criterion accepts; smaller requests are clamped.
pub const MIN_SAMPLE_SIZE: usize = 10;

/// Criterion rejects zero-length phases; shorter requests are clamped.
const MIN_PHASE_TIME: Duration = Duration::from_millis(1);

/// Global measurement settings, overridable per case via `CaseOptions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    /// Warm-up phase length per case.
    pub warm_up_time: Duration,
    /// Measurement phase length per case.
    pub measurement_time: Duration,
    /// Samples collected per case.
    pub sample_size: usize,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            warm_up_time: Duration::from_secs(3),
            measurement_time: Duration::from_secs(5),
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

impl RunSettings {
    /// Layer a case's overrides on top of these settings.
    pub fn resolve_for_case(&self, options: &CaseOptions) -> RunSettings {
        RunSettings {
            warm_up_time: options.warm_up_time.unwrap_or(self.warm_up_time),
            measurement_time: options.measurement_time.unwrap_or(self.measurement_time),
            sample_size: options.sample_size.unwrap_or(self.sample_size),
        }
    }

    /// Clamp to the ranges criterion accepts.
    fn clamped(self) -> RunSettings {
        RunSettings {
            warm_up_time: self.warm_up_time.max(MIN_PHASE_TIME),
            measurement_time: self.measurement_time.max(MIN_PHASE_TIME),
            sample_size: self.sample_size.max(MIN_SAMPLE_SIZE),
        }
    }
}

/// Failure inside an engine while running a group.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The async runtime could not be constructed.
    #[error("Failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),

    /// Engine-specific failure.
    #[error("{0}")]
    Other(String),
}

/// Runs finished comparison groups and reports their statistics.
///
/// The scheduler owns ordering and the group headers; the engine owns
/// measurement and per-case output.
pub trait Engine {
    /// Run every case of `group` and report its statistics.
    fn run_group(&mut self, group: CaseGroup) -> Result<(), EngineError>;

    /// Called once after the run queue drains, before the completion line.
    fn finish(&mut self) -> Result<(), EngineError> {
        Ok(())
    }
}

/// Production engine backed by criterion.
///
/// Async cases are driven on a current-thread tokio runtime, built lazily
/// the first time a group contains one and cached for the rest of the run.
pub struct CriterionEngine {
    criterion: Criterion,
    settings: RunSettings,
    cached_runtime: Option<tokio::runtime::Runtime>,
}

impl CriterionEngine {
    /// Create an engine with `settings` as the per-case defaults.
    pub fn new(settings: RunSettings) -> Self {
        Self {
            criterion: Criterion::default(),
            settings,
            cached_runtime: None,
        }
    }
}

impl Default for CriterionEngine {
    fn default() -> Self {
        Self::new(RunSettings::default())
    }
}

impl Engine for CriterionEngine {
    fn run_group(&mut self, group: CaseGroup) -> Result<(), EngineError> {
        let (label, cases) = group.into_parts();
        if cases.is_empty() {
            // Nothing to measure; criterion groups need at least one function.
            return Ok(());
        }

        if cases.iter().any(|c| c.mode() == ExecMode::Async) && self.cached_runtime.is_none() {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            self.cached_runtime = Some(runtime);
        }
        let runtime = self.cached_runtime.as_ref();

        let mut g = self.criterion.benchmark_group(label.as_str());
        for case in cases {
            let effective = self.settings.resolve_for_case(case.options()).clamped();
            g.sample_size(effective.sample_size);
            g.warm_up_time(effective.warm_up_time);
            g.measurement_time(effective.measurement_time);

            let (name, routine, _) = case.into_parts();
            match routine {
                Routine::Sync(mut body) => {
                    g.bench_function(name.as_str(), |b| b.iter(&mut body));
                }
                Routine::Async(mut body) => {
                    // Built above because this group contains an async case.
                    let rt = runtime.expect("async runtime initialized for this group");
                    g.bench_function(name.as_str(), |b| b.to_async(rt).iter(&mut body));
                }
            }
        }
        g.finish();

        Ok(())
    }

    fn finish(&mut self) -> Result<(), EngineError> {
        self.criterion.final_summary();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = RunSettings::default();
        assert_eq!(settings.warm_up_time, Duration::from_secs(3));
        assert_eq!(settings.measurement_time, Duration::from_secs(5));
        assert_eq!(settings.sample_size, DEFAULT_SAMPLE_SIZE);
    }

    #[test]
    fn test_resolve_prefers_case_overrides() {
        let settings = RunSettings::default();
        let options = CaseOptions {
            sample_size: Some(20),
            warm_up_time: Some(Duration::from_millis(500)),
            measurement_time: None,
        };

        let effective = settings.resolve_for_case(&options);
        assert_eq!(effective.sample_size, 20);
        assert_eq!(effective.warm_up_time, Duration::from_millis(500));
        // Unset fields inherit the global value
        assert_eq!(effective.measurement_time, Duration::from_secs(5));
    }

    #[test]
    fn test_resolve_inherits_when_unset() {
        let settings = RunSettings {
            warm_up_time: Duration::from_secs(1),
            measurement_time: Duration::from_secs(2),
            sample_size: 50,
        };

        let effective = settings.resolve_for_case(&CaseOptions::default());
        assert_eq!(effective, settings);
    }

    #[test]
    fn test_clamp_to_engine_minimums() {
        let tiny = RunSettings {
            warm_up_time: Duration::ZERO,
            measurement_time: Duration::from_nanos(1),
            sample_size: 1,
        };

        let clamped = tiny.clamped();
        assert_eq!(clamped.warm_up_time, Duration::from_millis(1));
        assert_eq!(clamped.measurement_time, Duration::from_millis(1));
        assert_eq!(clamped.sample_size, MIN_SAMPLE_SIZE);
    }

    #[test]
    fn test_clamp_leaves_valid_settings_alone() {
        let settings = RunSettings::default();
        assert_eq!(settings.clamped(), settings);
    }
}
