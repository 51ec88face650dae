//! Suite Planner
//!
//! Builds the run plan by filtering and ordering registered suites.
//!
//! Filtering: regex pattern matching on the suite name.
//! Ordering: suites are sorted alphabetically by name, so a run is
//! deterministic regardless of registration (link) order.

use benchseq_core::SuiteDef;

/// Ordered selection of suites to load into one harness.
pub struct SuitePlan {
    /// Suites in run order.
    pub suites: Vec<&'static SuiteDef>,
}

/// Build the run plan from registered suites.
pub fn build_plan(
    suites: impl IntoIterator<Item = &'static SuiteDef>,
    filter: Option<&regex::Regex>,
) -> SuitePlan {
    let mut selected: Vec<_> = suites
        .into_iter()
        .filter(|s| match filter {
            Some(re) => re.is_match(s.name),
            None => true,
        })
        .collect();

    // Sort alphabetically for deterministic run order
    selected.sort_by_key(|s| s.name);

    SuitePlan { suites: selected }
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchseq_core::Harness;

    fn noop(_h: &mut Harness) {}

    static ALPHA: SuiteDef = SuiteDef::new("alpha_ops", noop);
    static BETA: SuiteDef = SuiteDef::new("beta_ops", noop);
    static GAMMA: SuiteDef = SuiteDef::new("gamma_io", noop);

    fn names(plan: &SuitePlan) -> Vec<&str> {
        plan.suites.iter().map(|s| s.name).collect()
    }

    #[test]
    fn test_no_filter_sorts_by_name() {
        let plan = build_plan([&GAMMA, &ALPHA, &BETA], None);
        assert_eq!(names(&plan), ["alpha_ops", "beta_ops", "gamma_io"]);
    }

    #[test]
    fn test_regex_filter() {
        let re = regex::Regex::new("ops$").unwrap();
        let plan = build_plan([&GAMMA, &ALPHA, &BETA], Some(&re));
        assert_eq!(names(&plan), ["alpha_ops", "beta_ops"]);
    }

    #[test]
    fn test_filter_matches_anywhere_in_name() {
        let re = regex::Regex::new("io").unwrap();
        let plan = build_plan([&GAMMA, &ALPHA, &BETA], Some(&re));
        assert_eq!(names(&plan), ["gamma_io"]);
    }

    #[test]
    fn test_no_matches_yields_empty_plan() {
        let re = regex::Regex::new("nonexistent").unwrap();
        let plan = build_plan([&GAMMA, &ALPHA, &BETA], Some(&re));
        assert!(plan.suites.is_empty());
    }
}
