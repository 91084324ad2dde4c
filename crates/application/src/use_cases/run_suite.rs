//! Run Suite Use Case
//!
//! Runs an ordered list of test cases, one at a time, and collects a report.

use std::sync::Arc;

use probe_domain::{Category, RunReport, TestCase};
use tracing::{info, warn};

use super::RunCase;
use crate::ports::{Clock, HttpClient};

/// Use case for running a declared sequence of cases.
///
/// Cases run strictly in the given order and never overlap; a failing case
/// does not stop the ones after it.
pub struct RunSuite<C: HttpClient, K: Clock> {
    run_case: RunCase<C>,
    clock: Arc<K>,
    category: Option<Category>,
}

impl<C: HttpClient, K: Clock> RunSuite<C, K> {
    /// Creates a suite runner that runs every case.
    pub const fn new(run_case: RunCase<C>, clock: Arc<K>) -> Self {
        Self {
            run_case,
            clock,
            category: None,
        }
    }

    /// Restricts the run to cases of one category.
    #[must_use]
    pub const fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    /// Runs `cases` in order and returns the report.
    pub async fn run(&self, cases: &[TestCase]) -> RunReport {
        let selected: Vec<&TestCase> = cases
            .iter()
            .filter(|case| self.category.is_none_or(|c| c == case.category))
            .collect();

        let base = self.run_case.base().to_string();
        info!(base = %base, cases = selected.len(), "starting run");

        let started_at = self.clock.now();
        let mut reports = Vec::with_capacity(selected.len());
        for case in selected {
            reports.push(self.run_case.run(case).await);
        }
        let finished_at = self.clock.now();

        let report = RunReport::new(base, started_at, finished_at, reports);
        if report.all_passed() {
            info!(total = report.total, "all cases passed");
        } else {
            warn!(
                total = report.total,
                failed = report.failed,
                "run finished with failures"
            );
        }

        report
    }
}
