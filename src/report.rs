//! Aggregation of probe outcomes into a per-cycle failure report.

use std::collections::BTreeMap;
use std::fmt;

use crate::probe::{Failure, ProbeObserver, ProbeOutcome, ProbeRun};

/// Failures of one cycle, in the order they completed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailureReport {
    failures: Vec<Failure>,
    probed: usize,
}

impl FailureReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report holding a single failure that happened before any probing,
    /// such as an unreachable index.
    pub fn from_failure(failure: Failure) -> Self {
        Self {
            failures: vec![failure],
            probed: 0,
        }
    }

    /// Consume every outcome and keep the failures.
    pub fn summarize<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = ProbeOutcome>,
    {
        let mut report = Self::new();
        for outcome in outcomes {
            report.record(outcome);
        }
        report
    }

    /// Add one outcome.
    pub fn record(&mut self, outcome: ProbeOutcome) {
        self.probed += 1;
        match outcome {
            ProbeOutcome::Success { .. } => {}
            ProbeOutcome::Failure(failure) => self.failures.push(failure),
        }
    }

    /// Failures in completion order.
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Number of outcomes recorded.
    pub fn probed_count(&self) -> usize {
        self.probed
    }

    pub fn success_count(&self) -> usize {
        self.probed.saturating_sub(self.failures.len())
    }

    /// Whether nothing failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failure counts keyed by cause label.
    pub fn cause_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for failure in &self.failures {
            *counts.entry(failure.cause().label()).or_insert(0) += 1;
        }
        counts
    }

    /// Summary counts for display.
    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            probed: self.probed,
            succeeded: self.success_count(),
            failed: self.failure_count(),
        }
    }
}

/// Consume a probe run to completion, notifying `observer` of each outcome.
pub fn summarize_run(run: ProbeRun, observer: &mut dyn ProbeObserver) -> FailureReport {
    observer.probe_started(run.total());
    let report = FailureReport::summarize(run.inspect(|outcome| observer.outcome_observed(outcome)));
    observer.probe_finished();
    report
}

/// Headline numbers of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub probed: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} checked, {} ok, {} failed",
            self.probed, self.succeeded, self.failed
        )
    }
}
