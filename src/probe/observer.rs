//! Hook for watching outcomes as they arrive.

use super::ProbeOutcome;

/// Receives probe outcomes in completion order.
///
/// The interactive progress bar and the plain line writer both implement
/// this, so a single pass over a [`ProbeRun`](super::ProbeRun) drives
/// whichever presentation is active.
pub trait ProbeObserver {
    /// Called once before the first outcome with the number of requests.
    fn probe_started(&mut self, _total: usize) {}

    /// Called for every outcome as it is received.
    fn outcome_observed(&mut self, outcome: &ProbeOutcome);

    /// Called once after the last outcome.
    fn probe_finished(&mut self) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ProbeObserver for NoopObserver {
    fn outcome_observed(&mut self, _outcome: &ProbeOutcome) {}
}
