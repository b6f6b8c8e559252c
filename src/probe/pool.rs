//! Bounded worker pool for descriptor probes.
//!
//! [`ConcurrentProber::run`] spawns at most `limit` worker threads. Workers
//! pull descriptors from a shared queue, issue one GET each and push the
//! classified outcome onto a bounded completion channel. The returned
//! [`ProbeRun`] is the single consumer of that channel, so outcomes are seen
//! in completion order and the failure list needs no locking.
//!
//! The descriptor travels with its request through the whole pipeline: the
//! pool never needs to map a completion back to its input.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crate::error::Result;
use crate::index::PackageDescriptor;
use crate::shutdown::ShutdownSignal;
use crate::transport::Transport;

use super::{Failure, FailureCause, ProbeOutcome};

/// Default number of requests in flight.
pub const DEFAULT_CONCURRENCY: usize = 32;

type WorkQueue = Arc<Mutex<VecDeque<PackageDescriptor>>>;

/// Probes descriptor URLs with bounded parallelism.
pub struct ConcurrentProber {
    transport: Arc<dyn Transport>,
    limit: usize,
    shutdown: ShutdownSignal,
}

impl ConcurrentProber {
    /// Create a prober with the default concurrency limit.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            limit: DEFAULT_CONCURRENCY,
            shutdown: ShutdownSignal::new(),
        }
    }

    /// Set the maximum number of requests in flight. Clamped to at least 1.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Stop starting new requests once `signal` is triggered.
    pub fn with_shutdown(mut self, signal: ShutdownSignal) -> Self {
        self.shutdown = signal;
        self
    }

    /// The concurrency limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Start probing `descriptors`.
    ///
    /// Returns immediately; outcomes are pulled from the returned
    /// [`ProbeRun`]. Fails only if not a single worker thread could be
    /// started.
    pub fn run(&self, descriptors: Vec<PackageDescriptor>) -> Result<ProbeRun> {
        let total = descriptors.len();
        let worker_count = self.limit.min(total);
        let queue: WorkQueue = Arc::new(Mutex::new(descriptors.into()));
        let (tx, rx) = mpsc::sync_channel(self.limit);

        tracing::debug!(total, workers = worker_count, "starting probe run");

        let mut workers = Vec::with_capacity(worker_count);
        for id in 0..worker_count {
            let worker = Worker {
                queue: Arc::clone(&queue),
                transport: Arc::clone(&self.transport),
                outcomes: tx.clone(),
                shutdown: self.shutdown.clone(),
            };
            match thread::Builder::new()
                .name(format!("packmon-probe-{}", id))
                .spawn(move || worker.run())
            {
                Ok(handle) => workers.push(handle),
                Err(err) if workers.is_empty() => return Err(err.into()),
                Err(err) => {
                    tracing::warn!(error = %err, spawned = workers.len(), "could not start all probe workers");
                    break;
                }
            }
        }
        drop(tx);

        Ok(ProbeRun {
            total,
            received: 0,
            outcomes: Some(rx),
            workers,
        })
    }
}

struct Worker {
    queue: WorkQueue,
    transport: Arc<dyn Transport>,
    outcomes: SyncSender<ProbeOutcome>,
    shutdown: ShutdownSignal,
}

impl Worker {
    fn run(self) {
        loop {
            if self.shutdown.is_triggered() {
                break;
            }

            let next = match self.queue.lock() {
                Ok(mut queue) => queue.pop_front(),
                Err(_) => break,
            };
            let Some(descriptor) = next else {
                break;
            };

            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                probe_descriptor(self.transport.as_ref(), &descriptor)
            }))
            .unwrap_or_else(|_| {
                tracing::error!(url = %descriptor.resolved_url(), "probe panicked");
                ProbeOutcome::Failure(
                    Failure::new(descriptor.resolved_url(), FailureCause::ConnectFailed)
                        .with_descriptor(descriptor.clone()),
                )
            });

            if self.outcomes.send(outcome).is_err() {
                // Consumer went away.
                break;
            }
        }
    }
}

/// Issue one GET for a descriptor and classify the result.
pub fn probe_descriptor(transport: &dyn Transport, descriptor: &PackageDescriptor) -> ProbeOutcome {
    let url = descriptor.resolved_url();
    match transport.get(&url) {
        Ok(response) if response.is_ok() => {
            tracing::debug!(url = %url, "ok");
            ProbeOutcome::Success { url }
        }
        Ok(response) => {
            tracing::debug!(url = %url, status = response.status, "unexpected status");
            let cause = FailureCause::HttpError {
                status: response.status,
            };
            ProbeOutcome::Failure(
                Failure::new(url, cause)
                    .with_headers(response.headers)
                    .with_descriptor(descriptor.clone()),
            )
        }
        Err(err) => {
            tracing::debug!(url = %url, error = %err, "request failed");
            ProbeOutcome::Failure(
                Failure::new(url, FailureCause::from(&err)).with_descriptor(descriptor.clone()),
            )
        }
    }
}

/// Outcomes of one probe run, in completion order.
///
/// Finite and not restartable. Dropping the run early stops the workers
/// after their current request and waits for them.
pub struct ProbeRun {
    total: usize,
    received: usize,
    outcomes: Option<Receiver<ProbeOutcome>>,
    workers: Vec<JoinHandle<()>>,
}

impl ProbeRun {
    /// Number of descriptors submitted.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of outcomes yielded so far.
    pub fn completed(&self) -> usize {
        self.received
    }
}

impl Iterator for ProbeRun {
    type Item = ProbeOutcome;

    fn next(&mut self) -> Option<ProbeOutcome> {
        let outcome = self.outcomes.as_ref()?.recv().ok()?;
        self.received += 1;
        Some(outcome)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.total - self.received))
    }
}

impl Drop for ProbeRun {
    fn drop(&mut self) {
        self.outcomes.take();
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}
