//! Concurrent reachability checks for pack descriptors.
//!
//! - [`outcome`] - Classified results ([`ProbeOutcome`], [`Failure`], [`FailureCause`])
//! - [`pool`] - The bounded worker pool ([`ConcurrentProber`], [`ProbeRun`])
//! - [`observer`] - The per-outcome hook used for progress display
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use packmon::index::PackageDescriptor;
//! use packmon::probe::ConcurrentProber;
//! use packmon::transport::{MockReply, MockTransport};
//!
//! let transport = MockTransport::new()
//!     .reply("http://packs.example/Keil.Gone.pdsc", MockReply::Status(404));
//! let prober = ConcurrentProber::new(Arc::new(transport)).with_limit(4);
//!
//! let descriptors = vec![
//!     PackageDescriptor::new("http://packs.example/", "Keil", "Gone", "1.0.0"),
//!     PackageDescriptor::new("http://packs.example/", "Keil", "Here", "1.0.0"),
//! ];
//! let failures = prober
//!     .run(descriptors)
//!     .unwrap()
//!     .filter(|outcome| !outcome.is_success())
//!     .count();
//! assert_eq!(failures, 1);
//! ```

pub mod observer;
pub mod outcome;
pub mod pool;

pub use observer::{NoopObserver, ProbeObserver};
pub use outcome::{Failure, FailureCause, ProbeOutcome};
pub use pool::{probe_descriptor, ConcurrentProber, ProbeRun, DEFAULT_CONCURRENCY};
