//! Packmon - pack index availability monitor.
//!
//! Packmon fetches a CMSIS pack index, keeps the entries of the vendors
//! being monitored and checks that every listed pack descriptor can be
//! downloaded. Unreachable descriptors are reported on the console and
//! optionally appended to a log file, once or at a fixed interval.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Config file loading and settings resolution
//! - [`error`] - Error types and result aliases
//! - [`filter`] - Vendor selection
//! - [`index`] - Pack index model, parsing and retrieval
//! - [`monitor`] - The check loop and its log file
//! - [`probe`] - Concurrent descriptor probing and outcome classification
//! - [`report`] - Per-cycle failure reports
//! - [`shutdown`] - Ctrl+C handling
//! - [`transport`] - HTTP access behind a mockable trait
//! - [`ui`] - Console output and progress display
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use packmon::filter::VendorSet;
//! use packmon::index::PackageDescriptor;
//! use packmon::probe::ConcurrentProber;
//! use packmon::report::FailureReport;
//! use packmon::transport::{MockReply, MockTransport};
//!
//! let transport = MockTransport::new()
//!     .reply("http://packs.example/Keil.Gone.pdsc", MockReply::Status(404));
//! let descriptors = VendorSet::default().filter(&[
//!     PackageDescriptor::new("http://packs.example", "Keil", "Gone", "1.0.0"),
//!     PackageDescriptor::new("http://packs.example", "Keil", "Here", "1.0.0"),
//! ]);
//!
//! let run = ConcurrentProber::new(Arc::new(transport)).run(descriptors).unwrap();
//! let report = FailureReport::summarize(run);
//! assert_eq!(report.failure_count(), 1);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod index;
pub mod monitor;
pub mod probe;
pub mod report;
pub mod shutdown;
pub mod transport;
pub mod ui;

pub use error::{PackmonError, Result};
