//! Pack index retrieval and parsing.
//!
//! - [`descriptor`] - The `pdsc` entries listed by the index
//! - [`parse`] - XML parsing of the `.pidx` document
//! - [`source`] - Fetching the index over a [`Transport`](crate::transport::Transport)

pub mod descriptor;
pub mod parse;
pub mod source;

pub use descriptor::PackageDescriptor;
pub use parse::{parse_index, IndexParseError};
pub use source::{HttpIndexSource, IndexSource, DEFAULT_INDEX_URL};

use chrono::{DateTime, FixedOffset};

/// The parsed contents of one index fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSnapshot {
    timestamp: DateTime<FixedOffset>,
    descriptors: Vec<PackageDescriptor>,
}

impl IndexSnapshot {
    /// Create a snapshot from its parts.
    pub fn new(timestamp: DateTime<FixedOffset>, descriptors: Vec<PackageDescriptor>) -> Self {
        Self {
            timestamp,
            descriptors,
        }
    }

    /// Publication time stated by the index.
    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Descriptors in document order.
    pub fn descriptors(&self) -> &[PackageDescriptor] {
        &self.descriptors
    }

    /// Number of descriptors listed.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Consume the snapshot, keeping only the descriptors.
    pub fn into_descriptors(self) -> Vec<PackageDescriptor> {
        self.descriptors
    }
}
