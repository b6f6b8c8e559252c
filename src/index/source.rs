//! Fetching the pack index.

use std::sync::Arc;

use crate::error::{PackmonError, Result};
use crate::probe::{Failure, FailureCause};
use crate::transport::Transport;

use super::{parse_index, IndexSnapshot};

/// Location of the public CMSIS pack index.
pub const DEFAULT_INDEX_URL: &str = "http://www.keil.com/pack/index.pidx";

/// Something that can produce a fresh [`IndexSnapshot`].
pub trait IndexSource {
    /// URL the index is read from. Used to label failures.
    fn url(&self) -> &str;

    /// Fetch and parse the index.
    ///
    /// Makes exactly one request. Every failure is reported as
    /// [`PackmonError::RequestFailed`] carrying the classified cause; there
    /// are no retries.
    fn fetch(&self) -> Result<IndexSnapshot>;
}

/// Reads the index over HTTP.
pub struct HttpIndexSource {
    url: String,
    transport: Arc<dyn Transport>,
}

impl HttpIndexSource {
    /// Create a source reading `url` through `transport`.
    pub fn new(url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            url: url.into(),
            transport,
        }
    }

    fn failed(&self, cause: FailureCause) -> PackmonError {
        PackmonError::RequestFailed(Failure::new(&self.url, cause))
    }
}

impl IndexSource for HttpIndexSource {
    fn url(&self) -> &str {
        &self.url
    }

    fn fetch(&self) -> Result<IndexSnapshot> {
        let (head, body) = self.transport.get_text(&self.url).map_err(|err| {
            tracing::debug!(url = %self.url, error = %err, "index request failed");
            self.failed(FailureCause::from(&err))
        })?;

        tracing::debug!(status = head.status, "pack index response");
        if !head.is_ok() {
            let cause = FailureCause::HttpError {
                status: head.status,
            };
            return Err(PackmonError::RequestFailed(
                Failure::new(&self.url, cause).with_headers(head.headers),
            ));
        }

        parse_index(&body).map_err(|err| {
            tracing::warn!(url = %self.url, error = %err, "unusable pack index");
            self.failed(FailureCause::InvalidData)
        })
    }
}
