//! HTTP transport used for the index fetch and the descriptor probes.
//!
//! The [`Transport`] trait is the seam between the checking logic and the
//! network:
//! - [`HttpTransport`] performs real requests with a shared blocking client
//! - [`MockTransport`] answers from a script, for tests
//!
//! Both are shared read-only across probe workers, hence the `Send + Sync`
//! bound.

pub mod http;
pub mod mock;

pub use http::{HttpTransport, DEFAULT_TIMEOUT};
pub use mock::{MockReply, MockTransport};

use thiserror::Error;

/// A request that produced no usable response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Connection could not be established (DNS, refused, reset, TLS).
    #[error("connection failed: {0}")]
    Connect(String),

    /// The request exceeded its timeout.
    #[error("request timed out")]
    Timeout,

    /// The request could not be built, usually a malformed URL.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The response body could not be read or decoded.
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Status line and headers of a received response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers in the order received.
    pub headers: Vec<(String, String)>,
}

impl TransportResponse {
    /// Response with a status and no headers.
    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
        }
    }

    /// Whether this is the 200 the checker requires.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Performs single-attempt GET requests.
pub trait Transport: Send + Sync {
    /// Issue a GET and return the response status and headers.
    ///
    /// The body is not read.
    fn get(&self, url: &str) -> Result<TransportResponse, TransportError>;

    /// Issue a GET and read the whole body as text.
    fn get_text(&self, url: &str) -> Result<(TransportResponse, String), TransportError>;
}
