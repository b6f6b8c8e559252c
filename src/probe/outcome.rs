//! Classified results of a single request.

use std::fmt;

use crate::index::PackageDescriptor;
use crate::transport::TransportError;

/// Why a request did not produce an HTTP 200.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FailureCause {
    /// The connection could not be established.
    ConnectFailed,
    /// The request did not complete within the timeout.
    Timeout,
    /// A response arrived with a status other than 200.
    HttpError { status: u16 },
    /// The request or the returned document could not be interpreted.
    InvalidData,
}

impl FailureCause {
    /// Stable upper-case label used in console and log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ConnectFailed => "CONNECT_FAILED",
            Self::Timeout => "REQUEST_TIMEOUT",
            Self::HttpError { .. } => "HTTP_ERROR",
            Self::InvalidData => "INVALID_DATA",
        }
    }

    /// HTTP status carried by the cause, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpError { status } => Some(*status),
            Self::ConnectFailed | Self::Timeout | Self::InvalidData => None,
        }
    }
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HttpError { status } => write!(f, "HTTP {}", status),
            other => f.write_str(other.label()),
        }
    }
}

impl From<&TransportError> for FailureCause {
    fn from(err: &TransportError) -> Self {
        match err {
            TransportError::Connect(_) => Self::ConnectFailed,
            TransportError::Timeout => Self::Timeout,
            TransportError::InvalidRequest(_) | TransportError::Body(_) => Self::InvalidData,
        }
    }
}

/// A request that failed, with whatever diagnostics were available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    url: String,
    cause: FailureCause,
    headers: Vec<(String, String)>,
    descriptor: Option<PackageDescriptor>,
}

impl Failure {
    /// Create a failure for `url` with no headers or descriptor attached.
    pub fn new(url: impl Into<String>, cause: FailureCause) -> Self {
        Self {
            url: url.into(),
            cause,
            headers: Vec::new(),
            descriptor: None,
        }
    }

    /// Attach the response headers of a non-200 response.
    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }

    /// Attach the descriptor the request was made for.
    pub fn with_descriptor(mut self, descriptor: PackageDescriptor) -> Self {
        self.descriptor = Some(descriptor);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn cause(&self) -> FailureCause {
        self.cause
    }

    /// HTTP status of the response, when one was received.
    pub fn status(&self) -> Option<u16> {
        self.cause.status()
    }

    /// Response headers kept for diagnostics. Empty unless a response arrived.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn descriptor(&self) -> Option<&PackageDescriptor> {
        self.descriptor.as_ref()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.url, self.cause)
    }
}

/// Result of probing one descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The descriptor URL answered with HTTP 200.
    Success { url: String },
    /// The descriptor URL could not be confirmed.
    Failure(Failure),
}

impl ProbeOutcome {
    /// URL the outcome refers to.
    pub fn url(&self) -> &str {
        match self {
            Self::Success { url } => url,
            Self::Failure(failure) => failure.url(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The failure, if this outcome is one.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Success { .. } => None,
            Self::Failure(failure) => Some(failure),
        }
    }
}
