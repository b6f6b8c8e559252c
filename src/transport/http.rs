//! Blocking HTTP transport built on reqwest.

use anyhow::{Context, Result};
use reqwest::blocking::{Client, Response};
use std::time::Duration;

use super::{Transport, TransportError, TransportResponse};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Performs requests with one shared connection pool.
///
/// The underlying client is cheap to share: every probe worker borrows the
/// same instance and each request is independent.
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport with the default 30-second timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a transport with a custom per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("packmon/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, timeout })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn send(&self, url: &str) -> Result<Response, TransportError> {
        tracing::debug!(url, "GET");
        self.client.get(url).send().map_err(classify)
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let response = self.send(url)?;
        Ok(response_head(&response))
    }

    fn get_text(&self, url: &str) -> Result<(TransportResponse, String), TransportError> {
        let response = self.send(url)?;
        let head = response_head(&response);
        let body = response.text().map_err(classify)?;
        Ok((head, body))
    }
}

fn response_head(response: &Response) -> TransportResponse {
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            let value = value
                .to_str()
                .map(String::from)
                .unwrap_or_else(|_| String::from_utf8_lossy(value.as_bytes()).into_owned());
            (name.as_str().to_string(), value)
        })
        .collect();

    TransportResponse {
        status: response.status().as_u16(),
        headers,
    }
}

/// Map a reqwest error onto the transport taxonomy.
///
/// Timeouts are checked first: reqwest also flags a timed-out connect as a
/// connect error.
fn classify(err: reqwest::Error) -> TransportError {
    let err = err.without_url();
    let message = err.to_string();
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_builder() {
        TransportError::InvalidRequest(message)
    } else if err.is_body() || err.is_decode() {
        TransportError::Body(message)
    } else {
        TransportError::Connect(message)
    }
}
