//! Scripted transport for testing.
//!
//! `MockTransport` answers every request from a per-URL script and records
//! how many requests were in flight at once, so tests can assert on the
//! concurrency bound of the prober.
//!
//! # Example
//!
//! ```
//! use packmon::transport::{MockReply, MockTransport, Transport};
//!
//! let transport = MockTransport::new()
//!     .reply("http://packs.example/Keil.Missing.pdsc", MockReply::Status(404));
//!
//! let response = transport.get("http://packs.example/Keil.Missing.pdsc").unwrap();
//! assert_eq!(response.status, 404);
//! assert_eq!(transport.request_count(), 1);
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::{Transport, TransportError, TransportResponse};

/// Scripted answer for one URL.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Respond with a status and no headers.
    Status(u16),
    /// Respond with a status and headers.
    WithHeaders(u16, Vec<(String, String)>),
    /// Respond with a status and a body (for `get_text`).
    Body(u16, String),
    /// Respond with a status after an extra delay.
    Slow(u16, Duration),
    /// Fail to connect.
    ConnectError,
    /// Exceed the timeout.
    Timeout,
    /// Panic inside the transport.
    Panic,
}

/// Transport that answers from a script instead of the network.
#[derive(Debug)]
pub struct MockTransport {
    replies: HashMap<String, MockReply>,
    fallback: MockReply,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    requests: Mutex<Vec<String>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Create a transport that answers 200 to every URL.
    pub fn new() -> Self {
        Self {
            replies: HashMap::new(),
            fallback: MockReply::Status(200),
            delay: Duration::ZERO,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Script the reply for a URL.
    pub fn reply(mut self, url: impl Into<String>, reply: MockReply) -> Self {
        self.replies.insert(url.into(), reply);
        self
    }

    /// Reply used for URLs without a scripted answer.
    pub fn fallback(mut self, reply: MockReply) -> Self {
        self.fallback = reply;
        self
    }

    /// Hold every request for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Highest number of requests observed in flight at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// URLs requested so far, in arrival order.
    pub fn requested_urls(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn answer(&self, url: &str) -> Result<(TransportResponse, String), TransportError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        let _guard = InFlightGuard(&self.in_flight);

        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        match self.replies.get(url).unwrap_or(&self.fallback) {
            MockReply::Status(status) => Ok((TransportResponse::with_status(*status), String::new())),
            MockReply::WithHeaders(status, headers) => Ok((
                TransportResponse {
                    status: *status,
                    headers: headers.clone(),
                },
                String::new(),
            )),
            MockReply::Body(status, body) => {
                Ok((TransportResponse::with_status(*status), body.clone()))
            }
            MockReply::Slow(status, delay) => {
                std::thread::sleep(*delay);
                Ok((TransportResponse::with_status(*status), String::new()))
            }
            MockReply::ConnectError => Err(TransportError::Connect("connection refused".into())),
            MockReply::Timeout => Err(TransportError::Timeout),
            MockReply::Panic => panic!("mock transport panicked for {}", url),
        }
    }
}

/// Decrements the in-flight counter even when the reply panics.
struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Transport for MockTransport {
    fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        self.answer(url).map(|(head, _)| head)
    }

    fn get_text(&self, url: &str) -> Result<(TransportResponse, String), TransportError> {
        self.answer(url)
    }
}
