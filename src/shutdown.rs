//! Process interruption.
//!
//! A [`ShutdownSignal`] is a shared flag set by the Ctrl+C handler. The
//! prober checks it before starting each request and the run loop checks it
//! while sleeping between cycles. In-flight requests are never cancelled.

use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Shared "stop now" flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    triggered: Arc<AtomicBool>,
}

impl ShutdownSignal {
    /// Create an untriggered signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a signal triggered by Ctrl+C.
    ///
    /// Can only be called once per process; `ctrlc` refuses a second handler.
    pub fn install() -> Result<Self> {
        let signal = Self::new();
        let handler_signal = signal.clone();
        ctrlc::set_handler(move || {
            handler_signal.trigger();
        })
        .context("Failed to set signal handler")?;
        Ok(signal)
    }

    /// Request shutdown.
    pub fn trigger(&self) {
        self.triggered.store(true, Ordering::SeqCst);
    }

    /// Whether shutdown was requested.
    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// Sleep for `duration`, waking early on shutdown.
    ///
    /// Returns `true` if the full duration elapsed. A duration too long to
    /// represent as a deadline sleeps until shutdown.
    pub fn sleep(&self, duration: Duration) -> bool {
        let deadline = Instant::now().checked_add(duration);
        loop {
            if self.is_triggered() {
                return false;
            }
            let pause = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return true;
                    }
                    POLL_INTERVAL.min(deadline - now)
                }
                None => POLL_INTERVAL,
            };
            std::thread::sleep(pause);
        }
    }
}
