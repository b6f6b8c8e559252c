//! Append-only cycle log.
//!
//! ```text
//! 2021-05-06 09:35:21.123456: Started checking index
//! 2021-05-06 09:35:40.654321: 2 failures
//!     404 http://packs.example/Keil.Gone.pdsc
//!         Content-Type: text/html
//!     CONNECT_FAILED http://down.example/Keil.Other.pdsc
//! 2021-05-06 09:35:40.654400: Finished checking index
//! ```

use anyhow::Context;
use chrono::{DateTime, Local};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::error::Result;
use crate::probe::Failure;
use crate::report::FailureReport;

use super::format_timestamp;

/// Writer for the cycle log.
///
/// Every record is flushed as soon as it is written so the file can be
/// followed while the monitor runs.
pub struct CycleLog<W: Write = File> {
    out: W,
}

impl CycleLog<File> {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        Ok(Self::new(file))
    }
}

impl<W: Write> CycleLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn cycle_started(&mut self, now: &DateTime<Local>) -> io::Result<()> {
        self.line(now, "Started checking index")
    }

    /// Write the failure count and one entry per failure.
    pub fn report(&mut self, now: &DateTime<Local>, report: &FailureReport) -> io::Result<()> {
        if report.is_clean() {
            return self.line(now, "No failures!");
        }

        writeln!(self.out, "{}: {} failures", format_timestamp(now), report.failure_count())?;
        for failure in report.failures() {
            self.failure(failure)?;
        }
        self.out.flush()
    }

    pub fn cycle_finished(&mut self, now: &DateTime<Local>) -> io::Result<()> {
        self.line(now, "Finished checking index")
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, now: &DateTime<Local>, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}: {}", format_timestamp(now), text)?;
        self.out.flush()
    }

    fn failure(&mut self, failure: &Failure) -> io::Result<()> {
        match failure.status() {
            Some(status) => writeln!(self.out, "    {} {}", status, failure.url())?,
            None => writeln!(self.out, "    {} {}", failure.cause().label(), failure.url())?,
        }
        for (key, value) in failure.headers() {
            writeln!(self.out, "        {}: {}", key, value)?;
        }
        Ok(())
    }
}
