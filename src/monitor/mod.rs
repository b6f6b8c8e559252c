//! Repeated index checks.
//!
//! - [`RunLoop`] drives fetch, filter, probe and report cycles
//! - [`CycleLog`] appends a record of each cycle to a log file

pub mod log;
pub mod run_loop;

pub use log::CycleLog;
pub use run_loop::{CycleOutcome, LoopExit, RunLoop};

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Format used for every console and log timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Render `time` with [`TIMESTAMP_FORMAT`].
pub fn format_timestamp<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn timestamps_have_microseconds() {
        let time = NaiveDate::from_ymd_opt(2021, 5, 6)
            .unwrap()
            .and_hms_micro_opt(9, 35, 21, 42)
            .unwrap()
            .and_utc();
        assert_eq!(format_timestamp(&time), "2021-05-06 09:35:21.000042");
        assert_eq!(format_timestamp(&Utc::now()).len(), 26);
    }
}
