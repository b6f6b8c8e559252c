//! Resolved monitor settings.

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;
use crate::error::{PackmonError, Result};
use crate::filter::{VendorSet, DEFAULT_VENDOR};
use crate::index::DEFAULT_INDEX_URL;
use crate::probe::DEFAULT_CONCURRENCY;
use crate::transport::DEFAULT_TIMEOUT;
use crate::ui::OutputMode;

use super::{load_config, ConfigFile};

/// Upper bound for `jobs`.
pub const MAX_JOBS: usize = 256;

/// Upper bound for the per-request timeout, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Everything the monitor needs to run, after layering and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSettings {
    /// Pause between cycles; zero means a single cycle.
    pub interval: Duration,
    pub log: Option<PathBuf>,
    pub vendors: VendorSet,
    pub mode: OutputMode,
    pub jobs: usize,
    pub timeout: Duration,
    pub index_url: String,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            interval: Duration::ZERO,
            log: None,
            vendors: VendorSet::default(),
            mode: OutputMode::Normal,
            jobs: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
            index_url: DEFAULT_INDEX_URL.to_string(),
        }
    }
}

impl MonitorSettings {
    /// Load the config file named by `--config`, if any, and resolve.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config file");
                Some(load_config(path)?)
            }
            None => None,
        };
        Self::resolve(cli, file.as_ref())
    }

    /// Layer `cli` over `file` over the defaults.
    pub fn resolve(cli: &Cli, file: Option<&ConfigFile>) -> Result<Self> {
        let file = file.cloned().unwrap_or_default();

        let vendors = if !cli.vendors.is_empty() {
            cli.vendors.clone()
        } else {
            file.vendors.unwrap_or_else(|| vec![DEFAULT_VENDOR.to_string()])
        };
        let vendors = VendorSet::new(vendors);
        if vendors.is_empty() {
            return Err(invalid("vendors must name at least one vendor or '*'"));
        }

        let jobs = cli
            .jobs
            .map(usize::from)
            .or(file.jobs)
            .unwrap_or(DEFAULT_CONCURRENCY);
        if jobs == 0 || jobs > MAX_JOBS {
            return Err(invalid(format!("jobs must be between 1 and {}, got {}", MAX_JOBS, jobs)));
        }

        let timeout = match cli.timeout.or(file.timeout) {
            Some(0) => return Err(invalid("timeout must be at least 1 second")),
            Some(secs) if secs > MAX_TIMEOUT_SECS => {
                return Err(invalid(format!(
                    "timeout must be at most {} seconds, got {}",
                    MAX_TIMEOUT_SECS, secs
                )))
            }
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_TIMEOUT,
        };

        let index_url = cli
            .index_url
            .clone()
            .or(file.index_url)
            .unwrap_or_else(|| DEFAULT_INDEX_URL.to_string());
        if index_url.trim().is_empty() {
            return Err(invalid("index_url must not be empty"));
        }

        Ok(Self {
            interval: Duration::from_secs(cli.interval.or(file.interval).unwrap_or(0)),
            log: cli.log.clone().or(file.log),
            vendors,
            mode: OutputMode::from_quiet(cli.quiet || file.quiet.unwrap_or(false)),
            jobs,
            timeout,
            index_url,
        })
    }

    /// Whether the monitor stops after one cycle.
    pub fn runs_once(&self) -> bool {
        self.interval.is_zero()
    }
}

fn invalid(message: impl Into<String>) -> PackmonError {
    PackmonError::InvalidConfig {
        message: message.into(),
    }
}
