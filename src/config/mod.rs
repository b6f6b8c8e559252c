//! Configuration loading and resolution for packmon.
//!
//! Settings come from three layers, later ones winning:
//! 1. Built-in defaults
//! 2. An optional YAML file given with `--config` ([`file`])
//! 3. Command-line flags and environment variables
//!
//! [`MonitorSettings`] is the resolved and validated result.
//!
//! # Example
//!
//! ```
//! use packmon::config::{ConfigFile, MonitorSettings};
//! use packmon::cli::Cli;
//! use clap::Parser;
//!
//! let file: ConfigFile = serde_yaml::from_str("interval: 600\nvendors: [ARM]").unwrap();
//! let cli = Cli::parse_from(["packmon", "--quiet"]);
//!
//! let settings = MonitorSettings::resolve(&cli, Some(&file)).unwrap();
//! assert_eq!(settings.interval.as_secs(), 600);
//! assert!(settings.vendors.matches("arm"));
//! ```

pub mod file;
pub mod settings;

pub use file::{load_config, ConfigFile};
pub use settings::{MonitorSettings, MAX_JOBS, MAX_TIMEOUT_SECS};
