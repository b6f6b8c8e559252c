//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.
//!
//! Settings flags are `Option`s so an absent flag falls through to the
//! config file and then to the built-in default.

use clap::{ArgAction, Parser};
use clap_complete::Shell;
use std::path::PathBuf;

/// Monitor a pack index and report pack descriptors that cannot be fetched.
#[derive(Debug, Parser)]
#[command(name = "packmon")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Seconds between checks; 0 checks once and exits
    #[arg(short, long, value_name = "SECONDS")]
    pub interval: Option<u64>,

    /// Append results to this log file
    #[arg(short, long, value_name = "LOGFILE")]
    pub log: Option<PathBuf>,

    /// Vendors to monitor; `*` selects all
    #[arg(short, long, value_name = "VENDOR", num_args = 1.., action = ArgAction::Append)]
    pub vendors: Vec<String>,

    /// Print only progress and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Maximum number of requests in flight
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..=256))]
    pub jobs: Option<u16>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Location of the pack index
    #[arg(long, value_name = "URL", env = "PACKMON_INDEX_URL")]
    pub index_url: Option<String>,

    /// Path to a YAML config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}
