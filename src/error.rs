//! Error types for packmon operations.
//!
//! This module defines [`PackmonError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Request failures carry a classified [`Failure`] so callers can report
//!   them alongside probe failures
//! - Per-descriptor probe failures are never errors; they are outcomes
//! - Use `anyhow::Error` (via `PackmonError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

use crate::probe::Failure;

/// Core error type for packmon operations.
#[derive(Debug, Error)]
pub enum PackmonError {
    /// A request for the pack index did not produce a usable document.
    #[error("Request failed: {0}")]
    RequestFailed(Failure),

    /// Configuration file not found at the given location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for packmon operations.
pub type Result<T> = std::result::Result<T, PackmonError>;
