//! Error types for trace generation.
//!
//! This module provides comprehensive error handling for the ethertrace library.
//! All errors implement the `std::error::Error` trait and include structured
//! context identifying the offending configuration field or output target.
//!
//! ## Error Categories
//!
//! - **Configuration Errors**: Unreadable profile sources or unparseable values
//! - **Size Errors**: Frame sizes too small for the mandatory Ethernet fields
//! - **Hex Errors**: Profile fields that fail to decode as hex octets
//! - **Sink Errors**: Failures writing trace words to the output
//!
//! ## No Retries
//!
//! Every error is a deterministic function of the static configuration, so
//! retrying without changing input cannot succeed. `is_config_defect` tells
//! callers whether fixing the profile (rather than the environment) is the
//! remedy:
//!
//! ```rust
//! use ethertrace::TraceError;
//!
//! let error = TraceError::size_error(25, 26);
//! assert!(error.is_config_defect());
//! ```
//!
//! ## Helper Constructors
//!
//! Use helper methods for common error scenarios:
//!
//! ```rust
//! use ethertrace::TraceError;
//! use std::path::PathBuf;
//!
//! let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
//! let config_error = TraceError::configuration(PathBuf::from("/path/to/profile.cfg"), io_err);
//!
//! let hex_error = TraceError::malformed_hex("destAddress", "odd number of hex digits");
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for trace operations.
pub type Result<T, E = TraceError> = std::result::Result<T, E>;

/// Main error type for trace generation.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TraceError {
    #[error("Configuration source error: {path}")]
    Configuration {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration value error for key '{key}': {details}")]
    ConfigValue { key: String, details: String },

    #[error("Frame size {frame_size} leaves no room for mandatory fields (minimum {minimum})")]
    Size { frame_size: u32, minimum: u32 },

    #[error("Field '{field}' is not valid hex: {details}")]
    MalformedHex { field: String, details: String },

    #[error("Trace sink error: {context}")]
    Sink {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl TraceError {
    /// Returns whether this error is a defect in the traffic profile itself.
    ///
    /// Config defects can only be remedied by editing the profile; sink errors
    /// are the one category caused by the environment instead.
    pub fn is_config_defect(&self) -> bool {
        match self {
            TraceError::Configuration { .. } => true,
            TraceError::ConfigValue { .. } => true,
            TraceError::Size { .. } => true,
            TraceError::MalformedHex { .. } => true,
            TraceError::Sink { .. } => false,
        }
    }

    /// Helper constructor for configuration source errors with path context.
    pub fn configuration(path: PathBuf, source: std::io::Error) -> Self {
        TraceError::Configuration { path, source }
    }

    /// Helper constructor for unparseable configuration values.
    pub fn config_value(key: impl Into<String>, details: impl Into<String>) -> Self {
        TraceError::ConfigValue { key: key.into(), details: details.into() }
    }

    /// Helper constructor for frame size errors.
    pub fn size_error(frame_size: u32, minimum: u32) -> Self {
        TraceError::Size { frame_size, minimum }
    }

    /// Helper constructor for malformed hex fields.
    pub fn malformed_hex(field: impl Into<String>, details: impl Into<String>) -> Self {
        TraceError::MalformedHex { field: field.into(), details: details.into() }
    }

    /// Helper constructor for sink write failures.
    pub fn sink_error(context: impl Into<String>, source: std::io::Error) -> Self {
        TraceError::Sink { context: context.into(), source }
    }
}

impl From<std::io::Error> for TraceError {
    fn from(err: std::io::Error) -> Self {
        TraceError::Sink { context: "trace output".to_string(), source: err }
    }
}
