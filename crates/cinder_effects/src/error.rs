//! # Effects Error Types
//!
//! Recoverable errors only. Broken invariants (freeing a mark that is not
//! active, non-positive mark radius) are caller bugs and panic instead.

use thiserror::Error;

/// Errors that can occur while configuring or feeding the effects core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EffectsError {
    /// Reading a configuration file failed.
    #[error("failed to read config {path}: {reason}")]
    ConfigIo {
        /// Path that was read.
        path: String,
        /// Underlying I/O error text.
        reason: String,
    },

    /// Configuration text is not valid TOML for the expected shape.
    #[error("failed to parse config: {0}")]
    ConfigParse(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A particle-area record is missing a field or has a non-numeric one.
    #[error("malformed particle area: {field} ({reason})")]
    MalformedArea {
        /// Name of the offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}

/// Result type for effects operations.
pub type EffectsResult<T> = Result<T, EffectsError>;
