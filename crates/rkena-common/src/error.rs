//! Error types for Rkena MMA.
//!
//! The simulation itself is infallible; these cover configuration and I/O at
//! the edges.

use thiserror::Error;

/// Top-level error type for Rkena operations.
#[derive(Debug, Error)]
pub enum RkenaError {
    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Invalid balance or engine configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A single field holds an unusable value
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Field name
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// Relative ordering between related values is broken
    #[error("ordering violated: {0}")]
    Ordering(String),

    /// Config text could not be parsed
    #[error("failed to parse config: {0}")]
    Parse(String),
}

impl ConfigError {
    /// Shorthand for [`ConfigError::InvalidValue`].
    #[must_use]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type alias for Rkena operations.
pub type RkenaResult<T> = Result<T, RkenaError>;
