//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration path exists as neither a file nor a directory.
    #[error("invalid configuration path: {0}")]
    InvalidPath(PathBuf),

    /// An explicitly named configuration file is absent.
    #[error("configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// Failed to read the configuration file or resolve a path.
    #[error("failed to read configuration: {0}")]
    Read(#[from] std::io::Error),

    /// The configuration file content is malformed.
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// The merged configuration violates a constraint.
    #[error("invalid configuration: {message}")]
    Validation {
        /// Description of the violated constraint.
        message: String,
    },

    /// A required field is absent after merging all layers.
    #[error("missing required configuration field: {field}")]
    MissingField {
        /// The missing field.
        field: String,
    },
}

impl ConfigError {
    /// Creates a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
