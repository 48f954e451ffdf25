//! Unified error types for the chassis core.
//!
//! This module provides the error types shared across core components.
//! Factory-level errors (registration, resolution) are defined in
//! chassis-framework; configuration errors in chassis-runtime.

use thiserror::Error;

// =============================================================================
// Log Level Errors
// =============================================================================

/// A log level name that matches none of the known levels.
#[derive(Debug, Clone, Error)]
#[error("invalid log level '{0}'")]
pub struct InvalidLogLevelError(pub String);

// =============================================================================
// Settings Errors
// =============================================================================

/// Errors produced while deriving a plugin's typed settings from its raw
/// settings section.
///
/// Settings derivation is pure, so these errors never involve I/O.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The raw section does not deserialize into the plugin's settings shape
    /// (unknown type, negative size, wrong structure).
    #[error("malformed plugin settings: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// A settings constraint was violated.
    #[error("invalid plugin settings: {message}")]
    Invalid {
        /// Description of the violated constraint.
        message: String,
    },

    /// A log level field named an unknown level.
    #[error(transparent)]
    Level(#[from] InvalidLogLevelError),
}

impl SettingsError {
    /// Creates a constraint-violation error with the given message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

// =============================================================================
// Construction Errors
// =============================================================================

/// Errors produced while constructing a plugin instance from validated
/// settings.
///
/// Construction is where side effects happen (directory and file creation),
/// so these are I/O failures.
#[derive(Debug, Error)]
pub enum ConstructionError {
    /// An I/O operation failed during construction.
    #[error("plugin construction failed: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Plugin Operation Errors
// =============================================================================

/// Errors produced by a live plugin instance while servicing a call
/// (log write, cache read/write).
#[derive(Debug, Error)]
pub enum PluginError {
    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be serialized for a structured sink.
    #[error("failed to encode log record: {0}")]
    Encode(#[from] serde_json::Error),
}
