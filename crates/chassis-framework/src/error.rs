//! Error types for plugin registration and resolution.

use chassis_core::{ConstructionError, SettingsError};
use thiserror::Error;

/// Errors that can occur while registering or resolving plugins.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// No descriptor is registered under the requested identifier.
    #[error("plugin '{0}' is not registered")]
    PluginNotFound(String),

    /// The identifier is already taken; the first registration wins.
    #[error("plugin '{0}' is already registered")]
    DuplicateRegistration(String),

    /// The resolved instance does not satisfy the capability this factory
    /// hands out.
    #[error("plugin '{identifier}' is not a {expected} plugin")]
    NotAPlugin {
        /// The offending identifier.
        identifier: String,
        /// The capability the factory expected.
        expected: &'static str,
    },

    /// The plugin rejected its raw settings section.
    #[error("failed to load plugin settings for '{identifier}'")]
    Settings {
        /// The plugin whose settings were rejected.
        identifier: String,
        /// The underlying validation failure.
        #[source]
        source: SettingsError,
    },

    /// The plugin's constructor failed.
    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

/// Result type for factory operations.
pub type FactoryResult<T> = Result<T, FactoryError>;
