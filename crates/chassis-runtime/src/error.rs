//! Runtime error types.

use chassis_core::PluginError;
use chassis_framework::FactoryError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while bootstrapping the service container.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Configuration loading or validation failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A plugin could not be resolved.
    #[error(transparent)]
    Factory(#[from] FactoryError),

    /// A plugin operation failed during container construction.
    #[error(transparent)]
    Plugin(#[from] PluginError),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
