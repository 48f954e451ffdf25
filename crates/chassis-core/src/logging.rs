//! The logging capability.

use crate::error::PluginError;
use crate::record::LogRecord;

/// Capability trait for logging plugins.
///
/// A logging plugin receives every [`LogRecord`] the log service fans out and
/// renders it to its own sink (a file, the console, a network endpoint).
/// Implementations own their sink outright: there is no shared global logging
/// backend, so two plugin instances never contend over process-wide state.
///
/// Methods take `&self`; implementations that mutate (file handles, buffers)
/// use interior mutability.
pub trait LogPlugin: Send + Sync {
    /// Writes one record to this plugin's sink.
    ///
    /// Returning an error aborts the fan-out for the remaining plugins in the
    /// chain; see `LogService::log` in chassis-runtime.
    fn log(&self, record: &LogRecord) -> Result<(), PluginError>;
}
