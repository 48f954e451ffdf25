//! The multiplexing log service.

use chassis_core::{LogLevel, LogPlugin, LogRecord, PluginError};
use serde_json::Value;

/// Fans every record out to an ordered set of logging plugin instances
/// behind one call surface.
///
/// Plugins are invoked in configuration declaration order. A failure in one
/// plugin propagates immediately and halts the remaining plugins, so wiring
/// problems surface loudly instead of being half-swallowed. Hosts wanting
/// isolation can wrap individual sinks before registration.
pub struct LogService {
    sinks: Vec<Box<dyn LogPlugin>>,
    log_source: bool,
}

impl LogService {
    pub(crate) fn new(sinks: Vec<Box<dyn LogPlugin>>, log_source: bool) -> Self {
        Self { sinks, log_source }
    }

    /// Logs a message with extra structured fields.
    pub fn log(
        &self,
        level: LogLevel,
        message: &str,
        fields: &[(&str, Value)],
    ) -> Result<(), PluginError> {
        self.dispatch(self.record(level, message, fields, None))
    }

    /// Logs a message attributed to `source`.
    ///
    /// The source lands in the record only when the configuration enables
    /// `logging.log_source`; otherwise it is dropped here.
    pub fn log_from(
        &self,
        source: &str,
        level: LogLevel,
        message: &str,
        fields: &[(&str, Value)],
    ) -> Result<(), PluginError> {
        self.dispatch(self.record(level, message, fields, Some(source)))
    }

    /// Logs a debug message.
    pub fn debug(&self, message: &str) -> Result<(), PluginError> {
        self.log(LogLevel::Debug, message, &[])
    }

    /// Logs an info message.
    pub fn info(&self, message: &str) -> Result<(), PluginError> {
        self.log(LogLevel::Info, message, &[])
    }

    /// Logs a warning message.
    pub fn warning(&self, message: &str) -> Result<(), PluginError> {
        self.log(LogLevel::Warning, message, &[])
    }

    /// Logs an error message.
    pub fn error(&self, message: &str) -> Result<(), PluginError> {
        self.log(LogLevel::Error, message, &[])
    }

    /// Logs a critical message.
    pub fn critical(&self, message: &str) -> Result<(), PluginError> {
        self.log(LogLevel::Critical, message, &[])
    }

    /// Returns the number of composed sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    fn record(
        &self,
        level: LogLevel,
        message: &str,
        fields: &[(&str, Value)],
        source: Option<&str>,
    ) -> LogRecord {
        let mut record = LogRecord::with_fields(
            level,
            message,
            fields
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
        );
        if self.log_source {
            record.source = source.map(str::to_string);
        }
        record
    }

    fn dispatch(&self, record: LogRecord) -> Result<(), PluginError> {
        for sink in &self.sinks {
            sink.log(&record)?;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
