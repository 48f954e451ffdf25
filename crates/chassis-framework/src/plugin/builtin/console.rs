//! Built-in console logger plugin.
//!
//! Writes `"{name} {LEVEL}: {msg}, k=v"` lines to a per-instance sink:
//! stdout by default, any writer via [`ConsoleLogger::with_writer`]. The sink
//! is owned by the instance, so tests and multiple console loggers never
//! contend over shared global state.

use std::io::{self, Write};
use std::path::Path;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use chassis_core::{
    ConstructionError, LogPlugin, LogRecord, PluginError, SettingsError, SettingsMap,
};

use crate::plugin::contract::Plugin;

/// Registry identifier for the console logger plugin.
pub const CONSOLE_PLUGIN_ID: &str = "console";

/// Settings for [`ConsoleLogger`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    /// Prefix printed before every line.
    pub name: String,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            name: "Console".to_string(),
        }
    }
}

/// Built-in console logging plugin.
pub struct ConsoleLogger {
    name: String,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleLogger {
    /// Creates a console logger writing to an explicit sink instead of
    /// stdout.
    pub fn with_writer(settings: ConsoleSettings, writer: Box<dyn Write + Send>) -> Self {
        Self {
            name: settings.name,
            writer: Mutex::new(writer),
        }
    }
}

impl Plugin for ConsoleLogger {
    type Settings = ConsoleSettings;

    fn derive_settings(_cwd: &Path, raw: &SettingsMap) -> Result<ConsoleSettings, SettingsError> {
        Ok(serde_json::from_value(Value::Object(raw.clone()))?)
    }

    fn construct(settings: ConsoleSettings) -> Result<Self, ConstructionError> {
        Ok(Self::with_writer(settings, Box::new(io::stdout())))
    }
}

impl LogPlugin for ConsoleLogger {
    fn log(&self, record: &LogRecord) -> Result<(), PluginError> {
        let mut writer = self.writer.lock();
        writeln!(
            writer,
            "{} {}: {}{}",
            self.name,
            record.level,
            record.message,
            record.plain_suffix()
        )?;
        writer.flush()?;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chassis_core::LogLevel;
    use serde_json::json;

    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    #[test]
    fn test_line_format() {
        let buffer = SharedBuffer::default();
        let logger =
            ConsoleLogger::with_writer(ConsoleSettings::default(), Box::new(buffer.clone()));

        let record = LogRecord::with_fields(
            LogLevel::Info,
            "ready",
            vec![("port".to_string(), json!(8080))],
        );
        logger.log(&record).unwrap();

        assert_eq!(buffer.contents(), "Console INFO: ready, port=8080\n");
    }

    #[test]
    fn test_custom_name_from_settings() {
        let dir = tempfile::tempdir().unwrap();
        let mut raw = SettingsMap::new();
        raw.insert("name".to_string(), json!("App"));
        let settings = ConsoleLogger::derive_settings(dir.path(), &raw).unwrap();

        let buffer = SharedBuffer::default();
        let logger = ConsoleLogger::with_writer(settings, Box::new(buffer.clone()));
        logger.log(&LogRecord::new(LogLevel::Error, "boom")).unwrap();

        assert_eq!(buffer.contents(), "App ERROR: boom\n");
    }
}
