//! Built-in rotating file logger plugin.
//!
//! Writes one line per record (a JSON object in structured mode, a
//! `"{timestamp} {LEVEL}: {msg}, k=v"` line otherwise) to a file it owns
//! outright. No process-global logging backend is involved: the handle lives
//! inside the instance, so several file loggers can coexist without
//! contending over shared state.
//!
//! Size-based rotation is active when `max_bytes > 0`: a write that would
//! push the live file past the limit first shifts `file.1 → file.2 → …`,
//! dropping the oldest backup beyond `max_num_files`, then renames the live
//! file to `file.1` and starts fresh.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use chrono::format::{Item, StrftimeItems};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use chassis_core::{
    ConstructionError, LogLevel, LogPlugin, LogRecord, PluginError, SettingsError, SettingsMap,
    resolve_dir,
};

use crate::plugin::contract::Plugin;

/// Registry identifier for the file logger plugin.
pub const FS_LOGGER_PLUGIN_ID: &str = "fs-logger";

// =============================================================================
// Settings
// =============================================================================

/// Settings for [`FsLogger`].
///
/// ```yaml
/// logging:
///   plugins:
///     - plugin_id: fs-logger
///       settings:
///         directory: logs
///         filename: logs.json
///         structured: true
///         max_bytes: 1000000
///         max_num_files: 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FsLoggerSettings {
    /// The working directory relative paths resolve against. Injected from
    /// the configuration; a value in the raw settings section is ignored.
    pub cwd: PathBuf,

    /// Directory holding the log file, resolved against `cwd`.
    pub directory: PathBuf,

    /// Name of the live log file inside `directory`.
    pub filename: String,

    /// Write JSON lines when true, formatted plain text otherwise.
    pub structured: bool,

    /// strftime-style timestamp format. `None` or empty disables timestamps.
    pub timestamp_format: Option<String>,

    /// Records below this level are dropped.
    pub level: LogLevel,

    /// Truncate the live file at construction.
    pub clear: bool,

    /// Maximum live file size in bytes; 0 disables rotation.
    pub max_bytes: u64,

    /// Maximum number of rotated files to keep (must be at least 1 when
    /// rotation is active).
    pub max_num_files: u32,
}

impl Default for FsLoggerSettings {
    fn default() -> Self {
        Self {
            cwd: PathBuf::new(),
            directory: PathBuf::from("logs"),
            filename: "logs.json".to_string(),
            structured: true,
            timestamp_format: Some("%Y-%m-%d %H:%M:%S".to_string()),
            level: LogLevel::Info,
            clear: true,
            max_bytes: 1_000_000,
            max_num_files: 10,
        }
    }
}

// =============================================================================
// FsLogger
// =============================================================================

/// Built-in file-backed logging plugin.
pub struct FsLogger {
    settings: FsLoggerSettings,
    path: PathBuf,
    file: Mutex<File>,
}

impl Plugin for FsLogger {
    type Settings = FsLoggerSettings;

    fn derive_settings(cwd: &Path, raw: &SettingsMap) -> Result<FsLoggerSettings, SettingsError> {
        let mut settings: FsLoggerSettings =
            serde_json::from_value(Value::Object(raw.clone()))?;

        if settings.filename.trim().is_empty() {
            return Err(SettingsError::invalid(
                "'filename' is a required field and cannot be empty",
            ));
        }
        if settings.max_bytes > 0 && settings.max_num_files < 1 {
            return Err(SettingsError::invalid(
                "'max_num_files' must be at least 1 when 'max_bytes' is set",
            ));
        }

        // Normalize an empty format to "no timestamp".
        if settings
            .timestamp_format
            .as_deref()
            .is_some_and(|f| f.trim().is_empty())
        {
            settings.timestamp_format = None;
        }
        if let Some(format) = settings.timestamp_format.as_deref()
            && StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
        {
            return Err(SettingsError::invalid(format!(
                "invalid timestamp format '{format}'"
            )));
        }

        settings.directory = resolve_dir(cwd, &settings.directory, "directory")?;
        settings.cwd = cwd.to_path_buf();
        Ok(settings)
    }

    fn construct(settings: FsLoggerSettings) -> Result<Self, ConstructionError> {
        fs::create_dir_all(&settings.directory)?;
        let path = settings.directory.join(&settings.filename);
        if settings.clear {
            File::create(&path)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            settings,
            path,
            file: Mutex::new(file),
        })
    }
}

impl FsLogger {
    /// The live file this logger appends to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn timestamp(&self) -> Option<String> {
        self.settings
            .timestamp_format
            .as_deref()
            .map(|format| Utc::now().format(format).to_string())
    }

    fn format_structured(&self, record: &LogRecord) -> Result<String, PluginError> {
        let mut object = Map::new();
        if let Some(timestamp) = self.timestamp() {
            object.insert("timestamp".to_string(), Value::String(timestamp));
        }
        object.insert(
            "level".to_string(),
            Value::String(record.level.as_str().to_string()),
        );
        object.insert("msg".to_string(), Value::String(record.message.clone()));
        if let Some(source) = &record.source {
            object.insert("source".to_string(), Value::String(source.clone()));
        }
        // Caller fields are inserted last and win over the standard keys.
        for (key, value) in &record.fields {
            object.insert(key.clone(), value.clone());
        }
        Ok(serde_json::to_string(&Value::Object(object))?)
    }

    fn format_plain(&self, record: &LogRecord) -> String {
        let body = format!(
            "{}: {}{}",
            record.level,
            record.message,
            record.plain_suffix()
        );
        match self.timestamp() {
            Some(timestamp) => format!("{timestamp} {body}"),
            None => body,
        }
    }

    fn backup_path(&self, index: u32) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    /// Shifts backups one slot up, dropping the oldest, and restarts the
    /// live file. Called with the handle lock held.
    fn rotate(&self, file: &mut File) -> io::Result<()> {
        let max = self.settings.max_num_files;
        let oldest = self.backup_path(max);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..max).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        file.flush()?;
        fs::rename(&self.path, self.backup_path(1))?;
        *file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        Ok(())
    }

    fn write_line(&self, line: &str) -> Result<(), PluginError> {
        let mut file = self.file.lock();
        if self.settings.max_bytes > 0 {
            let size = file.metadata()?.len();
            if size > 0 && size + line.len() as u64 + 1 > self.settings.max_bytes {
                self.rotate(&mut file)?;
            }
        }
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;
        file.flush()?;
        Ok(())
    }
}

impl LogPlugin for FsLogger {
    fn log(&self, record: &LogRecord) -> Result<(), PluginError> {
        if record.level < self.settings.level {
            return Ok(());
        }
        let line = if self.settings.structured {
            self.format_structured(record)?
        } else {
            self.format_plain(record)
        };
        self.write_line(&line)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(entries: &[(&str, Value)]) -> SettingsMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn build(cwd: &Path, entries: &[(&str, Value)]) -> FsLogger {
        let settings = FsLogger::derive_settings(cwd, &raw(entries)).unwrap();
        FsLogger::construct(settings).unwrap()
    }

    fn read_lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_structured_line_is_json() {
        let dir = tempfile::tempdir().unwrap();
        let logger = build(dir.path(), &[]);

        let record = LogRecord::with_fields(
            LogLevel::Warning,
            "disk almost full",
            vec![("free_mb".to_string(), json!(12))],
        );
        logger.log(&record).unwrap();

        let lines = read_lines(logger.path());
        assert_eq!(lines.len(), 1);
        let parsed: Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(parsed["level"], "WARNING");
        assert_eq!(parsed["msg"], "disk almost full");
        assert_eq!(parsed["free_mb"], 12);
        assert!(parsed["timestamp"].is_string());
    }

    #[test]
    fn test_plain_format() {
        let dir = tempfile::tempdir().unwrap();
        let logger = build(
            dir.path(),
            &[
                ("structured", json!(false)),
                ("timestamp_format", json!("")),
            ],
        );

        let record = LogRecord::with_fields(
            LogLevel::Error,
            "boom",
            vec![("attempt".to_string(), json!(3))],
        );
        logger.log(&record).unwrap();

        let lines = read_lines(logger.path());
        assert_eq!(lines, vec!["ERROR: boom, attempt=3".to_string()]);
    }

    #[test]
    fn test_level_gating() {
        let dir = tempfile::tempdir().unwrap();
        let logger = build(dir.path(), &[("level", json!("warning"))]);

        logger.log(&LogRecord::new(LogLevel::Info, "dropped")).unwrap();
        logger.log(&LogRecord::new(LogLevel::Error, "kept")).unwrap();

        let lines = read_lines(logger.path());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("kept"));
    }

    #[test]
    fn test_clear_truncates_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let logger = build(dir.path(), &[]);
        logger.log(&LogRecord::new(LogLevel::Info, "old")).unwrap();
        drop(logger);

        let logger = build(dir.path(), &[]);
        assert_eq!(read_lines(logger.path()).len(), 0);
    }

    #[test]
    fn test_rotation_drops_oldest() {
        let dir = tempfile::tempdir().unwrap();
        let logger = build(
            dir.path(),
            &[
                ("structured", json!(false)),
                ("timestamp_format", json!("")),
                ("max_bytes", json!(40)),
                ("max_num_files", json!(2)),
            ],
        );

        for n in 1..=4 {
            let message = format!("line number {n} padded out to length");
            logger.log(&LogRecord::new(LogLevel::Info, message)).unwrap();
        }

        // Live file holds the newest line, two backups at most.
        assert!(read_lines(logger.path()).concat().contains("line number 4"));
        assert!(logger.backup_path(1).exists());
        assert!(logger.backup_path(2).exists());
        assert!(!logger.backup_path(3).exists());
        // The oldest line was dropped entirely.
        let backup_2 = read_lines(&logger.backup_path(2));
        assert!(backup_2.concat().contains("line number 2"));
    }

    #[test]
    fn test_no_rotation_when_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let logger = build(
            dir.path(),
            &[
                ("structured", json!(false)),
                ("timestamp_format", json!("")),
                ("max_bytes", json!(0)),
            ],
        );

        for _ in 0..20 {
            logger
                .log(&LogRecord::new(LogLevel::Info, "a fairly long line of output"))
                .unwrap();
        }
        assert_eq!(read_lines(logger.path()).len(), 20);
        assert!(!logger.backup_path(1).exists());
    }

    #[test]
    fn test_empty_filename_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err =
            FsLogger::derive_settings(dir.path(), &raw(&[("filename", json!("  "))])).unwrap_err();
        assert!(err.to_string().contains("filename"));
    }

    #[test]
    fn test_zero_retention_with_rotation_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsLogger::derive_settings(dir.path(), &raw(&[("max_num_files", json!(0))]))
            .unwrap_err();
        assert!(err.to_string().contains("max_num_files"));
    }

    #[test]
    fn test_negative_size_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err =
            FsLogger::derive_settings(dir.path(), &raw(&[("max_bytes", json!(-1))])).unwrap_err();
        assert!(matches!(err, SettingsError::Deserialize(_)));
    }

    #[test]
    fn test_invalid_level_name_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err =
            FsLogger::derive_settings(dir.path(), &raw(&[("level", json!("loud"))])).unwrap_err();
        assert!(matches!(err, SettingsError::Deserialize(_)));
    }

    #[test]
    fn test_invalid_timestamp_format_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsLogger::derive_settings(dir.path(), &raw(&[("timestamp_format", json!("%Q"))]))
            .unwrap_err();
        assert!(err.to_string().contains("timestamp format"));
    }
}
