//! The log record passed to every logging plugin.

use serde_json::Value;

use crate::level::LogLevel;

/// A single log event, built once per call and shared with every sink in
/// declaration order.
///
/// The record carries no timestamp; each plugin stamps and formats its own
/// according to its settings, so two sinks with different formats never fight
/// over a shared representation.
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Severity of this record.
    pub level: LogLevel,
    /// The log message.
    pub message: String,
    /// Extra structured fields, in the order the caller supplied them.
    pub fields: Vec<(String, Value)>,
    /// Origin of the message (module, subsystem), when the log service is
    /// configured to attach one.
    pub source: Option<String>,
}

impl LogRecord {
    /// Creates a record with no extra fields.
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            fields: Vec::new(),
            source: None,
        }
    }

    /// Creates a record carrying extra structured fields.
    pub fn with_fields(
        level: LogLevel,
        message: impl Into<String>,
        fields: Vec<(String, Value)>,
    ) -> Self {
        Self {
            level,
            message: message.into(),
            fields,
            source: None,
        }
    }

    /// Renders the `", key=value"` suffix used by plain-text sinks.
    ///
    /// String values render bare (no quotes); everything else renders as
    /// compact JSON. The source, when present, is appended last.
    pub fn plain_suffix(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.fields {
            out.push_str(", ");
            out.push_str(key);
            out.push('=');
            out.push_str(&display_value(value));
        }
        if let Some(source) = &self.source {
            out.push_str(", source=");
            out.push_str(source);
        }
        out
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_suffix_empty() {
        let record = LogRecord::new(LogLevel::Info, "hello");
        assert_eq!(record.plain_suffix(), "");
    }

    #[test]
    fn test_plain_suffix_preserves_order() {
        let record = LogRecord::with_fields(
            LogLevel::Info,
            "hello",
            vec![
                ("b".to_string(), json!("two")),
                ("a".to_string(), json!(1)),
            ],
        );
        assert_eq!(record.plain_suffix(), ", b=two, a=1");
    }

    #[test]
    fn test_plain_suffix_with_source() {
        let mut record = LogRecord::new(LogLevel::Error, "boom");
        record.source = Some("loader".to_string());
        assert_eq!(record.plain_suffix(), ", source=loader");
    }
}
