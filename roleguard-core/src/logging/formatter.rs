//! Log line formatting for the installed logger

use chrono::{DateTime, Utc};

/// How log lines should be formatted
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogFormat {
    /// Example: 2024-01-15 10:30:00.123 INFO  [roleguard_core::settings] Settings saved
    Human,

    /// Example: {"timestamp":"2024-01-15T10:30:00Z","level":"INFO","target":"...","message":"..."}
    Json,
}

impl LogFormat {
    /// Parse the configured format name; unknown names fall back to `Human`
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Human,
        }
    }

    /// Format one log line
    pub fn format_line(
        &self,
        timestamp: DateTime<Utc>,
        level: log::Level,
        target: &str,
        message: &str,
    ) -> String {
        match self {
            LogFormat::Human => format_human(timestamp, level, target, message),
            LogFormat::Json => format_json(timestamp, level, target, message),
        }
    }
}

fn format_human(timestamp: DateTime<Utc>, level: log::Level, target: &str, message: &str) -> String {
    format!(
        "{} {:5} [{}] {}",
        timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
        level.as_str(),
        target,
        message
    )
}

fn format_json(timestamp: DateTime<Utc>, level: log::Level, target: &str, message: &str) -> String {
    let mut json = serde_json::Map::new();
    json.insert("timestamp".to_string(), serde_json::Value::String(timestamp.to_rfc3339()));
    json.insert("level".to_string(), serde_json::Value::String(level.as_str().to_string()));
    json.insert("target".to_string(), serde_json::Value::String(target.to_string()));
    json.insert("message".to_string(), serde_json::Value::String(message.to_string()));

    serde_json::to_string(&json).unwrap_or_else(|_| "Failed to serialize log entry".to_string())
}
