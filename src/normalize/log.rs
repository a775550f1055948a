use super::first_string;
use serde::Serialize;
use serde_json::{Map, Value};

const MESSAGE_KEYS: &[&str] = &["message", "msg", "text"];
const ENVELOPE_KEYS: &[&str] = &["queue", "logs", "entries"];
const PAYLOAD_KEYS: &[&str] = &["string", "payload", "data"];
/// Top-level keys of a combined dump. Such an object is a valid log source
/// with no entries of its own.
const SECTION_KEYS: &[&str] = &["settings", "totalUsers", "totalMessages", "statistics"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    /// Numeric log levels: below 30 is info, 30 to 39 warn, 40 and up error.
    pub fn from_level(level: i64) -> Self {
        match level {
            l if l >= 40 => Severity::Error,
            l if l >= 30 => Severity::Warn,
            _ => Severity::Info,
        }
    }

    fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "error" | "fatal" | "critical" | "err" => Severity::Error,
            "warn" | "warning" => Severity::Warn,
            _ => Severity::Info,
        }
    }

    fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(number)) => number
                .as_i64()
                .or_else(|| number.as_f64().map(|level| level as i64))
                .map(Self::from_level)
                .unwrap_or(Severity::Info),
            Some(Value::String(text)) => match text.trim().parse::<i64>() {
                Ok(level) => Self::from_level(level),
                Err(_) => Self::from_label(text),
            },
            _ => Severity::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub severity: Severity,
    pub message: String,
}

/// Accepts an envelope (`{"queue": [{"string": "<encoded record>"}]}`), a
/// bare array of records, or one record object. Records without a
/// recognisable message are dropped. A combined dump without an envelope
/// yields an empty log.
pub fn normalize(value: &Value) -> Option<Vec<LogRecord>> {
    match value {
        Value::Array(items) => Some(items.iter().filter_map(record_from_value).collect()),
        Value::Object(object) => {
            if let Some(entries) = ENVELOPE_KEYS
                .iter()
                .find_map(|key| object.get(*key).and_then(Value::as_array))
            {
                return Some(entries.iter().filter_map(envelope_entry).collect());
            }
            if let Some(record) = record_from_object(object) {
                return Some(vec![record]);
            }
            if SECTION_KEYS.iter().any(|key| object.contains_key(*key)) {
                return Some(Vec::new());
            }
            None
        }
        _ => None,
    }
}

fn envelope_entry(entry: &Value) -> Option<LogRecord> {
    let object = match entry {
        Value::Object(object) => object,
        Value::String(encoded) => return record_from_encoded(encoded),
        _ => return None,
    };
    let payload = PAYLOAD_KEYS.iter().find_map(|key| object.get(*key));
    match payload {
        Some(Value::String(encoded)) => record_from_encoded(encoded),
        Some(Value::Object(inner)) => record_from_object(inner),
        _ => record_from_object(object),
    }
}

fn record_from_encoded(encoded: &str) -> Option<LogRecord> {
    match serde_json::from_str::<Value>(encoded) {
        Ok(Value::Object(inner)) => record_from_object(&inner),
        _ => {
            let message = encoded.trim();
            if message.is_empty() {
                None
            } else {
                Some(LogRecord {
                    severity: Severity::Info,
                    message: message.to_string(),
                })
            }
        }
    }
}

fn record_from_value(value: &Value) -> Option<LogRecord> {
    match value {
        Value::Object(object) => record_from_object(object),
        _ => None,
    }
}

fn record_from_object(object: &Map<String, Value>) -> Option<LogRecord> {
    let message = first_string(object, MESSAGE_KEYS)?;
    Some(LogRecord {
        severity: Severity::from_value(object.get("level")),
        message,
    })
}
