//! Machine-readable JSON format
//!
//! Example: `{"level":"INFO","message":"Request processed","timestamp":1736332245}`

use crate::core::entry::Entry;
use crate::core::error::Result;
use crate::core::formatter::Formatter;
use crate::core::timestamp::TimestampFormat;

/// Keys the formatter itself owns; colliding field names are emitted under a
/// `fields.` prefix so structured data never clobbers the envelope.
const RESERVED_KEYS: [&str; 4] = ["timestamp", "level", "message", "error"];

/// Renders one entry per line as a flat JSON object: the envelope keys
/// (`timestamp`, `level`, `message`, optional `error`) plus every field
/// flattened to the top level.
///
/// Timestamps default to numeric Unix seconds; string formats from
/// [`TimestampFormat`] render as JSON strings instead.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    timestamp_format: TimestampFormat,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self {
            timestamp_format: TimestampFormat::Unix,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, entry: &Entry) -> Result<Vec<u8>> {
        let mut object = serde_json::Map::new();

        object.insert(
            "timestamp".to_string(),
            self.timestamp_format.json_value(&entry.timestamp),
        );
        object.insert(
            "level".to_string(),
            serde_json::Value::String(entry.level.to_str().to_string()),
        );
        object.insert(
            "message".to_string(),
            serde_json::Value::String(entry.message.clone()),
        );

        for (key, value) in &entry.fields {
            let key = if RESERVED_KEYS.contains(&key.as_str()) {
                format!("fields.{}", key)
            } else {
                key.clone()
            };
            object.insert(key, value.to_json_value());
        }

        if let Some(error) = &entry.error {
            object.insert(
                "error".to_string(),
                serde_json::Value::String(error.clone()),
            );
        }

        let mut bytes = serde_json::to_vec(&serde_json::Value::Object(object))?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}
