//! Human-readable text format
//!
//! Example: `[2025-01-08T10:30:45.123Z] [INFO   ] Request processed user_id=123`

use crate::core::entry::Entry;
use crate::core::error::Result;
use crate::core::fields::FieldValue;
use crate::core::formatter::Formatter;
use crate::core::timestamp::TimestampFormat;
use colored::Colorize;
use std::borrow::Cow;
use std::fmt::Write as _;

/// Renders one entry per line: bracketed timestamp, padded level tag,
/// message, then `key=value` fields in key order and an optional
/// `error="..."` tail.
///
/// Newlines, carriage returns, and tabs inside the message and string field
/// values are escaped so an entry can never span lines.
///
/// # Examples
///
/// ```
/// use outlog::{Entry, Formatter, Level, TextFormatter};
///
/// let formatter = TextFormatter::new();
/// let entry = Entry::new(Level::Info, "ready").with_field("port", 8080);
/// let line = formatter.format(&entry).unwrap();
/// assert!(String::from_utf8(line).unwrap().contains("port=8080"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    timestamp_format: TimestampFormat,
    color: bool,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Colorize the level tag by severity. Off by default; color output
    /// still honors the terminal detection of the process.
    #[must_use = "builder methods return a new value"]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

impl Formatter for TextFormatter {
    fn format(&self, entry: &Entry) -> Result<Vec<u8>> {
        let timestamp = self.timestamp_format.format(&entry.timestamp);
        // Pad before coloring so the escape codes don't break the column
        let tag = format!("{:7}", entry.level.to_str());
        let tag = if self.color {
            tag.color(entry.level.color_code()).to_string()
        } else {
            tag
        };

        let mut line = format!("[{}] [{}] {}", timestamp, tag, escape_inline(&entry.message));

        for (key, value) in &entry.fields {
            let _ = write!(line, " {}={}", key, render_value(value));
        }

        if let Some(error) = &entry.error {
            let _ = write!(
                line,
                " error=\"{}\"",
                escape_inline(&error.replace('\\', "\\\\").replace('"', "\\\""))
            );
        }

        line.push('\n');
        Ok(line.into_bytes())
    }
}

fn render_value(value: &FieldValue) -> String {
    match value {
        FieldValue::String(s) => render_string(s),
        other => other.to_string(),
    }
}

/// Quote a string value when it would be ambiguous bare (spaces, quotes,
/// or `=` inside), then escape control characters.
fn render_string(value: &str) -> String {
    let rendered = if value.contains(' ') || value.contains('"') || value.contains('=') {
        format!(
            "\"{}\"",
            value.replace('\\', "\\\\").replace('"', "\\\"")
        )
    } else {
        value.to_string()
    };
    escape_inline(&rendered).into_owned()
}

fn escape_inline(value: &str) -> Cow<'_, str> {
    if !value.contains(|c| matches!(c, '\n' | '\r' | '\t')) {
        return Cow::Borrowed(value);
    }
    Cow::Owned(
        value
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t"),
    )
}
