//! Log entries: copy-on-extend bags of leveled, structured context

use crate::core::fields::{FieldValue, Fields};
use crate::core::level::Level;
use crate::core::logger::Logger;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A single log event: level, message, timestamp, structured fields, and an
/// optional error and request context.
///
/// Entries never mutate in place. Every `with_*` method returns a new entry
/// carrying the receiver's accumulated data plus the addition, so concurrent
/// callers can extend a shared base entry without locks and without observing
/// each other's derivations.
///
/// Entries obtained from [`Logger::with_field`] and friends stay bound to
/// their logger and expose the leveled methods as chain terminators:
///
/// ```no_run
/// use outlog::Logger;
///
/// let logger = Logger::new();
/// logger.with_field("user", 7).warn("login denied");
/// ```
///
/// Entries built directly with [`Entry::new`] (useful for exercising hooks
/// and formatters in isolation) are inert: their leveled methods drop the
/// call.
#[derive(Clone, Serialize)]
pub struct Entry {
    #[serde(skip)]
    logger: Option<Logger>,
    pub level: Level,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub fields: Fields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Opaque request/cancellation context, passed through to hooks untouched.
    #[serde(skip)]
    pub context: Option<Arc<dyn Any + Send + Sync>>,
    #[serde(skip)]
    pub(crate) time_fixed: bool,
}

impl Entry {
    /// Create a standalone entry with the current time and no fields.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            logger: None,
            level,
            message: message.into(),
            timestamp: Utc::now(),
            fields: Fields::new(),
            error: None,
            context: None,
            time_fixed: false,
        }
    }

    /// Create an empty entry bound to `logger` so chain terminators dispatch.
    pub(crate) fn bound(logger: Logger) -> Self {
        Self {
            logger: Some(logger),
            level: Level::default(),
            message: String::new(),
            timestamp: Utc::now(),
            fields: Fields::new(),
            error: None,
            context: None,
            time_fixed: false,
        }
    }

    /// New entry with one field added; the receiver is unchanged.
    #[must_use]
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<FieldValue>) -> Entry {
        let mut next = self.clone();
        next.fields.set(key, value);
        next
    }

    /// New entry with every field from `fields` added, overwriting shared
    /// keys; the receiver is unchanged.
    #[must_use]
    pub fn with_fields(&self, fields: Fields) -> Entry {
        let mut next = self.clone();
        next.fields.merge(&fields);
        next
    }

    /// New entry with the error's `Display` rendering attached.
    #[must_use]
    pub fn with_error(&self, error: &dyn std::error::Error) -> Entry {
        let mut next = self.clone();
        next.error = Some(error.to_string());
        next
    }

    /// New entry carrying an opaque context handle for hooks.
    #[must_use]
    pub fn with_context(&self, context: Arc<dyn Any + Send + Sync>) -> Entry {
        let mut next = self.clone();
        next.context = Some(context);
        next
    }

    /// New entry with a pinned timestamp. Without this, the timestamp is
    /// stamped when the entry is dispatched, not when the chain was built.
    #[must_use]
    pub fn with_time(&self, timestamp: DateTime<Utc>) -> Entry {
        let mut next = self.clone();
        next.timestamp = timestamp;
        next.time_fixed = true;
        next
    }

    /// Dispatch this entry through the owning logger at `level`.
    ///
    /// Inert on entries that are not bound to a logger.
    pub fn log(&self, level: Level, message: impl Into<String>) {
        if let Some(logger) = &self.logger {
            logger.log_from(self, level, message.into());
        }
    }

    pub fn trace(&self, message: impl Into<String>) {
        self.log(Level::Trace, message);
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.log(Level::Success, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.log(Level::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }

    /// Log at `Fatal`, then invoke the owning logger's exit handler.
    ///
    /// Like [`Logger::fatal`], the exit fires even when the line itself was
    /// filtered out. Inert on unbound entries.
    pub fn fatal(&self, message: impl Into<String>) {
        if let Some(logger) = &self.logger {
            logger.log_from(self, Level::Fatal, message.into());
            logger.exit(1);
        }
    }

    /// Log at `Panic`, the highest severity. Does not unwind.
    pub fn panic(&self, message: impl Into<String>) {
        self.log(Level::Panic, message);
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("level", &self.level)
            .field("message", &self.message)
            .field("timestamp", &self.timestamp)
            .field("fields", &self.fields)
            .field("error", &self.error)
            .field("has_context", &self.context.is_some())
            .finish()
    }
}
