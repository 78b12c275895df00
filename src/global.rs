//! Process-wide default logger
//!
//! Free functions mirroring the [`Logger`] surface, backed by a single
//! lazily-bound instance, for programs that don't want to thread a logger
//! handle through every call path.

use crate::core::entry::Entry;
use crate::core::error::{LoggerError, Result};
use crate::core::fields::{FieldValue, Fields};
use crate::core::level::Level;
use crate::core::logger::Logger;
use std::sync::OnceLock;

static DEFAULT: OnceLock<Logger> = OnceLock::new();

/// Install `logger` as the process-wide default.
///
/// Fails once anything has bound the default, including an earlier
/// implicit bind from the first wrapper call; install before logging.
pub fn init(logger: Logger) -> Result<()> {
    DEFAULT
        .set(logger)
        .map_err(|_| LoggerError::AlreadyInitialized)
}

/// The process-wide default logger, bound to a stock instance on first use.
pub fn logger() -> &'static Logger {
    DEFAULT.get_or_init(Logger::new)
}

/// Close the process-wide default logger.
pub fn close() -> Result<()> {
    logger().close()
}

pub fn log(level: Level, message: impl Into<String>) {
    logger().log(level, message);
}

#[inline]
pub fn trace(message: impl Into<String>) {
    logger().trace(message);
}

#[inline]
pub fn debug(message: impl Into<String>) {
    logger().debug(message);
}

#[inline]
pub fn info(message: impl Into<String>) {
    logger().info(message);
}

#[inline]
pub fn success(message: impl Into<String>) {
    logger().success(message);
}

#[inline]
pub fn warn(message: impl Into<String>) {
    logger().warn(message);
}

#[inline]
pub fn error(message: impl Into<String>) {
    logger().error(message);
}

/// Log at `Fatal` through the default logger, then exit with code 1.
pub fn fatal(message: impl Into<String>) {
    logger().fatal(message);
}

/// Log at `Panic` through the default logger. Does not unwind.
pub fn panic(message: impl Into<String>) {
    logger().panic(message);
}

/// Bound entry on the default logger with one field.
pub fn with_field(key: impl Into<String>, value: impl Into<FieldValue>) -> Entry {
    logger().with_field(key, value)
}

/// Bound entry on the default logger with every field from `fields`.
pub fn with_fields(fields: Fields) -> Entry {
    logger().with_fields(fields)
}

/// Bound entry on the default logger carrying the error's rendering.
pub fn with_error(error: &dyn std::error::Error) -> Entry {
    logger().with_error(error)
}

/// Set the default logger's minimum severity.
pub fn set_min_level(level: Level) {
    logger().set_min_level(level);
}
