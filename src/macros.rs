//! Logger-first logging macros
//!
//! Each macro takes the logger as its first argument and builds the message
//! with `format!`, so call sites pass a format string and arguments directly
//! instead of assembling the `String` themselves.
//!
//! # Examples
//!
//! ```
//! use outlog::prelude::*;
//! use outlog::{info, warn};
//!
//! let logger = Logger::new();
//! let port = 8080;
//! info!(logger, "listening on port {}", port);
//! warn!(logger, "connection pool at {}% capacity", 85);
//! ```

/// Dispatch a formatted message at an explicit [`Level`](crate::Level).
///
/// The leveled macros below are the usual spelling; this one serves call
/// sites that carry the level as a value.
///
/// # Examples
///
/// ```
/// # use outlog::prelude::*;
/// # let logger = Logger::new();
/// use outlog::log;
///
/// let level = Level::Warn;
/// log!(logger, level, "disk {} above {}% usage", "/dev/sda1", 90);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log at `Trace`, the lowest severity.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Trace, $($arg)+)
    };
}

/// Log at `Debug`.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Log at `Info`.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log at `Success`, the status severity between `Info` and `Warn`.
///
/// # Examples
///
/// ```
/// # use outlog::prelude::*;
/// # let logger = Logger::new();
/// use outlog::success;
///
/// success!(logger, "migrated {} rows", 12_000);
/// ```
#[macro_export]
macro_rules! success {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Success, $($arg)+)
    };
}

/// Log at `Warn`.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warn, $($arg)+)
    };
}

/// Log at `Error`.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Log at `Fatal` through [`Logger::fatal`](crate::Logger::fatal), which
/// runs the configured exit handler after the write attempt.
///
/// # Examples
///
/// ```no_run
/// # use outlog::prelude::*;
/// # let logger = Logger::new();
/// use outlog::fatal;
///
/// fatal!(logger, "unable to recover: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal(format!($($arg)+))
    };
}
