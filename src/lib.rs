//! # Outlog
//!
//! A leveled, structured logging facade with level-filtered hooks, pluggable
//! formatters and sinks, and caller attribution.
//!
//! ## Features
//!
//! - **Eight Levels**: `Trace` through `Panic`, with `Success` for
//!   CLI-style status lines
//! - **Hooks**: per-level entry enrichment (caller attribution, blob
//!   offload, or your own)
//! - **Pluggable Output**: text or JSON formatting into console, file, or
//!   custom sinks
//! - **Thread Safe**: every operation takes `&self`; clones share state
//! - **Fire and Forget**: dispatch never returns an error; failures are
//!   counted and reported out of band
//!
//! ## Quick start
//!
//! ```no_run
//! use outlog::prelude::*;
//!
//! let logger = Logger::new();
//! logger.info("service starting");
//! logger.with_field("user", 42).warn("login denied");
//! logger.close().unwrap();
//! ```

pub mod core;
pub mod env;
pub mod formatters;
pub mod global;
pub mod hooks;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Entry, FieldValue, Fields, Formatter, Hook, HookRegistry, Level, Logger, LoggerBuilder,
        LoggerError, Result, Sink, TimestampFormat, WriterSink,
    };
    pub use crate::formatters::{JsonFormatter, TextFormatter};
    pub use crate::hooks::{BlobHook, BlobStore, CallerHook};
    pub use crate::sinks::{ConsoleSink, FileSink};
}

pub use crate::core::{
    caller_name, package_name, short_fn_name, CallerFrame, Entry, ExitHandler, FieldValue, Fields,
    Formatter, Hook, HookRegistry, Level, Logger, LoggerBuilder, LoggerError, LoggerMetrics,
    Result, Sink, StackWalker, TimestampFormat, WriterSink, DEFAULT_FRAME_OFFSET, MAX_CALLER_DEPTH,
};
pub use crate::env::from_env;
pub use crate::formatters::{JsonFormatter, TextFormatter};
pub use crate::hooks::{BlobHook, BlobStore, CallerHook};
pub use crate::sinks::{ConsoleSink, FileSink};
