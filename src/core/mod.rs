//! Core logger types and traits

pub mod caller;
pub mod entry;
pub mod error;
pub mod fields;
pub mod formatter;
pub mod hook;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod sink;
pub mod timestamp;

pub use caller::{
    caller_name, package_name, short_fn_name, CallerFrame, StackWalker, DEFAULT_FRAME_OFFSET,
    MAX_CALLER_DEPTH,
};
pub use entry::Entry;
pub use error::{LoggerError, Result};
pub use fields::{FieldValue, Fields};
pub use formatter::Formatter;
pub use hook::{Hook, HookRegistry};
pub use level::Level;
pub use logger::{ExitHandler, Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use sink::{Sink, WriterSink};
pub use timestamp::TimestampFormat;
