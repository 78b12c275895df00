//! Logger core: dispatch pipeline, lifecycle, and builder

use crate::core::entry::Entry;
use crate::core::error::Result;
use crate::core::fields::{FieldValue, Fields};
use crate::core::formatter::Formatter;
use crate::core::hook::{Hook, HookRegistry};
use crate::core::level::Level;
use crate::core::metrics::LoggerMetrics;
use crate::core::sink::Sink;
use crate::formatters::TextFormatter;
use crate::hooks::CallerHook;
use crate::sinks::ConsoleSink;
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Process-exit side effect invoked by the named fatal entry points.
/// Injectable so tests can observe fatal output without terminating.
pub type ExitHandler = Arc<dyn Fn(i32) + Send + Sync>;

/// A leveled, structured logger dispatching through hooks to a sink.
///
/// `Logger` is cheap to clone: clones share the same sink, hook registry,
/// minimum level, and metrics. Every method takes `&self`, so one instance
/// can be used from any number of threads without external locking.
///
/// A logger made with [`Logger::new`] defers its defaults: the first use,
/// whether a logging call or a configuration call, binds a stderr sink and
/// registers the caller hook, exactly once even under concurrent first calls.
/// [`Logger::builder`] produces a fully-configured instance instead, with no
/// implicit hooks.
///
/// # Examples
///
/// ```no_run
/// use outlog::{Level, Logger};
///
/// let logger = Logger::new();
/// logger.info("service starting");
/// logger.set_min_level(Level::Warn);
/// logger.with_field("port", 8080).warn("bind retry");
/// logger.close().unwrap();
/// ```
#[derive(Clone)]
pub struct Logger {
    min_level: Arc<RwLock<Level>>,
    formatter: Arc<RwLock<Arc<dyn Formatter>>>,
    sink: Arc<Mutex<Option<Box<dyn Sink>>>>,
    hooks: Arc<RwLock<HookRegistry>>,
    metrics: Arc<LoggerMetrics>,
    init: Arc<OnceLock<()>>,
    closed: Arc<AtomicBool>,
    exit_handler: ExitHandler,
}

impl Logger {
    /// Create a logger with deferred defaults.
    pub fn new() -> Self {
        Self {
            min_level: Arc::new(RwLock::new(Level::Debug)),
            formatter: Arc::new(RwLock::new(
                Arc::new(TextFormatter::new()) as Arc<dyn Formatter>
            )),
            sink: Arc::new(Mutex::new(None)),
            hooks: Arc::new(RwLock::new(HookRegistry::new())),
            metrics: Arc::new(LoggerMetrics::new()),
            init: Arc::new(OnceLock::new()),
            closed: Arc::new(AtomicBool::new(false)),
            exit_handler: Arc::new(|code| std::process::exit(code)),
        }
    }

    /// Start building an explicitly-configured logger.
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Log a message at `level`.
    ///
    /// Fire-and-forget: filtered, dropped, and failed writes are recorded in
    /// [`Logger::metrics`] and on the diagnostic channel, never returned.
    pub fn log(&self, level: Level, message: impl Into<String>) {
        if self.closed.load(Ordering::Acquire) {
            self.metrics.record_dropped();
            return;
        }
        if level < *self.min_level.read() {
            self.metrics.record_filtered();
            return;
        }
        self.ensure_init();
        let mut entry = Entry::new(level, message.into());
        self.dispatch(&mut entry);
    }

    /// Dispatch a bound entry chain at `level`. The base entry is cloned;
    /// the clone is restamped with the dispatch time unless `with_time`
    /// pinned it.
    pub(crate) fn log_from(&self, base: &Entry, level: Level, message: String) {
        if self.closed.load(Ordering::Acquire) {
            self.metrics.record_dropped();
            return;
        }
        if level < *self.min_level.read() {
            self.metrics.record_filtered();
            return;
        }
        self.ensure_init();
        let mut entry = base.clone();
        entry.level = level;
        entry.message = message;
        if !entry.time_fixed {
            entry.timestamp = Utc::now();
        }
        self.dispatch(&mut entry);
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(Level::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    #[inline]
    pub fn success(&self, message: impl Into<String>) {
        self.log(Level::Success, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(Level::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }

    /// Log at `Fatal`, then invoke the exit handler with code 1.
    ///
    /// The exit fires after the dispatch attempt returns, even when the line
    /// was filtered out or the logger is closed.
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(Level::Fatal, message);
        self.exit(1);
    }

    /// Log at `Panic`, the highest severity. Does not unwind.
    #[inline]
    pub fn panic(&self, message: impl Into<String>) {
        self.log(Level::Panic, message);
    }

    /// Invoke the configured exit handler.
    pub fn exit(&self, code: i32) {
        (self.exit_handler)(code);
    }

    /// An empty entry bound to this logger.
    pub fn entry(&self) -> Entry {
        Entry::bound(self.clone())
    }

    /// Bound entry with one field; finish the chain with a leveled method.
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<FieldValue>) -> Entry {
        self.entry().with_field(key, value)
    }

    /// Bound entry with every field from `fields`.
    pub fn with_fields(&self, fields: Fields) -> Entry {
        self.entry().with_fields(fields)
    }

    /// Bound entry carrying the error's `Display` rendering.
    pub fn with_error(&self, error: &dyn std::error::Error) -> Entry {
        self.entry().with_error(error)
    }

    /// Bound entry carrying an opaque context handle for hooks.
    pub fn with_context(&self, context: Arc<dyn Any + Send + Sync>) -> Entry {
        self.entry().with_context(context)
    }

    /// Bound entry with a pinned timestamp.
    pub fn with_time(&self, timestamp: DateTime<Utc>) -> Entry {
        self.entry().with_time(timestamp)
    }

    /// Set the minimum severity; entries below it are filtered before hooks
    /// fire and before formatting.
    pub fn set_min_level(&self, level: Level) {
        self.ensure_init();
        *self.min_level.write() = level;
    }

    pub fn min_level(&self) -> Level {
        *self.min_level.read()
    }

    /// Whether a call at `level` would currently be dispatched.
    pub fn is_level_enabled(&self, level: Level) -> bool {
        !self.closed.load(Ordering::Acquire) && level >= *self.min_level.read()
    }

    /// Swap the formatter. In-flight dispatches finish with the one they
    /// already snapshotted.
    pub fn set_formatter(&self, formatter: impl Formatter + 'static) {
        self.ensure_init();
        *self.formatter.write() = Arc::new(formatter);
    }

    /// Swap the sink. The previous sink is dropped unclosed; close it first
    /// if it holds resources beyond its `Drop`.
    pub fn set_sink(&self, sink: impl Sink + 'static) {
        self.ensure_init();
        *self.sink.lock() = Some(Box::new(sink));
    }

    /// Register a hook under every level it reports, after any existing
    /// hooks at those levels.
    pub fn add_hook(&self, hook: Arc<dyn Hook>) {
        self.ensure_init();
        self.hooks.write().register(hook);
    }

    /// Atomically swap the whole hook registry, returning the previous one.
    /// Useful for snapshotting and restoring hook configuration. On a
    /// deferred instance the defaults materialize before the swap, so the
    /// default caller hook can only land in the outgoing registry and the
    /// installed one is final.
    pub fn replace_hooks(&self, hooks: HookRegistry) -> HookRegistry {
        self.ensure_init();
        std::mem::replace(&mut *self.hooks.write(), hooks)
    }

    /// Flush the sink's buffered output.
    pub fn flush(&self) -> Result<()> {
        if let Some(sink) = self.sink.lock().as_mut() {
            sink.flush()
        } else {
            Ok(())
        }
    }

    /// Close the logger: exactly one caller releases the sink; everyone else
    /// (including repeat calls) observes an Ok no-op. Logging after close is
    /// silently dropped and counted.
    pub fn close(&self) -> Result<()> {
        if self
            .closed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(());
        }
        let sink = self.sink.lock().take();
        match sink {
            Some(mut sink) => sink.close(),
            None => Ok(()),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Dispatch counters shared by all clones of this logger.
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Materialize the deferred defaults exactly once: bind a stderr sink if
    /// none was set and register the caller hook. Logging calls and the
    /// configuration mutators all run this before touching state, so an
    /// explicit configuration is never overwritten by a later lazy default.
    fn ensure_init(&self) {
        self.init.get_or_init(|| {
            {
                let mut sink = self.sink.lock();
                if sink.is_none() {
                    *sink = Some(Box::new(ConsoleSink::stderr()));
                }
            }
            self.hooks.write().register(Arc::new(CallerHook::new()));
            self.metrics.record_initialization();
        });
    }

    fn dispatch(&self, entry: &mut Entry) {
        self.fire_hooks(entry);

        let formatter = Arc::clone(&*self.formatter.read());
        let bytes = match formatter.format(entry) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.metrics.record_write_failure();
                eprintln!("[OUTLOG ERROR] Formatter failed: {}", err);
                return;
            }
        };

        let mut guard = self.sink.lock();
        let Some(sink) = guard.as_mut() else {
            // Sink raced away between the closed check and here
            self.metrics.record_dropped();
            return;
        };
        let outcome =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.write_all(&bytes)));
        match outcome {
            Ok(Ok(())) => {
                self.metrics.record_logged();
            }
            Ok(Err(err)) => {
                self.metrics.record_write_failure();
                eprintln!("[OUTLOG ERROR] Sink write failed: {}", err);
            }
            Err(payload) => {
                self.metrics.record_write_failure();
                eprintln!(
                    "[OUTLOG CRITICAL] Sink panicked during write: {}",
                    panic_message(payload.as_ref())
                );
            }
        }
    }

    /// Fire the hooks registered for the entry's level, in registration
    /// order. The registry lock is released before the first hook runs, so
    /// hooks doing blocking I/O never hold up registry writers or other
    /// dispatchers. A failing or panicking hook is reported and counted;
    /// the remaining hooks and the line itself still proceed.
    fn fire_hooks(&self, entry: &mut Entry) {
        let hooks = self.hooks.read().hooks_for(entry.level);
        for hook in hooks {
            let outcome =
                std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| hook.fire(entry)));
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    self.metrics.record_hook_failure();
                    eprintln!("[OUTLOG ERROR] Hook failed: {}", err);
                }
                Err(payload) => {
                    self.metrics.record_hook_failure();
                    eprintln!(
                        "[OUTLOG CRITICAL] Hook panicked: {}",
                        panic_message(payload.as_ref())
                    );
                }
            }
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Builder for an explicitly-configured [`Logger`].
///
/// Unset slots fall back to the stock defaults (stderr sink, text formatter,
/// minimum level `Debug`); unlike the deferred path, no hooks are registered
/// implicitly.
///
/// # Examples
///
/// ```
/// use outlog::{Level, Logger, WriterSink};
///
/// let logger = Logger::builder()
///     .min_level(Level::Info)
///     .sink(WriterSink::new(Vec::new()))
///     .build();
/// logger.info("configured");
/// ```
pub struct LoggerBuilder {
    min_level: Level,
    formatter: Option<Arc<dyn Formatter>>,
    sink: Option<Box<dyn Sink>>,
    hooks: Vec<Arc<dyn Hook>>,
    exit_handler: Option<ExitHandler>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            min_level: Level::Debug,
            formatter: None,
            sink: None,
            hooks: Vec::new(),
            exit_handler: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: impl Sink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Register a hook; builder order is firing order within a level.
    #[must_use = "builder methods return a new value"]
    pub fn hook(mut self, hook: Arc<dyn Hook>) -> Self {
        self.hooks.push(hook);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn exit_handler(mut self, handler: ExitHandler) -> Self {
        self.exit_handler = Some(handler);
        self
    }

    pub fn build(self) -> Logger {
        let logger = Logger {
            min_level: Arc::new(RwLock::new(self.min_level)),
            formatter: Arc::new(RwLock::new(
                self.formatter
                    .unwrap_or_else(|| Arc::new(TextFormatter::new())),
            )),
            sink: Arc::new(Mutex::new(Some(
                self.sink.unwrap_or_else(|| Box::new(ConsoleSink::stderr())),
            ))),
            hooks: Arc::new(RwLock::new(HookRegistry::new())),
            metrics: Arc::new(LoggerMetrics::new()),
            init: Arc::new(OnceLock::new()),
            closed: Arc::new(AtomicBool::new(false)),
            exit_handler: self
                .exit_handler
                .unwrap_or_else(|| Arc::new(|code| std::process::exit(code))),
        };
        {
            let mut hooks = logger.hooks.write();
            for hook in self.hooks {
                hooks.register(hook);
            }
        }
        // Explicit construction is the one-shot initialization
        let _ = logger.init.set(());
        logger.metrics.record_initialization();
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LoggerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerBuilder")
            .field("min_level", &self.min_level)
            .field("formatter", &self.formatter.as_ref().map(|_| "dyn Formatter"))
            .field("sink", &self.sink.as_ref().map(|_| "dyn Sink"))
            .field("hooks", &self.hooks.len())
            .field("exit_handler", &self.exit_handler.as_ref().map(|_| "fn"))
            .finish()
    }
}
