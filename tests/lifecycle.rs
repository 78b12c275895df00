//! Initialization and close semantics
//!
//! These tests verify:
//! - Deferred defaults materialize exactly once under concurrent first use
//! - Close releases the sink exactly once, racing closers included
//! - Logging after close is dropped silently
//! - The process-wide default binds once and closes cleanly

use outlog::{Level, Logger, Result, Sink};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone, Default)]
struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }
}

impl Sink for MemorySink {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.buffer.lock().extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

struct CountingSink {
    closes: Arc<AtomicUsize>,
}

impl Sink for CountingSink {
    fn write_all(&mut self, _bytes: &[u8]) -> Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn test_deferred_defaults_initialize_once_under_load() {
    let sink = MemorySink::default();
    let logger = Logger::new();
    logger.set_sink(sink.clone());

    let logger = Arc::new(logger);
    let mut handles = vec![];
    for thread_id in 0..8 {
        let logger = Arc::clone(&logger);
        handles.push(std::thread::spawn(move || {
            for i in 0..25 {
                logger.info(format!("thread {} message {}", thread_id, i));
            }
        }));
    }
    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    // Heavy shared use never re-materializes the defaults
    assert_eq!(logger.metrics().initializations(), 1);
    assert_eq!(sink.contents().lines().count(), 200);
}

#[test]
fn test_racing_first_calls_share_one_initialization() {
    let logger = Arc::new(Logger::new());

    // Configuration calls count as first use; eight concurrent first
    // touches must resolve to a single initialization
    let mut handles = vec![];
    for _ in 0..8 {
        let logger = Arc::clone(&logger);
        handles.push(std::thread::spawn(move || {
            logger.set_min_level(Level::Debug);
        }));
    }
    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(logger.metrics().initializations(), 1);
}

#[test]
fn test_racing_closers_release_sink_once() {
    let closes = Arc::new(AtomicUsize::new(0));
    let logger = Arc::new(
        Logger::builder()
            .sink(CountingSink {
                closes: Arc::clone(&closes),
            })
            .build(),
    );

    let mut handles = vec![];
    for _ in 0..8 {
        let logger = Arc::clone(&logger);
        handles.push(std::thread::spawn(move || logger.close()));
    }
    for handle in handles {
        // Losers of the race still see success
        assert!(handle.join().expect("Thread panicked").is_ok());
    }

    assert_eq!(closes.load(Ordering::SeqCst), 1);
}

#[test]
fn test_logging_after_close_is_dropped() {
    let sink = MemorySink::default();
    let logger = Logger::builder().sink(sink.clone()).build();

    logger.info("before");
    logger.close().expect("close succeeds");
    logger.info("after");
    logger.with_field("k", 1).error("chained after");

    let contents = sink.contents();
    assert!(contents.contains("before"));
    assert!(!contents.contains("after"));
    assert_eq!(logger.metrics().messages_dropped(), 2);
}

#[test]
fn test_concurrent_close_and_log_stays_coherent() {
    let sink = MemorySink::default();
    let logger = Arc::new(Logger::builder().sink(sink.clone()).build());

    let mut handles = vec![];
    for _ in 0..4 {
        let logger = Arc::clone(&logger);
        handles.push(std::thread::spawn(move || {
            for i in 0..100 {
                logger.info(format!("message {}", i));
            }
        }));
    }
    {
        let logger = Arc::clone(&logger);
        handles.push(std::thread::spawn(move || {
            logger.close().expect("close succeeds");
        }));
    }
    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    // Every attempt was either written whole or dropped whole
    let metrics = logger.metrics();
    assert_eq!(metrics.messages_logged() + metrics.messages_dropped(), 400);
    let contents = sink.contents();
    assert_eq!(contents.lines().count() as u64, metrics.messages_logged());
    for line in contents.lines() {
        assert!(line.contains("INFO"), "torn line: {:?}", line);
    }
}

// The default logger is process-global, so its whole lifecycle lives in
// one test
#[test]
fn test_global_default_flow() {
    let sink = MemorySink::default();
    let logger = Logger::builder()
        .min_level(Level::Debug)
        .sink(sink.clone())
        .build();
    outlog::global::init(logger).expect("first install succeeds");

    outlog::global::info("via wrapper");
    outlog::global::with_field("job", 3).warn("field via wrapper");
    outlog::global::log(Level::Error, "direct level");

    // A second install is rejected once the default is bound
    assert!(outlog::global::init(Logger::new()).is_err());

    let contents = sink.contents();
    assert!(contents.contains("via wrapper"));
    assert!(contents.contains("job=3"));
    assert!(contents.contains("direct level"));

    outlog::global::close().expect("close succeeds");
    outlog::global::info("after close");
    assert!(!sink.contents().contains("after close"));
}
