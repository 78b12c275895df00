//! Thread safety under load
//!
//! These tests verify:
//! - Parallel logging keeps every line whole and loses none
//! - Configuration swaps mid-traffic never tear output
//! - Metrics stay consistent with what actually reached the sink

use outlog::{JsonFormatter, Level, Logger, Result, Sink, TextFormatter};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

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

#[test]
fn test_parallel_logging_loses_nothing() {
    let sink = MemorySink::default();
    let logger = Arc::new(Logger::builder().sink(sink.clone()).build());

    let threads = 8;
    let per_thread = 50;
    let mut handles = vec![];
    for thread_id in 0..threads {
        let logger = Arc::clone(&logger);
        handles.push(std::thread::spawn(move || {
            for i in 0..per_thread {
                logger.info(format!("thread {} message {}", thread_id, i));
            }
        }));
    }
    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let contents = sink.contents();
    assert_eq!(contents.lines().count(), threads * per_thread);

    // Every message arrived exactly once
    for thread_id in 0..threads {
        for i in 0..per_thread {
            let needle = format!("thread {} message {}", thread_id, i);
            assert_eq!(
                contents.matches(&needle).count(),
                1,
                "message lost or duplicated: {}",
                needle
            );
        }
    }
}

#[test]
fn test_config_swaps_mid_traffic() {
    let sink = MemorySink::default();
    let logger = Arc::new(Logger::builder().sink(sink.clone()).build());

    let mut handles = vec![];
    for _ in 0..4 {
        let logger = Arc::clone(&logger);
        handles.push(std::thread::spawn(move || {
            for i in 0..200 {
                logger.info(format!("message {}", i));
            }
        }));
    }
    {
        let logger = Arc::clone(&logger);
        handles.push(std::thread::spawn(move || {
            for round in 0..10 {
                if round % 2 == 0 {
                    logger.set_formatter(JsonFormatter::new());
                    logger.set_min_level(Level::Info);
                } else {
                    logger.set_formatter(TextFormatter::new());
                    logger.set_min_level(Level::Warn);
                }
                std::thread::sleep(Duration::from_millis(1));
            }
            logger.set_min_level(Level::Info);
        }));
    }
    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    // Each line is wholly one format or the other
    let contents = sink.contents();
    for line in contents.lines() {
        if line.starts_with('{') {
            let parsed: serde_json::Value =
                serde_json::from_str(line).expect("torn JSON line");
            assert!(parsed["message"].as_str().unwrap().starts_with("message"));
        } else {
            assert!(line.starts_with('['), "torn text line: {:?}", line);
        }
    }

    let metrics = logger.metrics();
    assert_eq!(contents.lines().count() as u64, metrics.messages_logged());
    assert_eq!(metrics.messages_logged() + metrics.messages_filtered(), 800);
}

#[test]
fn test_clones_share_counters_across_threads() {
    let sink = MemorySink::default();
    let logger = Logger::builder()
        .min_level(Level::Warn)
        .sink(sink.clone())
        .build();

    let mut handles = vec![];
    for _ in 0..4 {
        let logger = logger.clone();
        handles.push(std::thread::spawn(move || {
            for _ in 0..25 {
                logger.info("filtered");
                logger.error("written");
            }
        }));
    }
    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let metrics = logger.metrics();
    assert_eq!(metrics.messages_filtered(), 100);
    assert_eq!(metrics.messages_logged(), 100);
    assert_eq!(sink.contents().lines().count(), 100);
}
