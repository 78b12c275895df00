//! End-to-end hook dispatch behavior
//!
//! These tests verify:
//! - Blob payload offload and reference substitution
//! - Hook ordering and field rewriting through the full pipeline
//! - Registry snapshot and restore

use outlog::{BlobHook, BlobStore, Entry, Hook, HookRegistry, Level, Logger, Result, Sink};
use parking_lot::Mutex;
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

#[derive(Default)]
struct MemoryStore {
    objects: Mutex<Vec<(String, Vec<u8>)>>,
}

impl BlobStore for MemoryStore {
    fn put(&self, key: &str, payload: &[u8]) -> Result<()> {
        self.objects.lock().push((key.to_string(), payload.to_vec()));
        Ok(())
    }
}

struct TagHook {
    tag: &'static str,
    levels: Vec<Level>,
    order: Arc<Mutex<Vec<&'static str>>>,
}

impl Hook for TagHook {
    fn levels(&self) -> Vec<Level> {
        self.levels.clone()
    }

    fn fire(&self, entry: &mut Entry) -> Result<()> {
        self.order.lock().push(self.tag);
        entry.fields.set("stage", self.tag);
        Ok(())
    }
}

#[test]
fn test_blob_payload_never_reaches_the_line() {
    let sink = MemorySink::default();
    let store = Arc::new(MemoryStore::default());
    let logger = Logger::builder()
        .sink(sink.clone())
        .hook(Arc::new(
            BlobHook::new(Arc::clone(&store) as Arc<dyn BlobStore>).with_base_url("ref:"),
        ))
        .build();

    logger.with_field("blob", "giant payload body").error("request dump");

    let line = sink.contents();
    assert!(line.contains("request dump"));
    assert!(!line.contains("giant payload body"));
    assert!(line.contains("blob=ref:/"));

    // The payload went to the store under the environment key
    let objects = store.objects.lock();
    assert_eq!(objects.len(), 1);
    assert!(objects[0].0.starts_with("local/"));
    assert_eq!(objects[0].1, b"giant payload body");
}

#[test]
fn test_blob_hook_ignores_unregistered_levels() {
    let sink = MemorySink::default();
    let store = Arc::new(MemoryStore::default());
    let logger = Logger::builder()
        .sink(sink.clone())
        .hook(Arc::new(
            BlobHook::new(Arc::clone(&store) as Arc<dyn BlobStore>)
                .with_levels(vec![Level::Error]),
        ))
        .build();

    logger.with_field("blob", "hello").info("below the hook");

    // At a level the hook never registered for, the field passes verbatim
    assert!(sink.contents().contains("blob=hello"));
    assert!(store.objects.lock().is_empty());
}

#[test]
fn test_hooks_fire_in_registration_order() {
    let sink = MemorySink::default();
    let order = Arc::new(Mutex::new(Vec::new()));
    let logger = Logger::builder()
        .sink(sink.clone())
        .hook(Arc::new(TagHook {
            tag: "first",
            levels: vec![Level::Info],
            order: Arc::clone(&order),
        }))
        .hook(Arc::new(TagHook {
            tag: "second",
            levels: vec![Level::Info],
            order: Arc::clone(&order),
        }))
        .build();

    logger.info("staged");

    assert_eq!(*order.lock(), vec!["first", "second"]);
    // Later hooks overwrite what earlier ones set
    assert!(sink.contents().contains("stage=second"));
    assert!(!sink.contents().contains("stage=first"));
}

#[test]
fn test_hooks_see_bound_entry_fields() {
    struct SnoopHook {
        seen: Arc<Mutex<Option<String>>>,
    }

    impl Hook for SnoopHook {
        fn levels(&self) -> Vec<Level> {
            vec![Level::Warn]
        }

        fn fire(&self, entry: &mut Entry) -> Result<()> {
            *self.seen.lock() = entry.fields.get("user").map(|value| value.to_string());
            Ok(())
        }
    }

    let sink = MemorySink::default();
    let seen = Arc::new(Mutex::new(None));
    let logger = Logger::builder()
        .sink(sink.clone())
        .hook(Arc::new(SnoopHook {
            seen: Arc::clone(&seen),
        }))
        .build();

    logger.with_field("user", "alice").warn("probe");

    assert_eq!(seen.lock().as_deref(), Some("alice"));
}

#[test]
fn test_registry_swap_restores_previous_behavior() {
    let sink = MemorySink::default();
    let order = Arc::new(Mutex::new(Vec::new()));
    let logger = Logger::builder()
        .sink(sink.clone())
        .hook(Arc::new(TagHook {
            tag: "tagged",
            levels: vec![Level::Info],
            order,
        }))
        .build();

    logger.info("one");
    assert!(sink.contents().contains("stage=tagged"));

    let previous = logger.replace_hooks(HookRegistry::new());
    logger.info("two");
    let after_swap = sink.contents();
    assert_eq!(after_swap.matches("stage=tagged").count(), 1);

    logger.replace_hooks(previous);
    logger.info("three");
    assert_eq!(sink.contents().matches("stage=tagged").count(), 2);
}
