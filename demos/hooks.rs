//! Hook usage example
//!
//! Demonstrates a custom enrichment hook, caller attribution, and blob
//! offload through an in-memory store.
//!
//! Run with: cargo run --example hooks

use outlog::prelude::*;
use parking_lot::Mutex;
use std::sync::Arc;

struct MemoryStore {
    objects: Mutex<Vec<(String, Vec<u8>)>>,
}

impl BlobStore for MemoryStore {
    fn put(&self, key: &str, payload: &[u8]) -> Result<()> {
        println!("   (stored {} bytes under {})", payload.len(), key);
        self.objects
            .lock()
            .push((key.to_string(), payload.to_vec()));
        Ok(())
    }
}

struct HostHook {
    host: String,
}

impl Hook for HostHook {
    fn levels(&self) -> Vec<Level> {
        Level::all().to_vec()
    }

    fn fire(&self, entry: &mut Entry) -> Result<()> {
        entry.fields.set("host", self.host.clone());
        Ok(())
    }
}

fn main() -> Result<()> {
    println!("=== Outlog - Hooks Example ===\n");

    let store = Arc::new(MemoryStore {
        objects: Mutex::new(Vec::new()),
    });

    let logger = Logger::builder()
        .min_level(Level::Trace)
        .sink(ConsoleSink::stdout())
        .hook(Arc::new(HostHook {
            host: "web-1".into(),
        }))
        .hook(Arc::new(CallerHook::new().with_version("1.4.2")))
        .hook(Arc::new(
            BlobHook::new(Arc::clone(&store) as Arc<dyn BlobStore>)
                .with_base_url("https://blobs.example.com"),
        ))
        .build();

    println!("1. Every entry gains the host field:");
    logger.info("Service starting");

    println!("\n2. Debug entries carry caller attribution:");
    logger.debug("Inspecting request state");

    println!("\n3. Blob payloads are offloaded, leaving a reference:");
    logger
        .with_field("blob", "very large request body that should not hit the log line")
        .warn("Slow request captured");

    println!("\nStored blobs: {}", store.objects.lock().len());
    logger.close()?;
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
