//! Blob offload hook

use crate::core::entry::Entry;
use crate::core::error::Result;
use crate::core::fields::FieldValue;
use crate::core::hook::Hook;
use crate::core::level::Level;
use std::sync::Arc;
use uuid::Uuid;

/// Destination for payloads offloaded out of log lines.
pub trait BlobStore: Send + Sync {
    /// Store `payload` under `key`. Keys are `{env}/{id}` with a fresh
    /// UUID per payload.
    fn put(&self, key: &str, payload: &[u8]) -> Result<()>;
}

/// Moves `blob` field payloads out of the entry, replacing them with a
/// stable reference.
///
/// The reference is `{base_url}/{id}` when a base URL is configured and
/// `{env}/{id}` otherwise, and it is written into the entry before the
/// upload is attempted: the emitted line always says where the payload was
/// headed even when the store is down. Upload failures are reported on the
/// diagnostic channel, never propagated into dispatch.
///
/// Registered for every level by default; oversized payloads are a hazard
/// at any severity.
pub struct BlobHook {
    store: Option<Arc<dyn BlobStore>>,
    base_url: String,
    env: String,
    levels: Vec<Level>,
}

impl BlobHook {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self {
            store: Some(store),
            base_url: String::new(),
            env: "local".to_string(),
            levels: Level::all().to_vec(),
        }
    }

    /// A hook with no backing store: `blob` fields are stripped with a
    /// warning instead of uploaded, so payloads never hit the log line.
    pub fn disabled() -> Self {
        Self {
            store: None,
            base_url: String::new(),
            env: "local".to_string(),
            levels: Level::all().to_vec(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Environment name used as the storage key prefix and, without a base
    /// URL, as the reference prefix.
    #[must_use = "builder methods return a new value"]
    pub fn with_env(mut self, env: impl Into<String>) -> Self {
        self.env = env.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_levels(mut self, levels: Vec<Level>) -> Self {
        self.levels = levels;
        self
    }
}

impl Hook for BlobHook {
    fn levels(&self) -> Vec<Level> {
        self.levels.clone()
    }

    fn fire(&self, entry: &mut Entry) -> Result<()> {
        let Some(value) = entry.fields.get("blob").cloned() else {
            return Ok(());
        };
        let Some(store) = &self.store else {
            eprintln!("[OUTLOG WARNING] Blob field dropped: no blob store configured");
            entry.fields.remove("blob");
            return Ok(());
        };
        let payload = match value {
            FieldValue::String(s) => s.into_bytes(),
            FieldValue::Bytes(b) => b,
            _ => {
                // Only textual and binary payloads are offloadable
                entry.fields.remove("blob");
                return Ok(());
            }
        };

        let id = Uuid::new_v4();
        let key = format!("{}/{}", self.env, id);
        let reference = if self.base_url.is_empty() {
            key.clone()
        } else {
            format!("{}/{}", self.base_url, id)
        };
        // Reference lands in the line whether or not the upload succeeds
        entry.fields.set("blob", reference);

        if let Err(err) = store.put(&key, &payload) {
            eprintln!("[OUTLOG ERROR] Blob upload failed: {}", err);
        }
        Ok(())
    }
}
