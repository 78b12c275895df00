//! Hook contract and the level-indexed hook registry

use crate::core::entry::Entry;
use crate::core::error::Result;
use crate::core::level::Level;
use std::sync::Arc;

/// Cross-cutting behavior attached to leveled log events.
///
/// Implementations may read and rewrite `entry.fields` (replacing a raw
/// payload with a reference URL, attaching caller metadata) but must leave
/// the entry's level, message, and timestamp alone. A returned error is
/// reported on the internal diagnostic channel and never aborts the log line
/// that triggered the hook. Hooks doing blocking I/O own their timeout
/// policy; the dispatcher holds no lock while firing them.
pub trait Hook: Send + Sync {
    /// Levels this hook participates in. Consulted once, at registration.
    fn levels(&self) -> Vec<Level>;

    /// Observe and possibly rewrite the entry before it is formatted.
    fn fire(&self, entry: &mut Entry) -> Result<()>;
}

/// Ordered hooks, indexed by level.
///
/// A hook reporting several levels is registered under each of them;
/// registration order is firing order within a level. Firing a level never
/// touches hooks registered only under other levels.
#[derive(Default)]
pub struct HookRegistry {
    by_level: [Vec<Arc<dyn Hook>>; Level::COUNT],
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook under every level it reports.
    pub fn register(&mut self, hook: Arc<dyn Hook>) {
        for level in hook.levels() {
            self.by_level[level as usize].push(Arc::clone(&hook));
        }
    }

    /// Cloned snapshot of the hooks for one level, so callers can fire them
    /// without holding the registry lock.
    pub fn hooks_for(&self, level: Level) -> Vec<Arc<dyn Hook>> {
        self.by_level[level as usize].clone()
    }

    /// Number of hooks registered under `level`.
    pub fn len_for(&self, level: Level) -> usize {
        self.by_level[level as usize].len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_level.iter().all(Vec::is_empty)
    }

    pub fn clear(&mut self) {
        for hooks in &mut self.by_level {
            hooks.clear();
        }
    }
}
