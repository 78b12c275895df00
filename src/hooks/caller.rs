//! Caller attribution hook

use crate::core::caller::{StackWalker, DEFAULT_FRAME_OFFSET};
use crate::core::entry::Entry;
use crate::core::error::Result;
use crate::core::hook::Hook;
use crate::core::level::Level;

/// Annotates entries with their logging call site.
///
/// On resolution the hook sets `fn` (the calling function's short name),
/// `src` (the trailing segments of the source path plus the line number),
/// and `ver` when an application version was configured. Resolution walks
/// the live stack, so the hook registers for `Debug` and `Trace` only by
/// default; the hot levels stay cheap.
///
/// When the walk cannot identify a frame outside the logging package, the
/// hook leaves the entry untouched rather than attributing it wrongly.
pub struct CallerHook {
    walker: StackWalker,
    levels: Vec<Level>,
    path_segments: usize,
    version: Option<String>,
}

impl CallerHook {
    pub fn new() -> Self {
        Self {
            walker: StackWalker::new(DEFAULT_FRAME_OFFSET),
            levels: vec![Level::Debug, Level::Trace],
            path_segments: 3,
            version: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_levels(mut self, levels: Vec<Level>) -> Self {
        self.levels = levels;
        self
    }

    /// Frames to skip before the walk starts scanning. Raise this when the
    /// logger sits under additional wrapper layers of your own.
    #[must_use = "builder methods return a new value"]
    pub fn with_frame_offset(mut self, offset: usize) -> Self {
        self.walker = StackWalker::new(offset);
        self
    }

    /// How many trailing path components of the source file to keep in
    /// `src`. Full paths from the build machine rarely help in logs.
    #[must_use = "builder methods return a new value"]
    pub fn with_path_segments(mut self, segments: usize) -> Self {
        self.path_segments = segments;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

impl Default for CallerHook {
    fn default() -> Self {
        Self::new()
    }
}

impl Hook for CallerHook {
    fn levels(&self) -> Vec<Level> {
        self.levels.clone()
    }

    fn fire(&self, entry: &mut Entry) -> Result<()> {
        let Some(frame) = self.walker.resolve_caller() else {
            return Ok(());
        };
        if !frame.function.is_empty() {
            entry.fields.set("fn", frame.short_name().to_string());
        }
        if !frame.file.is_empty() {
            entry.fields.set(
                "src",
                format!(
                    "{}:{}",
                    limit_path(&frame.file, self.path_segments),
                    frame.line
                ),
            );
        }
        if let Some(version) = &self.version {
            entry.fields.set("ver", version.clone());
        }
        Ok(())
    }
}

/// Keep at most the trailing `segments` path components.
fn limit_path(path: &str, segments: usize) -> &str {
    if segments == 0 {
        return path;
    }
    let mut slashes = 0;
    for (idx, byte) in path.bytes().enumerate().rev() {
        if byte == b'/' {
            slashes += 1;
            if slashes == segments {
                return &path[idx + 1..];
            }
        }
    }
    path
}
