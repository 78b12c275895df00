//! Formatter contract

use crate::core::entry::Entry;
use crate::core::error::Result;

/// Renders a finalized entry into the bytes emitted on the sink.
///
/// Formatters run after hooks have fired, so hook-written fields are part of
/// the rendered output. One call produces one complete line, terminator
/// included; the logger writes the returned bytes as a single unit.
pub trait Formatter: Send + Sync {
    fn format(&self, entry: &Entry) -> Result<Vec<u8>>;
}
