//! Sink contract and the plain-writer adapter

use crate::core::error::Result;
use std::io;

/// A byte-stream destination for formatted log lines.
///
/// The logger serializes calls under its own lock, so implementations need no
/// locking of their own. `close` is invoked at most once, from the logger's
/// close path; the default implementation just flushes, which suits writers
/// with nothing to release.
pub trait Sink: Send {
    /// Write one whole formatted line.
    fn write_all(&mut self, bytes: &[u8]) -> Result<()>;

    /// Flush buffered output.
    fn flush(&mut self) -> Result<()>;

    /// Release the sink. Defaults to a flush.
    fn close(&mut self) -> Result<()> {
        self.flush()
    }
}

/// Adapter turning any `io::Write` into a [`Sink`].
///
/// ```
/// use outlog::{Sink, WriterSink};
///
/// let mut sink = WriterSink::new(Vec::new());
/// sink.write_all(b"line\n").unwrap();
/// assert_eq!(sink.get_ref(), b"line\n");
/// ```
pub struct WriterSink<W: io::Write + Send> {
    writer: W,
}

impl<W: io::Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write + Send> Sink for WriterSink<W> {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
