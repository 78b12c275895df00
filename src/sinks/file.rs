//! File sink implementation

use crate::core::error::{LoggerError, Result};
use crate::core::sink::Sink;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Buffered append-only sink on a log file.
///
/// Writes accumulate in an in-process buffer; `flush` forces them to the
/// OS, and `close` flushes and releases the handle. A closed sink rejects
/// further writes.
///
/// # Examples
///
/// ```no_run
/// use outlog::{FileSink, Logger};
///
/// let sink = FileSink::new("/var/log/app.log").unwrap();
/// let logger = Logger::builder().sink(sink).build();
/// logger.info("started");
/// logger.close().unwrap();
/// ```
pub struct FileSink {
    writer: Option<BufWriter<File>>,
    path: PathBuf,
}

impl FileSink {
    /// Open `path` for appending, creating the file if missing.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            writer: Some(BufWriter::new(file)),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::sink("file sink closed"))?;
        writer.write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Buffered lines survive an un-closed drop
        let _ = self.flush();
    }
}
