//! Console sink implementation

use crate::core::error::Result;
use crate::core::sink::Sink;
use std::io::Write;

enum Target {
    Stdout,
    Stderr,
}

/// Writes formatted lines straight to a process stream.
///
/// Each entry arrives as a single write under the stream's lock, so lines
/// never interleave mid-entry with other writers, and stdout is flushed per
/// line so output appears immediately even when piped.
pub struct ConsoleSink {
    target: Target,
}

impl ConsoleSink {
    /// Sink on standard error, the stock default: log traffic stays out of
    /// a program's data output.
    pub fn stderr() -> Self {
        Self {
            target: Target::Stderr,
        }
    }

    pub fn stdout() -> Self {
        Self {
            target: Target::Stdout,
        }
    }
}

impl Sink for ConsoleSink {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        match self.target {
            Target::Stdout => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                handle.write_all(bytes)?;
                handle.flush()?;
            }
            Target::Stderr => {
                let stderr = std::io::stderr();
                let mut handle = stderr.lock();
                handle.write_all(bytes)?;
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.target {
            Target::Stdout => std::io::stdout().flush()?,
            Target::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }
}
