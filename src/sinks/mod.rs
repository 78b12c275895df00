//! Output sinks for formatted entries

pub mod console;
pub mod file;

pub use console::ConsoleSink;
pub use file::FileSink;
