//! Severity levels and their ordering, parsing, and terminal colors

use crate::core::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity levels, least to most severe.
///
/// The discriminants carry the ordering: an entry is emitted only when its
/// level is at or above the logger's minimum, where "above" means closer to
/// `Panic`. `Success` sits between `Info` and `Warn` for CLI-style status
/// lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Success = 3,
    Warn = 4,
    Error = 5,
    Fatal = 6,
    Panic = 7,
}

impl Level {
    /// Number of levels; also the size of per-level lookup tables.
    pub const COUNT: usize = 8;

    /// Every level, most to least severe.
    pub fn all() -> [Level; Level::COUNT] {
        [
            Level::Panic,
            Level::Fatal,
            Level::Error,
            Level::Warn,
            Level::Success,
            Level::Info,
            Level::Debug,
            Level::Trace,
        ]
    }

    /// Uppercase name for rendering.
    pub fn to_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Success => "SUCCESS",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
            Level::Panic => "PANIC",
        }
    }

    /// Terminal color for this level.
    pub fn color_code(&self) -> colored::Color {
        match self {
            Level::Trace => colored::Color::BrightBlack,
            Level::Debug => colored::Color::Blue,
            Level::Info => colored::Color::Cyan,
            Level::Success => colored::Color::Green,
            Level::Warn => colored::Color::Yellow,
            Level::Error => colored::Color::Red,
            Level::Fatal => colored::Color::BrightRed,
            Level::Panic => colored::Color::Magenta,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TRACE" => Ok(Level::Trace),
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "SUCCESS" => Ok(Level::Success),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "ERROR" => Ok(Level::Error),
            "FATAL" => Ok(Level::Fatal),
            "PANIC" => Ok(Level::Panic),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        // Verify severity increases toward Panic
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Success);
        assert!(Level::Success < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Fatal);
        assert!(Level::Fatal < Level::Panic);
    }

    #[test]
    fn test_level_display() {
        assert_eq!(Level::Success.to_string(), "SUCCESS");
        assert_eq!(Level::Warn.to_string(), "WARN");
        assert_eq!(format!("{}", Level::Panic), "PANIC");
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("info".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("ERROR".parse::<Level>().unwrap(), Level::Error);
        assert_eq!("Success".parse::<Level>().unwrap(), Level::Success);
        // Both spellings of the warning level parse
        assert_eq!("warn".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("warning".parse::<Level>().unwrap(), Level::Warn);
    }

    #[test]
    fn test_level_from_str_invalid() {
        let err = "verbose".parse::<Level>().unwrap_err();
        assert!(err.to_string().contains("verbose"));
    }

    #[test]
    fn test_level_default() {
        assert_eq!(Level::default(), Level::Info);
    }

    #[test]
    fn test_all_levels() {
        let all = Level::all();
        assert_eq!(all.len(), Level::COUNT);
        assert_eq!(all[0], Level::Panic);
        assert_eq!(all[Level::COUNT - 1], Level::Trace);
        // Verify the listing is strictly descending by severity
        for pair in all.windows(2) {
            assert!(pair[0] > pair[1]);
        }
    }
}
