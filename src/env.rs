//! Environment-driven configuration
//!
//! Deployment knobs read from `OUTLOG_*` variables, so a binary can switch
//! levels or output shape without a rebuild.

use crate::core::error::{LoggerError, Result};
use crate::core::level::Level;
use crate::core::logger::LoggerBuilder;
use crate::formatters::{JsonFormatter, TextFormatter};
use crate::hooks::CallerHook;
use std::sync::Arc;

/// Minimum level name, parsed like [`Level::from_str`](std::str::FromStr).
pub const ENV_LEVEL: &str = "OUTLOG_LEVEL";
/// Output shape: `text` (default) or `json`.
pub const ENV_FORMAT: &str = "OUTLOG_FORMAT";
/// Truthy to colorize the text format's level tag.
pub const ENV_COLOR: &str = "OUTLOG_COLOR";
/// Truthy (the default) to register caller attribution.
pub const ENV_CALLER_ENABLED: &str = "OUTLOG_CALLER_ENABLED";
/// Version string stamped into caller-attributed entries as `ver`.
pub const ENV_APP_VERSION: &str = "OUTLOG_APP_VERSION";

/// Build a logger configuration from the `OUTLOG_*` variables.
///
/// Unset variables keep their defaults; a variable that is set but
/// malformed is a configuration error, not a silent fallback. The returned
/// builder can still be adjusted before `build`.
///
/// # Examples
///
/// ```no_run
/// let logger = outlog::from_env().unwrap().build();
/// logger.info("configured from the environment");
/// ```
pub fn from_env() -> Result<LoggerBuilder> {
    let mut builder = LoggerBuilder::new();

    if let Ok(raw) = std::env::var(ENV_LEVEL) {
        builder = builder.min_level(raw.parse::<Level>()?);
    }

    let color = std::env::var(ENV_COLOR)
        .map(|raw| is_true(&raw))
        .unwrap_or(false);
    match std::env::var(ENV_FORMAT) {
        Ok(raw) => match raw.to_lowercase().as_str() {
            "text" => builder = builder.formatter(TextFormatter::new().with_color(color)),
            "json" => builder = builder.formatter(JsonFormatter::new()),
            other => {
                return Err(LoggerError::config(
                    ENV_FORMAT,
                    format!("unknown format {:?}, expected \"text\" or \"json\"", other),
                ));
            }
        },
        Err(_) => builder = builder.formatter(TextFormatter::new().with_color(color)),
    }

    let caller_enabled = std::env::var(ENV_CALLER_ENABLED)
        .map(|raw| is_true(&raw))
        .unwrap_or(true);
    if caller_enabled {
        let mut hook = CallerHook::new();
        if let Ok(version) = std::env::var(ENV_APP_VERSION) {
            hook = hook.with_version(version);
        }
        builder = builder.hook(Arc::new(hook));
    }

    Ok(builder)
}

/// Truthy spellings accepted by the boolean variables.
fn is_true(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "y")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hook::HookRegistry;
    use crate::core::sink::WriterSink;

    // Environment mutation is process-global; serialize these tests
    static ENV_LOCK: parking_lot::Mutex<()> = parking_lot::Mutex::new(());

    fn clear_env() {
        for key in [
            ENV_LEVEL,
            ENV_FORMAT,
            ENV_COLOR,
            ENV_CALLER_ENABLED,
            ENV_APP_VERSION,
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_is_true_spellings() {
        assert!(is_true("1"));
        assert!(is_true("true"));
        assert!(is_true("TRUE"));
        assert!(is_true("y"));
        assert!(!is_true("0"));
        assert!(!is_true("yes please"));
        assert!(!is_true(""));
    }

    #[test]
    fn test_level_from_env() {
        let _guard = ENV_LOCK.lock();
        clear_env();
        std::env::set_var(ENV_LEVEL, "warn");

        let logger = from_env().unwrap().sink(WriterSink::new(Vec::new())).build();
        assert_eq!(logger.min_level(), Level::Warn);
        clear_env();
    }

    #[test]
    fn test_malformed_level_is_an_error() {
        let _guard = ENV_LOCK.lock();
        clear_env();
        std::env::set_var(ENV_LEVEL, "verbose");

        let err = from_env().unwrap_err();
        assert!(err.to_string().contains("verbose"));
        clear_env();
    }

    #[test]
    fn test_unknown_format_is_an_error() {
        let _guard = ENV_LOCK.lock();
        clear_env();
        std::env::set_var(ENV_FORMAT, "xml");

        let err = from_env().unwrap_err();
        assert!(err.to_string().contains("xml"));
        clear_env();
    }

    #[test]
    fn test_caller_hook_registered_by_default() {
        let _guard = ENV_LOCK.lock();
        clear_env();

        let logger = from_env().unwrap().sink(WriterSink::new(Vec::new())).build();
        let hooks = logger.replace_hooks(HookRegistry::new());
        assert_eq!(hooks.len_for(Level::Debug), 1);
        assert_eq!(hooks.len_for(Level::Trace), 1);
        assert_eq!(hooks.len_for(Level::Info), 0);
    }

    #[test]
    fn test_caller_hook_can_be_disabled() {
        let _guard = ENV_LOCK.lock();
        clear_env();
        std::env::set_var(ENV_CALLER_ENABLED, "0");

        let logger = from_env().unwrap().sink(WriterSink::new(Vec::new())).build();
        let hooks = logger.replace_hooks(HookRegistry::new());
        assert!(hooks.is_empty());
        clear_env();
    }
}
