//! Error types for the logging facade

pub type Result<T> = std::result::Result<T, LoggerError>;

/// Errors surfaced by configuration, hooks, formatters, and sinks.
///
/// Leveled logging methods are fire-and-forget and never return these;
/// failures on that path go to the internal diagnostic channel instead.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Level name that does not parse
    #[error("not a valid level: {0:?}")]
    InvalidLevel(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Sink error (generic)
    #[error("Sink error: {0}")]
    SinkError(String),

    /// Hook failure with hook name
    #[error("Hook '{name}' failed: {message}")]
    HookError { name: String, message: String },

    /// Blob store error
    #[error("Blob store error: {0}")]
    BlobStoreError(String),

    /// Default logger installed twice
    #[error("Logger already initialized")]
    AlreadyInitialized,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a sink error (generic)
    pub fn sink<S: Into<String>>(msg: S) -> Self {
        LoggerError::SinkError(msg.into())
    }

    /// Create a hook failure
    pub fn hook(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::HookError {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a blob store error
    pub fn blob_store<S: Into<String>>(msg: S) -> Self {
        LoggerError::BlobStoreError(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
