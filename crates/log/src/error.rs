//! Logger error types.

/// Result type for logger operations
pub type LogResult<T> = Result<T, LogError>;

/// Error type for logger operations
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Filter parsing error
    #[error("invalid filter: {0}")]
    Filter(String),

    /// A global subscriber was installed before this one
    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized,
}

impl From<serde_json::Error> for LogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
