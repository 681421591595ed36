use std::sync::Arc;

/// Failure reported by an action handler.
///
/// The invoker never retries: whatever the handler returns here is wrapped
/// and handed straight back to the caller.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum ActionError {
    /// The handler could not complete its work.
    #[error("{message}")]
    Failed {
        /// Human-readable error message.
        message: String,
        /// Optional structured details about the failure.
        details: Option<serde_json::Value>,
    },

    /// The handler observed cancellation and stopped.
    #[error("cancelled")]
    Cancelled,

    /// An underlying error the handler propagated as-is.
    #[error(transparent)]
    Source(Arc<dyn std::error::Error + Send + Sync + 'static>),
}

impl ActionError {
    /// Create a failure with a message.
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed {
            message: msg.into(),
            details: None,
        }
    }

    /// Create a failure with structured details.
    pub fn failed_with_details(msg: impl Into<String>, details: serde_json::Value) -> Self {
        Self::Failed {
            message: msg.into(),
            details: Some(details),
        }
    }

    /// Wrap an underlying error.
    pub fn from_source<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Source(Arc::new(err))
    }

    /// Returns `true` if the handler stopped because of cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Extract the structured details, if present.
    pub fn details(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Failed { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn failed_display() {
        let err = ActionError::failed("upstream returned 500");
        assert_eq!(err.to_string(), "upstream returned 500");
        assert!(err.details().is_none());
        assert!(!err.is_cancelled());
    }

    #[test]
    fn failed_with_details() {
        let details = serde_json::json!({"status": 500});
        let err = ActionError::failed_with_details("upstream error", details.clone());
        assert_eq!(err.details(), Some(&details));
    }

    #[test]
    fn cancelled() {
        let err = ActionError::Cancelled;
        assert!(err.is_cancelled());
        assert_eq!(err.to_string(), "cancelled");
    }

    #[test]
    fn source_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let err = ActionError::from_source(io);
        assert_eq!(err.to_string(), "reset by peer");
        assert!(err.source().is_none());
    }
}
