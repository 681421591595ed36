use std::fmt;
use std::sync::Arc;

use relay_core::InvocationId;
use tokio_util::sync::CancellationToken;

use crate::error::ActionError;
use crate::logger::{ActionLogger, TracingLogger};

/// Runtime context handed to a handler for one invocation.
///
/// Created fresh per call and dropped when the handler finishes. Carries the
/// invocation id, an advisory cancellation token and the logging port.
///
/// Cancellation is cooperative: long-running handlers should call
/// [`check_cancelled`](Self::check_cancelled) between steps.
#[derive(Clone)]
#[non_exhaustive]
pub struct ActionContext {
    /// Unique invocation identifier.
    pub invocation_id: InvocationId,
    /// Cancellation signal, checked cooperatively by handlers.
    pub cancellation: CancellationToken,
    logger: Arc<dyn ActionLogger>,
}

impl ActionContext {
    /// Create a context with a fresh id that logs through `tracing`.
    pub fn new() -> Self {
        Self {
            invocation_id: InvocationId::v4(),
            cancellation: CancellationToken::new(),
            logger: Arc::new(TracingLogger),
        }
    }

    /// Replace the logger.
    pub fn with_logger(mut self, logger: Arc<dyn ActionLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Use a pre-existing cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Use a caller-chosen invocation id.
    pub fn with_invocation_id(mut self, id: InvocationId) -> Self {
        self.invocation_id = id;
        self
    }

    /// The logging port.
    pub fn logger(&self) -> &dyn ActionLogger {
        self.logger.as_ref()
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Check whether execution has been cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Cancelled`] if the token has been triggered.
    pub fn check_cancelled(&self) -> Result<(), ActionError> {
        if self.cancellation.is_cancelled() {
            Err(ActionError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl Default for ActionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ActionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionContext")
            .field("invocation_id", &self.invocation_id)
            .field("cancelled", &self.cancellation.is_cancelled())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::{LogLevel, MemoryLogger};

    #[test]
    fn fresh_ids_per_context() {
        assert_ne!(
            ActionContext::new().invocation_id,
            ActionContext::new().invocation_id
        );
    }

    #[test]
    fn check_cancelled_ok() {
        let ctx = ActionContext::new();
        assert!(ctx.check_cancelled().is_ok());
        assert!(!ctx.is_cancelled());
    }

    #[test]
    fn check_cancelled_after_cancel() {
        let ctx = ActionContext::new();
        ctx.cancellation.cancel();
        let err = ctx.check_cancelled().unwrap_err();
        assert!(matches!(err, ActionError::Cancelled));
    }

    #[test]
    fn with_cancellation_token() {
        let token = CancellationToken::new();
        let ctx = ActionContext::new().with_cancellation(token.child_token());
        assert!(ctx.check_cancelled().is_ok());
        token.cancel();
        assert!(ctx.check_cancelled().is_err());
    }

    #[test]
    fn logger_routes_to_attached_port() {
        let memory = Arc::new(MemoryLogger::new());
        let ctx = ActionContext::new().with_logger(memory.clone());
        ctx.logger().warn("oi");
        assert_eq!(memory.messages(LogLevel::Warn), vec!["oi".to_string()]);
    }

    #[test]
    fn clones_share_cancellation() {
        let ctx = ActionContext::new();
        let clone = ctx.clone();
        ctx.cancellation.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn debug_format() {
        let debug = format!("{:?}", ActionContext::new());
        assert!(debug.contains("ActionContext"));
        assert!(debug.contains("invocation_id"));
    }
}
