//! Invocation error types.

use std::time::Duration;

use relay_action::{ActionError, ValidationErrors};
use relay_component::ComponentError;

/// Errors from [`Invoker::invoke`](crate::Invoker::invoke).
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    /// The component or action does not exist.
    #[error(transparent)]
    NotFound(ComponentError),

    /// Parameters did not match the action's inputs.
    #[error("invalid parameters: {0}")]
    Validation(#[from] ValidationErrors),

    /// The handler returned an error.
    #[error("action '{action}' of component '{component}' failed: {source}")]
    Handler {
        /// Component key.
        component: String,
        /// Action key.
        action: String,
        /// The handler's error.
        #[source]
        source: ActionError,
    },

    /// The handler did not finish in time.
    #[error("action '{action}' of component '{component}' timed out after {after:?}")]
    Timeout {
        /// Component key.
        component: String,
        /// Action key.
        action: String,
        /// The bound that was exceeded.
        after: Duration,
    },
}

impl InvokeError {
    /// Whether the component or action was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether the call timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// The field errors, for validation failures.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
