//! The executable part of an action.

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde_json::Value;

use crate::context::ActionContext;
use crate::error::ActionError;
use crate::validate::Params;

/// Executable unit behind an action.
///
/// Invoked with a per-call context and parameters that already passed
/// validation. Resolving with `Ok(None)` means the action produced no value.
///
/// ```rust
/// use async_trait::async_trait;
/// use relay_action::{ActionContext, ActionError, ActionHandler, Params};
///
/// struct Warn;
///
/// #[async_trait]
/// impl ActionHandler for Warn {
///     async fn perform(
///         &self,
///         ctx: ActionContext,
///         _params: Params,
///     ) -> Result<Option<serde_json::Value>, ActionError> {
///         ctx.logger().warn("oi");
///         Ok(None)
///     }
/// }
/// ```
#[async_trait]
pub trait ActionHandler: Send + Sync + 'static {
    /// Run the action.
    async fn perform(&self, ctx: ActionContext, params: Params)
    -> Result<Option<Value>, ActionError>;
}

/// [`ActionHandler`] backed by an async closure. Built with [`handler_fn`].
pub struct FnHandler<F, Fut> {
    f: F,
    _marker: PhantomData<fn() -> Fut>,
}

/// Wrap an async closure as a handler.
///
/// ```rust
/// use relay_action::handler_fn;
///
/// let handler = handler_fn(|ctx, _params| async move {
///     ctx.logger().warn("oi");
///     Ok(None)
/// });
/// # let _ = handler;
/// ```
pub fn handler_fn<F, Fut>(f: F) -> FnHandler<F, Fut>
where
    F: Fn(ActionContext, Params) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Option<Value>, ActionError>> + Send + 'static,
{
    FnHandler {
        f,
        _marker: PhantomData,
    }
}

#[async_trait]
impl<F, Fut> ActionHandler for FnHandler<F, Fut>
where
    F: Fn(ActionContext, Params) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Option<Value>, ActionError>> + Send + 'static,
{
    async fn perform(
        &self,
        ctx: ActionContext,
        params: Params,
    ) -> Result<Option<Value>, ActionError> {
        (self.f)(ctx, params).await
    }
}

impl<F, Fut> fmt::Debug for FnHandler<F, Fut> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler").finish_non_exhaustive()
    }
}
