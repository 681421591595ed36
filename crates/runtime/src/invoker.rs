//! Single-call action invocation.
//!
//! Resolves the action from the registry, validates parameters against its
//! inputs, and runs the handler under an optional timeout.

use std::sync::Arc;
use std::time::Duration;

use relay_action::ActionContext;
use relay_component::ComponentRegistry;
use serde_json::Value;
use tokio::time::Instant;
use tracing::Instrument;

use crate::config::InvokerConfig;
use crate::error::InvokeError;

/// Runs actions from a shared, read-only registry.
///
/// Cheap to clone. Concurrent invocations share only the registry.
///
/// # Flow
///
/// 1. Look up the action (`NotFound` on failure)
/// 2. Validate raw parameters (`Validation` on failure)
/// 3. Run the handler, bounded by the effective timeout
/// 4. Wrap handler errors as `Handler`
///
/// There are no retries. A failed call leaves the registry untouched.
#[derive(Debug, Clone)]
pub struct Invoker {
    registry: Arc<ComponentRegistry>,
    config: InvokerConfig,
}

impl Invoker {
    /// Create an invoker with the default config (no timeout).
    pub fn new(registry: Arc<ComponentRegistry>) -> Self {
        Self::with_config(registry, InvokerConfig::default())
    }

    /// Create an invoker with explicit settings.
    pub fn with_config(registry: Arc<ComponentRegistry>, config: InvokerConfig) -> Self {
        Self { registry, config }
    }

    /// The registry actions are resolved from.
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// The active settings.
    pub fn config(&self) -> &InvokerConfig {
        &self.config
    }

    /// Invoke an action with the configured default timeout.
    ///
    /// Resolves with the handler's value, or `None` when the action produces
    /// nothing.
    pub async fn invoke(
        &self,
        component_key: &str,
        action_key: &str,
        raw_params: &Value,
        ctx: ActionContext,
    ) -> Result<Option<Value>, InvokeError> {
        self.invoke_with_timeout(
            component_key,
            action_key,
            raw_params,
            ctx,
            self.config.default_timeout,
        )
        .await
    }

    /// Invoke an action with a per-call timeout. `None` or a zero duration
    /// means unbounded.
    ///
    /// On expiry the context's cancellation token is cancelled so a handler
    /// still running elsewhere can notice, and [`InvokeError::Timeout`] is
    /// returned.
    pub async fn invoke_with_timeout(
        &self,
        component_key: &str,
        action_key: &str,
        raw_params: &Value,
        ctx: ActionContext,
        timeout: Option<Duration>,
    ) -> Result<Option<Value>, InvokeError> {
        let timeout = timeout.filter(|t| !t.is_zero());
        let span = tracing::info_span!(
            "invoke",
            component = component_key,
            action = action_key,
            invocation_id = %ctx.invocation_id,
        );
        self.run(component_key, action_key, raw_params, ctx, timeout)
            .instrument(span)
            .await
    }

    async fn run(
        &self,
        component_key: &str,
        action_key: &str,
        raw_params: &Value,
        ctx: ActionContext,
        timeout: Option<Duration>,
    ) -> Result<Option<Value>, InvokeError> {
        let action = self
            .registry
            .get_action(component_key, action_key)
            .map_err(|err| {
                tracing::warn!(error = %err, "action lookup failed");
                InvokeError::NotFound(err)
            })?;

        let params = action.validate_params(raw_params).map_err(|errors| {
            tracing::debug!(invalid = errors.len(), "parameter validation failed");
            InvokeError::Validation(errors)
        })?;

        let cancellation = ctx.cancellation.clone();
        let started = Instant::now();
        tracing::debug!(params = params.len(), "running handler");

        let result = match timeout {
            Some(after) => match tokio::time::timeout(after, action.perform(ctx, params)).await {
                Ok(result) => result,
                Err(_) => {
                    cancellation.cancel();
                    tracing::warn!(timeout_ms = after.as_millis(), "invocation timed out");
                    return Err(InvokeError::Timeout {
                        component: component_key.to_owned(),
                        action: action_key.to_owned(),
                        after,
                    });
                }
            },
            None => action.perform(ctx, params).await,
        };

        let elapsed_ms = started.elapsed().as_millis();
        match result {
            Ok(output) => {
                tracing::info!(elapsed_ms, has_output = output.is_some(), "invocation completed");
                Ok(output)
            }
            Err(source) => {
                tracing::warn!(elapsed_ms, error = %source, "invocation failed");
                Err(InvokeError::Handler {
                    component: component_key.to_owned(),
                    action: action_key.to_owned(),
                    source,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use relay_action::{
        ActionDescriptor, ActionDisplay, ActionError, InputField, InputKind, Params, handler_fn,
    };
    use relay_component::ComponentDescriptor;
    use serde_json::json;

    fn greet() -> ActionDescriptor {
        ActionDescriptor::new(
            "greet".parse().unwrap(),
            ActionDisplay::new("Greet", "Says hello"),
            handler_fn(|_ctx, params: Params| async move {
                let name = params.get_str("name").unwrap_or("world").to_owned();
                Ok(Some(json!(format!("hello {name}"))))
            }),
        )
        .with_input(InputField::new(
            "name".parse().unwrap(),
            "Name",
            InputKind::String,
        ))
    }

    fn fail() -> ActionDescriptor {
        ActionDescriptor::new(
            "fail".parse().unwrap(),
            ActionDisplay::new("Fail", "Always fails"),
            handler_fn(|_ctx, _params| async move {
                Err::<Option<Value>, _>(ActionError::failed("upstream returned 503"))
            }),
        )
    }

    fn slow() -> ActionDescriptor {
        ActionDescriptor::new(
            "slow".parse().unwrap(),
            ActionDisplay::new("Slow", "Sleeps for a minute"),
            handler_fn(|_ctx, _params| async move {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(None)
            }),
        )
    }

    fn invoker(config: InvokerConfig) -> Invoker {
        let mut registry = ComponentRegistry::new();
        registry
            .register(
                ComponentDescriptor::builder("demo", "Demo")
                    .action(greet())
                    .action(fail())
                    .action(slow())
                    .build()
                    .unwrap(),
            )
            .unwrap();
        Invoker::with_config(Arc::new(registry), config)
    }

    #[tokio::test]
    async fn returns_handler_output() {
        let out = invoker(InvokerConfig::default())
            .invoke("demo", "greet", &json!({"name": "relay"}), ActionContext::new())
            .await
            .unwrap();
        assert_eq!(out, Some(json!("hello relay")));
    }

    #[tokio::test]
    async fn unknown_component_and_action() {
        let invoker = invoker(InvokerConfig::default());
        let err = invoker
            .invoke("missing", "greet", &json!({}), ActionContext::new())
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = invoker
            .invoke("demo", "missing", &json!({}), ActionContext::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            InvokeError::NotFound(relay_component::ComponentError::ActionNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn validation_runs_before_handler() {
        let err = invoker(InvokerConfig::default())
            .invoke("demo", "greet", &json!({"name": 7}), ActionContext::new())
            .await
            .unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors.mentions("name"));
    }

    #[tokio::test]
    async fn handler_error_is_wrapped() {
        let err = invoker(InvokerConfig::default())
            .invoke("demo", "fail", &json!({}), ActionContext::new())
            .await
            .unwrap_err();
        let InvokeError::Handler { component, action, source } = err else {
            panic!("expected Handler, got {err:?}");
        };
        assert_eq!(component, "demo");
        assert_eq!(action, "fail");
        assert_eq!(source.to_string(), "upstream returned 503");
    }

    #[tokio::test(start_paused = true)]
    async fn default_timeout_cancels_context() {
        let invoker = invoker(InvokerConfig::with_default_timeout(Duration::from_millis(100)));
        let ctx = ActionContext::new();
        let token = ctx.cancellation.clone();

        let err = invoker
            .invoke("demo", "slow", &json!({}), ctx)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            InvokeError::Timeout { after, .. } if after == Duration::from_millis(100)
        ));
        assert!(token.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn per_call_timeout_overrides_default() {
        let invoker = invoker(InvokerConfig::with_default_timeout(Duration::from_millis(100)));
        let out = invoker
            .invoke_with_timeout(
                "demo",
                "slow",
                &json!({}),
                ActionContext::new(),
                Some(Duration::from_secs(120)),
            )
            .await
            .unwrap();
        assert_eq!(out, None);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_per_call_timeout_is_unbounded() {
        let invoker = invoker(InvokerConfig::with_default_timeout(Duration::from_millis(100)));
        let ctx = ActionContext::new();
        let token = ctx.cancellation.clone();
        let out = invoker
            .invoke_with_timeout("demo", "slow", &json!({}), ctx, Some(Duration::ZERO))
            .await
            .unwrap();
        assert_eq!(out, None);
        assert!(!token.is_cancelled());
    }

    #[tokio::test]
    async fn fast_handler_beats_timeout() {
        let invoker = invoker(InvokerConfig::with_default_timeout(Duration::from_secs(5)));
        let ctx = ActionContext::new();
        let token = ctx.cancellation.clone();
        let out = invoker
            .invoke("demo", "greet", &json!({"name": "fast"}), ctx)
            .await
            .unwrap();
        assert_eq!(out, Some(json!("hello fast")));
        assert!(!token.is_cancelled());
    }

    #[test]
    fn accessors() {
        let invoker = invoker(InvokerConfig::default());
        assert_eq!(invoker.registry().len(), 1);
        assert_eq!(invoker.config(), &InvokerConfig::default());
    }
}
