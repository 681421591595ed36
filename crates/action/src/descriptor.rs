use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use relay_core::ActionKey;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::ActionContext;
use crate::error::ActionError;
use crate::handler::ActionHandler;
use crate::input::InputField;
use crate::validate::{Params, ValidationErrors, validate};

/// Display information for an action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDisplay {
    /// Short human name (e.g. `"Send Message"`).
    pub label: String,
    /// Longer description of what the action does.
    #[serde(default)]
    pub description: String,
}

impl ActionDisplay {
    /// Create display information.
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
        }
    }
}

/// Serializable part of an action: everything except the handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionManifest {
    /// Unique key within the owning component.
    pub key: ActionKey,
    /// Display information.
    pub display: ActionDisplay,
    /// Ordered input schema.
    #[serde(default)]
    pub inputs: Vec<InputField>,
}

impl ActionManifest {
    /// Attach a handler, producing a full descriptor.
    pub fn bind(self, handler: Arc<dyn ActionHandler>) -> ActionDescriptor {
        ActionDescriptor {
            key: self.key,
            display: self.display,
            inputs: self.inputs,
            perform: handler,
        }
    }
}

/// A discoverable action: identity, display, input schema and handler.
///
/// Built once at load time and read-only afterwards.
///
/// ```rust
/// use relay_action::{ActionDescriptor, ActionDisplay, InputField, InputKind, handler_fn};
///
/// let action = ActionDescriptor::new(
///     "actionKey".parse().unwrap(),
///     ActionDisplay::new("Action label", "Action description"),
///     handler_fn(|ctx, _params| async move {
///         ctx.logger().warn("oi");
///         Ok(None)
///     }),
/// )
/// .with_input(InputField::new(
///     "inputKey".parse().unwrap(),
///     "Input label",
///     InputKind::String,
/// ));
///
/// assert_eq!(action.key, "actionKey");
/// assert_eq!(action.inputs.len(), 1);
/// ```
#[derive(Clone)]
pub struct ActionDescriptor {
    /// Unique key within the owning component.
    pub key: ActionKey,
    /// Display information.
    pub display: ActionDisplay,
    /// Ordered input schema.
    pub inputs: Vec<InputField>,
    perform: Arc<dyn ActionHandler>,
}

impl ActionDescriptor {
    /// Create a descriptor with no inputs.
    pub fn new(key: ActionKey, display: ActionDisplay, handler: impl ActionHandler) -> Self {
        Self::with_shared_handler(key, display, Arc::new(handler))
    }

    /// Create a descriptor around an already shared handler.
    pub fn with_shared_handler(
        key: ActionKey,
        display: ActionDisplay,
        handler: Arc<dyn ActionHandler>,
    ) -> Self {
        Self {
            key,
            display,
            inputs: Vec::new(),
            perform: handler,
        }
    }

    /// Append an input to the schema.
    pub fn with_input(mut self, field: InputField) -> Self {
        self.inputs.push(field);
        self
    }

    /// Look up an input by key.
    pub fn input(&self, key: &str) -> Option<&InputField> {
        self.inputs.iter().find(|f| f.key == key)
    }

    /// The handler.
    pub fn handler(&self) -> &Arc<dyn ActionHandler> {
        &self.perform
    }

    /// Validate raw parameters against this action's inputs.
    pub fn validate_params(&self, raw: &Value) -> Result<Params, ValidationErrors> {
        validate(&self.inputs, raw)
    }

    /// Run the handler with already validated parameters.
    pub async fn perform(
        &self,
        ctx: ActionContext,
        params: Params,
    ) -> Result<Option<Value>, ActionError> {
        self.perform.perform(ctx, params).await
    }

    /// The serializable part of this action.
    pub fn manifest(&self) -> ActionManifest {
        ActionManifest {
            key: self.key.clone(),
            display: self.display.clone(),
            inputs: self.inputs.clone(),
        }
    }

    /// Schema problems: duplicate input keys and defaults that do not match
    /// their input's kind. Empty when the action is well formed.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut seen = HashSet::new();
        for field in &self.inputs {
            if !seen.insert(field.key.as_str()) {
                problems.push(format!(
                    "action '{}': duplicate input key '{}'",
                    self.key, field.key
                ));
            }
            if let Some(default) = &field.default
                && !field.kind.accepts(default)
            {
                problems.push(format!(
                    "action '{}': default for input '{}' does not match type {}",
                    self.key, field.key, field.kind
                ));
            }
        }
        problems
    }
}

impl PartialEq for ActionDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.display == other.display
            && self.inputs == other.inputs
            && std::ptr::addr_eq(Arc::as_ptr(&self.perform), Arc::as_ptr(&other.perform))
    }
}

impl fmt::Debug for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDescriptor")
            .field("key", &self.key)
            .field("display", &self.display)
            .field("inputs", &self.inputs)
            .finish_non_exhaustive()
    }
}
