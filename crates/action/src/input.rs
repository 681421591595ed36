use std::fmt;

use relay_core::InputKey;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Closed set of primitive input types.
///
/// Serialized in lowercase, matching the `type` tag of a manifest input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// JSON string.
    String,
    /// Any JSON number.
    Number,
    /// JSON number that fits `i64` or `u64`.
    Integer,
    /// JSON boolean.
    Boolean,
}

impl InputKind {
    /// Whether `value` conforms to this kind. There is no coercion: `"1"` is
    /// not a number and `1` is not a boolean.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
        }
    }

    /// The manifest tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named, typed input of an action.
///
/// Inputs are required unless marked otherwise. An optional input may carry
/// a `default` that is substituted when the caller leaves it out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputField {
    /// Unique within the owning action's input list.
    pub key: InputKey,
    /// Human-readable label.
    pub label: String,
    /// Primitive type tag.
    #[serde(rename = "type")]
    pub kind: InputKind,
    /// Whether the caller must supply a value.
    #[serde(default = "default_required", skip_serializing_if = "is_true")]
    pub required: bool,
    /// Value used when an optional input is left out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

fn default_required() -> bool {
    true
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_true(value: &bool) -> bool {
    *value
}

impl InputField {
    /// Create a required input.
    pub fn new(key: InputKey, label: impl Into<String>, kind: InputKind) -> Self {
        Self {
            key,
            label: label.into(),
            kind,
            required: true,
            default: None,
        }
    }

    /// Mark the input as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Set a default value. Implies [`optional`](Self::optional).
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.required = false;
        self.default = Some(value.into());
        self
    }
}

/// Name of a JSON value's type, for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
