//! JSON manifest: a component without its handlers.
//!
//! A manifest is what ships alongside component code. At load time the host
//! reads it, supplies one handler per declared action, and gets back a
//! [`ComponentDescriptor`]:
//!
//! ```
//! use relay_component::{ComponentManifest, Handlers};
//! use relay_action::handler_fn;
//!
//! let manifest = ComponentManifest::from_json(r#"{
//!     "key": "componentKey",
//!     "display": { "label": "Component label", "description": "Component description" },
//!     "version": "0.0.1",
//!     "actions": {
//!         "actionKey": {
//!             "key": "actionKey",
//!             "display": { "label": "Action label", "description": "Action description" },
//!             "inputs": [{ "key": "inputKey", "label": "Input label", "type": "string" }]
//!         }
//!     }
//! }"#).unwrap();
//!
//! let component = manifest
//!     .bind(Handlers::new().with("actionKey", handler_fn(|ctx, _params| async move {
//!         ctx.logger().warn("oi");
//!         Ok(None)
//!     })))
//!     .unwrap();
//! assert_eq!(component.action_count(), 1);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use relay_action::{ActionHandler, ActionManifest};
use relay_core::{ActionKey, ComponentKey};
use semver::Version;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::ComponentError;
use crate::descriptor::{ComponentDescriptor, ComponentDisplay};

/// Serializable form of a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentManifest {
    /// Component key.
    pub key: ComponentKey,
    /// Display information.
    pub display: ComponentDisplay,
    /// Semantic version.
    pub version: Version,
    /// Actions keyed by action key, in declaration order.
    #[serde(default)]
    pub actions: IndexMap<String, ActionManifest>,
}

impl ComponentManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ComponentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a manifest file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ComponentError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ComponentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest = Self::from_json(&json)?;
        tracing::debug!(
            component = %manifest.key,
            path = %path.display(),
            actions = manifest.actions.len(),
            "loaded component manifest"
        );
        Ok(manifest)
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ComponentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Lower-case hex SHA-256 of the canonical JSON form.
    ///
    /// Object keys are sorted at every level before hashing, so two equal
    /// manifests have the same signature regardless of action order.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::Manifest`] if the manifest cannot be
    /// converted to JSON.
    pub fn signature(&self) -> Result<String, ComponentError> {
        let value = serde_json::to_value(self)?;
        let mut canonical = String::new();
        write_canonical(&value, &mut canonical);
        let digest = Sha256::digest(canonical.as_bytes());
        Ok(hex::encode(digest.as_slice()))
    }

    /// Attach handlers, one per declared action, and run the load-time checks.
    ///
    /// # Errors
    ///
    /// - [`ComponentError::MissingHandler`] when a declared action has no handler
    /// - [`ComponentError::UnknownHandler`] when handlers are left over
    /// - [`ComponentError::InvalidKey`] when an action map key is malformed
    /// - [`ComponentError::InvalidDescriptor`] when the load-time checks fail
    pub fn bind(self, handlers: Handlers) -> Result<ComponentDescriptor, ComponentError> {
        let mut handlers = handlers.map;
        let mut actions = IndexMap::with_capacity(self.actions.len());

        for (stored_under, action) in self.actions {
            let Some(handler) = handlers.remove(&stored_under) else {
                return Err(ComponentError::MissingHandler {
                    component: self.key,
                    action: stored_under,
                });
            };
            let key: ActionKey = stored_under.parse()?;
            actions.insert(key, action.bind(handler));
        }

        if !handlers.is_empty() {
            let mut unknown: Vec<String> = handlers.into_keys().collect();
            unknown.sort();
            return Err(ComponentError::UnknownHandler {
                component: self.key,
                actions: unknown,
            });
        }

        ComponentDescriptor::from_parts(self.key, self.display, self.version, actions)
    }
}

/// Handlers keyed by the action they implement.
#[derive(Clone, Default)]
pub struct Handlers {
    map: HashMap<String, Arc<dyn ActionHandler>>,
}

impl Handlers {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handler for `action`.
    pub fn with(self, action: impl Into<String>, handler: impl ActionHandler) -> Self {
        self.with_shared(action, Arc::new(handler))
    }

    /// Add an already shared handler for `action`.
    pub fn with_shared(mut self, action: impl Into<String>, handler: Arc<dyn ActionHandler>) -> Self {
        self.insert(action, handler);
        self
    }

    /// Add or replace the handler for `action`.
    pub fn insert(&mut self, action: impl Into<String>, handler: Arc<dyn ActionHandler>) {
        self.map.insert(action.into(), handler);
    }

    /// Number of handlers.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether there are no handlers.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.map.keys().collect();
        keys.sort();
        f.debug_struct("Handlers").field("actions", &keys).finish()
    }
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, value)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(&Value::String(key.clone()), out);
                out.push(':');
                write_canonical(value, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}
