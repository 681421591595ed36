//! Component descriptor and builder.

use std::fmt;

use indexmap::IndexMap;
use relay_action::ActionDescriptor;
use relay_core::{ActionKey, ComponentKey};
use semver::Version;
use serde::{Deserialize, Serialize};

use crate::ComponentError;
use crate::manifest::ComponentManifest;

/// Display information for a component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDisplay {
    /// Human name shown in catalogs.
    pub label: String,
    /// What the component integrates with.
    #[serde(default)]
    pub description: String,
    /// Path to an icon asset, relative to the component bundle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
}

/// A named, versioned bundle of actions.
///
/// Built once at load time through [`ComponentDescriptor::builder`] or
/// [`ComponentManifest::bind`], then read-only.
///
/// ```
/// use relay_action::{ActionDescriptor, ActionDisplay, handler_fn};
/// use relay_component::ComponentDescriptor;
///
/// let component = ComponentDescriptor::builder("componentKey", "Component label")
///     .description("Component description")
///     .version("0.0.1")
///     .action(ActionDescriptor::new(
///         "actionKey".parse().unwrap(),
///         ActionDisplay::new("Action label", "Action description"),
///         handler_fn(|_ctx, _params| async move { Ok(None) }),
///     ))
///     .build()
///     .unwrap();
///
/// assert_eq!(component.key().as_str(), "componentKey");
/// assert!(component.action("actionKey").is_some());
/// ```
#[derive(Clone, PartialEq)]
pub struct ComponentDescriptor {
    key: ComponentKey,
    display: ComponentDisplay,
    version: Version,
    actions: IndexMap<ActionKey, ActionDescriptor>,
}

impl ComponentDescriptor {
    /// Start building a descriptor with the minimum required fields.
    pub fn builder(key: impl AsRef<str>, label: impl Into<String>) -> ComponentDescriptorBuilder {
        ComponentDescriptorBuilder {
            key: key.as_ref().to_owned(),
            display: ComponentDisplay {
                label: label.into(),
                ..ComponentDisplay::default()
            },
            version: None,
            actions: Vec::new(),
        }
    }

    /// Assemble a descriptor from parts and run the load-time checks.
    pub(crate) fn from_parts(
        key: ComponentKey,
        display: ComponentDisplay,
        version: Version,
        actions: IndexMap<ActionKey, ActionDescriptor>,
    ) -> Result<Self, ComponentError> {
        let descriptor = Self {
            key,
            display,
            version,
            actions,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// The component key.
    #[inline]
    pub fn key(&self) -> &ComponentKey {
        &self.key
    }

    /// Display information.
    #[inline]
    pub fn display(&self) -> &ComponentDisplay {
        &self.display
    }

    /// Human name.
    #[inline]
    pub fn label(&self) -> &str {
        &self.display.label
    }

    /// Description.
    #[inline]
    pub fn description(&self) -> &str {
        &self.display.description
    }

    /// Icon path, if any.
    #[inline]
    pub fn icon_path(&self) -> Option<&str> {
        self.display.icon_path.as_deref()
    }

    /// Semantic version.
    #[inline]
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Look up an action by key.
    pub fn action(&self, key: &str) -> Option<&ActionDescriptor> {
        self.actions.get(key)
    }

    /// Actions in declaration order.
    pub fn actions(&self) -> impl Iterator<Item = &ActionDescriptor> {
        self.actions.values()
    }

    /// Action keys in declaration order.
    pub fn action_keys(&self) -> impl Iterator<Item = &ActionKey> {
        self.actions.keys()
    }

    /// Number of actions.
    #[inline]
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// Run the load-time checks.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::InvalidDescriptor`] listing every problem.
    pub fn validate(&self) -> Result<(), ComponentError> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ComponentError::InvalidDescriptor {
                key: self.key.clone(),
                problems,
            })
        }
    }

    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.display.label.trim().is_empty() {
            problems.push("display label is empty".to_owned());
        }
        for (stored_under, action) in &self.actions {
            if *stored_under != action.key {
                problems.push(format!(
                    "action '{}' is stored under key '{stored_under}'",
                    action.key
                ));
            }
            problems.extend(action.problems());
        }
        problems
    }

    /// The serializable part of this component.
    pub fn manifest(&self) -> ComponentManifest {
        ComponentManifest {
            key: self.key.clone(),
            display: self.display.clone(),
            version: self.version.clone(),
            actions: self
                .actions
                .iter()
                .map(|(key, action)| (key.to_string(), action.manifest()))
                .collect(),
        }
    }

    /// Content signature of the manifest. See [`ComponentManifest::signature`].
    pub fn signature(&self) -> Result<String, ComponentError> {
        self.manifest().signature()
    }

    /// Catalog entry for this component.
    pub fn summary(&self) -> ComponentSummary {
        ComponentSummary {
            key: self.key.clone(),
            label: self.display.label.clone(),
            description: self.display.description.clone(),
            version: self.version.clone(),
            action_count: self.actions.len(),
        }
    }
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("key", &self.key)
            .field("version", &self.version)
            .field("actions", &self.actions.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Builder for [`ComponentDescriptor`].
pub struct ComponentDescriptorBuilder {
    key: String,
    display: ComponentDisplay,
    version: Option<String>,
    actions: Vec<ActionDescriptor>,
}

impl ComponentDescriptorBuilder {
    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.display.description = description.into();
        self
    }

    /// Set the icon path.
    pub fn icon_path(mut self, path: impl Into<String>) -> Self {
        self.display.icon_path = Some(path.into());
        self
    }

    /// Set the semantic version (defaults to `0.1.0`).
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Add an action, keyed by its own key.
    pub fn action(mut self, action: ActionDescriptor) -> Self {
        self.actions.push(action);
        self
    }

    /// Validate and build the descriptor.
    ///
    /// # Errors
    ///
    /// Fails on an invalid key or version, or with
    /// [`ComponentError::InvalidDescriptor`] when the load-time checks find
    /// problems (a repeated action key counts as one).
    pub fn build(self) -> Result<ComponentDescriptor, ComponentError> {
        let key: ComponentKey = self.key.parse()?;
        let version = match self.version {
            Some(raw) => raw
                .parse()
                .map_err(|source| ComponentError::InvalidVersion { raw, source })?,
            None => Version::new(0, 1, 0),
        };

        let mut problems = Vec::new();
        let mut actions = IndexMap::with_capacity(self.actions.len());
        for action in self.actions {
            let action_key = action.key.clone();
            if actions.insert(action_key.clone(), action).is_some() {
                problems.push(format!("duplicate action key '{action_key}'"));
            }
        }

        match ComponentDescriptor::from_parts(key.clone(), self.display, version, actions) {
            Err(ComponentError::InvalidDescriptor { problems: more, .. }) => {
                problems.extend(more);
                Err(ComponentError::InvalidDescriptor { key, problems })
            }
            Ok(_) if !problems.is_empty() => Err(ComponentError::InvalidDescriptor { key, problems }),
            other => other,
        }
    }
}

/// Catalog entry: what a listing shows without exposing handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentSummary {
    /// Component key.
    pub key: ComponentKey,
    /// Human name.
    pub label: String,
    /// Description.
    pub description: String,
    /// Semantic version.
    pub version: Version,
    /// Number of actions.
    pub action_count: usize,
}
