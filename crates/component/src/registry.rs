//! In-memory component registry.

use std::collections::HashMap;
use std::sync::Arc;

use relay_action::ActionDescriptor;
use relay_core::ComponentKey;
use semver::Version;

use crate::ComponentError;
use crate::descriptor::{ComponentDescriptor, ComponentSummary};

/// Result of [`ComponentRegistry::publish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The key was not registered before.
    Created,
    /// An older or equal version was replaced.
    Updated {
        /// The version that was replaced.
        previous: Version,
    },
    /// Same version and same manifest signature; the stored descriptor was kept.
    Unchanged,
}

/// In-memory registry mapping [`ComponentKey`] to [`ComponentDescriptor`].
///
/// Filled at load time and read-only afterwards. Share it across tasks by
/// wrapping it in an `Arc`; mutation needs `&mut self`, so a shared registry
/// cannot change underneath an invocation.
///
/// ```
/// use relay_component::{ComponentDescriptor, ComponentRegistry};
///
/// let mut registry = ComponentRegistry::new();
/// let component = ComponentDescriptor::builder("echo", "Echo").build().unwrap();
/// registry.register(component).unwrap();
///
/// assert!(registry.contains("echo"));
/// assert!(registry.get_component("echo").is_ok());
/// ```
pub struct ComponentRegistry {
    components: HashMap<ComponentKey, Arc<ComponentDescriptor>>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            components: HashMap::new(),
        }
    }

    /// Register a component. Fails if the key already exists or the
    /// descriptor does not pass the load-time checks.
    pub fn register(
        &mut self,
        descriptor: ComponentDescriptor,
    ) -> Result<Arc<ComponentDescriptor>, ComponentError> {
        descriptor.validate()?;
        let key = descriptor.key().clone();
        if self.components.contains_key(&key) {
            return Err(ComponentError::DuplicateKey(key));
        }

        tracing::info!(
            component = %key,
            version = %descriptor.version(),
            actions = descriptor.action_count(),
            "registered component"
        );
        let descriptor = Arc::new(descriptor);
        self.components.insert(key, Arc::clone(&descriptor));
        Ok(descriptor)
    }

    /// Insert or update a component.
    ///
    /// A lower version than the registered one is rejected. Publishing the
    /// same version with an identical manifest is a no-op.
    pub fn publish(
        &mut self,
        descriptor: ComponentDescriptor,
    ) -> Result<PublishOutcome, ComponentError> {
        descriptor.validate()?;
        let key = descriptor.key().clone();

        let outcome = match self.components.get(&key) {
            None => PublishOutcome::Created,
            Some(current) if descriptor.version() < current.version() => {
                return Err(ComponentError::VersionRegression {
                    key,
                    current: current.version().clone(),
                    attempted: descriptor.version().clone(),
                });
            }
            Some(current)
                if descriptor.version() == current.version()
                    && descriptor.signature()? == current.signature()? =>
            {
                tracing::debug!(
                    component = %key,
                    version = %current.version(),
                    "publish skipped, manifest unchanged"
                );
                return Ok(PublishOutcome::Unchanged);
            }
            Some(current) => PublishOutcome::Updated {
                previous: current.version().clone(),
            },
        };

        tracing::info!(
            component = %key,
            version = %descriptor.version(),
            outcome = ?outcome,
            "published component"
        );
        self.components.insert(key, Arc::new(descriptor));
        Ok(outcome)
    }

    /// Look up a component by key.
    pub fn get_component(&self, key: &str) -> Result<Arc<ComponentDescriptor>, ComponentError> {
        self.components
            .get(key)
            .cloned()
            .ok_or_else(|| ComponentError::ComponentNotFound(key.to_owned()))
    }

    /// Look up an action through its component.
    pub fn get_action(
        &self,
        component_key: &str,
        action_key: &str,
    ) -> Result<&ActionDescriptor, ComponentError> {
        let component = self
            .components
            .get(component_key)
            .ok_or_else(|| ComponentError::ComponentNotFound(component_key.to_owned()))?;
        component
            .action(action_key)
            .ok_or_else(|| ComponentError::ActionNotFound {
                component: component_key.to_owned(),
                action: action_key.to_owned(),
            })
    }

    /// Whether a component with the given key exists.
    pub fn contains(&self, key: &str) -> bool {
        self.components.contains_key(key)
    }

    /// All registered keys, sorted.
    pub fn keys(&self) -> Vec<ComponentKey> {
        let mut keys: Vec<ComponentKey> = self.components.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Catalog entries for every component, sorted by key.
    pub fn summaries(&self) -> Vec<ComponentSummary> {
        let mut summaries: Vec<ComponentSummary> =
            self.components.values().map(|c| c.summary()).collect();
        summaries.sort_by(|a, b| a.key.cmp(&b.key));
        summaries
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("count", &self.components.len())
            .field("keys", &self.keys())
            .finish()
    }
}
