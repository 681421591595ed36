//! Component error types.

use std::path::PathBuf;

use relay_core::{ComponentKey, KeyError};
use semver::Version;

/// Errors from building, loading and looking up components.
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    /// A component with this key is already registered.
    #[error("component '{0}' already exists")]
    DuplicateKey(ComponentKey),

    /// No component is registered under this key.
    #[error("component not found: {0}")]
    ComponentNotFound(String),

    /// The component exists but has no such action.
    #[error("action '{action}' not found in component '{component}'")]
    ActionNotFound {
        /// The component that was searched.
        component: String,
        /// The missing action key.
        action: String,
    },

    /// An update tried to move a component to a lower version.
    #[error("component '{key}' version {attempted} is lower than registered version {current}")]
    VersionRegression {
        /// The component key.
        key: ComponentKey,
        /// The registered version.
        current: Version,
        /// The rejected version.
        attempted: Version,
    },

    /// Load-time checks failed.
    #[error("invalid component '{key}': {}", problems.join("; "))]
    InvalidDescriptor {
        /// The component key.
        key: ComponentKey,
        /// Every problem found.
        problems: Vec<String>,
    },

    /// A manifest action has no handler bound to it.
    #[error("component '{component}' has no handler for action '{action}'")]
    MissingHandler {
        /// The component key.
        component: ComponentKey,
        /// The action without a handler.
        action: String,
    },

    /// Handlers were supplied for actions the manifest does not declare.
    #[error("component '{component}' has handlers for unknown actions: {}", actions.join(", "))]
    UnknownHandler {
        /// The component key.
        component: ComponentKey,
        /// The undeclared action keys, sorted.
        actions: Vec<String>,
    },

    /// Key validation failed.
    #[error("invalid key: {0}")]
    InvalidKey(#[from] KeyError),

    /// The version string is not a semantic version.
    #[error("invalid version '{raw}': {source}")]
    InvalidVersion {
        /// The rejected input.
        raw: String,
        /// Parser error.
        #[source]
        source: semver::Error,
    },

    /// The manifest document could not be parsed.
    #[error("invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    /// The manifest file could not be read.
    #[error("failed to read manifest {}: {source}", path.display())]
    Io {
        /// The file that was read.
        path: PathBuf,
        /// IO error.
        #[source]
        source: std::io::Error,
    },
}

impl ComponentError {
    /// Whether this is a failed component or action lookup.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ComponentNotFound(_) | Self::ActionNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn duplicate_key_display() {
        let err = ComponentError::DuplicateKey("componentKey".parse().unwrap());
        assert_eq!(err.to_string(), "component 'componentKey' already exists");
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_display() {
        let err = ComponentError::ActionNotFound {
            component: "componentKey".into(),
            action: "nope".into(),
        };
        assert_eq!(
            err.to_string(),
            "action 'nope' not found in component 'componentKey'"
        );
        assert!(err.is_not_found());
        assert!(ComponentError::ComponentNotFound("x".into()).is_not_found());
    }

    #[test]
    fn invalid_descriptor_lists_problems() {
        let err = ComponentError::InvalidDescriptor {
            key: "slack".parse().unwrap(),
            problems: vec!["first".into(), "second".into()],
        };
        assert_eq!(err.to_string(), "invalid component 'slack': first; second");
    }

    #[test]
    fn version_regression_display() {
        let err = ComponentError::VersionRegression {
            key: "slack".parse().unwrap(),
            current: Version::new(2, 0, 0),
            attempted: Version::new(1, 4, 0),
        };
        assert_eq!(
            err.to_string(),
            "component 'slack' version 1.4.0 is lower than registered version 2.0.0"
        );
    }
}
