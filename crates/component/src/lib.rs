//! # Relay Component
//!
//! Components group related actions under one key and version. This crate
//! holds the component model and the registry that indexes it:
//!
//! - [`ComponentDescriptor`]: key, display, semantic version and actions
//! - [`ComponentManifest`]: the JSON form of a component, bound to
//!   [`Handlers`] at load time, with a content [`signature`](ComponentManifest::signature)
//! - [`ComponentRegistry`]: lookup of components and actions by key, plus
//!   versioned [`publish`](ComponentRegistry::publish)
//!
//! ```
//! use relay_action::{ActionDescriptor, ActionDisplay, handler_fn};
//! use relay_component::{ComponentDescriptor, ComponentRegistry};
//!
//! let component = ComponentDescriptor::builder("componentKey", "Component label")
//!     .version("0.0.1")
//!     .action(ActionDescriptor::new(
//!         "actionKey".parse().unwrap(),
//!         ActionDisplay::new("Action label", "Action description"),
//!         handler_fn(|_ctx, _params| async move { Ok(None) }),
//!     ))
//!     .build()
//!     .unwrap();
//!
//! let mut registry = ComponentRegistry::new();
//! registry.register(component).unwrap();
//!
//! let action = registry.get_action("componentKey", "actionKey").unwrap();
//! assert_eq!(action.display.label, "Action label");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod descriptor;
mod error;
mod manifest;
mod registry;

pub use descriptor::{
    ComponentDescriptor, ComponentDescriptorBuilder, ComponentDisplay, ComponentSummary,
};
pub use error::ComponentError;
pub use manifest::{ComponentManifest, Handlers};
pub use registry::{ComponentRegistry, PublishOutcome};

pub use relay_core::ComponentKey;
pub use semver::Version;
