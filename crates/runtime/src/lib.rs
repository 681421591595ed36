//! # Relay Runtime
//!
//! Single-call action invocation over a [`ComponentRegistry`].
//!
//! This crate provides:
//! - [`Invoker`]: resolves, validates and runs one action call
//! - [`InvokerConfig`]: default timeout, from JSON or the environment
//! - [`InvokeError`]: not found, validation, handler and timeout failures
//!
//! ```
//! use std::sync::Arc;
//!
//! use relay_action::{ActionContext, ActionDescriptor, ActionDisplay, handler_fn};
//! use relay_component::{ComponentDescriptor, ComponentRegistry};
//! use relay_runtime::Invoker;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut registry = ComponentRegistry::new();
//! registry
//!     .register(
//!         ComponentDescriptor::builder("componentKey", "Component label")
//!             .action(ActionDescriptor::new(
//!                 "actionKey".parse().unwrap(),
//!                 ActionDisplay::new("Action label", "Action description"),
//!                 handler_fn(|ctx, _params| async move {
//!                     ctx.logger().warn("oi");
//!                     Ok(None)
//!                 }),
//!             ))
//!             .build()
//!             .unwrap(),
//!     )
//!     .unwrap();
//!
//! let invoker = Invoker::new(Arc::new(registry));
//! let out = invoker
//!     .invoke("componentKey", "actionKey", &serde_json::json!({}), ActionContext::new())
//!     .await
//!     .unwrap();
//! assert_eq!(out, None);
//! # }
//! ```
//!
//! [`ComponentRegistry`]: relay_component::ComponentRegistry

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod invoker;

pub use config::{InvokerConfig, TIMEOUT_ENV};
pub use error::InvokeError;
pub use invoker::Invoker;
