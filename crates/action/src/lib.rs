//! # Relay Action
//!
//! What an action is and how a host talks to it.
//!
//! An action is declared by an [`ActionDescriptor`]: a key, display
//! information, an ordered input schema of [`InputField`]s and an
//! [`ActionHandler`]. Before a handler runs, raw parameters are checked with
//! [`validate`], which reports every offending input at once and produces
//! normalized [`Params`].
//!
//! ## Core Types
//!
//! - [`ActionDescriptor`] / [`ActionManifest`]: action with and without its handler
//! - [`InputField`] / [`InputKind`]: typed input schema
//! - [`validate`] / [`Params`] / [`ValidationErrors`]: parameter validation
//! - [`ActionHandler`] / [`handler_fn`]: the asynchronous unit of work
//! - [`ActionContext`]: per-invocation id, cancellation and logger
//! - [`ActionLogger`]: logging port ([`TracingLogger`], [`MemoryLogger`])
//! - [`ActionError`]: handler failure cause
//!
//! ## Quick Start
//!
//! ```rust
//! use relay_action::prelude::*;
//!
//! # async fn demo() {
//! let action = ActionDescriptor::new(
//!     "actionKey".parse().unwrap(),
//!     ActionDisplay::new("Action label", "Action description"),
//!     handler_fn(|ctx, _params| async move {
//!         ctx.logger().warn("oi");
//!         Ok(None)
//!     }),
//! )
//! .with_input(InputField::new("inputKey".parse().unwrap(), "Input label", InputKind::String));
//!
//! let params = action
//!     .validate_params(&serde_json::json!({"inputKey": "x"}))
//!     .unwrap();
//! let out = action.perform(ActionContext::new(), params).await.unwrap();
//! assert!(out.is_none());
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Runtime context provided to handlers during execution.
pub mod context;
/// Action descriptors and their serializable manifests.
pub mod descriptor;
/// Handler failure type.
pub mod error;
/// The handler contract and closure adapter.
pub mod handler;
/// Input schema entries and type tags.
pub mod input;
/// Logging port and its implementations.
pub mod logger;
/// Convenience re-exports for action authors.
pub mod prelude;
/// Parameter validation.
pub mod validate;

// ── Public re-exports ───────────────────────────────────────────────────────

pub use context::ActionContext;
pub use descriptor::{ActionDescriptor, ActionDisplay, ActionManifest};
pub use error::ActionError;
pub use handler::{ActionHandler, FnHandler, handler_fn};
pub use input::{InputField, InputKind};
pub use logger::{ActionLogger, LogLevel, LogRecord, MemoryLogger, TracingLogger};
pub use validate::{FieldError, Params, ValidationErrors, validate};

pub use relay_core::{ActionKey, InputKey, InvocationId};
