//! Convenience re-exports for action authors.
//!
//! ```rust,ignore
//! use relay_action::prelude::*;
//! ```

pub use crate::context::ActionContext;
pub use crate::descriptor::{ActionDescriptor, ActionDisplay};
pub use crate::error::ActionError;
pub use crate::handler::{ActionHandler, handler_fn};
pub use crate::input::{InputField, InputKind};
pub use crate::logger::ActionLogger;
pub use crate::validate::Params;
