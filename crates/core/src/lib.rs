//! # Relay Core
//!
//! Key and identifier types shared by every Relay crate.
//!
//! - **Keys**: [`ComponentKey`], [`ActionKey`], [`InputKey`], validated string
//!   newtypes that are case sensitive and never normalized
//! - **Identifiers**: [`InvocationId`], one per action invocation
//!
//! ```rust
//! use relay_core::{ActionKey, ComponentKey};
//!
//! let component: ComponentKey = "componentKey".parse().unwrap();
//! let action: ActionKey = "actionKey".parse().unwrap();
//! assert_eq!(component, "componentKey");
//! assert_eq!(action.as_str(), "actionKey");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod id;
mod keys;

pub use id::InvocationId;
pub use keys::{ActionKey, ComponentKey, InputKey, KEY_MAX_LEN, KeyError};
