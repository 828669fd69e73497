// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports (trait interfaces) for reading and writing typed values.
//!
//! The extraction traits turn values into user-requested types and back;
//! the inspection traits let user record types describe their fields to a
//! generic visitor. Implementations of these interfaces live in the
//! adapters layer.

pub mod extract;
pub mod inspect;

// Re-export commonly used traits
pub use extract::{get_as, FromValue, ToValue};
pub use inspect::{FieldVisitor, Inspect};
