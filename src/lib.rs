// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dynamically typed configuration values.
//!
//! This crate provides [`Value`](domain::Value), a tagged union carrying
//! application configuration, together with the machinery around it: a
//! parser for a human-friendly text format, a coercion engine with
//! well-defined bounds and precision rules, typed extraction into arbitrary
//! Rust types, and a field-by-name inspection protocol for user records.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: The value model — `Value`, `Timespan`, `Uri`,
//!   `ConfigKey`, the coercion engine, dotted-path accessors, and errors
//! - **Ports**: Trait definitions for typed extraction (`FromValue`,
//!   `ToValue`) and the inspection protocol (`Inspect`, `FieldVisitor`)
//! - **Adapters**: The text format (parser and canonical printer), the
//!   relaxed command-line parsing mode, and the `Value`-backed visitors
//!   that drive the inspection protocol
//!
//! # Quick Start
//!
//! ```rust
//! use dyncfg::prelude::*;
//!
//! # fn main() -> dyncfg::domain::Result<()> {
//! let value = Value::parse("{window { width = 1280, height = 720 }, title = demo}")?;
//! let dict = value.to_dictionary()?;
//! assert_eq!(settings::get(&dict, "window.width"), Some(&Value::from(1280)));
//!
//! let size: (u32, u32) = Value::parse("[1280, 720]")?.get_as()?;
//! assert_eq!(size, (1280, 720));
//! # Ok(())
//! # }
//! ```
//!
//! # Text format
//!
//! The format is a superset of a JSON-like syntax: timespans (`10ms`),
//! comments (`#`, `//`, `/* ... */`), dotted keys (`a.b.c = 1`), `key =
//! value` entries, `key { ... }` sugar for nested dictionaries, and
//! trailing commas. See [`adapters::text`] for the grammar entry points and
//! [`adapters::cli`] for the relaxed command-line mode.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for
/// convenient access.
pub mod prelude {
    pub use crate::adapters::cli::{parse_cli, CliValue};
    pub use crate::adapters::object::{read_object, write_object};
    pub use crate::adapters::text::{parse_config, parse_dictionary, parse_list, parse_value};
    pub use crate::domain::settings;
    pub use crate::domain::{
        ConfigError, ConfigKey, Dictionary, ErrorCode, List, Result, Timespan, Uri, Value,
    };
    pub use crate::ports::{get_as, FieldVisitor, FromValue, Inspect, ToValue};
}
