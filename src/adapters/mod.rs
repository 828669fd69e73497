// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters for the textual format and the inspection protocol.
//!
//! This module contains everything that connects the domain model to the
//! outside: the lexer and parser for the configuration text format, the
//! canonical printer, the relaxed command-line parsing mode, and the
//! `Value`-backed reader/writer pair driving the inspection protocol.

pub mod cli;
pub(crate) mod lexer;
pub mod object;
pub(crate) mod printer;
pub mod text;

// Re-export commonly used entry points
pub use cli::{parse_cli, CliValue, Shape};
pub use object::{read_object, write_object};
pub use text::{parse_config, parse_dictionary, parse_list, parse_value};
