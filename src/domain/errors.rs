// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration value crate.
//!
//! This module defines the closed set of error kinds that parsing, coercion,
//! and extraction can produce. All errors use `thiserror` for proper error
//! handling and conversion.

use thiserror::Error;

/// The main error type for configuration value operations.
///
/// Each variant corresponds to one kind in the closed error taxonomy. The
/// enum is marked `#[non_exhaustive]` to allow for future additions without
/// breaking backwards compatibility; use [`ConfigError::code`] for exhaustive
/// programmatic matching.
///
/// # Examples
///
/// ```
/// use dyncfg::domain::errors::{ConfigError, ErrorCode};
///
/// let err = ConfigError::MissingField { field: "server.port".to_string() };
/// assert_eq!(err.code(), ErrorCode::MissingField);
/// assert_eq!(err.to_string(), "missing mandatory field 'server.port'");
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A coercion was rejected: wrong source variant, out-of-range number,
    /// non-integral real, or an unparseable string.
    #[error("{message}")]
    ConversionFailed {
        /// Description of the rejected conversion.
        message: String,
    },

    /// The parser ran out of input before completing a production.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// The parser encountered a character not permitted in the current
    /// production.
    #[error("unexpected character '{found}' at offset {offset}")]
    UnexpectedCharacter {
        /// The offending character.
        found: char,
        /// Byte offset of the character in the input.
        offset: usize,
    },

    /// A value parsed cleanly but non-whitespace input remained.
    #[error("trailing characters after value at offset {offset}")]
    TrailingCharacter {
        /// Byte offset of the first trailing character.
        offset: usize,
    },

    /// A number literal exceeded the 64-bit range.
    #[error("integer literal '{literal}' exceeds the 64-bit range")]
    IntegerOverflow {
        /// The literal as written.
        literal: String,
    },

    /// A string escape sequence was malformed.
    #[error("invalid escape sequence '{escape}' at offset {offset}")]
    InvalidEscapeSequence {
        /// The escape sequence as written, including the backslash.
        escape: String,
        /// Byte offset of the backslash in the input.
        offset: usize,
    },

    /// The inspection bridge failed to find a required field.
    ///
    /// For nested records the field name is a dotted path such as `p1.z`.
    #[error("missing mandatory field '{field}'")]
    MissingField {
        /// Dotted path of the missing field.
        field: String,
    },
}

/// Discriminant-only view of [`ConfigError`], for tests and callers that
/// dispatch on the kind without caring about the payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// See [`ConfigError::ConversionFailed`].
    ConversionFailed,
    /// See [`ConfigError::UnexpectedEof`].
    UnexpectedEof,
    /// See [`ConfigError::UnexpectedCharacter`].
    UnexpectedCharacter,
    /// See [`ConfigError::TrailingCharacter`].
    TrailingCharacter,
    /// See [`ConfigError::IntegerOverflow`].
    IntegerOverflow,
    /// See [`ConfigError::InvalidEscapeSequence`].
    InvalidEscapeSequence,
    /// See [`ConfigError::MissingField`].
    MissingField,
}

impl ConfigError {
    /// Creates a `ConversionFailed` error from a message.
    pub fn conversion(message: impl Into<String>) -> Self {
        ConfigError::ConversionFailed {
            message: message.into(),
        }
    }

    /// Returns the kind of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ConfigError::ConversionFailed { .. } => ErrorCode::ConversionFailed,
            ConfigError::UnexpectedEof => ErrorCode::UnexpectedEof,
            ConfigError::UnexpectedCharacter { .. } => ErrorCode::UnexpectedCharacter,
            ConfigError::TrailingCharacter { .. } => ErrorCode::TrailingCharacter,
            ConfigError::IntegerOverflow { .. } => ErrorCode::IntegerOverflow,
            ConfigError::InvalidEscapeSequence { .. } => ErrorCode::InvalidEscapeSequence,
            ConfigError::MissingField { .. } => ErrorCode::MissingField,
        }
    }
}

/// A specialized Result type for configuration value operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
