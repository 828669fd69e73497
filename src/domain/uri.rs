// SPDX-License-Identifier: MIT OR Apache-2.0

//! Opaque absolute-URI leaf type.
//!
//! The configuration grammar never produces URIs; they enter a value tree
//! only through programmatic construction. The type therefore validates no
//! more than the shape required to tell a URI apart from a plain string: an
//! RFC 3986 scheme followed by `:`.

use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An absolute URI, stored verbatim.
///
/// # Examples
///
/// ```
/// use dyncfg::domain::uri::Uri;
///
/// let uri: Uri = "https://actor-framework.org".parse().unwrap();
/// assert_eq!(uri.scheme(), "https");
/// assert_eq!(uri.as_str(), "https://actor-framework.org");
/// assert!("not a uri".parse::<Uri>().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uri(String);

impl Uri {
    /// Creates a URI after checking for a leading scheme.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        match scheme_end(&text) {
            Some(_) => Ok(Uri(text)),
            None => Err(ConfigError::conversion(format!(
                "cannot convert {:?} to a uri: missing scheme",
                text
            ))),
        }
    }

    /// Returns the URI as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the scheme component, without the trailing `:`.
    pub fn scheme(&self) -> &str {
        // Validated on construction, so the ':' is always present.
        let end = scheme_end(&self.0).unwrap_or(0);
        &self.0[..end]
    }

    /// Converts the URI into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Byte offset of the `:` ending a valid scheme, if the text has one.
fn scheme_end(text: &str) -> Option<usize> {
    let colon = text.find(':')?;
    let scheme = &text[..colon];
    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        Some(colon)
    } else {
        None
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Uri {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Uri::new(s)
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
