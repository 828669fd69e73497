// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration key newtype for type-safe dotted-path handling.
//!
//! This module provides the `ConfigKey` type, a newtype wrapper around
//! `String` that represents a dotted key path such as `scheduler.max-threads`
//! and prevents accidental string confusion.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A type-safe wrapper for dotted configuration keys.
///
/// A key of the form `a.b.c` addresses the entry `c` inside the nested
/// dictionaries `a` and `b`; see [`settings`](crate::domain::settings) for
/// the accessors that interpret it.
///
/// # Examples
///
/// ```
/// use dyncfg::domain::config_key::ConfigKey;
///
/// let key = ConfigKey::from("database.connection.host");
/// assert_eq!(key.segments().collect::<Vec<_>>(), ["database", "connection", "host"]);
/// assert_eq!(key.leaf(), "host");
/// assert_eq!(key.parent().unwrap().as_str(), "database.connection");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Creates a new `ConfigKey` from a `String`.
    pub fn new(key: String) -> Self {
        ConfigKey(key)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `ConfigKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Iterates over the dot-separated segments of the key.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Returns the last segment of the key.
    pub fn leaf(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Returns the key without its last segment, or `None` for a
    /// single-segment key.
    pub fn parent(&self) -> Option<ConfigKey> {
        self.0
            .rfind('.')
            .map(|idx| ConfigKey(self.0[..idx].to_string()))
    }

    /// Returns a new key with `segment` appended.
    ///
    /// # Examples
    ///
    /// ```
    /// use dyncfg::domain::config_key::ConfigKey;
    ///
    /// let key = ConfigKey::from("scheduler").child("policy");
    /// assert_eq!(key.as_str(), "scheduler.policy");
    /// ```
    pub fn child(&self, segment: &str) -> ConfigKey {
        if self.0.is_empty() {
            ConfigKey(segment.to_string())
        } else {
            ConfigKey(format!("{}.{}", self.0, segment))
        }
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey(s)
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey(s.to_string())
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Hash for ConfigKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}
