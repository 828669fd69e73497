// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dotted-path accessors for dictionaries.
//!
//! A key of the form `a.b.c` addresses the entry `c` inside the nested
//! dictionaries `a` and `b`. Reads treat a missing or non-dictionary
//! intermediate as "not found"; writes create missing intermediates and
//! reject intermediates that already hold a non-dictionary value.

use crate::domain::errors::{ConfigError, Result};
use crate::domain::value::{Dictionary, Value};

/// Looks up a dotted key, returning `None` when any segment is missing or
/// an intermediate is not a dictionary.
///
/// # Examples
///
/// ```
/// use dyncfg::domain::settings;
/// use dyncfg::domain::value::{Dictionary, Value};
///
/// let mut dict = Dictionary::new();
/// settings::put(&mut dict, "scheduler.max-threads", 2).unwrap();
/// assert_eq!(settings::get(&dict, "scheduler.max-threads"), Some(&Value::from(2)));
/// assert_eq!(settings::get(&dict, "scheduler.policy"), None);
/// ```
pub fn get<'a>(dict: &'a Dictionary, key: impl AsRef<str>) -> Option<&'a Value> {
    let (parent, leaf) = split_leaf(key.as_ref());
    let mut current = dict;
    for segment in segments_of(parent) {
        match current.get(segment) {
            Some(Value::Dictionary(next)) => current = next,
            _ => return None,
        }
    }
    current.get(leaf)
}

/// Mutable variant of [`get`].
pub fn get_mut<'a>(dict: &'a mut Dictionary, key: impl AsRef<str>) -> Option<&'a mut Value> {
    let (parent, leaf) = split_leaf(key.as_ref());
    let mut current = dict;
    for segment in segments_of(parent) {
        match current.get_mut(segment) {
            Some(Value::Dictionary(next)) => current = next,
            _ => return None,
        }
    }
    current.get_mut(leaf)
}

/// Returns `true` if [`get`] would find the key.
pub fn contains(dict: &Dictionary, key: impl AsRef<str>) -> bool {
    get(dict, key).is_some()
}

/// Writes a value at a dotted key, creating missing intermediate
/// dictionaries. Returns the previous value stored at the key, if any.
///
/// Fails with `conversion_failed` when an intermediate segment already
/// holds a non-dictionary value.
///
/// # Examples
///
/// ```
/// use dyncfg::domain::settings;
/// use dyncfg::domain::value::Dictionary;
///
/// let mut dict = Dictionary::new();
/// settings::put(&mut dict, "p1.x", 1).unwrap();
/// settings::put(&mut dict, "p1.y", 2).unwrap();
/// assert!(settings::contains(&dict, "p1.y"));
/// // "p1.x" holds an integer, so it cannot be traversed further.
/// assert!(settings::put(&mut dict, "p1.x.deep", 3).is_err());
/// ```
pub fn put(
    dict: &mut Dictionary,
    key: impl AsRef<str>,
    value: impl Into<Value>,
) -> Result<Option<Value>> {
    let key = key.as_ref();
    let (parent, leaf) = split_leaf(key);
    let mut current = dict;
    for segment in segments_of(parent) {
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Dictionary(Dictionary::new()));
        match entry {
            Value::Dictionary(next) => current = next,
            other => {
                return Err(ConfigError::conversion(format!(
                    "cannot write key '{}': segment '{}' holds a {}, not a dictionary",
                    key,
                    segment,
                    other.type_name()
                )))
            }
        }
    }
    Ok(current.insert(leaf.to_string(), value.into()))
}

/// Like [`put`], but leaves an existing entry untouched. Returns `true` if
/// the value was inserted.
pub fn put_missing(
    dict: &mut Dictionary,
    key: impl AsRef<str>,
    value: impl Into<Value>,
) -> Result<bool> {
    if contains(dict, key.as_ref()) {
        return Ok(false);
    }
    put(dict, key, value)?;
    Ok(true)
}

/// Splits a dotted key into its intermediate part and its leaf.
fn split_leaf(key: &str) -> (&str, &str) {
    match key.rfind('.') {
        Some(idx) => (&key[..idx], &key[idx + 1..]),
        None => ("", key),
    }
}

/// Iterates the segments of an intermediate part, which may be empty.
fn segments_of(parent: &str) -> impl Iterator<Item = &str> {
    parent.split('.').filter(|segment| !segment.is_empty())
}
