// SPDX-License-Identifier: MIT OR Apache-2.0

//! The dynamically typed configuration value.
//!
//! This module provides the `Value` type, a tagged union over the nine
//! variants a configuration value may hold, together with its mutation
//! primitives and the top-level parse entry point.

use crate::domain::errors::Result;
use crate::domain::timespan::Timespan;
use crate::domain::uri::Uri;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// An ordered sequence of values. Duplicates are allowed.
pub type List = Vec<Value>;

/// A mapping from string keys to values with stable, insertion-ordered
/// iteration.
pub type Dictionary = IndexMap<String, Value>;

/// Public tag names, indexed by discriminator order.
const TYPE_NAMES: [&str; 9] = [
    "none",
    "integer",
    "boolean",
    "real",
    "timespan",
    "uri",
    "string",
    "list",
    "dictionary",
];

/// A dynamically typed configuration value.
///
/// `Value` carries application configuration obtained from files, command
/// line arguments, or programmatic construction. The variant order is part
/// of the public contract: it determines [`Value::type_name`] and the
/// ordering of values with different variants.
///
/// # Examples
///
/// ```
/// use dyncfg::domain::value::Value;
///
/// let v = Value::parse("[1, 2, 3]").unwrap();
/// assert_eq!(v.type_name(), "list");
/// assert_eq!(v.get_as::<Vec<i64>>().unwrap(), vec![1, 2, 3]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Absence of data. The default.
    #[default]
    None,
    /// A signed 64-bit integer.
    Integer(i64),
    /// A boolean.
    Boolean(bool),
    /// A 64-bit IEEE-754 floating point number.
    Real(f64),
    /// A signed 64-bit nanosecond count.
    Timespan(Timespan),
    /// An opaque absolute URI.
    Uri(Uri),
    /// A UTF-8 string.
    String(String),
    /// An ordered sequence of values.
    List(List),
    /// A string-keyed mapping with insertion-ordered iteration.
    Dictionary(Dictionary),
}

impl Value {
    /// Parses a complete input string into a value.
    ///
    /// Leading whitespace is skipped; empty input fails with
    /// [`UnexpectedEof`](crate::domain::errors::ErrorCode::UnexpectedEof).
    /// When the strict grammar rejects the input and the first
    /// non-whitespace character does not clearly announce a structured form
    /// (`[`, `{`, a quote, or a digit), the entire input is returned as an
    /// unquoted string instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use dyncfg::domain::value::Value;
    ///
    /// assert_eq!(Value::parse("10ms").unwrap().type_name(), "timespan");
    /// assert_eq!(Value::parse("abc").unwrap(), Value::String("abc".into()));
    /// assert!(Value::parse("[1,").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Value> {
        let first = match input.chars().find(|c| !c.is_whitespace()) {
            Some(c) => c,
            None => return Err(crate::domain::errors::ConfigError::UnexpectedEof),
        };
        match crate::adapters::text::parse_value(input) {
            Ok(value) => Ok(value),
            Err(err) if matches!(first, '[' | '{' | '"' | '\'') || first.is_ascii_digit() => {
                Err(err)
            }
            // Unescaped string fallback: `abc def` is the string "abc def".
            Err(_) => Ok(Value::String(input.to_string())),
        }
    }

    /// Returns the tag name of the current variant.
    pub fn type_name(&self) -> &'static str {
        TYPE_NAMES[self.tag_index()]
    }

    /// Returns the discriminator index of the current variant.
    pub(crate) fn tag_index(&self) -> usize {
        match self {
            Value::None => 0,
            Value::Integer(_) => 1,
            Value::Boolean(_) => 2,
            Value::Real(_) => 3,
            Value::Timespan(_) => 4,
            Value::Uri(_) => 5,
            Value::String(_) => 6,
            Value::List(_) => 7,
            Value::Dictionary(_) => 8,
        }
    }

    /// Returns `true` if the value holds no data.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Converts the value into a list in place.
    ///
    /// A list stays untouched, `None` becomes the empty list, and any other
    /// variant becomes a single-element list holding the previous value.
    pub fn convert_to_list(&mut self) {
        match self {
            Value::List(_) => {}
            Value::None => *self = Value::List(List::new()),
            _ => {
                let prev = std::mem::take(self);
                *self = Value::List(vec![prev]);
            }
        }
    }

    /// Converts to a list in place and returns a mutable reference to it.
    pub fn as_list(&mut self) -> &mut List {
        self.convert_to_list();
        match self {
            Value::List(items) => items,
            _ => unreachable!("convert_to_list always leaves a list"),
        }
    }

    /// Replaces any non-dictionary value with an empty dictionary and
    /// returns a mutable reference to the dictionary.
    pub fn as_dictionary(&mut self) -> &mut Dictionary {
        if !matches!(self, Value::Dictionary(_)) {
            *self = Value::Dictionary(Dictionary::new());
        }
        match self {
            Value::Dictionary(dict) => dict,
            _ => unreachable!("the variant was just replaced"),
        }
    }

    /// Converts to a list in place and pushes `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dyncfg::domain::value::Value;
    ///
    /// let mut v = Value::from(1);
    /// v.append(Value::from(2));
    /// assert_eq!(v.to_string(), "[1, 2]");
    /// ```
    pub fn append(&mut self, value: Value) {
        self.as_list().push(value);
    }
}

impl PartialOrd for Value {
    /// Orders values by variant index first, then by content.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.tag_index().cmp(&other.tag_index()) {
            Ordering::Equal => {}
            unequal => return Some(unequal),
        }
        match (self, other) {
            (Value::None, Value::None) => Some(Ordering::Equal),
            (Value::Integer(a), Value::Integer(b)) => a.partial_cmp(b),
            (Value::Boolean(a), Value::Boolean(b)) => a.partial_cmp(b),
            (Value::Real(a), Value::Real(b)) => a.partial_cmp(b),
            (Value::Timespan(a), Value::Timespan(b)) => a.partial_cmp(b),
            (Value::Uri(a), Value::Uri(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => a.partial_cmp(b),
            (Value::List(a), Value::List(b)) => a.partial_cmp(b),
            (Value::Dictionary(a), Value::Dictionary(b)) => {
                for ((ka, va), (kb, vb)) in a.iter().zip(b.iter()) {
                    match ka.cmp(kb) {
                        Ordering::Equal => {}
                        unequal => return Some(unequal),
                    }
                    match va.partial_cmp(vb) {
                        Some(Ordering::Equal) => {}
                        other => return other,
                    }
                }
                a.len().partial_cmp(&b.len())
            }
            _ => unreachable!("tag indices were equal"),
        }
    }
}

impl FromStr for Value {
    type Err = crate::domain::errors::ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Value::parse(s)
    }
}

impl From<bool> for Value {
    fn from(x: bool) -> Self {
        Value::Boolean(x)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Real(x)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Real(f64::from(x))
    }
}

impl From<&str> for Value {
    fn from(x: &str) -> Self {
        Value::String(x.to_string())
    }
}

impl From<String> for Value {
    fn from(x: String) -> Self {
        Value::String(x)
    }
}

impl From<Timespan> for Value {
    fn from(x: Timespan) -> Self {
        Value::Timespan(x)
    }
}

impl From<Uri> for Value {
    fn from(x: Uri) -> Self {
        Value::Uri(x)
    }
}

impl From<Dictionary> for Value {
    fn from(x: Dictionary) -> Self {
        Value::Dictionary(x)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(xs: Vec<T>) -> Self {
        Value::List(xs.into_iter().map(Into::into).collect())
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),+ $(,)?) => {$(
        impl From<$ty> for Value {
            fn from(x: $ty) -> Self {
                Value::Integer(i64::from(x))
            }
        }
    )+};
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);
