// SPDX-License-Identifier: MIT OR Apache-2.0

//! The coercion engine.
//!
//! Each `to_*` method is total over the source variants: every pair of
//! (source variant, target) either has a defined conversion or fails with
//! `conversion_failed`. Strings are coerced by parsing them with the same
//! grammar the text format uses.

use crate::adapters::{lexer, printer, text};
use crate::domain::errors::{ConfigError, Result};
use crate::domain::timespan::Timespan;
use crate::domain::value::{Dictionary, List, Value};

/// 2^63 as an exact `f64`; reals inside `[-BOUND, BOUND)` fit an `i64`.
const I64_BOUND: f64 = 9.223_372_036_854_775_808e18;

impl Value {
    /// Coerces to a boolean.
    ///
    /// Accepts the boolean variant and the strings `"true"` and `"false"`.
    /// Numeric zero and one do **not** convert.
    pub fn to_boolean(&self) -> Result<bool> {
        match self {
            Value::Boolean(x) => Ok(*x),
            Value::String(x) => match x.as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(ConfigError::conversion(format!(
                    "cannot convert {} to a boolean",
                    printer::escaped(x)
                ))),
            },
            other => Err(cannot_convert(other, "boolean")),
        }
    }

    /// Coerces to a signed 64-bit integer.
    ///
    /// Reals convert when they are finite, whole, and inside the 64-bit
    /// range. Strings are parsed as an integer first and as a real second,
    /// the real then following the real rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use dyncfg::domain::value::Value;
    ///
    /// assert_eq!(Value::from(50.0).to_integer().unwrap(), 50);
    /// assert!(Value::from(50.05).to_integer().is_err());
    /// assert_eq!(Value::from("50.000").to_integer().unwrap(), 50);
    /// ```
    pub fn to_integer(&self) -> Result<i64> {
        match self {
            Value::Integer(x) => Ok(*x),
            Value::Real(x) => real_to_integer(*x).ok_or_else(|| {
                ConfigError::conversion(
                    "cannot convert decimal or out-of-bounds real number to an integer",
                )
            }),
            Value::String(x) => {
                if let Ok(int) = lexer::parse_integer(x) {
                    return Ok(int);
                }
                if let Ok(real) = lexer::parse_real(x) {
                    if let Some(int) = real_to_integer(real) {
                        return Ok(int);
                    }
                }
                Err(ConfigError::conversion(format!(
                    "cannot convert {} to an integer",
                    printer::escaped(x)
                )))
            }
            other => Err(cannot_convert(other, "integer")),
        }
    }

    /// Coerces to a 64-bit real.
    ///
    /// Integers widen silently, accepting the precision loss above 2^53.
    pub fn to_real(&self) -> Result<f64> {
        match self {
            Value::Integer(x) => Ok(*x as f64),
            Value::Real(x) => Ok(*x),
            Value::String(x) => lexer::parse_real(x).map_err(|_| {
                ConfigError::conversion(format!(
                    "cannot convert {} to a floating point number",
                    printer::escaped(x)
                ))
            }),
            other => Err(cannot_convert(other, "real")),
        }
    }

    /// Coerces to a timespan. Only the timespan variant and duration
    /// strings such as `"10ms"` convert.
    pub fn to_timespan(&self) -> Result<Timespan> {
        match self {
            Value::Timespan(x) => Ok(*x),
            Value::String(x) => lexer::parse_timespan(x).map_err(|_| {
                ConfigError::conversion(format!(
                    "cannot convert {} to a timespan",
                    printer::escaped(x)
                ))
            }),
            other => Err(cannot_convert(other, "timespan")),
        }
    }

    /// Coerces to a string. This conversion is total.
    ///
    /// Strings are returned verbatim and `None` prints as `null`; all other
    /// variants use the canonical printer. Note the difference to the
    /// `Display` form, which quotes top-level strings.
    ///
    /// # Examples
    ///
    /// ```
    /// use dyncfg::domain::value::Value;
    ///
    /// assert_eq!(Value::from("abc").to_text(), "abc");
    /// assert_eq!(Value::from("abc").to_string(), "\"abc\"");
    /// assert_eq!(Value::parse("{a=1,b=2}").unwrap().to_text(), "{a = 1, b = 2}");
    /// ```
    pub fn to_text(&self) -> String {
        match self {
            Value::String(x) => x.clone(),
            Value::Uri(x) => x.as_str().to_string(),
            other => other.to_string(),
        }
    }

    /// Coerces to a list.
    ///
    /// Dictionaries become a sequence of `[key, value]` pairs in iteration
    /// order. Strings are parsed with the list grammar first and the
    /// dictionary grammar second.
    pub fn to_list(&self) -> Result<List> {
        match self {
            Value::List(items) => Ok(items.clone()),
            Value::Dictionary(dict) => Ok(dict_to_pairs(dict)),
            Value::String(x) => {
                if let Ok(items) = text::parse_list(x) {
                    return Ok(items);
                }
                if let Ok(dict) = text::parse_dictionary(x) {
                    return Ok(dict_to_pairs(&dict));
                }
                Err(ConfigError::conversion(format!(
                    "cannot convert {} to a list",
                    printer::escaped(x)
                )))
            }
            other => Err(cannot_convert(other, "list")),
        }
    }

    /// Coerces to a dictionary. Only the dictionary variant and strings in
    /// the dictionary grammar convert.
    pub fn to_dictionary(&self) -> Result<Dictionary> {
        match self {
            Value::Dictionary(dict) => Ok(dict.clone()),
            Value::String(x) => text::parse_dictionary(x).map_err(|_| {
                ConfigError::conversion(format!(
                    "cannot convert {} to a dictionary",
                    printer::escaped(x)
                ))
            }),
            other => Err(cannot_convert(other, "dictionary")),
        }
    }

    /// Dry-run predicate form of [`Value::to_dictionary`].
    pub fn can_convert_to_dictionary(&self) -> bool {
        match self {
            Value::Dictionary(_) => true,
            Value::String(x) => text::parse_dictionary(x).is_ok(),
            _ => false,
        }
    }
}

/// Whole, finite, in-range reals convert exactly; everything else is `None`.
fn real_to_integer(x: f64) -> Option<i64> {
    if x.is_finite() && x.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&x) {
        Some(x as i64)
    } else {
        None
    }
}

fn dict_to_pairs(dict: &Dictionary) -> List {
    dict.iter()
        .map(|(key, value)| Value::List(vec![Value::String(key.clone()), value.clone()]))
        .collect()
}

/// Error for a (source variant, target) pair outside the coercion matrix.
fn cannot_convert(from: &Value, to: &str) -> ConfigError {
    ConfigError::conversion(format!("cannot convert {} to {}", from.type_name(), to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::uri::Uri;

    fn samples_except(skip: &[&str]) -> Vec<Value> {
        [
            Value::None,
            Value::from(1),
            Value::from(true),
            Value::from(0.5),
            Value::from(Timespan::from_secs(1)),
            Value::Uri(Uri::new("https://example.org").unwrap()),
            Value::from("x"),
            Value::from(vec![1]),
            Value::Dictionary(Dictionary::new()),
        ]
        .into_iter()
        .filter(|v| !skip.contains(&v.type_name()))
        .collect()
    }

    #[test]
    fn test_to_boolean_matrix() {
        assert!(Value::from(true).to_boolean().unwrap());
        assert!(!Value::from("false").to_boolean().unwrap());
        assert!(Value::from(0).to_boolean().is_err());
        assert!(Value::from(1).to_boolean().is_err());
        assert!(Value::from("1").to_boolean().is_err());
        for v in samples_except(&["boolean"]) {
            assert!(v.to_boolean().is_err(), "accepted {}", v.type_name());
        }
    }

    #[test]
    fn test_to_integer_matrix() {
        assert_eq!(Value::from(42).to_integer().unwrap(), 42);
        assert_eq!(Value::from(50.0).to_integer().unwrap(), 50);
        assert!(Value::from(50.05).to_integer().is_err());
        assert!(Value::from(f64::NAN).to_integer().is_err());
        assert!(Value::from(1e300).to_integer().is_err());
        assert_eq!(Value::from("50000").to_integer().unwrap(), 50_000);
        assert_eq!(Value::from("50.000").to_integer().unwrap(), 50);
        assert!(Value::from("50.05").to_integer().is_err());
        assert!(Value::from("abc").to_integer().is_err());
        for v in samples_except(&["integer", "real", "string"]) {
            assert!(v.to_integer().is_err(), "accepted {}", v.type_name());
        }
    }

    #[test]
    fn test_to_real_matrix() {
        assert_eq!(Value::from(123).to_real().unwrap(), 123.0);
        assert_eq!(Value::from(0.5).to_real().unwrap(), 0.5);
        assert_eq!(Value::from("3e7").to_real().unwrap(), 3e7);
        assert!(Value::from("0x10").to_real().is_err());
        for v in samples_except(&["integer", "real", "string"]) {
            assert!(v.to_real().is_err(), "accepted {}", v.type_name());
        }
    }

    #[test]
    fn test_to_timespan_matrix() {
        assert_eq!(
            Value::from(Timespan::from_secs(42)).to_timespan().unwrap(),
            Timespan::from_secs(42)
        );
        assert_eq!(
            Value::from("10ms").to_timespan().unwrap(),
            Timespan::from_millis(10)
        );
        assert!(Value::from("10").to_timespan().is_err());
        for v in samples_except(&["timespan", "string"]) {
            assert!(v.to_timespan().is_err(), "accepted {}", v.type_name());
        }
    }

    #[test]
    fn test_to_text_is_total() {
        assert_eq!(Value::None.to_text(), "null");
        assert_eq!(Value::from(true).to_text(), "true");
        assert_eq!(Value::from(42).to_text(), "42");
        assert_eq!(Value::from(4.2).to_text(), "4.2");
        assert_eq!(Value::from(Timespan::from_nanos(4)).to_text(), "4ns");
        assert_eq!(Value::from("plain").to_text(), "plain");
        assert_eq!(Value::List(Vec::new()).to_text(), "[]");
        assert_eq!(Value::Dictionary(Dictionary::new()).to_text(), "{}");
        assert_eq!(
            Value::Uri(Uri::new("https://actor-framework.org").unwrap()).to_text(),
            "https://actor-framework.org"
        );
    }

    #[test]
    fn test_to_list_matrix() {
        assert_eq!(
            Value::from(vec![1, 2]).to_list().unwrap(),
            vec![Value::from(1), Value::from(2)]
        );
        let from_dict = Value::parse("{a=1,b=2}").unwrap().to_list().unwrap();
        assert_eq!(
            from_dict,
            vec![
                Value::from(vec![Value::from("a"), Value::from(1)]),
                Value::from(vec![Value::from("b"), Value::from(2)]),
            ]
        );
        assert_eq!(
            Value::from("[1, 2]").to_list().unwrap(),
            vec![Value::from(1), Value::from(2)]
        );
        // A dictionary-shaped string converts through the dictionary grammar.
        assert_eq!(
            Value::from("{a = 1}").to_list().unwrap(),
            vec![Value::from(vec![Value::from("a"), Value::from(1)])]
        );
        assert!(Value::from("1, 2").to_list().is_err());
        for v in samples_except(&["list", "dictionary", "string"]) {
            assert!(v.to_list().is_err(), "accepted {}", v.type_name());
        }
    }

    #[test]
    fn test_to_dictionary_matrix() {
        let dict = Value::parse("{a = 1, b = 2, c = 3}").unwrap();
        assert_eq!(dict.to_dictionary().unwrap().len(), 3);
        assert_eq!(
            Value::from("{a = 1, b = 2, c = 3}")
                .to_dictionary()
                .unwrap()
                .len(),
            3
        );
        assert!(Value::from("[1]").to_dictionary().is_err());
        for v in samples_except(&["dictionary", "string"]) {
            assert!(v.to_dictionary().is_err(), "accepted {}", v.type_name());
        }
    }

    #[test]
    fn test_can_convert_to_dictionary() {
        assert!(Value::parse("{a=1}").unwrap().can_convert_to_dictionary());
        assert!(Value::from("{a=1}").can_convert_to_dictionary());
        assert!(!Value::from("[1]").can_convert_to_dictionary());
        assert!(!Value::from(1).can_convert_to_dictionary());
    }

    #[test]
    fn test_conversion_error_messages() {
        let err = Value::from(vec![1]).to_boolean().unwrap_err();
        assert_eq!(err.to_string(), "cannot convert list to boolean");
        let err = Value::from("oops").to_integer().unwrap_err();
        assert_eq!(err.to_string(), "cannot convert \"oops\" to an integer");
    }
}
