// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical, deterministic stringification.
//!
//! The printer emits the exact forms the parser accepts, so that printing a
//! value and re-parsing the output reconstructs the value. Strings are
//! quoted and escaped; dictionary keys stay bare only when the identifier
//! grammar allows it. This is the `Display` implementation of
//! [`Value`]; the total string *coercion* (which returns strings verbatim)
//! lives in [`Value::to_text`].

use crate::domain::value::Value;
use std::fmt;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        print_value(&mut out, self);
        f.write_str(&out)
    }
}

/// Appends the canonical form of `value` to `out`.
pub(crate) fn print_value(out: &mut String, value: &Value) {
    use fmt::Write;
    match value {
        Value::None => out.push_str("null"),
        Value::Integer(x) => {
            let _ = write!(out, "{}", x);
        }
        Value::Boolean(x) => out.push_str(if *x { "true" } else { "false" }),
        // The debug form of f64 is the shortest decimal that round-trips
        // and always carries a point or exponent, so it re-parses as real.
        Value::Real(x) => {
            let _ = write!(out, "{:?}", x);
        }
        Value::Timespan(x) => {
            let _ = write!(out, "{}", x);
        }
        Value::Uri(x) => out.push_str(x.as_str()),
        Value::String(x) => print_escaped(out, x),
        Value::List(items) => {
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                print_value(out, item);
            }
            out.push(']');
        }
        Value::Dictionary(dict) => {
            out.push('{');
            for (index, (key, item)) in dict.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                if is_bare_key(key) {
                    out.push_str(key);
                } else {
                    print_escaped(out, key);
                }
                out.push_str(" = ");
                print_value(out, item);
            }
            out.push('}');
        }
    }
}

/// Appends `text` quoted, escaping the characters the lexer unescapes.
pub(crate) fn print_escaped(out: &mut String, text: &str) {
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 => {
                out.push_str("\\x");
                let byte = c as u32;
                out.push(hex_digit(byte / 16));
                out.push(hex_digit(byte % 16));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Quoted-and-escaped form of `text`, for error messages.
pub(crate) fn escaped(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    print_escaped(&mut out, text);
    out
}

/// A key prints bare when re-parsing it cannot split or mangle it: a
/// non-empty run of alphanumerics, `-`, and `_` (no dots).
fn is_bare_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn hex_digit(value: u32) -> char {
    char::from_digit(value, 16).unwrap_or('0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::timespan::Timespan;
    use crate::domain::uri::Uri;
    use crate::domain::value::Dictionary;

    #[test]
    fn test_scalar_forms() {
        assert_eq!(Value::None.to_string(), "null");
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(-7).to_string(), "-7");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(4.2).to_string(), "4.2");
        assert_eq!(Value::from(Timespan::from_nanos(4)).to_string(), "4ns");
        assert_eq!(Value::from(Timespan::from_secs(42)).to_string(), "42s");
    }

    #[test]
    fn test_integral_reals_keep_their_point() {
        assert_eq!(Value::from(50.0).to_string(), "50.0");
        assert_eq!(Value::parse("50.0").unwrap().to_string(), "50.0");
    }

    #[test]
    fn test_strings_are_quoted_and_escaped() {
        assert_eq!(Value::from("abc").to_string(), "\"abc\"");
        assert_eq!(Value::from("a\"b\\c\nd").to_string(), r#""a\"b\\c\nd""#);
        assert_eq!(Value::from("\u{1}").to_string(), "\"\\x01\"");
    }

    #[test]
    fn test_containers() {
        assert_eq!(Value::List(Vec::new()).to_string(), "[]");
        assert_eq!(Value::from(vec![1, 2, 3]).to_string(), "[1, 2, 3]");
        assert_eq!(
            Value::Dictionary(Dictionary::new()).to_string(),
            "{}"
        );
        let dict = Value::parse("{a=1,b=2,c=3}").unwrap();
        assert_eq!(dict.to_string(), "{a = 1, b = 2, c = 3}");
    }

    #[test]
    fn test_uris_print_verbatim() {
        let v = Value::Uri(Uri::new("https://actor-framework.org").unwrap());
        assert_eq!(v.to_string(), "https://actor-framework.org");
    }

    #[test]
    fn test_odd_keys_are_quoted() {
        let v = Value::parse("{\"a.b\" = 1, \"c d\" = 2}").unwrap();
        assert_eq!(v.to_string(), "{\"a.b\" = 1, \"c d\" = 2}");
        assert_eq!(Value::parse(&v.to_string()).unwrap(), v);
    }

    #[test]
    fn test_reparse_round_trip() {
        for text in [
            "42",
            "-1",
            "true",
            "4.2",
            "10ms",
            "\"a b c\"",
            "[1, 2, \"foo\"]",
            "{a = 1, b = [2, 3], c = {d = 4ns}}",
        ] {
            let v = Value::parse(text).unwrap();
            assert_eq!(Value::parse(&v.to_string()).unwrap(), v, "for {}", text);
        }
    }
}
