// SPDX-License-Identifier: MIT OR Apache-2.0

//! Relaxed parsing mode for command-line arguments.
//!
//! When the target type is known, the grammar relaxes: list arguments may
//! omit the outer brackets, string elements may omit their quotes, and the
//! outermost brackets of a nested list are optional. The relaxation is a
//! thin pre-pass that decides how to wrap the input before handing it to
//! the strict parser, keyed by a shape descriptor derived from the target
//! type. [`Value::parse`] itself never applies these rules.

use crate::domain::errors::{ConfigError, Result};
use crate::domain::timespan::Timespan;
use crate::domain::uri::Uri;
use crate::domain::value::Value;
use crate::ports::extract::FromValue;

/// Shape of a command-line target type, driving the grammar relaxations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    /// A scalar parsed by the strict grammar (numbers, booleans, timespans).
    Atom,
    /// A string; quoting is optional.
    Text,
    /// A sequence; the surrounding brackets are optional.
    List(Box<Shape>),
}

/// Types that can be parsed from a command-line argument.
pub trait CliValue: FromValue {
    /// The shape descriptor of this target type.
    fn shape() -> Shape;
}

macro_rules! impl_cli_atom {
    ($($ty:ty),+ $(,)?) => {$(
        impl CliValue for $ty {
            fn shape() -> Shape {
                Shape::Atom
            }
        }
    )+};
}

impl_cli_atom!(
    bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, Timespan, Uri
);

impl CliValue for String {
    fn shape() -> Shape {
        Shape::Text
    }
}

impl<T: CliValue> CliValue for Vec<T> {
    fn shape() -> Shape {
        Shape::List(Box::new(T::shape()))
    }
}

/// Parses a command-line argument into `T` using the relaxed grammar.
///
/// # Examples
///
/// ```
/// use dyncfg::adapters::cli::parse_cli;
///
/// assert_eq!(parse_cli::<Vec<i64>>(" 1,2 , 3  ,").unwrap(), vec![1, 2, 3]);
/// assert_eq!(parse_cli::<Vec<String>>("abc,def").unwrap(), vec!["abc", "def"]);
/// assert_eq!(
///     parse_cli::<Vec<Vec<i64>>>("[1,2],[3]").unwrap(),
///     vec![vec![1, 2], vec![3]]
/// );
/// assert!(parse_cli::<Vec<i64>>("123]").is_err());
/// ```
pub fn parse_cli<T: CliValue>(input: &str) -> Result<T> {
    match T::shape() {
        Shape::Atom => T::from_value(&Value::parse(input)?),
        Shape::Text => {
            // An empty argument is the empty string, not a parse error.
            if input.trim().is_empty() {
                return T::from_value(&Value::String(String::new()));
            }
            T::from_value(&Value::parse(input)?)
        }
        Shape::List(inner) => {
            let trimmed = input.trim();
            if trimmed.is_empty() {
                return T::from_value(&Value::List(Vec::new()));
            }
            check_brackets(trimmed)?;
            if let Ok(value) = Value::parse(trimmed) {
                if let Ok(out) = T::from_value(&value) {
                    return Ok(out);
                }
            }
            // A nested-list target with no bracket at all is a single
            // inner list: `1,2,3` means `[[1,2,3]]`.
            let wrapped = if matches!(*inner, Shape::List(_)) && !trimmed.contains('[') {
                format!("[[{}]]", trimmed)
            } else {
                format!("[{}]", trimmed)
            };
            T::from_value(&Value::parse(&wrapped)?)
        }
    }
}

/// Rejects dangling brackets up front; pairs must match even though the
/// outer pair is optional.
fn check_brackets(input: &str) -> Result<()> {
    let mut depth: i64 = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (offset, c) in input.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth < 0 {
                    return Err(ConfigError::UnexpectedCharacter { found: ']', offset });
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(ConfigError::UnexpectedEof);
    }
    Ok(())
}
