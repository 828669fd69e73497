// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed extraction traits.
//!
//! `FromValue` turns a [`Value`] into an arbitrary user-requested type by
//! composing the coercion engine: scalars bounds-check after coercion,
//! containers extract element-wise, tuples extract positionally, and user
//! records go through the inspection protocol. `ToValue` is the mirror for
//! writing. [`get_as`] is the free-function entry point.

use crate::domain::errors::{ConfigError, Result};
use crate::domain::timespan::Timespan;
use crate::domain::uri::Uri;
use crate::domain::value::Value;
use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::Hash;

/// Conversion from a [`Value`] into a concrete type.
///
/// # Examples
///
/// ```
/// use dyncfg::domain::value::Value;
/// use dyncfg::ports::extract::get_as;
///
/// let v = Value::parse("[1, 2, 3]").unwrap();
/// assert_eq!(get_as::<Vec<u8>>(&v).unwrap(), vec![1, 2, 3]);
/// assert!(get_as::<Vec<i8>>(&Value::parse("[200]").unwrap()).is_err());
/// ```
pub trait FromValue: Sized {
    /// Extracts `Self` from a value, or reports why the value does not fit.
    fn from_value(value: &Value) -> Result<Self>;
}

/// Conversion of a concrete type into a [`Value`] via the canonical
/// variant mapping.
pub trait ToValue {
    /// Builds the value representation of `self`.
    fn to_value(&self) -> Value;
}

/// Extracts a `T` from a value. Equivalent to [`Value::get_as`].
pub fn get_as<T: FromValue>(value: &Value) -> Result<T> {
    T::from_value(value)
}

impl Value {
    /// Extracts a `T` from this value.
    ///
    /// # Examples
    ///
    /// ```
    /// use dyncfg::domain::value::Value;
    ///
    /// let v = Value::parse("32768").unwrap();
    /// assert_eq!(v.get_as::<u16>().unwrap(), 32768);
    /// assert!(v.get_as::<i16>().is_err());
    /// ```
    pub fn get_as<T: FromValue>(&self) -> Result<T> {
        T::from_value(self)
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self> {
        value.to_boolean()
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Boolean(*self)
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self> {
        value.to_integer()
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self> {
        value.to_real()
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Real(*self)
    }
}

impl FromValue for f32 {
    /// Narrows through `to_real`, failing when a finite magnitude exceeds
    /// the 32-bit finite range.
    fn from_value(value: &Value) -> Result<Self> {
        let x = value.to_real()?;
        if x.is_finite() && x.abs() > f64::from(f32::MAX) {
            return Err(ConfigError::conversion(
                "real number out of range for a 32-bit float",
            ));
        }
        Ok(x as f32)
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::Real(f64::from(*self))
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.to_text())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToValue for &str {
    fn to_value(&self) -> Value {
        Value::String((*self).to_string())
    }
}

impl FromValue for Timespan {
    fn from_value(value: &Value) -> Result<Self> {
        value.to_timespan()
    }
}

impl ToValue for Timespan {
    fn to_value(&self) -> Value {
        Value::Timespan(*self)
    }
}

impl FromValue for Uri {
    /// Accepts the uri variant and strings that parse as absolute URIs.
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Uri(uri) => Ok(uri.clone()),
            Value::String(text) => Uri::new(text.as_str()),
            other => Err(ConfigError::conversion(format!(
                "cannot convert {} to uri",
                other.type_name()
            ))),
        }
    }
}

impl ToValue for Uri {
    fn to_value(&self) -> Value {
        Value::Uri(self.clone())
    }
}

macro_rules! impl_narrow_int {
    ($($ty:ty),+ $(,)?) => {$(
        impl FromValue for $ty {
            fn from_value(value: &Value) -> Result<Self> {
                let wide = value.to_integer()?;
                <$ty>::try_from(wide).map_err(|_| {
                    ConfigError::conversion(format!(
                        "integer {} out of range for {}",
                        wide,
                        stringify!($ty)
                    ))
                })
            }
        }
    )+};
}

impl_narrow_int!(i8, i16, i32, isize, u8, u16, u32, u64, usize);

macro_rules! impl_small_int_to_value {
    ($($ty:ty),+ $(,)?) => {$(
        impl ToValue for $ty {
            fn to_value(&self) -> Value {
                Value::Integer(i64::from(*self))
            }
        }
    )+};
}

impl_small_int_to_value!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_wide_uint_to_value {
    ($($ty:ty),+ $(,)?) => {$(
        impl ToValue for $ty {
            /// Values beyond the signed 64-bit range degrade to a real.
            fn to_value(&self) -> Value {
                match i64::try_from(*self) {
                    Ok(x) => Value::Integer(x),
                    Err(_) => Value::Real(*self as f64),
                }
            }
        }
    )+};
}

impl_wide_uint_to_value!(u64, usize);

impl ToValue for isize {
    fn to_value(&self) -> Value {
        Value::Integer(*self as i64)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    /// `None` values extract to `Option::None`; everything else goes
    /// through `T`.
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::None => Ok(None),
            present => T::from_value(present).map(Some),
        }
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::None,
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Result<Self> {
        value.to_list()?.iter().map(T::from_value).collect()
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: FromValue> FromValue for VecDeque<T> {
    fn from_value(value: &Value) -> Result<Self> {
        value.to_list()?.iter().map(T::from_value).collect()
    }
}

impl<T: ToValue> ToValue for VecDeque<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: FromValue + Ord> FromValue for BTreeSet<T> {
    fn from_value(value: &Value) -> Result<Self> {
        value.to_list()?.iter().map(T::from_value).collect()
    }
}

impl<T: ToValue> ToValue for BTreeSet<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: FromValue + Eq + Hash> FromValue for HashSet<T> {
    fn from_value(value: &Value) -> Result<Self> {
        value.to_list()?.iter().map(T::from_value).collect()
    }
}

impl<T: ToValue> ToValue for HashSet<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: FromValue, const N: usize> FromValue for [T; N] {
    fn from_value(value: &Value) -> Result<Self> {
        let items = value.to_list()?;
        if items.len() != N {
            return Err(ConfigError::conversion(format!(
                "cannot convert a list of {} elements to an array of {}",
                items.len(),
                N
            )));
        }
        let extracted: Vec<T> = items.iter().map(T::from_value).collect::<Result<_>>()?;
        <[T; N]>::try_from(extracted)
            .map_err(|_| ConfigError::conversion("array length changed during extraction"))
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

macro_rules! impl_string_map {
    ($map:ident) => {
        impl<T: FromValue> FromValue for $map<String, T> {
            fn from_value(value: &Value) -> Result<Self> {
                value
                    .to_dictionary()?
                    .iter()
                    .map(|(key, item)| Ok((key.clone(), T::from_value(item)?)))
                    .collect()
            }
        }

        impl<T: ToValue> ToValue for $map<String, T> {
            fn to_value(&self) -> Value {
                Value::Dictionary(
                    self.iter()
                        .map(|(key, item)| (key.clone(), item.to_value()))
                        .collect(),
                )
            }
        }
    };
}

impl_string_map!(IndexMap);
impl_string_map!(BTreeMap);
impl_string_map!(HashMap);

macro_rules! impl_tuple {
    ($len:literal => $($name:ident . $idx:tt),+) => {
        impl<$($name: FromValue),+> FromValue for ($($name,)+) {
            fn from_value(value: &Value) -> Result<Self> {
                let items = value.to_list()?;
                if items.len() != $len {
                    return Err(ConfigError::conversion(format!(
                        "cannot convert a list of {} elements to a tuple of {}",
                        items.len(),
                        $len
                    )));
                }
                Ok(($($name::from_value(&items[$idx])?,)+))
            }
        }

        impl<$($name: ToValue),+> ToValue for ($($name,)+) {
            fn to_value(&self) -> Value {
                Value::List(vec![$(self.$idx.to_value()),+])
            }
        }
    };
}

impl_tuple!(1 => A.0);
impl_tuple!(2 => A.0, B.1);
impl_tuple!(3 => A.0, B.1, C.2);
impl_tuple!(4 => A.0, B.1, C.2, D.3);
impl_tuple!(5 => A.0, B.1, C.2, D.3, E.4);
impl_tuple!(6 => A.0, B.1, C.2, D.3, E.4, F.5);

/// Maps an enumeration onto its string names for extraction.
///
/// Extraction coerces the value to a string and looks the name up; unknown
/// names fail with `conversion_failed`. Writing produces the name as a
/// string value.
///
/// # Examples
///
/// ```
/// use dyncfg::config_enum;
/// use dyncfg::domain::value::Value;
///
/// #[derive(Clone, Copy, Debug, PartialEq)]
/// enum Weekday { Monday, Saturday }
///
/// config_enum!(Weekday {
///     Monday = "monday",
///     Saturday = "saturday",
/// });
///
/// let v = Value::from("saturday");
/// assert_eq!(v.get_as::<Weekday>().unwrap(), Weekday::Saturday);
/// assert!(Value::from("caturday").get_as::<Weekday>().is_err());
/// ```
#[macro_export]
macro_rules! config_enum {
    ($ty:ident { $($variant:ident = $name:literal),+ $(,)? }) => {
        impl $crate::ports::extract::FromValue for $ty {
            fn from_value(
                value: &$crate::domain::value::Value,
            ) -> $crate::domain::errors::Result<Self> {
                let name = value.to_text();
                match name.as_str() {
                    $($name => Ok(<$ty>::$variant),)+
                    other => Err($crate::domain::errors::ConfigError::conversion(format!(
                        "unknown {} enumerator {:?}",
                        stringify!($ty),
                        other
                    ))),
                }
            }
        }

        impl $crate::ports::extract::ToValue for $ty {
            fn to_value(&self) -> $crate::domain::value::Value {
                let name = match self {
                    $(<$ty>::$variant => $name,)+
                };
                $crate::domain::value::Value::String(name.to_string())
            }
        }
    };
}
