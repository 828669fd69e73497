// SPDX-License-Identifier: MIT OR Apache-2.0

//! The inspection protocol.
//!
//! A user type advertises its shape by implementing [`Inspect`]: a single
//! `inspect` method that offers each field by name to a generic
//! [`FieldVisitor`]. The same declaration serves reading and writing; the
//! visitor decides the direction. The `Value`-backed visitors live in
//! [`adapters::object`](crate::adapters::object).

use crate::domain::errors::Result;
use crate::ports::extract::{FromValue, ToValue};

/// Field-by-name description of a user record.
///
/// Implementations list every field exactly once and propagate the
/// visitor's result with `?`; field order is the declaration order.
///
/// # Examples
///
/// ```
/// use dyncfg::config_object;
/// use dyncfg::domain::errors::Result;
/// use dyncfg::domain::value::Value;
/// use dyncfg::ports::inspect::{FieldVisitor, Inspect};
///
/// #[derive(Clone, Debug, Default, PartialEq)]
/// struct Point3 {
///     x: i32,
///     y: i32,
///     z: i32,
/// }
///
/// impl Inspect for Point3 {
///     fn inspect<V: FieldVisitor>(&mut self, visitor: &mut V) -> Result<()> {
///         visitor.field("x", &mut self.x)?;
///         visitor.field("y", &mut self.y)?;
///         visitor.field("z", &mut self.z)
///     }
/// }
///
/// config_object!(Point3);
///
/// let v = Value::parse("{x=1,y=2,z=3}").unwrap();
/// assert_eq!(v.get_as::<Point3>().unwrap(), Point3 { x: 1, y: 2, z: 3 });
/// ```
pub trait Inspect {
    /// Offers each field of `self` to the visitor, in declaration order.
    fn inspect<V: FieldVisitor>(&mut self, visitor: &mut V) -> Result<()>;
}

/// One direction of the inspection protocol.
///
/// A reading visitor fills the slots from a dictionary; a writing visitor
/// collects the slots into one.
pub trait FieldVisitor {
    /// Visits a mandatory field. Reading fails with `missing_field` when
    /// the key is absent.
    fn field<T: FromValue + ToValue>(&mut self, name: &str, slot: &mut T) -> Result<()>;

    /// Visits an optional field. Reading an absent key leaves `None`;
    /// writing `None` emits a `none` value.
    fn optional_field<T: FromValue + ToValue>(
        &mut self,
        name: &str,
        slot: &mut Option<T>,
    ) -> Result<()>;
}

/// Wires an [`Inspect`] type into typed extraction.
///
/// Generates `FromValue` (via
/// [`read_object`](crate::adapters::object::read_object)) and `ToValue`
/// (via [`write_object`](crate::adapters::object::write_object)) for one or
/// more types implementing [`Inspect`], `Default`, and `Clone`.
#[macro_export]
macro_rules! config_object {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::ports::extract::FromValue for $ty {
            fn from_value(
                value: &$crate::domain::value::Value,
            ) -> $crate::domain::errors::Result<Self> {
                $crate::adapters::object::read_object(value)
            }
        }

        impl $crate::ports::extract::ToValue for $ty {
            fn to_value(&self) -> $crate::domain::value::Value {
                let mut scratch = ::std::clone::Clone::clone(self);
                $crate::adapters::object::write_object(&mut scratch)
            }
        }
    )+};
}
