// SPDX-License-Identifier: MIT OR Apache-2.0

//! `Value`-backed implementations of the inspection protocol.
//!
//! [`read_object`] drives a user type's [`Inspect`] declaration against a
//! dictionary coerced from a source value; [`write_object`] drives the same
//! declaration to produce one. Unknown dictionary keys are tolerated for
//! forward compatibility.

use crate::domain::errors::{ConfigError, Result};
use crate::domain::value::{Dictionary, Value};
use crate::ports::extract::{FromValue, ToValue};
use crate::ports::inspect::{FieldVisitor, Inspect};

/// Reads a record from a value through its inspection declaration.
///
/// The value is coerced to a dictionary first, so dictionary-shaped strings
/// work as sources too. Missing mandatory fields fail with `missing_field`;
/// nested failures report dotted paths such as `p1.z`.
///
/// # Examples
///
/// See [`Inspect`] for an end-to-end example via the
/// [`config_object!`](crate::config_object) macro.
pub fn read_object<T: Inspect + Default>(value: &Value) -> Result<T> {
    let dict = value.to_dictionary()?;
    let mut reader = ValueReader { dict: &dict };
    let mut out = T::default();
    out.inspect(&mut reader)?;
    Ok(out)
}

/// Writes a record into a dictionary value through its inspection
/// declaration.
pub fn write_object<T: Inspect>(object: &mut T) -> Value {
    let mut writer = ValueWriter {
        dict: Dictionary::new(),
    };
    // The writer accepts every field, so the traversal cannot fail.
    let _ = object.inspect(&mut writer);
    Value::Dictionary(writer.dict)
}

/// Reading side of the protocol: looks fields up by name.
struct ValueReader<'a> {
    dict: &'a Dictionary,
}

impl FieldVisitor for ValueReader<'_> {
    fn field<T: FromValue + ToValue>(&mut self, name: &str, slot: &mut T) -> Result<()> {
        match self.dict.get(name) {
            Some(value) => {
                *slot = T::from_value(value).map_err(|err| in_field(name, err))?;
                Ok(())
            }
            None => Err(ConfigError::MissingField {
                field: name.to_string(),
            }),
        }
    }

    fn optional_field<T: FromValue + ToValue>(
        &mut self,
        name: &str,
        slot: &mut Option<T>,
    ) -> Result<()> {
        match self.dict.get(name) {
            Some(Value::None) | None => {
                *slot = None;
                Ok(())
            }
            Some(value) => {
                *slot = Some(T::from_value(value).map_err(|err| in_field(name, err))?);
                Ok(())
            }
        }
    }
}

/// Writing side of the protocol: collects fields into a dictionary.
struct ValueWriter {
    dict: Dictionary,
}

impl FieldVisitor for ValueWriter {
    fn field<T: FromValue + ToValue>(&mut self, name: &str, slot: &mut T) -> Result<()> {
        self.dict.insert(name.to_string(), slot.to_value());
        Ok(())
    }

    fn optional_field<T: FromValue + ToValue>(
        &mut self,
        name: &str,
        slot: &mut Option<T>,
    ) -> Result<()> {
        self.dict.insert(name.to_string(), slot.to_value());
        Ok(())
    }
}

/// Prefixes a field error with the enclosing field name, concatenating
/// nested paths with `.`.
fn in_field(name: &str, err: ConfigError) -> ConfigError {
    match err {
        ConfigError::MissingField { field } => ConfigError::MissingField {
            field: format!("{}.{}", name, field),
        },
        ConfigError::ConversionFailed { message } => match message.strip_prefix("field ") {
            Some(rest) => ConfigError::conversion(format!("field {}.{}", name, rest)),
            None => ConfigError::conversion(format!("field {}: {}", name, message)),
        },
        other => ConfigError::conversion(format!("field {}: {}", name, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_object;
    use crate::domain::errors::ErrorCode;
    use crate::domain::settings;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Point3 {
        x: i32,
        y: i32,
        z: i32,
    }

    impl Inspect for Point3 {
        fn inspect<V: FieldVisitor>(&mut self, visitor: &mut V) -> Result<()> {
            visitor.field("x", &mut self.x)?;
            visitor.field("y", &mut self.y)?;
            visitor.field("z", &mut self.z)
        }
    }

    config_object!(Point3);

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Line {
        p1: Point3,
        p2: Point3,
    }

    impl Inspect for Line {
        fn inspect<V: FieldVisitor>(&mut self, visitor: &mut V) -> Result<()> {
            visitor.field("p1", &mut self.p1)?;
            visitor.field("p2", &mut self.p2)
        }
    }

    config_object!(Line);

    #[test]
    fn test_read_flat_record() {
        let v = Value::parse("{x=1,y=2,z=3}").unwrap();
        assert_eq!(v.get_as::<Point3>().unwrap(), Point3 { x: 1, y: 2, z: 3 });
    }

    #[test]
    fn test_read_nested_record() {
        let v = Value::parse("{p1{x=1,y=2,z=3},p2{x=10,y=20,z=30}}").unwrap();
        assert_eq!(
            v.get_as::<Line>().unwrap(),
            Line {
                p1: Point3 { x: 1, y: 2, z: 3 },
                p2: Point3 {
                    x: 10,
                    y: 20,
                    z: 30
                },
            }
        );
    }

    #[test]
    fn test_read_record_built_with_put() {
        let mut v = Value::default();
        let dict = v.as_dictionary();
        settings::put(dict, "p1.x", 1).unwrap();
        settings::put(dict, "p1.y", 2).unwrap();
        settings::put(dict, "p1.z", 3).unwrap();
        settings::put(dict, "p2.x", 10).unwrap();
        settings::put(dict, "p2.y", 20).unwrap();
        settings::put(dict, "p2.z", 30).unwrap();
        assert_eq!(
            v.get_as::<Line>().unwrap(),
            Line {
                p1: Point3 { x: 1, y: 2, z: 3 },
                p2: Point3 {
                    x: 10,
                    y: 20,
                    z: 30
                },
            }
        );
    }

    #[test]
    fn test_unknown_keys_are_tolerated() {
        let v = Value::parse("{x=1,y=2,z=3,w=4}").unwrap();
        assert_eq!(v.get_as::<Point3>().unwrap(), Point3 { x: 1, y: 2, z: 3 });
    }

    #[test]
    fn test_missing_field_reports_dotted_path() {
        let v = Value::parse("{p1{x=1,y=2},p2{x=10,y=20,z=30}}").unwrap();
        let err = v.get_as::<Line>().unwrap_err();
        assert_eq!(err.code(), ErrorCode::MissingField);
        assert_eq!(err.to_string(), "missing mandatory field 'p1.z'");
    }

    #[test]
    fn test_conversion_failure_names_the_field() {
        let v = Value::parse("{p1{x=1,y=2,z=oops},p2{x=10,y=20,z=30}}").unwrap();
        let err = v.get_as::<Line>().unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConversionFailed);
        assert!(err.to_string().starts_with("field p1.z:"), "{}", err);
    }

    #[test]
    fn test_write_mirrors_read() {
        let line = Line {
            p1: Point3 { x: 1, y: 2, z: 3 },
            p2: Point3 {
                x: 10,
                y: 20,
                z: 30,
            },
        };
        let v = line.to_value();
        assert_eq!(v.get_as::<Line>().unwrap(), line);
        assert_eq!(
            v.to_string(),
            "{p1 = {x = 1, y = 2, z = 3}, p2 = {x = 10, y = 20, z = 30}}"
        );
    }

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Server {
        host: String,
        port: u16,
        nickname: Option<String>,
    }

    impl Inspect for Server {
        fn inspect<V: FieldVisitor>(&mut self, visitor: &mut V) -> Result<()> {
            visitor.field("host", &mut self.host)?;
            visitor.field("port", &mut self.port)?;
            visitor.optional_field("nickname", &mut self.nickname)
        }
    }

    config_object!(Server);

    #[test]
    fn test_optional_fields() {
        let v = Value::parse("{host = \"a\", port = 80}").unwrap();
        let server = v.get_as::<Server>().unwrap();
        assert_eq!(server.nickname, None);
        let v = Value::parse("{host = \"a\", port = 80, nickname = \"b\"}").unwrap();
        let server = v.get_as::<Server>().unwrap();
        assert_eq!(server.nickname.as_deref(), Some("b"));
    }

    #[test]
    fn test_string_sources_reach_the_bridge() {
        // to_dictionary on a dictionary-shaped string feeds the reader.
        let v = Value::from("{x=1,y=2,z=3}");
        assert_eq!(v.get_as::<Point3>().unwrap(), Point3 { x: 1, y: 2, z: 3 });
    }
}
