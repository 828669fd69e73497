// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the inspection protocol.
//!
//! User record types declare their fields once and are read from and
//! written to values through that single declaration.

use dyncfg::config_enum;
use dyncfg::config_object;
use dyncfg::prelude::*;

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

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Weekday {
    #[default]
    Monday,
    Tuesday,
    Saturday,
}

config_enum!(Weekday {
    Monday = "monday",
    Tuesday = "tuesday",
    Saturday = "saturday",
});

#[test]
fn records_read_from_dictionaries_built_with_put() {
    let mut x = Value::default();
    let dict = x.as_dictionary();
    settings::put(dict, "p1.x", 1).unwrap();
    settings::put(dict, "p1.y", 2).unwrap();
    settings::put(dict, "p1.z", 3).unwrap();
    settings::put(dict, "p2.x", 10).unwrap();
    settings::put(dict, "p2.y", 20).unwrap();
    settings::put(dict, "p2.z", 30).unwrap();
    let line = x.get_as::<Line>().unwrap();
    assert_eq!(
        line,
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
fn records_read_from_parsed_command_line_objects() {
    let value = Value::parse("{p1{x=1,y=2,z=3},p2{x=10,y=20,z=30}}").unwrap();
    let line = value.get_as::<Line>().unwrap();
    assert_eq!(
        line,
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
fn enumerations_read_from_their_names() {
    let x = Value::from("saturday");
    assert_eq!(x.get_as::<Weekday>().unwrap(), Weekday::Saturday);
    let err = Value::from("caturday").get_as::<Weekday>().unwrap_err();
    assert_eq!(err.code(), ErrorCode::ConversionFailed);
    assert_eq!(Weekday::Tuesday.to_value(), Value::from("tuesday"));
}

#[test]
fn a_written_record_reads_back_equal() {
    let line = Line {
        p1: Point3 { x: -1, y: 0, z: 1 },
        p2: Point3 { x: 7, y: 8, z: 9 },
    };
    let value = line.to_value();
    assert_eq!(value.get_as::<Line>().unwrap(), line);
}

#[test]
fn records_nest_inside_containers() {
    let value = Value::parse("[{x=1,y=2,z=3}, {x=4,y=5,z=6}]").unwrap();
    let points = value.get_as::<Vec<Point3>>().unwrap();
    assert_eq!(
        points,
        vec![
            Point3 { x: 1, y: 2, z: 3 },
            Point3 { x: 4, y: 5, z: 6 },
        ]
    );
}

#[test]
fn missing_fields_report_their_dotted_path() {
    let value = Value::parse("{p1{x=1,z=3},p2{x=10,y=20,z=30}}").unwrap();
    let err = value.get_as::<Line>().unwrap_err();
    assert_eq!(err.code(), ErrorCode::MissingField);
    assert_eq!(err.to_string(), "missing mandatory field 'p1.y'");
}

#[test]
fn extra_keys_are_forward_compatible() {
    let value = Value::parse("{x=1,y=2,z=3,color=red}").unwrap();
    assert_eq!(
        value.get_as::<Point3>().unwrap(),
        Point3 { x: 1, y: 2, z: 3 }
    );
}

#[derive(Clone, Debug, Default, PartialEq)]
struct NodeConfig {
    name: String,
    port: u16,
    peers: Vec<String>,
    heartbeat: Timespan,
    rack: Option<u32>,
}

impl Inspect for NodeConfig {
    fn inspect<V: FieldVisitor>(&mut self, visitor: &mut V) -> Result<()> {
        visitor.field("name", &mut self.name)?;
        visitor.field("port", &mut self.port)?;
        visitor.field("peers", &mut self.peers)?;
        visitor.field("heartbeat", &mut self.heartbeat)?;
        visitor.optional_field("rack", &mut self.rack)
    }
}

config_object!(NodeConfig);

#[test]
fn records_compose_scalars_containers_and_timespans() {
    let dict = parse_config(
        r#"
        name = "node0"
        port = 4242
        peers = [node1, node2]
        heartbeat = 250ms
        "#,
    )
    .unwrap();
    let config = Value::Dictionary(dict).get_as::<NodeConfig>().unwrap();
    assert_eq!(
        config,
        NodeConfig {
            name: "node0".to_string(),
            port: 4242,
            peers: vec!["node1".to_string(), "node2".to_string()],
            heartbeat: Timespan::from_millis(250),
            rack: None,
        }
    );
}

#[test]
fn optional_fields_accept_presence_and_absence() {
    let with = Value::parse("{name=a, port=1, peers=[], heartbeat=1s, rack=3}").unwrap();
    assert_eq!(with.get_as::<NodeConfig>().unwrap().rack, Some(3));
    let without = Value::parse("{name=a, port=1, peers=[], heartbeat=1s}").unwrap();
    assert_eq!(without.get_as::<NodeConfig>().unwrap().rack, None);
}

#[test]
fn written_records_print_canonically() {
    let point = Point3 { x: 1, y: 2, z: 3 };
    assert_eq!(point.to_value().to_string(), "{x = 1, y = 2, z = 3}");
}
