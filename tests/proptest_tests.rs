// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property-based tests using proptest.
//!
//! These tests verify the round-trip laws: canonical strings re-parse to
//! equal values, extraction bounds checks match the target's range, and
//! identity extraction returns the value unchanged.

use dyncfg::prelude::*;
use proptest::prelude::*;

/// Arbitrary value trees. `None` is excluded because it has no literal
/// form; URIs are excluded because the grammar never produces them.
fn value_strategy() -> BoxedStrategy<Value> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        prop::num::f64::NORMAL.prop_map(Value::from),
        any::<i64>().prop_map(|nanos| Value::from(Timespan::from_nanos(nanos))),
        "[a-zA-Z0-9 _.:+-]{0,12}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 24, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::List),
            prop::collection::vec(("[a-z][a-z0-9_-]{0,6}", inner), 0..6).prop_map(|entries| {
                let mut dict = Dictionary::new();
                for (key, value) in entries {
                    dict.insert(key, value);
                }
                Value::Dictionary(dict)
            }),
        ]
    })
    .boxed()
}

// The canonical string of any value tree re-parses to an equal value.
proptest! {
    #[test]
    fn test_canonical_string_reparses_to_equal_value(v in value_strategy()) {
        let printed = v.to_string();
        let reparsed = Value::parse(&printed);
        prop_assert_eq!(reparsed.unwrap(), v, "printed as {}", printed);
    }
}

// Identity extraction returns the value unchanged.
proptest! {
    #[test]
    fn test_get_as_value_is_identity(v in value_strategy()) {
        prop_assert_eq!(v.get_as::<Value>().unwrap(), v);
    }
}

// Narrowing to i8 succeeds exactly inside the target's range.
proptest! {
    #[test]
    fn test_i8_bounds_law(n in any::<i64>()) {
        let v = Value::from(n);
        match v.get_as::<i8>() {
            Ok(out) => {
                prop_assert!((i64::from(i8::MIN)..=i64::from(i8::MAX)).contains(&n));
                prop_assert_eq!(i64::from(out), n);
            }
            Err(err) => {
                prop_assert!(!(i64::from(i8::MIN)..=i64::from(i8::MAX)).contains(&n));
                prop_assert_eq!(err.code(), ErrorCode::ConversionFailed);
            }
        }
    }
}

// The same law holds for u16 with a string source.
proptest! {
    #[test]
    fn test_u16_bounds_law_from_strings(n in any::<i64>()) {
        let v = Value::from(n.to_string());
        match v.get_as::<u16>() {
            Ok(out) => {
                prop_assert!((0..=i64::from(u16::MAX)).contains(&n));
                prop_assert_eq!(i64::from(out), n);
            }
            Err(_) => prop_assert!(!(0..=i64::from(u16::MAX)).contains(&n)),
        }
    }
}

// Integer literals round-trip through the decimal form.
proptest! {
    #[test]
    fn test_integer_text_round_trip(n in any::<i64>()) {
        let v = Value::parse(&n.to_string()).unwrap();
        prop_assert_eq!(v.get_as::<i64>().unwrap(), n);
    }
}

// Timespans round-trip through their unit-suffix form.
proptest! {
    #[test]
    fn test_timespan_text_round_trip(nanos in any::<i64>()) {
        let t = Timespan::from_nanos(nanos);
        let v = Value::parse(&t.to_string()).unwrap();
        prop_assert_eq!(v.get_as::<Timespan>().unwrap(), t);
    }
}

// Whole reals inside the i64 range convert to integers exactly.
proptest! {
    #[test]
    fn test_whole_reals_convert(n in -1_000_000i64..1_000_000) {
        let v = Value::from(n as f64);
        prop_assert_eq!(v.get_as::<i64>().unwrap(), n);
    }
}

// Fractional reals never convert to integers.
proptest! {
    #[test]
    fn test_fractional_reals_fail(n in -1_000_000i64..1_000_000, frac in 0.001f64..0.999) {
        let v = Value::from(n as f64 + frac);
        prop_assert!(v.get_as::<i64>().is_err());
    }
}

// The CLI list shortcut accepts comma-joined integers without brackets.
proptest! {
    #[test]
    fn test_cli_list_shortcut(xs in prop::collection::vec(any::<i32>(), 0..8)) {
        let joined = xs
            .iter()
            .map(|x| x.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let parsed = parse_cli::<Vec<i32>>(&joined).unwrap();
        prop_assert_eq!(parsed, xs);
    }
}

// Lists of strings survive extraction element-wise.
proptest! {
    #[test]
    fn test_string_vec_round_trip(xs in prop::collection::vec("[a-zA-Z0-9 ]{0,10}", 0..6)) {
        let v = xs.to_value();
        prop_assert_eq!(v.get_as::<Vec<String>>().unwrap(), xs);
    }
}

// Written dictionaries keep their entries through extraction.
proptest! {
    #[test]
    fn test_map_round_trip(
        entries in prop::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..8)
    ) {
        let v = entries.to_value();
        prop_assert_eq!(
            v.get_as::<std::collections::BTreeMap<String, i64>>().unwrap(),
            entries
        );
    }
}
