//! Property tests over generated inputs.
//!
//! - Coercion is never stricter than validation for any leaf kind.
//! - A clone behaves exactly like its original, and deriving a new schema
//!   from a clone leaves the original's behaviour untouched.

use chrono::DateTime;
use proptest::prelude::*;
use url::Url;

use luft_schema::factory as l;
use luft_schema::{Rounding, Schema, Value};

const SAMPLE_STRINGS: &[&str] = &[
    "",
    "true",
    "FALSE",
    "1",
    "0",
    " 42 ",
    "-3.5",
    "1e3",
    "NaN",
    "2024-02-29",
    "2024-02-29T10:00:00Z",
    "https://example.com/x",
    "9b2f8a41-3c5e-4d8a-9f0b-1a2b3c4d5e6f",
    "9B2F8A41-3C5E-4D8A-9F0B-1A2B3C4D5E6F",
    "a",
    "B",
    "null",
];

fn leaf_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Undefined),
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(|n| Value::Number(n as f64)),
        (-1.0e6f64..1.0e6).prop_map(Value::Number),
        "[ a-zA-Z0-9_.:-]{0,16}".prop_map(Value::String),
        prop::sample::select(SAMPLE_STRINGS.to_vec()).prop_map(Value::from),
        (0i64..4_000_000_000_000).prop_map(|ms| {
            Value::Date(DateTime::from_timestamp_millis(ms).unwrap())
        }),
        prop::sample::select(vec!["https://example.com", "ftp://files.example.com/a"])
            .prop_map(|s| Value::Url(Url::parse(s).unwrap())),
    ]
}

fn input_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => leaf_value(),
        1 => prop::collection::vec(leaf_value(), 0..3).prop_map(Value::Array),
    ]
}

fn leaf_schemas() -> Vec<(&'static str, Schema)> {
    vec![
        ("string", l::string().into()),
        ("string.trim.min", l::string().trim().min_len(1).into()),
        ("number", l::number().into()),
        ("number.range", l::number().min(-5).max_eq(5).into()),
        ("number.multiple", l::number().multiple_of(0.5).unwrap().into()),
        ("int", l::int().into()),
        ("int.floor", l::int().rounding(Rounding::Floor).into()),
        ("boolean", l::boolean().into()),
        ("boolean.numeric", l::boolean().numeric().into()),
        ("date", l::date().into()),
        ("literal.ci", l::literal(["a", "B"]).case_insensitive().into()),
        ("literal.mixed", l::literal([Value::from(1), Value::from(true)]).into()),
        ("pattern.trim", l::pattern(r"^\d+$").unwrap().trim().into()),
        ("url", l::url().into()),
        ("url.https", l::url().protocols(["https"]).into()),
        ("uuid", l::uuid().into()),
        ("any", l::any().into()),
        ("never", l::never().into()),
        ("null", l::null().into()),
        ("undefined", l::undefined().into()),
    ]
}

proptest! {
    /// Anything `validate` accepts, `coerce` accepts too.
    #[test]
    fn coerce_accepts_whatever_validate_accepts(value in input_value()) {
        for (name, schema) in leaf_schemas() {
            if schema.validate(value.clone()).is_ok() {
                prop_assert!(
                    schema.coerce(value.clone()).is_ok(),
                    "{} validated {:?} but rejected it on coerce",
                    name,
                    value
                );
            }
        }
    }

    /// A clone produces the same outcome as the original in both modes.
    #[test]
    fn clone_behaves_like_original(value in input_value()) {
        for (name, schema) in leaf_schemas() {
            let copy = schema.clone();
            for checked in [
                (schema.validate_checked(value.clone()), copy.validate_checked(value.clone())),
                (schema.coerce_checked(value.clone()), copy.coerce_checked(value.clone())),
            ] {
                let (original, cloned) = checked;
                let original = serde_json::to_value(original.unwrap()).unwrap();
                let cloned = serde_json::to_value(cloned.unwrap()).unwrap();
                prop_assert_eq!(original, cloned, "clone of {} diverged", name);
            }
        }
    }

    /// Deriving a stricter schema from a clone never changes the original.
    #[test]
    fn builders_leave_original_untouched(value in input_value()) {
        let base = l::string();
        let before = serde_json::to_value(base.coerce_checked(value.clone()).unwrap()).unwrap();
        let _stricter = base.clone().max_len(0).default("fallback");
        let after = serde_json::to_value(base.coerce_checked(value).unwrap()).unwrap();
        prop_assert_eq!(before, after);
    }
}
