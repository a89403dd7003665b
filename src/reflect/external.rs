//! Adapters for third-party types: chrono date-times and JSON documents.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde_json::Value;

use super::{Dynamic, Kind, Reflect, Shape, Target};

// ---- chrono ----

impl<Tz: TimeZone> Reflect for DateTime<Tz> {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Kind::DateTime)
    }

    fn type_name(&self) -> Option<&'static str> {
        Some("DateTime")
    }
}

impl Reflect for NaiveDateTime {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Kind::DateTime)
    }

    fn type_name(&self) -> Option<&'static str> {
        Some("NaiveDateTime")
    }
}

impl Reflect for NaiveDate {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Kind::DateTime)
    }

    fn type_name(&self) -> Option<&'static str> {
        Some("NaiveDate")
    }
}

// ---- serde_json ----

/// Untyped JSON documents: every nested value lives in a dynamic slot,
/// numbers are `f64`, and objects are string-keyed maps.
impl Reflect for Value {
    fn shape(&self) -> Shape<'_> {
        match self {
            Value::Null => Shape::Nil,
            Value::Bool(_) => Shape::Scalar(Kind::Bool),
            Value::Number(_) => Shape::Scalar(Kind::F64),
            Value::String(_) => Shape::Scalar(Kind::String),
            Value::Array(items) => Shape::List {
                fixed: false,
                elements: items.iter().map(|v| Target::owned(JsonSlot(v))).collect(),
                zero: nil_slot,
            },
            Value::Object(map) => Shape::Map {
                key: Kind::String,
                key_type: Cow::Borrowed("string"),
                entries: map
                    .iter()
                    .map(|(k, v)| (k.clone(), Target::owned(JsonSlot(v))))
                    .collect(),
            },
        }
    }
}

fn nil_slot() -> Box<dyn Reflect> {
    Box::new(Dynamic::nil())
}

/// Dynamic slot around a borrowed JSON value; `null` is an empty slot.
pub struct JsonSlot<'a>(pub &'a Value);

impl Reflect for JsonSlot<'_> {
    fn shape(&self) -> Shape<'_> {
        match self.0 {
            Value::Null => Shape::Dynamic(None),
            value => Shape::Dynamic(Some(Target::Borrowed(value))),
        }
    }
}
