use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat};
use serde_json::Value as JsonValue;

/// A value in its native (typed) representation.
///
/// Wire values are plain JSON; native values additionally carry dates, datetimes and raw bytes
/// decoded according to a schema's `format`.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
    Bytes(Vec<u8>),
    Array(Vec<NativeValue>),
    Object(BTreeMap<String, NativeValue>),
}

impl NativeValue {
    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            NativeValue::Null => "null",
            NativeValue::Bool(_) => "bool",
            NativeValue::Integer(_) => "integer",
            NativeValue::Number(_) => "number",
            NativeValue::Text(_) => "text",
            NativeValue::Date(_) => "date",
            NativeValue::DateTime(_) => "datetime",
            NativeValue::Bytes(_) => "bytes",
            NativeValue::Array(_) => "array",
            NativeValue::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, NativeValue::Null)
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, NativeValue>> {
        match self {
            NativeValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[NativeValue]> {
        match self {
            NativeValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Lowers the value to JSON without a schema: dates become ISO-8601 text, datetimes
    /// RFC-3339 text, bytes base64 text. Non-finite floats become `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            NativeValue::Null => JsonValue::Null,
            NativeValue::Bool(b) => JsonValue::Bool(*b),
            NativeValue::Integer(i) => JsonValue::from(*i),
            NativeValue::Number(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            NativeValue::Text(s) => JsonValue::String(s.clone()),
            NativeValue::Date(d) => JsonValue::String(d.format("%Y-%m-%d").to_string()),
            NativeValue::DateTime(dt) => {
                JsonValue::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, false))
            }
            NativeValue::Bytes(b) => JsonValue::String(STANDARD.encode(b)),
            NativeValue::Array(items) => JsonValue::Array(items.iter().map(Self::to_json).collect()),
            NativeValue::Object(map) => JsonValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

/// Lifts JSON into native form without a schema. Integers that fit `i64` stay integers.
impl From<JsonValue> for NativeValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => NativeValue::Null,
            JsonValue::Bool(b) => NativeValue::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => NativeValue::Integer(i),
                None => NativeValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(s) => NativeValue::Text(s),
            JsonValue::Array(items) => {
                NativeValue::Array(items.into_iter().map(NativeValue::from).collect())
            }
            JsonValue::Object(map) => NativeValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, NativeValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&JsonValue> for NativeValue {
    fn from(value: &JsonValue) -> Self {
        NativeValue::from(value.clone())
    }
}

impl From<bool> for NativeValue {
    fn from(v: bool) -> Self {
        NativeValue::Bool(v)
    }
}

impl From<i64> for NativeValue {
    fn from(v: i64) -> Self {
        NativeValue::Integer(v)
    }
}

impl From<i32> for NativeValue {
    fn from(v: i32) -> Self {
        NativeValue::Integer(i64::from(v))
    }
}

impl From<f64> for NativeValue {
    fn from(v: f64) -> Self {
        NativeValue::Number(v)
    }
}

impl From<&str> for NativeValue {
    fn from(v: &str) -> Self {
        NativeValue::Text(v.to_string())
    }
}

impl From<String> for NativeValue {
    fn from(v: String) -> Self {
        NativeValue::Text(v)
    }
}

impl From<NaiveDate> for NativeValue {
    fn from(v: NaiveDate) -> Self {
        NativeValue::Date(v)
    }
}

impl From<DateTime<FixedOffset>> for NativeValue {
    fn from(v: DateTime<FixedOffset>) -> Self {
        NativeValue::DateTime(v)
    }
}

impl From<Vec<u8>> for NativeValue {
    fn from(v: Vec<u8>) -> Self {
        NativeValue::Bytes(v)
    }
}

impl From<Vec<NativeValue>> for NativeValue {
    fn from(v: Vec<NativeValue>) -> Self {
        NativeValue::Array(v)
    }
}
