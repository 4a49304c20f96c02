use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value as JsonValue;

use crate::error::{ConversionError, ValidationError};
use crate::schema::Node;
use crate::types::type_error;
use crate::value::NativeValue;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn validate(node: Node<'_>, value: &NativeValue) -> Result<(), ValidationError> {
    let accepted = match (node.format(), value) {
        (_, NativeValue::Text(_)) => true,
        (Some("date"), NativeValue::Integer(_) | NativeValue::Date(_) | NativeValue::DateTime(_)) => {
            true
        }
        (Some("date-time"), NativeValue::Integer(_) | NativeValue::DateTime(_)) => true,
        (Some("byte"), NativeValue::Bytes(_)) => true,
        _ => false,
    };
    if accepted {
        Ok(())
    } else {
        Err(type_error(node))
    }
}

pub(crate) fn wire_to_native(node: Node<'_>, value: &JsonValue) -> Result<NativeValue, ConversionError> {
    match node.format() {
        Some("date") => parse_date(expect_str(value)?).map(NativeValue::Date),
        Some("date-time") => parse_datetime(expect_str(value)?).map(NativeValue::DateTime),
        Some("byte") => Ok(NativeValue::Bytes(STANDARD.decode(expect_str(value)?.trim())?)),
        _ => coerce_text(value),
    }
}

pub(crate) fn native_to_wire(node: Node<'_>, value: &NativeValue) -> Result<JsonValue, ConversionError> {
    let text = match (node.format(), value) {
        (_, NativeValue::Null) => return Ok(JsonValue::Null),
        (Some("date"), NativeValue::Date(d)) => d.format(DATE_FORMAT).to_string(),
        (Some("date"), NativeValue::DateTime(dt)) => dt.date_naive().format(DATE_FORMAT).to_string(),
        (Some("date"), NativeValue::Integer(ts)) => {
            from_timestamp(*ts)?.date_naive().format(DATE_FORMAT).to_string()
        }
        (Some("date-time"), NativeValue::DateTime(dt)) => format_datetime(dt),
        (Some("date-time"), NativeValue::Date(d)) => {
            format_datetime(&d.and_time(chrono::NaiveTime::MIN).and_utc().fixed_offset())
        }
        (Some("date-time"), NativeValue::Integer(ts)) => {
            format_datetime(&from_timestamp(*ts)?.fixed_offset())
        }
        (Some("byte"), NativeValue::Bytes(b)) => STANDARD.encode(b),
        (Some("byte"), NativeValue::Text(s)) => STANDARD.encode(s.as_bytes()),
        (_, NativeValue::Text(s)) => s.clone(),
        (_, NativeValue::Integer(i)) => i.to_string(),
        (_, NativeValue::Number(f)) => f.to_string(),
        (_, NativeValue::Bool(b)) => b.to_string(),
        (_, other) => return Err(ConversionError::unexpected("text", other.type_name())),
    };
    Ok(JsonValue::String(text))
}

fn expect_str(value: &JsonValue) -> Result<&str, ConversionError> {
    value
        .as_str()
        .ok_or_else(|| ConversionError::unexpected("string", json_type_name(value)))
}

fn coerce_text(value: &JsonValue) -> Result<NativeValue, ConversionError> {
    match value {
        JsonValue::Null => Ok(NativeValue::Null),
        JsonValue::String(s) => Ok(NativeValue::Text(s.clone())),
        JsonValue::Number(n) => Ok(NativeValue::Text(n.to_string())),
        JsonValue::Bool(b) => Ok(NativeValue::Text(b.to_string())),
        other => Err(ConversionError::unexpected("string", json_type_name(other))),
    }
}

/// Accepts `YYYY-MM-DD` or a full date-time, keeping only the calendar date.
fn parse_date(s: &str) -> Result<NaiveDate, ConversionError> {
    match NaiveDate::parse_from_str(s, DATE_FORMAT) {
        Ok(d) => Ok(d),
        Err(source) => parse_datetime(s)
            .map(|dt| dt.date_naive())
            .map_err(|_| ConversionError::Date {
                value: s.to_string(),
                source,
            }),
    }
}

/// RFC-3339 first; offset-less timestamps and bare dates are taken as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<FixedOffset>, ConversionError> {
    let source = match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => return Ok(dt),
        Err(e) => e,
    };
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc().fixed_offset());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc().fixed_offset());
    }
    Err(ConversionError::DateTime {
        value: s.to_string(),
        source,
    })
}

fn format_datetime(dt: &DateTime<FixedOffset>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

fn from_timestamp(ts: i64) -> Result<DateTime<Utc>, ConversionError> {
    DateTime::from_timestamp(ts, 0).ok_or(ConversionError::Timestamp(ts))
}

pub(crate) fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
