//! Conversions between value kinds.
//!
//! [`change_type`] is the single conversion path used when a value is
//! assigned to a field or parsed from configuration text. It is total over
//! its inputs: every pairing either converts or returns an
//! [`ArgumentError::Conversion`].

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::error::ArgumentError;
use crate::value::{Value, ValueKind};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Largest magnitude an `f64` holds without losing integer precision.
const F64_SAFE_INT: f64 = 9_007_199_254_740_992.0;

/// Converts `value` to `target`.
///
/// `Null` passes through unchanged; whether a field may hold it is decided
/// by the field's declared type, not here.
pub fn change_type(value: Value, target: ValueKind) -> Result<Value, ArgumentError> {
    let Some(from) = value.kind() else {
        return Ok(Value::Null);
    };
    if from == target {
        return Ok(value);
    }

    match (value, target) {
        (Value::Bytes(b), ValueKind::Text) => String::from_utf8(b)
            .map(Value::Text)
            .map_err(|e| ArgumentError::conversion(from, target, e.to_string())),
        (value, ValueKind::Text) => Ok(Value::Text(value.to_string())),

        (Value::Int(n), ValueKind::Uint) => u64::try_from(n)
            .map(Value::Uint)
            .map_err(|_| ArgumentError::conversion(from, target, format!("{n} is negative"))),
        (Value::Int(n), ValueKind::Float) => Ok(Value::Float(n as f64)),
        (Value::Int(n), ValueKind::Bool) => Ok(Value::Bool(n != 0)),

        (Value::Uint(n), ValueKind::Int) => i64::try_from(n)
            .map(Value::Int)
            .map_err(|_| ArgumentError::conversion(from, target, format!("{n} is too large"))),
        (Value::Uint(n), ValueKind::Float) => Ok(Value::Float(n as f64)),
        (Value::Uint(n), ValueKind::Bool) => Ok(Value::Bool(n != 0)),

        (Value::Float(x), ValueKind::Int) => float_to_integer(x, target).map(|n| Value::Int(n as i64)),
        (Value::Float(x), ValueKind::Uint) => {
            if x < 0.0 {
                return Err(ArgumentError::conversion(from, target, format!("{x} is negative")));
            }
            float_to_integer(x, target).map(|n| Value::Uint(n as u64))
        }
        (Value::Float(x), ValueKind::Bool) => Ok(Value::Bool(x != 0.0)),

        (Value::Bool(b), ValueKind::Int) => Ok(Value::Int(i64::from(b))),
        (Value::Bool(b), ValueKind::Uint) => Ok(Value::Uint(u64::from(b))),
        (Value::Bool(b), ValueKind::Float) => Ok(Value::Float(f64::from(u8::from(b)))),

        (Value::Text(s), target) => parse_text(&s, target),

        (Value::Date(d), ValueKind::DateTime) => d
            .and_hms_opt(0, 0, 0)
            .map(Value::DateTime)
            .ok_or_else(|| ArgumentError::conversion(from, target, "date has no midnight")),
        (Value::DateTime(dt), ValueKind::Date) => Ok(Value::Date(dt.date())),

        (Value::Uuid(u), ValueKind::Bytes) => Ok(Value::Bytes(u.as_bytes().to_vec())),

        _ => Err(ArgumentError::conversion(from, target, "no conversion defined")),
    }
}

fn float_to_integer(x: f64, target: ValueKind) -> Result<f64, ArgumentError> {
    if !x.is_finite() || x.fract() != 0.0 || x.abs() > F64_SAFE_INT {
        return Err(ArgumentError::conversion(
            ValueKind::Float,
            target,
            format!("{x} is not an exact integer"),
        ));
    }
    Ok(x)
}

fn parse_text(text: &str, target: ValueKind) -> Result<Value, ArgumentError> {
    let trimmed = text.trim();
    let fail = |reason: String| ArgumentError::conversion(ValueKind::Text, target, reason);

    match target {
        ValueKind::Int => trimmed
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|e| fail(format!("`{trimmed}`: {e}"))),
        ValueKind::Uint => trimmed
            .parse::<u64>()
            .map(Value::Uint)
            .map_err(|e| fail(format!("`{trimmed}`: {e}"))),
        ValueKind::Float => trimmed
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|e| fail(format!("`{trimmed}`: {e}"))),
        ValueKind::Bool => match trimmed.to_ascii_lowercase().as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(fail(format!("`{trimmed}` is not a boolean"))),
        },
        ValueKind::Date => NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map(Value::Date)
            .map_err(|e| fail(format!("`{trimmed}`: {e}"))),
        ValueKind::DateTime => parse_datetime(trimmed)
            .map(Value::DateTime)
            .ok_or_else(|| fail(format!("`{trimmed}` is not a date-time"))),
        ValueKind::Uuid => Uuid::parse_str(trimmed)
            .map(Value::Uuid)
            .map_err(|e| fail(format!("`{trimmed}`: {e}"))),
        ValueKind::Bytes => Ok(Value::Bytes(text.as_bytes().to_vec())),
        ValueKind::Text => Ok(Value::Text(text.to_owned())),
    }
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
