//! Helpers for inspecting attribute values.
//!
//! Attribute values are plain [`serde_json::Value`]s. `Null` stands for an
//! absent attribute; hosts return it for attributes they do not know about.

use std::borrow::Cow;
use std::cmp::Ordering;

use serde_json::{Number, Value};

/// Shared `Null` used when a value has to be borrowed but does not exist.
pub(crate) static NULL: Value = Value::Null;

/// Returns `true` for empty strings, arrays and objects.
///
/// Numbers and booleans are never empty, and neither is `Null`: absence and
/// emptiness are reported separately.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Null | Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Returns `true` when the value is `Null` or empty.
pub fn is_blank(value: &Value) -> bool {
    value.is_null() || is_empty(value)
}

/// Length of a value: characters of a string, elements of an array, entries
/// of an object. Other kinds have no length.
pub fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        Value::Null | Value::Bool(_) | Value::Number(_) => None,
    }
}

/// Orders two values of the same kind.
///
/// Numbers compare numerically regardless of their JSON representation,
/// strings lexicographically. Mixed kinds are incomparable.
pub fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn compare_numbers(x: &Number, y: &Number) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return Some(a.cmp(&b));
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return Some(a.cmp(&b));
    }
    x.as_f64()?.partial_cmp(&y.as_f64()?)
}

/// Membership equality: numbers are equal when numerically equal (`5` and
/// `5.0`), everything else uses structural equality.
pub fn same(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y) == Some(Ordering::Equal),
        _ => a == b,
    }
}

/// Plain text form of a value, used for message placeholders and pattern
/// matching. Strings render without quotes, `Null` renders empty.
pub fn to_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed(""),
        other => Cow::Owned(other.to_string()),
    }
}

/// Short name of the value's kind, for diagnostics.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// First validator input, or `Null` when none was supplied.
pub(crate) fn first<'a>(values: &[&'a Value]) -> &'a Value {
    values.first().copied().unwrap_or(&NULL)
}

/// Input at `index`, or `Null` when none was supplied.
pub(crate) fn nth<'a>(values: &[&'a Value], index: usize) -> &'a Value {
    values.get(index).copied().unwrap_or(&NULL)
}
