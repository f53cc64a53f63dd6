//! Argument coercion
//!
//! Arguments usually arrive as text from a test script. Text is converted to
//! the JSON type the assertion or keyword needs; values that already have
//! that type pass through.

use crate::error::{Error, Result};
use crate::schema::ArgKind;
use crate::types::JsonType;
use serde_json::{Number, Value};

/// Coerce an enum literal to the asserted type
pub fn coerce_literal(value: &Value, json_type: JsonType) -> Result<Value> {
    let fail = || Error::coercion(value, json_type.as_str());

    match json_type {
        JsonType::Integer => match value {
            Value::Number(n) if n.is_i64() || n.is_u64() => Ok(value.clone()),
            Value::String(s) => parse_integer(s).ok_or_else(fail),
            _ => Err(fail()),
        },
        JsonType::Number => match value {
            Value::Number(_) => Ok(value.clone()),
            Value::String(s) => parse_number(s).ok_or_else(fail),
            _ => Err(fail()),
        },
        JsonType::String => match value {
            Value::String(_) => Ok(value.clone()),
            Value::Number(n) => Ok(Value::String(n.to_string())),
            Value::Bool(b) => Ok(Value::String(b.to_string())),
            _ => Err(fail()),
        },
        JsonType::Boolean => match value {
            Value::Bool(_) => Ok(value.clone()),
            Value::String(s) => parse_boolean(s).ok_or_else(fail),
            _ => Err(fail()),
        },
        JsonType::Null => match value {
            Value::Null => Ok(Value::Null),
            Value::String(s) if s.trim() == "null" => Ok(Value::Null),
            _ => Err(fail()),
        },
        JsonType::Object => match value {
            Value::Object(_) => Ok(value.clone()),
            Value::String(s) => parse_json(s).filter(Value::is_object).ok_or_else(fail),
            _ => Err(fail()),
        },
        JsonType::Array => match value {
            Value::Array(_) => Ok(value.clone()),
            Value::String(s) => parse_json(s).filter(Value::is_array).ok_or_else(fail),
            _ => Err(fail()),
        },
    }
}

/// Coerce a validation keyword argument to the kind the keyword expects
pub fn coerce_argument(value: &Value, kind: ArgKind) -> Result<Value> {
    let fail = |target: &str| Error::coercion(value, target);

    match kind {
        ArgKind::Number => coerce_literal(value, JsonType::Number),
        ArgKind::Count => match coerce_literal(value, JsonType::Integer) {
            Ok(Value::Number(n)) if n.is_u64() => Ok(Value::Number(n)),
            _ => Err(fail("non-negative integer")),
        },
        ArgKind::Boolean => coerce_literal(value, JsonType::Boolean),
        ArgKind::Text => match value {
            Value::String(_) => Ok(value.clone()),
            _ => Err(fail("string")),
        },
        ArgKind::TextList => {
            let list = coerce_literal(value, JsonType::Array).map_err(|_| fail("array of strings"))?;
            let all_text = list
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string));
            if all_text {
                Ok(list)
            } else {
                Err(fail("array of strings"))
            }
        }
        ArgKind::List => coerce_literal(value, JsonType::Array),
        ArgKind::Schema => coerce_literal(value, JsonType::Object).map_err(|_| fail("schema object")),
        ArgKind::SchemaOrBool => match value {
            Value::Bool(_) | Value::Object(_) => Ok(value.clone()),
            Value::String(s) => parse_json(s)
                .filter(|v| v.is_boolean() || v.is_object())
                .ok_or_else(|| fail("schema object or boolean")),
            _ => Err(fail("schema object or boolean")),
        },
        ArgKind::Any => match value {
            Value::String(s) => Ok(parse_json(s).unwrap_or_else(|| value.clone())),
            _ => Ok(value.clone()),
        },
    }
}

/// Parse a text flag such as `skip`
pub(crate) fn parse_boolean(s: &str) -> Option<Value> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        _ => None,
    }
}

fn parse_integer(s: &str) -> Option<Value> {
    let s = s.trim();
    s.parse::<i64>()
        .map(Value::from)
        .or_else(|_| s.parse::<u64>().map(Value::from))
        .ok()
}

fn parse_number(s: &str) -> Option<Value> {
    if let Some(integer) = parse_integer(s) {
        return Some(integer);
    }
    s.trim()
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

fn parse_json(s: &str) -> Option<Value> {
    serde_json::from_str(s).ok()
}
