//! Argument coercion
//!
//! Best-effort conversion of caller-supplied argument values into the
//! semantic types their parameters declare. A value either converts or
//! passes through verbatim; coercion never substitutes a default.

use serde_json::{Number, Value};

use crate::core::{BridgeError, BridgeResult};

use super::convert::{json_kind, ParameterMetadata, SemanticType};

/// Coerce a non-null argument value to its parameter's semantic type.
///
/// Null and absent arguments are dropped before invocation and never
/// reach this function.
pub fn coerce_argument(parameter: &ParameterMetadata, value: Value) -> BridgeResult<Value> {
    match parameter.semantic_type {
        SemanticType::Integer => coerce_integer(parameter, value),
        SemanticType::Number => coerce_number(parameter, value),
        SemanticType::Boolean => coerce_boolean(parameter, value),
        // Arrays and objects are already in their wire shape; strings and
        // untyped parameters are forwarded verbatim.
        SemanticType::StringList
        | SemanticType::Map
        | SemanticType::String
        | SemanticType::Any => Ok(value),
    }
}

fn coerce_integer(parameter: &ParameterMetadata, value: Value) -> BridgeResult<Value> {
    if let Value::Number(n) = &value {
        if n.is_i64() || n.is_u64() {
            return Ok(value);
        }
    }

    let converted = match &value {
        Value::Number(n) => n.as_f64().and_then(round_to_i64),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(round_to_i64))
        }
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    };

    converted
        .map(|i| Value::Number(Number::from(i)))
        .ok_or_else(|| coercion_error(parameter, &value))
}

fn coerce_number(parameter: &ParameterMetadata, value: Value) -> BridgeResult<Value> {
    if value.is_number() {
        return Ok(value);
    }

    let converted = match &value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };

    converted
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| coercion_error(parameter, &value))
}

fn coerce_boolean(parameter: &ParameterMetadata, value: Value) -> BridgeResult<Value> {
    if value.is_boolean() {
        return Ok(value);
    }

    let converted = match &value {
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        _ => None,
    };

    converted
        .map(Value::Bool)
        .ok_or_else(|| coercion_error(parameter, &value))
}

fn round_to_i64(f: f64) -> Option<i64> {
    if f.is_finite() && (i64::MIN as f64..=i64::MAX as f64).contains(&f) {
        Some(f.round() as i64)
    } else {
        None
    }
}

fn coercion_error(parameter: &ParameterMetadata, value: &Value) -> BridgeError {
    BridgeError::Coercion {
        parameter: parameter.name.clone(),
        expected: parameter.semantic_type,
        value: format!("{} {}", json_kind(value), value),
    }
}
