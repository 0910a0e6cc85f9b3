use crate::{
    errors::errors::{Error, ErrorImpl},
    Span,
};

use super::values::RuntimeVal;

fn invalid_conversion(value: &RuntimeVal, target: &str, span: &Span) -> Error {
    Error::new(
        ErrorImpl::InvalidConversion {
            value: value.to_string(),
            target: target.to_string(),
        },
        span.clone(),
    )
}

/// Floats truncate towards zero, strings must hold a decimal integer and
/// booleans map to 1/0.
pub fn to_int(value: &RuntimeVal, span: &Span) -> Result<i64, Error> {
    match value {
        RuntimeVal::Int(value) => Ok(*value),
        RuntimeVal::Float(value) => Ok(value.trunc() as i64),
        RuntimeVal::String(string) => string
            .parse::<i64>()
            .map_err(|_| invalid_conversion(value, "int", span)),
        RuntimeVal::Bool(value) => Ok(i64::from(*value)),
        _ => Err(invalid_conversion(value, "int", span)),
    }
}

pub fn to_float(value: &RuntimeVal, span: &Span) -> Result<f64, Error> {
    match value {
        RuntimeVal::Int(value) => Ok(*value as f64),
        RuntimeVal::Float(value) => Ok(*value),
        RuntimeVal::String(string) => string
            .parse::<f64>()
            .map_err(|_| invalid_conversion(value, "float", span)),
        RuntimeVal::Bool(value) => Ok(if *value { 1.0 } else { 0.0 }),
        _ => Err(invalid_conversion(value, "float", span)),
    }
}

/// String coercion used by concatenation and `string()`. Floats always
/// carry six decimals here, unlike their display form.
pub fn to_string(value: &RuntimeVal) -> String {
    match value {
        RuntimeVal::Float(value) => format!("{:.6}", value),
        other => other.to_string(),
    }
}

/// Truthiness. Numbers are true when positive, strings and arrays when
/// non-empty; `null` and `undefined` are false and callables are true.
pub fn to_bool(value: &RuntimeVal) -> bool {
    match value {
        RuntimeVal::Int(value) => *value > 0,
        RuntimeVal::Float(value) => *value > 0.0,
        RuntimeVal::String(value) => !value.is_empty(),
        RuntimeVal::Bool(value) => *value,
        RuntimeVal::Null | RuntimeVal::Undefined => false,
        RuntimeVal::Array(elements) => !elements.is_empty(),
        RuntimeVal::Function(_) | RuntimeVal::NativeFunction(_) | RuntimeVal::TypeAlias(_) => true,
    }
}
