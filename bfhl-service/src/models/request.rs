//! Parsing of the `/bfhl` body into a typed request.
//!
//! The body must be a JSON object with exactly one key. Each key has its
//! own shape check; the first failing check decides the error.

use crate::error::DispatchError;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum BfhlRequest {
    Fibonacci(u64),
    /// Elements that are not integers can never be prime and are kept as `None`.
    Prime(Vec<Option<i64>>),
    Hcf(Vec<i64>),
    Lcm(Vec<i64>),
    Ai(String),
}

impl BfhlRequest {
    pub fn from_body(body: &[u8]) -> Result<Self, DispatchError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| DispatchError::InvalidBody)?;
        match value {
            Value::Object(map) => Self::from_object(map),
            _ => Err(DispatchError::InvalidBody),
        }
    }

    pub fn from_object(map: Map<String, Value>) -> Result<Self, DispatchError> {
        if map.len() != 1 {
            return Err(DispatchError::KeyCount);
        }
        let Some((key, value)) = map.into_iter().next() else {
            return Err(DispatchError::KeyCount);
        };

        match key.as_str() {
            "fibonacci" => as_integer(&value)
                .and_then(|n| u64::try_from(n).ok())
                .or_else(|| value.as_u64())
                .map(BfhlRequest::Fibonacci)
                .ok_or(DispatchError::InvalidFibonacci),
            "prime" => match value {
                Value::Array(items) => Ok(BfhlRequest::Prime(
                    items.iter().map(as_integer).collect(),
                )),
                _ => Err(DispatchError::PrimeNotArray),
            },
            "hcf" => non_empty_integers(value)
                .map(BfhlRequest::Hcf)
                .ok_or(DispatchError::InvalidHcf),
            "lcm" => non_empty_integers(value)
                // lcm(0, 0) has no defined value
                .filter(|values| values.iter().any(|v| *v != 0))
                .map(BfhlRequest::Lcm)
                .ok_or(DispatchError::InvalidLcm),
            "AI" => match value {
                Value::String(question) => Ok(BfhlRequest::Ai(question)),
                _ => Err(DispatchError::AiNotString),
            },
            _ => Err(DispatchError::InvalidKey),
        }
    }

    /// Key name, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            BfhlRequest::Fibonacci(_) => "fibonacci",
            BfhlRequest::Prime(_) => "prime",
            BfhlRequest::Hcf(_) => "hcf",
            BfhlRequest::Lcm(_) => "lcm",
            BfhlRequest::Ai(_) => "AI",
        }
    }
}

/// JSON integers, plus floats with no fractional part (`6.0`).
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn non_empty_integers(value: Value) -> Option<Vec<i64>> {
    match value {
        Value::Array(items) if !items.is_empty() => items.iter().map(as_integer).collect(),
        _ => None,
    }
}
