//! Field validators for listing attributes
//!
//! Each validator takes the field as it appears after normalization (or as
//! stored), returns the typed value on success, and a human-readable message
//! otherwise. `label` is the capitalized field name used in messages.

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use super::normalizer::CONTACT_DIGITS;

/// Largest integer a JSON number can carry without losing precision
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Validate a required, non-empty text field
pub fn validate_text(value: Option<&Value>, label: &str) -> Result<String, String> {
    match value {
        None => Err(format!("{} is required", label)),
        Some(Value::String(s)) if s.trim().is_empty() => Err(format!("{} is required", label)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(format!("{} must be a string, received {}", label, kind(other))),
    }
}

/// Validate a required, finite, strictly positive number
pub fn validate_positive_number(value: Option<f64>, label: &str) -> Result<f64, String> {
    let number = require_finite(value, label)?;
    if number <= 0.0 {
        return Err(format!("{} must be a positive number", label));
    }
    Ok(number)
}

/// Validate a required, strictly positive integer
pub fn validate_positive_integer(value: Option<f64>, label: &str) -> Result<i64, String> {
    let number = require_finite(value, label)?;
    if number.fract() != 0.0 || number <= 0.0 {
        return Err(format!("{} must be a positive integer", label));
    }
    if number > MAX_SAFE_INTEGER {
        return Err(format!("{} is too large", label));
    }
    Ok(number as i64)
}

/// Read a field that must already be a JSON number, with no coercion.
///
/// Used on the read path, where a number stored as text is drift, not input.
pub fn strict_number(value: Option<&Value>, label: &str) -> Result<f64, String> {
    match value {
        None | Some(Value::Null) => Err(format!("{} is required", label)),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| format!("{} must be a number", label)),
        Some(other) => Err(format!("{} must be a number, received {}", label, kind(other))),
    }
}

/// Validate a canonical contact number: exactly 10 ASCII digits
pub fn validate_contact(value: Option<&Value>) -> Result<String, String> {
    match value {
        None => Err("Contact is required".to_string()),
        Some(Value::String(s)) => {
            if s.len() != CONTACT_DIGITS || !s.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format!("Contact number must be {} digits", CONTACT_DIGITS));
            }
            Ok(s.clone())
        }
        Some(other) => Err(format!("Contact must be a string, received {}", kind(other))),
    }
}

/// Validate a store-assigned UUID
pub fn validate_uuid(value: Option<&Value>, label: &str) -> Result<Uuid, String> {
    match value {
        None | Some(Value::Null) => Err(format!("{} is required", label)),
        Some(Value::String(s)) => {
            Uuid::parse_str(s).map_err(|_| format!("{} must be a valid UUID", label))
        }
        Some(other) => Err(format!("{} must be a string, received {}", label, kind(other))),
    }
}

/// Validate an RFC 3339 timestamp
pub fn validate_timestamp(value: Option<&Value>, label: &str) -> Result<DateTime<Utc>, String> {
    match value {
        None | Some(Value::Null) => Err(format!("{} is required", label)),
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|_| format!("{} must be an RFC 3339 timestamp", label)),
        Some(other) => Err(format!("{} must be a string, received {}", label, kind(other))),
    }
}

fn require_finite(value: Option<f64>, label: &str) -> Result<f64, String> {
    match value {
        None => Err(format!("{} is required", label)),
        Some(n) if !n.is_finite() => Err(format!("{} must be a number", label)),
        Some(n) => Ok(n),
    }
}

/// JSON type name for error messages
fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
