//! Field normalization for raw listing payloads
//!
//! Runs before the input schema. Normalization never fails and never invents
//! fields: anything it cannot make sense of is carried through in a shape the
//! schema will reject.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

lazy_static! {
    /// Anything that is not an ASCII digit
    static ref NON_DIGIT: Regex = Regex::new(r"[^0-9]").unwrap();

    /// Control characters (except newline and tab)
    static ref CONTROL_CHARS: Regex = Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").unwrap();
}

/// Length of a canonical contact number
pub const CONTACT_DIGITS: usize = 10;

/// A listing payload after normalization, ready for the input schema.
///
/// `None` means the client did not send the field (or sent `null`).
/// Numeric fields hold `f64::NAN` when the supplied value was not numeric.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedListing {
    pub title: Option<Value>,
    pub description: Option<Value>,
    pub rent: Option<f64>,
    pub address: Option<Value>,
    pub rooms: Option<f64>,
    pub contact: Option<Value>,
}

/// Normalize a raw listing payload.
///
/// A payload that is not a JSON object normalizes to an empty record, which
/// the input schema then rejects field by field.
pub fn normalize_listing(raw: &Value) -> NormalizedListing {
    let Some(fields) = raw.as_object() else {
        return NormalizedListing::default();
    };

    NormalizedListing {
        title: present(fields, "title").map(normalize_text),
        description: present(fields, "description").map(normalize_text),
        rent: present(fields, "rent").map(coerce_number),
        address: present(fields, "address").map(normalize_text),
        rooms: present(fields, "rooms").map(coerce_number),
        contact: present(fields, "contact").map(normalize_contact),
    }
}

fn present<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| !v.is_null())
}

/// Coerce a wire value to a number.
///
/// JSON numbers pass through; strings are trimmed and parsed. Everything
/// else, including empty strings, becomes NaN.
pub fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return f64::NAN;
            }
            trimmed.parse::<f64>().unwrap_or(f64::NAN)
        }
        _ => f64::NAN,
    }
}

/// Reduce a phone number to its digits, dropping a leading US country code.
///
/// Only an 11-digit string starting with `1` is shortened; every other
/// length is returned as-is.
pub fn canonical_contact(contact: &str) -> String {
    let digits = NON_DIGIT.replace_all(contact, "");
    if digits.len() == CONTACT_DIGITS + 1 && digits.starts_with('1') {
        digits[1..].to_string()
    } else {
        digits.into_owned()
    }
}

fn normalize_contact(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(canonical_contact(s)),
        other => other.clone(),
    }
}

/// Trim surrounding whitespace and remove control characters
pub fn sanitize_text(value: &str) -> String {
    CONTROL_CHARS.replace_all(value, "").trim().to_string()
}

fn normalize_text(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(sanitize_text(s)),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_contact_strips_formatting() {
        assert_eq!(canonical_contact("(617) 555-0101"), "6175550101");
        assert_eq!(canonical_contact("617.555.0101"), "6175550101");
        assert_eq!(canonical_contact("6175550101"), "6175550101");
    }

    #[test]
    fn test_canonical_contact_drops_country_code() {
        assert_eq!(canonical_contact("1-755-123-4567"), "7551234567");
        assert_eq!(canonical_contact("+1 (755) 123 4567"), "7551234567");
    }

    #[test]
    fn test_canonical_contact_leaves_other_lengths() {
        assert_eq!(canonical_contact("755-123-456"), "755123456");
        // 11 digits not starting with 1 are not a country code
        assert_eq!(canonical_contact("27551234567"), "27551234567");
        assert_eq!(canonical_contact("44 20 7946 0958 1"), "4420794609581");
        assert_eq!(canonical_contact("call me"), "");
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(&json!("1500")), 1500.0);
        assert_eq!(coerce_number(&json!(" 2 ")), 2.0);
        assert_eq!(coerce_number(&json!("1500.50")), 1500.5);
        assert_eq!(coerce_number(&json!(3)), 3.0);
        assert_eq!(coerce_number(&json!(-4)), -4.0);
        assert!(coerce_number(&json!("lots")).is_nan());
        assert!(coerce_number(&json!("")).is_nan());
        assert!(coerce_number(&json!(true)).is_nan());
        assert!(coerce_number(&json!([1])).is_nan());
    }

    #[test]
    fn test_normalize_listing_scenario() {
        let raw = json!({
            "title": "Loft",
            "description": "Bright",
            "rent": "1500",
            "rooms": "2",
            "address": "1 Main St",
            "contact": "(617) 555-0101"
        });

        let normalized = normalize_listing(&raw);

        assert_eq!(normalized.title, Some(json!("Loft")));
        assert_eq!(normalized.rent, Some(1500.0));
        assert_eq!(normalized.rooms, Some(2.0));
        assert_eq!(normalized.contact, Some(json!("6175550101")));
    }

    #[test]
    fn test_normalize_listing_leaves_absent_fields_absent() {
        let normalized = normalize_listing(&json!({ "title": "Loft", "rent": null }));

        assert_eq!(normalized.title, Some(json!("Loft")));
        assert_eq!(normalized.rent, None);
        assert_eq!(normalized.rooms, None);
        assert_eq!(normalized.contact, None);
    }

    #[test]
    fn test_normalize_listing_passes_wrong_types_through() {
        let normalized = normalize_listing(&json!({ "title": 7, "contact": 6175550101u64 }));

        assert_eq!(normalized.title, Some(json!(7)));
        assert_eq!(normalized.contact, Some(json!(6175550101u64)));
    }

    #[test]
    fn test_normalize_listing_trims_text() {
        let normalized = normalize_listing(&json!({ "address": "  1 Main St\u{0007} " }));
        assert_eq!(normalized.address, Some(json!("1 Main St")));
    }

    #[test]
    fn test_normalize_non_object() {
        assert_eq!(normalize_listing(&json!("nope")), NormalizedListing::default());
        assert_eq!(normalize_listing(&json!(null)), NormalizedListing::default());
    }
}
