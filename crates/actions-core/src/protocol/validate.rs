//! Typed field assertions for protocol JSON.
//!
//! Every helper takes the raw field (`None` when the key is absent) and the
//! field name used in the error message, and returns the typed value or an
//! [`ActionError::InvalidArgument`].

use serde_json::{Map, Value};

use crate::error::ActionError;

type Result<T> = std::result::Result<T, ActionError>;

/// Renders a field for an error message, `undefined` when absent.
fn describe(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(v) => v.to_string(),
    }
}

fn expected(name: &str, what: &str, value: Option<&Value>) -> ActionError {
    ActionError::invalid(format!(
        "Expected \"{name}\" to be {what}, got {}",
        describe(value)
    ))
}

pub fn object<'a>(value: Option<&'a Value>, name: &str) -> Result<&'a Map<String, Value>> {
    value
        .and_then(Value::as_object)
        .ok_or_else(|| expected(name, "an object", value))
}

pub fn array<'a>(value: Option<&'a Value>, name: &str) -> Result<&'a Vec<Value>> {
    value
        .and_then(Value::as_array)
        .ok_or_else(|| expected(name, "an array", value))
}

pub fn string<'a>(value: Option<&'a Value>, name: &str) -> Result<&'a str> {
    value
        .and_then(Value::as_str)
        .ok_or_else(|| expected(name, "a string", value))
}

/// Accepts any JSON number that holds an integral value, including `5.0`.
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    let f = value.as_f64()?;
    (f.is_finite() && f.fract() == 0.0 && f.abs() <= i64::MAX as f64).then_some(f as i64)
}

pub fn integer(value: Option<&Value>, name: &str) -> Result<i64> {
    value
        .and_then(as_integer)
        .ok_or_else(|| expected(name, "an integer", value))
}

pub fn non_negative_integer(value: Option<&Value>, name: &str) -> Result<u64> {
    value
        .and_then(as_integer)
        .and_then(|i| u64::try_from(i).ok())
        .ok_or_else(|| expected(name, "a non-negative integer", value))
}

pub fn integer_in_range(value: Option<&Value>, name: &str, min: i64, max: i64) -> Result<i64> {
    value
        .and_then(as_integer)
        .filter(|i| (min..=max).contains(i))
        .ok_or_else(|| expected(name, &format!("an integer in range [{min}, {max}]"), value))
}

/// A finite JSON number.
pub fn number(value: Option<&Value>, name: &str) -> Result<f64> {
    value
        .and_then(Value::as_f64)
        .filter(|f| f.is_finite())
        .ok_or_else(|| expected(name, "a finite number", value))
}

pub fn number_in_range(value: Option<&Value>, name: &str, min: f64, max: f64) -> Result<f64> {
    value
        .and_then(Value::as_f64)
        .filter(|f| (min..=max).contains(f))
        .ok_or_else(|| expected(name, &format!("a number in range [{min}, {max}]"), value))
}

/// Runs `check` on `map[key]` when the key is present.
pub fn optional<'a, T>(
    map: &'a Map<String, Value>,
    key: &str,
    check: impl FnOnce(Option<&'a Value>, &str) -> Result<T>,
) -> Result<Option<T>> {
    match map.get(key) {
        None => Ok(None),
        present => check(present, key).map(Some),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_field_reports_undefined() {
        let err = string(None, "id").unwrap_err();
        assert_eq!(
            err,
            ActionError::InvalidArgument("Expected \"id\" to be a string, got undefined".into())
        );
    }

    #[test]
    fn test_integral_floats_are_integers() {
        assert_eq!(integer(Some(&json!(5.0)), "x").unwrap(), 5);
        assert!(integer(Some(&json!(5.5)), "x").is_err());
        assert!(integer(Some(&json!("5")), "x").is_err());
    }

    #[test]
    fn test_non_negative_integer_rejects_negative() {
        assert_eq!(non_negative_integer(Some(&json!(0)), "button").unwrap(), 0);
        assert!(non_negative_integer(Some(&json!(-1)), "button").is_err());
    }

    #[test]
    fn test_ranges_are_inclusive() {
        assert_eq!(integer_in_range(Some(&json!(-90)), "tiltX", -90, 90).unwrap(), -90);
        assert!(integer_in_range(Some(&json!(91)), "tiltX", -90, 90).is_err());
        assert_eq!(number_in_range(Some(&json!(1)), "pressure", 0.0, 1.0).unwrap(), 1.0);
        assert!(number_in_range(Some(&json!(1.01)), "pressure", 0.0, 1.0).is_err());
    }

    #[test]
    fn test_optional_skips_absent_but_checks_null() {
        let map = json!({ "duration": null }).as_object().unwrap().clone();

        assert_eq!(optional(&map, "missing", non_negative_integer).unwrap(), None);
        assert!(optional(&map, "duration", non_negative_integer).is_err());
    }
}
