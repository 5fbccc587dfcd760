//! Numeric coercion for loosely typed request fields.
//!
//! Clients send cost and quantity either as JSON numbers or as strings
//! (`"10"`, `"5"`). These helpers turn both into the typed values the
//! tables store, failing on anything that is not numeric.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// A request field could not be converted to the numeric type it feeds.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot convert {field} value {value} to {target}")]
pub struct CoerceError {
    pub field: &'static str,
    pub value: String,
    pub target: &'static str,
}

impl CoerceError {
    fn new(field: &'static str, value: &Value, target: &'static str) -> Self {
        Self {
            field,
            value: value.to_string(),
            target,
        }
    }
}

/// Integer conversion: JSON integers pass through, JSON floats are truncated
/// toward zero, strings must hold an integer literal.
pub fn to_int(field: &'static str, value: &Value) -> Result<i64, CoerceError> {
    let converted = match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.is_finite() && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };
    converted.ok_or_else(|| CoerceError::new(field, value, "integer"))
}

/// Decimal conversion: any JSON number, or a string holding a float literal.
pub fn to_float(field: &'static str, value: &Value) -> Result<f64, CoerceError> {
    let converted = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    converted.ok_or_else(|| CoerceError::new(field, value, "decimal"))
}

/// Parses an integer column cell. Files written by float-typed tooling carry
/// `10.0` for whole numbers, so integral decimals are accepted too.
pub fn parse_int_text(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(value) = text.parse::<i64>() {
        return Some(value);
    }
    text.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite() && f.fract() == 0.0)
        .filter(|f| *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
        .map(|f| f as i64)
}

/// `deserialize_with` adapter for integer CSV columns.
pub fn lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_int_text(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid integer: {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_int_accepts_numbers_and_numeric_strings() {
        assert_eq!(to_int("cost", &json!(10)), Ok(10));
        assert_eq!(to_int("cost", &json!("10")), Ok(10));
        assert_eq!(to_int("cost", &json!(" 42 ")), Ok(42));
        assert_eq!(to_int("cost", &json!(10.9)), Ok(10));
        assert_eq!(to_int("cost", &json!(-3.5)), Ok(-3));
    }

    #[test]
    fn test_to_int_rejects_non_numeric() {
        for value in [json!("abc"), json!("10.5"), json!(null), json!(true), json!([1])] {
            let err = to_int("cost", &value).unwrap_err();
            assert_eq!(err.field, "cost");
            assert_eq!(err.target, "integer");
        }
    }

    #[test]
    fn test_to_float() {
        assert_eq!(to_float("quantity", &json!("5")), Ok(5.0));
        assert_eq!(to_float("quantity", &json!(2.25)), Ok(2.25));
        assert_eq!(to_float("quantity", &json!(7)), Ok(7.0));
        assert!(to_float("quantity", &json!("five")).is_err());
        assert!(to_float("quantity", &json!({})).is_err());
    }

    #[test]
    fn test_parse_int_text() {
        assert_eq!(parse_int_text("10"), Some(10));
        assert_eq!(parse_int_text("10.0"), Some(10));
        assert_eq!(parse_int_text("10.5"), None);
        assert_eq!(parse_int_text(""), None);
    }
}
