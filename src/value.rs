//! Lenient readers for provider JSON.
//!
//! The provider is a PHP application: numbers frequently arrive as strings,
//! booleans as `0`/`1`, and "empty" covers `null`, `false`, `0`, `""`, `"0"`
//! and empty collections alike.

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// PHP-style emptiness.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Scalar to text. `None` for null and collections.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some("0".to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Strict decimal read: numbers or numeric strings only.
pub fn to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .ok()
            .or_else(|| n.as_f64().and_then(|f| Decimal::try_from(f).ok())),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

/// Permissive decimal read. Strings are stripped down to digits, sign
/// characters and the decimal point before parsing, so `"12.50 credits"`
/// reads as 12.5 and `"$1,234.56"` as 1234.56. Anything unparseable is 0.
pub fn sanitize_decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => {
            let kept: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.'))
                .collect();
            Decimal::from_str(&kept).unwrap_or(Decimal::ZERO)
        }
        other => to_decimal(other).unwrap_or(Decimal::ZERO),
    }
}

/// Integer read accepting numbers and numeric strings.
pub fn to_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Boolean read accepting `true`/`false`, `0`/`1` and their string forms.
pub fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "" | "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_values() {
        for blank in [json!(null), json!(false), json!(0), json!(""), json!("0"), json!([]), json!({})] {
            assert!(is_blank(&blank), "{} should be blank", blank);
        }
        for present in [json!(true), json!(7), json!("a"), json!(["x"]), json!({"k": 1})] {
            assert!(!is_blank(&present), "{} should not be blank", present);
        }
    }

    #[test]
    fn test_sanitize_decimal() {
        assert_eq!(sanitize_decimal(&json!("12.50 credits")), Decimal::new(125, 1));
        assert_eq!(sanitize_decimal(&json!("$1,234.56")), Decimal::new(123456, 2));
        assert_eq!(sanitize_decimal(&json!("N/A")), Decimal::ZERO);
        assert_eq!(sanitize_decimal(&json!("1.2.3")), Decimal::ZERO);
        assert_eq!(sanitize_decimal(&json!(42)), Decimal::new(42, 0));
        assert_eq!(sanitize_decimal(&json!(null)), Decimal::ZERO);
    }

    #[test]
    fn test_to_u64() {
        assert_eq!(to_u64(&json!(42)), Some(42));
        assert_eq!(to_u64(&json!("42")), Some(42));
        assert_eq!(to_u64(&json!("abc")), None);
        assert_eq!(to_u64(&json!(-1)), None);
    }

    #[test]
    fn test_to_bool() {
        assert_eq!(to_bool(&json!(true)), Some(true));
        assert_eq!(to_bool(&json!(1)), Some(true));
        assert_eq!(to_bool(&json!("0")), Some(false));
        assert_eq!(to_bool(&json!("maybe")), None);
    }
}
