//! Account balance and currency.

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::value::sanitize_decimal;

pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, PartialEq)]
pub struct AccountInfo {
    pub balance: Decimal,
    pub currency: String,
    /// The decoded account object, for fields not projected above
    pub raw: Map<String, Value>,
}

impl AccountInfo {
    pub fn from_value(value: &Value) -> Self {
        let raw = value.as_object().cloned().unwrap_or_default();

        let balance = raw.get("balance").map(sanitize_decimal).unwrap_or_default();
        let currency = raw
            .get("currency")
            .and_then(Value::as_str)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CURRENCY)
            .to_string();

        Self {
            balance,
            currency,
            raw,
        }
    }
}
