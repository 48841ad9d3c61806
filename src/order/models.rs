//! Order types: kind, status and the caller-owned [`Order`].

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::ClientError;
use crate::value::to_u64;

/// Order kind, which selects the endpoint and the payload contribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderKind {
    Imei,
    Server,
    File,
}

impl OrderKind {
    /// Write endpoint; reads go to `{endpoint}/{id}`
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Imei => "imei-orders",
            Self::Server => "server-orders",
            Self::File => "file-orders",
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

impl FromStr for OrderKind {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "imei-orders" | "imei" => Ok(Self::Imei),
            "server-orders" | "server" => Ok(Self::Server),
            "file-orders" | "file" => Ok(Self::File),
            other => Err(ClientError::InvalidOrderType(other.to_string())),
        }
    }
}

/// Provider order status.
///
/// Values outside the known codes are kept as `Unrecognized` rather than
/// rejected, since the provider owns the status.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OrderStatus {
    #[default]
    WaitingAction,
    InProcess,
    Cancelled,
    Rejected,
    Success,
    Unrecognized(Value),
}

impl OrderStatus {
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(Self::WaitingAction),
            1 => Some(Self::InProcess),
            2 => Some(Self::Cancelled),
            3 => Some(Self::Rejected),
            4 => Some(Self::Success),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<u64> {
        match self {
            Self::WaitingAction => Some(0),
            Self::InProcess => Some(1),
            Self::Cancelled => Some(2),
            Self::Rejected => Some(3),
            Self::Success => Some(4),
            Self::Unrecognized(_) => None,
        }
    }

    /// Accepts numeric codes and numeric strings; anything else is kept verbatim.
    pub fn from_value(value: &Value) -> Self {
        to_u64(value)
            .and_then(Self::from_code)
            .unwrap_or_else(|| Self::Unrecognized(value.clone()))
    }

    /// Cancelled, Rejected and Success. The provider may still move an order
    /// out of these states; nothing here prevents it.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Rejected | Self::Success)
    }
}

/// Variant-specific order data
#[derive(Debug, Clone, PartialEq)]
pub enum OrderVariant {
    Imei { device: String },
    Server { quantity: u32 },
    /// `device` names the upload, relative to the uploads directory
    File { device: String },
}

impl OrderVariant {
    pub fn kind(&self) -> OrderKind {
        match self {
            Self::Imei { .. } => OrderKind::Imei,
            Self::Server { .. } => OrderKind::Server,
            Self::File { .. } => OrderKind::File,
        }
    }
}

/// Plain data bag an order can be hydrated from
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderData {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub additional: Option<Map<String, Value>>,
    #[serde(default)]
    pub service_id: Option<String>,
}

/// A caller-owned order. The client only mutates `id`, `status` and
/// `response`.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: u64,
    pub service_id: String,
    pub comments: String,
    /// Extra fields merged verbatim into the submission payload
    pub additional: Map<String, Value>,
    pub status: OrderStatus,
    /// Provider-supplied result, set by submit and refresh calls
    pub response: Option<Value>,
    pub variant: OrderVariant,
}

impl Order {
    fn with_variant(service_id: impl Into<String>, variant: OrderVariant) -> Self {
        Self {
            id: 0,
            service_id: service_id.into(),
            comments: String::new(),
            additional: Map::new(),
            status: OrderStatus::WaitingAction,
            response: None,
            variant,
        }
    }

    pub fn imei(service_id: impl Into<String>, device: impl Into<String>) -> Self {
        Self::with_variant(service_id, OrderVariant::Imei { device: device.into() })
    }

    pub fn server(service_id: impl Into<String>, quantity: u32) -> Self {
        Self::with_variant(service_id, OrderVariant::Server { quantity })
    }

    pub fn file(service_id: impl Into<String>, filename: impl Into<String>) -> Self {
        Self::with_variant(service_id, OrderVariant::File { device: filename.into() })
    }

    /// Hydrate an order of `kind` from a data bag. Missing fields keep their
    /// defaults (id 0, quantity 1, empty strings).
    pub fn from_data(kind: OrderKind, data: OrderData) -> Self {
        let device = data.device.unwrap_or_default();
        let variant = match kind {
            OrderKind::Imei => OrderVariant::Imei { device },
            OrderKind::Server => OrderVariant::Server {
                quantity: data.quantity.unwrap_or(1),
            },
            OrderKind::File => OrderVariant::File { device },
        };

        let mut order = Self::with_variant(data.service_id.unwrap_or_default(), variant);
        order.id = data.id.unwrap_or(0);
        order.comments = data.comments.unwrap_or_default();
        order.additional = data.additional.unwrap_or_default();
        order
    }

    /// Hydrate from a kind tag (`"imei-orders"`, `"file"`, ...) and a JSON bag.
    pub fn from_tagged(kind: &str, data: Value) -> Result<Self, ClientError> {
        let kind: OrderKind = kind.parse()?;
        let data: OrderData = serde_json::from_value(data)
            .map_err(|e| ClientError::MalformedResponse(format!("invalid order data: {}", e)))?;
        Ok(Self::from_data(kind, data))
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    pub fn with_additional(mut self, key: impl Into<String>, value: Value) -> Self {
        self.additional.insert(key.into(), value);
        self
    }

    pub fn kind(&self) -> OrderKind {
        self.variant.kind()
    }

    /// Device identifier or upload filename; `None` for server orders.
    pub fn device(&self) -> Option<&str> {
        match &self.variant {
            OrderVariant::Imei { device } | OrderVariant::File { device } => Some(device),
            OrderVariant::Server { .. } => None,
        }
    }

    /// Route of this order on the provider
    pub fn route(&self) -> String {
        format!("{}/{}", self.kind().endpoint(), self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_order_defaults() {
        let order = Order::imei("12", "356938035643809");

        assert_eq!(order.id, 0);
        assert_eq!(order.status, OrderStatus::WaitingAction);
        assert_eq!(order.response, None);
        assert_eq!(order.comments, "");
        assert!(order.additional.is_empty());
        assert_eq!(order.kind(), OrderKind::Imei);
        assert_eq!(order.device(), Some("356938035643809"));
    }

    #[test]
    fn test_hydrate_from_data_bag() {
        let order = Order::from_tagged(
            "server-orders",
            json!({"id": 77, "service_id": "8", "comments": "rush", "additional": {"email": "a@b.c"}}),
        )
        .unwrap();

        assert_eq!(order.id, 77);
        assert_eq!(order.service_id, "8");
        assert_eq!(order.comments, "rush");
        assert_eq!(order.variant, OrderVariant::Server { quantity: 1 });
        assert_eq!(order.additional["email"], "a@b.c");
        assert_eq!(order.route(), "server-orders/77");
    }

    #[test]
    fn test_unknown_kind_is_invalid_order_type() {
        let result = Order::from_tagged("mep-orders", json!({}));
        assert!(matches!(result, Err(ClientError::InvalidOrderType(kind)) if kind == "mep-orders"));
    }

    #[test]
    fn test_status_from_value() {
        assert_eq!(OrderStatus::from_value(&json!(0)), OrderStatus::WaitingAction);
        assert_eq!(OrderStatus::from_value(&json!(4)), OrderStatus::Success);
        assert_eq!(OrderStatus::from_value(&json!("2")), OrderStatus::Cancelled);
        assert_eq!(
            OrderStatus::from_value(&json!(9)),
            OrderStatus::Unrecognized(json!(9))
        );
        assert_eq!(
            OrderStatus::from_value(&json!("on hold")),
            OrderStatus::Unrecognized(json!("on hold"))
        );
    }

    #[test]
    fn test_status_codes_round_trip_known_values() {
        for code in 0..=4 {
            let status = OrderStatus::from_code(code).unwrap();
            assert_eq!(status.code(), Some(code));
        }
        assert!(OrderStatus::from_code(5).is_none());
    }

    #[test]
    fn test_final_statuses() {
        assert!(OrderStatus::Success.is_final());
        assert!(OrderStatus::Rejected.is_final());
        assert!(!OrderStatus::InProcess.is_final());
        assert!(!OrderStatus::Unrecognized(json!(9)).is_final());
    }
}
