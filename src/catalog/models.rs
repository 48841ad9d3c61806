//! Service catalog models

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;

use crate::error::ClientError;

/// The three service groupings offered by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ServiceCategory {
    Imei,
    Server,
    File,
}

impl ServiceCategory {
    /// Catalog endpoint for this category
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Imei => "imei-services",
            Self::Server => "server-services",
            Self::File => "file-services",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

impl FromStr for ServiceCategory {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "imei-services" | "imei" => Ok(Self::Imei),
            "server-services" | "server" => Ok(Self::Server),
            "file-services" | "file" => Ok(Self::File),
            other => Err(ClientError::UnknownServiceCategory(other.to_string())),
        }
    }
}

/// Submission parameters of a service
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceParams {
    /// Rule structure of the service's main input field
    pub main_field: Value,
    /// Pricing/calculation mode, copied verbatim from the provider
    pub calculation_type: Value,
    pub allow_duplicates: bool,
}

impl ServiceParams {
    /// JSON blob in the `{"main_field":…,"calculation_type":…,"allow_duplicates":…}` form.
    pub fn to_json(&self) -> String {
        json!({
            "main_field": self.main_field,
            "calculation_type": self.calculation_type,
            "allow_duplicates": self.allow_duplicates,
        })
        .to_string()
    }
}

/// A purchasable service, normalized from a provider descriptor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    /// Estimated delivery time, free text
    pub time: String,
    pub info: String,
    /// Price in provider credits
    pub price: Decimal,
    /// JSON text describing extra submission fields
    pub additional_fields: String,
    /// Always `None` when fetched; reserved for caller-side enrichment
    pub additional_data: Option<Value>,
    pub params: ServiceParams,
    /// File services only: accepted upload extensions, when the provider lists them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_extensions: Option<Vec<String>>,
}
