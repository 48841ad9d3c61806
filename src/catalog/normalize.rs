//! Provider descriptor → [`Service`] normalization.

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

use super::models::{Service, ServiceCategory, ServiceParams};
use crate::error::{ClientError, ClientResult};
use crate::value::{is_blank, scalar_to_string, to_bool, to_decimal};

pub type ServiceMap = BTreeMap<String, Service>;

/// Normalize a catalog response. The body may be a list of descriptors or
/// an object keyed by id; descriptors with a blank id are skipped.
pub fn normalize_services(body: &Value, category: ServiceCategory) -> ClientResult<ServiceMap> {
    let descriptors: Vec<&Value> = match body {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => Vec::new(),
    };

    let mut services = ServiceMap::new();
    for descriptor in descriptors {
        let Some(fields) = descriptor.as_object() else {
            continue;
        };
        let Some(id) = descriptor_id(fields) else {
            debug!(%category, "skipping service descriptor without id");
            continue;
        };

        let service = normalize_descriptor(id, fields, category)?;
        services.insert(service.id.clone(), service);
    }

    debug!(%category, count = services.len(), "normalized service catalog");
    Ok(services)
}

fn descriptor_id(fields: &Map<String, Value>) -> Option<String> {
    fields
        .get("id")
        .filter(|id| !is_blank(id))
        .and_then(scalar_to_string)
}

fn normalize_descriptor(
    id: String,
    fields: &Map<String, Value>,
    category: ServiceCategory,
) -> ClientResult<Service> {
    let text = |key: &str| {
        fields
            .get(key)
            .and_then(scalar_to_string)
            .unwrap_or_default()
    };

    let calculation_type = fields.get("type").cloned().ok_or_else(|| {
        ClientError::MalformedResponse(format!("service {} has no type", id))
    })?;

    let additional_fields = fields
        .get("fields")
        .filter(|f| !f.is_null())
        .cloned()
        .unwrap_or_else(|| Value::Array(Vec::new()))
        .to_string();

    let main_field = fields
        .get("main_field")
        .filter(|f| !f.is_null())
        .cloned()
        .unwrap_or_else(|| Value::Array(Vec::new()));

    let mut service = Service {
        name: text("name"),
        time: text("time"),
        info: text("info"),
        price: fields
            .get("credits")
            .and_then(to_decimal)
            .unwrap_or(Decimal::ZERO),
        additional_fields,
        additional_data: None,
        params: ServiceParams {
            main_field,
            calculation_type,
            allow_duplicates: fields
                .get("allow_duplicates")
                .and_then(to_bool)
                .unwrap_or(false),
        },
        allowed_extensions: None,
        id,
    };

    augment(&mut service, category);
    Ok(service)
}

/// Category-specific fields. Only file services carry anything extra.
fn augment(service: &mut Service, category: ServiceCategory) {
    match category {
        ServiceCategory::File => {
            service.allowed_extensions = allowed_extensions(&service.params.main_field);
        }
        ServiceCategory::Imei | ServiceCategory::Server => {}
    }
}

/// `main_field.rules.allowed`, as a list or a single string.
fn allowed_extensions(main_field: &Value) -> Option<Vec<String>> {
    match main_field.get("rules")?.get("allowed")? {
        Value::Array(items) => Some(items.iter().filter_map(scalar_to_string).collect()),
        Value::String(single) => Some(vec![single.clone()]),
        _ => None,
    }
}
