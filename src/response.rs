//! Decoding provider bodies and turning provider error sets into
//! [`ClientError`]s.

use serde_json::Value;
use tracing::warn;

use crate::error::{ClientError, ClientResult};
use crate::value::{is_blank, scalar_to_string};

/// Decode a body. Success is a JSON object or array without a non-blank
/// `errors` field; everything else is routed through [`parse_errors`].
pub fn interpret(body: &str) -> ClientResult<Value> {
    let decoded: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, bytes = body.len(), "provider body is not JSON");
            return Err(parse_errors(None));
        }
    };

    if !decoded.is_object() && !decoded.is_array() {
        return Err(parse_errors(None));
    }

    match decoded.get("errors") {
        Some(errors) if !is_blank(errors) => Err(parse_errors(Some(errors))),
        _ => Ok(decoded),
    }
}

/// Build the error for a failed call.
///
/// Each entry of `errors` is a list of messages (or an object of messages
/// keyed by field); messages within an entry and the entries themselves are
/// joined with ", ". A blank or non-collection value means there was nothing
/// usable to report.
pub fn parse_errors(errors: Option<&Value>) -> ClientError {
    let entries: Vec<&Value> = match errors {
        Some(Value::Array(items)) if !items.is_empty() => items.iter().collect(),
        Some(Value::Object(map)) if !map.is_empty() => map.values().collect(),
        _ => {
            return ClientError::ConnectionFailure(
                "provider returned no usable response".to_string(),
            );
        }
    };

    let message = entries
        .into_iter()
        .map(join_messages)
        .collect::<Vec<_>>()
        .join(", ");

    warn!(%message, "provider reported errors");
    ClientError::ProviderError(message)
}

fn join_messages(entry: &Value) -> String {
    let parts: Vec<String> = match entry {
        Value::Array(items) => items.iter().filter_map(scalar_to_string).collect(),
        Value::Object(map) => map.values().filter_map(scalar_to_string).collect(),
        scalar => scalar_to_string(scalar).into_iter().collect(),
    };
    parts.join(", ")
}
