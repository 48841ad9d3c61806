//! Outbound request parameters.
//!
//! Parameters keep insertion order. Nested extension values are flattened
//! with bracket keys (`options[color]`, `tags[0]`), the convention PHP form
//! parsers expect.

use serde_json::Value;
use std::path::PathBuf;

use crate::value::scalar_to_string;

#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Text(String),
    /// Local file sent as a multipart file part
    File(PathBuf),
    /// Omitted from query strings, sent as an empty part in multipart bodies
    Null,
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    fields: Vec<(String, FormValue)>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any earlier value (including flattened children).
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FormValue>) {
        let key = key.into();
        self.remove(&key);
        self.fields.push((key, value.into()));
    }

    /// Set `key` from a JSON value, flattening objects and arrays.
    pub fn insert_json(&mut self, key: impl Into<String>, value: &Value) {
        let key = key.into();
        self.remove(&key);
        self.push_flattened(key, value);
    }

    /// Merge a JSON object; later keys win.
    pub fn merge_json(&mut self, map: &serde_json::Map<String, Value>) {
        for (key, value) in map {
            self.insert_json(key.as_str(), value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&FormValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Text pairs for a URL query. Nulls are dropped; files are sent by name.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .filter_map(|(k, v)| match v {
                FormValue::Text(text) => Some((k.clone(), text.clone())),
                FormValue::File(path) => Some((k.clone(), path.display().to_string())),
                FormValue::Null => None,
            })
            .collect()
    }

    fn remove(&mut self, key: &str) {
        let nested = format!("{}[", key);
        self.fields.retain(|(k, _)| k != key && !k.starts_with(&nested));
    }

    fn push_flattened(&mut self, key: String, value: &Value) {
        match value {
            Value::Object(map) => {
                for (child, v) in map {
                    self.push_flattened(format!("{}[{}]", key, child), v);
                }
            }
            Value::Array(items) => {
                for (index, v) in items.iter().enumerate() {
                    self.push_flattened(format!("{}[{}]", key, index), v);
                }
            }
            scalar => {
                let value = scalar_to_string(scalar)
                    .map(FormValue::Text)
                    .unwrap_or(FormValue::Null);
                self.fields.push((key, value));
            }
        }
    }
}
