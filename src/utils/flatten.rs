//! Flattening of CMS response envelopes.
//!
//! The CMS wraps every entity as `{ "id": 1, "attributes": { ... } }` and
//! every relation or collection as `{ "data": ... }`. This module collapses
//! those envelopes recursively so callers see plain records:
//!
//! ```
//! use serde_json::json;
//! use strapi_contacts::utils::flatten::flatten_attributes;
//!
//! let raw = json!({
//!     "id": 7,
//!     "attributes": {
//!         "first": "Ada",
//!         "avatar": { "data": { "id": 3, "attributes": { "url": "/a.png" } } }
//!     }
//! });
//!
//! assert_eq!(
//!     flatten_attributes(&raw),
//!     json!({ "first": "Ada", "avatar": { "url": "/a.png", "id": 3 }, "id": 7 })
//! );
//! ```

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

const ATTRIBUTES_KEY: &str = "attributes";
const DATA_KEY: &str = "data";

/// Returns whether a JSON value counts as "present" when probing the
/// envelope shape: `null`, `false`, `0` and `""` do not.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Recursively unwraps `attributes` and `data` envelopes into flat values.
///
/// Falsy input becomes `null`, arrays are flattened element-wise, and
/// non-envelope scalars pass through unchanged. For objects, attribute
/// entries come first, sibling keys overwrite them, and a truthy `data`
/// member is flattened and merged over the result last.
pub fn flatten_attributes(value: &Value) -> Value {
    if !is_truthy(value) {
        return Value::Null;
    }

    match value {
        Value::Array(items) => Value::Array(items.iter().map(flatten_attributes).collect()),
        Value::Object(object) => Value::Object(flatten_object(object)),
        other => other.clone(),
    }
}

/// Flattens `value` and deserializes the result into `T`.
pub fn flatten_into<T: DeserializeOwned>(value: &Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(flatten_attributes(value))
}

fn flatten_object(object: &Map<String, Value>) -> Map<String, Value> {
    let mut flattened = Map::new();

    if let Some(Value::Object(attributes)) = object.get(ATTRIBUTES_KEY) {
        for (key, attribute) in attributes {
            let value = match attribute {
                Value::Object(relation) if relation.contains_key(DATA_KEY) => {
                    flatten_attributes(&relation[DATA_KEY])
                }
                other => other.clone(),
            };
            flattened.insert(key.clone(), value);
        }
    }

    for (key, value) in object {
        if key != ATTRIBUTES_KEY && key != DATA_KEY {
            flattened.insert(key.clone(), value.clone());
        }
    }

    if let Some(nested) = object.get(DATA_KEY).filter(|v| is_truthy(v)) {
        match flatten_attributes(nested) {
            Value::Object(inner) => {
                for (key, value) in inner {
                    flattened.insert(key, value);
                }
            }
            // Spreading an array or string into an object keys it by index.
            Value::Array(items) => {
                for (index, value) in items.into_iter().enumerate() {
                    flattened.insert(index.to_string(), value);
                }
            }
            Value::String(text) => {
                for (index, ch) in text.chars().enumerate() {
                    flattened.insert(index.to_string(), Value::String(ch.to_string()));
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
    }

    flattened
}
