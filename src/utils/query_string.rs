//! Bracket-nested query string encoding.
//!
//! The CMS parses filters and pagination from keys such as
//! `filters[$or][0][first][$contains]=ada`. [`stringify`] produces that
//! encoding from a JSON tree, percent-encoding keys and values per RFC 3986.
//!
//! ```
//! use serde_json::json;
//! use strapi_contacts::utils::query_string::stringify;
//!
//! let query = stringify(&json!({ "pagination": { "page": 1 } }));
//! assert_eq!(query, "pagination%5Bpage%5D=1");
//! ```

use serde_json::Value;

/// Encodes `value` as a query string without the leading `?`.
///
/// Only objects produce output at the top level; keys keep insertion order.
pub fn stringify(value: &Value) -> String {
    let mut pairs = Vec::new();
    if let Value::Object(object) = value {
        for (key, child) in object {
            collect_pairs(key.clone(), child, &mut pairs);
        }
    }

    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn collect_pairs(prefix: String, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Object(object) => {
            for (key, child) in object {
                collect_pairs(format!("{}[{}]", prefix, key), child, pairs);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                collect_pairs(format!("{}[{}]", prefix, index), child, pairs);
            }
        }
        Value::Null => pairs.push((prefix, String::new())),
        Value::String(s) => pairs.push((prefix, s.clone())),
        Value::Bool(_) | Value::Number(_) => pairs.push((prefix, value.to_string())),
    }
}
