//! Rendered documentation formats
//!
//! One projection feeds multiple serializers: pretty JSON, YAML, and a
//! flattened self-documenting payload form used to render example payloads
//! for documentation generators.

use serde_json::{Map, Value};

use crate::mimeo::doc::TokenDoc;

/// Pretty-printed JSON rendering of a projection.
pub fn doc_to_json_string(doc: &TokenDoc) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(doc)
}

/// YAML rendering of a projection.
pub fn doc_to_yaml_string(doc: &TokenDoc) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(doc)
}

/// Flattened self-documenting payload: per field, `"<name>"` holds the raw
/// value and a sibling `"<name>__comment"` holds `"<caption>. <Type>."`.
/// Optional fields suffix the key itself with `?`. Nested projections are
/// flattened the same way.
pub fn flatten_doc(doc: &TokenDoc) -> Value {
    match flatten_field(&doc.to_value()) {
        Some(fields) => Value::Object(fields),
        None => doc.value.clone(),
    }
}

/// Flatten one projection object into its `name`/`name__comment` pair.
fn flatten_field(projection: &Value) -> Option<Map<String, Value>> {
    let fields = projection.as_object()?;
    let name = fields.get("name")?.as_str()?;
    let caption = fields.get("caption")?.as_str()?;
    let kind = fields.get("type")?.as_str()?;
    let optional = fields.get("optional")?.as_bool()?;
    let value = fields.get("value")?;

    let key = if optional {
        format!("{name}?")
    } else {
        name.to_string()
    };

    let mut out = Map::new();
    out.insert(key, flatten_value(value));
    out.insert(
        format!("{name}__comment"),
        Value::String(format!("{caption}. {kind}.")),
    );
    Some(out)
}

/// Replace nested projections inside a raw-mode value with flattened
/// fields, recursively.
fn flatten_value(value: &Value) -> Value {
    match value {
        Value::Object(map) if !map.is_empty() && map.values().all(is_projection) => {
            let mut out = Map::new();
            for child in map.values() {
                if let Some(fields) = flatten_field(child) {
                    out.extend(fields);
                }
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| match flatten_field(item) {
                    Some(fields) => Value::Object(fields),
                    None => flatten_value(item),
                })
                .collect(),
        ),
        other => other.clone(),
    }
}

/// A raw-mode aggregate entry carries the five projection fields.
fn is_projection(value: &Value) -> bool {
    value.as_object().is_some_and(|map| {
        ["name", "value", "optional", "caption", "type"]
            .iter()
            .all(|key| map.contains_key(*key))
    })
}
