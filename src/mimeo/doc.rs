//! Documentation projection for tokens
//!
//! A token projects into a normalized, serializable record — name, caption,
//! optional flag, resolved value, and value kind — so that each rendered
//! format can focus solely on presentation.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lazy-compiled pattern for the uppercase letters rewritten by `snake_case`.
static UPPERCASE: Lazy<Regex> = Lazy::new(|| Regex::new("[A-Z]").unwrap());

/// Convert a camelCase identifier to snake_case: each uppercase letter
/// becomes `_` plus its lowercase form.
pub fn snake_case(name: &str) -> String {
    UPPERCASE
        .replace_all(name, |caps: &regex::Captures<'_>| {
            format!("_{}", caps[0].to_lowercase())
        })
        .into_owned()
}

/// Closed set of value kinds, determined structurally from a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// The kind of a resolved value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "Null",
            ValueKind::Boolean => "Boolean",
            ValueKind::Number => "Number",
            ValueKind::String => "String",
            ValueKind::Array => "Array",
            ValueKind::Object => "Object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Documentation projection of a token.
///
/// `name` is the snake-cased emission name, unsuffixed; the optional flag is
/// carried as the boolean field. `value` holds the raw-mode resolved value,
/// with nested tokens themselves projected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenDoc {
    pub name: String,
    pub value: Value,
    pub optional: bool,
    pub caption: String,
    #[serde(rename = "type")]
    pub kind: ValueKind,
}

impl TokenDoc {
    /// Hand-assembled `serde_json::Value` rendering. Infallible: every field
    /// is already JSON-shaped.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("name".to_string(), Value::String(self.name.clone()));
        map.insert("value".to_string(), self.value.clone());
        map.insert("optional".to_string(), Value::Bool(self.optional));
        map.insert("caption".to_string(), Value::String(self.caption.clone()));
        map.insert(
            "type".to_string(),
            Value::String(self.kind.as_str().to_string()),
        );
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("hasPhone"), "has_phone");
        assert_eq!(snake_case("agToken"), "ag_token");
        assert_eq!(snake_case("already_snake"), "already_snake");
        assert_eq!(snake_case(""), "");
    }

    #[test]
    fn test_value_kind_is_structural() {
        assert_eq!(ValueKind::of(&Value::Null), ValueKind::Null);
        assert_eq!(ValueKind::of(&json!(false)), ValueKind::Boolean);
        assert_eq!(ValueKind::of(&json!(3.5)), ValueKind::Number);
        assert_eq!(ValueKind::of(&json!("x")), ValueKind::String);
        assert_eq!(ValueKind::of(&json!([])), ValueKind::Array);
        assert_eq!(ValueKind::of(&json!({})), ValueKind::Object);
    }

    #[test]
    fn test_doc_to_value_mirrors_serde_rendering() {
        let doc = TokenDoc {
            name: "id".to_string(),
            value: json!("43503050430523"),
            optional: false,
            caption: "Message id".to_string(),
            kind: ValueKind::String,
        };
        let via_serde = serde_json::to_value(&doc).expect("doc serializes");
        assert_eq!(doc.to_value(), via_serde);
    }
}
