//! Value resolver
//!
//! Reduces a value source plus an optional override/default source into one
//! concrete value, recursively. The resolver is total and synchronous: it
//! never raises, and malformed combinations pass through unresolved rather
//! than erroring. Cyclic token graphs are a caller error the resolver does
//! not detect; resolution of such a graph recurses until stack exhaustion.

use serde_json::Value;

use crate::mimeo::compose::{resolve_composite, Params};
use crate::mimeo::source::{SeqEntry, Source};

/// Emission mode for resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Plain resolved values.
    Value,
    /// Documentation projections in token positions.
    Raw,
}

/// Reduce `source` plus `fallback` to a concrete value.
///
/// Priority order:
/// 1. A composite at the current layer resolves with no override params; it
///    replaces any inherited shape outright.
/// 2. A composite inherited from a previous layer resolves with the current
///    layer's literal object (if any) as its override params.
/// 3. Otherwise the source resolves on its own and the fallback is applied:
///    a transformer always runs (with a `Null` input when nothing resolved
///    upstream), while generators and plain fallbacks fill in only when the
///    resolved value is null.
///
/// `0`, `false`, and `""` are present values and never trigger fallback.
pub fn resolve(source: Option<&Source>, fallback: Option<&Source>, mode: Mode) -> Value {
    if let Some(Source::Composite(composite)) = source {
        return resolve_composite(composite, None, mode);
    }

    if let Some(Source::Composite(composite)) = fallback {
        let params = literal_params(source);
        return resolve_composite(composite, params.as_ref(), mode);
    }

    let mut value = match source {
        Some(Source::Literal(value)) => value.clone(),
        Some(Source::Seq(entries)) => resolve_seq(entries, mode),
        Some(Source::Generator(produce)) => resolve(Some(&produce()), None, mode),
        Some(Source::Transformer(refine)) => resolve(Some(&refine(Value::Null)), None, mode),
        Some(Source::Composite(_)) | None => Value::Null,
    };

    match fallback {
        Some(Source::Transformer(refine)) => {
            value = resolve(Some(&refine(value)), None, mode);
        }
        Some(Source::Generator(produce)) if value.is_null() => {
            value = resolve(Some(&produce()), None, mode);
        }
        Some(Source::Literal(fallback_value)) if value.is_null() => {
            value = fallback_value.clone();
        }
        Some(Source::Seq(entries)) if value.is_null() => {
            value = resolve_seq(entries, mode);
        }
        _ => {}
    }

    value
}

/// The current layer's literal object, when an inherited composite consumes
/// it as override params.
fn literal_params(source: Option<&Source>) -> Option<Params> {
    match source {
        Some(Source::Literal(Value::Object(map))) => Some(map.clone()),
        _ => None,
    }
}

fn resolve_seq(entries: &[SeqEntry], mode: Mode) -> Value {
    let items = entries
        .iter()
        .map(|entry| match entry {
            SeqEntry::Value(value) => value.clone(),
            SeqEntry::Token(token) => match mode {
                Mode::Value => token.value(),
                Mode::Raw => token.describe().to_value(),
            },
        })
        .collect();
    Value::Array(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_source_resolves_to_null() {
        assert_eq!(resolve(None, None, Mode::Value), Value::Null);
    }

    #[test]
    fn test_generator_chains_resolve_recursively() {
        let source = Source::generator(|| Source::generator(|| "deep"));
        assert_eq!(resolve(Some(&source), None, Mode::Value), json!("deep"));
    }

    #[test]
    fn test_fallback_generator_fills_null_only() {
        let fallback = Source::generator(|| "default");

        let absent = Source::Literal(Value::Null);
        assert_eq!(
            resolve(Some(&absent), Some(&fallback), Mode::Value),
            json!("default")
        );

        let present = Source::literal(false);
        assert_eq!(
            resolve(Some(&present), Some(&fallback), Mode::Value),
            json!(false)
        );
    }

    #[test]
    fn test_fallback_transformer_always_runs() {
        let fallback = Source::transformer(|previous: Value| match previous.as_str() {
            Some(text) => Value::String(format!("{text}!")),
            None => Value::String("own".to_string()),
        });

        let present = Source::literal("hey");
        assert_eq!(
            resolve(Some(&present), Some(&fallback), Mode::Value),
            json!("hey!")
        );

        let absent = Source::Literal(Value::Null);
        assert_eq!(
            resolve(Some(&absent), Some(&fallback), Mode::Value),
            json!("own")
        );
    }

    #[test]
    fn test_fallback_literal_fills_null() {
        let fallback = Source::literal("filled");
        assert_eq!(
            resolve(None, Some(&fallback), Mode::Value),
            json!("filled")
        );
        assert_eq!(
            resolve(Some(&Source::literal(0i64)), Some(&fallback), Mode::Value),
            json!(0)
        );
    }
}
