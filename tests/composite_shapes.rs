//! Tests for composite token aggregation
//!
//! Ordered-list and param-driven composites, override-by-key, placeholder
//! slots, token sequences, and composite precedence across override layers.

use mimeo::mimeo::compose::Params;
use mimeo::mimeo::source::{SeqEntry, Source};
use mimeo::mimeo::testing::fixtures;
use mimeo::mimeo::token::Token;
use serde_json::{json, Value};

#[test]
fn test_ordered_list_round_trip() {
    let message = fixtures::message_token();

    assert_eq!(
        message.value(),
        json!({
            "id": "43503050430523",
            "flags": {"unread": false, "pinned": true},
        })
    );
}

#[test]
fn test_override_by_key_keeps_untouched_defaults() {
    let message = fixtures::message_token();
    let patched = message.derive(
        None,
        Some(Source::literal(json!({
            "id": "FAKE",
            "flags": {"unread": true},
        }))),
    );

    assert_eq!(
        patched.value(),
        json!({
            "id": "FAKE",
            "flags": {"unread": true, "pinned": true},
        })
    );

    // The established shape is untouched.
    assert_eq!(
        message.value(),
        json!({
            "id": "43503050430523",
            "flags": {"unread": false, "pinned": true},
        })
    );
}

#[test]
fn test_false_override_counts_as_present() {
    let message = fixtures::message_token();
    let patched = message.derive(
        None,
        Some(Source::literal(json!({
            "flags": {"pinned": false},
        }))),
    );

    assert_eq!(
        patched.value(),
        json!({
            "id": "43503050430523",
            "flags": {"unread": false, "pinned": false},
        })
    );
}

#[test]
fn test_null_override_falls_back_to_the_default() {
    let message = fixtures::message_token();
    let patched = message.derive(None, Some(Source::literal(json!({"id": null}))));

    assert_eq!(
        patched.value(),
        json!({
            "id": "43503050430523",
            "flags": {"unread": false, "pinned": true},
        })
    );
}

#[test]
fn test_param_driven_composite_configures_sub_tokens() {
    let oauth = Token::new("oauth", "OAuth enabled", Source::generator(|| false));
    let has_phone = Token::new("hasPhone", "Has phone", Source::generator(|| false));

    let flags = Token::new(
        "flags",
        "Account flags",
        Source::composite_with(move |params: &Params| {
            let all = params.get("all").and_then(Value::as_bool).unwrap_or(false);
            vec![
                oauth.derive(None, Some(all.into())),
                has_phone.derive(None, Some(all.into())),
            ]
        }),
    );

    assert_eq!(flags.value(), json!({"oauth": false, "hasPhone": false}));
    assert_eq!(
        flags
            .derive(None, Some(Source::literal(json!({"all": true}))))
            .value(),
        json!({"oauth": true, "hasPhone": true})
    );
}

#[test]
fn test_param_driven_composite_selects_sub_tokens() {
    let full = Token::new("full", "Full payload marker", Source::generator(|| "full"));
    let brief = Token::new("brief", "Brief payload marker", Source::generator(|| "brief"));

    let payload = Token::new(
        "payload",
        "Payload",
        Source::composite_with(move |params: &Params| {
            let all = params.get("all").and_then(Value::as_bool).unwrap_or(false);
            if all {
                vec![full.clone()]
            } else {
                vec![brief.clone()]
            }
        }),
    );

    assert_eq!(
        payload
            .derive(None, Some(Source::literal(json!({"all": false}))))
            .value(),
        json!({"brief": "brief"})
    );
    assert_eq!(
        payload
            .derive(None, Some(Source::literal(json!({"all": true}))))
            .value(),
        json!({"full": "full"})
    );
}

#[test]
fn test_sparse_list_drops_placeholder_slots() {
    let id = Token::new("id", "Identifier", "i-1");
    let flag = Token::new("flag", "Flag", true);
    let include_flag = false;

    let shape = Token::new(
        "shape",
        "Conditional shape",
        Source::sparse_list([Some(id), include_flag.then_some(flag)]),
    );

    assert_eq!(shape.value(), json!({"id": "i-1"}));
}

#[test]
fn test_sequences_resolve_embedded_tokens() {
    let thread = fixtures::thread_token();

    assert_eq!(
        thread.value(),
        json!({
            "id": "0:1234:5",
            "messages": [
                {"id": "43503050430523", "flags": {"unread": false, "pinned": true}},
            ],
        })
    );
}

#[test]
fn test_sequences_pass_plain_entries_through() {
    let mixed = Token::new(
        "items",
        "Items",
        Source::seq([
            SeqEntry::Value(json!(1)),
            SeqEntry::Token(Token::new("id", "Identifier", "i-2")),
            SeqEntry::Value(json!("x")),
        ]),
    );

    assert_eq!(mixed.value(), json!([1, "i-2", "x"]));
}

#[test]
fn test_current_layer_composite_replaces_the_inherited_shape() {
    let original = Token::new("box", "Box", Source::list([Token::new("a", "A", 1i64)]));
    let replaced = original.derive(None, Some(Source::list([Token::new("b", "B", 2i64)])));

    assert_eq!(replaced.value(), json!({"b": 2}));
    assert_eq!(original.value(), json!({"a": 1}));
}
