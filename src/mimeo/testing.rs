//! Test support: fluent projection assertions and sample fixtures
//!
//! `assert_doc` builds readable assertions over a documentation projection,
//! descending into nested projections with closures. The `fixtures` module
//! provides deterministic sample tokens shared across the integration
//! tests, so tests can assert exact values.

use serde_json::Value;

use crate::mimeo::doc::{TokenDoc, ValueKind};

/// Entry point for fluent assertions over a documentation projection.
pub fn assert_doc(doc: &TokenDoc) -> DocAssert {
    DocAssert {
        projection: doc.to_value(),
        context: doc.name.clone(),
    }
}

/// Fluent assertion builder over a projection object.
pub struct DocAssert {
    projection: Value,
    context: String,
}

impl DocAssert {
    fn str_field(&self, key: &str) -> &str {
        self.projection
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_else(|| {
                panic!("projection '{}' has no string field '{}'", self.context, key)
            })
    }

    pub fn name(self, expected: &str) -> Self {
        assert_eq!(self.str_field("name"), expected, "name of '{}'", self.context);
        self
    }

    pub fn caption(self, expected: &str) -> Self {
        assert_eq!(
            self.str_field("caption"),
            expected,
            "caption of '{}'",
            self.context
        );
        self
    }

    pub fn kind(self, expected: ValueKind) -> Self {
        assert_eq!(
            self.str_field("type"),
            expected.as_str(),
            "kind of '{}'",
            self.context
        );
        self
    }

    pub fn optional(self, expected: bool) -> Self {
        let actual = self
            .projection
            .get("optional")
            .and_then(Value::as_bool)
            .unwrap_or_else(|| {
                panic!("projection '{}' has no optional flag", self.context)
            });
        assert_eq!(actual, expected, "optional flag of '{}'", self.context);
        self
    }

    pub fn value(self, expected: impl Into<Value>) -> Self {
        let expected = expected.into();
        assert_eq!(
            self.projection.get("value"),
            Some(&expected),
            "value of '{}'",
            self.context
        );
        self
    }

    /// Descend into one nested projection inside a raw-mode aggregate
    /// value. `name` is the snake-cased emission name keying the aggregate.
    pub fn field(self, name: &str, check: impl FnOnce(DocAssert)) -> Self {
        let nested = self
            .projection
            .get("value")
            .and_then(|value| value.get(name))
            .unwrap_or_else(|| {
                panic!("projection '{}' has no nested field '{}'", self.context, name)
            })
            .clone();
        check(DocAssert {
            projection: nested,
            context: format!("{}.{}", self.context, name),
        });
        self
    }
}

/// Deterministic sample tokens mirroring the shapes real payload catalogues
/// ship as configuration data.
pub mod fixtures {
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::mimeo::source::{SeqEntry, Source};
    use crate::mimeo::token::Token;

    /// Sequential autogen identifier: "AG_1", "AG_2", ...
    pub fn autogen_token() -> Token {
        let counter = Rc::new(Cell::new(0u64));
        Token::new(
            "agToken",
            "Autogenerated token",
            Source::generator(move || {
                counter.set(counter.get() + 1);
                format!("AG_{}", counter.get())
            }),
        )
    }

    /// Monotonic counter, starting at 1 on first resolution.
    pub fn counter_token() -> Token {
        let counter = Rc::new(Cell::new(0i64));
        Token::new(
            "counter",
            "Counter",
            Source::generator(move || {
                counter.set(counter.get() + 1);
                counter.get()
            }),
        )
    }

    /// Fixed message shape: id plus unread/pinned flags.
    pub fn message_token() -> Token {
        Token::new(
            "message",
            "Message",
            Source::list([
                Token::new("id", "Message id", Source::generator(|| "43503050430523")),
                Token::new(
                    "flags",
                    "Message flags",
                    Source::list([
                        Token::new("unread", "Read state", Source::generator(|| false)),
                        Token::new("pinned", "Pinned state", Source::generator(|| true)),
                    ]),
                ),
            ]),
        )
    }

    /// Nested thread shape: id plus a message sequence.
    pub fn thread_token() -> Token {
        Token::new(
            "thread",
            "Thread",
            Source::list([
                Token::new("id", "Thread id", Source::generator(|| "0:1234:5")),
                Token::new(
                    "messages",
                    "Message list",
                    Source::seq([SeqEntry::Token(message_token())]),
                ),
            ]),
        )
    }
}
