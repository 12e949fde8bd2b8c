//! Value-source variants for tokens
//!
//! A token's value is produced by a `Source`. The variant is chosen by the
//! caller at construction time: a concrete literal, an ordered sequence, a
//! nullary generator, a transformer refining an upstream value, or a
//! composite expanding into a keyed aggregate of sub-tokens. Generator vs.
//! transformer is part of the declared signature, never inferred from the
//! closure itself.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::mimeo::compose::{Composite, Params};
use crate::mimeo::token::Token;

/// Nullary value producer. May return any further source, so generated
/// values can themselves be generators, sequences, or composites.
pub type GeneratorFn = Rc<dyn Fn() -> Source>;

/// Refinement of a previously-resolved value. Receives `Value::Null` when
/// nothing resolved upstream.
pub type TransformerFn = Rc<dyn Fn(Value) -> Source>;

/// The value-producing rule carried by a token.
#[derive(Clone)]
pub enum Source {
    /// A concrete value.
    Literal(Value),
    /// An ordered sequence whose entries are plain values or embedded tokens.
    Seq(Vec<SeqEntry>),
    /// A nullary producer, invoked on every resolution.
    Generator(GeneratorFn),
    /// A refinement of the previously-resolved value.
    Transformer(TransformerFn),
    /// A keyed aggregate of sub-tokens.
    Composite(Composite),
}

impl Source {
    pub fn literal(value: impl Into<Value>) -> Self {
        Source::Literal(value.into())
    }

    pub fn seq(entries: impl IntoIterator<Item = SeqEntry>) -> Self {
        Source::Seq(entries.into_iter().collect())
    }

    pub fn generator<S, F>(produce: F) -> Self
    where
        S: Into<Source>,
        F: Fn() -> S + 'static,
    {
        Source::Generator(Rc::new(move || produce().into()))
    }

    pub fn transformer<S, F>(refine: F) -> Self
    where
        S: Into<Source>,
        F: Fn(Value) -> S + 'static,
    {
        Source::Transformer(Rc::new(move |value| refine(value).into()))
    }

    /// Ordered-list composite over a fixed set of sub-tokens.
    pub fn list(tokens: impl IntoIterator<Item = Token>) -> Self {
        Source::Composite(Composite::fixed(tokens))
    }

    /// Ordered-list composite with placeholder slots; absent entries are
    /// dropped silently.
    pub fn sparse_list(entries: impl IntoIterator<Item = Option<Token>>) -> Self {
        Source::Composite(Composite::sparse(entries))
    }

    /// Param-driven composite: the factory decides which sub-tokens to
    /// include for each resolution, given the caller-supplied overrides.
    pub fn composite_with<F>(factory: F) -> Self
    where
        F: Fn(&Params) -> Vec<Token> + 'static,
    {
        Source::Composite(Composite::param(factory))
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Source::Seq(entries) => f.debug_tuple("Seq").field(entries).finish(),
            Source::Generator(_) => f.write_str("Generator(..)"),
            Source::Transformer(_) => f.write_str("Transformer(..)"),
            Source::Composite(composite) => f.debug_tuple("Composite").field(composite).finish(),
        }
    }
}

impl From<Value> for Source {
    fn from(value: Value) -> Self {
        Source::Literal(value)
    }
}

impl From<&str> for Source {
    fn from(value: &str) -> Self {
        Source::Literal(Value::from(value))
    }
}

impl From<String> for Source {
    fn from(value: String) -> Self {
        Source::Literal(Value::from(value))
    }
}

impl From<bool> for Source {
    fn from(value: bool) -> Self {
        Source::Literal(Value::from(value))
    }
}

impl From<i32> for Source {
    fn from(value: i32) -> Self {
        Source::Literal(Value::from(value))
    }
}

impl From<i64> for Source {
    fn from(value: i64) -> Self {
        Source::Literal(Value::from(value))
    }
}

impl From<u64> for Source {
    fn from(value: u64) -> Self {
        Source::Literal(Value::from(value))
    }
}

impl From<f64> for Source {
    fn from(value: f64) -> Self {
        Source::Literal(Value::from(value))
    }
}

/// One entry of an ordered sequence.
#[derive(Debug, Clone)]
pub enum SeqEntry {
    /// A plain value, passed through unchanged.
    Value(Value),
    /// An embedded token, replaced by its resolved value or its projection
    /// depending on the emission mode.
    Token(Token),
}

impl From<Token> for SeqEntry {
    fn from(token: Token) -> Self {
        SeqEntry::Token(token)
    }
}

impl From<Value> for SeqEntry {
    fn from(value: Value) -> Self {
        SeqEntry::Value(value)
    }
}
