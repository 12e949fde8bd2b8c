//! Token factory
//!
//! A token is an immutable, derivable, self-describing named value
//! descriptor. Deriving never mutates: every override allocates a new token
//! sharing the same key, with the parent's effective source carried forward
//! as the new token's override/default source. The published token stays
//! callable and unaffected by its derivations.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::mimeo::doc::{snake_case, TokenDoc, ValueKind};
use crate::mimeo::resolve::{resolve, Mode};
use crate::mimeo::source::Source;

/// Immutable named value descriptor.
#[derive(Clone)]
pub struct Token {
    inner: Rc<Inner>,
}

/// One configuration record of the override chain.
struct Inner {
    key: String,
    param: Option<String>,
    caption: String,
    optional: bool,
    source: Option<Source>,
    fallback: Option<Source>,
    last: RefCell<Option<Value>>,
}

impl Token {
    /// Create a root token from a key, a caption, and a value source.
    pub fn new(
        key: impl Into<String>,
        caption: impl Into<String>,
        source: impl Into<Source>,
    ) -> Self {
        Token {
            inner: Rc::new(Inner {
                key: key.into(),
                param: None,
                caption: caption.into(),
                optional: false,
                source: Some(source.into()),
                fallback: None,
                last: RefCell::new(None),
            }),
        }
    }

    fn next(
        &self,
        caption: Option<&str>,
        value: Option<Source>,
        param: Option<String>,
        optional: bool,
    ) -> Token {
        let caption = match caption {
            Some(caption) if !caption.is_empty() => caption.to_string(),
            _ => self.inner.caption.clone(),
        };
        Token {
            inner: Rc::new(Inner {
                key: self.inner.key.clone(),
                param: param.or_else(|| self.inner.param.clone()),
                caption,
                optional,
                source: value,
                fallback: self.effective_source().cloned(),
                last: RefCell::new(None),
            }),
        }
    }

    /// Derive an override layer: a new token with the same key. An absent or
    /// empty caption keeps the prior caption; the given value becomes the
    /// new source while this token's effective source becomes the new
    /// token's fallback. Chains indefinitely.
    pub fn derive(&self, caption: Option<&str>, value: Option<Source>) -> Token {
        self.next(caption, value, None, self.inner.optional)
    }

    /// Derivation replacing only the caption.
    pub fn with_caption(&self, caption: &str) -> Token {
        self.derive(Some(caption), None)
    }

    /// Derivation replacing only the value source.
    pub fn with_value(&self, value: impl Into<Source>) -> Token {
        self.derive(None, Some(value.into()))
    }

    /// Like `derive`, but also renames the emitted field name. The key stays
    /// unchanged; only projections and raw-mode aggregates see the new name.
    pub fn renamed(&self, name: &str, caption: Option<&str>, value: Option<Source>) -> Token {
        self.next(caption, value, Some(name.to_string()), self.inner.optional)
    }

    /// Like `derive`, but marks the token optional. The flag is sticky
    /// across plain derivations; `required` clears it.
    pub fn optional(&self, caption: Option<&str>, value: Option<Source>) -> Token {
        self.next(caption, value, None, true)
    }

    /// Clears the sticky optional flag.
    pub fn required(&self) -> Token {
        self.next(None, None, None, false)
    }

    /// The immutable identifier, set at creation.
    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// Snake-cased emission name: the rename target if one was set, else
    /// the key.
    pub fn name(&self) -> String {
        snake_case(self.inner.param.as_deref().unwrap_or(&self.inner.key))
    }

    /// Resolved caption: explicit at this layer, else the nearest
    /// ancestor's.
    pub fn caption(&self) -> &str {
        &self.inner.caption
    }

    pub fn is_optional(&self) -> bool {
        self.inner.optional
    }

    fn effective_source(&self) -> Option<&Source> {
        self.inner.source.as_ref().or(self.inner.fallback.as_ref())
    }

    fn compute(&self, mode: Mode) -> Value {
        let value = resolve(self.inner.source.as_ref(), self.inner.fallback.as_ref(), mode);
        *self.inner.last.borrow_mut() = Some(value.clone());
        value
    }

    /// Resolve the token's concrete value. Always recomputed; the cache is
    /// advisory and only read back through `last_value`.
    pub fn value(&self) -> Value {
        self.compute(Mode::Value)
    }

    /// The most recently computed value, without recomputation. `None` if
    /// neither `value` nor `describe` ran yet.
    pub fn last_value(&self) -> Option<Value> {
        self.inner.last.borrow().clone()
    }

    /// Documentation projection: raw-mode value, snake-cased name, caption,
    /// optional flag, and the structurally derived value kind.
    pub fn describe(&self) -> TokenDoc {
        let value = self.compute(Mode::Raw);
        TokenDoc {
            name: self.name(),
            kind: ValueKind::of(&value),
            value,
            optional: self.inner.optional,
            caption: self.inner.caption.clone(),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("key", &self.inner.key)
            .field("caption", &self.inner.caption)
            .field("optional", &self.inner.optional)
            .finish_non_exhaustive()
    }
}
