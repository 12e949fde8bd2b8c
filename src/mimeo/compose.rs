//! Composite engine: keyed aggregates of sub-tokens
//!
//! A composite is a value source that expands into a keyed object built from
//! sub-tokens. It has exactly one mode, fixed at construction: an ordered
//! list of tokens applied as-is, or a param-driven factory that decides
//! which sub-tokens to include for each resolution.

use std::fmt;
use std::rc::Rc;

use serde_json::{Map, Value};

use crate::mimeo::resolve::Mode;
use crate::mimeo::source::Source;
use crate::mimeo::token::Token;

/// Caller-supplied per-field overrides for a composite resolution.
pub type Params = Map<String, Value>;

/// A value source expanding into a keyed aggregate of sub-tokens.
#[derive(Clone)]
pub enum Composite {
    /// Ordered-list mode: a fixed list of sub-tokens.
    Fixed(Vec<Token>),
    /// Param-driven mode: the factory returns the sub-tokens to include,
    /// already fully configured for this resolution.
    Param(Rc<dyn Fn(&Params) -> Vec<Token>>),
}

impl Composite {
    pub fn fixed(tokens: impl IntoIterator<Item = Token>) -> Self {
        Composite::Fixed(tokens.into_iter().collect())
    }

    /// Ordered-list mode with placeholder slots; `None` entries are dropped
    /// silently.
    pub fn sparse(entries: impl IntoIterator<Item = Option<Token>>) -> Self {
        Composite::Fixed(entries.into_iter().flatten().collect())
    }

    pub fn param<F>(factory: F) -> Self
    where
        F: Fn(&Params) -> Vec<Token> + 'static,
    {
        Composite::Param(Rc::new(factory))
    }
}

impl fmt::Debug for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Composite::Fixed(tokens) => f.debug_tuple("Fixed").field(tokens).finish(),
            Composite::Param(_) => f.write_str("Param(..)"),
        }
    }
}

/// Resolve a composite into its keyed aggregate.
///
/// In fixed mode, a present, non-null params entry re-derives the matching
/// sub-token with that value as its new literal source before resolving;
/// `false`, `0`, and `""` count as present overrides. In param mode the
/// factory receives the params map (empty when the caller supplied none)
/// and its returned sub-tokens resolve as-is.
///
/// Raw-mode aggregates are keyed by snake-cased emission names and hold
/// projections; value-mode aggregates preserve original key casing.
pub fn resolve_composite(composite: &Composite, params: Option<&Params>, mode: Mode) -> Value {
    let tokens: Vec<Token> = match composite {
        Composite::Fixed(tokens) => tokens.clone(),
        Composite::Param(factory) => {
            let empty = Params::new();
            factory(params.unwrap_or(&empty))
        }
    };

    let apply_overrides = matches!(composite, Composite::Fixed(_));
    let mut result = Map::new();

    for token in tokens {
        let override_value = if apply_overrides {
            params
                .and_then(|p| p.get(token.key()))
                .filter(|v| !v.is_null())
                .cloned()
        } else {
            None
        };

        let token = match override_value {
            Some(value) => token.derive(None, Some(Source::Literal(value))),
            None => token,
        };

        match mode {
            Mode::Raw => {
                result.insert(token.name(), token.describe().to_value());
            }
            Mode::Value => {
                result.insert(token.key().to_string(), token.value());
            }
        }
    }

    Value::Object(result)
}
