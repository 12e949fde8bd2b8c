//! Dictionary builder: nested literal maps into trees of tokens
//!
//! A thin adapter over the token factory and the composite engine. A leaf
//! `(caption, source)` pair becomes a plain token; a branch pair becomes a
//! token whose source is an ordered-list composite over the sub-entries,
//! with a part table for addressing nested tokens directly without
//! resolving the parent. This layer has no resolution logic of its own.

use std::collections::HashMap;

use crate::mimeo::error::DictPathError;
use crate::mimeo::source::Source;
use crate::mimeo::token::Token;

/// One `[caption, value-or-submap]` pair from the literal input shape.
#[derive(Debug, Clone)]
pub struct DictEntry {
    caption: String,
    shape: DictShape,
}

#[derive(Debug, Clone)]
enum DictShape {
    Value(Source),
    Map(Vec<(String, DictEntry)>),
}

impl DictEntry {
    /// Leaf pair: caption plus value source.
    pub fn value(caption: impl Into<String>, source: impl Into<Source>) -> Self {
        DictEntry {
            caption: caption.into(),
            shape: DictShape::Value(source.into()),
        }
    }

    /// Branch pair: caption plus nested entries.
    pub fn map(caption: impl Into<String>, entries: Vec<(String, DictEntry)>) -> Self {
        DictEntry {
            caption: caption.into(),
            shape: DictShape::Map(entries),
        }
    }
}

/// A dictionary tree of addressable tokens.
#[derive(Debug, Clone)]
pub struct Dict {
    nodes: HashMap<String, DictNode>,
}

/// One named node: its token plus the part table of nested nodes.
#[derive(Debug, Clone)]
pub struct DictNode {
    token: Token,
    parts: HashMap<String, DictNode>,
}

impl DictNode {
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Direct access to a nested entry without resolving this node.
    pub fn part(&self, name: &str) -> Option<&DictNode> {
        self.parts.get(name)
    }

    pub fn has_parts(&self) -> bool {
        !self.parts.is_empty()
    }
}

/// Convert a nested literal map into a tree of tokens.
pub fn create_dict(entries: Vec<(String, DictEntry)>) -> Dict {
    let mut nodes = HashMap::new();
    for (name, entry) in entries {
        let node = build_node(&name, entry);
        nodes.insert(name, node);
    }
    Dict { nodes }
}

fn build_node(name: &str, entry: DictEntry) -> DictNode {
    match entry.shape {
        DictShape::Value(source) => DictNode {
            token: Token::new(name, entry.caption, source),
            parts: HashMap::new(),
        },
        DictShape::Map(children) => {
            let mut parts = HashMap::new();
            let mut sub_tokens = Vec::new();
            for (child_name, child_entry) in children {
                let child = build_node(&child_name, child_entry);
                sub_tokens.push(child.token.clone());
                parts.insert(child_name, child);
            }
            DictNode {
                token: Token::new(name, entry.caption, Source::list(sub_tokens)),
                parts,
            }
        }
    }
}

impl Dict {
    pub fn get(&self, name: &str) -> Option<&DictNode> {
        self.nodes.get(name)
    }

    /// Address a node by dotted path through the part tables.
    pub fn at(&self, path: &str) -> Result<&DictNode, DictPathError> {
        let mut segments = path.split('.').filter(|segment| !segment.is_empty());
        let first = segments.next().ok_or(DictPathError::EmptyPath)?;
        let mut node = self
            .nodes
            .get(first)
            .ok_or_else(|| DictPathError::UnknownName {
                segment: first.to_string(),
                path: path.to_string(),
            })?;

        for segment in segments {
            if !node.has_parts() {
                return Err(DictPathError::NotABranch {
                    segment: segment.to_string(),
                    path: path.to_string(),
                });
            }
            node = node
                .part(segment)
                .ok_or_else(|| DictPathError::UnknownName {
                    segment: segment.to_string(),
                    path: path.to_string(),
                })?;
        }

        Ok(node)
    }
}
