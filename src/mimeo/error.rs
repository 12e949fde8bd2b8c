//! Error types for dictionary path addressing

use std::fmt;

/// Errors that can occur when addressing a dictionary tree by dotted path
#[derive(Debug, Clone, PartialEq)]
pub enum DictPathError {
    /// The path contained no segments
    EmptyPath,
    /// No entry with this name at the addressed depth
    UnknownName { segment: String, path: String },
    /// A leaf entry was addressed as if it had nested parts
    NotABranch { segment: String, path: String },
}

impl fmt::Display for DictPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictPathError::EmptyPath => write!(f, "Empty dictionary path"),
            DictPathError::UnknownName { segment, path } => {
                write!(f, "No entry named '{}' in path '{}'", segment, path)
            }
            DictPathError::NotABranch { segment, path } => {
                write!(f, "Entry '{}' in path '{}' has no nested parts", segment, path)
            }
        }
    }
}

impl std::error::Error for DictPathError {}
