//! Main module for mimeo library functionality

pub mod compose;
pub mod dict;
pub mod doc;
pub mod error;
pub mod formats;
pub mod resolve;
pub mod source;
pub mod testing;
pub mod token;

// Re-export commonly used types at module root
pub use compose::{Composite, Params};
pub use dict::{create_dict, Dict, DictEntry, DictNode};
pub use doc::{snake_case, TokenDoc, ValueKind};
pub use error::DictPathError;
pub use resolve::Mode;
pub use source::{SeqEntry, Source};
pub use token::Token;
