//! # codeshine-syntax
//!
//! Tree-sitter based tokenization for codeshine.
//!
//! Engines turn source text into a normalized element tree (see [`tree`]):
//! highlighted regions become nested `span` elements carrying class names,
//! everything else stays as text leaves. Two engines are available; they share
//! the tree-sitter backend but differ in class vocabulary and in how languages
//! are registered.
//!
//! ## Example
//!
//! ```rust
//! use codeshine_syntax::{prism, Engine};
//!
//! let root = prism().tokenize("SELECT * FROM users;", "sql");
//! assert_eq!(root.text_content(), "SELECT * FROM users;");
//! ```

mod engine;
pub mod languages;
pub mod tree;
mod vocabulary;

pub use engine::{
    hljs, prism, Engine, EngineKind, RegisterError, Registration, TreeSitterEngine, UnknownEngine,
};
pub use languages::Language;
pub use tree::{AttributeValue, Element, Node, Primitive, Root};
pub use vocabulary::ClassVocabulary;
