//! Concrete Syntax Tree (CST) for the structural C# subset
//!
//! This module implements a lossless syntax tree using the Rowan library.
//! The CST preserves all source information including whitespace, comments,
//! and preprocessor directives, enabling:
//! - Byte-exact round-tripping: `parse(source).text() == source`
//! - Precise, minimally-invasive rewrites computed against stable offsets
//! - Region directives kept as real trivia tokens with their spans
//!
//! ## Architecture
//!
//! The CST uses Rowan's green/red tree pattern:
//!
//! - **Green Tree**: Immutable, position-independent storage holding the
//!   actual source text with trivia; cheap to clone (Arc internally).
//! - **Red Tree**: Dynamically constructed view with parent pointers,
//!   created on-demand for traversal.
//!
//! The parser only recognizes the structural subset of C# the engine needs
//! (types, members, their modifier runs and bodies); everything inside
//! method bodies, initializers, and enum bodies is consumed as raw balanced
//! token runs. Trivia between declarations stays attached to the enclosing
//! container node, so a declaration node's extent is exactly its token
//! span: first non-trivia token start to last non-trivia token end.

mod builder;
mod language;
mod lexer;
mod nodes;
mod parser;
mod syntax_kind;

pub mod ast;

pub use builder::CstBuilder;
pub use language::CsLanguage;
pub use lexer::{CstToken, LexerError, lex_with_trivia};
pub use nodes::{CsSyntaxElement, CsSyntaxNode, CsSyntaxToken};
pub use parser::parse_source;
pub use syntax_kind::CsSyntaxKind;

#[cfg(test)]
mod round_trip;
