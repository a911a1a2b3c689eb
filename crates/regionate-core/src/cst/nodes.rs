//! Type aliases for the C# CST nodes
//!
//! These types are Rowan's generic tree types parameterized with our
//! `CsLanguage`. They provide child/parent navigation, token iteration,
//! syntax kind querying, and lossless text reconstruction.

use super::CsLanguage;

/// A node in the C# concrete syntax tree
pub type CsSyntaxNode = rowan::SyntaxNode<CsLanguage>;

/// A token (leaf) in the C# concrete syntax tree
pub type CsSyntaxToken = rowan::SyntaxToken<CsLanguage>;

/// Either a node or a token
pub type CsSyntaxElement = rowan::SyntaxElement<CsLanguage>;
