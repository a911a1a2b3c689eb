//! Green tree builder wrapper
//!
//! Thin wrapper over Rowan's `GreenNodeBuilder` that accepts our typed
//! syntax kinds and produces a red tree root.

use rowan::{Checkpoint, GreenNodeBuilder};

use super::{CsLanguage, CsSyntaxKind, CsSyntaxNode};

/// Builder for the C# CST
///
/// Nodes are opened with `start_node` / `start_node_at` and closed with
/// `finish_node`; tokens carry their exact source text so the finished
/// tree reproduces the input byte-for-byte.
pub struct CstBuilder {
    inner: GreenNodeBuilder<'static>,
}

impl CstBuilder {
    pub fn new() -> Self {
        Self {
            inner: GreenNodeBuilder::new(),
        }
    }

    /// Open a new node of the given kind
    pub fn start_node(&mut self, kind: CsSyntaxKind) {
        self.inner
            .start_node(<CsLanguage as rowan::Language>::kind_to_raw(kind));
    }

    /// Record a checkpoint; a node started at it later will wrap
    /// everything added since
    pub fn checkpoint(&self) -> Checkpoint {
        self.inner.checkpoint()
    }

    /// Open a node retroactively at a previously recorded checkpoint
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: CsSyntaxKind) {
        self.inner
            .start_node_at(checkpoint, <CsLanguage as rowan::Language>::kind_to_raw(kind));
    }

    /// Close the most recently opened node
    pub fn finish_node(&mut self) {
        self.inner.finish_node();
    }

    /// Add a token with its exact source text
    pub fn token(&mut self, kind: CsSyntaxKind, text: &str) {
        self.inner
            .token(<CsLanguage as rowan::Language>::kind_to_raw(kind), text);
    }

    /// Finish building and return the red tree root
    pub fn finish(self) -> CsSyntaxNode {
        CsSyntaxNode::new_root(self.inner.finish())
    }
}

impl Default for CstBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_roundtrip() {
        let mut builder = CstBuilder::new();
        builder.start_node(CsSyntaxKind::SourceFile);
        builder.token(CsSyntaxKind::ClassKw, "class");
        builder.token(CsSyntaxKind::Whitespace, " ");
        builder.token(CsSyntaxKind::Ident, "Foo");
        builder.finish_node();

        let root = builder.finish();
        assert_eq!(root.kind(), CsSyntaxKind::SourceFile);
        assert_eq!(root.text().to_string(), "class Foo");
    }

    #[test]
    fn test_checkpoint_wraps_retroactively() {
        let mut builder = CstBuilder::new();
        builder.start_node(CsSyntaxKind::SourceFile);
        let cp = builder.checkpoint();
        builder.token(CsSyntaxKind::PublicKw, "public");
        builder.token(CsSyntaxKind::Whitespace, " ");
        builder.token(CsSyntaxKind::ClassKw, "class");
        builder.start_node_at(cp, CsSyntaxKind::ClassDecl);
        builder.finish_node();
        builder.finish_node();

        let root = builder.finish();
        let decl = root.first_child().unwrap();
        assert_eq!(decl.kind(), CsSyntaxKind::ClassDecl);
        assert_eq!(decl.text().to_string(), "public class");
    }
}
