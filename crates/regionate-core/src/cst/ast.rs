//! Typed AST layer over the CST
//!
//! This module provides ergonomic, type-safe wrappers over the raw CST
//! nodes. Each wrapper implements a `cast()` method to safely convert from
//! CST nodes. Spans reported here are token extents: a declaration's span
//! runs from its first non-trivia token to its last, excluding attached
//! comments and blank lines (which stay at container level in the tree).

use std::ops::Range;

use super::{CsSyntaxKind, CsSyntaxNode, CsSyntaxToken};

/// Helper trait for casting CST nodes to typed wrappers
pub trait AstNode: Sized {
    fn can_cast(kind: CsSyntaxKind) -> bool;
    fn cast(node: CsSyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &CsSyntaxNode;

    /// Byte span of this node in the source text
    fn span(&self) -> Range<usize> {
        let range = self.syntax().text_range();
        range.start().into()..range.end().into()
    }
}

/// The four type declaration kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
}

impl TypeKind {
    /// Capitalized category used in region names
    pub fn category(self) -> &'static str {
        match self {
            TypeKind::Class => "Class",
            TypeKind::Struct => "Struct",
            TypeKind::Interface => "Interface",
            TypeKind::Enum => "Enum",
        }
    }
}

/// The member declaration kinds, plus `Unknown` for constructs the
/// eight-kind model does not cover (operators, indexers, finalizers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Constructor,
    Method,
    Field,
    Constant,
    Property,
    Delegate,
    Event,
    Unknown,
}

/// Visibility modifiers present on a declaration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub public: bool,
    pub private: bool,
    pub protected: bool,
    pub internal: bool,
}

impl Modifiers {
    pub fn visibility_count(&self) -> usize {
        [self.public, self.private, self.protected, self.internal]
            .iter()
            .filter(|&&b| b)
            .count()
    }
}

// ============================================================================
// SourceFile
// ============================================================================

/// Root node covering one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    syntax: CsSyntaxNode,
}

impl AstNode for SourceFile {
    fn can_cast(kind: CsSyntaxKind) -> bool {
        kind == CsSyntaxKind::SourceFile
    }

    fn cast(node: CsSyntaxNode) -> Option<Self> {
        Self::can_cast(node.kind()).then_some(Self { syntax: node })
    }

    fn syntax(&self) -> &CsSyntaxNode {
        &self.syntax
    }
}

impl SourceFile {
    /// All type declarations at any nesting level, in source order
    pub fn all_types(&self) -> Vec<TypeDecl> {
        self.syntax
            .descendants()
            .filter_map(TypeDecl::cast)
            .collect()
    }
}

// ============================================================================
// TypeDecl
// ============================================================================

/// A class, struct, interface, or enum declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    syntax: CsSyntaxNode,
}

impl AstNode for TypeDecl {
    fn can_cast(kind: CsSyntaxKind) -> bool {
        kind.is_type_decl()
    }

    fn cast(node: CsSyntaxNode) -> Option<Self> {
        Self::can_cast(node.kind()).then_some(Self { syntax: node })
    }

    fn syntax(&self) -> &CsSyntaxNode {
        &self.syntax
    }
}

impl TypeDecl {
    pub fn kind(&self) -> TypeKind {
        match self.syntax.kind() {
            CsSyntaxKind::ClassDecl => TypeKind::Class,
            CsSyntaxKind::StructDecl => TypeKind::Struct,
            CsSyntaxKind::InterfaceDecl => TypeKind::Interface,
            _ => TypeKind::Enum,
        }
    }

    /// The declared identifier (token right after the type keyword)
    pub fn identifier(&self) -> Option<String> {
        let mut saw_keyword = false;
        for token in direct_tokens(&self.syntax) {
            if saw_keyword {
                if token.kind() == CsSyntaxKind::Ident {
                    return Some(token.text().to_string());
                }
                if !token.kind().is_trivia() {
                    return None;
                }
            } else if matches!(
                token.kind(),
                CsSyntaxKind::ClassKw
                    | CsSyntaxKind::StructKw
                    | CsSyntaxKind::InterfaceKw
                    | CsSyntaxKind::EnumKw
            ) {
                saw_keyword = true;
            }
        }
        None
    }

    /// Body node (brace-delimited), if the declaration has one
    pub fn body(&self) -> Option<CsSyntaxNode> {
        self.syntax
            .children()
            .find(|n| matches!(n.kind(), CsSyntaxKind::TypeBody | CsSyntaxKind::EnumBody))
    }

    /// Byte span of the body including both braces
    pub fn body_span(&self) -> Option<Range<usize>> {
        self.body().map(|body| {
            let range = body.text_range();
            range.start().into()..range.end().into()
        })
    }

    /// Direct member declarations (nested type declarations excluded;
    /// they are validated independently)
    pub fn members(&self) -> Vec<MemberDecl> {
        match self.body() {
            Some(body) => body.children().filter_map(MemberDecl::cast).collect(),
            None => Vec::new(),
        }
    }

    /// Direct nested type declarations
    pub fn nested_types(&self) -> Vec<TypeDecl> {
        match self.body() {
            Some(body) => body.children().filter_map(TypeDecl::cast).collect(),
            None => Vec::new(),
        }
    }

    /// Whether this type kind has validatable members (enum bodies are
    /// opaque; variants are never members)
    pub fn has_member_body(&self) -> bool {
        self.kind() != TypeKind::Enum && self.body().is_some()
    }
}

// ============================================================================
// MemberDecl
// ============================================================================

/// A member declaration inside a type body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDecl {
    syntax: CsSyntaxNode,
}

impl AstNode for MemberDecl {
    fn can_cast(kind: CsSyntaxKind) -> bool {
        kind.is_member_decl()
    }

    fn cast(node: CsSyntaxNode) -> Option<Self> {
        Self::can_cast(node.kind()).then_some(Self { syntax: node })
    }

    fn syntax(&self) -> &CsSyntaxNode {
        &self.syntax
    }
}

impl MemberDecl {
    pub fn kind(&self) -> MemberKind {
        match self.syntax.kind() {
            CsSyntaxKind::ConstructorDecl => MemberKind::Constructor,
            CsSyntaxKind::MethodDecl => MemberKind::Method,
            CsSyntaxKind::FieldDecl => MemberKind::Field,
            CsSyntaxKind::ConstantDecl => MemberKind::Constant,
            CsSyntaxKind::PropertyDecl => MemberKind::Property,
            CsSyntaxKind::DelegateDecl => MemberKind::Delegate,
            CsSyntaxKind::EventDecl => MemberKind::Event,
            _ => MemberKind::Unknown,
        }
    }

    /// Visibility modifiers from the declaration's modifier run
    ///
    /// Only tokens before the first signature-ending token count, so
    /// keywords inside bodies and initializers never register.
    pub fn modifiers(&self) -> Modifiers {
        let mut modifiers = Modifiers::default();
        for token in direct_tokens(&self.syntax) {
            match token.kind() {
                CsSyntaxKind::PublicKw => modifiers.public = true,
                CsSyntaxKind::PrivateKw => modifiers.private = true,
                CsSyntaxKind::ProtectedKw => modifiers.protected = true,
                CsSyntaxKind::InternalKw => modifiers.internal = true,
                CsSyntaxKind::LParen
                | CsSyntaxKind::LBrace
                | CsSyntaxKind::FatArrow
                | CsSyntaxKind::Equals
                | CsSyntaxKind::Semicolon => break,
                _ => {}
            }
        }
        modifiers
    }

    /// Best-effort declared name for diagnostics
    pub fn name(&self) -> Option<String> {
        let stop_kinds: &[CsSyntaxKind] = match self.kind() {
            MemberKind::Constructor | MemberKind::Method | MemberKind::Delegate => {
                &[CsSyntaxKind::LParen]
            }
            MemberKind::Property => &[CsSyntaxKind::LBrace, CsSyntaxKind::FatArrow],
            _ => &[
                CsSyntaxKind::Equals,
                CsSyntaxKind::Semicolon,
                CsSyntaxKind::Comma,
                CsSyntaxKind::LBrace,
            ],
        };

        let mut last_ident = None;
        let mut angle_depth = 0usize;
        for token in direct_tokens(&self.syntax) {
            match token.kind() {
                CsSyntaxKind::Lt => angle_depth += 1,
                CsSyntaxKind::Gt => angle_depth = angle_depth.saturating_sub(1),
                CsSyntaxKind::Ident if angle_depth == 0 => {
                    last_ident = Some(token.text().to_string());
                }
                kind if stop_kinds.contains(&kind) && angle_depth == 0 => break,
                _ => {}
            }
        }
        last_ident
    }
}

/// Direct child tokens of a node (does not descend into child nodes)
fn direct_tokens(node: &CsSyntaxNode) -> impl Iterator<Item = CsSyntaxToken> + '_ {
    node.children_with_tokens().filter_map(|e| e.into_token())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::parse_source;

    fn file(source: &str) -> SourceFile {
        let (root, _) = parse_source(source);
        SourceFile::cast(root).unwrap()
    }

    #[test]
    fn test_type_identifier_and_kind() {
        let file = file("public sealed class Widget<T> : Base\n{\n}\n");
        let types = file.all_types();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].kind(), TypeKind::Class);
        assert_eq!(types[0].identifier().as_deref(), Some("Widget"));
    }

    #[test]
    fn test_nested_types_not_in_members() {
        let file = file("class Outer\n{\n\tvoid F() { }\n\tclass Inner { }\n}\n");
        let types = file.all_types();
        assert_eq!(types.len(), 2);
        let outer = &types[0];
        assert_eq!(outer.members().len(), 1);
        assert_eq!(outer.nested_types().len(), 1);
        assert_eq!(outer.nested_types()[0].identifier().as_deref(), Some("Inner"));
    }

    #[test]
    fn test_member_modifiers() {
        let file = file(
            "class C\n{\n\tprotected internal C() { }\n\tvoid F() { var x = new object(); }\n}\n",
        );
        let members = file.all_types()[0].members();
        let ctor = &members[0];
        assert!(ctor.modifiers().protected);
        assert!(ctor.modifiers().internal);
        assert_eq!(ctor.modifiers().visibility_count(), 2);

        // `new` inside the body must not register as a modifier
        let method = &members[1];
        assert_eq!(method.modifiers(), Modifiers::default());
    }

    #[test]
    fn test_member_names() {
        let file = file(
            "class C\n{\n\tpublic C() { }\n\tpublic List<int> Find<T>(T x) { return null; }\n\tint _count = 3;\n\tpublic string Title { get; set; }\n}\n",
        );
        let members = file.all_types()[0].members();
        assert_eq!(members[0].name().as_deref(), Some("C"));
        assert_eq!(members[1].name().as_deref(), Some("Find"));
        assert_eq!(members[2].name().as_deref(), Some("_count"));
        assert_eq!(members[3].name().as_deref(), Some("Title"));
    }

    #[test]
    fn test_enum_has_no_member_body() {
        let file = file("enum E\n{\n\tA,\n\tB,\n}\n");
        let types = file.all_types();
        assert!(!types[0].has_member_body());
        assert!(types[0].members().is_empty());
        assert!(types[0].body_span().is_some());
    }

    #[test]
    fn test_spans_exclude_leading_doc() {
        let source = "class C\n{\n\t/// <summary>Doc</summary>\n\tpublic void F() { }\n}\n";
        let file = file(source);
        let members = file.all_types()[0].members();
        let span = members[0].span();
        assert_eq!(&source[span.start..span.start + 6], "public");
    }
}
