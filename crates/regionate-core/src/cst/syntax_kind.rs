//! Syntax kind enumeration for the C# structural CST
//!
//! This module defines all node and token types in the syntax tree. The
//! parser only recognizes the structural subset of C# needed for region
//! analysis; everything inside method bodies and initializers is consumed
//! as raw token runs, but every byte of the input is represented.

use std::fmt;

/// Syntax kind for C# structural elements
///
/// Discriminants are grouped by range:
/// - 0-9: trivia (whitespace, comments, directives)
/// - 10-99: keywords
/// - 100-149: punctuation and operators
/// - 150-199: literals and identifiers
/// - 200-399: structural nodes
/// - 400+: special tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum CsSyntaxKind {
    // ==================
    // Trivia (0-9)
    // ==================
    /// Whitespace (spaces, tabs)
    Whitespace = 0,
    /// Line comment starting with //
    CommentLine = 1,
    /// Block comment /* ... */
    CommentBlock = 2,
    /// Newline (\n or \r\n, preserved verbatim)
    Newline = 3,
    /// Documentation comment starting with ///
    DocComment = 4,
    /// #region directive line (name text included, newline excluded)
    RegionDirective = 5,
    /// #endregion directive line (newline excluded)
    EndRegionDirective = 6,
    /// Any other preprocessor directive line (#if, #pragma, ...)
    Directive = 7,

    // ==================
    // Keywords (10-99)
    // ==================
    /// "class" keyword
    ClassKw = 10,
    /// "struct" keyword
    StructKw = 11,
    /// "interface" keyword
    InterfaceKw = 12,
    /// "enum" keyword
    EnumKw = 13,
    /// "namespace" keyword
    NamespaceKw = 14,
    /// "using" keyword
    UsingKw = 15,
    /// "delegate" keyword
    DelegateKw = 16,
    /// "event" keyword
    EventKw = 17,

    // Modifiers (30-59)
    /// "public" modifier
    PublicKw = 30,
    /// "private" modifier
    PrivateKw = 31,
    /// "protected" modifier
    ProtectedKw = 32,
    /// "internal" modifier
    InternalKw = 33,
    /// "static" modifier
    StaticKw = 34,
    /// "const" modifier
    ConstKw = 35,
    /// "readonly" modifier
    ReadonlyKw = 36,
    /// "sealed" modifier
    SealedKw = 37,
    /// "abstract" modifier
    AbstractKw = 38,
    /// "virtual" modifier
    VirtualKw = 39,
    /// "override" modifier
    OverrideKw = 40,
    /// "partial" modifier
    PartialKw = 41,
    /// "async" modifier
    AsyncKw = 42,
    /// "extern" modifier
    ExternKw = 43,
    /// "unsafe" modifier
    UnsafeKw = 44,
    /// "new" modifier (also the operator; context decides)
    NewKw = 45,
    /// "volatile" modifier
    VolatileKw = 46,
    /// "fixed" modifier (fixed-size buffers)
    FixedKw = 47,

    // Signature keywords (60-99)
    /// "this" keyword (indexers)
    ThisKw = 60,
    /// "operator" keyword
    OperatorKw = 61,
    /// "implicit" keyword
    ImplicitKw = 62,
    /// "explicit" keyword
    ExplicitKw = 63,
    /// "where" keyword (generic constraints)
    WhereKw = 64,

    // ==================
    // Punctuation & Operators (100-149)
    // ==================
    /// Open brace "{"
    LBrace = 100,
    /// Close brace "}"
    RBrace = 101,
    /// Open parenthesis "("
    LParen = 102,
    /// Close parenthesis ")"
    RParen = 103,
    /// Open bracket "["
    LBracket = 104,
    /// Close bracket "]"
    RBracket = 105,
    /// Semicolon ";"
    Semicolon = 106,
    /// Comma ","
    Comma = 107,
    /// Colon ":"
    Colon = 108,
    /// Dot "."
    Dot = 109,
    /// Less-than "<"
    Lt = 110,
    /// Greater-than ">"
    Gt = 111,
    /// Assignment "="
    Equals = 112,
    /// Expression-body arrow "=>"
    FatArrow = 113,
    /// Question mark "?"
    Question = 114,
    /// Tilde "~" (finalizers, bitwise not)
    Tilde = 115,
    /// Any other operator character or composite (==, &&, +=, ...)
    Operator = 120,

    // ==================
    // Literals & Identifiers (150-199)
    // ==================
    /// Identifier (also covers contextual keywords like void, get, set)
    Ident = 150,
    /// String literal ("...", @"...", $"...")
    StringLit = 151,
    /// Character literal '...'
    CharLit = 152,
    /// Numeric literal
    NumberLit = 153,

    // ==================
    // Structure nodes (200-399)
    // ==================
    /// Root of the tree (one source file)
    SourceFile = 200,
    /// using directive, up to its semicolon
    UsingDirective = 201,
    /// namespace declaration (block-bodied or file-scoped)
    NamespaceDecl = 202,
    /// Attribute list [Attr(...)]
    AttributeList = 203,

    // Type declarations (210-219)
    /// class declaration
    ClassDecl = 210,
    /// struct declaration
    StructDecl = 211,
    /// interface declaration
    InterfaceDecl = 212,
    /// enum declaration
    EnumDecl = 213,
    /// Brace-delimited body of a class/struct/interface
    TypeBody = 214,
    /// Brace-delimited body of an enum (opaque token run)
    EnumBody = 215,

    // Member declarations (220-229)
    /// Constructor declaration
    ConstructorDecl = 220,
    /// Method declaration
    MethodDecl = 221,
    /// Field declaration (non-const)
    FieldDecl = 222,
    /// Constant declaration (field with const)
    ConstantDecl = 223,
    /// Property declaration
    PropertyDecl = 224,
    /// Delegate declaration
    DelegateDecl = 225,
    /// Event declaration
    EventDecl = 226,
    /// Member the eight-kind model does not cover (operator, indexer, ...)
    UnknownMemberDecl = 227,

    // ==================
    // Special tokens (400+)
    // ==================
    /// Error token (for recovery)
    Error = 400,
    /// End of file
    Eof = 401,
}

impl CsSyntaxKind {
    /// Check if this is a trivia kind (whitespace, comments, directives)
    pub const fn is_trivia(self) -> bool {
        (self as u16) < 10
    }

    /// Check if this is a comment kind (doc comments included)
    pub const fn is_comment(self) -> bool {
        matches!(self, Self::CommentLine | Self::CommentBlock | Self::DocComment)
    }

    /// Check if this is a keyword
    pub const fn is_keyword(self) -> bool {
        (self as u16) >= 10 && (self as u16) < 100
    }

    /// Check if this is a declaration modifier
    pub const fn is_modifier(self) -> bool {
        (self as u16) >= 30 && (self as u16) < 60
    }

    /// Check if this is punctuation
    pub const fn is_punct(self) -> bool {
        (self as u16) >= 100 && (self as u16) < 150
    }

    /// Check if this is a structural node
    pub const fn is_node(self) -> bool {
        (self as u16) >= 200 && (self as u16) < 400
    }

    /// Check if this is one of the four type declaration nodes
    pub const fn is_type_decl(self) -> bool {
        matches!(
            self,
            Self::ClassDecl | Self::StructDecl | Self::InterfaceDecl | Self::EnumDecl
        )
    }

    /// Check if this is a member declaration node (nested types excluded)
    pub const fn is_member_decl(self) -> bool {
        (self as u16) >= 220 && (self as u16) < 230
    }

    /// Get the source text of keyword tokens
    pub const fn keyword_text(self) -> Option<&'static str> {
        match self {
            Self::ClassKw => Some("class"),
            Self::StructKw => Some("struct"),
            Self::InterfaceKw => Some("interface"),
            Self::EnumKw => Some("enum"),
            Self::NamespaceKw => Some("namespace"),
            Self::UsingKw => Some("using"),
            Self::DelegateKw => Some("delegate"),
            Self::EventKw => Some("event"),
            Self::PublicKw => Some("public"),
            Self::PrivateKw => Some("private"),
            Self::ProtectedKw => Some("protected"),
            Self::InternalKw => Some("internal"),
            Self::StaticKw => Some("static"),
            Self::ConstKw => Some("const"),
            Self::ReadonlyKw => Some("readonly"),
            Self::SealedKw => Some("sealed"),
            Self::AbstractKw => Some("abstract"),
            Self::VirtualKw => Some("virtual"),
            Self::OverrideKw => Some("override"),
            Self::PartialKw => Some("partial"),
            Self::AsyncKw => Some("async"),
            Self::ExternKw => Some("extern"),
            Self::UnsafeKw => Some("unsafe"),
            Self::NewKw => Some("new"),
            Self::VolatileKw => Some("volatile"),
            Self::FixedKw => Some("fixed"),
            Self::ThisKw => Some("this"),
            Self::OperatorKw => Some("operator"),
            Self::ImplicitKw => Some("implicit"),
            Self::ExplicitKw => Some("explicit"),
            Self::WhereKw => Some("where"),
            _ => None,
        }
    }
}

impl fmt::Display for CsSyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl From<CsSyntaxKind> for rowan::SyntaxKind {
    fn from(kind: CsSyntaxKind) -> Self {
        Self(kind as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trivia_classification() {
        assert!(CsSyntaxKind::Whitespace.is_trivia());
        assert!(CsSyntaxKind::DocComment.is_trivia());
        assert!(CsSyntaxKind::RegionDirective.is_trivia());
        assert!(CsSyntaxKind::EndRegionDirective.is_trivia());
        assert!(!CsSyntaxKind::ClassKw.is_trivia());
        assert!(!CsSyntaxKind::Ident.is_trivia());
    }

    #[test]
    fn test_modifier_classification() {
        assert!(CsSyntaxKind::PublicKw.is_modifier());
        assert!(CsSyntaxKind::ConstKw.is_modifier());
        assert!(CsSyntaxKind::FixedKw.is_modifier());
        assert!(!CsSyntaxKind::ClassKw.is_modifier());
        assert!(!CsSyntaxKind::ThisKw.is_modifier());
    }

    #[test]
    fn test_node_classification() {
        assert!(CsSyntaxKind::SourceFile.is_node());
        assert!(CsSyntaxKind::ClassDecl.is_node());
        assert!(CsSyntaxKind::MethodDecl.is_node());
        assert!(!CsSyntaxKind::Ident.is_node());
        assert!(!CsSyntaxKind::Eof.is_node());
    }

    #[test]
    fn test_member_decl_classification() {
        assert!(CsSyntaxKind::ConstructorDecl.is_member_decl());
        assert!(CsSyntaxKind::UnknownMemberDecl.is_member_decl());
        assert!(!CsSyntaxKind::ClassDecl.is_member_decl());
        assert!(!CsSyntaxKind::TypeBody.is_member_decl());
    }

    #[test]
    fn test_keyword_text() {
        assert_eq!(CsSyntaxKind::ClassKw.keyword_text(), Some("class"));
        assert_eq!(CsSyntaxKind::ProtectedKw.keyword_text(), Some("protected"));
        assert_eq!(CsSyntaxKind::Ident.keyword_text(), None);
    }
}
