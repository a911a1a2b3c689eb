//! Rowan language implementation for the C# structural subset
//!
//! This module implements the `rowan::Language` trait, which connects our
//! CsSyntaxKind enum to Rowan's generic CST infrastructure.

use rowan::Language;

use super::CsSyntaxKind;

/// Language implementation for the structural C# subset
///
/// This is a zero-sized type that implements `rowan::Language` to provide
/// the connection between our syntax kinds and Rowan's generic tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CsLanguage;

impl Language for CsLanguage {
    type Kind = CsSyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        match raw.0 {
            // Trivia
            0 => CsSyntaxKind::Whitespace,
            1 => CsSyntaxKind::CommentLine,
            2 => CsSyntaxKind::CommentBlock,
            3 => CsSyntaxKind::Newline,
            4 => CsSyntaxKind::DocComment,
            5 => CsSyntaxKind::RegionDirective,
            6 => CsSyntaxKind::EndRegionDirective,
            7 => CsSyntaxKind::Directive,

            // Keywords (10-99)
            10 => CsSyntaxKind::ClassKw,
            11 => CsSyntaxKind::StructKw,
            12 => CsSyntaxKind::InterfaceKw,
            13 => CsSyntaxKind::EnumKw,
            14 => CsSyntaxKind::NamespaceKw,
            15 => CsSyntaxKind::UsingKw,
            16 => CsSyntaxKind::DelegateKw,
            17 => CsSyntaxKind::EventKw,
            30 => CsSyntaxKind::PublicKw,
            31 => CsSyntaxKind::PrivateKw,
            32 => CsSyntaxKind::ProtectedKw,
            33 => CsSyntaxKind::InternalKw,
            34 => CsSyntaxKind::StaticKw,
            35 => CsSyntaxKind::ConstKw,
            36 => CsSyntaxKind::ReadonlyKw,
            37 => CsSyntaxKind::SealedKw,
            38 => CsSyntaxKind::AbstractKw,
            39 => CsSyntaxKind::VirtualKw,
            40 => CsSyntaxKind::OverrideKw,
            41 => CsSyntaxKind::PartialKw,
            42 => CsSyntaxKind::AsyncKw,
            43 => CsSyntaxKind::ExternKw,
            44 => CsSyntaxKind::UnsafeKw,
            45 => CsSyntaxKind::NewKw,
            46 => CsSyntaxKind::VolatileKw,
            47 => CsSyntaxKind::FixedKw,
            60 => CsSyntaxKind::ThisKw,
            61 => CsSyntaxKind::OperatorKw,
            62 => CsSyntaxKind::ImplicitKw,
            63 => CsSyntaxKind::ExplicitKw,
            64 => CsSyntaxKind::WhereKw,

            // Punctuation & operators (100-149)
            100 => CsSyntaxKind::LBrace,
            101 => CsSyntaxKind::RBrace,
            102 => CsSyntaxKind::LParen,
            103 => CsSyntaxKind::RParen,
            104 => CsSyntaxKind::LBracket,
            105 => CsSyntaxKind::RBracket,
            106 => CsSyntaxKind::Semicolon,
            107 => CsSyntaxKind::Comma,
            108 => CsSyntaxKind::Colon,
            109 => CsSyntaxKind::Dot,
            110 => CsSyntaxKind::Lt,
            111 => CsSyntaxKind::Gt,
            112 => CsSyntaxKind::Equals,
            113 => CsSyntaxKind::FatArrow,
            114 => CsSyntaxKind::Question,
            115 => CsSyntaxKind::Tilde,
            120 => CsSyntaxKind::Operator,

            // Literals & identifiers (150-199)
            150 => CsSyntaxKind::Ident,
            151 => CsSyntaxKind::StringLit,
            152 => CsSyntaxKind::CharLit,
            153 => CsSyntaxKind::NumberLit,

            // Structure nodes (200-399)
            200 => CsSyntaxKind::SourceFile,
            201 => CsSyntaxKind::UsingDirective,
            202 => CsSyntaxKind::NamespaceDecl,
            203 => CsSyntaxKind::AttributeList,
            210 => CsSyntaxKind::ClassDecl,
            211 => CsSyntaxKind::StructDecl,
            212 => CsSyntaxKind::InterfaceDecl,
            213 => CsSyntaxKind::EnumDecl,
            214 => CsSyntaxKind::TypeBody,
            215 => CsSyntaxKind::EnumBody,
            220 => CsSyntaxKind::ConstructorDecl,
            221 => CsSyntaxKind::MethodDecl,
            222 => CsSyntaxKind::FieldDecl,
            223 => CsSyntaxKind::ConstantDecl,
            224 => CsSyntaxKind::PropertyDecl,
            225 => CsSyntaxKind::DelegateDecl,
            226 => CsSyntaxKind::EventDecl,
            227 => CsSyntaxKind::UnknownMemberDecl,

            // Special tokens (400+)
            400 => CsSyntaxKind::Error,
            401 => CsSyntaxKind::Eof,

            _ => CsSyntaxKind::Error,
        }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        rowan::SyntaxKind(kind as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        let kinds = [
            CsSyntaxKind::Whitespace,
            CsSyntaxKind::RegionDirective,
            CsSyntaxKind::ClassKw,
            CsSyntaxKind::Ident,
            CsSyntaxKind::LBrace,
            CsSyntaxKind::SourceFile,
            CsSyntaxKind::ClassDecl,
            CsSyntaxKind::MethodDecl,
            CsSyntaxKind::UnknownMemberDecl,
        ];

        for &kind in &kinds {
            let raw = CsLanguage::kind_to_raw(kind);
            let back = CsLanguage::kind_from_raw(raw);
            assert_eq!(kind, back, "Roundtrip failed for {kind:?}");
        }
    }

    #[test]
    fn test_kind_values() {
        assert_eq!(CsLanguage::kind_to_raw(CsSyntaxKind::Whitespace).0, 0);
        assert_eq!(CsLanguage::kind_to_raw(CsSyntaxKind::ClassKw).0, 10);
        assert_eq!(CsLanguage::kind_to_raw(CsSyntaxKind::LBrace).0, 100);
        assert_eq!(CsLanguage::kind_to_raw(CsSyntaxKind::SourceFile).0, 200);
    }
}
