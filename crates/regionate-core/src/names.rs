//! Naming policy: expected region name for a declaration
//!
//! Pure function from declaration shape to `"<Category>: <Qualifier>"`.
//! Type declarations are named by kind and identifier (`"Class: Widget"`);
//! members by category and visibility (`"Methods: Public"`). Comparison
//! against actual region names is case-insensitive throughout the system.

use crate::cst::ast::{AstNode, MemberDecl, MemberKind, Modifiers, TypeDecl};
use crate::error::RegionateError;
use crate::regions::line_at;
use crate::result::Result;

/// Stateless naming policy
///
/// The eight declaration kinds are matched exhaustively; anything the
/// parser recognized but the convention does not cover (operators,
/// indexers, finalizers) is a fatal `UnsupportedDeclaration`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamePolicy;

impl NamePolicy {
    pub fn new() -> Self {
        Self
    }

    /// Expected region name for a type declaration
    pub fn type_region_name(&self, decl: &TypeDecl) -> String {
        format!(
            "{}: {}",
            decl.kind().category(),
            decl.identifier().unwrap_or_default()
        )
    }

    /// Expected region name for a member declaration
    pub fn member_region_name(&self, member: &MemberDecl, source: &str) -> Result<String> {
        let category = match member.kind() {
            MemberKind::Constructor => "Constructors",
            MemberKind::Method => "Methods",
            MemberKind::Field => "Fields",
            MemberKind::Constant => "Constants",
            MemberKind::Property => "Properties",
            MemberKind::Delegate => "Delegates",
            MemberKind::Event => "Events",
            MemberKind::Unknown => {
                let span = member.span();
                let construct = member
                    .syntax()
                    .text()
                    .to_string()
                    .split_whitespace()
                    .take(4)
                    .collect::<Vec<_>>()
                    .join(" ");
                return Err(RegionateError::unsupported_declaration(
                    construct,
                    line_at(source, span.start),
                ));
            }
        };
        let qualifier = visibility_qualifier(member.modifiers(), member.kind());
        Ok(format!("{category}: {qualifier}"))
    }
}

/// Capitalized visibility qualifier for a member
///
/// Exactly one visibility modifier names itself; combined modifiers join
/// in declaration-canonical order (`protected internal` ->
/// "ProtectedInternal", `private protected` -> "PrivateProtected"); no
/// modifier at all falls back to the category default.
fn visibility_qualifier(modifiers: Modifiers, kind: MemberKind) -> String {
    let mut qualifier = String::new();
    if modifiers.public {
        qualifier.push_str("Public");
    }
    if modifiers.private {
        qualifier.push_str("Private");
    }
    if modifiers.protected {
        qualifier.push_str("Protected");
    }
    if modifiers.internal {
        qualifier.push_str("Internal");
    }
    if !qualifier.is_empty() {
        return qualifier;
    }
    match kind {
        MemberKind::Delegate | MemberKind::Event => "Internal".to_string(),
        _ => "Private".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::ast::SourceFile;
    use crate::cst::parse_source;
    use crate::error::ErrorKind;

    fn members_of(source: &str) -> (Vec<MemberDecl>, String) {
        let (root, _) = parse_source(source);
        let file = SourceFile::cast(root).unwrap();
        (file.all_types()[0].members(), source.to_string())
    }

    #[test]
    fn test_type_names() {
        let (root, _) = parse_source(
            "class Alpha { }\nstruct Beta { }\ninterface IGamma { }\nenum Delta { }\n",
        );
        let file = SourceFile::cast(root).unwrap();
        let policy = NamePolicy::new();
        let names: Vec<_> = file
            .all_types()
            .iter()
            .map(|t| policy.type_region_name(t))
            .collect();
        assert_eq!(
            names,
            vec!["Class: Alpha", "Struct: Beta", "Interface: IGamma", "Enum: Delta"]
        );
    }

    #[test]
    fn test_member_visibility_qualifiers() {
        let source = "class C\n{\n\tpublic void A() { }\n\tprivate void B() { }\n\tprotected void D() { }\n\tinternal void E() { }\n\tprotected internal void F() { }\n\tvoid G() { }\n}\n";
        let (members, source) = members_of(source);
        let policy = NamePolicy::new();
        let names: Vec<_> = members
            .iter()
            .map(|m| policy.member_region_name(m, &source).unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "Methods: Public",
                "Methods: Private",
                "Methods: Protected",
                "Methods: Internal",
                "Methods: ProtectedInternal",
                "Methods: Private",
            ]
        );
    }

    #[test]
    fn test_private_protected() {
        let (members, source) =
            members_of("class C\n{\n\tprivate protected void F() { }\n}\n");
        let policy = NamePolicy::new();
        assert_eq!(
            policy.member_region_name(&members[0], &source).unwrap(),
            "Methods: PrivateProtected"
        );
    }

    #[test]
    fn test_category_defaults() {
        let source = "class C\n{\n\tC() { }\n\tint _x;\n\tconst int K = 1;\n\tint P { get; set; }\n\tdelegate void D();\n\tevent System.Action E;\n}\n";
        let (members, source) = members_of(source);
        let policy = NamePolicy::new();
        let names: Vec<_> = members
            .iter()
            .map(|m| policy.member_region_name(m, &source).unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "Constructors: Private",
                "Fields: Private",
                "Constants: Private",
                "Properties: Private",
                "Delegates: Internal",
                "Events: Internal",
            ]
        );
    }

    #[test]
    fn test_const_field_is_constant_not_field() {
        let (members, source) =
            members_of("class C\n{\n\tpublic const string Key = \"k\";\n}\n");
        let policy = NamePolicy::new();
        assert_eq!(
            policy.member_region_name(&members[0], &source).unwrap(),
            "Constants: Public"
        );
    }

    #[test]
    fn test_unsupported_declaration_is_fatal() {
        let (members, source) = members_of(
            "class C\n{\n\tpublic static C operator +(C a, C b) { return a; }\n}\n",
        );
        let policy = NamePolicy::new();
        let err = policy.member_region_name(&members[0], &source).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedDeclaration);
    }

    #[test]
    fn test_determinism() {
        let (members, source) = members_of("class C\n{\n\tpublic void F() { }\n}\n");
        let policy = NamePolicy::new();
        let first = policy.member_region_name(&members[0], &source).unwrap();
        for _ in 0..3 {
            assert_eq!(policy.member_region_name(&members[0], &source).unwrap(), first);
        }
    }
}
