//! Region convention analyzer
//!
//! Walks the tree once, collecting all region markers and all type
//! declarations in source order, then reports every declaration lacking a
//! correctly-named, uniquely-matched covering marker.
//!
//! Type matching consumes: a marker validates at most one type
//! declaration. Member matching requires a unique covering name-match
//! among the markers scoped inside the enclosing body without consuming,
//! since several members of one category and visibility legitimately
//! share a single group marker.

use tracing::debug;

use crate::cst::CsSyntaxNode;
use crate::cst::ast::{AstNode, MemberDecl, SourceFile, TypeDecl};
use crate::error::RegionateError;
use crate::names::NamePolicy;
use crate::regions::collect_regions;
use crate::result::Result;

/// A per-type report of everything that needs fixing
#[derive(Debug, Clone)]
pub struct Violation {
    pub type_decl: TypeDecl,
    /// The type itself has no uniquely-matched covering marker
    pub type_missing_own_marker: bool,
    /// Direct members with no unique covering marker, in source order
    /// (nested type declarations are never listed here; they get their
    /// own entry)
    pub unwrapped_members: Vec<MemberDecl>,
}

impl Violation {
    /// Declared identifier of the violating type, for reporting
    pub fn type_name(&self) -> String {
        self.type_decl.identifier().unwrap_or_default()
    }
}

/// Validate the region convention over a parsed file
///
/// Returns one entry per type needing action, in source order;
/// fully-compliant types are omitted.
pub fn validate(root: &CsSyntaxNode, source: &str) -> Result<Vec<Violation>> {
    let policy = NamePolicy::new();
    let regions = collect_regions(root, source)?;
    let file = SourceFile::cast(root.clone())
        .ok_or_else(|| RegionateError::internal_error("root is not a source file"))?;
    let types = file.all_types();
    debug!(
        regions = regions.len(),
        types = types.len(),
        "collected markers and type declarations"
    );

    let mut consumed = vec![false; regions.len()];
    let mut violations = Vec::new();

    for type_decl in types {
        let expected = policy.type_region_name(&type_decl);
        let target = type_decl.body_span().unwrap_or_else(|| type_decl.span());

        // One-time consuming match against the remaining pool; zero or
        // several candidates both count as missing
        let candidates: Vec<usize> = regions
            .iter()
            .enumerate()
            .filter(|(i, r)| !consumed[*i] && r.covers(&target) && r.name_matches(&expected))
            .map(|(i, _)| i)
            .collect();
        let has_own_marker = candidates.len() == 1;
        if has_own_marker {
            consumed[candidates[0]] = true;
        }

        let mut unwrapped_members = Vec::new();
        if type_decl.has_member_body()
            && let Some(body) = type_decl.body_span()
        {
            let members = type_decl.members();
            let scoped: Vec<_> = regions.iter().filter(|r| r.scoped_within(&body)).collect();

            if !members.is_empty() && scoped.is_empty() {
                // Bulk case: nothing inside the body to match against;
                // naming still runs so unsupported members stay fatal
                for member in members {
                    policy.member_region_name(&member, source)?;
                    unwrapped_members.push(member);
                }
            } else {
                for member in members {
                    let expected = policy.member_region_name(&member, source)?;
                    let span = member.span();
                    let matching = scoped
                        .iter()
                        .filter(|r| r.covers(&span) && r.name_matches(&expected))
                        .count();
                    if matching != 1 {
                        unwrapped_members.push(member);
                    }
                }
            }
        }

        if !has_own_marker || !unwrapped_members.is_empty() {
            debug!(
                type_name = %type_decl.identifier().unwrap_or_default(),
                missing_own = !has_own_marker,
                unwrapped = unwrapped_members.len(),
                "violation"
            );
            violations.push(Violation {
                type_decl,
                type_missing_own_marker: !has_own_marker,
                unwrapped_members,
            });
        }
    }

    Ok(violations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::parse_source;

    fn validate_source(source: &str) -> Result<Vec<Violation>> {
        let (root, _) = parse_source(source);
        validate(&root, source)
    }

    #[test]
    fn test_empty_class_without_marker() {
        let violations = validate_source("class Foo\n{\n}\n").unwrap();
        assert_eq!(violations.len(), 1);
        assert!(violations[0].type_missing_own_marker);
        assert!(violations[0].unwrapped_members.is_empty());
        assert_eq!(violations[0].type_name(), "Foo");
    }

    #[test]
    fn test_compliant_empty_class() {
        let source = "#region Class: Foo\n\nclass Foo\n{\n}\n\n#endregion\n";
        assert!(validate_source(source).unwrap().is_empty());
    }

    #[test]
    fn test_wrong_marker_name_does_not_count() {
        let source = "#region Class: Bar\n\nclass Foo\n{\n}\n\n#endregion\n";
        let violations = validate_source(source).unwrap();
        assert_eq!(violations.len(), 1);
        assert!(violations[0].type_missing_own_marker);
    }

    #[test]
    fn test_marker_name_is_case_insensitive() {
        let source = "#region CLASS: foo\n\nclass Foo\n{\n}\n\n#endregion\n";
        assert!(validate_source(source).unwrap().is_empty());
    }

    #[test]
    fn test_bulk_case_reports_all_members() {
        let source = "#region Class: C\n\nclass C\n{\n\tpublic C() { }\n\tpublic void F() { }\n\tint _x;\n}\n\n#endregion\n";
        let violations = validate_source(source).unwrap();
        assert_eq!(violations.len(), 1);
        assert!(!violations[0].type_missing_own_marker);
        assert_eq!(violations[0].unwrapped_members.len(), 3);
    }

    #[test]
    fn test_member_in_matching_region_is_compliant() {
        let source = "#region Class: C\n\nclass C\n{\n\t#region Methods: Public\n\n\tpublic void F() { }\n\n\t#endregion\n}\n\n#endregion\n";
        assert!(validate_source(source).unwrap().is_empty());
    }

    #[test]
    fn test_member_in_wrongly_named_region() {
        let source = "#region Class: C\n\nclass C\n{\n\t#region Methods: Private\n\n\tpublic void F() { }\n\n\t#endregion\n}\n\n#endregion\n";
        let violations = validate_source(source).unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].unwrapped_members.len(), 1);
    }

    #[test]
    fn test_shared_group_marker_validates_several_members() {
        let source = "#region Class: C\n\nclass C\n{\n\t#region Methods: Public\n\n\tpublic void F() { }\n\n\tpublic void G() { }\n\n\t#endregion\n}\n\n#endregion\n";
        assert!(validate_source(source).unwrap().is_empty());
    }

    #[test]
    fn test_one_time_consumption_across_types() {
        // One marker cannot validate two identically named types
        let source = "#region Class: C\n\nclass C { }\n\nclass C { }\n\n#endregion\n";
        let violations = validate_source(source).unwrap();
        // The marker covers both; the first consumes it, the second misses
        assert_eq!(violations.len(), 1);
        assert!(violations[0].type_missing_own_marker);
    }

    #[test]
    fn test_ambiguous_double_marker_is_a_miss() {
        let source = "#region Class: C\n#region Class: C\n\nclass C { }\n\n#endregion\n#endregion\n";
        let violations = validate_source(source).unwrap();
        assert_eq!(violations.len(), 1);
        assert!(violations[0].type_missing_own_marker);
    }

    #[test]
    fn test_nested_type_reported_independently() {
        let source = "#region Class: Outer\n\nclass Outer\n{\n\tclass Inner\n\t{\n\t}\n}\n\n#endregion\n";
        let violations = validate_source(source).unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].type_name(), "Inner");
        assert!(violations[0].type_missing_own_marker);
        assert!(violations[0].unwrapped_members.is_empty());
    }

    #[test]
    fn test_enum_members_never_reported() {
        let source = "#region Enum: E\n\nenum E\n{\n\tA,\n\tB,\n}\n\n#endregion\n";
        assert!(validate_source(source).unwrap().is_empty());
    }

    #[test]
    fn test_unsupported_member_is_fatal_even_without_markers() {
        let source = "class C\n{\n\tpublic static C operator +(C a, C b) { return a; }\n}\n";
        let err = validate_source(source).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::UnsupportedDeclaration);
    }

    #[test]
    fn test_malformed_nesting_fails_fast() {
        let source = "class C { }\n#endregion\n";
        assert!(validate_source(source).is_err());
    }

    #[test]
    fn test_violations_in_source_order() {
        let source = "class A { }\n\nclass B { }\n";
        let violations = validate_source(source).unwrap();
        let names: Vec<_> = violations.iter().map(|v| v.type_name()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
