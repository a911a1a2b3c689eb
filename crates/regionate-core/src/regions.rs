//! Region marker collection and pairing
//!
//! `#region` / `#endregion` directives live in the tree as trivia tokens.
//! This module scans them in source order and pairs them with a depth
//! counter: opens push, a close pairs with the most recent open. A close
//! with no open, or an open left unclosed at end of input, is a
//! malformed-input condition and fails the whole file.

use std::ops::Range;

use crate::cst::{CsSyntaxKind, CsSyntaxNode};
use crate::error::RegionateError;
use crate::result::Result;

/// A paired `#region` / `#endregion` marker with its name and spans
///
/// Offsets are byte positions in the source text; `open` spans cover the
/// directive line text without its newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: String,
    pub open_start: usize,
    pub open_end: usize,
    pub close_start: usize,
    pub close_end: usize,
}

impl Region {
    /// Strict containment: the open directive starts before the span and
    /// the close directive starts after it
    pub fn covers(&self, span: &Range<usize>) -> bool {
        self.open_start < span.start && self.close_start > span.end
    }

    /// Is this marker scoped inside the given body span (between braces)?
    pub fn scoped_within(&self, body: &Range<usize>) -> bool {
        self.open_start > body.start && self.close_start < body.end
    }

    /// Region names compare case-insensitively
    pub fn name_matches(&self, expected: &str) -> bool {
        self.name.eq_ignore_ascii_case(expected)
    }
}

/// Collect all region markers from the tree, pairing them by the depth rule
///
/// Returned regions are ordered by their open directive offset.
pub fn collect_regions(root: &CsSyntaxNode, source: &str) -> Result<Vec<Region>> {
    let mut stack: Vec<(String, usize, usize)> = Vec::new();
    let mut regions = Vec::new();

    for element in root.descendants_with_tokens() {
        let Some(token) = element.into_token() else {
            continue;
        };
        let start: usize = token.text_range().start().into();
        let end: usize = token.text_range().end().into();
        match token.kind() {
            CsSyntaxKind::RegionDirective => {
                stack.push((region_name(token.text()), start, end));
            }
            CsSyntaxKind::EndRegionDirective => {
                let Some((name, open_start, open_end)) = stack.pop() else {
                    return Err(RegionateError::malformed_nesting(
                        token.text().trim(),
                        line_at(source, start),
                    ));
                };
                regions.push(Region {
                    name,
                    open_start,
                    open_end,
                    close_start: start,
                    close_end: end,
                });
            }
            _ => {}
        }
    }

    if let Some((name, open_start, _)) = stack.pop() {
        return Err(RegionateError::malformed_nesting(
            format!("#region {name}"),
            line_at(source, open_start),
        ));
    }

    regions.sort_by_key(|r| r.open_start);
    Ok(regions)
}

/// Name text of a `#region` directive line (empty if the directive has none)
fn region_name(directive: &str) -> String {
    directive
        .strip_prefix("#region")
        .unwrap_or("")
        .trim()
        .to_string()
}

/// 1-based line number of a byte offset
pub fn line_at(source: &str, offset: usize) -> u32 {
    source[..offset.min(source.len())]
        .bytes()
        .filter(|&b| b == b'\n')
        .count() as u32
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::parse_source;
    use crate::error::ErrorKind;

    fn regions_of(source: &str) -> Result<Vec<Region>> {
        let (root, _) = parse_source(source);
        collect_regions(&root, source)
    }

    #[test]
    fn test_single_region() {
        let source = "#region Class: Foo\nclass Foo { }\n#endregion\n";
        let regions = regions_of(source).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].name, "Class: Foo");
        assert_eq!(regions[0].open_start, 0);
        assert!(regions[0].close_start > regions[0].open_end);
    }

    #[test]
    fn test_nested_regions_pair_innermost() {
        let source = "#region Outer\n#region Inner\nclass A { }\n#endregion\n#endregion\n";
        let regions = regions_of(source).unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].name, "Outer");
        assert_eq!(regions[1].name, "Inner");
        assert!(regions[0].close_start > regions[1].close_start);
    }

    #[test]
    fn test_unopened_close_is_malformed() {
        let err = regions_of("class A { }\n#endregion\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedRegionNesting);
    }

    #[test]
    fn test_unclosed_open_is_malformed() {
        let err = regions_of("#region Dangling\nclass A { }\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedRegionNesting);
    }

    #[test]
    fn test_coverage_is_strict() {
        let source = "#region Class: A\nclass A { }\n#endregion\n";
        let regions = regions_of(source).unwrap();
        let class_span = source.find("class").unwrap()..source.find('}').unwrap() + 1;
        assert!(regions[0].covers(&class_span));
        // A span touching the open directive is not covered
        assert!(!regions[0].covers(&(0..5)));
    }

    #[test]
    fn test_name_matching_case_insensitive() {
        let source = "#region methods: PUBLIC\nclass A { }\n#endregion\n";
        let regions = regions_of(source).unwrap();
        assert!(regions[0].name_matches("Methods: Public"));
        assert!(!regions[0].name_matches("Methods: Private"));
    }

    #[test]
    fn test_line_at() {
        assert_eq!(line_at("a\nb\nc", 0), 1);
        assert_eq!(line_at("a\nb\nc", 2), 2);
        assert_eq!(line_at("a\nb\nc", 4), 3);
    }
}
