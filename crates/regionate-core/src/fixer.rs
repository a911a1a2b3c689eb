//! Region rewriter
//!
//! Turns analyzer violations into a batch of text edits and applies them
//! in one pass. Three shapes of edit exist: wrapping a declaration in a
//! new marker pair, merging several same-named members under one new
//! marker pair, and relocating a member into an already-present matching
//! group. All offsets are computed against the unmodified input, so the
//! batch never chases its own changes; the whitespace normalizer runs
//! once at the end to clean up seams left by deletions.

use std::ops::Range;

use tracing::debug;

use crate::analyzer::Violation;
use crate::cst::CsSyntaxNode;
use crate::cst::ast::{AstNode, MemberDecl};
use crate::names::NamePolicy;
use crate::normalizer::{LineEnding, Normalizer};
use crate::regions::{Region, collect_regions};
use crate::result::Result;
use crate::textedit::{TextEdit, apply_edits};

/// Formatting knobs for newly inserted marker lines
#[derive(Debug, Clone)]
pub struct FixOptions {
    pub line_ending: LineEnding,
    pub indent_unit: String,
}

impl Default for FixOptions {
    fn default() -> Self {
        Self {
            line_ending: LineEnding::Lf,
            indent_unit: "\t".to_string(),
        }
    }
}

/// Rewrite the source so every reported violation is resolved
///
/// Returns the input unchanged when there is nothing to fix; a fixed
/// file re-validates clean, and fixing a clean file is the identity.
pub fn fix(
    source: &str,
    root: &CsSyntaxNode,
    violations: &[Violation],
    options: &FixOptions,
) -> Result<String> {
    let normalizer = Normalizer::new(options.line_ending, options.indent_unit.clone());
    if violations.is_empty() {
        // Nothing to wrap; only the whitespace cleanup applies
        return Ok(normalizer.normalize(source));
    }

    let policy = NamePolicy::new();
    let regions = collect_regions(root, source)?;
    let eol = options.line_ending.as_str();
    let mut edits: Vec<TextEdit> = Vec::new();

    for violation in violations {
        let type_decl = &violation.type_decl;

        if violation.type_missing_own_marker {
            let span = type_decl.span();
            let open_at = line_start(source, span.start);
            let indent = indent_of(source, open_at);
            let name = policy.type_region_name(type_decl);
            edits.push(TextEdit::insert(
                open_at,
                format!("{indent}#region {name}{eol}{eol}"),
            ));
            edits.push(TextEdit::insert(
                line_end_after(source, span.end),
                format!("{eol}{indent}#endregion{eol}{eol}"),
            ));
        }

        // Partition the unwrapped members into groups by expected region
        // name, keeping first-appearance order so same-offset inserts
        // collect in source order
        let mut groups: Vec<(String, Vec<&MemberDecl>)> = Vec::new();
        for member in &violation.unwrapped_members {
            let name = policy.member_region_name(member, source)?;
            match groups.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(&name)) {
                Some((_, members)) => members.push(member),
                None => groups.push((name, vec![member])),
            }
        }

        let body = type_decl.body_span();
        for (name, members) in &groups {
            let existing: Vec<&Region> = match &body {
                Some(body) => regions
                    .iter()
                    .filter(|r| r.scoped_within(body) && r.name_matches(name))
                    .collect(),
                None => Vec::new(),
            };

            if let [target] = existing.as_slice() {
                // A uniquely-named group already exists: move every
                // member (with its attached comment lines) to just above
                // the group's close directive
                let insert_at = line_start(source, target.close_start);
                debug!(group = %name, members = members.len(), "relocating into existing group");
                for member in members {
                    let block = block_range(source, member);
                    let text = format!("{eol}{}{eol}", &source[block.clone()]);
                    edits.push(TextEdit::delete(block.start, block.len()));
                    edits.push(TextEdit::insert(insert_at, text));
                }
            } else {
                // Synthesize the group around the first member and pull
                // the rest of the group in behind it
                let first_span = members[0].span();
                let open_at = line_start(source, first_span.start);
                let indent = indent_of(source, open_at);
                let close_at = line_end_after(source, first_span.end);
                debug!(group = %name, members = members.len(), "wrapping new group");
                edits.push(TextEdit::insert(
                    open_at,
                    format!("{indent}#region {name}{eol}{eol}"),
                ));
                for member in &members[1..] {
                    let block = block_range(source, member);
                    let text = format!("{eol}{}{eol}", &source[block.clone()]);
                    edits.push(TextEdit::delete(block.start, block.len()));
                    edits.push(TextEdit::insert(close_at, text));
                }
                edits.push(TextEdit::insert(
                    close_at,
                    format!("{eol}{indent}#endregion{eol}{eol}"),
                ));
            }
        }
    }

    debug!(edits = edits.len(), "applying edit batch");
    let patched = apply_edits(source, &edits)?;
    Ok(normalizer.normalize(&patched))
}

/// Start offset of the line containing `offset`
fn line_start(source: &str, offset: usize) -> usize {
    source[..offset.min(source.len())]
        .rfind('\n')
        .map(|i| i + 1)
        .unwrap_or(0)
}

/// Offset just past the line break of the line containing `offset`
fn line_end_after(source: &str, offset: usize) -> usize {
    let offset = offset.min(source.len());
    source[offset..]
        .find('\n')
        .map(|i| offset + i + 1)
        .unwrap_or(source.len())
}

/// Leading whitespace of the line starting at `line_start`
fn indent_of(source: &str, line_start: usize) -> &str {
    let line = &source[line_start..];
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

/// Full-line byte range of a member, pulling in contiguous comment lines
/// directly above so they travel with it
fn block_range(source: &str, member: &MemberDecl) -> Range<usize> {
    let span = member.span();
    let mut start = line_start(source, span.start);
    while start > 0 {
        let prev = line_start(source, start - 1);
        if source[prev..start].trim_start().starts_with("//") {
            start = prev;
        } else {
            break;
        }
    }
    start..line_end_after(source, span.end)
}
