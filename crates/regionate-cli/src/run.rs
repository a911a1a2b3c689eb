//! File discovery and the per-file check/fix pipeline
//!
//! Discovery walks each argument with the configured extension and
//! exclusion filters. Files are processed in parallel; syntax trees never
//! cross thread boundaries, so each worker reduces its file to a plain
//! report before results are collected, sorted by path, and printed.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};
use walkdir::WalkDir;

use regionate_core::cst::ast::AstNode;
use regionate_core::cst::parse_source;
use regionate_core::regions::line_at;
use regionate_core::{
    FixOptions, NamePolicy, RegionateConfig, RegionateError, Result, Violation, fix as apply_fix,
    validate,
};

use crate::output;

/// How the fix pipeline disposes of rewritten text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixMode {
    /// Rewrite violating files in place
    Write,
    /// Report what would change, write nothing
    Check,
    /// Print each rewrite as a unified diff, write nothing
    Diff,
}

impl FixMode {
    pub fn writes(self) -> bool {
        matches!(self, FixMode::Write)
    }
}

/// Plain-data outcome of processing one file
pub enum FileOutcome {
    Clean,
    /// Check mode: what is wrong, per type
    Violations(Vec<TypeReport>),
    /// Fix mode: the file was (or would be) rewritten
    Fixed {
        violations: usize,
        /// Unified diff, present in diff mode only
        diff: Option<String>,
    },
    Failed(String),
}

pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

/// One violating type, reduced to printable facts
pub struct TypeReport {
    pub type_name: String,
    pub line: u32,
    pub missing_own_marker: bool,
    pub expected_marker: String,
    pub members: Vec<MemberReport>,
}

pub struct MemberReport {
    pub name: String,
    pub line: u32,
    pub expected_marker: String,
}

/// Run the check pipeline; returns the process exit code
pub fn check(paths: &[PathBuf], config: &RegionateConfig) -> anyhow::Result<i32> {
    let files = discover_files(paths, config)?;
    debug!(files = files.len(), "checking");

    let mut reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| FileReport {
            path: path.clone(),
            outcome: check_file(path).unwrap_or_else(failure_outcome),
        })
        .collect();
    reports.sort_by(|a, b| a.path.cmp(&b.path));

    output::print_check_reports(&reports);
    Ok(exit_code(&reports))
}

/// Run the fix pipeline; returns the process exit code
pub fn fix(paths: &[PathBuf], config: &RegionateConfig, mode: FixMode) -> anyhow::Result<i32> {
    let files = discover_files(paths, config)?;
    debug!(files = files.len(), ?mode, "fixing");

    let mut reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| FileReport {
            path: path.clone(),
            outcome: fix_file(path, config, mode).unwrap_or_else(failure_outcome),
        })
        .collect();
    reports.sort_by(|a, b| a.path.cmp(&b.path));

    output::print_fix_reports(&reports, !mode.writes());
    Ok(if mode.writes() {
        // Applied fixes are a success; only failures remain reportable
        if reports
            .iter()
            .any(|r| matches!(r.outcome, FileOutcome::Failed(_)))
        {
            2
        } else {
            0
        }
    } else {
        exit_code(&reports)
    })
}

fn exit_code(reports: &[FileReport]) -> i32 {
    if reports
        .iter()
        .any(|r| matches!(r.outcome, FileOutcome::Failed(_)))
    {
        2
    } else if reports
        .iter()
        .any(|r| !matches!(r.outcome, FileOutcome::Clean))
    {
        1
    } else {
        0
    }
}

fn failure_outcome(err: RegionateError) -> FileOutcome {
    warn!("{err}");
    FileOutcome::Failed(err.to_string())
}

/// Expand the argument paths into the sorted list of files to process
pub fn discover_files(paths: &[PathBuf], config: &RegionateConfig) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            // Explicit files bypass the extension filter
            files.push(path.clone());
            continue;
        }
        if !path.is_dir() {
            anyhow::bail!("path does not exist: {}", path.display());
        }

        let walker = WalkDir::new(path).into_iter().filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            !(entry.file_type().is_dir() && config.files.exclude.iter().any(|ex| ex == &*name))
        });
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file() && matches_extension(entry.path(), config) {
                files.push(entry.into_path());
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn matches_extension(path: &Path, config: &RegionateConfig) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            config
                .files
                .extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
}

fn read_and_parse(path: &Path) -> Result<(String, regionate_core::CsSyntaxNode)> {
    let source = fs::read_to_string(path)
        .map_err(|e| RegionateError::io_error(path.to_path_buf(), e))?;
    let (root, lexer_errors) = parse_source(&source);
    if let Some(first) = lexer_errors.first() {
        return Err(RegionateError::parse_error(
            first.message.clone(),
            line_at(&source, first.span.start),
            0,
        ));
    }
    Ok((source, root))
}

fn check_file(path: &Path) -> Result<FileOutcome> {
    let (source, root) = read_and_parse(path)?;
    let violations = validate(&root, &source)?;
    if violations.is_empty() {
        return Ok(FileOutcome::Clean);
    }
    let reports = violations
        .iter()
        .map(|v| type_report(v, &source))
        .collect::<Result<Vec<_>>>()?;
    Ok(FileOutcome::Violations(reports))
}

fn type_report(violation: &Violation, source: &str) -> Result<TypeReport> {
    let policy = NamePolicy::new();
    let members = violation
        .unwrapped_members
        .iter()
        .map(|m| {
            Ok(MemberReport {
                name: m.name().unwrap_or_else(|| "<unnamed>".to_string()),
                line: line_at(source, m.span().start),
                expected_marker: policy.member_region_name(m, source)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(TypeReport {
        type_name: violation.type_name(),
        line: line_at(source, violation.type_decl.span().start),
        missing_own_marker: violation.type_missing_own_marker,
        expected_marker: policy.type_region_name(&violation.type_decl),
        members,
    })
}

fn fix_file(path: &Path, config: &RegionateConfig, mode: FixMode) -> Result<FileOutcome> {
    let (source, root) = read_and_parse(path)?;
    let violations = validate(&root, &source)?;
    if violations.is_empty() {
        return Ok(FileOutcome::Clean);
    }

    let count: usize = violations
        .iter()
        .map(|v| usize::from(v.type_missing_own_marker) + v.unwrapped_members.len())
        .sum();
    let options = FixOptions {
        line_ending: config.format.line_ending.resolve(&source),
        indent_unit: config.format.indent_unit(),
    };
    let fixed = apply_fix(&source, &root, &violations, &options)?;

    let diff = match mode {
        FixMode::Write => {
            fs::write(path, &fixed).map_err(|e| RegionateError::io_error(path.to_path_buf(), e))?;
            None
        }
        FixMode::Check => None,
        FixMode::Diff => Some(output::render_diff(&source, &fixed, path)),
    };
    Ok(FileOutcome::Fixed {
        violations: count,
        diff,
    })
}
