//! Terminal reporting
//!
//! Human-readable rendering of check and fix results, with colors routed
//! through `colored` so `--no-color` and `NO_COLOR` are honored globally.

use std::path::Path;

use colored::Colorize;
use similar::{ChangeTag, TextDiff};

use crate::run::{FileOutcome, FileReport};

/// Print per-file check results and a summary line
pub fn print_check_reports(reports: &[FileReport]) {
    let mut violating_files = 0usize;
    let mut total_violations = 0usize;
    let mut failed_files = 0usize;

    for report in reports {
        match &report.outcome {
            FileOutcome::Clean => {}
            FileOutcome::Violations(types) => {
                violating_files += 1;
                println!("{}", report.path.display().to_string().bold());
                for t in types {
                    if t.missing_own_marker {
                        total_violations += 1;
                        println!(
                            "  {} {}:{} type {} has no '#region {}' marker",
                            "error".red().bold(),
                            report.path.display(),
                            t.line,
                            t.type_name.cyan(),
                            t.expected_marker
                        );
                    }
                    for m in &t.members {
                        total_violations += 1;
                        println!(
                            "  {} {}:{} member {} is outside its '#region {}' group",
                            "error".red().bold(),
                            report.path.display(),
                            m.line,
                            m.name.cyan(),
                            m.expected_marker
                        );
                    }
                }
                println!();
            }
            FileOutcome::Fixed { .. } => {}
            FileOutcome::Failed(message) => {
                failed_files += 1;
                println!(
                    "{} {}: {}",
                    "failed".red().bold(),
                    report.path.display(),
                    message
                );
            }
        }
    }

    let checked = reports.len();
    if total_violations == 0 && failed_files == 0 {
        println!(
            "{} {} file(s) checked, no violations",
            "ok".green().bold(),
            checked
        );
    } else {
        println!(
            "{} {} violation(s) in {} of {} file(s), {} file(s) failed",
            "found".yellow().bold(),
            total_violations,
            violating_files,
            checked,
            failed_files
        );
    }
}

/// Print per-file fix results and a summary line
pub fn print_fix_reports(reports: &[FileReport], dry_run: bool) {
    let mut fixed_files = 0usize;
    let mut failed_files = 0usize;

    for report in reports {
        match &report.outcome {
            FileOutcome::Clean | FileOutcome::Violations(_) => {}
            FileOutcome::Fixed { violations, diff } => {
                fixed_files += 1;
                let verb = if dry_run { "would fix" } else { "fixed" };
                println!(
                    "{} {} ({} violation(s))",
                    verb.green().bold(),
                    report.path.display(),
                    violations
                );
                if let Some(diff) = diff {
                    println!("{diff}");
                }
            }
            FileOutcome::Failed(message) => {
                failed_files += 1;
                println!(
                    "{} {}: {}",
                    "failed".red().bold(),
                    report.path.display(),
                    message
                );
            }
        }
    }

    let untouched = reports.len() - fixed_files - failed_files;
    println!(
        "{} {} file(s) rewritten, {} clean, {} failed",
        (if dry_run { "summary (dry run)" } else { "summary" }).bold(),
        fixed_files,
        untouched,
        failed_files
    );
}

/// Render a unified line diff between the original and fixed text
pub fn render_diff(original: &str, fixed: &str, path: &Path) -> String {
    let diff = TextDiff::from_lines(original, fixed);
    let mut out = String::new();
    out.push_str(&format!("--- {}\n", path.display()).bold().to_string());
    out.push_str(
        &format!("+++ {} (fixed)\n", path.display())
            .bold()
            .to_string(),
    );

    for change in diff.iter_all_changes() {
        let line = change.value();
        let rendered = match change.tag() {
            ChangeTag::Delete => format!("-{line}").red().to_string(),
            ChangeTag::Insert => format!("+{line}").green().to_string(),
            ChangeTag::Equal => format!(" {line}"),
        };
        out.push_str(&rendered);
        if !rendered.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}
