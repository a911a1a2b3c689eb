//! Textual whitespace normalization
//!
//! Purely textual, idempotent cleanup pass run after every edit batch:
//! collapses runs of three or more line breaks to two, runs of two or
//! more ordinary spaces to one, and removes a blank line that consists of
//! a single indentation unit next to another blank line. Each replacement
//! repeats to a fixed point.
//!
//! The line-break sequence is an explicit configuration value resolved at
//! the process boundary; the normalizer never reads ambient global state.

/// Concrete line ending for one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }

    /// Resolve from input text: the first line break found wins, LF is
    /// the fallback for single-line input
    pub fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(idx) if idx > 0 && text.as_bytes()[idx - 1] == b'\r' => LineEnding::Crlf,
            _ => LineEnding::Lf,
        }
    }
}

/// Idempotent textual cleanup pass
#[derive(Debug, Clone)]
pub struct Normalizer {
    line_ending: LineEnding,
    indent_unit: String,
}

impl Normalizer {
    pub fn new(line_ending: LineEnding, indent_unit: impl Into<String>) -> Self {
        Self {
            line_ending,
            indent_unit: indent_unit.into(),
        }
    }

    /// Normalize whitespace; `normalize(normalize(t)) == normalize(t)`
    pub fn normalize(&self, text: &str) -> String {
        let eol = self.line_ending.as_str();
        let two_breaks = format!("{eol}{eol}");
        let three_breaks = format!("{eol}{eol}{eol}");
        let indent_blank = format!("{eol}{eol}{}{eol}", self.indent_unit);

        let mut result = text.to_string();
        // Blank line holding a lone indentation unit next to a blank line
        result = replace_to_fixed_point(result, &indent_blank, &two_breaks);
        // Runs of 3+ line breaks become exactly 2
        result = replace_to_fixed_point(result, &three_breaks, &two_breaks);
        // Runs of 2+ ordinary spaces become 1
        result = replace_to_fixed_point(result, "  ", " ");
        result
    }
}

fn replace_to_fixed_point(mut text: String, pattern: &str, replacement: &str) -> String {
    while text.contains(pattern) {
        text = text.replace(pattern, replacement);
    }
    text
}
