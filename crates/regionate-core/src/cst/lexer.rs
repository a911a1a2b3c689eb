//! CST-aware lexer that preserves all trivia (whitespace, comments, directives)
//!
//! Every byte of the input is emitted as a token, including whitespace,
//! newlines, comments, and preprocessor directive lines. This enables
//! lossless round-tripping: the concatenation of all token texts equals
//! the input exactly.
//!
//! String and character literals lex as single tokens, so braces inside
//! literals never confuse brace-depth tracking in the parser.

use crate::cst::CsSyntaxKind;
use std::ops::Range;

/// Simple span representing a range in the source
pub type CstSpan = Range<usize>;

/// A lexer error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerError {
    pub message: String,
    pub span: CstSpan,
}

impl LexerError {
    pub fn new(message: impl Into<String>, span: CstSpan) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// A token with its syntax kind and span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CstToken {
    pub kind: CsSyntaxKind,
    pub text: String,
    pub span: CstSpan,
}

impl CstToken {
    pub fn new(kind: CsSyntaxKind, text: impl Into<String>, span: CstSpan) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

/// Lex C# input preserving ALL trivia for CST construction
pub fn lex_with_trivia(input: &str) -> (Vec<CstToken>, Vec<LexerError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    let len = input.len();
    let mut i = 0usize;
    // A preprocessor directive must be the first non-whitespace on its line
    let mut at_line_start = true;

    while i < len {
        let Some((current, size)) = next_char(input, i) else {
            break;
        };
        let start = i;

        match current {
            '\n' => {
                tokens.push(CstToken::new(CsSyntaxKind::Newline, "\n", start..i + size));
                i += size;
                at_line_start = true;
            }
            '\r' => {
                // \r\n is a single newline token, preserved verbatim
                let mut end = i + size;
                if let Some(('\n', nl_size)) = next_char(input, end) {
                    end += nl_size;
                }
                tokens.push(CstToken::new(
                    CsSyntaxKind::Newline,
                    &input[start..end],
                    start..end,
                ));
                i = end;
                at_line_start = true;
            }

            // Horizontal whitespace run (spaces, tabs)
            c if c.is_whitespace() => {
                let mut end = i + size;
                while let Some((next_ch, next_size)) = next_char(input, end) {
                    if next_ch.is_whitespace() && next_ch != '\n' && next_ch != '\r' {
                        end += next_size;
                    } else {
                        break;
                    }
                }
                tokens.push(CstToken::new(
                    CsSyntaxKind::Whitespace,
                    &input[start..end],
                    start..end,
                ));
                i = end;
            }

            // Comments
            '/' => {
                let next = next_char(input, i + size);
                match next {
                    Some(('/', _)) => {
                        let end = line_content_end(input, start);
                        let kind = if input[start..end].starts_with("///") {
                            CsSyntaxKind::DocComment
                        } else {
                            CsSyntaxKind::CommentLine
                        };
                        tokens.push(CstToken::new(kind, &input[start..end], start..end));
                        i = end;
                        at_line_start = false;
                    }
                    Some(('*', star_size)) => {
                        let mut end = i + size + star_size;
                        let mut terminated = false;
                        while let Some((c, step)) = next_char(input, end) {
                            if c == '*'
                                && let Some(('/', peek_size)) = next_char(input, end + step)
                            {
                                end += step + peek_size;
                                terminated = true;
                                break;
                            }
                            end += step;
                        }
                        if !terminated {
                            end = len;
                            errors.push(LexerError::new("unterminated block comment", start..end));
                        }
                        tokens.push(CstToken::new(
                            CsSyntaxKind::CommentBlock,
                            &input[start..end],
                            start..end,
                        ));
                        i = end;
                        at_line_start = false;
                    }
                    _ => {
                        tokens.push(CstToken::new(CsSyntaxKind::Operator, "/", start..i + size));
                        i += size;
                        at_line_start = false;
                    }
                }
            }

            // Preprocessor directive lines (only at line start)
            '#' if at_line_start => {
                let end = line_content_end(input, start);
                let text = &input[start..end];
                let kind = directive_kind(text);
                tokens.push(CstToken::new(kind, text, start..end));
                i = end;
                at_line_start = false;
            }

            // String literals (regular, verbatim, interpolated)
            '"' => {
                let end = lex_string(input, start, false, &mut errors);
                tokens.push(CstToken::new(
                    CsSyntaxKind::StringLit,
                    &input[start..end],
                    start..end,
                ));
                i = end;
                at_line_start = false;
            }
            '@' | '$' => {
                // @"..." / $"..." / $@"..." lex as one string token;
                // @identifier lexes as a plain identifier
                let (end, kind) = lex_at_or_dollar(input, start, &mut errors);
                tokens.push(CstToken::new(kind, &input[start..end], start..end));
                i = end;
                at_line_start = false;
            }
            '\'' => {
                let end = lex_char_literal(input, start, &mut errors);
                tokens.push(CstToken::new(
                    CsSyntaxKind::CharLit,
                    &input[start..end],
                    start..end,
                ));
                i = end;
                at_line_start = false;
            }

            c if c.is_ascii_digit() => {
                let end = lex_number(input, start);
                tokens.push(CstToken::new(
                    CsSyntaxKind::NumberLit,
                    &input[start..end],
                    start..end,
                ));
                i = end;
                at_line_start = false;
            }

            c if c.is_alphabetic() || c == '_' => {
                let end = lex_ident(input, start);
                let text = &input[start..end];
                let kind = keyword_kind(text).unwrap_or(CsSyntaxKind::Ident);
                tokens.push(CstToken::new(kind, text, start..end));
                i = end;
                at_line_start = false;
            }

            // Punctuation and operators
            _ => {
                let (kind, end) = lex_punct(input, start, current, size);
                tokens.push(CstToken::new(kind, &input[start..end], start..end));
                i = end;
                at_line_start = false;
            }
        }
    }

    (tokens, errors)
}

/// Decode the char at byte offset `pos`, returning it and its UTF-8 size
fn next_char(input: &str, pos: usize) -> Option<(char, usize)> {
    input[pos..].chars().next().map(|c| (c, c.len_utf8()))
}

/// End offset of line content starting at `start` (newline excluded)
fn line_content_end(input: &str, start: usize) -> usize {
    match input[start..].find(['\n', '\r']) {
        Some(rel) => start + rel,
        None => input.len(),
    }
}

/// Classify a preprocessor directive line
fn directive_kind(text: &str) -> CsSyntaxKind {
    let body = text[1..].trim_start();
    if body == "region" || body.starts_with("region ") || body.starts_with("region\t") {
        CsSyntaxKind::RegionDirective
    } else if body == "endregion"
        || body.starts_with("endregion ")
        || body.starts_with("endregion\t")
        || body.starts_with("endregion//")
    {
        CsSyntaxKind::EndRegionDirective
    } else {
        CsSyntaxKind::Directive
    }
}

/// Lex a string literal starting at the opening quote
///
/// `verbatim` strings (`@"..."`) use doubled quotes for escaping and may
/// span lines; regular strings use backslash escapes and end at the line.
fn lex_string(input: &str, start: usize, verbatim: bool, errors: &mut Vec<LexerError>) -> usize {
    debug_assert!(input[start..].starts_with('"'));
    let mut i = start + 1;
    while let Some((c, size)) = next_char(input, i) {
        match c {
            '"' if verbatim => {
                // "" inside a verbatim string is an escaped quote
                if let Some(('"', q2)) = next_char(input, i + size) {
                    i += size + q2;
                } else {
                    return i + size;
                }
            }
            '"' => return i + size,
            '\\' if !verbatim => {
                i += size;
                if let Some((_, esc_size)) = next_char(input, i) {
                    i += esc_size;
                }
            }
            '\n' | '\r' if !verbatim => {
                errors.push(LexerError::new("unterminated string literal", start..i));
                return i;
            }
            _ => i += size,
        }
    }
    errors.push(LexerError::new(
        "unterminated string literal",
        start..input.len(),
    ));
    input.len()
}

/// Lex a token starting with `@` or `$`
fn lex_at_or_dollar(
    input: &str,
    start: usize,
    errors: &mut Vec<LexerError>,
) -> (usize, CsSyntaxKind) {
    // Skip the @/$ prefix run ($@"..." and @$"..." are both legal)
    let mut i = start;
    let mut saw_at = false;
    while let Some((c, size)) = next_char(input, i) {
        match c {
            '@' => {
                saw_at = true;
                i += size;
            }
            '$' => i += size,
            _ => break,
        }
    }
    match next_char(input, i) {
        Some(('"', _)) => {
            // Interpolation holes are consumed as part of the token; their
            // braces never reach the parser's depth tracking.
            let end = lex_string(input, i, saw_at, errors);
            (end, CsSyntaxKind::StringLit)
        }
        Some((c, _)) if saw_at && (c.is_alphabetic() || c == '_') => {
            (lex_ident(input, i), CsSyntaxKind::Ident)
        }
        _ => (i.max(start + 1), CsSyntaxKind::Operator),
    }
}

/// Lex a character literal starting at the opening quote
fn lex_char_literal(input: &str, start: usize, errors: &mut Vec<LexerError>) -> usize {
    let mut i = start + 1;
    while let Some((c, size)) = next_char(input, i) {
        match c {
            '\'' => return i + size,
            '\\' => {
                i += size;
                if let Some((_, esc_size)) = next_char(input, i) {
                    i += esc_size;
                }
            }
            '\n' | '\r' => break,
            _ => i += size,
        }
    }
    errors.push(LexerError::new("unterminated character literal", start..i));
    i
}

/// Lex a numeric literal (digits, separators, suffixes, hex, and a
/// fractional part when the dot is followed by a digit)
fn lex_number(input: &str, start: usize) -> usize {
    let mut i = start;
    while let Some((c, size)) = next_char(input, i) {
        if c.is_ascii_alphanumeric() || c == '_' {
            i += size;
        } else if c == '.' {
            match next_char(input, i + size) {
                Some((d, _)) if d.is_ascii_digit() => i += size,
                _ => break,
            }
        } else {
            break;
        }
    }
    i
}

/// Lex an identifier (letters, digits, underscores)
fn lex_ident(input: &str, start: usize) -> usize {
    let mut i = start;
    while let Some((c, size)) = next_char(input, i) {
        if c.is_alphanumeric() || c == '_' {
            i += size;
        } else {
            break;
        }
    }
    i
}

/// Lex a punctuation or operator token
fn lex_punct(input: &str, start: usize, current: char, size: usize) -> (CsSyntaxKind, usize) {
    let single = |kind| (kind, start + size);
    match current {
        '{' => single(CsSyntaxKind::LBrace),
        '}' => single(CsSyntaxKind::RBrace),
        '(' => single(CsSyntaxKind::LParen),
        ')' => single(CsSyntaxKind::RParen),
        '[' => single(CsSyntaxKind::LBracket),
        ']' => single(CsSyntaxKind::RBracket),
        ';' => single(CsSyntaxKind::Semicolon),
        ',' => single(CsSyntaxKind::Comma),
        ':' => single(CsSyntaxKind::Colon),
        '.' => single(CsSyntaxKind::Dot),
        '<' => single(CsSyntaxKind::Lt),
        '>' => single(CsSyntaxKind::Gt),
        '?' => single(CsSyntaxKind::Question),
        '~' => single(CsSyntaxKind::Tilde),
        '=' => match next_char(input, start + size) {
            Some(('>', arrow_size)) => (CsSyntaxKind::FatArrow, start + size + arrow_size),
            Some(('=', eq_size)) => (CsSyntaxKind::Operator, start + size + eq_size),
            _ => single(CsSyntaxKind::Equals),
        },
        _ => single(CsSyntaxKind::Operator),
    }
}

/// Map keyword text to its syntax kind
fn keyword_kind(text: &str) -> Option<CsSyntaxKind> {
    let kind = match text {
        "class" => CsSyntaxKind::ClassKw,
        "struct" => CsSyntaxKind::StructKw,
        "interface" => CsSyntaxKind::InterfaceKw,
        "enum" => CsSyntaxKind::EnumKw,
        "namespace" => CsSyntaxKind::NamespaceKw,
        "using" => CsSyntaxKind::UsingKw,
        "delegate" => CsSyntaxKind::DelegateKw,
        "event" => CsSyntaxKind::EventKw,
        "public" => CsSyntaxKind::PublicKw,
        "private" => CsSyntaxKind::PrivateKw,
        "protected" => CsSyntaxKind::ProtectedKw,
        "internal" => CsSyntaxKind::InternalKw,
        "static" => CsSyntaxKind::StaticKw,
        "const" => CsSyntaxKind::ConstKw,
        "readonly" => CsSyntaxKind::ReadonlyKw,
        "sealed" => CsSyntaxKind::SealedKw,
        "abstract" => CsSyntaxKind::AbstractKw,
        "virtual" => CsSyntaxKind::VirtualKw,
        "override" => CsSyntaxKind::OverrideKw,
        "partial" => CsSyntaxKind::PartialKw,
        "async" => CsSyntaxKind::AsyncKw,
        "extern" => CsSyntaxKind::ExternKw,
        "unsafe" => CsSyntaxKind::UnsafeKw,
        "new" => CsSyntaxKind::NewKw,
        "volatile" => CsSyntaxKind::VolatileKw,
        "fixed" => CsSyntaxKind::FixedKw,
        "this" => CsSyntaxKind::ThisKw,
        "operator" => CsSyntaxKind::OperatorKw,
        "implicit" => CsSyntaxKind::ImplicitKw,
        "explicit" => CsSyntaxKind::ExplicitKw,
        "where" => CsSyntaxKind::WhereKw,
        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(tokens: &[CstToken]) -> String {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_lossless_simple_class() {
        let source = "public class Foo\n{\n\tint _x;\n}\n";
        let (tokens, errors) = lex_with_trivia(source);
        assert!(errors.is_empty());
        assert_eq!(joined(&tokens), source);
    }

    #[test]
    fn test_crlf_preserved_verbatim() {
        let source = "class A\r\n{\r\n}\r\n";
        let (tokens, errors) = lex_with_trivia(source);
        assert!(errors.is_empty());
        assert_eq!(joined(&tokens), source);
        let newlines: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == CsSyntaxKind::Newline)
            .collect();
        assert_eq!(newlines.len(), 3);
        assert!(newlines.iter().all(|t| t.text == "\r\n"));
    }

    #[test]
    fn test_region_directives() {
        let source = "\t#region Methods: Public\n\t#endregion\n";
        let (tokens, _) = lex_with_trivia(source);
        let region = tokens
            .iter()
            .find(|t| t.kind == CsSyntaxKind::RegionDirective)
            .expect("region directive");
        assert_eq!(region.text, "#region Methods: Public");
        assert!(
            tokens
                .iter()
                .any(|t| t.kind == CsSyntaxKind::EndRegionDirective)
        );
    }

    #[test]
    fn test_directive_requires_line_start() {
        let source = "int x = a # b;\n#pragma warning disable\n";
        let (tokens, _) = lex_with_trivia(source);
        let directives: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == CsSyntaxKind::Directive)
            .collect();
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].text, "#pragma warning disable");
    }

    #[test]
    fn test_braces_inside_strings_are_opaque() {
        let source = r#"string s = "{not a brace}";"#;
        let (tokens, errors) = lex_with_trivia(source);
        assert!(errors.is_empty());
        assert!(!tokens.iter().any(|t| t.kind == CsSyntaxKind::LBrace));
        let lit = tokens
            .iter()
            .find(|t| t.kind == CsSyntaxKind::StringLit)
            .unwrap();
        assert_eq!(lit.text, r#""{not a brace}""#);
    }

    #[test]
    fn test_verbatim_string_with_doubled_quotes() {
        let source = "var s = @\"line1\nhe said \"\"hi\"\"\";";
        let (tokens, errors) = lex_with_trivia(source);
        assert!(errors.is_empty());
        let lit = tokens
            .iter()
            .find(|t| t.kind == CsSyntaxKind::StringLit)
            .unwrap();
        assert!(lit.text.starts_with("@\""));
        assert!(lit.text.ends_with("\"\"\""));
        assert_eq!(joined(&tokens), source);
    }

    #[test]
    fn test_doc_comment_vs_line_comment() {
        let source = "/// <summary>Doc</summary>\n// plain\n";
        let (tokens, _) = lex_with_trivia(source);
        assert!(tokens.iter().any(|t| t.kind == CsSyntaxKind::DocComment));
        assert!(tokens.iter().any(|t| t.kind == CsSyntaxKind::CommentLine));
    }

    #[test]
    fn test_keywords_and_modifiers() {
        let source = "protected internal const string X = \"v\";";
        let (tokens, _) = lex_with_trivia(source);
        let kinds: Vec<_> = tokens
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .map(|t| t.kind)
            .collect();
        assert_eq!(kinds[0], CsSyntaxKind::ProtectedKw);
        assert_eq!(kinds[1], CsSyntaxKind::InternalKw);
        assert_eq!(kinds[2], CsSyntaxKind::ConstKw);
        assert_eq!(kinds[3], CsSyntaxKind::Ident);
    }

    #[test]
    fn test_fat_arrow() {
        let source = "public int X => 5;";
        let (tokens, _) = lex_with_trivia(source);
        assert!(tokens.iter().any(|t| t.kind == CsSyntaxKind::FatArrow));
    }

    #[test]
    fn test_spans_are_contiguous() {
        let source = "class A { void F() { var s = $\"x={1}\"; } }";
        let (tokens, _) = lex_with_trivia(source);
        let mut pos = 0;
        for token in &tokens {
            assert_eq!(token.span.start, pos);
            pos = token.span.end;
        }
        assert_eq!(pos, source.len());
    }
}
