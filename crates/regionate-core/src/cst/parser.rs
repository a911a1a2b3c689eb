//! Structural parser for the C# subset
//!
//! This module builds a hierarchical CST from tokens, creating proper nodes
//! for namespaces, type declarations, and their members. It only recognizes
//! the structure the region engine needs: everything inside method bodies,
//! initializers, and enum bodies is consumed as raw balanced token runs.
//!
//! Trivia between declarations stays attached to the enclosing container
//! node, so a declaration node's extent is exactly its token span. Trailing
//! same-line trivia after a member's last token also stays at container
//! level for the same reason.

use rowan::Checkpoint;

use super::lexer::{CstToken, LexerError};
use super::{CstBuilder, CsSyntaxKind, CsSyntaxNode};

/// Parse C# source into a hierarchical CST
///
/// The returned tree is lossless: its text equals the input exactly.
/// Malformed input that still lexes (unbalanced braces at end of file)
/// parses into an error-tolerant tree.
pub fn parse_source(source: &str) -> (CsSyntaxNode, Vec<LexerError>) {
    let (tokens, errors) = super::lex_with_trivia(source);
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    (parser.finish(), errors)
}

/// Token stream parser
struct Parser<'a> {
    tokens: &'a [CstToken],
    pos: usize,
    builder: CstBuilder,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [CstToken]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: CstBuilder::new(),
        }
    }

    fn finish(self) -> CsSyntaxNode {
        self.builder.finish()
    }

    // ------------------------------------------------------------------
    // Token access
    // ------------------------------------------------------------------

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn current_kind(&self) -> CsSyntaxKind {
        self.tokens
            .get(self.pos)
            .map(|t| t.kind)
            .unwrap_or(CsSyntaxKind::Eof)
    }

    fn at_trivia(&self) -> bool {
        self.current_kind().is_trivia()
    }

    /// First non-trivia kind at or after the given token index
    fn significant_from(&self, mut idx: usize) -> (CsSyntaxKind, usize) {
        while let Some(token) = self.tokens.get(idx) {
            if !token.kind.is_trivia() {
                return (token.kind, idx);
            }
            idx += 1;
        }
        (CsSyntaxKind::Eof, self.tokens.len())
    }

    fn peek_significant(&self) -> CsSyntaxKind {
        self.significant_from(self.pos).0
    }

    fn peek_significant_after_current(&self) -> CsSyntaxKind {
        self.significant_from(self.pos + 1).0
    }

    /// Add the current token to the tree and advance
    fn bump(&mut self) {
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind, &token.text);
            self.pos += 1;
        }
    }

    /// Bump while the current token is trivia
    fn consume_trivia(&mut self) {
        while self.at_trivia() {
            self.bump();
        }
    }

    /// If the next significant token has the given kind, consume the
    /// intervening trivia and the token (inside the current node)
    fn try_consume_significant(&mut self, kind: CsSyntaxKind) -> bool {
        if self.peek_significant() == kind {
            self.consume_trivia();
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume a balanced run from the current `open` token through its
    /// matching `close` token, trivia included
    fn consume_balanced(&mut self, open: CsSyntaxKind, close: CsSyntaxKind) {
        debug_assert_eq!(self.current_kind(), open);
        let mut depth = 0usize;
        while !self.at_end() {
            let kind = self.current_kind();
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth = depth.saturating_sub(1);
                self.bump();
                if depth == 0 {
                    return;
                }
                continue;
            }
            self.bump();
        }
    }

    /// Bump tokens until a `;` at zero bracket depth is consumed
    fn consume_until_semicolon(&mut self) {
        while !self.at_end() {
            match self.current_kind() {
                CsSyntaxKind::Semicolon => {
                    self.bump();
                    return;
                }
                CsSyntaxKind::LBrace => self.consume_balanced(CsSyntaxKind::LBrace, CsSyntaxKind::RBrace),
                CsSyntaxKind::LParen => self.consume_balanced(CsSyntaxKind::LParen, CsSyntaxKind::RParen),
                CsSyntaxKind::LBracket => {
                    self.consume_balanced(CsSyntaxKind::LBracket, CsSyntaxKind::RBracket)
                }
                CsSyntaxKind::RBrace => return, // don't run past the enclosing body
                _ => self.bump(),
            }
        }
    }

    // ------------------------------------------------------------------
    // Top level
    // ------------------------------------------------------------------

    fn parse_source_file(&mut self) {
        self.builder.start_node(CsSyntaxKind::SourceFile);

        while !self.at_end() {
            let before = self.pos;
            if self.at_trivia() {
                self.consume_trivia();
                continue;
            }
            match self.current_kind() {
                CsSyntaxKind::UsingKw => self.parse_using(),
                CsSyntaxKind::NamespaceKw => self.parse_namespace(),
                kind if at_declaration_start(kind) => self.parse_declaration(false),
                _ => self.bump(), // recovery: keep the token at file level
            }
            if self.pos == before {
                self.bump();
            }
        }

        self.builder.finish_node(); // SOURCE_FILE
    }

    /// Parse a using directive up to and including its semicolon
    fn parse_using(&mut self) {
        self.builder.start_node(CsSyntaxKind::UsingDirective);
        self.bump(); // using
        self.consume_until_semicolon();
        self.builder.finish_node();
    }

    /// Parse a namespace declaration (block-bodied or file-scoped)
    ///
    /// A file-scoped namespace (`namespace X;`) contains only its own
    /// tokens; the declarations that follow stay at file level.
    fn parse_namespace(&mut self) {
        self.builder.start_node(CsSyntaxKind::NamespaceDecl);
        self.bump(); // namespace

        // Qualified name
        loop {
            match self.current_kind() {
                kind if kind.is_trivia() => self.bump(),
                CsSyntaxKind::Ident | CsSyntaxKind::Dot => self.bump(),
                _ => break,
            }
        }

        match self.current_kind() {
            CsSyntaxKind::Semicolon => {
                self.bump();
            }
            CsSyntaxKind::LBrace => {
                self.bump();
                while !self.at_end() {
                    let before = self.pos;
                    if self.at_trivia() {
                        self.consume_trivia();
                        continue;
                    }
                    match self.current_kind() {
                        CsSyntaxKind::RBrace => {
                            self.bump();
                            break;
                        }
                        CsSyntaxKind::UsingKw => self.parse_using(),
                        CsSyntaxKind::NamespaceKw => self.parse_namespace(),
                        kind if at_declaration_start(kind) => self.parse_declaration(false),
                        _ => self.bump(),
                    }
                    if self.pos == before {
                        self.bump();
                    }
                }
            }
            _ => {}
        }

        self.builder.finish_node();
    }

    // ------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------

    /// Parse a type or member declaration starting at the current token
    ///
    /// Attribute lists and the modifier run are consumed first; the node
    /// kind is decided afterwards and wrapped retroactively at the
    /// checkpoint, so the node's extent starts at its first token.
    fn parse_declaration(&mut self, in_type_body: bool) {
        let cp = self.builder.checkpoint();

        // Attribute lists
        while self.current_kind() == CsSyntaxKind::LBracket {
            self.parse_attribute_list();
            self.consume_trivia();
        }

        // Modifier run
        let mut has_const = false;
        while self.current_kind().is_modifier() {
            if self.current_kind() == CsSyntaxKind::ConstKw {
                has_const = true;
            }
            self.bump();
            self.consume_trivia();
        }

        match self.current_kind() {
            CsSyntaxKind::ClassKw
            | CsSyntaxKind::StructKw
            | CsSyntaxKind::InterfaceKw
            | CsSyntaxKind::EnumKw => self.parse_type_rest(cp),
            CsSyntaxKind::DelegateKw => {
                self.bump();
                self.consume_until_semicolon();
                self.builder.start_node_at(cp, CsSyntaxKind::DelegateDecl);
                self.builder.finish_node();
            }
            CsSyntaxKind::EventKw => {
                self.bump();
                self.parse_event_rest(cp);
            }
            _ if in_type_body => self.parse_member_rest(cp, has_const),
            _ => {
                // Not a declaration after all; wrap what we consumed
                self.bump();
                self.builder.start_node_at(cp, CsSyntaxKind::Error);
                self.builder.finish_node();
            }
        }
    }

    /// Parse the rest of a class/struct/interface/enum declaration
    fn parse_type_rest(&mut self, cp: Checkpoint) {
        let keyword = self.current_kind();
        let node_kind = match keyword {
            CsSyntaxKind::ClassKw => CsSyntaxKind::ClassDecl,
            CsSyntaxKind::StructKw => CsSyntaxKind::StructDecl,
            CsSyntaxKind::InterfaceKw => CsSyntaxKind::InterfaceDecl,
            _ => CsSyntaxKind::EnumDecl,
        };
        self.builder.start_node_at(cp, node_kind);
        self.bump(); // keyword
        self.consume_trivia();

        if self.current_kind() == CsSyntaxKind::Ident {
            self.bump();
        }

        // Header: generic parameters, base list, constraint clauses
        loop {
            match self.current_kind() {
                CsSyntaxKind::LBrace | CsSyntaxKind::Eof => break,
                CsSyntaxKind::Semicolon => {
                    // Bodiless declaration (e.g. partial stub)
                    self.bump();
                    self.builder.finish_node();
                    return;
                }
                CsSyntaxKind::RBrace => {
                    // Unbalanced input; stop before the enclosing close brace
                    self.builder.finish_node();
                    return;
                }
                _ => {
                    if self.at_end() {
                        break;
                    }
                    self.bump();
                }
            }
        }

        if self.current_kind() == CsSyntaxKind::LBrace {
            if node_kind == CsSyntaxKind::EnumDecl {
                self.parse_enum_body();
            } else {
                self.parse_type_body();
            }
            // Optional trailing semicolon belongs to the declaration
            self.try_consume_significant(CsSyntaxKind::Semicolon);
        }

        self.builder.finish_node();
    }

    /// Parse a brace-delimited class/struct/interface body
    fn parse_type_body(&mut self) {
        self.builder.start_node(CsSyntaxKind::TypeBody);
        self.bump(); // {

        while !self.at_end() {
            let before = self.pos;
            if self.at_trivia() {
                self.consume_trivia();
                continue;
            }
            match self.current_kind() {
                CsSyntaxKind::RBrace => {
                    self.bump();
                    break;
                }
                // Stray semicolons are legal in type bodies
                CsSyntaxKind::Semicolon => self.bump(),
                _ => self.parse_declaration(true),
            }
            if self.pos == before {
                self.bump();
            }
        }

        self.builder.finish_node();
    }

    /// Parse an enum body as an opaque balanced token run
    fn parse_enum_body(&mut self) {
        self.builder.start_node(CsSyntaxKind::EnumBody);
        self.consume_balanced(CsSyntaxKind::LBrace, CsSyntaxKind::RBrace);
        self.builder.finish_node();
    }

    /// Parse an attribute list `[...]`
    fn parse_attribute_list(&mut self) {
        self.builder.start_node(CsSyntaxKind::AttributeList);
        self.consume_balanced(CsSyntaxKind::LBracket, CsSyntaxKind::RBracket);
        self.builder.finish_node();
    }

    /// Parse the rest of an event declaration (field-like or with
    /// add/remove accessors)
    fn parse_event_rest(&mut self, cp: Checkpoint) {
        while !self.at_end() {
            match self.current_kind() {
                CsSyntaxKind::Semicolon => {
                    self.bump();
                    break;
                }
                CsSyntaxKind::LBrace => {
                    self.consume_balanced(CsSyntaxKind::LBrace, CsSyntaxKind::RBrace);
                    break;
                }
                CsSyntaxKind::RBrace => break,
                _ => self.bump(),
            }
        }
        self.builder.start_node_at(cp, CsSyntaxKind::EventDecl);
        self.builder.finish_node();
    }

    /// Parse the rest of a member whose kind is decided by its signature
    /// shape: constructor, method, field, constant, property, or a
    /// construct the eight-kind model does not cover
    fn parse_member_rest(&mut self, cp: Checkpoint, has_const: bool) {
        let field_kind = if has_const {
            CsSyntaxKind::ConstantDecl
        } else {
            CsSyntaxKind::FieldDecl
        };

        let mut ident_count = 0usize;
        let mut unknown = false;
        let mut tuple_return = false;
        let kind = loop {
            match self.current_kind() {
                k if k.is_trivia() => self.bump(),
                CsSyntaxKind::OperatorKw | CsSyntaxKind::ImplicitKw | CsSyntaxKind::ExplicitKw => {
                    unknown = true;
                    self.bump();
                }
                CsSyntaxKind::Tilde => {
                    // Finalizer
                    unknown = true;
                    self.bump();
                }
                CsSyntaxKind::ThisKw => {
                    // Indexer
                    if self.peek_significant_after_current() == CsSyntaxKind::LBracket {
                        unknown = true;
                    }
                    self.bump();
                }
                CsSyntaxKind::Lt => {
                    self.consume_balanced(CsSyntaxKind::Lt, CsSyntaxKind::Gt);
                }
                CsSyntaxKind::LBracket => {
                    // Array type suffix in the signature
                    self.consume_balanced(CsSyntaxKind::LBracket, CsSyntaxKind::RBracket);
                }
                CsSyntaxKind::LParen => {
                    self.consume_balanced(CsSyntaxKind::LParen, CsSyntaxKind::RParen);
                    // A tuple return type is followed by more signature
                    // tokens; a parameter list is followed by the tail
                    if self.peek_significant() == CsSyntaxKind::Ident && ident_count == 0 {
                        tuple_return = true;
                        continue;
                    }
                    self.parse_method_tail();
                    break if unknown {
                        CsSyntaxKind::UnknownMemberDecl
                    } else if ident_count == 1 && !tuple_return {
                        CsSyntaxKind::ConstructorDecl
                    } else {
                        CsSyntaxKind::MethodDecl
                    };
                }
                CsSyntaxKind::LBrace => {
                    self.consume_balanced(CsSyntaxKind::LBrace, CsSyntaxKind::RBrace);
                    // Optional property initializer: `{ get; set; } = value;`
                    if self.peek_significant() == CsSyntaxKind::Equals {
                        self.consume_trivia();
                        self.consume_until_semicolon();
                    }
                    break if unknown {
                        CsSyntaxKind::UnknownMemberDecl
                    } else {
                        CsSyntaxKind::PropertyDecl
                    };
                }
                CsSyntaxKind::FatArrow => {
                    self.consume_until_semicolon();
                    break if unknown {
                        CsSyntaxKind::UnknownMemberDecl
                    } else {
                        CsSyntaxKind::PropertyDecl
                    };
                }
                CsSyntaxKind::Equals => {
                    self.consume_until_semicolon();
                    break if unknown { CsSyntaxKind::UnknownMemberDecl } else { field_kind };
                }
                CsSyntaxKind::Semicolon => {
                    self.bump();
                    break if unknown { CsSyntaxKind::UnknownMemberDecl } else { field_kind };
                }
                CsSyntaxKind::Ident => {
                    ident_count += 1;
                    self.bump();
                }
                CsSyntaxKind::RBrace | CsSyntaxKind::Eof => {
                    break CsSyntaxKind::UnknownMemberDecl;
                }
                _ => self.bump(),
            }
            if self.at_end() {
                break CsSyntaxKind::UnknownMemberDecl;
            }
        };

        self.builder.start_node_at(cp, kind);
        self.builder.finish_node();
    }

    /// Consume a method/constructor tail after the parameter list:
    /// constructor initializer, constraint clauses, then a block body,
    /// expression body, or plain semicolon
    fn parse_method_tail(&mut self) {
        while !self.at_end() {
            match self.current_kind() {
                k if k.is_trivia() => self.bump(),
                CsSyntaxKind::LBrace => {
                    self.consume_balanced(CsSyntaxKind::LBrace, CsSyntaxKind::RBrace);
                    return;
                }
                CsSyntaxKind::FatArrow => {
                    self.consume_until_semicolon();
                    return;
                }
                CsSyntaxKind::Semicolon => {
                    self.bump();
                    return;
                }
                CsSyntaxKind::LParen => {
                    // Constructor initializer argument list
                    self.consume_balanced(CsSyntaxKind::LParen, CsSyntaxKind::RParen);
                }
                CsSyntaxKind::RBrace => return, // unbalanced input
                _ => self.bump(),
            }
        }
    }
}

/// Can this token kind start a type or member declaration?
fn at_declaration_start(kind: CsSyntaxKind) -> bool {
    kind.is_modifier()
        || matches!(
            kind,
            CsSyntaxKind::LBracket
                | CsSyntaxKind::ClassKw
                | CsSyntaxKind::StructKw
                | CsSyntaxKind::InterfaceKw
                | CsSyntaxKind::EnumKw
                | CsSyntaxKind::DelegateKw
                | CsSyntaxKind::EventKw
        )
}
