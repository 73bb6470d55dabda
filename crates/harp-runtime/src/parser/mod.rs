//! Parsing (tokens to AST)
//!
//! Recursive descent for declarations and statements, precedence climbing
//! for expressions. Errors are collected as diagnostics; after each one the
//! parser synchronizes to the next statement boundary and leaves a
//! `Stmt::Error` placeholder behind.

mod expr;
mod stmt;

use crate::ast::*;
use crate::diagnostic::{error_codes, Diagnostic};
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Parse a token sequence into a program plus parse diagnostics
pub fn parse(tokens: Vec<Token>) -> (Program, Vec<Diagnostic>) {
    Parser::new(tokens).parse()
}

/// Parser state for building an AST from tokens
pub struct Parser {
    pub(super) tokens: Vec<Token>,
    pub(super) current: usize,
    pub(super) diagnostics: Vec<Diagnostic>,
    /// Nesting depth of function bodies being parsed
    pub(super) function_depth: usize,
    /// Nesting depth of `{ }` blocks being parsed
    pub(super) block_depth: usize,
    /// Set when a complete statement lacked its `;`; the offending token
    /// then starts the next statement
    pub(super) resume_at_current: bool,
}

/// Binding strength of binary operators, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(super) enum Precedence {
    Lowest,
    Or,         // or
    And,        // and
    Equality,   // == !=
    Comparison, // < <= > >=
    Term,       // + -
    Factor,     // * /
    Unary,      // ! -
    Call,       // ()
}

impl Parser {
    /// Create a parser; an EOF token is appended if the input lacks one
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let span = tokens.last().map_or(Span::at(0, 0, 1, 1), |t| {
                Span::at(t.span.end, t.span.end, t.span.line, t.span.column + t.span.len() as u32)
            });
            tokens.push(Token::new(TokenKind::Eof, "", span));
        }
        Self {
            tokens,
            current: 0,
            diagnostics: Vec::new(),
            function_depth: 0,
            block_depth: 0,
            resume_at_current: false,
        }
    }

    /// Parse every declaration up to EOF
    pub fn parse(mut self) -> (Program, Vec<Diagnostic>) {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.declaration());
        }

        let errors = self.diagnostics.iter().filter(|d| d.is_error()).count();
        tracing::debug!(statements = statements.len(), errors, "parsed program");
        (Program { statements }, self.diagnostics)
    }

    /// Parse one declaration, recovering to an `Error` statement on failure
    pub(super) fn declaration(&mut self) -> Stmt {
        let start = self.current;
        let start_span = self.peek().span;
        match self.parse_declaration() {
            Ok(stmt) => stmt,
            Err(()) => {
                self.synchronize(start);
                let end = if self.current > start {
                    self.previous().span
                } else {
                    start_span
                };
                Stmt::Error(start_span.merge(end))
            }
        }
    }

    // === Token helpers ===

    /// Consume the current token; stays put on EOF
    pub(super) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    pub(super) fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    /// Most recently consumed token (the first token before anything is consumed)
    pub(super) fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    pub(super) fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    pub(super) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the `;` that ends a statement
    ///
    /// When it is missing, the statement before it is complete, so recovery
    /// resumes at the token found in its place.
    pub(super) fn consume_terminator(&mut self, message: &str) -> Result<Span, ()> {
        if self.check(TokenKind::Semicolon) {
            Ok(self.advance().span)
        } else {
            self.error(message);
            self.resume_at_current = true;
            Err(())
        }
    }

    /// Consume a token of the given kind or record `message` at the current token
    pub(super) fn consume(&mut self, kind: TokenKind, message: &str) -> Result<&Token, ()> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            self.error(message);
            Err(())
        }
    }

    pub(super) fn consume_identifier(&mut self, context: &str) -> Result<Identifier, ()> {
        if self.check(TokenKind::Identifier) {
            let token = self.advance();
            Ok(Identifier {
                name: token.lexeme.clone(),
                span: token.span,
            })
        } else if TokenKind::keyword(&self.peek().lexeme).is_some() {
            let message = format!("Cannot use keyword '{}' as {}", self.peek().lexeme, context);
            self.error(&message);
            // The keyword stood in for the name, so it belongs to this statement.
            self.advance();
            Err(())
        } else {
            self.error(&format!("Expected {}", context));
            Err(())
        }
    }

    pub(super) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Record a syntax error at the current token
    pub(super) fn error(&mut self, message: &str) {
        let token = self.peek().clone();
        self.error_at(&token, error_codes::SYNTAX_ERROR, message);
    }

    pub(super) fn error_at(&mut self, token: &Token, code: &str, message: &str) {
        let (found, length) = if token.kind == TokenKind::Eof {
            (TokenKind::Eof.as_str().to_string(), 1)
        } else {
            (format!("'{}'", token.lexeme), token.span.len())
        };
        let mut diag = Diagnostic::error_with_code(code, message, token.span)
            .with_lexeme(token.lexeme.clone())
            .with_label(format!("found {}", found));
        diag.length = length;
        self.diagnostics.push(diag);
    }

    /// Skip to the start of the next statement
    ///
    /// `start` is the cursor position where the failed declaration began.
    /// The offending token is kept when it can begin the next statement and
    /// the failed declaration already consumed something; otherwise tokens
    /// are skipped until just after a `;` or in front of a statement keyword.
    /// Inside a block the closing `}` is never skipped.
    pub(super) fn synchronize(&mut self, start: usize) {
        let resume_here = std::mem::take(&mut self.resume_at_current);
        if self.current > start && (resume_here || self.at_statement_boundary()) {
            return;
        }

        while !self.is_at_end() {
            if self.advance().kind == TokenKind::Semicolon || self.at_statement_boundary() {
                return;
            }
        }
    }

    /// Whether the current token begins a statement or closes the open block
    fn at_statement_boundary(&self) -> bool {
        match self.peek().kind {
            TokenKind::Func
            | TokenKind::IntType
            | TokenKind::DoubleType
            | TokenKind::StringType
            | TokenKind::BoolType
            | TokenKind::Struct
            | TokenKind::For
            | TokenKind::If
            | TokenKind::While
            | TokenKind::Return => true,
            TokenKind::RightBrace => self.block_depth > 0,
            _ => false,
        }
    }
}
