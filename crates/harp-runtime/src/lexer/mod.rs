//! Lexical analysis (scanning)
//!
//! The scanner turns Harp source text into a token sequence terminated by a
//! single EOF token. Illegal characters and unterminated strings are reported
//! as diagnostics and scanning carries on with the next character.

use crate::diagnostic::{error_codes, Diagnostic};
use crate::span::Span;
use crate::token::{Token, TokenKind};

mod literals;

/// Scan `source` into tokens plus any scan diagnostics
pub fn scan(source: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    Lexer::new(source).tokenize()
}

/// Scanner state for one source text
pub struct Lexer {
    /// Characters of the source
    pub(super) chars: Vec<char>,
    /// Index of the next unread character
    pub(super) current: usize,
    /// Line of the next unread character (1-based)
    pub(super) line: u32,
    /// Column of the next unread character (1-based)
    pub(super) column: u32,
    /// Offset where the current token starts
    pub(super) start: usize,
    pub(super) start_line: u32,
    pub(super) start_column: u32,
    pub(super) diagnostics: Vec<Diagnostic>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            current: 0,
            line: 1,
            column: 1,
            start: 0,
            start_line: 1,
            start_column: 1,
            diagnostics: Vec::new(),
        }
    }

    /// Scan the whole input, returning tokens (always ending in EOF) and diagnostics
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<Diagnostic>) {
        let mut tokens = Vec::new();

        loop {
            self.skip_trivia();
            self.start = self.current;
            self.start_line = self.line;
            self.start_column = self.column;

            if self.is_at_end() {
                tokens.push(self.make_token(TokenKind::Eof));
                break;
            }

            if let Some(token) = self.scan_token() {
                tokens.push(token);
            }
        }

        tracing::debug!(
            tokens = tokens.len(),
            errors = self.diagnostics.len(),
            "scanned source"
        );
        (tokens, self.diagnostics)
    }

    /// Scan one token starting at `self.start`; `None` when the character was rejected
    fn scan_token(&mut self) -> Option<Token> {
        let c = self.advance();

        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '-' => TokenKind::Minus,
            '+' => TokenKind::Plus,
            ';' => TokenKind::Semicolon,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '!' => self.either('=', TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.either('=', TokenKind::EqualEqual, TokenKind::Equal),
            '<' => self.either('=', TokenKind::LessEqual, TokenKind::Less),
            '>' => self.either('=', TokenKind::GreaterEqual, TokenKind::Greater),
            '"' => return self.string(),
            c if c.is_ascii_digit() => return self.number(),
            c if c.is_alphabetic() || c == '_' => return Some(self.identifier()),
            other => {
                self.error(
                    error_codes::ILLEGAL_CHARACTER,
                    format!("Unexpected character '{}'", other),
                    "illegal character",
                );
                return None;
            }
        };

        Some(self.make_token(kind))
    }

    /// Skip whitespace and `//` comments
    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' | '\n' => {
                    self.advance();
                }
                '/' if self.peek_next() == Some('/') => {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn either(&mut self, next: char, matched: TokenKind, single: TokenKind) -> TokenKind {
        if self.match_char(next) {
            matched
        } else {
            single
        }
    }

    pub(super) fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    /// Consume one character, keeping line and column current
    pub(super) fn advance(&mut self) -> char {
        let c = self.chars[self.current];
        self.current += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }

    pub(super) fn peek(&self) -> Option<char> {
        self.chars.get(self.current).copied()
    }

    pub(super) fn peek_next(&self) -> Option<char> {
        self.chars.get(self.current + 1).copied()
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn lexeme(&self) -> String {
        self.chars[self.start..self.current].iter().collect()
    }

    pub(super) fn current_span(&self) -> Span {
        Span::at(self.start, self.current, self.start_line, self.start_column)
    }

    pub(super) fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.lexeme(), self.current_span())
    }

    pub(super) fn error(&mut self, code: &str, message: String, label: &str) {
        let diag = Diagnostic::error_with_code(code, message, self.current_span())
            .with_lexeme(self.lexeme())
            .with_label(label);
        self.diagnostics.push(diag);
    }
}
