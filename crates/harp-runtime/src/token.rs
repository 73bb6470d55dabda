//! Token types for lexical analysis
//!
//! Defines all token types recognized by the Harp scanner.

use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token produced by the scanner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The exact source text of this token
    pub lexeme: String,
    /// Value parsed at scan time (double and string literals only)
    pub literal: Option<TokenLiteral>,
    /// Source location
    pub span: Span,
}

/// Literal value attached to a token by the scanner
///
/// Integer literals carry no value here: their text is converted to a
/// machine integer once, when the parser builds the literal node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenLiteral {
    /// Floating-point literal (`1.5`)
    Double(f64),
    /// String literal contents, without the surrounding quotes
    String(String),
}

impl Token {
    /// Create a new token without a literal value
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal: None,
            span,
        }
    }

    /// Attach a literal value
    pub fn with_literal(mut self, literal: TokenLiteral) -> Self {
        self.literal = Some(literal);
        self
    }

    /// Line of the first character (1-based)
    pub fn line(&self) -> u32 {
        self.span.line
    }

    /// Column of the first character (1-based)
    pub fn column(&self) -> u32 {
        self.span.column
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.literal {
            Some(TokenLiteral::Double(value)) => {
                write!(f, "{} {} {}", self.kind.name(), self.lexeme, value)
            }
            Some(TokenLiteral::String(value)) => {
                write!(f, "{} {} {}", self.kind.name(), self.lexeme, value)
            }
            None => write!(f, "{} {}", self.kind.name(), self.lexeme),
        }
    }
}

/// Classification of token types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Single-character tokens
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `-`
    Minus,
    /// `+`
    Plus,
    /// `;`
    Semicolon,
    /// `/`
    Slash,
    /// `*`
    Star,

    // One or two character tokens
    /// `!`
    Bang,
    /// `!=`
    BangEqual,
    /// `=`
    Equal,
    /// `==`
    EqualEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,

    // Literals
    /// Identifier
    Identifier,
    /// String literal (`"hello"`)
    String,
    /// Integer literal (`42`)
    Int,
    /// Floating-point literal (`4.2`)
    Double,

    // Keywords
    /// `and`
    And,
    /// `else`
    Else,
    /// `false`
    False,
    /// `func`
    Func,
    /// `for`
    For,
    /// `if`
    If,
    /// `null`
    Null,
    /// `or`
    Or,
    /// `return`
    Return,
    /// `true`
    True,
    /// `while`
    While,
    /// `struct` (reserved)
    Struct,

    // Primitive type keywords
    /// `string`
    StringType,
    /// `int`
    IntType,
    /// `double`
    DoubleType,
    /// `bool`
    BoolType,

    /// End of input
    Eof,
}

impl TokenKind {
    /// Keyword kind spelled by `s`, if any
    pub fn keyword(s: &str) -> Option<TokenKind> {
        match s {
            "and" => Some(TokenKind::And),
            "else" => Some(TokenKind::Else),
            "false" => Some(TokenKind::False),
            "func" => Some(TokenKind::Func),
            "for" => Some(TokenKind::For),
            "if" => Some(TokenKind::If),
            "null" => Some(TokenKind::Null),
            "or" => Some(TokenKind::Or),
            "return" => Some(TokenKind::Return),
            "true" => Some(TokenKind::True),
            "while" => Some(TokenKind::While),
            "struct" => Some(TokenKind::Struct),
            "string" => Some(TokenKind::StringType),
            "int" => Some(TokenKind::IntType),
            "double" => Some(TokenKind::DoubleType),
            "bool" => Some(TokenKind::BoolType),
            _ => None,
        }
    }

    /// Whether this kind names a primitive type (`string int double bool`)
    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::StringType | TokenKind::IntType | TokenKind::DoubleType | TokenKind::BoolType
        )
    }

    /// Source spelling of this token kind, used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Minus => "-",
            TokenKind::Plus => "+",
            TokenKind::Semicolon => ";",
            TokenKind::Slash => "/",
            TokenKind::Star => "*",
            TokenKind::Bang => "!",
            TokenKind::BangEqual => "!=",
            TokenKind::Equal => "=",
            TokenKind::EqualEqual => "==",
            TokenKind::Greater => ">",
            TokenKind::GreaterEqual => ">=",
            TokenKind::Less => "<",
            TokenKind::LessEqual => "<=",
            TokenKind::Identifier => "identifier",
            TokenKind::String => "string literal",
            TokenKind::Int => "integer literal",
            TokenKind::Double => "double literal",
            TokenKind::And => "and",
            TokenKind::Else => "else",
            TokenKind::False => "false",
            TokenKind::Func => "func",
            TokenKind::For => "for",
            TokenKind::If => "if",
            TokenKind::Null => "null",
            TokenKind::Or => "or",
            TokenKind::Return => "return",
            TokenKind::True => "true",
            TokenKind::While => "while",
            TokenKind::Struct => "struct",
            TokenKind::StringType => "string",
            TokenKind::IntType => "int",
            TokenKind::DoubleType => "double",
            TokenKind::BoolType => "bool",
            TokenKind::Eof => "end of input",
        }
    }

    /// Upper-case name used by the token dump (`LEFT_PAREN`, `INT`, ...)
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Minus => "MINUS",
            TokenKind::Plus => "PLUS",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Slash => "SLASH",
            TokenKind::Star => "STAR",
            TokenKind::Bang => "BANG",
            TokenKind::BangEqual => "BANG_EQUAL",
            TokenKind::Equal => "EQUAL",
            TokenKind::EqualEqual => "EQUAL_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::String => "STRING",
            TokenKind::Int => "INT",
            TokenKind::Double => "DOUBLE",
            TokenKind::And => "AND",
            TokenKind::Else => "ELSE",
            TokenKind::False => "FALSE",
            TokenKind::Func => "FUNC",
            TokenKind::For => "FOR",
            TokenKind::If => "IF",
            TokenKind::Null => "NULL",
            TokenKind::Or => "OR",
            TokenKind::Return => "RETURN",
            TokenKind::True => "TRUE",
            TokenKind::While => "WHILE",
            TokenKind::Struct => "STRUCT",
            TokenKind::StringType => "STRING_TYPE",
            TokenKind::IntType => "INT_TYPE",
            TokenKind::DoubleType => "DOUBLE_TYPE",
            TokenKind::BoolType => "BOOL_TYPE",
            TokenKind::Eof => "EOF",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new(TokenKind::Int, "42", Span::new(0, 2));
        assert_eq!(token.kind, TokenKind::Int);
        assert_eq!(token.lexeme, "42");
        assert_eq!(token.literal, None);
        assert_eq!(token.span, Span::new(0, 2));
    }

    #[test]
    fn test_keyword_detection() {
        assert_eq!(TokenKind::keyword("and"), Some(TokenKind::And));
        assert_eq!(TokenKind::keyword("func"), Some(TokenKind::Func));
        assert_eq!(TokenKind::keyword("return"), Some(TokenKind::Return));
        assert_eq!(TokenKind::keyword("struct"), Some(TokenKind::Struct));
        assert_eq!(TokenKind::keyword("string"), Some(TokenKind::StringType));
        assert_eq!(TokenKind::keyword("double"), Some(TokenKind::DoubleType));
    }

    #[test]
    fn test_non_keyword() {
        assert_eq!(TokenKind::keyword("foo"), None);
        assert_eq!(TokenKind::keyword("fn"), None);
        assert_eq!(TokenKind::keyword("If"), None); // Case-sensitive
    }

    #[test]
    fn test_type_keywords() {
        for kind in [
            TokenKind::StringType,
            TokenKind::IntType,
            TokenKind::DoubleType,
            TokenKind::BoolType,
        ] {
            assert!(kind.is_type_keyword());
        }
        assert!(!TokenKind::Func.is_type_keyword());
    }

    #[test]
    fn test_display_includes_literal() {
        let token = Token::new(TokenKind::Double, "1.5", Span::new(0, 3))
            .with_literal(TokenLiteral::Double(1.5));
        assert_eq!(token.to_string(), "DOUBLE 1.5 1.5");

        let token = Token::new(TokenKind::Plus, "+", Span::new(0, 1));
        assert_eq!(token.to_string(), "PLUS +");
    }
}
