//! Literal and identifier scanning

use crate::diagnostic::error_codes;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind, TokenLiteral};

impl Lexer {
    /// Scan a string literal; the opening quote is already consumed
    ///
    /// Newlines inside the literal are allowed. There are no escape sequences.
    pub(super) fn string(&mut self) -> Option<Token> {
        while self.peek().is_some_and(|c| c != '"') {
            self.advance();
        }

        if self.is_at_end() {
            self.error(
                error_codes::UNTERMINATED_STRING,
                "Unterminated string".to_string(),
                "string starts here",
            );
            return None;
        }

        self.advance(); // closing "

        let value: String = self.chars[self.start + 1..self.current - 1].iter().collect();
        Some(self.make_token(TokenKind::String).with_literal(TokenLiteral::String(value)))
    }

    /// Scan an integer or double literal; the first digit is already consumed
    pub(super) fn number(&mut self) -> Option<Token> {
        self.digits();

        let is_double = self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit());
        if !is_double {
            return Some(self.make_token(TokenKind::Int));
        }

        self.advance(); // .
        self.digits();

        let lexeme = self.lexeme();
        match lexeme.parse::<f64>() {
            Ok(value) => Some(
                Token::new(TokenKind::Double, lexeme, self.current_span())
                    .with_literal(TokenLiteral::Double(value)),
            ),
            Err(_) => {
                self.error(
                    error_codes::INVALID_LITERAL,
                    format!("Invalid double literal '{}'", lexeme),
                    "not a number",
                );
                None
            }
        }
    }

    /// Scan an identifier or keyword
    pub(super) fn identifier(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.advance();
        }

        let kind = TokenKind::keyword(&self.lexeme()).unwrap_or(TokenKind::Identifier);
        self.make_token(kind)
    }

    fn digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::diagnostic::error_codes;
    use crate::lexer::scan;
    use crate::token::{TokenKind, TokenLiteral};

    #[test]
    fn test_int_literal_keeps_text() {
        let (tokens, _) = scan("1 + 2");
        assert_eq!(tokens[0].kind, TokenKind::Int);
        assert_eq!(tokens[0].lexeme, "1");
        assert_eq!(tokens[0].literal, None);
        assert_eq!(tokens[1].kind, TokenKind::Plus);
        assert_eq!(tokens[2].lexeme, "2");
        assert_eq!(tokens[3].kind, TokenKind::Eof);
    }

    #[test]
    fn test_double_literal_parsed_once() {
        let (tokens, _) = scan("1.5");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Double);
        assert_eq!(tokens[0].literal, Some(TokenLiteral::Double(1.5)));
    }

    #[test]
    fn test_trailing_dot_is_not_a_double() {
        let (tokens, _) = scan("3.");
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Int, TokenKind::Dot, TokenKind::Eof]);
    }

    #[test]
    fn test_huge_int_literal_still_scans() {
        let (tokens, diags) = scan("99999999999999999999999");
        assert!(diags.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::Int);
    }

    #[test]
    fn test_multiline_string_counts_lines() {
        let (tokens, diags) = scan("\"a\nb\" x");
        assert!(diags.is_empty());
        assert_eq!(tokens[0].literal, Some(TokenLiteral::String("a\nb".to_string())));
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!((tokens[1].line(), tokens[1].column()), (2, 4));
    }

    #[test]
    fn test_empty_string() {
        let (tokens, _) = scan("\"\"");
        assert_eq!(tokens[0].literal, Some(TokenLiteral::String(String::new())));
    }

    #[test]
    fn test_unterminated_string() {
        let (tokens, diags) = scan("print(\"oops");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, error_codes::UNTERMINATED_STRING);
        assert_eq!((diags[0].line, diags[0].column), (1, 7));
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }
}
