//! Expression parsing (precedence climbing)

use crate::ast::*;
use crate::diagnostic::error_codes;
use crate::parser::{Parser, Precedence};
use crate::token::{TokenKind, TokenLiteral};

impl Parser {
    /// Parse an expression, assignment included
    pub(super) fn parse_expression(&mut self) -> Result<Expr, ()> {
        self.parse_assignment()
    }

    /// Assignment is right-associative and binds weakest
    ///
    /// A non-variable target is reported, its right-hand side is still
    /// consumed, and the left expression is returned unchanged.
    fn parse_assignment(&mut self) -> Result<Expr, ()> {
        let target = self.parse_precedence(Precedence::Lowest)?;

        if !self.check(TokenKind::Equal) {
            return Ok(target);
        }

        let equals = self.advance().clone();
        let value = self.parse_assignment()?;

        match target {
            Expr::Variable(name) => Ok(Expr::Assign(AssignExpr {
                span: name.span.merge(value.span()),
                name,
                value: Box::new(value),
            })),
            other => {
                self.error_at(
                    &equals,
                    error_codes::INVALID_ASSIGNMENT_TARGET,
                    "Invalid assignment target",
                );
                Ok(other)
            }
        }
    }

    pub(super) fn parse_precedence(&mut self, precedence: Precedence) -> Result<Expr, ()> {
        let mut left = self.parse_prefix()?;

        while precedence < self.current_precedence() {
            left = if self.check(TokenKind::LeftParen) {
                self.parse_call(left)?
            } else {
                self.parse_binary(left)?
            };
        }

        Ok(left)
    }

    fn current_precedence(&self) -> Precedence {
        match self.peek().kind {
            TokenKind::Or => Precedence::Or,
            TokenKind::And => Precedence::And,
            TokenKind::EqualEqual | TokenKind::BangEqual => Precedence::Equality,
            TokenKind::Less
            | TokenKind::LessEqual
            | TokenKind::Greater
            | TokenKind::GreaterEqual => Precedence::Comparison,
            TokenKind::Plus | TokenKind::Minus => Precedence::Term,
            TokenKind::Star | TokenKind::Slash => Precedence::Factor,
            TokenKind::LeftParen => Precedence::Call,
            _ => Precedence::Lowest,
        }
    }

    fn parse_prefix(&mut self) -> Result<Expr, ()> {
        let token = self.peek().clone();
        let literal = match token.kind {
            TokenKind::Int => match token.lexeme.parse::<i64>() {
                Ok(value) => Literal::Int(value),
                Err(_) => {
                    let message = format!("Integer literal '{}' is out of range", token.lexeme);
                    self.error_at(&token, error_codes::INTEGER_LITERAL_RANGE, &message);
                    return Err(());
                }
            },
            TokenKind::Double => match &token.literal {
                Some(TokenLiteral::Double(value)) => Literal::Double(*value),
                _ => {
                    let message = format!("Double token '{}' carries no value", token.lexeme);
                    self.error_at(&token, error_codes::INVALID_LITERAL, &message);
                    return Err(());
                }
            },
            TokenKind::String => match &token.literal {
                Some(TokenLiteral::String(value)) => Literal::String(value.clone()),
                _ => {
                    let message = format!("String token {} carries no value", token.lexeme);
                    self.error_at(&token, error_codes::INVALID_LITERAL, &message);
                    return Err(());
                }
            },
            TokenKind::True => Literal::Bool(true),
            TokenKind::False => Literal::Bool(false),
            TokenKind::Null => Literal::Null,
            TokenKind::Identifier => {
                self.advance();
                return Ok(Expr::Variable(Identifier {
                    name: token.lexeme,
                    span: token.span,
                }));
            }
            TokenKind::LeftParen => return self.parse_group(),
            TokenKind::Minus | TokenKind::Bang => return self.parse_unary(),
            _ => {
                self.error("Expected expression");
                return Err(());
            }
        };

        self.advance();
        Ok(Expr::Literal(literal, token.span))
    }

    fn parse_group(&mut self) -> Result<Expr, ()> {
        let start = self.consume(TokenKind::LeftParen, "Expected '('")?.span;
        let expr = self.parse_expression()?;
        let end = self
            .consume(TokenKind::RightParen, "Expected ')' after expression")?
            .span;

        Ok(Expr::Group(GroupExpr {
            expr: Box::new(expr),
            span: start.merge(end),
        }))
    }

    fn parse_unary(&mut self) -> Result<Expr, ()> {
        let op_token = self.advance();
        let op_span = op_token.span;
        let op = if op_token.kind == TokenKind::Minus {
            UnaryOp::Negate
        } else {
            UnaryOp::Not
        };

        let operand = self.parse_precedence(Precedence::Unary)?;
        Ok(Expr::Unary(UnaryExpr {
            op,
            span: op_span.merge(operand.span()),
            expr: Box::new(operand),
        }))
    }

    /// Parse the right operand of a binary or logical operator
    fn parse_binary(&mut self, left: Expr) -> Result<Expr, ()> {
        let precedence = self.current_precedence();
        let op_kind = self.advance().kind;
        let right = self.parse_precedence(precedence)?;
        let span = left.span().merge(right.span());

        let logical = match op_kind {
            TokenKind::And => Some(LogicalOp::And),
            TokenKind::Or => Some(LogicalOp::Or),
            _ => None,
        };
        if let Some(op) = logical {
            return Ok(Expr::Logical(LogicalExpr {
                op,
                left: Box::new(left),
                right: Box::new(right),
                span,
            }));
        }

        let op = match op_kind {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::EqualEqual => BinaryOp::Eq,
            TokenKind::BangEqual => BinaryOp::Ne,
            TokenKind::Less => BinaryOp::Lt,
            TokenKind::LessEqual => BinaryOp::Le,
            TokenKind::Greater => BinaryOp::Gt,
            _ => BinaryOp::Ge,
        };

        Ok(Expr::Binary(BinaryExpr {
            op,
            left: Box::new(left),
            right: Box::new(right),
            span,
        }))
    }

    /// `callee(arg, ...)`
    fn parse_call(&mut self, callee: Expr) -> Result<Expr, ()> {
        self.consume(TokenKind::LeftParen, "Expected '('")?;
        let mut args = Vec::new();

        if !self.check(TokenKind::RightParen) {
            loop {
                args.push(self.parse_expression()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        let paren = self
            .consume(TokenKind::RightParen, "Expected ')' after arguments")?
            .span;

        Ok(Expr::Call(CallExpr {
            span: callee.span().merge(paren),
            callee: Box::new(callee),
            args,
            paren,
        }))
    }
}
