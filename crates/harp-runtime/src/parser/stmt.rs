//! Declaration and statement parsing

use crate::ast::*;
use crate::diagnostic::{error_codes, Diagnostic};
use crate::parser::Parser;
use crate::span::Span;
use crate::token::TokenKind;
use std::rc::Rc;

impl Parser {
    pub(super) fn parse_declaration(&mut self) -> Result<Stmt, ()> {
        match self.peek().kind {
            TokenKind::Func => self.parse_function(),
            kind if kind.is_type_keyword() => Ok(Stmt::VarDecl(self.parse_var_decl()?)),
            TokenKind::Struct => Ok(self.parse_struct()),
            _ => self.parse_statement(),
        }
    }

    /// Parse a statement (no declarations)
    pub(super) fn parse_statement(&mut self) -> Result<Stmt, ()> {
        match self.peek().kind {
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Return => self.parse_return(),
            TokenKind::LeftBrace => Ok(Stmt::Block(self.parse_block()?)),
            _ => Ok(Stmt::Expr(self.parse_expr_stmt()?)),
        }
    }

    /// Parse `type` keyword into a type name
    fn parse_type_name(&mut self, context: &str) -> Result<TypeName, ()> {
        let type_name = match self.peek().kind {
            TokenKind::StringType => TypeName::String,
            TokenKind::IntType => TypeName::Int,
            TokenKind::DoubleType => TypeName::Double,
            TokenKind::BoolType => TypeName::Bool,
            _ => {
                self.error(&format!("Expected {}", context));
                return Err(());
            }
        };
        self.advance();
        Ok(type_name)
    }

    /// `type name [= init];`
    fn parse_var_decl(&mut self) -> Result<VarDecl, ()> {
        let start = self.peek().span;
        let type_name = self.parse_type_name("a type")?;
        let name = self.consume_identifier("a variable name")?;

        let init = if self.match_token(TokenKind::Equal) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        let end = self.consume_terminator("Expected ';' after variable declaration")?;

        Ok(VarDecl {
            type_name,
            name,
            init,
            span: start.merge(end),
        })
    }

    /// `func name(type a, type b) { ... }`
    fn parse_function(&mut self) -> Result<Stmt, ()> {
        let start = self.consume(TokenKind::Func, "Expected 'func'")?.span;
        let name = self.consume_identifier("a function name")?;

        self.consume(TokenKind::LeftParen, "Expected '(' after function name")?;
        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                let type_name = self.parse_type_name("a parameter type")?;
                let param_name = self.consume_identifier("a parameter name")?;
                params.push(Param {
                    type_name,
                    name: param_name,
                });
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen, "Expected ')' after parameters")?;

        self.function_depth += 1;
        let body = self.parse_block();
        self.function_depth -= 1;
        let body = body?;

        Ok(Stmt::FunctionDecl(Rc::new(FunctionDecl {
            name,
            params,
            span: start.merge(body.span),
            body: body.statements,
        })))
    }

    /// `{ declaration* }`
    pub(super) fn parse_block(&mut self) -> Result<Block, ()> {
        let start = self.consume(TokenKind::LeftBrace, "Expected '{'")?.span;
        let mut statements = Vec::new();

        self.block_depth += 1;
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            statements.push(self.declaration());
        }
        self.block_depth -= 1;

        let end = self.consume(TokenKind::RightBrace, "Expected '}' after block")?.span;
        Ok(Block {
            statements,
            span: start.merge(end),
        })
    }

    fn parse_if(&mut self) -> Result<Stmt, ()> {
        let start = self.consume(TokenKind::If, "Expected 'if'")?.span;
        self.consume(TokenKind::LeftParen, "Expected '(' after 'if'")?;
        let cond = self.parse_expression()?;
        self.consume(TokenKind::RightParen, "Expected ')' after if condition")?;

        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.match_token(TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        let end = else_branch.as_ref().map_or(then_branch.span(), |s| s.span());
        Ok(Stmt::If(IfStmt {
            cond,
            then_branch,
            else_branch,
            span: start.merge(end),
        }))
    }

    fn parse_while(&mut self) -> Result<Stmt, ()> {
        let start = self.consume(TokenKind::While, "Expected 'while'")?.span;
        self.consume(TokenKind::LeftParen, "Expected '(' after 'while'")?;
        let cond = self.parse_expression()?;
        self.consume(TokenKind::RightParen, "Expected ')' after while condition")?;
        let body = self.parse_statement()?;

        Ok(Stmt::While(WhileStmt {
            cond,
            span: start.merge(body.span()),
            body: Box::new(body),
        }))
    }

    /// `for (init; cond; incr) body`, desugared into a block around a while loop
    fn parse_for(&mut self) -> Result<Stmt, ()> {
        let start = self.consume(TokenKind::For, "Expected 'for'")?.span;
        self.consume(TokenKind::LeftParen, "Expected '(' after 'for'")?;

        let header = self.parse_for_header(start);
        if header.is_err() {
            self.skip_for_header();
        }
        let (init, cond, incr) = header?;

        let body = self.parse_statement()?;
        let span = start.merge(body.span());

        let mut loop_body = vec![body];
        if let Some(incr) = incr {
            loop_body.push(Stmt::Expr(ExprStmt {
                span: incr.span(),
                expr: incr,
            }));
        }

        let while_stmt = Stmt::While(WhileStmt {
            cond,
            body: Box::new(Stmt::Block(Block {
                statements: loop_body,
                span,
            })),
            span,
        });

        let mut statements: Vec<Stmt> = init.into_iter().collect();
        statements.push(while_stmt);
        Ok(Stmt::Block(Block { statements, span }))
    }

    /// Skip the rest of a broken `for (...)` header
    ///
    /// Recovery resumes at the loop body when the closing `)` is found.
    fn skip_for_header(&mut self) {
        let mut depth = 1usize;
        self.resume_at_current = false;
        while !self.is_at_end() {
            match self.peek().kind {
                TokenKind::LeftBrace | TokenKind::RightBrace => return,
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth -= 1,
                _ => {}
            }
            self.advance();
            if depth == 0 {
                self.resume_at_current = true;
                return;
            }
        }
    }

    /// `init; cond; incr)` of a `for` loop; a missing condition is `true`
    fn parse_for_header(&mut self, start: Span) -> Result<(Option<Stmt>, Expr, Option<Expr>), ()> {
        let init = if self.match_token(TokenKind::Semicolon) {
            None
        } else if self.peek().kind.is_type_keyword() {
            Some(Stmt::VarDecl(self.parse_var_decl()?))
        } else {
            Some(Stmt::Expr(self.parse_expr_stmt()?))
        };

        let cond = if self.check(TokenKind::Semicolon) {
            Expr::Literal(Literal::Bool(true), start)
        } else {
            self.parse_expression()?
        };
        self.consume(TokenKind::Semicolon, "Expected ';' after loop condition")?;

        let incr = if self.check(TokenKind::RightParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.consume(TokenKind::RightParen, "Expected ')' after for clauses")?;

        Ok((init, cond, incr))
    }

    fn parse_return(&mut self) -> Result<Stmt, ()> {
        let start = self.consume(TokenKind::Return, "Expected 'return'")?.span;

        if self.function_depth == 0 {
            self.diagnostics.push(
                Diagnostic::warning_with_code(
                    error_codes::TOP_LEVEL_RETURN,
                    "'return' outside of a function stops the program",
                    start,
                )
                .with_lexeme("return")
                .with_label("top-level return"),
            );
        }

        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        let end = self.consume_terminator("Expected ';' after return value")?;

        Ok(Stmt::Return(ReturnStmt {
            value,
            span: start.merge(end),
        }))
    }

    fn parse_expr_stmt(&mut self) -> Result<ExprStmt, ()> {
        let expr = self.parse_expression()?;
        let end = self.consume_terminator("Expected ';' after expression")?;
        Ok(ExprStmt {
            span: expr.span().merge(end),
            expr,
        })
    }

    /// `struct` is reserved: report it once and skip the whole declaration
    fn parse_struct(&mut self) -> Stmt {
        let keyword = self.advance().clone();
        self.error_at(
            &keyword,
            error_codes::UNSUPPORTED_STRUCT,
            "struct declarations are not supported",
        );

        self.match_token(TokenKind::Identifier);
        if self.match_token(TokenKind::LeftBrace) {
            let mut depth = 1usize;
            while depth > 0 && !self.is_at_end() {
                match self.advance().kind {
                    TokenKind::LeftBrace => depth += 1,
                    TokenKind::RightBrace => depth -= 1,
                    _ => {}
                }
            }
        }
        self.match_token(TokenKind::Semicolon);

        let end: Span = self.previous().span;
        Stmt::Error(keyword.span.merge(end))
    }
}
