//! Statement execution

use crate::ast::Stmt;
use crate::environment::{Environment, Scope};
use crate::interpreter::{ControlFlow, Interpreter};
use crate::value::{Callable, RuntimeError, UserFunction, Value};
use std::rc::Rc;

impl Interpreter {
    pub(super) fn execute(&mut self, stmt: &Stmt) -> Result<ControlFlow, RuntimeError> {
        match stmt {
            Stmt::Expr(expr_stmt) => {
                self.evaluate(&expr_stmt.expr)?;
                Ok(ControlFlow::Normal)
            }
            Stmt::VarDecl(decl) => {
                let value = match &decl.init {
                    Some(init) => self.evaluate(init)?,
                    None => Value::Null,
                };
                self.environment
                    .borrow_mut()
                    .define(decl.name.name.clone(), value);
                Ok(ControlFlow::Normal)
            }
            Stmt::Block(block) => {
                let scope = Environment::with_parent(Rc::clone(&self.environment)).into_scope();
                self.execute_block(&block.statements, scope)
            }
            Stmt::If(if_stmt) => {
                if self.evaluate(&if_stmt.cond)?.is_truthy() {
                    self.execute(&if_stmt.then_branch)
                } else if let Some(else_branch) = &if_stmt.else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(ControlFlow::Normal)
                }
            }
            Stmt::While(while_stmt) => {
                while self.evaluate(&while_stmt.cond)?.is_truthy() {
                    if let flow @ ControlFlow::Return(_) = self.execute(&while_stmt.body)? {
                        return Ok(flow);
                    }
                }
                Ok(ControlFlow::Normal)
            }
            Stmt::FunctionDecl(decl) => {
                let function = UserFunction {
                    decl: Rc::clone(decl),
                    closure: Rc::clone(&self.environment),
                };
                self.environment.borrow_mut().define(
                    decl.name.name.clone(),
                    Value::Function(Callable::User(Rc::new(function))),
                );
                Ok(ControlFlow::Normal)
            }
            Stmt::Return(ret) => {
                let value = match &ret.value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Null,
                };
                Ok(ControlFlow::Return(value))
            }
            Stmt::Error(span) => {
                tracing::warn!(line = span.line, column = span.column, "skipping statement that failed to parse");
                Ok(ControlFlow::Normal)
            }
        }
    }

    /// Run `statements` in `scope`, restoring the current scope afterwards
    /// whether or not execution succeeded
    pub(super) fn execute_block(
        &mut self,
        statements: &[Stmt],
        scope: Scope,
    ) -> Result<ControlFlow, RuntimeError> {
        let previous = std::mem::replace(&mut self.environment, scope);
        tracing::trace!("enter scope");

        let result = self.execute_statements(statements);

        self.environment = previous;
        tracing::trace!("leave scope");
        result
    }

    fn execute_statements(&mut self, statements: &[Stmt]) -> Result<ControlFlow, RuntimeError> {
        for stmt in statements {
            if let flow @ ControlFlow::Return(_) = self.execute(stmt)? {
                return Ok(flow);
            }
        }
        Ok(ControlFlow::Normal)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Program, Stmt};
    use crate::interpreter::Interpreter;
    use crate::lexer::scan;
    use crate::parser::parse;
    use crate::span::Span;
    use crate::value::{RuntimeError, Value};
    use std::io;

    fn program(source: &str) -> Program {
        let (tokens, _) = scan(source);
        parse(tokens).0
    }

    fn global(interpreter: &Interpreter, name: &str) -> Value {
        interpreter.globals().borrow().get(name, Span::dummy()).unwrap()
    }

    #[test]
    fn test_block_shadowing_restores_outer() {
        let mut interpreter = Interpreter::with_output(Box::new(io::sink()));
        interpreter
            .eval(&program("int x = 1; { int x = 2; x = 3; }"))
            .unwrap();
        assert_eq!(global(&interpreter, "x"), Value::Int(1));
    }

    #[test]
    fn test_assignment_in_block_reaches_outer() {
        let mut interpreter = Interpreter::with_output(Box::new(io::sink()));
        interpreter.eval(&program("int x = 1; { x = 2; }")).unwrap();
        assert_eq!(global(&interpreter, "x"), Value::Int(2));
    }

    #[test]
    fn test_block_locals_do_not_escape() {
        let mut interpreter = Interpreter::with_output(Box::new(io::sink()));
        interpreter.eval(&program("{ int inner = 1; }")).unwrap();
        assert!(!interpreter.globals().borrow().contains_local("inner"));
    }

    #[test]
    fn test_scope_restored_after_error() {
        let mut interpreter = Interpreter::with_output(Box::new(io::sink()));
        let err = interpreter.eval(&program("{ int inner = 1; missing; }")).unwrap_err();
        assert!(matches!(err, RuntimeError::UndefinedVariable { .. }));

        // The next run starts from globals, not the abandoned block scope.
        interpreter.eval(&program("int after = 2;")).unwrap();
        assert!(interpreter.globals().borrow().contains_local("after"));
    }

    #[test]
    fn test_uninitialized_variable_is_null() {
        let mut interpreter = Interpreter::with_output(Box::new(io::sink()));
        interpreter.eval(&program("bool flag;")).unwrap();
        assert_eq!(global(&interpreter, "flag"), Value::Null);
    }

    #[test]
    fn test_while_loop() {
        let mut interpreter = Interpreter::with_output(Box::new(io::sink()));
        let result = interpreter
            .eval(&program("int i = 0; while (i < 5) i = i + 1; i;"))
            .unwrap();
        assert_eq!(result, Value::Int(5));
    }

    #[test]
    fn test_if_else_branches() {
        let mut interpreter = Interpreter::with_output(Box::new(io::sink()));
        let result = interpreter
            .eval(&program("int r = 0; if (0) r = 1; else r = 2; r;"))
            .unwrap();
        assert_eq!(result, Value::Int(1));

        let result = interpreter
            .eval(&program("if (null) r = 3; else r = 4; r;"))
            .unwrap();
        assert_eq!(result, Value::Int(4));
    }

    #[test]
    fn test_error_statement_is_skipped() {
        let mut interpreter = Interpreter::with_output(Box::new(io::sink()));
        let program = Program {
            statements: vec![Stmt::Error(Span::at(0, 3, 1, 1))],
        };
        assert_eq!(interpreter.eval(&program).unwrap(), Value::Null);
    }

    #[test]
    fn test_return_inside_loop_unwinds_call() {
        let mut interpreter = Interpreter::with_output(Box::new(io::sink()));
        let result = interpreter
            .eval(&program(
                "func first(int limit) { int i = 0; while (true) { if (i == limit) return i; i = i + 1; } } first(3);",
            ))
            .unwrap();
        assert_eq!(result, Value::Int(3));
    }
}
