//! AST interpreter (tree-walking)
//!
//! Evaluates the tree directly against a chain of environments:
//! - global scope created once, holding the built-ins
//! - a fresh child scope per block execution and per call
//! - closures keep their defining scope alive through a shared handle
//!
//! `return` unwinds as a [`ControlFlow`] value threaded back through
//! statement execution until the enclosing call receives it.

mod expr;
mod stmt;

use crate::ast::{Program, Stmt};
use crate::environment::{Environment, Scope};
use crate::span::Span;
use crate::stdlib;
use crate::value::{RuntimeError, Value};
use std::io::{self, Write};
use std::rc::Rc;

/// Outcome of executing a statement
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ControlFlow {
    /// Continue with the next statement
    Normal,
    /// Unwind to the enclosing call with this value
    Return(Value),
}

/// Interpreter state
pub struct Interpreter {
    /// Scope holding the built-ins and top-level declarations
    pub(super) globals: Scope,
    /// Scope the next statement runs in
    pub(super) environment: Scope,
    /// Sink for `print`
    pub(super) out: Box<dyn Write>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Interpreter printing to stdout
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// Interpreter printing to `out`
    pub fn with_output(out: Box<dyn Write>) -> Self {
        let mut globals = Environment::new();
        stdlib::register(&mut globals);
        let globals = globals.into_scope();

        Self {
            environment: Rc::clone(&globals),
            globals,
            out,
        }
    }

    /// Global scope
    pub fn globals(&self) -> &Scope {
        &self.globals
    }

    /// Run top-level statements in order
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        self.run(statements).map(|_| ())
    }

    /// Run a program and return the value of its last expression statement
    ///
    /// A top-level `return` stops the program and its value is the result.
    pub fn eval(&mut self, program: &Program) -> Result<Value, RuntimeError> {
        self.run(&program.statements)
    }

    /// Run statements, flushing output even when execution fails
    fn run(&mut self, statements: &[Stmt]) -> Result<Value, RuntimeError> {
        let result = self.run_top_level(statements);
        let flushed = self.out.flush();
        let value = result?;
        flushed.map_err(|e| RuntimeError::io(e, Span::dummy()))?;
        Ok(value)
    }

    fn run_top_level(&mut self, statements: &[Stmt]) -> Result<Value, RuntimeError> {
        let mut last = Value::Null;
        for stmt in statements {
            match stmt {
                Stmt::Expr(expr_stmt) => last = self.evaluate(&expr_stmt.expr)?,
                _ => {
                    if let ControlFlow::Return(value) = self.execute(stmt)? {
                        tracing::debug!("top-level return stopped the program");
                        return Ok(value);
                    }
                }
            }
        }
        Ok(last)
    }
}
