//! Runtime value representation
//!
//! Values are dynamically typed. Strings are shared immutable text and
//! functions are reference counted, so cloning a value is cheap.

use crate::ast::FunctionDecl;
use crate::environment::Scope;
use crate::span::Span;
use std::fmt;
use std::io::Write;
use std::rc::Rc;
use thiserror::Error;

/// Runtime value
#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    Double(f64),
    String(Rc<str>),
    Bool(bool),
    Null,
    Function(Callable),
}

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::String(s.into())
    }

    /// Type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
            Value::Null => "null",
            Value::Function(_) => "function",
        }
    }

    /// Only `null` and `false` are falsy
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Bool(false))
    }
}

/// Structural equality; values of different types are never equal
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Function(a), Value::Function(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Double(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Null => write!(f, "null"),
            Value::Function(callable) => write!(f, "{}", callable),
        }
    }
}

/// Signature of a host-provided function
///
/// Natives get the interpreter's output sink, the evaluated arguments, and
/// the span of the call for error reporting.
pub type NativeFn = fn(&mut dyn Write, &[Value], Span) -> Result<Value, RuntimeError>;

/// Number of arguments a callable accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    pub max: usize,
}

impl Arity {
    pub const fn exact(n: usize) -> Self {
        Self { min: n, max: n }
    }

    pub const fn range(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn accepts(self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{} to {}", self.min, self.max)
        }
    }
}

/// Host-provided function
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: Arity,
    pub func: NativeFn,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

/// Function declared in Harp source, with the scope it was declared in
pub struct UserFunction {
    pub decl: Rc<FunctionDecl>,
    pub closure: Scope,
}

impl UserFunction {
    pub fn name(&self) -> &str {
        &self.decl.name.name
    }
}

// The closure may reach this function again, so it is left out.
impl fmt::Debug for UserFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserFunction")
            .field("name", &self.name())
            .field("arity", &self.decl.params.len())
            .finish_non_exhaustive()
    }
}

/// A callable value
#[derive(Debug, Clone)]
pub enum Callable {
    Native(Rc<NativeFunction>),
    User(Rc<UserFunction>),
}

impl Callable {
    pub fn name(&self) -> &str {
        match self {
            Callable::Native(native) => native.name,
            Callable::User(user) => user.name(),
        }
    }

    /// Argument counts a call may supply
    pub fn arity(&self) -> Arity {
        match self {
            Callable::Native(native) => native.arity,
            Callable::User(user) => Arity::exact(user.decl.params.len()),
        }
    }
}

/// Identity comparison
impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Callable::Native(a), Callable::Native(b)) => Rc::ptr_eq(a, b),
            (Callable::User(a), Callable::User(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Native(native) => write!(f, "<native fn {}>", native.name),
            Callable::User(user) => write!(f, "<fn {}>", user.name()),
        }
    }
}

/// Runtime error type with source span information
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("Undefined variable '{name}'")]
    UndefinedVariable { name: String, span: Span },

    #[error("Can only call functions, found {type_name}")]
    NotCallable { type_name: String, span: Span },

    #[error("Expected {expected} argument(s) but got {found} when calling '{name}'")]
    ArityMismatch {
        name: String,
        expected: Arity,
        found: usize,
        span: Span,
    },

    #[error("Division by zero")]
    DivisionByZero { span: Span },

    /// An operand has no value in the numeric domain the operator needs
    #[error("Cannot use {operand} as {domain}")]
    CoercionFailure {
        operand: String,
        domain: &'static str,
        span: Span,
    },

    #[error("Integer overflow in '{op}'")]
    IntegerOverflow { op: String, span: Span },

    #[error("I/O error: {message}")]
    Io { message: String, span: Span },
}

impl RuntimeError {
    pub fn span(&self) -> Span {
        match self {
            RuntimeError::UndefinedVariable { span, .. } => *span,
            RuntimeError::NotCallable { span, .. } => *span,
            RuntimeError::ArityMismatch { span, .. } => *span,
            RuntimeError::DivisionByZero { span } => *span,
            RuntimeError::CoercionFailure { span, .. } => *span,
            RuntimeError::IntegerOverflow { span, .. } => *span,
            RuntimeError::Io { span, .. } => *span,
        }
    }

    pub fn io(err: std::io::Error, span: Span) -> Self {
        RuntimeError::Io {
            message: err.to_string(),
            span,
        }
    }
}
