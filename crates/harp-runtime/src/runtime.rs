//! Harp runtime API for embedding

use crate::ast::Program;
use crate::diagnostic::{error_codes, sort_diagnostics, Diagnostic};
use crate::interpreter::Interpreter;
use crate::lexer;
use crate::parser;
use crate::span::Span;
use crate::value::{RuntimeError, Value};
use std::cell::RefCell;
use std::io::Write;
use std::path::Path;

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, Vec<Diagnostic>>;

/// Scan and parse `source`
///
/// Returns the program together with every scan and parse diagnostic,
/// sorted by position and with source snippets attached. The program is
/// only safe to run when none of the diagnostics is an error.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse_source(source: &str) -> (Program, Vec<Diagnostic>) {
    let (tokens, mut diagnostics) = lexer::scan(source);
    let (program, parse_diagnostics) = parser::parse(tokens);
    diagnostics.extend(parse_diagnostics);

    let mut diagnostics: Vec<Diagnostic> = diagnostics
        .into_iter()
        .map(|diag| diag.with_source(source))
        .collect();
    sort_diagnostics(&mut diagnostics);
    (program, diagnostics)
}

/// Harp runtime instance
///
/// Keeps one interpreter alive across calls, so globals defined by one
/// `eval` are visible to the next.
///
/// # Examples
///
/// ```
/// use harp_runtime::{Harp, Value};
///
/// let runtime = Harp::with_output(std::io::sink());
/// let result = runtime.eval("int x = 20; x + 22;");
/// assert_eq!(result, Ok(Value::Int(42)));
/// ```
pub struct Harp {
    interpreter: RefCell<Interpreter>,
}

impl Harp {
    /// Runtime whose `print` writes to stdout
    pub fn new() -> Self {
        Self {
            interpreter: RefCell::new(Interpreter::new()),
        }
    }

    /// Runtime whose `print` writes to `out`
    pub fn with_output(out: impl Write + 'static) -> Self {
        Self {
            interpreter: RefCell::new(Interpreter::with_output(Box::new(out))),
        }
    }

    /// Evaluate Harp source code
    ///
    /// Nothing runs if scanning or parsing reports an error; all diagnostics
    /// are returned instead. Otherwise the value of the last expression
    /// statement is returned.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn eval(&self, source: &str) -> RuntimeResult<Value> {
        let (program, diagnostics) = parse_source(source);
        if diagnostics.iter().any(Diagnostic::is_error) {
            return Err(diagnostics);
        }

        self.execute(&program)
            .map_err(|err| vec![runtime_error_to_diagnostic(&err).with_source(source)])
    }

    /// Evaluate a Harp source file
    pub fn eval_file(&self, path: impl AsRef<Path>) -> RuntimeResult<Value> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            vec![Diagnostic::error_with_code(
                error_codes::IO_ERROR,
                format!("Failed to read file: {}", e),
                Span::dummy(),
            )
            .with_file(path.display().to_string())]
        })?;

        self.eval(&source).map_err(|diagnostics| {
            let file = path.display().to_string();
            diagnostics
                .into_iter()
                .map(|diag| diag.with_file(file.clone()))
                .collect()
        })
    }

    /// Run an already parsed program
    pub fn execute(&self, program: &Program) -> Result<Value, RuntimeError> {
        let result = self.interpreter.borrow_mut().eval(program);
        if let Err(err) = &result {
            tracing::debug!(error = %err, "runtime error");
        }
        result
    }
}

impl Default for Harp {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a runtime error to a diagnostic with its code and location
pub fn runtime_error_to_diagnostic(error: &RuntimeError) -> Diagnostic {
    let (code, label) = match error {
        RuntimeError::UndefinedVariable { .. } => (error_codes::UNDEFINED_VARIABLE, "not defined"),
        RuntimeError::NotCallable { .. } => (error_codes::NOT_CALLABLE, "not a function"),
        RuntimeError::ArityMismatch { .. } => (error_codes::ARITY_MISMATCH, "wrong number of arguments"),
        RuntimeError::DivisionByZero { .. } => (error_codes::DIVISION_BY_ZERO, "divisor is zero"),
        RuntimeError::CoercionFailure { .. } => (error_codes::COERCION_FAILURE, "not a number"),
        RuntimeError::IntegerOverflow { .. } => (error_codes::INTEGER_OVERFLOW, "result does not fit in an int"),
        RuntimeError::Io { .. } => (error_codes::IO_ERROR, "output failed"),
    };

    let diag = Diagnostic::error_with_code(code, error.to_string(), error.span()).with_label(label);
    match error {
        RuntimeError::UndefinedVariable { name, .. } => {
            diag.with_lexeme(name.clone())
                .with_help(format!("declare '{}' before using it, e.g. `int {} = 0;`", name, name))
        }
        RuntimeError::CoercionFailure { .. } => {
            diag.with_note("arithmetic and comparison accept ints, doubles, and numeric text")
        }
        _ => diag,
    }
}
