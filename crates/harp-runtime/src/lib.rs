//! Harp Runtime - Core language implementation
//!
//! This library provides the complete Harp language runtime:
//! - Lexical scanning and recursive-descent parsing
//! - Tree-walking interpretation over lexical environments
//! - Built-in `clock` and `print`
//! - Diagnostics with codes, snippets, and terminal rendering

/// Harp runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod ast;
pub mod diagnostic;
pub mod environment;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod runtime;
pub mod span;
pub mod stdlib;
pub mod token;
pub mod value;

pub use diagnostic::formatter::{ColorMode, DiagnosticFormatter};
pub use diagnostic::{error_codes, sort_diagnostics, Diagnostic, DiagnosticLevel};
pub use environment::Environment;
pub use interpreter::Interpreter;
pub use lexer::{scan, Lexer};
pub use parser::{parse, Parser};
pub use runtime::{parse_source, runtime_error_to_diagnostic, Harp, RuntimeResult};
pub use span::Span;
pub use token::{Token, TokenKind, TokenLiteral};
pub use value::{Arity, Callable, RuntimeError, Value};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoke() {
        assert_eq!(VERSION, "0.1.0");
    }
}
