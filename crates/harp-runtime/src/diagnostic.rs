//! Diagnostic system for errors and warnings
//!
//! Scan errors, parse errors, and runtime failures all flow through the
//! unified Diagnostic type so the CLI can render them one way.

pub mod formatter;

use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    /// Error that prevents the program from running
    Error,
    /// Warning that doesn't prevent the program from running
    Warning,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Error => write!(f, "error"),
            DiagnosticLevel::Warning => write!(f, "warning"),
        }
    }
}

/// A positioned diagnostic message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Error code (e.g., "HP1001")
    pub code: String,
    /// Main diagnostic message
    pub message: String,
    /// File path
    pub file: String,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
    /// Length of error span
    pub length: usize,
    /// Offending source text
    pub lexeme: String,
    /// Source line string
    pub snippet: String,
    /// Short label for caret range
    pub label: String,
    /// Additional notes (optional)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<String>,
    /// Suggested fix (optional)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub help: Option<String>,
}

impl Diagnostic {
    fn with_level(
        level: DiagnosticLevel,
        code: impl Into<String>,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            level,
            code: code.into(),
            message: message.into(),
            file: "<unknown>".to_string(),
            line: span.line as usize,
            column: span.column as usize,
            length: span.len(),
            lexeme: String::new(),
            snippet: String::new(),
            label: String::new(),
            notes: Vec::new(),
            help: None,
        }
    }

    /// Create a new error diagnostic with code
    pub fn error_with_code(
        code: impl Into<String>,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self::with_level(DiagnosticLevel::Error, code, message, span)
    }

    /// Create a new warning diagnostic with code
    pub fn warning_with_code(
        code: impl Into<String>,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self::with_level(DiagnosticLevel::Warning, code, message, span)
    }

    /// Create a new error diagnostic (uses generic error code)
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::error_with_code(error_codes::GENERIC_ERROR, message, span)
    }

    pub fn is_error(&self) -> bool {
        self.level == DiagnosticLevel::Error
    }

    /// Set the file path
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    /// Set the offending lexeme
    pub fn with_lexeme(mut self, lexeme: impl Into<String>) -> Self {
        self.lexeme = lexeme.into();
        self
    }

    /// Set the snippet (source line)
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }

    /// Set the label (caret description)
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Add a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Add a help message
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Fill in the snippet from the source line this diagnostic points at
    pub fn with_source(mut self, source: &str) -> Self {
        if self.snippet.is_empty() && self.line > 0 {
            if let Some(line) = source.lines().nth(self.line - 1) {
                self.snippet = line.to_string();
            }
        }
        self
    }

    /// Format as JSON string
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Line {}:{}] {}: {}",
            self.line, self.column, self.level, self.message
        )
    }
}

/// Sort diagnostics by location, errors before warnings on the same position
pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by(|a, b| {
        a.line
            .cmp(&b.line)
            .then(a.column.cmp(&b.column))
            .then_with(|| match (a.level, b.level) {
                (DiagnosticLevel::Error, DiagnosticLevel::Warning) => std::cmp::Ordering::Less,
                (DiagnosticLevel::Warning, DiagnosticLevel::Error) => std::cmp::Ordering::Greater,
                _ => std::cmp::Ordering::Equal,
            })
    });
}

/// Error code registry
pub mod error_codes {
    // HP0xxx - Runtime errors
    pub const UNDEFINED_VARIABLE: &str = "HP0002";
    pub const DIVISION_BY_ZERO: &str = "HP0005";
    pub const INTEGER_OVERFLOW: &str = "HP0006";
    pub const COERCION_FAILURE: &str = "HP0007";

    // HP1xxx - Scan and syntax errors
    pub const SYNTAX_ERROR: &str = "HP1000";
    pub const ILLEGAL_CHARACTER: &str = "HP1001";
    pub const UNTERMINATED_STRING: &str = "HP1002";
    pub const INVALID_ASSIGNMENT_TARGET: &str = "HP1003";
    pub const INTEGER_LITERAL_RANGE: &str = "HP1004";
    pub const UNSUPPORTED_STRUCT: &str = "HP1005";
    /// Number or string token without a usable value
    pub const INVALID_LITERAL: &str = "HP1006";

    // HP2xxx - Warnings
    pub const TOP_LEVEL_RETURN: &str = "HP2001";

    // HP3xxx - Call errors
    pub const ARITY_MISMATCH: &str = "HP3005";
    pub const NOT_CALLABLE: &str = "HP3006";

    // HP9xxx - Host errors
    pub const IO_ERROR: &str = "HP9000";
    pub const GENERIC_ERROR: &str = "HP9999";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_takes_position_from_span() {
        let diag = Diagnostic::error_with_code("HP1001", "Unexpected character '@'", Span::at(7, 8, 2, 5));
        assert_eq!(diag.level, DiagnosticLevel::Error);
        assert_eq!(diag.line, 2);
        assert_eq!(diag.column, 5);
        assert_eq!(diag.length, 1);
    }

    #[test]
    fn test_builder_pattern() {
        let diag = Diagnostic::error("Test error", Span::at(0, 3, 1, 1))
            .with_file("main.harp")
            .with_lexeme("foo")
            .with_label("here")
            .with_note("a note")
            .with_help("a fix");

        assert_eq!(diag.code, error_codes::GENERIC_ERROR);
        assert_eq!(diag.file, "main.harp");
        assert_eq!(diag.lexeme, "foo");
        assert_eq!(diag.notes, vec!["a note".to_string()]);
        assert_eq!(diag.help.as_deref(), Some("a fix"));
    }

    #[test]
    fn test_with_source_picks_line() {
        let diag = Diagnostic::error("oops", Span::at(12, 13, 2, 3)).with_source("int x = 1;\nx @ 2;\n");
        assert_eq!(diag.snippet, "x @ 2;");
    }

    #[test]
    fn test_json_format() {
        let diag = Diagnostic::warning_with_code("HP2001", "top-level return", Span::at(0, 6, 1, 1));
        let json = diag.to_json_string().unwrap();
        assert!(json.contains("\"level\": \"warning\""));
        assert!(json.contains("\"code\": \"HP2001\""));
        assert!(!json.contains("\"help\""));
    }

    #[test]
    fn test_display_format() {
        let diag = Diagnostic::error("Expected expression", Span::at(4, 5, 3, 2));
        assert_eq!(diag.to_string(), "[Line 3:2] error: Expected expression");
    }

    #[test]
    fn test_sort_diagnostics() {
        let mut diags = vec![
            Diagnostic::error("later", Span::at(20, 21, 3, 1)),
            Diagnostic::warning_with_code("HP2001", "same spot", Span::at(0, 1, 1, 1)),
            Diagnostic::error("first", Span::at(0, 1, 1, 1)),
        ];
        sort_diagnostics(&mut diags);
        assert_eq!(diags[0].message, "first");
        assert_eq!(diags[1].message, "same spot");
        assert_eq!(diags[2].message, "later");
    }
}
