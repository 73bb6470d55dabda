pub mod ast;
pub mod run;
pub mod tokens;

use anyhow::{Context, Result};
use harp_runtime::{ColorMode, Diagnostic, DiagnosticFormatter};
use std::fs;

/// How diagnostics reach the user
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub color: ColorMode,
}

/// Read a whole source file
pub fn read_source(file_path: &str) -> Result<String> {
    fs::read_to_string(file_path).with_context(|| format!("file not found: {}", file_path))
}

/// Print diagnostics to stderr, tagged with the file they came from
pub fn emit_diagnostics(
    diagnostics: &[Diagnostic],
    file_path: &str,
    options: OutputOptions,
) -> Result<()> {
    let diagnostics: Vec<Diagnostic> = diagnostics
        .iter()
        .map(|diag| diag.clone().with_file(file_path))
        .collect();

    if options.json {
        for diag in &diagnostics {
            eprintln!("{}", diag.to_json_string()?);
        }
    } else {
        DiagnosticFormatter::new(options.color)
            .emit_all(&diagnostics)
            .context("Failed to write diagnostics")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source("nonexistent.harp").unwrap_err();
        assert_eq!(err.to_string(), "file not found: nonexistent.harp");
    }
}
