//! Run command - execute Harp source files

use super::{emit_diagnostics, read_source, OutputOptions};
use anyhow::{bail, Result};
use harp_runtime::{parse_source, runtime_error_to_diagnostic, Harp};

/// Run a Harp source file
///
/// Scans and parses the whole file first. Warnings are reported and the
/// program still runs; any error stops before execution. A runtime error is
/// reported with its source line and ends the run.
pub fn run(file_path: &str, options: OutputOptions) -> Result<()> {
    let source = read_source(file_path)?;

    let (program, diagnostics) = parse_source(&source);
    tracing::debug!(
        file = file_path,
        statements = program.statements.len(),
        diagnostics = diagnostics.len(),
        "parsed source file"
    );
    if !diagnostics.is_empty() {
        emit_diagnostics(&diagnostics, file_path, options)?;
    }
    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    if errors > 0 {
        bail!("could not run {} due to {} previous error(s)", file_path, errors);
    }

    let runtime = Harp::new();
    if let Err(err) = runtime.execute(&program) {
        let diag = runtime_error_to_diagnostic(&err).with_source(&source);
        emit_diagnostics(&[diag], file_path, options)?;
        bail!("{} failed at runtime", file_path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use harp_runtime::ColorMode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn options() -> OutputOptions {
        OutputOptions {
            json: false,
            color: ColorMode::Never,
        }
    }

    fn source_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn test_run_simple_program() {
        let file = source_file("int x = 1 + 2;");
        assert!(run(file.path().to_str().unwrap(), options()).is_ok());
    }

    #[test]
    fn test_run_missing_file() {
        assert!(run("nonexistent.harp", options()).is_err());
    }

    #[test]
    fn test_run_syntax_error() {
        let file = source_file("int = ;");
        let err = run(file.path().to_str().unwrap(), options()).unwrap_err();
        assert!(err.to_string().contains("1 previous error(s)"));
    }

    #[test]
    fn test_run_runtime_error() {
        let file = source_file("1 / 0;");
        let err = run(file.path().to_str().unwrap(), options()).unwrap_err();
        assert!(err.to_string().contains("failed at runtime"));
    }

    #[test]
    fn test_run_with_warning_succeeds() {
        let file = source_file("return;");
        assert!(run(file.path().to_str().unwrap(), options()).is_ok());
    }
}
