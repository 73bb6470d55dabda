//! AST dump command - output AST as JSON

use super::{emit_diagnostics, read_source, OutputOptions};
use anyhow::{bail, Result};
use harp_runtime::parse_source;

/// Dump AST to JSON
///
/// Parses the source file and outputs the program as JSON to stdout.
/// Nothing is printed when parsing reports an error.
pub fn run(file_path: &str, options: OutputOptions) -> Result<()> {
    let source = read_source(file_path)?;
    let (program, diagnostics) = parse_source(&source);

    if !diagnostics.is_empty() {
        emit_diagnostics(&diagnostics, file_path, options)?;
    }
    if diagnostics.iter().any(|d| d.is_error()) {
        bail!("Parse errors in {}", file_path);
    }

    println!("{}", program.to_json()?);
    Ok(())
}
