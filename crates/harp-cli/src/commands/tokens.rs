//! Token dump command - print the scanner output

use super::{emit_diagnostics, read_source, OutputOptions};
use anyhow::{bail, Result};
use harp_runtime::{scan, Token};
use std::io::{self, Write};

/// Print every token of a file, one per line
///
/// Tokens are printed even when the scanner reports errors, since the
/// stream around a bad character is usually what the user wants to see.
pub fn run(file_path: &str, options: OutputOptions) -> Result<()> {
    let source = read_source(file_path)?;
    let (tokens, diagnostics) = scan(&source);

    let stdout = io::stdout();
    write_tokens(&mut stdout.lock(), &tokens)?;

    if !diagnostics.is_empty() {
        let diagnostics: Vec<_> = diagnostics
            .into_iter()
            .map(|diag| diag.with_source(&source))
            .collect();
        emit_diagnostics(&diagnostics, file_path, options)?;
        bail!("scanning {} reported {} error(s)", file_path, diagnostics.len());
    }
    Ok(())
}

fn write_tokens(out: &mut impl Write, tokens: &[Token]) -> io::Result<()> {
    for token in tokens {
        writeln!(out, "{}", token)?;
    }
    out.flush()
}
