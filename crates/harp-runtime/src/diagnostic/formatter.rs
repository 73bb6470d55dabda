//! Terminal rendering for diagnostics
//!
//! Draws the header, location arrow, source line, and caret underline, with
//! colors when the output stream supports them.

use crate::diagnostic::{Diagnostic, DiagnosticLevel};
use std::io;
use std::str::FromStr;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// When to colorize diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    Always,
    Never,
    /// Color only when writing to a terminal
    #[default]
    Auto,
}

impl ColorMode {
    /// Resolve to a termcolor choice. `NO_COLOR` always wins.
    pub fn to_color_choice(self) -> ColorChoice {
        if std::env::var_os("NO_COLOR").is_some() {
            return ColorChoice::Never;
        }
        match self {
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
            ColorMode::Auto => ColorChoice::Auto,
        }
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            "auto" => Ok(ColorMode::Auto),
            other => Err(format!("unknown color mode '{}'", other)),
        }
    }
}

/// Renders diagnostics to a color-capable sink
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticFormatter {
    color_mode: ColorMode,
}

impl DiagnosticFormatter {
    pub fn new(color_mode: ColorMode) -> Self {
        Self { color_mode }
    }

    /// Formatter that never colors
    pub fn plain() -> Self {
        Self::new(ColorMode::Never)
    }

    /// Write every diagnostic to stderr
    pub fn emit_all(&self, diagnostics: &[Diagnostic]) -> io::Result<()> {
        let mut stream = StandardStream::stderr(self.color_mode.to_color_choice());
        for diag in diagnostics {
            self.write_diagnostic(&mut stream, diag)?;
        }
        Ok(())
    }

    /// Render one diagnostic without colors
    pub fn render(&self, diag: &Diagnostic) -> String {
        let mut buf = termcolor::Buffer::no_color();
        // Writes into an in-memory buffer cannot fail.
        let _ = self.write_diagnostic(&mut buf, diag);
        String::from_utf8_lossy(buf.as_slice()).into_owned()
    }

    pub fn write_diagnostic(&self, w: &mut impl WriteColor, diag: &Diagnostic) -> io::Result<()> {
        let accent = level_color(diag.level);

        w.set_color(ColorSpec::new().set_fg(Some(accent)).set_bold(true))?;
        write!(w, "{}[{}]", diag.level, diag.code)?;
        w.set_color(ColorSpec::new().set_bold(true))?;
        write!(w, ": {}", diag.message)?;
        w.reset()?;
        writeln!(w)?;

        gutter(w, "  --> ")?;
        writeln!(w, "{}:{}:{}", diag.file, diag.line, diag.column)?;

        if !diag.snippet.is_empty() {
            let width = diag.line.to_string().len() + 1;

            gutter(w, &format!("{:>width$}|", ""))?;
            writeln!(w)?;
            gutter(w, &format!("{:>width$}| ", diag.line))?;
            writeln!(w, "{}", diag.snippet)?;

            if diag.length > 0 && diag.column > 0 {
                gutter(w, &format!("{:>width$}| ", ""))?;
                let col = diag.column - 1;
                let available = diag.snippet.chars().count().saturating_sub(col).max(1);
                write!(w, "{}", " ".repeat(col))?;
                w.set_color(ColorSpec::new().set_fg(Some(accent)).set_bold(true))?;
                write!(w, "{}", "^".repeat(diag.length.min(available)))?;
                if !diag.label.is_empty() {
                    write!(w, " {}", diag.label)?;
                }
                w.reset()?;
                writeln!(w)?;
            }
        }

        for note in &diag.notes {
            trailer(w, "note", Color::White, note)?;
        }
        if let Some(help) = &diag.help {
            trailer(w, "help", Color::Green, help)?;
        }

        writeln!(w)
    }
}

fn level_color(level: DiagnosticLevel) -> Color {
    match level {
        DiagnosticLevel::Error => Color::Red,
        DiagnosticLevel::Warning => Color::Yellow,
    }
}

fn gutter(w: &mut impl WriteColor, text: &str) -> io::Result<()> {
    w.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    write!(w, "{}", text)?;
    w.reset()
}

fn trailer(w: &mut impl WriteColor, tag: &str, color: Color, text: &str) -> io::Result<()> {
    gutter(w, "   = ")?;
    w.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(w, "{}", tag)?;
    w.reset()?;
    writeln!(w, ": {}", text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    fn sample() -> Diagnostic {
        Diagnostic::error_with_code("HP1001", "Unexpected character '@'", Span::at(6, 7, 1, 7))
            .with_file("demo.harp")
            .with_snippet("int x @ 1;")
            .with_label("illegal character")
            .with_help("remove this character")
    }

    #[test]
    fn test_render_layout() {
        let out = DiagnosticFormatter::plain().render(&sample());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "error[HP1001]: Unexpected character '@'");
        assert_eq!(lines[1], "  --> demo.harp:1:7");
        assert_eq!(lines[2], "  |");
        assert_eq!(lines[3], " 1| int x @ 1;");
        assert_eq!(lines[4], "  |       ^ illegal character");
        assert_eq!(lines[5], "   = help: remove this character");
    }

    #[test]
    fn test_caret_clamped_to_snippet() {
        let mut diag = sample();
        diag.length = 40;
        let out = DiagnosticFormatter::plain().render(&diag);
        assert!(out.contains("^^^^ illegal character"));
        assert!(!out.contains("^^^^^"));
    }

    #[test]
    fn test_no_snippet_skips_source_block() {
        let diag = Diagnostic::error("boom", Span::at(0, 1, 2, 1)).with_file("x.harp");
        let out = DiagnosticFormatter::plain().render(&diag);
        assert!(out.contains("--> x.harp:2:1"));
        assert!(!out.contains('|'));
    }

    #[test]
    fn test_color_mode_parse() {
        assert_eq!("always".parse::<ColorMode>(), Ok(ColorMode::Always));
        assert_eq!("NEVER".parse::<ColorMode>(), Ok(ColorMode::Never));
        assert_eq!("auto".parse::<ColorMode>(), Ok(ColorMode::Auto));
        assert!("sometimes".parse::<ColorMode>().is_err());
    }
}
