use anyhow::Result;
use clap::{Parser, Subcommand};
use harp_runtime::ColorMode;

mod commands;
mod config;

use commands::OutputOptions;

/// Harp scripting language interpreter.
///
/// Harp is a small dynamically typed language with C-style syntax, lexical
/// closures, and first-class functions.
///
/// EXAMPLES:
///     harp run main.harp           Run a program
///     harp tokens main.harp        Print the token stream
///     harp ast main.harp           Print the syntax tree as JSON
///
/// ENVIRONMENT VARIABLES:
///     HARP_DIAGNOSTICS  Set to 'json' for JSON diagnostics by default
///     HARP_NO_COLOR     Set to disable colored diagnostics (NO_COLOR also works)
///     HARP_LOG          Log filter, e.g. 'harp_runtime=debug' (falls back to RUST_LOG)
#[derive(Parser)]
#[command(name = "harp")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output diagnostics in JSON format
    #[arg(long, global = true, env = "HARP_JSON")]
    json: bool,

    /// When to color diagnostics: auto, always, or never
    #[arg(long, global = true, value_name = "WHEN")]
    color: Option<ColorMode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a Harp source file
    ///
    /// Scans, parses, and executes the file. Output from `print` goes to
    /// stdout and diagnostics go to stderr.
    ///
    /// EXAMPLES:
    ///     harp run main.harp              Run a program
    ///     harp run main.harp --json       Output diagnostics as JSON
    #[command(visible_alias = "r")]
    Run {
        /// Path to the Harp source file
        file: String,
    },

    /// Print the tokens of a Harp source file
    ///
    /// One token per line in the form `KIND lexeme [literal]`.
    Tokens {
        /// Path to the Harp source file
        file: String,
    },

    /// Dump the syntax tree of a Harp source file as JSON
    Ast {
        /// Path to the Harp source file
        file: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cli_config = config::Config::from_env();
    init_tracing(cli_config.log_filter.as_deref());

    // Command-line flags override environment variables
    let options = OutputOptions {
        json: cli.json || cli_config.default_json,
        color: cli_config.color_mode(cli.color),
    };

    match cli.command {
        Commands::Run { file } => commands::run::run(&file, options)?,
        Commands::Tokens { file } => commands::tokens::run(&file, options)?,
        Commands::Ast { file } => commands::ast::run(&file, options)?,
    }

    Ok(())
}

/// Install a stderr log subscriber when a filter is configured
fn init_tracing(filter: Option<&str>) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let Some(filter) = filter else {
        return;
    };
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(EnvFilter::new(filter))
        .try_init();
}
