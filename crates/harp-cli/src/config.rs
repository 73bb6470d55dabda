//! CLI configuration via environment variables
//!
//! Harp keeps the command line small; defaults that users want to set once
//! per shell come from the environment instead.

use harp_runtime::ColorMode;
use std::env;

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Default to JSON diagnostic output (HARP_DIAGNOSTICS=json)
    pub default_json: bool,
    /// Disable colored output (HARP_NO_COLOR=1 or NO_COLOR=1)
    pub no_color: bool,
    /// Log filter directives (HARP_LOG, falling back to RUST_LOG)
    pub log_filter: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            default_json: env::var("HARP_DIAGNOSTICS")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
            no_color: env::var("HARP_NO_COLOR").is_ok() || env::var("NO_COLOR").is_ok(),
            log_filter: env::var("HARP_LOG")
                .or_else(|_| env::var("RUST_LOG"))
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }

    /// Color mode to use when the command line did not pick one
    pub fn color_mode(&self, flag: Option<ColorMode>) -> ColorMode {
        match flag {
            Some(mode) => mode,
            None if self.no_color => ColorMode::Never,
            None => ColorMode::Auto,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
