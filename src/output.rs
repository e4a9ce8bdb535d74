//! # Terminal Output
//!
//! Status markers for CLI output. When colors are enabled, markers are
//! rendered as emoji; otherwise as bracketed plain text suitable for logs and
//! dumb terminals.
//!
//! Color support honors `--color=never|always|auto`, `NO_COLOR`, `CLICOLOR`,
//! `CLICOLOR_FORCE` and `TERM=dumb`.
//!
//! ```
//! use credits::output::{OutputConfig, Status};
//!
//! let out = OutputConfig::from_env_and_flag("never");
//! assert_eq!(Status::Ok.marker(&out), "[OK]");
//! ```

use std::env;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Creates an output configuration from the `--color` flag value.
    ///
    /// `always` and `never` force the setting; anything else detects it
    /// from the environment and the terminal.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // Presence alone disables colors, even when empty.
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Kind of a status line printed by the commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Warn,
    Error,
    Info,
    Scan,
    Write,
}

impl Status {
    /// Marker for this status under the given configuration.
    pub fn marker(self, config: &OutputConfig) -> &'static str {
        let (emoji, plain) = match self {
            Status::Ok => ("✅", "[OK]"),
            Status::Warn => ("⚠️", "[WARN]"),
            Status::Error => ("❌", "[ERR]"),
            Status::Info => ("📊", "[INFO]"),
            Status::Scan => ("🔍", "[SCAN]"),
            Status::Write => ("📝", "[WRITE]"),
        };

        if config.use_color {
            emoji
        } else {
            plain
        }
    }
}
