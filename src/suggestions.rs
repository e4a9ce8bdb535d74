//! # Error Suggestions
//!
//! Errors for the CLI that tell the user what went wrong and how to fix it,
//! as `hint:` lines following the message.

use std::path::Path;

use crate::defaults::{CONFIG_ENV, DATABASE_ENV, DEFAULT_CONFIG_FILENAME};

/// The configuration file given explicitly does not exist.
pub fn config_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Configuration file not found: {path}\n\n\
         hint: Create a {DEFAULT_CONFIG_FILENAME} file in your project root\n\
         hint: Use -c/--config to specify a different path\n\
         hint: Check the {CONFIG_ENV} environment variable",
        path = path.display()
    )
}

/// No database location on the command line, in the environment or in the
/// configuration file.
pub fn database_not_configured() -> anyhow::Error {
    anyhow::anyhow!(
        "No credit database configured\n\n\
         hint: Use -d/--database to give a file path or URL\n\
         hint: Set the {DATABASE_ENV} environment variable\n\
         hint: Add a 'database:' entry to {DEFAULT_CONFIG_FILENAME}"
    )
}

/// `generate` has neither a dependency list nor configured variants.
pub fn no_dependencies() -> anyhow::Error {
    anyhow::anyhow!(
        "No dependencies to generate credits for\n\n\
         hint: Use --dependencies to give a dependency list file\n\
         hint: Add a 'variants:' map to {DEFAULT_CONFIG_FILENAME}"
    )
}

/// A variant requested on the command line is not configured.
pub fn unknown_variant<'a>(name: &str, known: impl Iterator<Item = &'a String>) -> anyhow::Error {
    let known: Vec<&str> = known.map(String::as_str).collect();
    let hint = if known.is_empty() {
        format!("hint: No variants are configured in {DEFAULT_CONFIG_FILENAME}")
    } else {
        format!("hint: Configured variants: {}", known.join(", "))
    };

    anyhow::anyhow!("Unknown variant: {name}\n\n{hint}")
}
