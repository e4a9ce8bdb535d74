//! # CLI Command Implementations
//!
//! Each subcommand of the `credits` tool lives in its own file, with an
//! `Args` struct derived using `clap` and an `execute` function that calls
//! into the `credits` library.
//!
//! Settings shared by the commands are resolved here with the precedence
//! command-line flag, then environment variable, then `.credits.yaml`.

pub mod generate;
pub mod select;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use credits::config::{self, CreditsConfig};
use credits::database::CreditDatabase;
use credits::defaults::{CONFIG_ENV, DATABASE_ENV, DEFAULT_CONFIG_FILENAME};
use credits::suggestions;

/// Options locating the project configuration and the credit database.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Path to the .credits.yaml configuration file.
    ///
    /// Defaults to .credits.yaml in the current directory, if present.
    #[arg(short, long, value_name = "FILE", env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Location of the credit database: a file path, file:// or http(s):// URL.
    #[arg(short, long, value_name = "LOCATION", env = DATABASE_ENV)]
    pub database: Option<String>,
}

impl ProjectArgs {
    /// Loads the configuration file, or an empty configuration when none
    /// was given and the default file does not exist.
    pub fn load_config(&self) -> Result<CreditsConfig> {
        let path = match &self.config {
            Some(path) if !path.is_file() => return Err(suggestions::config_not_found(path)),
            Some(path) => path.as_path(),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILENAME);
                if !path.is_file() {
                    log::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILENAME);
                    return Ok(CreditsConfig::default());
                }
                path
            }
        };

        log::debug!("Loading configuration from {}", path.display());
        config::from_file(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))
    }

    /// The database location, flag or environment first.
    pub fn database_location(&self, config: &CreditsConfig) -> Result<String> {
        self.database
            .clone()
            .or_else(|| config.database.clone())
            .ok_or_else(suggestions::database_not_configured)
    }
}

/// Loads the credit database, wrapping any failure into one build error.
pub fn load_database(location: &str) -> Result<CreditDatabase> {
    CreditDatabase::load(location)
        .with_context(|| format!("Unable to load credit database {}", location))
}
