//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Credits - generate third-party attributions from a credit database
#[derive(Parser, Debug)]
#[command(name = "credits")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the credits of every configured variant
    Generate(commands::generate::GenerateArgs),

    /// Print the keys of the credits selected for a dependency list
    Select(commands::select::SelectArgs),

    /// Load a credit database and report whether it is valid
    Validate(commands::validate::ValidateArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::Generate(args) => commands::generate::execute(args, &self.color),
            Commands::Select(args) => commands::select::execute(args, &self.color),
            Commands::Validate(args) => commands::validate::execute(args, &self.color),
        }
    }
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // Fails only if a logger is already installed.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_env_backed_arguments() {
        use credits::defaults::{CONFIG_ENV, DATABASE_ENV, TEMPLATE_ENV};

        let cli = Cli::command();
        let generate = cli.find_subcommand("generate").unwrap();
        let env_of = |id: &str| {
            generate
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .map(|env| env.to_string_lossy().into_owned())
        };

        assert_eq!(env_of("config").as_deref(), Some(CONFIG_ENV));
        assert_eq!(env_of("database").as_deref(), Some(DATABASE_ENV));
        assert_eq!(env_of("template").as_deref(), Some(TEMPLATE_ENV));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "credits",
            "validate",
            "--database",
            "credits.xml",
            "--log-level",
            "debug",
            "--color",
            "never",
        ])
        .unwrap();

        assert_eq!(cli.log_level, "debug");
        assert_eq!(cli.color, "never");
        assert!(matches!(cli.command, Commands::Validate(_)));
    }
}
