//! # Validate Command Implementation
//!
//! Loads the credit database and reports whether it is valid, without
//! writing anything. When variants are configured, their dependency lists
//! are also read and checked against the database.

use anyhow::Result;
use clap::Args;

use credits::database::CreditDatabase;
use credits::dependencies::read_dependency_list;
use credits::output::{OutputConfig, Status};
use credits::selection::select;

use super::ProjectArgs;

/// Load a credit database and report whether it is valid
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Fail if a variant dependency has no credit.
    #[arg(long)]
    pub strict: bool,
}

/// Execute the `validate` command.
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let config = args.project.load_config()?;
    let location = args.project.database_location(&config)?;

    println!(
        "{} Validating credit database: {}",
        Status::Scan.marker(&out),
        location
    );

    let database = match CreditDatabase::load(&location) {
        Ok(database) => database,
        Err(e) => {
            println!("{} {}", Status::Error.marker(&out), e);
            return Err(anyhow::anyhow!(
                "Credit database validation failed: {}",
                location
            ));
        }
    };

    println!("\n{} Database Summary:", Status::Info.marker(&out));
    println!("   Credits: {}", database.len());
    println!("   Forced credits: {}", database.forced().count());
    println!("   Artifacts: {}", database.artifact_count());

    let mut has_errors = false;
    let mut has_warnings = false;

    if !config.variants.is_empty() {
        println!("\n{} Checking variants...", Status::Scan.marker(&out));
    }

    for (name, path) in &config.variants {
        let dependencies = match read_dependency_list(path) {
            Ok(dependencies) => dependencies,
            Err(e) => {
                println!(
                    "{} {}: unable to read {}: {}",
                    Status::Error.marker(&out),
                    name,
                    path.display(),
                    e
                );
                has_errors = true;
                continue;
            }
        };

        let selection = select(&database, dependencies);
        if selection.unmatched().is_empty() {
            println!(
                "{} {}: {} credits",
                Status::Ok.marker(&out),
                name,
                selection.credits().len()
            );
        } else {
            println!(
                "{} {}: {} credits, {} dependencies without credit",
                Status::Warn.marker(&out),
                name,
                selection.credits().len(),
                selection.unmatched().len()
            );
            for artifact in selection.unmatched() {
                println!("      {}", artifact);
            }
            has_warnings = true;
        }
    }

    if has_errors {
        return Err(anyhow::anyhow!("Variant validation failed"));
    }

    if has_warnings && args.strict {
        println!(
            "{} Dependencies without credit (strict mode enabled)",
            Status::Error.marker(&out)
        );
        return Err(anyhow::anyhow!("Validation failed in strict mode"));
    }

    println!("\n{} Credit database is valid", Status::Ok.marker(&out));
    Ok(())
}
