//! # Select Command Implementation
//!
//! Prints the keys of the credits selected for a set of dependencies, one
//! per line and in key order, so the output can be consumed by scripts.
//! Dependencies without a credit are logged as warnings and do not fail
//! the command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use credits::dependencies::read_dependency_list;
use credits::model::ArtifactCoordinate;
use credits::output::{OutputConfig, Status};
use credits::selection::select;
use credits::suggestions;

use super::{load_database, ProjectArgs};

/// Print the keys of the credits selected for a dependency list
#[derive(Args, Debug)]
pub struct SelectArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Dependency list file, one group:artifact[:version] per line.
    #[arg(long, value_name = "FILE", conflicts_with = "variant")]
    pub dependencies: Option<PathBuf>,

    /// Use the dependency list of a configured variant.
    #[arg(long, value_name = "NAME")]
    pub variant: Option<String>,

    /// Dependency coordinates given directly, as group:artifact[:version].
    #[arg(value_name = "COORDINATE")]
    pub artifacts: Vec<ArtifactCoordinate>,

    /// Also print the component, owner and license of each credit.
    #[arg(short, long)]
    pub long: bool,
}

/// Execute the `select` command.
pub fn execute(args: SelectArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let config = args.project.load_config()?;
    let location = args.project.database_location(&config)?;

    let list = match (&args.dependencies, &args.variant) {
        (Some(path), _) => Some(path.clone()),
        (None, Some(name)) => match config.variants.get(name) {
            Some(path) => Some(path.clone()),
            None => return Err(suggestions::unknown_variant(name, config.variants.keys())),
        },
        (None, None) => None,
    };

    let mut dependencies = args.artifacts;
    if let Some(path) = list {
        dependencies.extend(
            read_dependency_list(&path)
                .with_context(|| format!("Unable to read dependency list {}", path.display()))?,
        );
    }

    let database = load_database(&location)?;
    let selection = select(&database, dependencies);

    for credit in selection.credits() {
        if args.long {
            println!(
                "{}\t{}\t{}\t{}",
                credit.key, credit.component, credit.owner, credit.license
            );
        } else {
            println!("{}", credit.key);
        }
    }

    if !selection.unmatched().is_empty() {
        eprintln!(
            "{} {} dependencies have no credit",
            Status::Warn.marker(&out),
            selection.unmatched().len()
        );
    }

    Ok(())
}
