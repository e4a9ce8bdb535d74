//! # Generate Command Implementation
//!
//! Renders the credits file of each build variant.
//!
//! With `--dependencies`, a single credits file is generated from that list
//! into the output directory. Otherwise every variant configured in
//! `.credits.yaml` is generated into `<output-dir>/<variant>/`. Variants are
//! independent of each other: each one loads its own copy of the database,
//! and they run in parallel.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rayon::prelude::*;

use credits::defaults::{DEFAULT_OUTPUT_DIR, TEMPLATE_ENV};
use credits::dependencies::read_dependency_list;
use credits::output::{OutputConfig, Status};
use credits::render::{write_output, CreditsRenderer, TemplateSource};
use credits::selection::select;
use credits::suggestions;

use super::{load_database, ProjectArgs};

/// Render the credits of every configured variant
#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Template file; the built-in HTML template is used if unset.
    #[arg(short, long, value_name = "FILE", env = TEMPLATE_ENV)]
    pub template: Option<PathBuf>,

    /// Directory the credits files are written to.
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Name of the generated file (overrides output-name in the configuration).
    #[arg(long, value_name = "NAME")]
    pub output_name: Option<String>,

    /// Dependency list to generate a single credits file from, ignoring
    /// configured variants.
    #[arg(long, value_name = "FILE", conflicts_with = "variant")]
    pub dependencies: Option<PathBuf>,

    /// Only generate the named variants.
    #[arg(long, value_name = "NAME")]
    pub variant: Vec<String>,
}

/// One unit of generation: a dependency list and where its output goes.
#[derive(Debug)]
struct Job {
    name: Option<String>,
    dependencies: PathBuf,
    output_dir: PathBuf,
}

/// Result of a job, reported once all jobs have finished.
#[derive(Debug)]
struct Report {
    name: Option<String>,
    path: PathBuf,
    credits: usize,
    unmatched: usize,
}

/// Execute the `generate` command.
pub fn execute(args: GenerateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let config = args.project.load_config()?;
    let database = args.project.database_location(&config)?;

    let template = match args.template.clone().or_else(|| config.template.clone()) {
        Some(path) => TemplateSource::File(path),
        None => TemplateSource::Builtin,
    };
    let output_name = args
        .output_name
        .clone()
        .unwrap_or_else(|| config.output_name().to_string());

    let jobs = match &args.dependencies {
        Some(dependencies) => vec![Job {
            name: None,
            dependencies: dependencies.clone(),
            output_dir: args.output_dir.clone(),
        }],
        None => {
            for name in &args.variant {
                if !config.variants.contains_key(name) {
                    return Err(suggestions::unknown_variant(name, config.variants.keys()));
                }
            }

            config
                .variants
                .iter()
                .filter(|(name, _)| args.variant.is_empty() || args.variant.contains(name))
                .map(|(name, dependencies)| Job {
                    name: Some(name.clone()),
                    dependencies: dependencies.clone(),
                    output_dir: args.output_dir.join(name),
                })
                .collect()
        }
    };

    if jobs.is_empty() {
        return Err(suggestions::no_dependencies());
    }

    println!(
        "{} Generating credits from {}",
        Status::Scan.marker(&out),
        database
    );

    let reports = jobs
        .par_iter()
        .map(|job| run_job(job, &database, &template, &output_name))
        .collect::<Result<Vec<_>>>()?;

    for report in &reports {
        let label = report.name.as_deref().unwrap_or("credits");
        println!(
            "{} {}: {} credits written to {}",
            Status::Write.marker(&out),
            label,
            report.credits,
            report.path.display()
        );
        if report.unmatched > 0 {
            println!(
                "{} {}: {} dependencies have no credit",
                Status::Warn.marker(&out),
                label,
                report.unmatched
            );
        }
    }

    println!("{} Credits generated", Status::Ok.marker(&out));
    Ok(())
}

fn run_job(job: &Job, database: &str, template: &TemplateSource, output_name: &str) -> Result<Report> {
    let context = || match &job.name {
        Some(name) => format!("Failed to generate credits for variant {}", name),
        None => "Failed to generate credits".to_string(),
    };

    let dependencies = read_dependency_list(&job.dependencies)
        .with_context(|| format!("Unable to read dependency list {}", job.dependencies.display()))
        .with_context(context)?;
    let database = load_database(database).with_context(context)?;
    let selection = select(&database, dependencies);

    let renderer = CreditsRenderer::new(template).with_context(context)?;
    let content = renderer.render(selection.credits()).with_context(context)?;
    let path = write_output(&job.output_dir, output_name, &content).with_context(context)?;

    Ok(Report {
        name: job.name.clone(),
        path,
        credits: selection.credits().len(),
        unmatched: selection.unmatched().len(),
    })
}
