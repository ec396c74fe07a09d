/// Community Gen: renders a neighborhood table into page content.
///
/// Usage: community_gen --input <table.ron|json> --output <file> [--format json|ts]

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use community_content::core::assemble::DuplicatePolicy;
use community_content::core::dataset::{load_inputs, write_records, OutputFormat};
use community_content::core::pipeline::ContentGenerator;
use std::path::PathBuf;
use std::process;
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Ts,
}

#[derive(Parser)]
#[command(name = "community_gen")]
#[command(about = "Generate neighborhood page content from a fact table", long_about = None)]
struct Cli {
    /// Neighborhood table (.ron or .json)
    #[arg(short, long)]
    input: PathBuf,

    /// Output file
    #[arg(short, long)]
    output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: Format,

    /// Generator config (RON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Template file merged over the built-in templates
    #[arg(short, long)]
    templates: Option<PathBuf>,

    /// Seed for choosing paragraph alternatives (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop at the first duplicate slug instead of skipping it
    #[arg(long)]
    abort_on_duplicate: bool,

    /// Exit non-zero when any record failed
    #[arg(long)]
    strict: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let mut builder = ContentGenerator::builder();
    if let Some(ref path) = cli.config {
        builder = builder.config_path(path);
    }
    if let Some(ref path) = cli.templates {
        builder = builder.templates_path(path);
    }
    if let Some(seed) = cli.seed {
        builder = builder.seed(seed);
    }
    if cli.abort_on_duplicate {
        builder = builder.duplicate_policy(DuplicatePolicy::AbortRun);
    }
    let generator = builder.build().context("failed to build generator")?;

    let inputs = load_inputs(&cli.input)
        .with_context(|| format!("failed to load '{}'", cli.input.display()))?;
    info!(count = inputs.len(), path = %cli.input.display(), "loaded neighborhoods");

    let report = generator.generate(&inputs)?;

    let format = match cli.format {
        Format::Json => OutputFormat::Json,
        Format::Ts => OutputFormat::TypeScript,
    };
    write_records(&cli.output, &report.records, format)
        .with_context(|| format!("failed to write '{}'", cli.output.display()))?;

    for failure in &report.failures {
        eprintln!("FAILED [{}] {}", failure.index, failure.error);
    }
    println!(
        "Wrote {} records to '{}' ({} failed)",
        report.records.len(),
        cli.output.display(),
        report.failures.len()
    );

    if cli.strict && !report.is_clean() {
        process::exit(1);
    }
    Ok(())
}
