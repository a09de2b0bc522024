//! Resource Codegen CLI
//!
//! Regenerates the resource classes, schema modules, README method docs and
//! root client wiring of a TypeScript client package from an OpenAPI
//! description. Run it from the package root.

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use resource_codegen_generator::{GeneratorConfig, Orchestrator, RunSummary};
use resource_codegen_parser::{SpecLocation, SpecSource, DEFAULT_SPEC_URL};
use std::env;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "resource-codegen")]
#[command(version, about = "Generate TypeScript client resources from an OpenAPI description", long_about = None)]
#[command(after_help = "EXAMPLES:\n  \
    # Generate from the published description\n  \
    resource-codegen\n\n  \
    # Generate from a local file\n  \
    resource-codegen --spec ./openapi.json\n\n\
    Set RUST_LOG=info to list every generated file.")]
struct Cli {
    /// URL or path of the OpenAPI description
    #[arg(long, default_value = DEFAULT_SPEC_URL)]
    spec: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let project_root = env::current_dir().context("Failed to resolve current directory")?;
    let location = SpecLocation::parse(&cli.spec);

    println!("{} Loading API description: {}", "→".cyan(), location);
    let orchestrator = Orchestrator::new(
        SpecSource::new(location),
        GeneratorConfig::for_project(&project_root),
    )
    .context("Failed to create generator")?;

    println!("{} Generating resources...", "→".cyan());
    let summary = orchestrator.run().context("Failed to generate resources")?;

    print_summary(&summary, &project_root);
    Ok(())
}

fn print_summary(summary: &RunSummary, project_root: &Path) {
    println!("\n{}", "✓ Generation complete!".green().bold());
    println!("  Resources: {}", summary.resources);
    println!("  Beta methods: {}", summary.beta_methods);

    println!("\n{}", "Generated files:".bold());
    for path in &summary.files {
        let shown = path.strip_prefix(project_root).unwrap_or(path);
        println!("  • {}", shown.display().to_string().cyan());
    }

    let status = |changed: bool| if changed { "updated" } else { "unchanged" };
    println!("\n  README.md: {}", status(summary.readme_updated).yellow());
    println!("  src/client.ts: {}", status(summary.client_updated).yellow());
}
