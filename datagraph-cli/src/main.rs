//! Datagraph CLI - render hierarchical enrichment datasets as bubble charts

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output: identical input yields identical files
// - Every render failure is reported with its cause; nothing is retried

use anyhow::Context;
use clap::{Parser, Subcommand};
use datagraph_core::config::{self, DatagraphConfig};
use datagraph_core::report;
use datagraph_core::{render_graph, render_html_report, Dataset, ReportInfo};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "datagraph")]
#[command(about = "Render hierarchical enrichment datasets as circle-packed bubble charts")]
#[command(version = env!("DATAGRAPH_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a dataset to an SVG document or an HTML report page
    Render {
        /// Path to the dataset JSON file
        input: PathBuf,

        /// Visualization kind (overrides config file)
        #[arg(long)]
        kind: Option<String>,

        /// Canvas side length in pixels (overrides config file)
        #[arg(long)]
        diameter: Option<f64>,

        /// Inter-circle padding in canvas units (overrides config file)
        #[arg(long)]
        padding: Option<f64>,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "svg")]
        format: RenderFormat,

        /// Output file path (default: input stem + .svg/.html)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Load and validate a dataset, reporting its shape and extents
    Inspect {
        /// Path to the dataset JSON file
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: InspectFormat,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum RenderFormat {
    Svg,
    Html,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum InspectFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            kind,
            diameter,
            padding,
            config: config_path,
            format,
            output,
        } => {
            if !input.exists() {
                anyhow::bail!("Dataset does not exist: {}", input.display());
            }

            let file_config = load_config(config_path.as_deref())?;
            let resolved = config::resolve(file_config, diameter, padding, kind)?;

            let dataset = Dataset::from_path(&input)?;
            let scene = render_graph(&resolved.kind, &dataset, &resolved)?;

            let extension = match format {
                RenderFormat::Svg => "svg",
                RenderFormat::Html => "html",
            };
            let output_path = output.unwrap_or_else(|| input.with_extension(extension));

            let contents = match format {
                RenderFormat::Svg => scene.to_svg(),
                RenderFormat::Html => render_html_report(
                    &scene,
                    &ReportInfo {
                        source: display_name(&input),
                        node_count: dataset.node_count(),
                        leaf_count: dataset.leaf_count(),
                    },
                ),
            };
            std::fs::write(&output_path, contents)
                .with_context(|| format!("Failed to write output: {}", output_path.display()))?;

            println!(
                "Rendered {} leaves to {}",
                dataset.leaf_count(),
                output_path.display()
            );
        }
        Commands::Inspect { input, format } => {
            let dataset = Dataset::from_path(&input)?;
            let summary = report::summarize(&dataset, &display_name(&input));
            match format {
                InspectFormat::Text => print!("{}", report::render_text(&summary)),
                InspectFormat::Json => println!("{}", report::render_json(&summary)),
            }
        }
    }

    Ok(())
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<Option<DatagraphConfig>> {
    match explicit {
        Some(path) => DatagraphConfig::load(path).map(Some),
        None => {
            let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
            DatagraphConfig::discover(&cwd)
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
