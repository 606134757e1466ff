//! Command-line entry point for the cloudward pipeline.
//!
//! Every flag can also be supplied through an environment variable, which
//! keeps containerized deployments configuration-free:
//!
//!     cloudward --input points.txt --output c_points.txt
//!     CLOUDWARD_INPUT=points.txt CLOUDWARD_OUTPUT=c_points.txt cloudward
//!
//! The environment adapter lives entirely here; the library never reads
//! process-global state.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cloudward::pipeline::{self, PipelineConfig};

/// Derive outward-offset points from a labeled 3D point cloud.
#[derive(Parser)]
#[command(name = "cloudward")]
#[command(about = "Outward-offset point generation for labeled 3D point clouds", long_about = None)]
struct Cli {
    /// Input data file, one `label x y z` row per line
    #[arg(short, long, env = "CLOUDWARD_INPUT")]
    input: PathBuf,

    /// Output data file for the derived points
    #[arg(short, long, env = "CLOUDWARD_OUTPUT")]
    output: PathBuf,

    /// Optional output image for the 3D figure (.svg for vector output)
    #[arg(long, env = "CLOUDWARD_PLOT")]
    plot: Option<PathBuf>,

    /// Offset distance applied along each outward direction
    #[arg(short, long, default_value_t = pipeline::DEFAULT_DISTANCE, env = "CLOUDWARD_DISTANCE")]
    distance: f64,

    /// Label whose points are offset outwards
    #[arg(long, default_value = pipeline::DEFAULT_SOURCE_LABEL, env = "CLOUDWARD_LABEL")]
    label: String,

    /// Restrict the centroid to these labels (repeatable; defaults to all)
    #[arg(long = "centroid-label", value_name = "LABEL")]
    centroid_labels: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = PipelineConfig::new(cli.input, cli.output);
    config.plot = cli.plot;
    config.distance = cli.distance;
    config.source_label = cli.label;
    config.centroid_labels = (!cli.centroid_labels.is_empty()).then_some(cli.centroid_labels);

    let summary = pipeline::run(&config)?;
    println!(
        "{} points loaded, {} outward points written",
        summary.loaded, summary.derived
    );
    Ok(())
}
