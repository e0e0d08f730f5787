//! distcolor CLI - distance-to-color visualization workflows
//!
//! Every subcommand reads its section from a TOML config file:
//! ```text
//! distcolor --config run.toml distance-map
//! distcolor --config run.toml scale-bar
//! distcolor --config run.toml overlay
//! distcolor --config run.toml color-mesh
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use distcolor::config::Config;

/// Color distance fields of segmentations and meshes
#[derive(Parser)]
#[command(name = "distcolor", version)]
#[command(about = "Map distances to colors for microscopy and mesh data", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = "distcolor.toml")]
    config: PathBuf,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Color the distance to a segmented region for every slice of a folder
    DistanceMap {
        /// Also write the matching scale bar (needs a [scale_bar] section)
        #[arg(long)]
        with_scale_bar: bool,
    },
    /// Render the legend for the configured color stops
    ScaleBar,
    /// Blend colored masks over gray slices
    Overlay,
    /// Color a mesh by its distance to a reference mesh
    ColorMesh,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::from_path(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    match cli.command {
        Commands::DistanceMap { with_scale_bar } => {
            distance_map(&config)?;
            if with_scale_bar {
                scale_bar(&config)?;
            }
        }
        Commands::ScaleBar => scale_bar(&config)?,
        Commands::Overlay => overlay(&config)?,
        Commands::ColorMesh => color_mesh(&config)?,
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    // Default: WARN for everything, INFO for distcolor.
    // Override with RUST_LOG (e.g. RUST_LOG=distcolor=trace).
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive(format!("distcolor={level}").parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

fn progress_bar(message: &'static str) -> Result<ProgressBar> {
    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("=> "),
    );
    progress.set_message(message);
    Ok(progress)
}

fn distance_map(config: &Config) -> Result<()> {
    let spec = config.color_spec().context("invalid color stops")?;
    let report = config
        .distance_map()?
        .to_batch(spec)?
        .with_progress(progress_bar("distance maps")?)
        .execute()
        .context("distance map batch failed")?;
    println!("Wrote {} distance maps", report.written.len());
    Ok(())
}

fn scale_bar(config: &Config) -> Result<()> {
    let spec = config.color_spec().context("invalid color stops")?;
    let section = config.scale_bar()?;
    let path = section
        .bar
        .write(&spec, &section.output_dir)
        .context("writing scale bar")?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn overlay(config: &Config) -> Result<()> {
    let report = config
        .overlay()?
        .to_batch()
        .with_progress(progress_bar("overlays")?)
        .execute()
        .context("overlay batch failed")?;
    println!(
        "Wrote {} overlays, skipped {}",
        report.written.len(),
        report.skipped.len()
    );
    Ok(())
}

fn color_mesh(config: &Config) -> Result<()> {
    let section = config.color_mesh()?;
    let report = section
        .to_job()?
        .execute()
        .with_context(|| format!("coloring {}", section.target.display()))?;
    info!(
        min = report.coloring.min_distance,
        max = report.coloring.max_distance,
        "distance range"
    );
    for file in &report.files {
        println!("Wrote {}", file.display());
    }
    Ok(())
}
