use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Boreas sea-surface-temperature EOF analysis.
#[derive(Parser)]
#[command(
    name = "boreas",
    version,
    about = "EOF analysis of gridded SST anomalies"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Run the anomaly/EOF pipeline and render the figure.
    Analyze(AnalyzeArgs),
}

/// Arguments for the `analyze` subcommand.
#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "boreas.toml")]
    pub config: PathBuf,

    /// Override output PNG path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override summary JSON path from config.
    #[arg(short, long)]
    pub summary: Option<PathBuf>,
}
