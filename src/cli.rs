use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Poseidon ground-motion record selection.
#[derive(Parser)]
#[command(
    name = "poseidon",
    version,
    about = "Ground-motion record selection for seismic hazard analysis"
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
    /// Select a record subset matching the target spectrum.
    Select(SelectArgs),
    /// Validate configuration and input data without optimizing.
    Check(CheckArgs),
}

/// Arguments for the `select` subcommand.
#[derive(clap::Args)]
pub struct SelectArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "poseidon.toml")]
    pub config: PathBuf,

    /// Override candidate-pool Parquet path from config.
    #[arg(short, long)]
    pub pool: Option<PathBuf>,

    /// Override selection output Parquet path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `check` subcommand.
#[derive(clap::Args)]
pub struct CheckArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "poseidon.toml")]
    pub config: PathBuf,

    /// Override candidate-pool Parquet path from config.
    #[arg(short, long)]
    pub pool: Option<PathBuf>,
}
