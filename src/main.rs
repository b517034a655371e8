//! VoxBuild command-line interface
//!
//! - `shell`: write the exterior shell of a voxel file
//! - `plan`: plan per-worker, per-layer tours and export them
//! - `config`: show the effective configuration

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use voxbuild::{
    extract_shell_file, init_logging, run_plan, Config, ExportFormat, PlanRequest, TourStrategy,
    VERSION,
};

#[derive(Parser, Debug)]
#[command(name = "voxbuild")]
#[command(about = "Plan layer-by-layer build tours from voxel models", long_about = None)]
#[command(
    version = VERSION,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")")
)]
struct Cli {
    /// Configuration file (.toml or .json); defaults to the platform config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract the exterior shell of a voxel file
    Shell(ShellArgs),
    /// Plan build tours for a voxel file
    Plan(PlanArgs),
    /// Print the effective configuration as TOML
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
struct ShellArgs {
    /// Voxel file: {"shape": [nx, ny, nz], "voxels": [[x, y, z], ...]}
    input: PathBuf,

    /// Output voxel file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PlanArgs {
    /// Voxel file: {"shape": [nx, ny, nz], "voxels": [[x, y, z], ...]}
    input: PathBuf,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Total number of workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Split each worker column into this many depth ranges
    #[arg(short, long)]
    depth_splits: Option<usize>,

    /// Export format (lua, json)
    #[arg(short, long)]
    format: Option<ExportFormat>,

    /// Tour strategy (optimized, raster)
    #[arg(short, long)]
    strategy: Option<TourStrategy>,

    /// Plan layers on a single thread
    #[arg(long)]
    no_parallel: bool,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Print the default config file location instead
    #[arg(long)]
    path: bool,
}

impl PlanArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(workers) = self.workers {
            config.workload.workers = workers;
        }
        if let Some(depth) = self.depth_splits {
            config.workload.depth_splits = Some(depth);
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(strategy) = self.strategy {
            config.planning.strategy = strategy;
        }
        if self.no_parallel {
            config.planning.parallel = false;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let mut config =
        Config::load_or_default(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Shell(args) => {
            extract_shell_file(&args.input, args.output.as_deref())?;
        }
        Commands::Plan(args) => {
            args.apply(&mut config);
            let request = PlanRequest {
                input: args.input,
                output: args.output,
                config,
            };
            run_plan(&request)?;
        }
        Commands::Config(args) => {
            if args.path {
                println!("{}", Config::default_path()?.display());
            } else {
                print!("{}", config.to_toml()?);
            }
        }
    }

    Ok(())
}
