//! # VoxBuild
//!
//! Plans how a team of workers builds a voxel model layer by layer:
//! - Shell extraction keeps only the solid voxels reachable from outside
//! - Workers get contiguous, evenly loaded rectangular regions
//! - Each worker's layer is ordered into a short tour of `{x,z}` columns
//!
//! ## Architecture
//!
//! VoxBuild is organized as a workspace with multiple crates:
//!
//! 1. **voxbuild-core** - Grids, tours, partitions, plan types, voxel files
//! 2. **voxbuild-planner** - Shell extraction, partitioning, tour planning, export
//! 3. **voxbuild-settings** - Configuration files and validation
//! 4. **voxbuild** - Pipeline runner and the command-line binary

pub mod runner;

pub use runner::{build_plan, extract_shell_file, run_plan, PlanRequest};

pub use voxbuild_core::{
    BuildPlan, ExportFormat, GridColumn, GridDims, OccupancyGrid, PlanOptions, PlanSummary,
    ShellGrid, Tour, TourStrategy, TourTopology, VoxelFile, VoxelVolume, WorkloadWeighting,
};
pub use voxbuild_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Events go to stderr so stdout stays free for exported plans. `RUST_LOG`
/// overrides the default `info` level.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
