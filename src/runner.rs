//! Pipeline runner
//!
//! Load a voxel file, extract its shell, assemble the build plan and write it
//! out. Used by the binary; kept in the library so it can be driven from
//! tests.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use voxbuild_core::{BuildPlan, OccupancyGrid, PlanSummary, ShellGrid, VoxelFile};
use voxbuild_planner::{extract_shell, write_plan, BuildPlanAssembler};
use voxbuild_settings::Config;

/// One `plan` invocation.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub input: PathBuf,
    /// `None` writes to stdout
    pub output: Option<PathBuf>,
    pub config: Config,
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn load_grid(path: &Path) -> Result<OccupancyGrid> {
    VoxelFile::load(path).with_context(|| format!("Failed to load voxel file {}", path.display()))
}

/// Extract the shell of `input` and write it as a voxel file.
pub fn extract_shell_file(input: &Path, output: Option<&Path>) -> Result<ShellGrid> {
    let grid = load_grid(input)?;
    let shell = extract_shell(&grid).context("Shell extraction failed")?;

    let mut writer = open_output(output)?;
    VoxelFile::from_grid(&shell)
        .to_writer(&mut writer)
        .context("Failed to write shell")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(shell)
}

/// Extract the shell of `grid` and assemble its build plan.
pub fn build_plan(grid: &OccupancyGrid, config: &Config) -> Result<BuildPlan> {
    let assembler = BuildPlanAssembler::new(config.plan_options())
        .context("Invalid planning parameters")?;
    let shell = extract_shell(grid).context("Shell extraction failed")?;
    let plan = assembler
        .assemble(grid, &shell)
        .context("Build plan assembly failed")?;
    Ok(plan)
}

/// Run the whole pipeline for one request.
pub fn run_plan(request: &PlanRequest) -> Result<PlanSummary> {
    request.config.validate().context("Invalid configuration")?;

    let grid = load_grid(&request.input)?;
    let plan = build_plan(&grid, &request.config)?;

    let summary = plan.summary();
    info!(
        "Planned {} workers, {} layers, {} columns, path cost {}",
        summary.workers, summary.layers, summary.columns, summary.path_cost
    );

    let output = &request.config.output;
    let writer = open_output(request.output.as_deref())?;
    write_plan(&plan, output.format, &output.table_name, writer)
        .context("Failed to write build plan")?;
    Ok(summary)
}
