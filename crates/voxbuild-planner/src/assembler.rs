//! Build plan assembly
//!
//! Splits the grid into one rectangular region per worker (x columns, then
//! optionally z depth ranges inside each column), and plans every layer that
//! holds shell voxels anywhere in the grid. Every worker lists the same layers,
//! with an empty tour where its region has nothing in that layer, so the k-th
//! entry of each worker refers to the same height. Assignments come out in
//! ascending x range, then ascending z range; layers in ascending `y`.

use crate::error::{ParameterError, PlannerResult};
use crate::partition::partition_counts;
use crate::tour::TourPlanner;
use rayon::prelude::*;
use std::ops::Range;
use tracing::{debug, info, warn};
use voxbuild_core::{
    Axis, BuildPlan, GridColumn, LayerPlan, OccupancyGrid, PlanOptions, ShellGrid, VoxelVolume,
    WorkerAssignment, WorkloadWeighting,
};

/// A worker's rectangular footprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub x: Range<usize>,
    pub z: Range<usize>,
}

/// One layer of one region waiting to be planned.
struct LayerJob {
    region: usize,
    y: usize,
    columns: Vec<GridColumn>,
}

/// Turns a shell grid into per-worker, per-layer tours.
#[derive(Debug, Clone)]
pub struct BuildPlanAssembler {
    options: PlanOptions,
    planner: TourPlanner,
    depth: usize,
}

impl BuildPlanAssembler {
    /// Fails on a worker count that cannot be split as requested.
    pub fn new(options: PlanOptions) -> PlannerResult<Self> {
        if options.workers == 0 {
            return Err(ParameterError::NoWorkers.into());
        }
        let depth = options.depth_splits.unwrap_or(1);
        if depth == 0 {
            return Err(ParameterError::NoDepthSplits.into());
        }
        if options.workers % depth != 0 {
            return Err(ParameterError::IndivisibleWorkers {
                workers: options.workers,
                depth,
            }
            .into());
        }

        Ok(Self {
            planner: TourPlanner::from_options(&options),
            options,
            depth,
        })
    }

    pub fn options(&self) -> &PlanOptions {
        &self.options
    }

    /// Number of worker columns along x
    pub fn columns(&self) -> usize {
        self.options.workers / self.depth
    }

    /// Assemble a plan for `shell`, balancing workers by the weighting the
    /// options ask for. `source` is the solid grid the shell came from.
    pub fn assemble(&self, source: &OccupancyGrid, shell: &ShellGrid) -> PlannerResult<BuildPlan> {
        if source.dims() != shell.dims() {
            return Err(ParameterError::ShapeMismatch {
                source_shape: source.dims().as_array(),
                shell_shape: shell.dims().as_array(),
            }
            .into());
        }
        match self.options.weighting {
            WorkloadWeighting::Solid => self.assemble_weighted(shell, source),
            WorkloadWeighting::Shell => self.assemble_weighted(shell, shell),
        }
    }

    /// Assemble a plan using the shell itself as the workload weight.
    pub fn assemble_shell(&self, shell: &ShellGrid) -> PlannerResult<BuildPlan> {
        self.assemble_weighted(shell, shell)
    }

    fn assemble_weighted(
        &self,
        shell: &ShellGrid,
        weights: &impl VoxelVolume,
    ) -> PlannerResult<BuildPlan> {
        let dims = shell.dims();
        // part counts are only checked against a grid that has cells
        if dims.is_degenerate() {
            warn!("Grid {} has no cells, plan is empty", dims);
            return Ok(BuildPlan::default());
        }

        let regions = self.regions(weights)?;
        info!(
            "Split {} grid into {} worker regions ({} x {})",
            dims,
            regions.len(),
            self.columns(),
            self.depth
        );

        let layers = occupied_layers(shell);
        let jobs = Self::layer_jobs(shell, &regions, &layers);
        debug!(
            "Planning {} layers for {} regions ({} jobs)",
            layers.len(),
            regions.len(),
            jobs.len()
        );

        let planned: Vec<LayerPlan> = if self.options.parallel {
            jobs.par_iter()
                .map(|job| self.plan_layer(job))
                .collect::<PlannerResult<_>>()?
        } else {
            jobs.iter()
                .map(|job| self.plan_layer(job))
                .collect::<PlannerResult<_>>()?
        };

        let mut assignments: Vec<WorkerAssignment> = regions
            .into_iter()
            .map(|region| WorkerAssignment {
                x_range: region.x,
                z_range: region.z,
                layers: Vec::new(),
            })
            .collect();
        for (job, layer) in jobs.iter().zip(planned) {
            assignments[job.region].layers.push(layer);
        }

        for (i, a) in assignments.iter().enumerate() {
            if a.column_count() == 0 {
                warn!(
                    "Worker {} (x {:?}, z {:?}) has no shell voxels",
                    i, a.x_range, a.z_range
                );
            }
        }

        Ok(BuildPlan::new(assignments))
    }

    /// Worker regions in output order.
    pub fn regions(&self, weights: &impl VoxelVolume) -> PlannerResult<Vec<Region>> {
        let dims = weights.dims();
        let columns = self.columns();
        if columns > dims.nx {
            return Err(ParameterError::TooManyParts {
                axis: Axis::X.to_string(),
                parts: columns,
                len: dims.nx,
            }
            .into());
        }
        if self.options.depth_splits.is_some() && self.depth > dims.nz {
            return Err(ParameterError::TooManyParts {
                axis: Axis::Z.to_string(),
                parts: self.depth,
                len: dims.nz,
            }
            .into());
        }

        let x_profile = weights.profile(Axis::X, 0..dims.nx, 0..dims.nz);
        let x_parts = partition_counts(&x_profile, columns)?;
        debug!("x boundaries: {:?}", x_parts.boundaries());

        let mut regions = Vec::with_capacity(self.options.workers);
        for x in x_parts.ranges() {
            if self.options.depth_splits.is_none() {
                regions.push(Region { x, z: 0..dims.nz });
                continue;
            }
            let z_profile = weights.profile(Axis::Z, x.clone(), 0..dims.nz);
            let z_parts = partition_counts(&z_profile, self.depth)?;
            debug!("z boundaries for x {:?}: {:?}", x, z_parts.boundaries());
            for z in z_parts.ranges() {
                regions.push(Region { x: x.clone(), z });
            }
        }
        Ok(regions)
    }

    fn layer_jobs(shell: &ShellGrid, regions: &[Region], layers: &[usize]) -> Vec<LayerJob> {
        let mut jobs = Vec::with_capacity(regions.len() * layers.len());
        for (index, region) in regions.iter().enumerate() {
            for &y in layers {
                jobs.push(LayerJob {
                    region: index,
                    y,
                    columns: layer_columns(shell, y, region),
                });
            }
        }
        jobs
    }

    fn plan_layer(&self, job: &LayerJob) -> PlannerResult<LayerPlan> {
        let tour = self.planner.plan(&job.columns)?;
        debug!(
            "Layer y={} region {}: {} columns, path cost {}",
            job.y,
            job.region,
            tour.len(),
            tour.path_cost()
        );
        Ok(LayerPlan { y: job.y, tour })
    }
}

/// Layers with at least one shell voxel anywhere in the grid, ascending.
pub fn occupied_layers(shell: &ShellGrid) -> Vec<usize> {
    let dims = shell.dims();
    shell
        .profile(Axis::Y, 0..dims.nx, 0..dims.nz)
        .into_iter()
        .enumerate()
        .filter(|&(_, count)| count > 0)
        .map(|(y, _)| y)
        .collect()
}

/// Occupied columns of layer `y` inside `region`, in absolute coordinates,
/// enumerated by ascending x then ascending z.
pub fn layer_columns(shell: &ShellGrid, y: usize, region: &Region) -> Vec<GridColumn> {
    let mut columns = Vec::new();
    for x in region.x.clone() {
        for z in region.z.clone() {
            if shell.is_shell(x, y, z) {
                columns.push(GridColumn::new(x as i64, z as i64));
            }
        }
    }
    columns
}
