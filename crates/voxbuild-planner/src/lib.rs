//! # VoxBuild Planner
//!
//! Turns a solid voxel model into ordered build instructions for grid-moving
//! workers.
//!
//! ## Pipeline
//!
//! - **Shell extraction**: flood fill exterior air and keep only the solid
//!   voxels that touch it
//! - **Workload partitioning**: greedy split of per-slice voxel counts into
//!   contiguous, evenly loaded ranges
//! - **Layer path planning**: nearest-neighbour tour plus 2-opt under a
//!   Manhattan metric with a turn penalty
//! - **Plan assembly**: one tour per (worker, layer), in a fixed order
//! - **Export**: nested literal table or JSON
//!
//! ```rust,ignore
//! use voxbuild_planner::{extract_shell, BuildPlanAssembler};
//! use voxbuild_core::PlanOptions;
//!
//! let shell = extract_shell(&grid)?;
//! let assembler = BuildPlanAssembler::new(PlanOptions::with_workers(4).depth_splits(2))?;
//! let plan = assembler.assemble(&grid, &shell)?;
//! ```

pub mod assembler;
pub mod error;
pub mod export;
pub mod partition;
pub mod shell;
pub mod tour;

pub use assembler::{layer_columns, occupied_layers, BuildPlanAssembler, Region};
pub use error::{
    ParameterError, PartitionError, PartitionResult, PlannerError, PlannerResult,
};
pub use export::{to_table, write_plan, DEFAULT_TABLE_NAME};
pub use partition::{partition, partition_counts};
pub use shell::{extract_shell, extract_shell_from_shape};
pub use tour::{
    nearest_neighbor_order, plan_tour, raster_tour, travel_cost, two_opt, TourPlanner,
    IMPROVEMENT_EPSILON,
};
