//! # VoxBuild Core
//!
//! Core types for VoxBuild: the voxel volumes the planner consumes, the
//! tours and partitions it produces, and the shared error types.

pub mod column;
pub mod error;
pub mod grid;
pub mod options;
pub mod plan;
pub mod ranges;
pub mod voxel_file;

pub use column::{GridColumn, Tour};
pub use error::{Error, GridError, Result};
pub use grid::{Axis, GridDims, OccupancyGrid, ShellGrid, VoxelVolume};
pub use options::{ExportFormat, PlanOptions, TourStrategy, TourTopology, WorkloadWeighting};
pub use plan::{BuildPlan, LayerPlan, PlanSummary, WorkerAssignment};
pub use ranges::PartitionRanges;
pub use voxel_file::VoxelFile;
