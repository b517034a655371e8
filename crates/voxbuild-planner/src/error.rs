//! Error types for the planner crate.
//!
//! This module provides structured error types for partitioning, tour
//! planning and plan configuration.

use thiserror::Error;
use voxbuild_core::GridError;

/// Errors that can occur while building a plan.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    /// The input grid is malformed.
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    /// The plan configuration is invalid.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// A partition could not be computed.
    #[error("Partition error: {0}")]
    Partition(#[from] PartitionError),

    /// A point handed to the tour planner has a non-finite coordinate.
    #[error("Point {index} has a non-finite coordinate ({x}, {z})")]
    NonFiniteCoordinate { index: usize, x: f64, z: f64 },

    /// The travel metric produced a non-finite value.
    #[error("Non-finite travel cost between points {from} and {to}")]
    NonFiniteDistance { from: usize, to: usize },

    /// Nearest-neighbour construction found no reachable candidate.
    #[error("No reachable point at tour step {step} ({remaining} unvisited)")]
    Unreachable { step: usize, remaining: usize },
}

/// Errors related to plan configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    /// At least one worker is required.
    #[error("Worker count must be at least 1")]
    NoWorkers,

    /// The depth split count must be positive.
    #[error("Depth split count must be at least 1")]
    NoDepthSplits,

    /// Workers must divide evenly into depth splits.
    #[error("Worker count {workers} is not divisible by depth split count {depth}")]
    IndivisibleWorkers { workers: usize, depth: usize },

    /// More ranges were requested than the axis has cells.
    #[error("Cannot split {axis} axis of length {len} into {parts} ranges")]
    TooManyParts {
        axis: String,
        parts: usize,
        len: usize,
    },

    /// Source and shell grids disagree on shape.
    #[error("Grid shapes differ: source {source_shape:?}, shell {shell_shape:?}")]
    ShapeMismatch {
        source_shape: [usize; 3],
        shell_shape: [usize; 3],
    },
}

/// Errors related to splitting a cost profile.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PartitionError {
    /// There is nothing to split.
    #[error("Cannot partition an empty cost sequence")]
    EmptyCosts,

    /// Zero ranges were requested.
    #[error("Partition count must be at least 1")]
    ZeroParts,

    /// More ranges than cost entries were requested.
    #[error("Cannot split {len} entries into {parts} ranges")]
    TooManyParts { parts: usize, len: usize },

    /// A cost entry is negative or not finite.
    #[error("Cost at index {index} is invalid: {value}")]
    InvalidCost { index: usize, value: f64 },
}

/// Result type alias for planner operations.
pub type PlannerResult<T> = Result<T, PlannerError>;

/// Result type alias for partitioning.
pub type PartitionResult<T> = Result<T, PartitionError>;
