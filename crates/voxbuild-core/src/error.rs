//! Error handling for VoxBuild
//!
//! Provides the error types shared by every layer of the pipeline:
//! - Grid errors (malformed or inconsistent voxel volumes)
//! - I/O and serialization errors from the voxel file collaborator
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Grid error type
///
/// Represents a malformed upstream voxel artifact. These are deterministic
/// functions of the input and are never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The volume is not three dimensional
    #[error("Occupancy grid must be 3-dimensional, got rank {rank}")]
    InvalidRank {
        /// The rank of the supplied shape.
        rank: usize,
    },

    /// Cell buffer length does not match the declared shape
    #[error("Cell buffer holds {actual} cells but shape {shape:?} needs {expected}")]
    LengthMismatch {
        /// The declared shape.
        shape: [usize; 3],
        /// Number of cells the shape requires.
        expected: usize,
        /// Number of cells supplied.
        actual: usize,
    },

    /// A voxel index lies outside the grid
    #[error("Voxel ({x}, {y}, {z}) is outside grid {shape:?}")]
    OutOfBounds {
        /// X index.
        x: usize,
        /// Y index.
        y: usize,
        /// Z index.
        z: usize,
        /// The grid shape.
        shape: [usize; 3],
    },
}

/// Main error type for VoxBuild core
///
/// A unified error type for everything the core crate can report.
#[derive(Error, Debug)]
pub enum Error {
    /// Grid error
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Voxel file (de)serialization error
    #[error("Voxel file error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a grid validation error
    pub fn is_grid_error(&self) -> bool {
        matches!(self, Error::Grid(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
