//! Dense boolean voxel volumes.
//!
//! Cells are stored in a flat buffer in `[x][y][z]` order, i.e. the flat
//! index of `(x, y, z)` is `x * ny * nz + y * nz + z`. The origin is
//! `(0, 0, 0)` and `y` is the vertical (layer) axis.

use crate::error::GridError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Grid axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
            Self::Z => write!(f, "z"),
        }
    }
}

/// Extents of a voxel volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDims {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
}

impl GridDims {
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self { nx, ny, nz }
    }

    /// Validate a shape of arbitrary rank.
    pub fn from_shape(shape: &[usize]) -> Result<Self, GridError> {
        match *shape {
            [nx, ny, nz] => Ok(Self { nx, ny, nz }),
            _ => Err(GridError::InvalidRank { rank: shape.len() }),
        }
    }

    pub fn as_array(&self) -> [usize; 3] {
        [self.nx, self.ny, self.nz]
    }

    /// Length along one axis
    pub fn len(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.nx,
            Axis::Y => self.ny,
            Axis::Z => self.nz,
        }
    }

    /// Total number of cells
    pub fn volume(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// A grid with a zero-length axis holds no cells and plans to nothing.
    pub fn is_degenerate(&self) -> bool {
        self.volume() == 0
    }

    pub fn contains(&self, x: usize, y: usize, z: usize) -> bool {
        x < self.nx && y < self.ny && z < self.nz
    }

    /// Flat buffer index of an in-bounds cell
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        (x * self.ny + y) * self.nz + z
    }

    fn check(&self, x: usize, y: usize, z: usize) -> Result<usize, GridError> {
        if self.contains(x, y, z) {
            Ok(self.index(x, y, z))
        } else {
            Err(GridError::OutOfBounds {
                x,
                y,
                z,
                shape: self.as_array(),
            })
        }
    }
}

impl fmt::Display for GridDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.nx, self.ny, self.nz)
    }
}

/// Read access shared by every boolean volume.
pub trait VoxelVolume {
    fn dims(&self) -> GridDims;

    /// Flat cell buffer in `[x][y][z]` order
    fn cells(&self) -> &[bool];

    /// True if the cell is set. Out-of-bounds cells read as unset.
    fn is_set(&self, x: usize, y: usize, z: usize) -> bool {
        let dims = self.dims();
        dims.contains(x, y, z) && self.cells()[dims.index(x, y, z)]
    }

    fn count(&self) -> usize {
        self.cells().iter().filter(|&&c| c).count()
    }

    /// Coordinates of every set cell, ascending x, then y, then z.
    fn iter_set(&self) -> Box<dyn Iterator<Item = [usize; 3]> + '_> {
        let dims = self.dims();
        Box::new(
            self.cells()
                .iter()
                .enumerate()
                .filter(|&(_, &c)| c)
                .map(move |(i, _)| {
                    let z = i % dims.nz;
                    let y = (i / dims.nz) % dims.ny;
                    let x = i / (dims.nz * dims.ny);
                    [x, y, z]
                }),
        )
    }

    /// Set-cell counts per index along `axis`, restricted to the x and z
    /// window (y always spans the full grid). Indices along `axis` are
    /// relative to the window start.
    fn profile(&self, axis: Axis, x: Range<usize>, z: Range<usize>) -> Vec<u64> {
        let dims = self.dims();
        let cells = self.cells();
        let len = match axis {
            Axis::X => x.len(),
            Axis::Y => dims.ny,
            Axis::Z => z.len(),
        };
        let mut counts = vec![0u64; len];
        for xi in x.clone() {
            for yi in 0..dims.ny {
                for zi in z.clone() {
                    if cells[dims.index(xi, yi, zi)] {
                        let slot = match axis {
                            Axis::X => xi - x.start,
                            Axis::Y => yi,
                            Axis::Z => zi - z.start,
                        };
                        counts[slot] += 1;
                    }
                }
            }
        }
        counts
    }
}

/// Solid occupancy of a voxelized model. Read-only input to the planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    dims: GridDims,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// An all-empty grid
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            cells: vec![false; dims.volume()],
        }
    }

    /// Build from a shape of any rank and a dense cell buffer.
    pub fn from_shape(shape: &[usize], cells: Vec<bool>) -> Result<Self, GridError> {
        let dims = GridDims::from_shape(shape)?;
        if cells.len() != dims.volume() {
            return Err(GridError::LengthMismatch {
                shape: dims.as_array(),
                expected: dims.volume(),
                actual: cells.len(),
            });
        }
        Ok(Self { dims, cells })
    }

    /// Build from a shape and a list of solid voxel indices.
    pub fn from_voxels<I>(shape: &[usize], voxels: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = [usize; 3]>,
    {
        let mut grid = Self::new(GridDims::from_shape(shape)?);
        for [x, y, z] in voxels {
            grid.set(x, y, z, true)?;
        }
        Ok(grid)
    }

    pub fn set(&mut self, x: usize, y: usize, z: usize, solid: bool) -> Result<(), GridError> {
        let idx = self.dims.check(x, y, z)?;
        self.cells[idx] = solid;
        Ok(())
    }

    /// Fill the inclusive-exclusive box `[min, max)` with solid cells.
    pub fn fill_box(&mut self, min: [usize; 3], max: [usize; 3]) -> Result<(), GridError> {
        for x in min[0]..max[0] {
            for y in min[1]..max[1] {
                for z in min[2]..max[2] {
                    self.set(x, y, z, true)?;
                }
            }
        }
        Ok(())
    }

    pub fn is_solid(&self, x: usize, y: usize, z: usize) -> bool {
        self.is_set(x, y, z)
    }
}

impl VoxelVolume for OccupancyGrid {
    fn dims(&self) -> GridDims {
        self.dims
    }

    fn cells(&self) -> &[bool] {
        &self.cells
    }
}

/// Outer shell of an occupancy grid: solid cells touching exterior air.
///
/// Same shape as its source grid. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellGrid {
    dims: GridDims,
    cells: Vec<bool>,
}

impl ShellGrid {
    pub fn new(dims: GridDims, cells: Vec<bool>) -> Result<Self, GridError> {
        if cells.len() != dims.volume() {
            return Err(GridError::LengthMismatch {
                shape: dims.as_array(),
                expected: dims.volume(),
                actual: cells.len(),
            });
        }
        Ok(Self { dims, cells })
    }

    pub fn is_shell(&self, x: usize, y: usize, z: usize) -> bool {
        self.is_set(x, y, z)
    }
}

impl VoxelVolume for ShellGrid {
    fn dims(&self) -> GridDims {
        self.dims
    }

    fn cells(&self) -> &[bool] {
        &self.cells
    }
}
