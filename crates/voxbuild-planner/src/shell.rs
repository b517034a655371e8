//! Shell extraction
//!
//! Reduces a solid model to the voxels a worker can actually see from the
//! outside. Exterior air is found with a breadth-first flood fill over
//! 6-connected empty cells, seeded from a one-cell border of air padded
//! around the grid. Enclosed voids are never reached by the fill, so solid
//! cells that only face such voids stay out of the shell.

use crate::error::PlannerResult;
use std::collections::VecDeque;
use tracing::{info, warn};
use voxbuild_core::{GridDims, OccupancyGrid, ShellGrid, VoxelVolume};

const NEIGHBORS: [(isize, isize, isize); 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

/// The source grid surrounded by one guaranteed-air cell on every side.
struct PaddedVolume {
    dims: GridDims,
    solid: Vec<bool>,
}

impl PaddedVolume {
    fn new(grid: &OccupancyGrid) -> Self {
        let src = grid.dims();
        let dims = GridDims::new(src.nx + 2, src.ny + 2, src.nz + 2);
        let mut solid = vec![false; dims.volume()];
        for [x, y, z] in grid.iter_set() {
            solid[dims.index(x + 1, y + 1, z + 1)] = true;
        }
        Self { dims, solid }
    }

    fn neighbor(&self, idx: usize, (dx, dy, dz): (isize, isize, isize)) -> Option<usize> {
        let d = self.dims;
        let z = idx % d.nz;
        let y = (idx / d.nz) % d.ny;
        let x = idx / (d.nz * d.ny);
        let nx = x.checked_add_signed(dx).filter(|&v| v < d.nx)?;
        let ny = y.checked_add_signed(dy).filter(|&v| v < d.ny)?;
        let nz = z.checked_add_signed(dz).filter(|&v| v < d.nz)?;
        Some(d.index(nx, ny, nz))
    }

    /// Mark every empty cell connected to the padding border.
    fn exterior_air(&self) -> Vec<bool> {
        let mut exterior = vec![false; self.solid.len()];
        let mut queue = VecDeque::new();

        // The padding shell is one connected ring of air, so a single
        // corner seed reaches every empty boundary cell of the source grid.
        exterior[0] = true;
        queue.push_back(0usize);

        while let Some(idx) = queue.pop_front() {
            for offset in NEIGHBORS {
                if let Some(n) = self.neighbor(idx, offset) {
                    if !self.solid[n] && !exterior[n] {
                        exterior[n] = true;
                        queue.push_back(n);
                    }
                }
            }
        }

        exterior
    }
}

/// Keep only solid cells with at least one 6-neighbour in exterior air.
///
/// Solid cells on the grid boundary always qualify because the padding
/// around them is exterior air.
pub fn extract_shell(grid: &OccupancyGrid) -> PlannerResult<ShellGrid> {
    let dims = grid.dims();
    if dims.is_degenerate() {
        warn!("Occupancy grid {} has no cells, shell is empty", dims);
        return Ok(ShellGrid::new(dims, Vec::new())?);
    }

    let padded = PaddedVolume::new(grid);
    let exterior = padded.exterior_air();

    let mut cells = vec![false; dims.volume()];
    for [x, y, z] in grid.iter_set() {
        let idx = padded.dims.index(x + 1, y + 1, z + 1);
        let touches_air = NEIGHBORS.iter().any(|&offset| {
            padded
                .neighbor(idx, offset)
                .is_some_and(|n| exterior[n])
        });
        if touches_air {
            cells[dims.index(x, y, z)] = true;
        }
    }

    let shell = ShellGrid::new(dims, cells)?;
    info!(
        "Extracted shell of {} grid: {} of {} solid voxels kept",
        dims,
        shell.count(),
        grid.count()
    );
    Ok(shell)
}

/// Extract the shell of a dense buffer whose shape comes from an upstream
/// artifact. Any rank other than three is rejected.
pub fn extract_shell_from_shape(shape: &[usize], cells: Vec<bool>) -> PlannerResult<ShellGrid> {
    let grid = OccupancyGrid::from_shape(shape, cells)?;
    extract_shell(&grid)
}
