//! Sparse JSON voxel files.
//!
//! ```json
//! { "shape": [nx, ny, nz], "voxels": [[x, y, z], ...] }
//! ```
//!
//! `voxels` lists the solid cells. The shape is validated for rank when the
//! file is turned into a grid, so a malformed upstream artifact fails here.

use crate::error::Result;
use crate::grid::{OccupancyGrid, VoxelVolume};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoxelFile {
    pub shape: Vec<usize>,
    pub voxels: Vec<[usize; 3]>,
}

impl VoxelFile {
    pub fn from_grid(grid: &impl VoxelVolume) -> Self {
        Self {
            shape: grid.dims().as_array().to_vec(),
            voxels: grid.iter_set().collect(),
        }
    }

    pub fn into_grid(self) -> Result<OccupancyGrid> {
        Ok(OccupancyGrid::from_voxels(&self.shape, self.voxels)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    /// Load a voxel file and build its occupancy grid
    pub fn load(path: &Path) -> Result<OccupancyGrid> {
        let file = std::fs::File::open(path)?;
        let voxel_file = Self::from_reader(std::io::BufReader::new(file))?;
        debug!(
            "Read {} voxels with shape {:?} from {}",
            voxel_file.voxels.len(),
            voxel_file.shape,
            path.display()
        );
        voxel_file.into_grid()
    }

    /// Write any volume as a voxel file
    pub fn save(grid: &impl VoxelVolume, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        Self::from_grid(grid).to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
