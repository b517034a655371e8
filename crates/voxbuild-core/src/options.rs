//! Planning options shared by the planner and the settings layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which voxels count as work when balancing workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadWeighting {
    /// Solid cells of the source grid, before shell extraction
    #[default]
    Solid,
    /// Shell cells only
    Shell,
}

/// How a layer's columns are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TourStrategy {
    /// Nearest-neighbour construction refined by 2-opt
    #[default]
    Optimized,
    /// Plain scan order: ascending x, then ascending z
    Raster,
}

/// How the 2-opt delta treats the edge after the last column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TourTopology {
    /// The delta wraps to the first column, scoring a closing leg that is
    /// never emitted.
    #[default]
    Cyclic,
    /// The last column has no successor; the wrap term is dropped.
    Open,
}

/// Serialized form of a build plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Nested literal table, one entry per worker, one per layer
    #[default]
    Lua,
    Json,
}

macro_rules! lowercase_enum_text {
    ($ty:ty { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $text),)+
                }
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    other => Err(format!("unknown {}: {}", stringify!($ty), other)),
                }
            }
        }
    };
}

lowercase_enum_text!(WorkloadWeighting { Solid => "solid", Shell => "shell" });
lowercase_enum_text!(TourStrategy { Optimized => "optimized", Raster => "raster" });
lowercase_enum_text!(TourTopology { Cyclic => "cyclic", Open => "open" });
lowercase_enum_text!(ExportFormat { Lua => "lua", Json => "json" });

/// Everything the build plan assembler needs besides the grids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOptions {
    /// Total number of workers
    pub workers: usize,
    /// Split each worker column along z into this many ranges.
    /// Must divide `workers`.
    pub depth_splits: Option<usize>,
    pub weighting: WorkloadWeighting,
    pub strategy: TourStrategy,
    pub topology: TourTopology,
    /// Plan layers on the rayon pool. Output order is unaffected.
    pub parallel: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            workers: 1,
            depth_splits: None,
            weighting: WorkloadWeighting::default(),
            strategy: TourStrategy::default(),
            topology: TourTopology::default(),
            parallel: true,
        }
    }
}

impl PlanOptions {
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers,
            ..Default::default()
        }
    }

    pub fn depth_splits(mut self, depth: usize) -> Self {
        self.depth_splits = Some(depth);
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}
