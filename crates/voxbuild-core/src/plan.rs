//! Build plan output: one assignment per worker, one tour per layer.

use crate::column::Tour;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Planned visiting order for one horizontal layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerPlan {
    /// Absolute layer height
    pub y: usize,
    pub tour: Tour,
}

/// A worker's rectangular region and its per-layer tours in ascending `y`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerAssignment {
    pub x_range: Range<usize>,
    pub z_range: Range<usize>,
    pub layers: Vec<LayerPlan>,
}

impl WorkerAssignment {
    pub fn tours(&self) -> impl Iterator<Item = &Tour> {
        self.layers.iter().map(|l| &l.tour)
    }

    pub fn column_count(&self) -> usize {
        self.layers.iter().map(|l| l.tour.len()).sum()
    }

    pub fn path_cost(&self) -> u64 {
        self.layers.iter().map(|l| l.tour.path_cost()).sum()
    }
}

/// Ordered worker assignments: ascending x range, then ascending z range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildPlan {
    pub assignments: Vec<WorkerAssignment>,
}

/// Totals over a whole plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub workers: usize,
    pub layers: usize,
    pub columns: usize,
    pub path_cost: u64,
}

impl BuildPlan {
    pub fn new(assignments: Vec<WorkerAssignment>) -> Self {
        Self { assignments }
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            workers: self.assignments.len(),
            layers: self.assignments.iter().map(|a| a.layers.len()).sum(),
            columns: self.assignments.iter().map(|a| a.column_count()).sum(),
            path_cost: self.assignments.iter().map(|a| a.path_cost()).sum(),
        }
    }
}
