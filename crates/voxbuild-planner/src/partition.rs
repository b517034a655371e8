//! Workload partitioning
//!
//! Splits a per-index cost profile into contiguous ranges of roughly equal
//! cumulative cost with a single greedy left-to-right scan.
//!
//! The scan never rebalances: a profile with all its mass in one index can
//! leave some ranges empty. Downstream worker coordination relies on these
//! exact boundaries.

use crate::error::{PartitionError, PartitionResult};
use voxbuild_core::PartitionRanges;

/// Split `costs` into `parts` contiguous ranges by cumulative cost.
///
/// The target share is `sum / parts`. While scanning, boundary `k` is placed
/// right after the first index whose running sum reaches `target * k`; each
/// index closes at most one boundary. Boundaries still open after the scan
/// are placed at `costs.len()`.
pub fn partition(costs: &[f64], parts: usize) -> PartitionResult<PartitionRanges> {
    if costs.is_empty() {
        return Err(PartitionError::EmptyCosts);
    }
    if parts == 0 {
        return Err(PartitionError::ZeroParts);
    }
    if parts > costs.len() {
        return Err(PartitionError::TooManyParts {
            parts,
            len: costs.len(),
        });
    }
    if let Some((index, &value)) = costs
        .iter()
        .enumerate()
        .find(|(_, c)| !c.is_finite() || **c < 0.0)
    {
        return Err(PartitionError::InvalidCost { index, value });
    }

    let target = costs.iter().sum::<f64>() / parts as f64;

    let mut boundaries = Vec::with_capacity(parts + 1);
    boundaries.push(0);

    let mut running = 0.0;
    let mut next = 1;
    for (i, &cost) in costs.iter().enumerate() {
        if next >= parts {
            break;
        }
        running += cost;
        if running >= target * next as f64 {
            boundaries.push(i + 1);
            next += 1;
        }
    }

    boundaries.resize(parts, costs.len());
    boundaries.push(costs.len());

    Ok(PartitionRanges::from_boundaries(boundaries))
}

/// Partition integer voxel counts.
pub fn partition_counts(counts: &[u64], parts: usize) -> PartitionResult<PartitionRanges> {
    let costs: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
    partition(&costs, parts)
}
