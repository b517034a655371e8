//! Contiguous axis partitions.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Boundary indices `[0, b1, ..., len]` splitting one axis into contiguous,
/// gap-free ranges. Boundaries are non-decreasing, so a range may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartitionRanges {
    boundaries: Vec<usize>,
}

impl PartitionRanges {
    /// Wrap a boundary list. Callers guarantee it starts at 0, has at least
    /// two entries and never decreases.
    pub fn from_boundaries(boundaries: Vec<usize>) -> Self {
        debug_assert!(boundaries.len() >= 2);
        debug_assert_eq!(boundaries.first(), Some(&0));
        debug_assert!(boundaries.windows(2).all(|w| w[0] <= w[1]));
        Self { boundaries }
    }

    pub fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }

    /// Number of ranges
    pub fn len(&self) -> usize {
        self.boundaries.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Axis length covered by all ranges
    pub fn axis_len(&self) -> usize {
        self.boundaries.last().copied().unwrap_or(0)
    }

    pub fn range(&self, index: usize) -> Option<Range<usize>> {
        let start = *self.boundaries.get(index)?;
        let end = *self.boundaries.get(index + 1)?;
        Some(start..end)
    }

    pub fn ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.boundaries.windows(2).map(|w| w[0]..w[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_cover_axis() {
        let parts = PartitionRanges::from_boundaries(vec![0, 2, 2, 5]);
        assert_eq!(parts.len(), 3);
        assert_eq!(parts.axis_len(), 5);
        let ranges: Vec<_> = parts.ranges().collect();
        assert_eq!(ranges, vec![0..2, 2..2, 2..5]);
        assert_eq!(parts.range(2), Some(2..5));
        assert_eq!(parts.range(3), None);
    }
}
