//! Layer columns and tours.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An occupied `(x, z)` grid column within one horizontal layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridColumn {
    pub x: i64,
    pub z: i64,
}

impl GridColumn {
    pub fn new(x: i64, z: i64) -> Self {
        Self { x, z }
    }

    /// Travel cost of a single move between two columns.
    ///
    /// Manhattan distance plus one whenever the move displaces both axes,
    /// since the worker steps along a single axis at a time.
    pub fn travel_cost(&self, other: &GridColumn) -> u64 {
        let dx = self.x.abs_diff(other.x);
        let dz = self.z.abs_diff(other.z);
        let turn = u64::from(dx > 0 && dz > 0);
        dx + dz + turn
    }
}

impl From<(i64, i64)> for GridColumn {
    fn from((x, z): (i64, i64)) -> Self {
        Self { x, z }
    }
}

impl fmt::Display for GridColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{},{}}}", self.x, self.z)
    }
}

/// Ordered visiting sequence over the columns of one layer.
///
/// Open path: no leg is implied from the last column back to the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tour {
    columns: Vec<GridColumn>,
}

impl Tour {
    pub fn new(columns: Vec<GridColumn>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[GridColumn] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<GridColumn> {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridColumn> {
        self.columns.iter()
    }

    /// Sum of the legs actually travelled.
    pub fn path_cost(&self) -> u64 {
        self.columns
            .windows(2)
            .map(|w| w[0].travel_cost(&w[1]))
            .sum()
    }

    /// Path cost plus the closing leg from the last column to the first.
    pub fn cycle_cost(&self) -> u64 {
        match (self.columns.first(), self.columns.last()) {
            (Some(first), Some(last)) if self.columns.len() > 1 => {
                self.path_cost() + last.travel_cost(first)
            }
            _ => 0,
        }
    }
}

impl FromIterator<GridColumn> for Tour {
    fn from_iter<I: IntoIterator<Item = GridColumn>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Tour {
    type Item = &'a GridColumn;
    type IntoIter = std::slice::Iter<'a, GridColumn>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
