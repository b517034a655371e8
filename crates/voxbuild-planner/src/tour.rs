//! Layer path planning
//!
//! Orders the occupied columns of one layer so a worker that moves along a
//! single axis per step travels as little as possible. A nearest-neighbour
//! tour is built from the first input point and then refined with 2-opt
//! until no improving reversal remains.
//!
//! Input order matters: the tour always starts at index 0 and distance ties
//! go to the lowest index.

use crate::error::{PlannerError, PlannerResult};
use tracing::trace;
use voxbuild_core::{GridColumn, PlanOptions, Tour, TourStrategy, TourTopology};

/// Minimum gain for a 2-opt reversal to count as an improvement.
pub const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// Manhattan distance plus a unit penalty when both axes change.
pub fn travel_cost(a: [f64; 2], b: [f64; 2]) -> f64 {
    let dx = (a[0] - b[0]).abs();
    let dz = (a[1] - b[1]).abs();
    let turn = if dx > 0.0 && dz > 0.0 { 1.0 } else { 0.0 };
    dx + dz + turn
}

fn leg(points: &[[f64; 2]], from: usize, to: usize) -> PlannerResult<f64> {
    let cost = travel_cost(points[from], points[to]);
    if cost.is_finite() {
        Ok(cost)
    } else {
        Err(PlannerError::NonFiniteDistance { from, to })
    }
}

fn validate(points: &[[f64; 2]]) -> PlannerResult<()> {
    match points
        .iter()
        .position(|p| !p[0].is_finite() || !p[1].is_finite())
    {
        Some(index) => Err(PlannerError::NonFiniteCoordinate {
            index,
            x: points[index][0],
            z: points[index][1],
        }),
        None => Ok(()),
    }
}

/// Greedy construction starting at point 0.
pub fn nearest_neighbor_order(points: &[[f64; 2]]) -> PlannerResult<Vec<usize>> {
    let n = points.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut current = 0;
    visited[0] = true;
    order.push(0);

    for step in 1..n {
        let mut best: Option<(f64, usize)> = None;
        for (candidate, _) in visited.iter().enumerate().filter(|&(_, &seen)| !seen) {
            let cost = leg(points, current, candidate)?;
            if best.map_or(true, |(best_cost, _)| cost < best_cost) {
                best = Some((cost, candidate));
            }
        }

        let (_, next) = best.ok_or(PlannerError::Unreachable {
            step,
            remaining: n - step,
        })?;
        visited[next] = true;
        order.push(next);
        current = next;
    }

    Ok(order)
}

/// Refine `order` in place with first-improvement 2-opt passes until a full
/// pass finds nothing. Returns the number of reversals applied.
///
/// Pairs `(i, j)` with `1 <= i < n - 1` and `i + 2 <= j < n` are scored by
/// the change in the legs entering `order[i]` and leaving `order[j]`. For
/// `j = n - 1` the leaving leg wraps to `order[0]` under
/// [`TourTopology::Cyclic`] and is dropped under [`TourTopology::Open`].
pub fn two_opt(
    points: &[[f64; 2]],
    order: &mut [usize],
    topology: TourTopology,
) -> PlannerResult<usize> {
    let n = order.len();
    let mut reversals = 0;
    if n < 4 {
        return Ok(reversals);
    }

    loop {
        let mut improved = false;
        for i in 1..n - 1 {
            for j in (i + 2)..n {
                let a = order[i - 1];
                let b = order[i];
                let c = order[j];
                let after = if j + 1 < n {
                    Some(order[j + 1])
                } else {
                    match topology {
                        TourTopology::Cyclic => Some(order[0]),
                        TourTopology::Open => None,
                    }
                };

                let mut old_cost = leg(points, a, b)?;
                let mut new_cost = leg(points, a, c)?;
                if let Some(d) = after {
                    old_cost += leg(points, c, d)?;
                    new_cost += leg(points, b, d)?;
                }

                if new_cost < old_cost - IMPROVEMENT_EPSILON {
                    order[i..=j].reverse();
                    reversals += 1;
                    improved = true;
                }
            }
        }
        if !improved {
            break;
        }
    }

    Ok(reversals)
}

/// Columns in scan order: ascending x, then ascending z.
pub fn raster_tour(columns: &[GridColumn]) -> Tour {
    let mut sorted = columns.to_vec();
    sorted.sort();
    Tour::new(sorted)
}

/// Plans tours for single layers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TourPlanner {
    strategy: TourStrategy,
    topology: TourTopology,
}

impl TourPlanner {
    pub fn new(strategy: TourStrategy, topology: TourTopology) -> Self {
        Self { strategy, topology }
    }

    pub fn from_options(options: &PlanOptions) -> Self {
        Self::new(options.strategy, options.topology)
    }

    /// Visiting order over arbitrary points, as indices into `points`.
    pub fn order(&self, points: &[[f64; 2]]) -> PlannerResult<Vec<usize>> {
        validate(points)?;
        let mut order = nearest_neighbor_order(points)?;
        let reversals = two_opt(points, &mut order, self.topology)?;
        trace!("2-opt applied {} reversals over {} points", reversals, points.len());
        Ok(order)
    }

    /// Tour over floating point coordinates. Coordinates are truncated
    /// toward zero in the output.
    pub fn plan_points(&self, points: &[[f64; 2]]) -> PlannerResult<Tour> {
        let order = self.order(points)?;
        Ok(order
            .into_iter()
            .map(|i| GridColumn::new(points[i][0].trunc() as i64, points[i][1].trunc() as i64))
            .collect())
    }

    /// Tour over the occupied columns of one layer, in enumeration order.
    pub fn plan(&self, columns: &[GridColumn]) -> PlannerResult<Tour> {
        match self.strategy {
            TourStrategy::Raster => Ok(raster_tour(columns)),
            TourStrategy::Optimized => {
                let points: Vec<[f64; 2]> = columns
                    .iter()
                    .map(|c| [c.x as f64, c.z as f64])
                    .collect();
                let order = self.order(&points)?;
                Ok(order.into_iter().map(|i| columns[i]).collect())
            }
        }
    }
}

/// Plan a layer with the default optimised strategy.
pub fn plan_tour(columns: &[GridColumn]) -> PlannerResult<Tour> {
    TourPlanner::default().plan(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_travel_cost() {
        assert_eq!(travel_cost([0.0, 0.0], [0.0, 3.0]), 3.0);
        assert_eq!(travel_cost([0.0, 0.0], [2.0, 3.0]), 6.0);
        assert_eq!(travel_cost([1.0, 1.0], [1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_travel_cost_matches_column_metric() {
        let a = GridColumn::new(3, -4);
        let b = GridColumn::new(-1, 7);
        let float = travel_cost([3.0, -4.0], [-1.0, 7.0]);
        assert_eq!(float as u64, a.travel_cost(&b));
    }

    #[test]
    fn test_nearest_neighbor_ties_prefer_lowest_index() {
        let points = [[0.0, 0.0], [0.0, 3.0], [3.0, 3.0], [3.0, 0.0]];
        assert_eq!(nearest_neighbor_order(&points).unwrap(), vec![0, 1, 2, 3]);

        let points = [[0.0, 0.0], [3.0, 0.0], [0.0, 3.0]];
        assert_eq!(nearest_neighbor_order(&points).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_two_opt_removes_backtrack() {
        let points: Vec<[f64; 2]> = (0..6).map(|z| [0.0, z as f64]).collect();
        let mut order = vec![0, 3, 2, 1, 4, 5];
        let reversals = two_opt(&points, &mut order, TourTopology::Cyclic).unwrap();
        assert_eq!(reversals, 1);
        assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_two_opt_open_reverses_tail() {
        // Only the dropped wrap term separates the two topologies here.
        let points = [[0.0, 0.0], [0.0, 1.0], [0.0, 5.0], [0.0, 3.0], [0.0, 2.0]];
        let mut open = vec![0, 1, 2, 3, 4];
        two_opt(&points, &mut open, TourTopology::Open).unwrap();
        assert_eq!(open, vec![0, 1, 4, 3, 2]);

        let mut cyclic = vec![0, 1, 2, 3, 4];
        two_opt(&points, &mut cyclic, TourTopology::Cyclic).unwrap();
        assert_eq!(cyclic, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_non_finite_coordinate_rejected() {
        let planner = TourPlanner::default();
        let err = planner.order(&[[0.0, 0.0], [f64::NAN, 1.0]]).unwrap_err();
        assert!(matches!(
            err,
            PlannerError::NonFiniteCoordinate { index: 1, .. }
        ));
    }

    #[test]
    fn test_overflowing_distance_rejected() {
        let points = [[f64::MAX, 0.0], [-f64::MAX, 0.0]];
        let err = nearest_neighbor_order(&points).unwrap_err();
        assert_eq!(err, PlannerError::NonFiniteDistance { from: 0, to: 1 });
    }

    #[test]
    fn test_plan_points_truncates() {
        let tour = TourPlanner::default()
            .plan_points(&[[1.9, 2.2], [-0.5, 2.7]])
            .unwrap();
        assert_eq!(tour.columns(), &[GridColumn::new(1, 2), GridColumn::new(0, 2)]);
    }
}
