use rover_core::ElevationGrid;

use crate::cost::elevation_step_cost;
use crate::path::Path;

/// Deterministic cost of `path` over `grid`: the sum of
/// [`elevation_step_cost`] over consecutive pairs, with no jitter.
///
/// Returns `f64::INFINITY` for an empty path and `0.0` for a single-cell one.
pub fn path_cost(grid: &ElevationGrid, path: &Path) -> f64 {
    if path.is_empty() {
        return f64::INFINITY;
    }
    path.windows(2)
        .map(|w| elevation_step_cost(grid, w[0], w[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rover_core::Coord;

    #[test]
    fn empty_path_costs_infinity() {
        let g = ElevationGrid::filled(2, 2, 0.0);
        assert_eq!(path_cost(&g, &Path::empty()), f64::INFINITY);
    }

    #[test]
    fn sums_steps_and_climbs() {
        let g = ElevationGrid::new(1, 4, vec![0.0, 2.0, 1.5, 1.5]).unwrap();
        let path: Path = (0..4).map(|col| Coord::new(0, col)).collect();
        // (1 + 2) + (1 + 0.5) + (1 + 0)
        assert_eq!(path_cost(&g, &path), 5.5);
    }

    #[test]
    fn cost_at_least_step_count() {
        let g = ElevationGrid::from_fn(4, 4, |c| f64::from(c.row - c.col)).unwrap();
        let path: Path = vec![
            Coord::new(0, 0),
            Coord::new(1, 0),
            Coord::new(1, 1),
            Coord::new(2, 1),
            Coord::new(2, 2),
        ]
        .into();
        assert!(path_cost(&g, &path) >= path.steps() as f64);
    }
}
