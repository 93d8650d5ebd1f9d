use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};
use rayon::prelude::*;
use rover_core::{Coord, ElevationGrid};

use crate::error::SearchError;
use crate::planner::Planner;
use crate::refine::{BestOf, RefineConfig, Refinement, TrialObserver, check_inputs};

/// Parallel variant of [`crate::refine`].
///
/// One seed per trial is drawn from `rng` up front; each trial then runs on
/// the rayon pool with its own `StdRng` and its own [`Planner`]. Results are
/// reduced in trial order, so for a given `rng` state the outcome does not
/// depend on scheduling. `observer` is notified after all trials finish.
pub fn refine_parallel<R: Rng + ?Sized, O: TrialObserver + ?Sized>(
    grid: &ElevationGrid,
    start: Coord,
    goal: Coord,
    config: &RefineConfig,
    rng: &mut R,
    observer: &mut O,
) -> Result<Refinement, SearchError> {
    check_inputs(grid, start, goal, config)?;
    let seeds: Vec<u64> = (0..config.trials).map(|_| rng.random()).collect();

    let paths = seeds
        .par_iter()
        .map_init(Planner::default, |planner, &seed| {
            let mut trial_rng = StdRng::seed_from_u64(seed);
            planner.search(grid, start, goal, &config.search, &mut trial_rng)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut best = BestOf::new(grid, start, goal, config.trials);
    for (i, path) in paths.into_iter().enumerate() {
        best.record(i + 1, path, observer);
    }
    Ok(best.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::path_cost;
    use crate::planner::SearchConfig;
    use crate::refine::NullObserver;

    fn grid() -> ElevationGrid {
        ElevationGrid::from_fn(20, 20, |c| f64::from((c.row * 31 + c.col * 17) % 9) * 0.5).unwrap()
    }

    #[test]
    fn same_seed_same_result() {
        let g = grid();
        let config = RefineConfig {
            search: SearchConfig::with_randomness(1.0),
            trials: 12,
        };
        let run = || {
            let mut rng = StdRng::seed_from_u64(99);
            refine_parallel(
                &g,
                Coord::new(2, 3),
                Coord::new(18, 15),
                &config,
                &mut rng,
                &mut NullObserver,
            )
            .unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn best_is_minimum_of_trials() {
        let g = grid();
        let mut rng = StdRng::seed_from_u64(4);
        let mut seen = Vec::new();
        let mut observer = |report: &crate::TrialReport<'_>| seen.push(report.index);
        let config = RefineConfig::default();
        let goal = Coord::new(19, 19);
        let out = refine_parallel(&g, Coord::ZERO, goal, &config, &mut rng, &mut observer).unwrap();

        assert_eq!(seen, (1..=config.trials).collect::<Vec<_>>());
        let min = out.trials.iter().map(|t| t.cost).fold(f64::INFINITY, f64::min);
        assert_eq!(out.best.cost, min);
        assert_eq!(out.best.cost, path_cost(&g, &out.best.path));
    }

    #[test]
    fn zero_trials_still_rejects_bad_inputs() {
        let g = grid();
        let config = RefineConfig {
            trials: 0,
            ..RefineConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let goal = Coord::new(20, 0);
        let err = refine_parallel(&g, Coord::ZERO, goal, &config, &mut rng, &mut NullObserver)
            .unwrap_err();
        assert!(matches!(err, SearchError::OutOfBounds { coord, .. } if coord == goal));

        let config = RefineConfig {
            search: SearchConfig::with_randomness(f64::NAN),
            trials: 0,
        };
        let start = Coord::ZERO;
        let err = refine_parallel(&g, start, start, &config, &mut rng, &mut NullObserver)
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidRandomness(r) if r.is_nan()));
    }
}
