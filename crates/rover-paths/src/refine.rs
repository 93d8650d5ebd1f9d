//! Best-of-N refinement: repeat the stochastic search and keep the path with
//! the lowest deterministic cost.

use log::info;
use rand::Rng;
use rover_core::{Coord, ElevationGrid};

use crate::error::SearchError;
use crate::evaluate::path_cost;
use crate::path::Path;
use crate::planner::{Planner, SearchConfig};

/// Number of trials run when none is configured.
pub const DEFAULT_TRIALS: usize = 10;

/// Parameters of a refinement run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RefineConfig {
    pub search: SearchConfig,
    /// Number of independent trials. All of them run; there is no early exit.
    pub trials: usize,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            trials: DEFAULT_TRIALS,
        }
    }
}

/// A path together with its deterministic cost (`+∞` when the path is empty).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialResult {
    pub path: Path,
    #[cfg_attr(feature = "serde", serde(with = "cost_serde"))]
    pub cost: f64,
}

impl TrialResult {
    /// Evaluate `path` over `grid`.
    pub fn evaluate(grid: &ElevationGrid, path: Path) -> Self {
        let cost = path_cost(grid, &path);
        Self { path, cost }
    }
}

impl Default for TrialResult {
    fn default() -> Self {
        Self {
            path: Path::empty(),
            cost: f64::INFINITY,
        }
    }
}

/// Per-trial record kept for reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialSummary {
    /// 1-based trial number.
    pub index: usize,
    #[cfg_attr(feature = "serde", serde(with = "cost_serde"))]
    pub cost: f64,
    pub path_len: usize,
}

/// Costs serialize as numbers, with `null` standing for an untraversable
/// (`+∞`) result, which JSON cannot represent.
#[cfg(feature = "serde")]
mod cost_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(cost: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        cost.is_finite().then_some(*cost).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

/// Outcome of a refinement run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Refinement {
    /// Cheapest trial; the earliest one wins ties.
    pub best: TrialResult,
    /// One summary per trial, in trial order.
    pub trials: Vec<TrialSummary>,
}

/// Everything a renderer needs to display one finished trial.
#[derive(Debug, Clone, Copy)]
pub struct TrialReport<'a> {
    pub grid: &'a ElevationGrid,
    pub path: &'a Path,
    pub start: Coord,
    pub goal: Coord,
    /// 1-based trial number.
    pub index: usize,
    pub cost: f64,
}

/// Receives every trial as soon as it has been evaluated.
pub trait TrialObserver {
    fn observe(&mut self, report: &TrialReport<'_>);
}

impl<F: FnMut(&TrialReport<'_>)> TrialObserver for F {
    fn observe(&mut self, report: &TrialReport<'_>) {
        self(report)
    }
}

/// Observer that ignores every trial.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl TrialObserver for NullObserver {
    fn observe(&mut self, _report: &TrialReport<'_>) {}
}

/// Reject a bad jitter bound or an off-grid endpoint before any trial runs,
/// so the outcome does not depend on `trials`. A zero-sized grid is left to
/// the search, which reports no path.
pub(crate) fn check_inputs(
    grid: &ElevationGrid,
    start: Coord,
    goal: Coord,
    config: &RefineConfig,
) -> Result<(), SearchError> {
    config.search.validate()?;
    if grid.is_empty() {
        return Ok(());
    }
    for coord in [start, goal] {
        if !grid.contains(coord) {
            return Err(SearchError::OutOfBounds {
                coord,
                rows: grid.rows(),
                cols: grid.cols(),
            });
        }
    }
    Ok(())
}

/// Running minimum over evaluated trials.
pub(crate) struct BestOf<'a> {
    grid: &'a ElevationGrid,
    start: Coord,
    goal: Coord,
    best: TrialResult,
    trials: Vec<TrialSummary>,
}

impl<'a> BestOf<'a> {
    pub(crate) fn new(grid: &'a ElevationGrid, start: Coord, goal: Coord, trials: usize) -> Self {
        Self {
            grid,
            start,
            goal,
            best: TrialResult::default(),
            trials: Vec::with_capacity(trials),
        }
    }

    /// Evaluate the path of trial `index`, report it, and keep it if it is
    /// strictly cheaper than the best so far.
    pub(crate) fn record<O: TrialObserver + ?Sized>(
        &mut self,
        index: usize,
        path: Path,
        observer: &mut O,
    ) {
        let trial = TrialResult::evaluate(self.grid, path);
        info!("trial {index}: path cost = {:.2}", trial.cost);
        observer.observe(&TrialReport {
            grid: self.grid,
            path: &trial.path,
            start: self.start,
            goal: self.goal,
            index,
            cost: trial.cost,
        });
        self.trials.push(TrialSummary {
            index,
            cost: trial.cost,
            path_len: trial.path.len(),
        });
        if trial.cost < self.best.cost {
            self.best = trial;
        }
    }

    pub(crate) fn finish(self) -> Refinement {
        info!(
            "best path cost over {} trials = {:.2}",
            self.trials.len(),
            self.best.cost
        );
        Refinement {
            best: self.best,
            trials: self.trials,
        }
    }
}

/// Run `config.trials` independent stochastic searches from `start` to
/// `goal` and return the cheapest path under [`path_cost`].
///
/// All trials share `rng` and one [`Planner`] arena. `observer` sees each
/// trial in order right after it is evaluated. Invalid inputs are reported
/// even when `config.trials` is zero.
pub fn refine<R: Rng + ?Sized, O: TrialObserver + ?Sized>(
    grid: &ElevationGrid,
    start: Coord,
    goal: Coord,
    config: &RefineConfig,
    rng: &mut R,
    observer: &mut O,
) -> Result<Refinement, SearchError> {
    check_inputs(grid, start, goal, config)?;
    let mut planner = Planner::new(grid.rows(), grid.cols());
    let mut best = BestOf::new(grid, start, goal, config.trials);

    for index in 1..=config.trials {
        let path = planner.search(grid, start, goal, &config.search, rng)?;
        best.record(index, path, observer);
    }

    Ok(best.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rough() -> ElevationGrid {
        ElevationGrid::from_fn(15, 15, |c| {
            let (r, k) = (f64::from(c.row), f64::from(c.col));
            (r * 0.7).sin() * 4.0 + (k * 0.45).cos() * 3.0
        })
        .unwrap()
    }

    #[test]
    fn best_is_no_worse_than_any_trial() {
        let g = rough();
        let mut rng = StdRng::seed_from_u64(3);
        let config = RefineConfig {
            search: SearchConfig::with_randomness(2.0),
            trials: 8,
        };
        let start = Coord::new(1, 1);
        let goal = Coord::new(13, 12);
        let out = refine(&g, start, goal, &config, &mut rng, &mut NullObserver).unwrap();

        assert_eq!(out.trials.len(), 8);
        let indices: Vec<usize> = out.trials.iter().map(|t| t.index).collect();
        assert_eq!(indices, (1..=8).collect::<Vec<_>>());
        for t in &out.trials {
            assert!(out.best.cost <= t.cost);
        }
        assert!(out.best.path.is_contiguous());
        assert_eq!(out.best.cost, path_cost(&g, &out.best.path));
    }

    #[test]
    fn observer_sees_every_trial() {
        let g = rough();
        let mut rng = StdRng::seed_from_u64(11);
        let start = Coord::new(0, 14);
        let goal = Coord::new(14, 0);
        let mut seen = Vec::new();
        let mut observer = |report: &TrialReport<'_>| {
            assert_eq!(report.start, start);
            assert_eq!(report.goal, goal);
            assert_eq!(report.path.start(), Some(start));
            seen.push((report.index, report.cost));
        };
        let config = RefineConfig::default();
        let out = refine(&g, start, goal, &config, &mut rng, &mut observer).unwrap();

        assert_eq!(seen.len(), DEFAULT_TRIALS);
        let summaries: Vec<(usize, f64)> = out.trials.iter().map(|t| (t.index, t.cost)).collect();
        assert_eq!(seen, summaries);
    }

    #[test]
    fn flat_grid_without_jitter_is_optimal_every_trial() {
        let g = ElevationGrid::filled(5, 5, 0.0);
        let mut rng = StdRng::seed_from_u64(0);
        let config = RefineConfig {
            search: SearchConfig::with_randomness(0.0),
            trials: 4,
        };
        let goal = Coord::new(4, 4);
        let out = refine(&g, Coord::ZERO, goal, &config, &mut rng, &mut NullObserver).unwrap();
        assert_eq!(out.best.cost, 8.0);
        assert_eq!(out.best.path.len(), 9);
        assert!(out.trials.iter().all(|t| t.cost == 8.0 && t.path_len == 9));
    }

    #[test]
    fn ties_keep_the_earliest_trial() {
        let g = ElevationGrid::filled(5, 5, 0.0);
        let mut rng = StdRng::seed_from_u64(5);
        let config = RefineConfig {
            search: SearchConfig::with_randomness(0.1),
            trials: 6,
        };
        let mut first = None;
        let mut observer = |report: &TrialReport<'_>| {
            if report.index == 1 {
                first = Some(report.path.clone());
            }
        };
        let goal = Coord::new(4, 4);
        let out = refine(&g, Coord::ZERO, goal, &config, &mut rng, &mut observer).unwrap();
        // Every monotone route on a flat grid costs the same.
        assert_eq!(out.best.cost, 8.0);
        assert_eq!(Some(out.best.path), first);
    }

    #[test]
    fn zero_trials_reports_no_path() {
        let g = ElevationGrid::filled(3, 3, 0.0);
        let config = RefineConfig {
            trials: 0,
            ..RefineConfig::default()
        };
        let out = refine(
            &g,
            Coord::ZERO,
            Coord::new(2, 2),
            &config,
            &mut StdRng::seed_from_u64(0),
            &mut NullObserver,
        )
        .unwrap();
        assert!(out.trials.is_empty());
        assert!(!out.best.path.is_found());
        assert!(out.best.cost.is_infinite());
    }

    #[test]
    fn out_of_bounds_start_is_an_error() {
        let g = ElevationGrid::filled(3, 3, 0.0);
        let err = refine(
            &g,
            Coord::new(3, 3),
            Coord::ZERO,
            &RefineConfig::default(),
            &mut StdRng::seed_from_u64(0),
            &mut NullObserver,
        )
        .unwrap_err();
        assert!(matches!(err, SearchError::OutOfBounds { .. }));
    }

    #[test]
    fn zero_trials_still_rejects_bad_inputs() {
        let g = ElevationGrid::filled(3, 3, 0.0);
        let config = RefineConfig {
            trials: 0,
            ..RefineConfig::default()
        };
        let mut calls = 0;
        let mut observer = |_: &TrialReport<'_>| calls += 1;

        let err = refine(
            &g,
            Coord::ZERO,
            Coord::new(-1, 2),
            &config,
            &mut StdRng::seed_from_u64(0),
            &mut observer,
        )
        .unwrap_err();
        assert_eq!(
            err,
            SearchError::OutOfBounds {
                coord: Coord::new(-1, 2),
                rows: 3,
                cols: 3
            }
        );

        let config = RefineConfig {
            search: SearchConfig::with_randomness(-0.5),
            trials: 0,
        };
        let err = refine(
            &g,
            Coord::ZERO,
            Coord::new(2, 2),
            &config,
            &mut StdRng::seed_from_u64(0),
            &mut observer,
        )
        .unwrap_err();
        assert_eq!(err, SearchError::InvalidRandomness(-0.5));
        assert_eq!(calls, 0);
    }

    #[test]
    fn empty_grid_reports_no_path_for_every_trial() {
        let g = ElevationGrid::filled(0, 0, 0.0);
        let config = RefineConfig {
            trials: 2,
            ..RefineConfig::default()
        };
        let out = refine(
            &g,
            Coord::ZERO,
            Coord::new(5, 5),
            &config,
            &mut StdRng::seed_from_u64(0),
            &mut NullObserver,
        )
        .unwrap();
        assert_eq!(out.trials.len(), 2);
        assert!(out.best.cost.is_infinite());
    }
}
