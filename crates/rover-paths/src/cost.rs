use rand::{Rng, RngExt};
use rover_core::{Coord, ElevationGrid};

use crate::distance::euclidean;
use crate::traits::{Pather, StochasticPather};

/// Fixed cost of a single orthogonal step, before elevation and jitter.
pub const STEP_COST: f64 = 1.0;

/// Deterministic cost of stepping from `from` to `to`: one unit plus the
/// absolute elevation change.
///
/// Returns `f64::INFINITY` if either coordinate lies outside `grid`.
#[inline]
pub fn elevation_step_cost(grid: &ElevationGrid, from: Coord, to: Coord) -> f64 {
    match (grid.at(from), grid.at(to)) {
        (Some(a), Some(b)) => STEP_COST + (b - a).abs(),
        _ => f64::INFINITY,
    }
}

/// Terrain cost model: 4-way movement over an [`ElevationGrid`] with a
/// uniform jitter drawn from `[0, randomness)` on every edge evaluation.
#[derive(Debug, Clone, Copy)]
pub struct TerrainPather<'a> {
    grid: &'a ElevationGrid,
    randomness: f64,
}

impl<'a> TerrainPather<'a> {
    /// Create a cost model over `grid` with jitter bound `randomness`.
    ///
    /// Negative or NaN bounds are treated as zero; [`crate::Planner::search`]
    /// rejects them before getting here.
    pub fn new(grid: &'a ElevationGrid, randomness: f64) -> Self {
        Self {
            grid,
            randomness: if randomness > 0.0 { randomness } else { 0.0 },
        }
    }

    /// The grid being traversed.
    #[inline]
    pub fn grid(&self) -> &'a ElevationGrid {
        self.grid
    }

    /// Upper bound (exclusive) of the per-edge jitter.
    #[inline]
    pub fn randomness(&self) -> f64 {
        self.randomness
    }

    /// Draw one jitter sample. Consumes no entropy when the bound is zero.
    #[inline]
    fn jitter<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.randomness > 0.0 {
            rng.random_range(0.0..self.randomness)
        } else {
            0.0
        }
    }
}

impl Pather for TerrainPather<'_> {
    fn neighbors(&self, c: Coord, buf: &mut Vec<Coord>) {
        buf.extend(
            c.neighbors_4()
                .into_iter()
                .filter(|&n| self.grid.contains(n)),
        );
    }
}

impl StochasticPather for TerrainPather<'_> {
    fn cost<R: Rng + ?Sized>(&self, from: Coord, to: Coord, rng: &mut R) -> f64 {
        elevation_step_cost(self.grid, from, to) + self.jitter(rng)
    }

    fn estimate(&self, from: Coord, to: Coord) -> f64 {
        euclidean(from, to)
    }
}
