use std::collections::BinaryHeap;

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use rover_core::{Coord, ElevationGrid};

use crate::cost::TerrainPather;
use crate::error::SearchError;
use crate::path::Path;
use crate::planner::{FrontierEntry, NO_PARENT, Planner, SearchConfig};
use crate::traits::StochasticPather;

impl Planner {
    /// Plan a path across `grid` from `start` to `goal` using the terrain
    /// cost model configured by `config`.
    ///
    /// Returns an empty [`Path`] if the goal cannot be reached (or the
    /// expansion budget runs out) and `[start]` if `start == goal`. A
    /// zero-sized grid yields an empty path without error.
    pub fn search<R: Rng + ?Sized>(
        &mut self,
        grid: &ElevationGrid,
        start: Coord,
        goal: Coord,
        config: &SearchConfig,
        rng: &mut R,
    ) -> Result<Path, SearchError> {
        config.validate()?;
        if grid.is_empty() {
            return Ok(Path::empty());
        }
        self.set_size(grid.rows(), grid.cols());
        let pather = TerrainPather::new(grid, config.randomness);
        self.stochastic_path(&pather, start, goal, config.max_expansions, rng)
    }

    /// Stochastic best-first search with an arbitrary [`StochasticPather`].
    ///
    /// Neighbors are visited in a freshly shuffled order at every expansion.
    /// The frontier pops the lowest `g + estimate` first, breaking exact ties
    /// by coordinate order. Entries superseded by a cheaper route are skipped
    /// when popped.
    pub fn stochastic_path<P: StochasticPather, R: Rng + ?Sized>(
        &mut self,
        pather: &P,
        from: Coord,
        to: Coord,
        max_expansions: Option<usize>,
        rng: &mut R,
    ) -> Result<Path, SearchError> {
        let start_idx = self.idx(from).ok_or_else(|| self.out_of_bounds(from))?;
        let goal_idx = self.idx(to).ok_or_else(|| self.out_of_bounds(to))?;

        self.last_expansions = 0;
        if start_idx == goal_idx {
            return Ok(Path::from(vec![from]));
        }

        // Bump generation to lazily invalidate all nodes.
        self.generation = self.generation.wrapping_add(1);
        let cur_gen = self.generation;

        {
            let node = &mut self.nodes[start_idx];
            node.g = 0.0;
            node.parent = NO_PARENT;
            node.generation = cur_gen;
        }

        let mut open: BinaryHeap<FrontierEntry> = BinaryHeap::new();
        open.push(FrontierEntry {
            f: pather.estimate(from, to),
            g: 0.0,
            coord: from,
            idx: start_idx,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut expansions = 0usize;

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };

            let ci = current.idx;

            // Skip stale entries.
            if self.nodes[ci].g < current.g {
                continue;
            }

            if ci == goal_idx {
                break 'search true;
            }

            if max_expansions.is_some_and(|limit| expansions >= limit) {
                debug!("search {from} -> {to}: expansion budget of {expansions} exhausted");
                break 'search false;
            }
            expansions += 1;

            nbuf.clear();
            pather.neighbors(current.coord, &mut nbuf);
            nbuf.shuffle(rng);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative_g = current.g + pather.cost(current.coord, np, rng);

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen && tentative_g >= n.g {
                    continue;
                }

                n.generation = cur_gen;
                n.g = tentative_g;
                n.parent = ci;

                open.push(FrontierEntry {
                    f: tentative_g + pather.estimate(np, to),
                    g: tentative_g,
                    coord: np,
                    idx: ni,
                });
            }
        };

        self.nbuf = nbuf;
        self.last_expansions = expansions;

        if !found {
            debug!("search {from} -> {to}: no path after {expansions} expansions");
            return Ok(Path::empty());
        }

        // Reconstruct path.
        let mut coords = Vec::new();
        let mut ci = goal_idx;
        while ci != NO_PARENT {
            coords.push(self.coord(ci));
            ci = self.nodes[ci].parent;
        }
        coords.reverse();
        Ok(Path::from(coords))
    }
}

/// One-shot stochastic search from `start` to `goal` with jitter bound
/// `randomness`.
///
/// Allocates a fresh [`Planner`]; use [`Planner::search`] to reuse the node
/// arena across many searches.
pub fn search<R: Rng + ?Sized>(
    grid: &ElevationGrid,
    start: Coord,
    goal: Coord,
    randomness: f64,
    rng: &mut R,
) -> Result<Path, SearchError> {
    let mut planner = Planner::new(grid.rows(), grid.cols());
    planner.search(
        grid,
        start,
        goal,
        &SearchConfig::with_randomness(randomness),
        rng,
    )
}
