use std::cmp::Ordering;

use rover_core::Coord;

use crate::error::SearchError;

/// Jitter bound used when none is configured.
pub const DEFAULT_RANDOMNESS: f64 = 0.2;

/// Parameters of a single stochastic search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Exclusive upper bound of the uniform jitter added to every edge.
    pub randomness: f64,
    /// Maximum number of node expansions before the trial gives up.
    /// `None` searches until the goal is reached or the frontier empties.
    pub max_expansions: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            randomness: DEFAULT_RANDOMNESS,
            max_expansions: None,
        }
    }
}

impl SearchConfig {
    /// Config with the given jitter bound and no expansion budget.
    pub fn with_randomness(randomness: f64) -> Self {
        Self {
            randomness,
            ..Self::default()
        }
    }

    /// Check that the jitter bound is a non-negative number.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.randomness.is_nan() || self.randomness < 0.0 {
            return Err(SearchError::InvalidRandomness(self.randomness));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Internal node and frontier entry
// ---------------------------------------------------------------------------

pub(crate) const NO_PARENT: usize = usize::MAX;

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: f64,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: f64::INFINITY,
            parent: NO_PARENT,
            generation: 0,
        }
    }
}

/// Frontier entry, ordered for use in a max-`BinaryHeap` so that the lowest
/// `f` pops first, ties going to the smaller coordinate.
#[derive(Clone, Copy)]
pub(crate) struct FrontierEntry {
    pub(crate) f: f64,
    /// Accumulated cost recorded when the entry was pushed.
    pub(crate) g: f64,
    pub(crate) coord: Coord,
    pub(crate) idx: usize,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.coord.cmp(&self.coord))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Planner
// ---------------------------------------------------------------------------

/// Reusable search state for grids of a given size.
///
/// `Planner` owns the per-node arena (best known cost, predecessor) and the
/// neighbor scratch buffer. Node state is scoped to one search: starting a
/// new search bumps a generation counter, so entries left over from earlier
/// trials are ignored without clearing the arena.
pub struct Planner {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) nbuf: Vec<Coord>,
    pub(crate) last_expansions: usize,
}

fn arena_len(rows: usize, cols: usize) -> usize {
    rows.checked_mul(cols)
        .unwrap_or_else(|| panic!("{rows}x{cols} planner arena overflows usize"))
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Planner {
    /// Create a planner sized for a `rows × cols` grid.
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` overflows `usize`.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            nodes: vec![Node::default(); arena_len(rows, cols)],
            generation: 0,
            nbuf: Vec::with_capacity(4),
            last_expansions: 0,
        }
    }

    /// Resize for a `rows × cols` grid.
    ///
    /// If the new size fits within the existing arena only the generation is
    /// bumped; otherwise the arena is reallocated.
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` overflows `usize`.
    pub fn set_size(&mut self, rows: usize, cols: usize) {
        if rows == self.rows && cols == self.cols {
            return;
        }
        let new_len = arena_len(rows, cols);
        self.rows = rows;
        self.cols = cols;

        if new_len <= self.nodes.len() {
            self.generation = self.generation.wrapping_add(1);
            return;
        }

        self.nodes.clear();
        self.nodes.resize(new_len, Node::default());
        self.generation = 0;
    }

    /// Grid dimensions this planner is currently sized for.
    #[inline]
    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of nodes expanded by the most recent search.
    #[inline]
    pub fn last_expansions(&self) -> usize {
        self.last_expansions
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Coord` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, c: Coord) -> Option<usize> {
        if c.row < 0 || c.col < 0 {
            return None;
        }
        let (row, col) = (c.row as usize, c.col as usize);
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(row * self.cols + col)
    }

    /// Convert a flat index back to a `Coord`.
    #[inline]
    pub(crate) fn coord(&self, idx: usize) -> Coord {
        Coord::new((idx / self.cols) as i32, (idx % self.cols) as i32)
    }

    pub(crate) fn out_of_bounds(&self, coord: Coord) -> SearchError {
        SearchError::OutOfBounds {
            coord,
            rows: self.rows,
            cols: self.cols,
        }
    }
}
