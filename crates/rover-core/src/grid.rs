//! A read-only rectangular elevation map.
//!
//! [`ElevationGrid`] stores one finite `f64` height per cell in row-major
//! order. It is built once by a terrain supplier and only ever read by the
//! planners, so it carries no interior mutability and can be shared freely
//! across threads by reference.

use std::fmt;

use crate::geom::Coord;

/// Errors that can occur when building an [`ElevationGrid`].
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// The data buffer does not hold `rows * cols` values.
    SizeMismatch { expected: usize, actual: usize },
    /// An elevation is NaN or infinite.
    NonFinite { coord: Coord, value: f64 },
    /// `rows * cols` overflows `usize`.
    TooLarge { rows: usize, cols: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "elevation grid: expected {expected} values, got {actual}")
            }
            Self::NonFinite { coord, value } => {
                write!(f, "elevation grid: non-finite elevation {value} at {coord}")
            }
            Self::TooLarge { rows, cols } => {
                write!(f, "elevation grid: {rows}x{cols} cells overflow usize")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// A `rows × cols` grid of finite elevations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ElevationGrid {
    rows: usize,
    cols: usize,
    heights: Vec<f64>,
}

impl ElevationGrid {
    /// Build a grid from row-major `heights`.
    ///
    /// Fails if `rows * cols` overflows, if the buffer length is not
    /// `rows * cols`, or if any value is not finite. A zero-sized grid is
    /// valid.
    pub fn new(rows: usize, cols: usize, heights: Vec<f64>) -> Result<Self, GridError> {
        let expected = cell_count(rows, cols)?;
        if heights.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                actual: heights.len(),
            });
        }
        if let Some(i) = heights.iter().position(|h| !h.is_finite()) {
            return Err(GridError::NonFinite {
                coord: Coord::new((i / cols) as i32, (i % cols) as i32),
                value: heights[i],
            });
        }
        Ok(Self {
            rows,
            cols,
            heights,
        })
    }

    /// Build a grid by evaluating `f` at every coordinate in row-major order.
    pub fn from_fn(
        rows: usize,
        cols: usize,
        mut f: impl FnMut(Coord) -> f64,
    ) -> Result<Self, GridError> {
        let mut heights = Vec::with_capacity(cell_count(rows, cols)?);
        for row in 0..rows {
            for col in 0..cols {
                heights.push(f(Coord::new(row as i32, col as i32)));
            }
        }
        Self::new(rows, cols, heights)
    }

    /// A grid where every cell has elevation `height`.
    ///
    /// # Panics
    ///
    /// Panics if `height` is not finite or if `rows * cols` overflows.
    pub fn filled(rows: usize, cols: usize, height: f64) -> Self {
        assert!(height.is_finite(), "elevation must be finite");
        let len = rows
            .checked_mul(cols)
            .unwrap_or_else(|| panic!("{rows}x{cols} grid overflows usize"));
        Self {
            rows,
            cols,
            heights: vec![height; len],
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Whether the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Whether `c` addresses a cell of this grid.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        c.row >= 0 && c.col >= 0 && (c.row as usize) < self.rows && (c.col as usize) < self.cols
    }

    /// Flat row-major index of `c`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, c: Coord) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some(c.row as usize * self.cols + c.col as usize)
    }

    /// Coordinate of a flat row-major index.
    #[inline]
    pub fn coord(&self, idx: usize) -> Coord {
        Coord::new((idx / self.cols) as i32, (idx % self.cols) as i32)
    }

    /// Elevation at `c`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, c: Coord) -> Option<f64> {
        self.index(c).map(|i| self.heights[i])
    }

    /// Row-major slice of all elevations.
    #[inline]
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Iterate over `(Coord, elevation)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, f64)> + '_ {
        self.heights
            .iter()
            .enumerate()
            .map(|(i, &h)| (self.coord(i), h))
    }

    /// Lowest and highest elevation, or `None` for an empty grid.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut it = self.heights.iter().copied();
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), h| (lo.min(h), hi.max(h))))
    }
}

fn cell_count(rows: usize, cols: usize) -> Result<usize, GridError> {
    rows.checked_mul(cols).ok_or(GridError::TooLarge { rows, cols })
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ElevationGrid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            rows: usize,
            cols: usize,
            heights: Vec<f64>,
        }
        let raw = Raw::deserialize(deserializer)?;
        ElevationGrid::new(raw.rows, raw.cols, raw.heights).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_checks_size() {
        let err = ElevationGrid::new(2, 3, vec![0.0; 5]).unwrap_err();
        assert_eq!(
            err,
            GridError::SizeMismatch {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn overflowing_dimensions_are_rejected() {
        let err = ElevationGrid::new(usize::MAX, 2, Vec::new()).unwrap_err();
        assert_eq!(
            err,
            GridError::TooLarge {
                rows: usize::MAX,
                cols: 2
            }
        );
        let err = ElevationGrid::from_fn(2, usize::MAX, |_| 0.0).unwrap_err();
        assert!(matches!(err, GridError::TooLarge { .. }));
    }

    #[test]
    fn new_rejects_non_finite() {
        let mut heights = vec![1.0; 6];
        heights[4] = f64::NAN;
        let err = ElevationGrid::new(2, 3, heights).unwrap_err();
        match err {
            GridError::NonFinite { coord, .. } => assert_eq!(coord, Coord::new(1, 1)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_sized_grid_is_valid() {
        let g = ElevationGrid::new(0, 0, Vec::new()).unwrap();
        assert!(g.is_empty());
        assert!(!g.contains(Coord::ZERO));
        assert_eq!(g.min_max(), None);
    }

    #[test]
    fn at_and_bounds() {
        let g = ElevationGrid::from_fn(3, 4, |c| (c.row * 10 + c.col) as f64).unwrap();
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 4);
        assert_eq!(g.at(Coord::new(2, 3)), Some(23.0));
        assert_eq!(g.at(Coord::new(3, 0)), None);
        assert_eq!(g.at(Coord::new(0, 4)), None);
        assert_eq!(g.at(Coord::new(-1, 0)), None);
    }

    #[test]
    fn index_round_trips_coord() {
        let g = ElevationGrid::filled(5, 7, 0.0);
        for (c, _) in g.iter() {
            let i = g.index(c).unwrap();
            assert_eq!(g.coord(i), c);
        }
    }

    #[test]
    fn min_max_spans_values() {
        let g = ElevationGrid::new(1, 4, vec![3.0, -2.0, 8.5, 0.0]).unwrap();
        assert_eq!(g.min_max(), Some((-2.0, 8.5)));
    }
}
