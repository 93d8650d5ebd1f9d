use std::fmt;

use rover_core::Coord;

/// Errors raised before a search begins.
///
/// Failing to reach the goal is not an error: it is reported as an empty
/// [`crate::Path`] with infinite cost.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// `start` or `goal` lies outside the grid.
    OutOfBounds { coord: Coord, rows: usize, cols: usize },
    /// The jitter bound is negative or NaN.
    InvalidRandomness(f64),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { coord, rows, cols } => {
                write!(f, "coordinate {coord} is outside the {rows}x{cols} grid")
            }
            Self::InvalidRandomness(r) => {
                write!(f, "randomness must be a non-negative number, got {r}")
            }
        }
    }
}

impl std::error::Error for SearchError {}
