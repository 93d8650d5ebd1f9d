//! **rover-core**: foundational types for terrain traversal planning.
//!
//! This crate provides the data model shared by the planning crates:
//! grid coordinates and the read-only elevation grid that searches run over.

pub mod geom;
pub mod grid;

pub use geom::Coord;
pub use grid::{ElevationGrid, GridError};
