//! Terrain suppliers for rover planning.
//!
//! The planners only need an [`ElevationGrid`](rover_core::ElevationGrid);
//! this crate provides a synthetic rough-terrain generator to feed them.

pub mod mars;

pub use mars::{MarsSurface, mars_surface};
