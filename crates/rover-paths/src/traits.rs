use rand::Rng;
use rover_core::Coord;

/// Minimal pathfinding interface, providing neighbor enumeration.
pub trait Pather {
    /// Append traversable neighbors of `c` into `buf`. The caller clears `buf`
    /// before calling.
    fn neighbors(&self, c: Coord, buf: &mut Vec<Coord>);
}

/// Pather whose edge costs may be randomized per evaluation.
pub trait StochasticPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be finite and > 0.
    ///
    /// Called once per edge relaxation; implementations may draw a fresh
    /// random perturbation from `rng` on every call.
    fn cost<R: Rng + ?Sized>(&self, from: Coord, to: Coord, rng: &mut R) -> f64;

    /// Heuristic estimate of the remaining cost from `from` to `to`.
    ///
    /// Not required to be admissible once costs are randomized.
    fn estimate(&self, from: Coord, to: Coord) -> f64;
}
