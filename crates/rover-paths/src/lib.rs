//! Stochastic pathfinding over elevation grids.
//!
//! This crate plans traversal paths across rough terrain. Edge costs combine
//! a unit step, the absolute elevation change, and a bounded random jitter;
//! repeating the search and keeping the cheapest result samples several
//! plausible routes instead of committing to a single deterministic one.
//!
//! - **Stochastic best-first search** ([`Planner::search`], [`search`])
//! - **Deterministic path costing** ([`path_cost`])
//! - **Best-of-N refinement** ([`refine`], and `refine_parallel` with the
//!   `parallel` feature)
//!
//! Searches run through a [`Planner`], which owns and reuses its node arena
//! so that repeated trials incur no allocations after warm-up.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | neighbor enumeration |
//! | [`StochasticPather`] : [`Pather`] | stochastic search |

mod cost;
mod distance;
mod error;
mod evaluate;
#[cfg(feature = "parallel")]
mod parallel;
mod path;
mod planner;
mod refine;
mod search;
mod traits;

pub use cost::{STEP_COST, TerrainPather, elevation_step_cost};
pub use distance::{euclidean, manhattan};
pub use error::SearchError;
pub use evaluate::path_cost;
#[cfg(feature = "parallel")]
pub use parallel::refine_parallel;
pub use path::Path;
pub use planner::{DEFAULT_RANDOMNESS, Planner, SearchConfig};
pub use refine::{
    DEFAULT_TRIALS, NullObserver, RefineConfig, Refinement, TrialObserver, TrialReport,
    TrialResult, TrialSummary, refine,
};
pub use search::search;
pub use traits::{Pather, StochasticPather};
