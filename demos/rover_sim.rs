//! Mars rover traversal simulation.
//!
//! Generates a rough surface, plans from one corner region to the other ten
//! times with randomized edge costs, renders every trial and reports the
//! cheapest route. Set `ROVER_SEED` to replay a run; log verbosity follows
//! `RUST_LOG`.

use std::error::Error;

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use rover_core::Coord;
use rover_demos::AsciiRenderer;
use rover_paths::{RefineConfig, TrialObserver, TrialReport, refine};
use rover_terrain::MarsSurface;

const TERRAIN_SEED: u64 = 42;
const START: Coord = Coord::new(10, 10);
const GOAL: Coord = Coord::new(90, 90);

fn search_seed() -> Result<u64, Box<dyn Error>> {
    match std::env::var("ROVER_SEED") {
        Ok(s) => Ok(s.trim().parse()?),
        Err(_) => Ok(rand::rng().random()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let surface = MarsSurface::default().generate(&mut StdRng::seed_from_u64(TERRAIN_SEED))?;
    let seed = search_seed()?;
    log::info!("search seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    let config = RefineConfig::default();
    let mut renderer = AsciiRenderer::stdout();
    let mut observer = |report: &TrialReport<'_>| {
        renderer.observe(report);
        println!("Iteration {}: Path Cost = {:.2}", report.index, report.cost);
    };

    let result = refine(&surface, START, GOAL, &config, &mut rng, &mut observer)?;
    println!("Best Path Cost: {:.2}", result.best.cost);
    Ok(())
}
