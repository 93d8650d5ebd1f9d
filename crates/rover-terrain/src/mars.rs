//! Rough "Mars-like" surfaces built from integrated Gaussian noise.
//!
//! Each cell draws a standard-normal sample; the elevation is the running sum
//! of the samples down its column plus the running sum along its row. The
//! result is rescaled to `[0, scale]`. Neighboring cells share most of their
//! partial sums, which gives long correlated ridges and basins rather than
//! per-cell static.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};
use rand_distr::StandardNormal;
use rover_core::{ElevationGrid, GridError};

/// Default side length of a generated surface.
pub const DEFAULT_SIZE: usize = 100;

/// Default elevation of the highest cell after rescaling.
pub const DEFAULT_SCALE: f64 = 255.0;

/// Generator settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarsSurface {
    pub rows: usize,
    pub cols: usize,
    /// Elevations are rescaled to `[0, scale]`.
    pub scale: f64,
}

impl Default for MarsSurface {
    fn default() -> Self {
        Self::square(DEFAULT_SIZE)
    }
}

impl MarsSurface {
    /// A `size × size` surface with the default scale.
    pub fn square(size: usize) -> Self {
        Self {
            rows: size,
            cols: size,
            scale: DEFAULT_SCALE,
        }
    }

    /// Generate a surface using `rng`.
    ///
    /// A surface whose raw elevations are all equal (including the 1×1 case)
    /// rescales to all zeros.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<ElevationGrid, GridError> {
        let (rows, cols) = (self.rows, self.cols);
        let cells = rows.checked_mul(cols).ok_or(GridError::TooLarge { rows, cols })?;
        let noise: Vec<f64> = (0..cells)
            .map(|_| rng.sample::<f64, _>(StandardNormal))
            .collect();

        let mut heights = vec![0.0; cells];
        let mut col_sums = vec![0.0; cols];
        for r in 0..rows {
            let mut row_sum = 0.0;
            for c in 0..cols {
                let i = r * cols + c;
                col_sums[c] += noise[i];
                row_sum += noise[i];
                heights[i] = col_sums[c] + row_sum;
            }
        }

        let (lo, hi) = heights
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            });
        let span = hi - lo;
        if span > 0.0 {
            for h in heights.iter_mut() {
                *h = (*h - lo) / span * self.scale;
            }
        } else {
            heights.fill(0.0);
        }
        debug!(
            "generated {rows}x{cols} surface, raw elevation span {span:.3}, scaled to [0, {}]",
            self.scale
        );

        ElevationGrid::new(rows, cols, heights)
    }
}

/// A `size × size` surface with the default scale, seeded deterministically.
pub fn mars_surface(size: usize, seed: u64) -> Result<ElevationGrid, GridError> {
    let mut rng = StdRng::seed_from_u64(seed);
    MarsSurface::square(size).generate(&mut rng)
}
