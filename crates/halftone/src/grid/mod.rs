//! Brightness grid types and sampling.
//!
//! A render reduces the working raster to a coarse grid of luminance
//! samples, one per future dot. [`sample_grid`] builds the grid,
//! [`compute_grid_step`] decides how far apart the samples sit.

mod sampler;
mod step;

pub use sampler::sample_grid;
pub use step::{compute_grid_step, AUTO_COLUMNS, MIN_STEP};

/// Horizontal/vertical sampling step in pixels.
///
/// Steps are `f32` because the auto-derived step is `integer * 1.5` and user
/// spacing may be fractional. Sampler and renderer must share the same step
/// or dot centers drift off their sampled cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStep {
    pub x: f32,
    pub y: f32,
}

impl GridStep {
    /// Equal horizontal and vertical step.
    #[inline]
    pub fn uniform(step: f32) -> Self {
        Self { x: step, y: step }
    }

    /// Half the step in both directions (supersampled smoothing pass).
    #[inline]
    pub fn halved(self) -> Self {
        Self {
            x: self.x / 2.0,
            y: self.y / 2.0,
        }
    }
}

/// Row-major grid of brightness samples in `[0, 1]`.
///
/// Created fresh per render and consumed once by the renderer; never
/// mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct BrightnessGrid {
    values: Vec<f32>,
    rows: usize,
    cols: usize,
}

impl BrightnessGrid {
    /// Wrap sampled values with their grid dimensions.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `values.len() == rows * cols`.
    pub fn new(values: Vec<f32>, rows: usize, cols: usize) -> Self {
        debug_assert_eq!(
            values.len(),
            rows * cols,
            "values length ({}) must match rows * cols ({}x{}={})",
            values.len(),
            rows,
            cols,
            rows * cols,
        );
        Self { values, rows, cols }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Brightness of the cell at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.values[row * self.cols + col]
    }

    /// All samples, row-major.
    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }
}
