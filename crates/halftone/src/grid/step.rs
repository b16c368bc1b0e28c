//! Grid step derivation from image size.

use super::GridStep;

/// Target number of dot columns across the longer image dimension.
pub const AUTO_COLUMNS: u32 = 80;

/// Smallest auto-derived base step in pixels, before the gap multiplier.
pub const MIN_STEP: u32 = 4;

/// Derive the sampling step for a working raster.
///
/// An explicit `spacing` wins and applies to both axes. Otherwise the step
/// adapts to image size: `max(MIN_STEP, max_dim / AUTO_COLUMNS) * 1.5`,
/// which keeps roughly [`AUTO_COLUMNS`] dots across the longer dimension
/// while the 1.5 multiplier leaves visible gaps between dot bounding boxes
/// at the maximum radius.
pub fn compute_grid_step(width: u32, height: u32, spacing: Option<f32>) -> GridStep {
    if let Some(spacing) = spacing {
        return GridStep::uniform(spacing);
    }
    let max_dim = width.max(height);
    let auto_step = (max_dim / AUTO_COLUMNS).max(MIN_STEP);
    GridStep::uniform(auto_step as f32 * 1.5)
}
