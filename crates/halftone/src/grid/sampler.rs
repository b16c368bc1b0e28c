//! Nearest-point brightness sampling over a raster.

use super::{BrightnessGrid, GridStep};
use crate::color::brightness_from_rgba;

/// Sample a brightness grid from straight (non-premultiplied) RGBA8 pixels.
///
/// Sample points sit at `(col * step.x, row * step.y)`; fractional positions
/// floor to the containing pixel and the last column/row clamps to
/// `width - 1` / `height - 1`, so a partial trailing cell still reads an
/// in-bounds pixel. One representative pixel per cell, no averaging: the dot
/// grid abstracts away finer detail anyway.
///
/// The output is `ceil(height / step.y)` rows by `ceil(width / step.x)`
/// columns, row-major.
pub fn sample_grid(data: &[u8], width: u32, height: u32, step: GridStep) -> BrightnessGrid {
    debug_assert_eq!(
        data.len(),
        width as usize * height as usize * 4,
        "pixel buffer must be RGBA8 at {}x{}",
        width,
        height,
    );
    debug_assert!(step.x > 0.0 && step.y > 0.0, "steps must be positive");

    let rows = cell_count(height, step.y);
    let cols = cell_count(width, step.x);
    let mut values = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        let py = ((row as f32 * step.y) as u32).min(height - 1);
        for col in 0..cols {
            let px = ((col as f32 * step.x) as u32).min(width - 1);
            let i = (py as usize * width as usize + px as usize) * 4;
            values.push(brightness_from_rgba(
                data[i],
                data[i + 1],
                data[i + 2],
                data[i + 3],
            ));
        }
    }
    BrightnessGrid::new(values, rows, cols)
}

#[inline]
fn cell_count(extent: u32, step: f32) -> usize {
    (extent as f32 / step).ceil() as usize
}
