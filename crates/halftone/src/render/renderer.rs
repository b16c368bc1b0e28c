use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Shader, Transform};

use crate::error::HalftoneError;
use crate::grid::{BrightnessGrid, GridStep};
use crate::strategy::{DotShape, EffectMode, FillStyle};

/// Draws a brightness grid as styled dots onto a fresh surface.
///
/// The renderer is built once per render from the options record and holds
/// no mutable state, so a single instance can paint any number of grids.
pub struct HalftoneRenderer {
    shape: DotShape,
    effect: EffectMode,
    fill: FillStyle,
}

impl HalftoneRenderer {
    pub fn new(shape: DotShape, effect: EffectMode, fill: FillStyle) -> Self {
        HalftoneRenderer { shape, effect, fill }
    }

    /// Render `grid` into a surface of `round(cols * step.x * scale)` by
    /// `round(rows * step.y * scale)` pixels.
    ///
    /// Each cell draws one dot centered in it, sized and faded from the
    /// cell's brightness. Cells are visited row-major from the top-left, so
    /// the output is deterministic for identical inputs.
    pub fn render(
        &self,
        grid: &BrightnessGrid,
        step: GridStep,
        scale: f32,
    ) -> Result<Pixmap, HalftoneError> {
        let cell_w = step.x * scale;
        let cell_h = step.y * scale;
        let width = (grid.cols() as f32 * cell_w).round() as u32;
        let height = (grid.rows() as f32 * cell_h).round() as u32;
        let mut pixmap = Pixmap::new(width, height)
            .ok_or(HalftoneError::SurfaceAllocation { width, height })?;

        let base = self.fill.shader(width as f32, height as f32)?;
        let half_step = cell_w / 2.0;
        let mut paint = Paint::default();
        paint.anti_alias = true;

        for row in 0..grid.rows() {
            let cy = (row as f32 + 0.5) * cell_h;
            for col in 0..grid.cols() {
                let brightness = grid.get(row, col);
                let radius = self.effect.dot_radius(brightness, half_step);
                let cx = (col as f32 + 0.5) * cell_w;

                let mut pb = PathBuilder::new();
                self.shape.emit(&mut pb, cx, cy, radius);
                let path = match pb.finish() {
                    Some(path) => path,
                    None => continue,
                };

                paint.shader = self.dot_shader(&base, brightness);
                pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
            }
        }

        Ok(pixmap)
    }

    fn dot_shader(&self, base: &Shader<'static>, brightness: f32) -> Shader<'static> {
        let mut shader = base.clone();
        let alpha = self.effect.alpha(brightness);
        if alpha < 1.0 {
            shader.apply_opacity(alpha);
        }
        shader
    }
}
