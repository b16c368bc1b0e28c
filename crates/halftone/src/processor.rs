//! Render orchestration: fit, sample, render, smooth, trim.

use tiny_skia::{FilterQuality, Pixmap, PixmapPaint, Transform};

use crate::error::HalftoneError;
use crate::grid::{compute_grid_step, BrightnessGrid, GridStep};
use crate::options::HalftoneOptions;
use crate::output::{HalftoneImage, RenderMetadata};
use crate::raster::WorkingRaster;
use crate::render::HalftoneRenderer;
use crate::strategy::FillStyle;

/// Alpha fraction below which a pixel counts as transparent when trimming.
pub const TRIM_ALPHA_THRESHOLD: f32 = 0.01;

/// Pixel count above which callers should move sampling off their thread.
pub const LARGE_IMAGE_PIXELS: u64 = 512 * 512;

/// One-shot render pipeline driven by an options record.
///
/// [`HalftoneProcessor::process`] runs every stage in order. The stages are
/// also public individually so async callers can run the sampling stage on a
/// worker and feed the result back into [`HalftoneProcessor::render_sampled`].
pub struct HalftoneProcessor {
    options: HalftoneOptions,
}

impl HalftoneProcessor {
    /// Validate the options record and build a processor.
    pub fn new(options: HalftoneOptions) -> Result<Self, HalftoneError> {
        if let Some(spacing) = options.spacing {
            if !spacing.is_finite() || spacing <= 0.0 {
                return Err(HalftoneError::InvalidSpacing(spacing));
            }
        }
        Ok(HalftoneProcessor { options })
    }

    #[inline]
    pub fn options(&self) -> &HalftoneOptions {
        &self.options
    }

    /// Fit the decoded source into the configured max dimensions.
    pub fn working_raster(&self, source: WorkingRaster) -> Result<WorkingRaster, HalftoneError> {
        source.fit(
            self.options.max_width.unwrap_or(u32::MAX),
            self.options.max_height.unwrap_or(u32::MAX),
        )
    }

    /// Dot pitch for a working raster, explicit or auto-derived.
    pub fn grid_step(&self, raster: &WorkingRaster) -> GridStep {
        compute_grid_step(raster.width(), raster.height(), self.options.spacing)
    }

    /// The step the sampler actually uses. Smoothing halves it so the
    /// supersampled render has twice the cells per axis to downscale from.
    pub fn sampling_step(&self, step: GridStep) -> GridStep {
        if self.options.smoothing {
            step.halved()
        } else {
            step
        }
    }

    /// Sample a brightness grid from the working raster.
    pub fn sample(&self, raster: &WorkingRaster, step: GridStep) -> BrightnessGrid {
        raster.sample(step)
    }

    /// Render a sampled grid and run the post passes.
    ///
    /// `step` must be the sampling step the grid was built with. Under
    /// smoothing this renders at double scale and downscales back to the
    /// working-raster dimensions; trim then crops transparent borders.
    pub fn render_sampled(
        &self,
        working_width: u32,
        working_height: u32,
        step: GridStep,
        grid: &BrightnessGrid,
    ) -> Result<Pixmap, HalftoneError> {
        let fill = FillStyle::from_options(
            self.options.color_mode,
            self.options.color.as_deref(),
            &self.options.gradient_colors,
            self.options.gradient_angle,
        );
        let renderer =
            HalftoneRenderer::new(self.options.dot_type, self.options.effect_type, fill);

        let mut rendered = if self.options.smoothing {
            let supersampled = renderer.render(grid, step, 2.0)?;
            downscale(&supersampled, working_width, working_height)?
        } else {
            renderer.render(grid, step, 1.0)?
        };

        if self.options.trim {
            rendered = trim_transparent(rendered, TRIM_ALPHA_THRESHOLD)?;
        }
        Ok(rendered)
    }

    /// Run the whole pipeline on a decoded source raster.
    pub fn process(&self, source: WorkingRaster) -> Result<HalftoneImage, HalftoneError> {
        let source_width = source.width();
        let source_height = source.height();

        let raster = self.working_raster(source)?;
        let working_width = raster.width();
        let working_height = raster.height();

        let step = self.sampling_step(self.grid_step(&raster));
        let grid = self.sample(&raster, step);
        let rendered = self.render_sampled(working_width, working_height, step, &grid)?;

        Ok(HalftoneImage::new(
            rendered,
            RenderMetadata {
                source_width,
                source_height,
                working_width,
                working_height,
            },
        ))
    }
}

/// Crop a surface to the bounding box of pixels whose alpha fraction
/// exceeds `threshold`.
///
/// The surface is returned unchanged when no pixel passes the threshold or
/// when the box already spans the whole canvas, so trimming an already
/// trimmed surface changes nothing.
pub fn trim_transparent(pixmap: Pixmap, threshold: f32) -> Result<Pixmap, HalftoneError> {
    let full = (0, 0, pixmap.width() - 1, pixmap.height() - 1);
    match visible_bounds(&pixmap, threshold) {
        Some(bounds) if bounds != full => {
            let (min_x, min_y, max_x, max_y) = bounds;
            crop(&pixmap, min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
        }
        _ => Ok(pixmap),
    }
}

fn visible_bounds(pixmap: &Pixmap, threshold: f32) -> Option<(u32, u32, u32, u32)> {
    let cutoff = threshold * 255.0;
    let pixels = pixmap.pixels();
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    let mut idx = 0;
    for y in 0..pixmap.height() {
        for x in 0..pixmap.width() {
            if pixels[idx].alpha() as f32 > cutoff {
                bounds = Some(match bounds {
                    Some((min_x, min_y, max_x, max_y)) => {
                        (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
                    }
                    None => (x, y, x, y),
                });
            }
            idx += 1;
        }
    }
    bounds
}

fn crop(
    pixmap: &Pixmap,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<Pixmap, HalftoneError> {
    let mut out =
        Pixmap::new(width, height).ok_or(HalftoneError::SurfaceAllocation { width, height })?;
    let src_stride = pixmap.width() as usize * 4;
    let dst_stride = width as usize * 4;
    let src = pixmap.data();
    let dst = out.data_mut();
    for row in 0..height as usize {
        let src_start = (y as usize + row) * src_stride + x as usize * 4;
        let dst_start = row * dst_stride;
        dst[dst_start..dst_start + dst_stride]
            .copy_from_slice(&src[src_start..src_start + dst_stride]);
    }
    Ok(out)
}

fn downscale(pixmap: &Pixmap, width: u32, height: u32) -> Result<Pixmap, HalftoneError> {
    let mut out =
        Pixmap::new(width, height).ok_or(HalftoneError::SurfaceAllocation { width, height })?;
    let paint = PixmapPaint {
        quality: FilterQuality::Bicubic,
        ..PixmapPaint::default()
    };
    let transform = Transform::from_scale(
        width as f32 / pixmap.width() as f32,
        height as f32 / pixmap.height() as f32,
    );
    out.draw_pixmap(0, 0, pixmap.as_ref(), &paint, transform, None);
    Ok(out)
}
