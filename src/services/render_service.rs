//! Async wrapper around the halftone pipeline.
//!
//! Sampling a large raster is pure CPU work, so sources above
//! [`LARGE_IMAGE_PIXELS`] are sampled on the blocking pool instead of a
//! runtime worker. The output is byte-identical either way.

use halftone::{
    HalftoneImage, HalftoneOptions, HalftoneProcessor, RenderMetadata, WorkingRaster,
    LARGE_IMAGE_PIXELS,
};

use crate::error::ApiError;

#[derive(Default)]
pub struct RenderService;

impl RenderService {
    pub fn new() -> Self {
        Self
    }

    /// Render a decoded source raster with the given options.
    pub async fn render(
        &self,
        source: WorkingRaster,
        options: HalftoneOptions,
    ) -> Result<HalftoneImage, ApiError> {
        let processor = HalftoneProcessor::new(options)?;

        let source_width = source.width();
        let source_height = source.height();

        let raster = processor.working_raster(source)?;
        let working_width = raster.width();
        let working_height = raster.height();
        let pixel_count = raster.pixel_count();

        let step = processor.sampling_step(processor.grid_step(&raster));

        let (grid, processor) = if pixel_count > LARGE_IMAGE_PIXELS {
            tracing::debug!(pixels = pixel_count, "Sampling large source on the blocking pool");
            tokio::task::spawn_blocking(move || {
                let grid = processor.sample(&raster, step);
                (grid, processor)
            })
            .await
            .map_err(|e| ApiError::Internal(format!("Task error: {e}")))?
        } else {
            let grid = processor.sample(&raster, step);
            (grid, processor)
        };

        let rendered = processor.render_sampled(working_width, working_height, step, &grid)?;

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
