//! Rendered output: surface, render metadata, and PNG encoding.

use tiny_skia::Pixmap;

use crate::error::HalftoneError;
use crate::raster::demultiply_rgba;

/// Dimensions involved in a render, kept alongside the output so callers
/// can map output coordinates back to the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderMetadata {
    /// Decoded source image width.
    pub source_width: u32,
    /// Decoded source image height.
    pub source_height: u32,
    /// Working-raster width after any fit-downscale.
    pub working_width: u32,
    /// Working-raster height after any fit-downscale.
    pub working_height: u32,
}

impl RenderMetadata {
    /// Ratio of working-raster width to source width, 1.0 when the source
    /// was not downscaled.
    pub fn scale_factor(&self) -> f32 {
        self.working_width as f32 / self.source_width as f32
    }
}

/// A finished halftone render.
#[derive(Debug, Clone)]
pub struct HalftoneImage {
    pixmap: Pixmap,
    metadata: RenderMetadata,
}

impl HalftoneImage {
    pub fn new(pixmap: Pixmap, metadata: RenderMetadata) -> Self {
        HalftoneImage { pixmap, metadata }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    #[inline]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    #[inline]
    pub fn metadata(&self) -> RenderMetadata {
        self.metadata
    }

    /// Flatten to straight (non-premultiplied) RGBA bytes, row-major.
    pub fn to_rgba(&self) -> Vec<u8> {
        demultiply_rgba(&self.pixmap)
    }

    /// Encode the surface as an RGBA PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, HalftoneError> {
        let mut bytes = Vec::new();
        let mut encoder = png::Encoder::new(&mut bytes, self.width(), self.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.to_rgba())?;
        writer.finish()?;
        Ok(bytes)
    }
}
