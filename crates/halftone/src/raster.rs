//! Working raster: the straight-alpha RGBA buffer the pipeline samples from.

use tiny_skia::{ColorU8, FilterQuality, Pixmap, PixmapPaint, Transform};

use crate::error::HalftoneError;
use crate::grid::{sample_grid, BrightnessGrid, GridStep};

/// Decoded source pixels, straight (non-premultiplied) RGBA, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingRaster {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl WorkingRaster {
    /// Wrap a straight RGBA buffer. `data.len()` must be `width * height * 4`.
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * 4);
        WorkingRaster { data, width, height }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Sample a brightness grid from this raster at the given step.
    pub fn sample(&self, step: GridStep) -> BrightnessGrid {
        sample_grid(&self.data, self.width, self.height, step)
    }

    /// Downscale so both dimensions fit within `max_width` x `max_height`,
    /// preserving aspect ratio. Returns the raster unchanged when it already
    /// fits; upscaling never happens.
    pub fn fit(self, max_width: u32, max_height: u32) -> Result<WorkingRaster, HalftoneError> {
        let (new_width, new_height) =
            fit_dimensions(self.width, self.height, max_width, max_height);
        if new_width == self.width && new_height == self.height {
            return Ok(self);
        }

        let src = self.premultiplied_pixmap()?;
        let mut dst = Pixmap::new(new_width, new_height).ok_or(
            HalftoneError::SurfaceAllocation { width: new_width, height: new_height },
        )?;
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        let transform = Transform::from_scale(
            new_width as f32 / self.width as f32,
            new_height as f32 / self.height as f32,
        );
        dst.draw_pixmap(0, 0, src.as_ref(), &paint, transform, None);

        Ok(WorkingRaster::from_rgba(demultiply_rgba(&dst), new_width, new_height))
    }

    /// Copy the buffer into a premultiplied surface for tiny-skia drawing.
    pub fn premultiplied_pixmap(&self) -> Result<Pixmap, HalftoneError> {
        let mut pixmap = Pixmap::new(self.width, self.height).ok_or(
            HalftoneError::SurfaceAllocation { width: self.width, height: self.height },
        )?;
        let pixels = pixmap.pixels_mut();
        for (pixel, rgba) in pixels.iter_mut().zip(self.data.chunks_exact(4)) {
            *pixel = ColorU8::from_rgba(rgba[0], rgba[1], rgba[2], rgba[3]).premultiply();
        }
        Ok(pixmap)
    }
}

/// Scale `width` x `height` down to fit the bounds, keeping aspect ratio.
///
/// Width is constrained first and the height re-checked afterwards, so the
/// result respects both limits. Rounded dimensions are floored at 1.
pub fn fit_dimensions(
    width: u32,
    height: u32,
    max_width: u32,
    max_height: u32,
) -> (u32, u32) {
    let mut w = width as f32;
    let mut h = height as f32;
    if w > max_width as f32 {
        h *= max_width as f32 / w;
        w = max_width as f32;
    }
    if h > max_height as f32 {
        w *= max_height as f32 / h;
        h = max_height as f32;
    }
    ((w.round() as u32).max(1), (h.round() as u32).max(1))
}

/// Flatten a premultiplied surface back to straight RGBA bytes.
pub(crate) fn demultiply_rgba(pixmap: &Pixmap) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixmap.pixels().len() * 4);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_raster(rgba: [u8; 4], width: u32, height: u32) -> WorkingRaster {
        let data = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        WorkingRaster::from_rgba(data, width, height)
    }

    #[test]
    fn test_fit_dimensions_noop_within_bounds() {
        assert_eq!(fit_dimensions(640, 480, 800, 800), (640, 480));
    }

    #[test]
    fn test_fit_dimensions_width_bound() {
        assert_eq!(fit_dimensions(2000, 1000, 800, 800), (800, 400));
    }

    #[test]
    fn test_fit_dimensions_height_bound() {
        assert_eq!(fit_dimensions(1000, 2000, 800, 800), (400, 800));
    }

    #[test]
    fn test_fit_dimensions_both_bounds_applied_in_order() {
        assert_eq!(fit_dimensions(1600, 1200, 800, 300), (400, 300));
    }

    #[test]
    fn test_fit_dimensions_never_collapses_to_zero() {
        assert_eq!(fit_dimensions(10_000, 1, 100, 100), (100, 1));
    }

    #[test]
    fn test_fit_within_bounds_returns_same_buffer() {
        let raster = solid_raster([1, 2, 3, 255], 8, 8);
        let expected = raster.clone();
        assert_eq!(raster.fit(100, 100).unwrap(), expected);
    }

    #[test]
    fn test_fit_downscales_solid_color_losslessly() {
        let raster = solid_raster([200, 40, 10, 255], 8, 4);
        let fitted = raster.fit(4, 4).unwrap();
        assert_eq!((fitted.width(), fitted.height()), (4, 2));
        for rgba in fitted.data().chunks_exact(4) {
            assert_eq!(rgba, [200, 40, 10, 255]);
        }
    }

    #[test]
    fn test_premultiply_round_trip_opaque() {
        let raster = solid_raster([17, 99, 201, 255], 3, 3);
        let pixmap = raster.premultiplied_pixmap().unwrap();
        assert_eq!(demultiply_rgba(&pixmap), raster.data());
    }

    #[test]
    fn test_premultiply_round_trip_translucent_is_close() {
        let raster = solid_raster([200, 100, 50, 128], 2, 2);
        let pixmap = raster.premultiplied_pixmap().unwrap();
        for (back, orig) in demultiply_rgba(&pixmap)
            .chunks_exact(4)
            .zip(raster.data().chunks_exact(4))
        {
            for (b, o) in back.iter().zip(orig) {
                assert!((*b as i32 - *o as i32).abs() <= 3, "{back:?} vs {orig:?}");
            }
        }
    }

    #[test]
    fn test_sample_reads_straight_alpha() {
        // left pixel opaque white, right pixel transparent white
        let raster = WorkingRaster::from_rgba(
            vec![255, 255, 255, 255, 255, 255, 255, 0],
            2,
            1,
        );
        let grid = raster.sample(GridStep::uniform(1.0));
        assert_eq!(grid.get(0, 0), 1.0);
        assert_eq!(grid.get(0, 1), 0.0);
    }
}
