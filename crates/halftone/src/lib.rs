//! halftone: raster images to print-style dot renderings
//!
//! This library turns a decoded raster image into a halftone rendering: a
//! regular grid of dots whose size, opacity, and color encode the local
//! brightness of the source, mimicking print halftoning.
//!
//! # Quick Start
//!
//! The [`HalftoneProcessor`] runs the whole pipeline:
//!
//! ```
//! use halftone::{HalftoneOptions, HalftoneProcessor, WorkingRaster};
//!
//! // a 2x2 mid-gray source, straight RGBA
//! let data = vec![128u8, 128, 128, 255].repeat(4);
//! let raster = WorkingRaster::from_rgba(data, 2, 2);
//!
//! let options = HalftoneOptions::new().with_spacing(1.0);
//! let processor = HalftoneProcessor::new(options)?;
//! let image = processor.process(raster)?;
//!
//! assert_eq!(image.width(), 2);
//! assert_eq!(image.height(), 2);
//! let png_bytes = image.encode_png()?;
//! # assert!(!png_bytes.is_empty());
//! # Ok::<(), halftone::HalftoneError>(())
//! ```
//!
//! # Pipeline
//!
//! ```text
//! decoded RGBA bytes
//!     |
//!     v
//! WorkingRaster            (optional downscale to fit max dimensions)
//!     |
//!     v
//! BrightnessGrid           (one BT.601 luminance sample per future dot)
//!     |
//!     v
//! HalftoneRenderer         (dot shape x effect x fill, row-major)
//!     |
//!     v
//! output surface           (optional smoothing downscale, optional trim)
//! ```
//!
//! # Strategies
//!
//! Three orthogonal families combine into a dot style, all selected from the
//! options record:
//!
//! - [`DotShape`]: circle, square, or triangle geometry per dot.
//! - [`EffectMode`]: brightness scales the dot radius, fades its opacity, or
//!   both. Radius and opacity ramp over `0.2 + 0.8 * brightness` so even
//!   black cells leave a visible mark.
//! - [`ColorMode`] / [`FillStyle`]: a solid color or a linear gradient
//!   spanning the whole output, resolved once per render. Color values
//!   accept hex, `rgb()`, `hsl()`, and CSS keyword notation; anything
//!   unparseable falls back to black rather than failing the render.
//!
//! # Grid geometry
//!
//! Dot pitch is either the caller's `spacing` or auto-derived to keep about
//! 80 dot columns across the longer image dimension. The sampler and the
//! renderer share one [`GridStep`], so every dot is centered on the cell it
//! was sampled from. Smoothing samples at half the step and renders at
//! double scale, then downscales back, trading one extra resampling pass
//! for anti-aliased dot edges.

pub mod color;
pub mod error;
pub mod grid;
pub mod options;
pub mod output;
pub mod processor;
pub mod raster;
pub mod render;
pub mod strategy;


pub use color::{brightness, brightness_from_rgba, parse_color, Rgb};
pub use error::HalftoneError;
pub use grid::{compute_grid_step, sample_grid, BrightnessGrid, GridStep};
pub use options::HalftoneOptions;
pub use output::{HalftoneImage, RenderMetadata};
pub use processor::{
    trim_transparent, HalftoneProcessor, LARGE_IMAGE_PIXELS, TRIM_ALPHA_THRESHOLD,
};
pub use raster::{fit_dimensions, WorkingRaster};
pub use render::HalftoneRenderer;
pub use strategy::{ColorMode, DotShape, EffectMode, FillStyle};

pub use tiny_skia;
