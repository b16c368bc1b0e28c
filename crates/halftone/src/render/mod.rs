//! Grid-to-raster dot rendering.

mod renderer;

pub use renderer::HalftoneRenderer;
