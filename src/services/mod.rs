pub mod image_source;
pub mod render_service;

pub use image_source::{decode_raster, FetchedImage, HttpImageFetcher, ImageFetcher};
pub use render_service::RenderService;
