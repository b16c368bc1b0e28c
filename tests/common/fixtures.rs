//! Test fixtures: canned images and fetcher stubs.

use async_trait::async_trait;
use std::sync::Arc;

use halograph::error::SourceError;
use halograph::services::{FetchedImage, ImageFetcher};

/// Encode a solid-color RGBA PNG of the given size.
pub fn solid_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..width * height {
        pixels.extend_from_slice(&rgba);
    }
    encode_png(&pixels, width, height)
}

/// Encode a horizontal black-to-white gradient PNG.
pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for _y in 0..height {
        for x in 0..width {
            let level = (x * 255 / width.max(1)) as u8;
            pixels.extend_from_slice(&[level, level, level, 255]);
        }
    }
    encode_png(&pixels, width, height)
}

fn encode_png(pixels: &[u8], width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    let mut encoder = png::Encoder::new(&mut bytes, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().expect("Failed to write PNG header");
    writer
        .write_image_data(pixels)
        .expect("Failed to write PNG data");
    writer.finish().expect("Failed to finish PNG");
    bytes
}

/// Fetcher stub that serves the same canned bytes for every URL.
pub struct StubFetcher {
    bytes: Vec<u8>,
    content_type: Option<String>,
}

impl StubFetcher {
    pub fn new(bytes: Vec<u8>) -> Arc<Self> {
        Arc::new(Self {
            bytes,
            content_type: Some("image/png".to_string()),
        })
    }

    pub fn with_content_type(bytes: Vec<u8>, content_type: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            bytes,
            content_type: content_type.map(String::from),
        })
    }
}

#[async_trait]
impl ImageFetcher for StubFetcher {
    async fn fetch(&self, _url: &str) -> Result<FetchedImage, SourceError> {
        Ok(FetchedImage {
            bytes: self.bytes.clone(),
            content_type: self.content_type.clone(),
        })
    }
}

/// Fetcher stub whose every fetch fails.
pub struct FailingFetcher;

#[async_trait]
impl ImageFetcher for FailingFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, SourceError> {
        Err(SourceError::Fetch {
            url: url.to_string(),
            reason: "connection refused".to_string(),
        })
    }
}
