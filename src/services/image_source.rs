//! Source image acquisition: fetch remote bytes and decode them into the
//! raster the render pipeline samples from.

use async_trait::async_trait;
use halftone::WorkingRaster;
use std::time::Duration;

use crate::error::SourceError;

/// Fetched source bytes plus the upstream content type, when known.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Abstraction over "URL in, image bytes out" so tests can substitute a
/// stub without a network.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, SourceError>;
}

/// HTTP fetcher with a request timeout, bounded redirects, and a size cap.
pub struct HttpImageFetcher {
    client: reqwest::Client,
    max_bytes: usize,
}

impl HttpImageFetcher {
    pub fn new(timeout: Duration, max_bytes: usize) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client, max_bytes })
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, SourceError> {
        tracing::debug!(url = %url, "Fetching source image");

        let response = self.client.get(url).send().await.map_err(|e| {
            SourceError::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        // Reject oversized bodies early when the upstream declares a length
        if let Some(len) = response.content_length() {
            if len as usize > self.max_bytes {
                return Err(SourceError::TooLarge {
                    size: len as usize,
                    max: self.max_bytes,
                });
            }
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let bytes = response.bytes().await.map_err(|e| SourceError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if bytes.len() > self.max_bytes {
            return Err(SourceError::TooLarge {
                size: bytes.len(),
                max: self.max_bytes,
            });
        }

        tracing::debug!(url = %url, size_bytes = bytes.len(), "Fetched source image");

        Ok(FetchedImage {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}

/// Decode image bytes (PNG, JPEG, GIF, WebP) into a straight-RGBA raster.
pub fn decode_raster(bytes: &[u8]) -> Result<WorkingRaster, SourceError> {
    let image = image::load_from_memory(bytes).map_err(|e| SourceError::Decode(e.to_string()))?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(WorkingRaster::from_rgba(rgba.into_raw(), width, height))
}
