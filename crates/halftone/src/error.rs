//! Error types for the halftone pipeline.
//!
//! Construction errors (unknown option values, bad spacing) are caller bugs
//! and surface immediately; rendering errors (surface allocation, encoding)
//! are environment problems and are never retried.

use thiserror::Error;

/// Errors produced by pipeline construction and rendering.
#[derive(Debug, Error)]
pub enum HalftoneError {
    /// Dot shape name not one of `circle`, `square`, `triangle`.
    #[error("unknown dot shape: {0}")]
    UnknownDotShape(String),

    /// Effect mode name not one of `scale`, `opacity`, `both`.
    #[error("unknown effect mode: {0}")]
    UnknownEffectMode(String),

    /// Color mode name not one of `solid`, `gradient2`, `gradient3`.
    #[error("unknown color mode: {0}")]
    UnknownColorMode(String),

    /// Explicit dot spacing must be a finite, positive pixel distance.
    #[error("invalid dot spacing: {0}")]
    InvalidSpacing(f32),

    /// Raster allocation failed at the requested dimensions.
    #[error("failed to allocate {width}x{height} drawing surface")]
    SurfaceAllocation { width: u32, height: u32 },

    /// Gradient shader construction failed.
    #[error("failed to build gradient fill")]
    GradientConstruction,

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    PngEncode(#[from] png::EncodingError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_variant_messages() {
        assert_eq!(
            HalftoneError::UnknownDotShape("blob".to_string()).to_string(),
            "unknown dot shape: blob"
        );
        assert_eq!(
            HalftoneError::UnknownEffectMode("wobble".to_string()).to_string(),
            "unknown effect mode: wobble"
        );
        assert_eq!(
            HalftoneError::UnknownColorMode("rainbow".to_string()).to_string(),
            "unknown color mode: rainbow"
        );
    }

    #[test]
    fn test_invalid_spacing_message() {
        assert_eq!(
            HalftoneError::InvalidSpacing(0.0).to_string(),
            "invalid dot spacing: 0"
        );
        assert_eq!(
            HalftoneError::InvalidSpacing(-2.5).to_string(),
            "invalid dot spacing: -2.5"
        );
    }

    #[test]
    fn test_surface_allocation_message() {
        let err = HalftoneError::SurfaceAllocation {
            width: 0,
            height: 480,
        };
        assert_eq!(err.to_string(), "failed to allocate 0x480 drawing surface");
    }

    #[test]
    fn test_gradient_construction_message() {
        assert_eq!(
            HalftoneError::GradientConstruction.to_string(),
            "failed to build gradient fill"
        );
    }
}
