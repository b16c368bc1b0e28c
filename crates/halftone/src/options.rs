//! Render options.

use crate::strategy::{ColorMode, DotShape, EffectMode};

/// Caller-supplied settings for one halftone render.
///
/// Every field has a usable default, so `HalftoneOptions::new()` alone
/// produces black circles scaled by brightness on an auto-sized grid.
#[derive(Debug, Clone, PartialEq)]
pub struct HalftoneOptions {
    /// Dot geometry. Default: [`DotShape::Circle`].
    pub dot_type: DotShape,
    /// How brightness maps onto each dot. Default: [`EffectMode::Scale`].
    pub effect_type: EffectMode,
    /// Fill variant. Default: [`ColorMode::Solid`].
    pub color_mode: ColorMode,
    /// Solid fill color in any supported CSS notation. Default: `None`,
    /// which paints black.
    pub color: Option<String>,
    /// Gradient stop colors. Too few entries for the mode fall back to the
    /// built-in palette. Default: empty.
    pub gradient_colors: Vec<String>,
    /// Gradient axis in degrees, 0 pointing right and 90 down. Default: `90.0`.
    pub gradient_angle: f32,
    /// Dot pitch in pixels. Default: `None`, deriving the pitch from the
    /// working-raster size.
    pub spacing: Option<f32>,
    /// Bound on the working-raster width; larger sources are downscaled.
    /// Default: `None`.
    pub max_width: Option<u32>,
    /// Bound on the working-raster height. Default: `None`.
    pub max_height: Option<u32>,
    /// Supersample and downscale for softer dot edges. Default: `false`.
    pub smoothing: bool,
    /// Crop fully transparent borders from the result. Default: `false`.
    pub trim: bool,
}

impl Default for HalftoneOptions {
    fn default() -> Self {
        HalftoneOptions {
            dot_type: DotShape::Circle,
            effect_type: EffectMode::Scale,
            color_mode: ColorMode::Solid,
            color: None,
            gradient_colors: Vec::new(),
            gradient_angle: 90.0,
            spacing: None,
            max_width: None,
            max_height: None,
            smoothing: false,
            trim: false,
        }
    }
}

impl HalftoneOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_dot_type(mut self, dot_type: DotShape) -> Self {
        self.dot_type = dot_type;
        self
    }

    #[inline]
    pub fn with_effect_type(mut self, effect_type: EffectMode) -> Self {
        self.effect_type = effect_type;
        self
    }

    #[inline]
    pub fn with_color_mode(mut self, color_mode: ColorMode) -> Self {
        self.color_mode = color_mode;
        self
    }

    #[inline]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[inline]
    pub fn with_gradient_colors(mut self, colors: Vec<String>) -> Self {
        self.gradient_colors = colors;
        self
    }

    #[inline]
    pub fn with_gradient_angle(mut self, degrees: f32) -> Self {
        self.gradient_angle = degrees;
        self
    }

    #[inline]
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = Some(spacing);
        self
    }

    #[inline]
    pub fn with_max_dimensions(mut self, max_width: u32, max_height: u32) -> Self {
        self.max_width = Some(max_width);
        self.max_height = Some(max_height);
        self
    }

    #[inline]
    pub fn with_smoothing(mut self, smoothing: bool) -> Self {
        self.smoothing = smoothing;
        self
    }

    #[inline]
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = HalftoneOptions::new();
        assert_eq!(options.dot_type, DotShape::Circle);
        assert_eq!(options.effect_type, EffectMode::Scale);
        assert_eq!(options.color_mode, ColorMode::Solid);
        assert_eq!(options.color, None);
        assert!(options.gradient_colors.is_empty());
        assert_eq!(options.gradient_angle, 90.0);
        assert_eq!(options.spacing, None);
        assert_eq!(options.max_width, None);
        assert_eq!(options.max_height, None);
        assert!(!options.smoothing);
        assert!(!options.trim);
    }

    #[test]
    fn test_builder_chain() {
        let options = HalftoneOptions::new()
            .with_dot_type(DotShape::Triangle)
            .with_effect_type(EffectMode::Both)
            .with_color_mode(ColorMode::Gradient2)
            .with_gradient_colors(vec!["#ff0000".to_string(), "#0000ff".to_string()])
            .with_gradient_angle(45.0)
            .with_spacing(12.0)
            .with_max_dimensions(800, 600)
            .with_smoothing(true)
            .with_trim(true);

        assert_eq!(options.dot_type, DotShape::Triangle);
        assert_eq!(options.effect_type, EffectMode::Both);
        assert_eq!(options.color_mode, ColorMode::Gradient2);
        assert_eq!(options.gradient_colors.len(), 2);
        assert_eq!(options.gradient_angle, 45.0);
        assert_eq!(options.spacing, Some(12.0));
        assert_eq!(options.max_width, Some(800));
        assert_eq!(options.max_height, Some(600));
        assert!(options.smoothing);
        assert!(options.trim);
    }

    #[test]
    fn test_with_color() {
        let options = HalftoneOptions::new().with_color("#123456");
        assert_eq!(options.color.as_deref(), Some("#123456"));
    }
}
