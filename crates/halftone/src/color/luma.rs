//! Perceptual brightness from RGB and RGBA values.
//!
//! Uses ITU-R BT.601 luma weights, which track the eye's strong green
//! sensitivity closely enough for halftone cell sizing.

/// Perceptual brightness of a normalized RGB color.
///
/// Channels are expected in `[0, 1]`; the result is in the same range for
/// in-range input. `brightness(0,0,0) == 0.0`, `brightness(1,1,1) == 1.0`.
#[inline]
pub fn brightness(r: f32, g: f32, b: f32) -> f32 {
    0.299 * r + 0.587 * g + 0.114 * b
}

/// Perceptual brightness of an RGBA byte quadruple, weighted by alpha.
///
/// The luma of the byte channels is normalized to `[0, 1]` and multiplied by
/// `a / 255`, so a fully transparent pixel reports brightness 0 no matter its
/// color. This keeps alpha-masked regions of a source image dark instead of
/// leaking their (invisible) RGB values into the dot grid.
#[inline]
pub fn brightness_from_rgba(r: u8, g: u8, b: u8, a: u8) -> f32 {
    let luma = (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32) / 255.0;
    luma * (a as f32 / 255.0)
}
