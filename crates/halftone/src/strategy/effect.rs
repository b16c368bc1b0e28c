//! Brightness-to-dot effect strategies.

use std::fmt;
use std::str::FromStr;

use crate::error::HalftoneError;

/// How a cell's brightness maps to dot radius and opacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectMode {
    /// Radius follows brightness at full opacity.
    #[default]
    Scale,
    /// Fixed radius, opacity follows brightness.
    Opacity,
    /// Both radius and opacity follow brightness.
    Both,
}

impl EffectMode {
    /// Dot radius for a brightness sample. `half_step` is the largest radius
    /// that fits a grid cell.
    #[inline]
    pub fn dot_radius(self, brightness: f32, half_step: f32) -> f32 {
        match self {
            EffectMode::Opacity => half_step * 0.5,
            EffectMode::Scale | EffectMode::Both => half_step * ramp(brightness),
        }
    }

    /// Dot opacity for a brightness sample, in `[0, 1]`.
    #[inline]
    pub fn alpha(self, brightness: f32) -> f32 {
        match self {
            EffectMode::Scale => 1.0,
            EffectMode::Opacity | EffectMode::Both => ramp(brightness),
        }
    }
}

/// `0.2 + 0.8 * t` with `t` clamped to `[0, 1]`. The 0.2 floor keeps a
/// zero-brightness cell visibly dotted instead of leaving a sampling hole.
#[inline]
fn ramp(brightness: f32) -> f32 {
    0.2 + 0.8 * brightness.clamp(0.0, 1.0)
}

impl FromStr for EffectMode {
    type Err = HalftoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scale" => Ok(EffectMode::Scale),
            "opacity" => Ok(EffectMode::Opacity),
            "both" => Ok(EffectMode::Both),
            other => Err(HalftoneError::UnknownEffectMode(other.to_string())),
        }
    }
}

impl fmt::Display for EffectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EffectMode::Scale => "scale",
            EffectMode::Opacity => "opacity",
            EffectMode::Both => "both",
        })
    }
}
