//! Fill strategies: solid color and linear gradients.

use std::fmt;
use std::str::FromStr;

use tiny_skia::{
    Color, GradientStop, LinearGradient, Point, Shader, SpreadMode, Transform,
};

use crate::color::{parse_color, Rgb};
use crate::error::HalftoneError;

/// Fill variant requested by the options record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// One flat color for every dot.
    #[default]
    Solid,
    /// Linear gradient between two stops.
    Gradient2,
    /// Linear gradient declared with three colors.
    Gradient3,
}

impl FromStr for ColorMode {
    type Err = HalftoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(ColorMode::Solid),
            "gradient2" => Ok(ColorMode::Gradient2),
            "gradient3" => Ok(ColorMode::Gradient3),
            other => Err(HalftoneError::UnknownColorMode(other.to_string())),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorMode::Solid => "solid",
            ColorMode::Gradient2 => "gradient2",
            ColorMode::Gradient3 => "gradient3",
        })
    }
}

/// Solid fill when the options record carries no color.
const DEFAULT_SOLID: &str = "#000000";

/// Palettes substituted when gradient colors are missing or too few.
const GRADIENT2_DEFAULT: [&str; 2] = ["#7C45D6", "#4C10AE"];
const GRADIENT3_DEFAULT: [&str; 3] = ["#7C45D6", "#4C10AE", "#5E2AC2"];

/// A fill source for the whole output surface, resolved once per render.
#[derive(Debug, Clone, PartialEq)]
pub enum FillStyle {
    Solid(Rgb),
    Gradient { stops: Vec<Rgb>, angle_deg: f32 },
}

impl FillStyle {
    /// Resolve the fill from an options record.
    ///
    /// Unparseable colors fall back to black, and a gradient mode with fewer
    /// colors than it declares takes the default palette; neither is an
    /// error.
    pub fn from_options(
        mode: ColorMode,
        color: Option<&str>,
        gradient_colors: &[String],
        angle_deg: f32,
    ) -> FillStyle {
        match mode {
            ColorMode::Solid => FillStyle::Solid(parse_color(color.unwrap_or(DEFAULT_SOLID))),
            ColorMode::Gradient2 => FillStyle::Gradient {
                stops: resolve_stops(gradient_colors, &GRADIENT2_DEFAULT),
                angle_deg,
            },
            ColorMode::Gradient3 => {
                // TODO: honor the third stop; kept at two stops to match
                // existing renders.
                let stops = resolve_stops(gradient_colors, &GRADIENT3_DEFAULT);
                FillStyle::Gradient {
                    stops: stops[..2].to_vec(),
                    angle_deg,
                }
            }
        }
    }

    /// Build a shader covering a `width x height` surface.
    ///
    /// Gradients run along a line through the surface center at `angle_deg`,
    /// extended half the diagonal in each direction so the gradient spans
    /// the whole canvas at any aspect ratio. Stops are evenly spaced.
    pub fn shader(&self, width: f32, height: f32) -> Result<Shader<'static>, HalftoneError> {
        match self {
            FillStyle::Solid(rgb) => Ok(Shader::SolidColor(opaque(*rgb))),
            FillStyle::Gradient { stops, angle_deg } => {
                let (sin, cos) = angle_deg.to_radians().sin_cos();
                let cx = width / 2.0;
                let cy = height / 2.0;
                let dist = (width * width + height * height).sqrt() / 2.0;
                let start = Point::from_xy(cx - dist * cos, cy - dist * sin);
                let end = Point::from_xy(cx + dist * cos, cy + dist * sin);
                let last = stops.len().saturating_sub(1).max(1) as f32;
                let gradient_stops = stops
                    .iter()
                    .enumerate()
                    .map(|(i, rgb)| GradientStop::new(i as f32 / last, opaque(*rgb)))
                    .collect();
                LinearGradient::new(start, end, gradient_stops, SpreadMode::Pad, Transform::identity())
                    .ok_or(HalftoneError::GradientConstruction)
            }
        }
    }
}

fn resolve_stops(colors: &[String], defaults: &[&str]) -> Vec<Rgb> {
    if colors.len() >= defaults.len() {
        colors.iter().take(defaults.len()).map(|c| parse_color(c)).collect()
    } else {
        defaults.iter().map(|c| parse_color(c)).collect()
    }
}

fn opaque(rgb: Rgb) -> Color {
    let [r, g, b] = rgb.to_bytes();
    Color::from_rgba8(r, g, b, 255)
}
