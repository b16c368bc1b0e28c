//! Dot shape strategies.

use std::fmt;
use std::str::FromStr;

use tiny_skia::{PathBuilder, Rect};

use crate::error::HalftoneError;

/// Shape drawn at every grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DotShape {
    /// Filled circle.
    #[default]
    Circle,
    /// Axis-aligned square with side `2 * radius`.
    Square,
    /// Upward-pointing triangle, `height = radius * sqrt(3)`, apex above
    /// the center and base corners at `(cx ± radius, cy + height/4)`.
    Triangle,
}

impl DotShape {
    /// Append this shape's outline around `(cx, cy)` to a path.
    ///
    /// Fill color and alpha are the renderer's concern; the shape only emits
    /// geometry.
    pub fn emit(self, pb: &mut PathBuilder, cx: f32, cy: f32, radius: f32) {
        match self {
            DotShape::Circle => pb.push_circle(cx, cy, radius),
            DotShape::Square => {
                let side = radius * 2.0;
                if let Some(rect) = Rect::from_xywh(cx - radius, cy - radius, side, side) {
                    pb.push_rect(rect);
                }
            }
            DotShape::Triangle => {
                let height = radius * 3.0_f32.sqrt();
                pb.move_to(cx, cy - height / 2.0);
                pb.line_to(cx + radius, cy + height / 4.0);
                pb.line_to(cx - radius, cy + height / 4.0);
                pb.close();
            }
        }
    }
}

impl FromStr for DotShape {
    type Err = HalftoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "circle" => Ok(DotShape::Circle),
            "square" => Ok(DotShape::Square),
            "triangle" => Ok(DotShape::Triangle),
            other => Err(HalftoneError::UnknownDotShape(other.to_string())),
        }
    }
}

impl fmt::Display for DotShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DotShape::Circle => "circle",
            DotShape::Square => "square",
            DotShape::Triangle => "triangle",
        })
    }
}
