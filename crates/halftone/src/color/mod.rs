//! Color parsing and brightness computation.
//!
//! [`parse_color`] turns free-form color strings into normalized [`Rgb`]
//! values with a black fallback; [`brightness`] and [`brightness_from_rgba`]
//! reduce colors to the scalar luminance the sampler feeds into the dot grid.

mod luma;
mod named;
mod parse;

pub use luma::{brightness, brightness_from_rgba};
pub use parse::{parse_color, Rgb};
