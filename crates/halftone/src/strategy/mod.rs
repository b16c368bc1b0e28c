//! Per-dot rendering strategies.
//!
//! Three independent families combine to style a render: the dot geometry
//! ([`DotShape`]), how brightness maps onto the dot ([`EffectMode`]), and the
//! fill painted through it ([`FillStyle`]).

mod dot;
mod effect;
mod fill;

pub use dot::DotShape;
pub use effect::EffectMode;
pub use fill::{ColorMode, FillStyle};
