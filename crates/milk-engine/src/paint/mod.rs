//! Paint model shared between widgets and host renderers.
//!
//! Scope:
//! - color representation (straight-alpha sRGB bytes) with CSS parsing and formatting
//! - HSL-based manipulation, contrast analysis and palette generation
//! - paint sources (solid, gradients)
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod gradient;
pub mod tone;

mod paint;

pub use color::Color;
pub use gradient::{ColorStop, Gradient, LinearGradient, SpreadMode};
pub use paint::Paint;
