//! MilkWidget engine crate.
//!
//! Renderer-agnostic pieces used by the widget layer: coordinates, the color
//! model, shape outlines, the draw-command scene, the property animation
//! engine and frame timing.

pub mod anim;
pub mod coords;
pub mod geometry;
pub mod logging;
pub mod paint;
pub mod scene;
pub mod text;
pub mod time;
