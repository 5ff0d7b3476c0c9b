//! Widget outline geometry.
//!
//! A [`Shape`] plus a corner radius resolves against a rect into an
//! [`Outline`]. The same outline drives painting (clip + fill) and hit
//! testing, so what is drawn is exactly what receives input.

mod outline;
mod shape;

pub use outline::Outline;
pub use shape::Shape;
