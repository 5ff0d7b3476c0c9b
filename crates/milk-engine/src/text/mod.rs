//! Text description and approximate metrics.
//!
//! Glyph rasterization belongs to the host surface. The engine only needs a
//! stable estimate of text extents for layout and alignment, so metrics use
//! per-font average advances instead of real glyph tables.

mod metrics;
mod style;

pub use metrics::measure;
pub use style::{HAlign, TextStyle, VAlign};
