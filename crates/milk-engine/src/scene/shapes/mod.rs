pub(crate) mod arc;
pub(crate) mod circle;
pub(crate) mod ellipse;
pub(crate) mod image;
pub(crate) mod path;
pub(crate) mod rect;
pub(crate) mod rounded_rect;
pub(crate) mod shadow;
pub(crate) mod text;

pub use image::ImageData;

use crate::paint::Color;

/// Stroke drawn along the outer edge of a filled shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

impl Border {
    #[inline]
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Pen used by open paths, lines and arcs.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
    pub cap: LineCap,
}

impl Stroke {
    #[inline]
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color, cap: LineCap::Butt }
    }

    #[inline]
    pub fn round(mut self) -> Self {
        self.cap = LineCap::Round;
        self
    }
}
