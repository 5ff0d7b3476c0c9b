use crate::coords::Rect;
use crate::paint::Color;
use crate::paint::gradient::{Gradient, LinearGradient};

/// Paint source for filling geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    LinearGradient(LinearGradient),
}

impl Paint {
    #[inline]
    pub fn solid(color: Color) -> Self {
        Paint::Solid(color)
    }

    /// Resolves an angle-based gradient against the rect it will fill.
    #[inline]
    pub fn gradient(gradient: &Gradient, rect: Rect) -> Self {
        Paint::LinearGradient(gradient.to_linear(rect))
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        match self {
            Paint::Solid(c) => c.a == 255,
            Paint::LinearGradient(g) => g.stops.iter().all(|s| s.color.a == 255),
        }
    }

    /// Scales every alpha channel by `opacity` (clamped to [0, 1]).
    pub fn with_opacity(self, opacity: f32) -> Self {
        match self {
            Paint::Solid(c) => Paint::Solid(c.scale_alpha(opacity)),
            Paint::LinearGradient(mut g) => {
                for stop in &mut g.stops {
                    stop.color = stop.color.scale_alpha(opacity);
                }
                Paint::LinearGradient(g)
            }
        }
    }
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Paint::Solid(c)
    }
}
