use milk_engine::coords::{Rect, Vec2};

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::widget::Widget;

/// Empty space in a container.
///
/// `Spacer::new(n)` with `n > 0` is a fixed `n × n` square; `n <= 0` makes
/// an expanding spacer that soaks up the space its siblings leave over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacer {
    width: Option<f32>,
    height: Option<f32>,
}

impl Spacer {
    pub fn new(size: f32) -> Self {
        if size > 0.0 { Self { width: Some(size), height: Some(size) } } else { Self::expanding() }
    }

    pub fn expanding() -> Self {
        Self { width: None, height: None }
    }

    /// Fixed width, no height.
    pub fn horizontal(size: f32) -> Self {
        Self { width: Some(size.max(0.0)), height: Some(0.0) }
    }

    /// Fixed height, no width.
    pub fn vertical(size: f32) -> Self {
        Self { width: Some(0.0), height: Some(size.max(0.0)) }
    }

    pub fn size(&self) -> Option<Vec2> {
        Some(Vec2::new(self.width?, self.height?))
    }
}

impl Default for Spacer {
    fn default() -> Self {
        Self::expanding()
    }
}

impl Widget for Spacer {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        constraints.constrain(Vec2::new(self.width.unwrap_or(0.0), self.height.unwrap_or(0.0)))
    }

    fn paint(&self, _painter: &mut Painter, _rect: Rect) {}

    fn is_expanding(&self) -> bool {
        self.width.is_none() || self.height.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_size_is_fixed_square() {
        let s = Spacer::new(12.0);
        assert_eq!(s.size(), Some(Vec2::splat(12.0)));
        assert!(!s.is_expanding());
    }

    #[test]
    fn zero_size_expands() {
        assert!(Spacer::new(0.0).is_expanding());
        assert!(Spacer::new(-3.0).is_expanding());
        let m = Spacer::new(0.0).measure(Constraints::loose(Vec2::splat(100.0)), &LayoutCtx::now());
        assert_eq!(m, Vec2::zero());
    }

    #[test]
    fn directional_spacers() {
        assert_eq!(Spacer::horizontal(20.0).size(), Some(Vec2::new(20.0, 0.0)));
        assert_eq!(Spacer::vertical(8.0).size(), Some(Vec2::new(0.0, 8.0)));
    }
}
