use chrono::NaiveDateTime;
use milk_engine::coords::{Rect, Vec2};

// ── Edges ─────────────────────────────────────────────────────────────────

/// Insets on all four sides (padding, margin, border).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    #[inline]
    pub fn all(v: f32) -> Self {
        Self { top: v, right: v, bottom: v, left: v }
    }

    #[inline]
    pub fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self { top: vertical, bottom: vertical, left: horizontal, right: horizontal }
    }

    #[inline]
    pub fn horizontal(v: f32) -> Self {
        Self { left: v, right: v, ..Self::default() }
    }

    #[inline]
    pub fn vertical(v: f32) -> Self {
        Self { top: v, bottom: v, ..Self::default() }
    }

    /// CSS shorthand order: 1 value = all, 2 = vertical/horizontal,
    /// 3 = top/horizontal/bottom, 4 = top/right/bottom/left.
    pub fn from_css_values(values: &[f32]) -> Option<Self> {
        match *values {
            [v] => Some(Self::all(v)),
            [v, h] => Some(Self::symmetric(v, h)),
            [top, h, bottom] => Some(Self { top, right: h, bottom, left: h }),
            [top, right, bottom, left] => Some(Self { top, right, bottom, left }),
            _ => None,
        }
    }

    /// Total inset on the horizontal axis.
    #[inline]
    pub fn h(self) -> f32 {
        self.left + self.right
    }

    /// Total inset on the vertical axis.
    #[inline]
    pub fn v(self) -> f32 {
        self.top + self.bottom
    }
}

impl std::ops::Add for Edges {
    type Output = Edges;

    fn add(self, o: Edges) -> Edges {
        Edges {
            top: self.top + o.top,
            right: self.right + o.right,
            bottom: self.bottom + o.bottom,
            left: self.left + o.left,
        }
    }
}

// ── Constraints ───────────────────────────────────────────────────────────

/// Layout constraints passed down from parent to child during measure.
///
/// A child may return any size in `[min, max]`. Parents enforce their own
/// policy by calling [`Constraints::constrain`] on the returned size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub min: Vec2,
    pub max: Vec2,
}

impl Constraints {
    /// Tight: child must be exactly `size`.
    #[inline]
    pub fn tight(size: Vec2) -> Self {
        Self { min: size, max: size }
    }

    /// Loose: child can be anywhere from zero up to `max`.
    #[inline]
    pub fn loose(max: Vec2) -> Self {
        Self { min: Vec2::zero(), max }
    }

    #[inline]
    pub fn unbounded() -> Self {
        Self { min: Vec2::zero(), max: Vec2::new(f32::INFINITY, f32::INFINITY) }
    }

    /// Clamp a size into `[min, max]`.
    #[inline]
    #[must_use]
    pub fn constrain(self, size: Vec2) -> Vec2 {
        Vec2::new(size.x.max(self.min.x).min(self.max.x), size.y.max(self.min.y).min(self.max.y))
    }

    /// Shrink max inward by `edges`. Min becomes zero.
    #[inline]
    #[must_use]
    pub fn shrink(self, edges: Edges) -> Self {
        Self {
            min: Vec2::zero(),
            max: Vec2::new((self.max.x - edges.h()).max(0.0), (self.max.y - edges.v()).max(0.0)),
        }
    }

    /// Finite max width, if any. Text wraps against it.
    #[inline]
    pub fn max_width(self) -> Option<f32> {
        self.max.x.is_finite().then_some(self.max.x)
    }
}

// ── LayoutCtx ─────────────────────────────────────────────────────────────

/// Frame-wide inputs for [`Widget::measure`](crate::widget::Widget::measure).
///
/// Clock text, for one, is a function of the wall clock, so its measured
/// width depends on `now`.
#[derive(Debug, Clone, Copy)]
pub struct LayoutCtx {
    pub now: NaiveDateTime,
}

impl LayoutCtx {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Context at the current local time.
    pub fn now() -> Self {
        Self { now: chrono::Local::now().naive_local() }
    }
}

// ── rect helper ──────────────────────────────────────────────────────────

/// Shrink a rect by `edges`.
#[inline]
pub fn inset_rect(rect: Rect, edges: Edges) -> Rect {
    Rect::new(
        rect.origin.x + edges.left,
        rect.origin.y + edges.top,
        (rect.size.x - edges.h()).max(0.0),
        (rect.size.y - edges.v()).max(0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constrain_clamps_both_ways() {
        let c = Constraints { min: Vec2::new(10.0, 10.0), max: Vec2::new(100.0, 100.0) };
        assert_eq!(c.constrain(Vec2::new(5.0, 300.0)), Vec2::new(10.0, 100.0));
    }

    #[test]
    fn shrink_clamps_to_zero() {
        let s = Constraints::loose(Vec2::new(5.0, 5.0)).shrink(Edges::all(20.0));
        assert_eq!(s.max, Vec2::zero());
    }

    #[test]
    fn inset_rect_asymmetric_padding() {
        let inner = inset_rect(Rect::new(5.0, 5.0, 100.0, 60.0), Edges { top: 4.0, right: 10.0, bottom: 8.0, left: 6.0 });
        assert_eq!(inner, Rect::new(11.0, 9.0, 84.0, 48.0));
    }

    #[test]
    fn css_shorthand_forms() {
        assert_eq!(Edges::from_css_values(&[3.0]), Some(Edges::all(3.0)));
        assert_eq!(Edges::from_css_values(&[1.0, 2.0]), Some(Edges::symmetric(1.0, 2.0)));
        assert_eq!(
            Edges::from_css_values(&[1.0, 2.0, 3.0]),
            Some(Edges { top: 1.0, right: 2.0, bottom: 3.0, left: 2.0 })
        );
        assert_eq!(Edges::from_css_values(&[]), None);
        assert_eq!(Edges::from_css_values(&[1.0; 5]), None);
    }

    #[test]
    fn edges_add() {
        let e = Edges::all(2.0) + Edges::horizontal(3.0);
        assert_eq!((e.h(), e.v()), (10.0, 4.0));
    }
}
