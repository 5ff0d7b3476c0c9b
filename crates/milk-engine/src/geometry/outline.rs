use crate::coords::{CornerRadii, Rect, Vec2};
use crate::paint::Paint;
use crate::scene::{Border, DrawList, ZIndex};

use super::Shape;

/// Resolved outline of a shape inside a rect.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Outline {
    Rect(Rect),
    RoundedRect { rect: Rect, radius: f32 },
    Circle { center: Vec2, radius: f32 },
    Ellipse(Rect),
}

impl Outline {
    /// Resolves `shape` against `rect`.
    ///
    /// - Circle: inscribed, diameter = shorter side, centred.
    /// - RoundedRect: radius clamped to `[0, min(w, h) / 2]`.
    /// - Ellipse fills the rect; the remaining shapes use the rect itself.
    pub fn resolve(shape: Shape, corner_radius: f32, rect: Rect) -> Outline {
        let rect = rect.normalized();
        match shape {
            Shape::Circle => {
                let side = rect.width().min(rect.height());
                Outline::Circle { center: rect.center(), radius: side / 2.0 }
            }
            Shape::RoundedRect => {
                let max = rect.width().min(rect.height()) / 2.0;
                Outline::RoundedRect { rect, radius: corner_radius.clamp(0.0, max.max(0.0)) }
            }
            Shape::Ellipse => Outline::Ellipse(rect),
            Shape::Rectangle | Shape::Square | Shape::Custom => Outline::Rect(rect),
        }
    }

    pub fn bounds(self) -> Rect {
        match self {
            Outline::Rect(r) | Outline::Ellipse(r) => r,
            Outline::RoundedRect { rect, .. } => rect,
            Outline::Circle { center, radius } => Rect::from_center(center, Vec2::splat(radius * 2.0)),
        }
    }

    /// Hit mask. Points on the curved boundary count as inside.
    pub fn contains(self, p: Vec2) -> bool {
        match self {
            Outline::Rect(r) => r.contains(p),
            Outline::Circle { center, radius } => (p - center).length() <= radius,
            Outline::Ellipse(r) => {
                let rx = r.width() / 2.0;
                let ry = r.height() / 2.0;
                if rx <= 0.0 || ry <= 0.0 {
                    return false;
                }
                let d = p - r.center();
                (d.x / rx).powi(2) + (d.y / ry).powi(2) <= 1.0
            }
            Outline::RoundedRect { rect, radius } => {
                if !rect.contains(p) {
                    return false;
                }
                // Only the corner squares need the distance test.
                let min = rect.min() + Vec2::splat(radius);
                let max = rect.max() - Vec2::splat(radius);
                let cx = p.x.clamp(min.x, max.x);
                let cy = p.y.clamp(min.y, max.y);
                (p - Vec2::new(cx, cy)).length() <= radius
            }
        }
    }

    /// Records a fill of this outline into `list`.
    pub fn push_fill(self, list: &mut DrawList, z: ZIndex, paint: Paint, border: Option<Border>) {
        match self {
            Outline::Rect(rect) if border.is_none() => list.push_rect(z, rect, paint),
            Outline::Rect(rect) => list.push_rounded_rect(z, rect, CornerRadii::zero(), paint, border),
            Outline::RoundedRect { rect, radius } => {
                list.push_rounded_rect(z, rect, CornerRadii::all(radius), paint, border)
            }
            Outline::Circle { center, radius } => list.push_circle(z, center, radius, paint, border),
            Outline::Ellipse(rect) => list.push_ellipse(z, rect, paint, border),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── resolve ───────────────────────────────────────────────────────────

    #[test]
    fn circle_is_inscribed_and_centred() {
        let o = Outline::resolve(Shape::Circle, 0.0, r(0.0, 0.0, 300.0, 200.0));
        assert_eq!(o, Outline::Circle { center: Vec2::new(150.0, 100.0), radius: 100.0 });
    }

    #[test]
    fn rounded_radius_is_clamped() {
        let o = Outline::resolve(Shape::RoundedRect, 500.0, r(0.0, 0.0, 40.0, 20.0));
        assert_eq!(o, Outline::RoundedRect { rect: r(0.0, 0.0, 40.0, 20.0), radius: 10.0 });
        let o = Outline::resolve(Shape::RoundedRect, -3.0, r(0.0, 0.0, 40.0, 20.0));
        assert_eq!(o, Outline::RoundedRect { rect: r(0.0, 0.0, 40.0, 20.0), radius: 0.0 });
    }

    // ── hit mask ──────────────────────────────────────────────────────────

    #[test]
    fn circle_mask_rejects_corners() {
        let o = Outline::resolve(Shape::Circle, 0.0, r(0.0, 0.0, 100.0, 100.0));
        assert!(o.contains(Vec2::new(50.0, 50.0)));
        assert!(!o.contains(Vec2::new(2.0, 2.0)));
    }

    #[test]
    fn rounded_mask_rejects_corner_but_accepts_edges() {
        let o = Outline::resolve(Shape::RoundedRect, 20.0, r(0.0, 0.0, 100.0, 100.0));
        assert!(!o.contains(Vec2::new(1.0, 1.0)));
        assert!(o.contains(Vec2::new(50.0, 1.0)));
        assert!(o.contains(Vec2::new(1.0, 50.0)));
    }

    #[test]
    fn ellipse_mask() {
        let o = Outline::resolve(Shape::Ellipse, 0.0, r(0.0, 0.0, 200.0, 100.0));
        assert!(o.contains(Vec2::new(190.0, 50.0)));
        assert!(!o.contains(Vec2::new(190.0, 10.0)));
    }
}
