use crate::coords::Vec2;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::Stroke;

/// Stroked circular arc.
///
/// Angles are in degrees, 0° at three o'clock, positive counter-clockwise;
/// `span` is signed, negative sweeps clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcCmd {
    pub center: Vec2,
    pub radius: f32,
    pub start_angle: f32,
    pub span: f32,
    pub stroke: Stroke,
}

impl ArcCmd {
    /// Point on the arc at `angle` degrees.
    pub fn point_at(&self, angle: f32) -> Vec2 {
        let (s, c) = angle.to_radians().sin_cos();
        Vec2::new(self.center.x + self.radius * c, self.center.y - self.radius * s)
    }
}

impl DrawList {
    /// Records an arc. A zero span draws nothing.
    pub fn push_arc(&mut self, z: ZIndex, center: Vec2, radius: f32, start_angle: f32, span: f32, stroke: Stroke) {
        if span == 0.0 || radius <= 0.0 {
            return;
        }
        self.push(z, DrawCmd::Arc(ArcCmd { center, radius, start_angle, span, stroke }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;

    #[test]
    fn zero_span_is_skipped() {
        let mut list = DrawList::new();
        list.push_arc(ZIndex(0), Vec2::zero(), 10.0, 225.0, 0.0, Stroke::new(1.0, Color::WHITE));
        assert!(list.is_empty());
    }

    #[test]
    fn point_at_uses_screen_y_down() {
        let arc = ArcCmd {
            center: Vec2::zero(),
            radius: 10.0,
            start_angle: 0.0,
            span: 90.0,
            stroke: Stroke::new(1.0, Color::WHITE),
        };
        let p = arc.point_at(90.0);
        assert!(p.x.abs() < 1e-4);
        assert!((p.y + 10.0).abs() < 1e-4);
    }
}
