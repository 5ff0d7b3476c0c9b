use crate::coords::{Rect, Vec2};

use super::Color;

/// Gradient spread behavior outside [0, 1] range.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum SpreadMode {
    /// Clamp to edge stops.
    #[default]
    Pad,
    /// Repeat the gradient pattern.
    Repeat,
    /// Mirror-repeat the gradient pattern.
    Reflect,
}

/// A single gradient stop.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Linear gradient resolved to logical pixel space.
///
/// `start` and `end` are positions in the same coordinate space as geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: Vec<ColorStop>,
    pub spread: SpreadMode,
}

impl LinearGradient {
    pub fn new(start: Vec2, end: Vec2, stops: Vec<ColorStop>, spread: SpreadMode) -> Self {
        Self { start, end, stops, spread }
    }

    /// Two-stop pad gradient.
    pub fn two_stop(start: Vec2, end: Vec2, from: Color, to: Color) -> Self {
        Self::new(start, end, vec![ColorStop::new(0.0, from), ColorStop::new(1.0, to)], SpreadMode::Pad)
    }

    /// Vertical gradient across `rect`, top to bottom.
    pub fn vertical(rect: Rect, top: Color, bottom: Color) -> Self {
        Self::two_stop(rect.min(), Vec2::new(rect.x(), rect.max().y), top, bottom)
    }

    /// Horizontal gradient across `rect`, left to right.
    pub fn horizontal(rect: Rect, left: Color, right: Color) -> Self {
        Self::two_stop(rect.min(), Vec2::new(rect.max().x, rect.y()), left, right)
    }

    /// Color at parameter `t`, honoring `spread` outside [0, 1].
    pub fn sample(&self, t: f32) -> Color {
        let t = match self.spread {
            SpreadMode::Pad => t.clamp(0.0, 1.0),
            SpreadMode::Repeat => t.rem_euclid(1.0),
            SpreadMode::Reflect => {
                let m = t.rem_euclid(2.0);
                if m > 1.0 { 2.0 - m } else { m }
            }
        };
        let Some(first) = self.stops.first() else {
            return Color::TRANSPARENT;
        };
        if t <= first.t {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.t {
                let span = (b.t - a.t).max(f32::EPSILON);
                return a.color.lerp(b.color, (t - a.t) / span);
            }
        }
        self.stops.last().map(|s| s.color).unwrap_or(first.color)
    }

    /// Returns true when the gradient definition is structurally usable.
    pub fn is_valid(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.stops.iter().all(|s| s.t.is_finite())
            && self.stops.len() >= 2
            && (self.end.x != self.start.x || self.end.y != self.start.y)
    }
}

/// Angle-based two-color gradient as authored in style sheets.
///
/// `angle` follows CSS: 0° points up, 90° right, 180° (the default) down.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Gradient {
    pub start: Color,
    pub end: Color,
    pub angle: f32,
}

impl Gradient {
    pub const DEFAULT_ANGLE: f32 = 180.0;

    pub fn new(start: Color, end: Color, angle: f32) -> Self {
        Self { start, end, angle }
    }

    /// Resolves the gradient line against `rect` so the corner colors match CSS.
    pub fn to_linear(&self, rect: Rect) -> LinearGradient {
        let dir = Vec2::new(0.0, -1.0).rotated(self.angle);
        let half = rect.size * 0.5;
        let len = (half.x * dir.x).abs() + (half.y * dir.y).abs();
        let c = rect.center();
        LinearGradient::two_stop(c - dir * len, c + dir * len, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    #[test]
    fn default_angle_runs_top_to_bottom() {
        let g = Gradient::new(Color::BLACK, Color::WHITE, 180.0).to_linear(Rect::new(0.0, 0.0, 100.0, 50.0));
        assert!(close(g.start, Vec2::new(50.0, 0.0)));
        assert!(close(g.end, Vec2::new(50.0, 50.0)));
    }

    #[test]
    fn ninety_degrees_runs_left_to_right() {
        let g = Gradient::new(Color::BLACK, Color::WHITE, 90.0).to_linear(Rect::new(0.0, 0.0, 100.0, 50.0));
        assert!(close(g.start, Vec2::new(0.0, 25.0)));
        assert!(close(g.end, Vec2::new(100.0, 25.0)));
    }

    #[test]
    fn sample_pads_and_interpolates() {
        let g = LinearGradient::two_stop(Vec2::zero(), Vec2::new(1.0, 0.0), Color::BLACK, Color::WHITE);
        assert_eq!(g.sample(-1.0), Color::BLACK);
        assert_eq!(g.sample(2.0), Color::WHITE);
        assert_eq!(g.sample(0.5), Color::rgb(128, 128, 128));
    }
}
