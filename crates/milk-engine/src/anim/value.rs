use crate::coords::{Rect, Vec2};
use crate::paint::Color;

/// Value of an animatable property.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum AnimValue {
    Scalar(f32),
    Point(Vec2),
    Rect(Rect),
    Color(Color),
}

impl AnimValue {
    /// Linear interpolation. Mismatched kinds step at the end of the segment.
    pub fn lerp(self, other: AnimValue, t: f32) -> AnimValue {
        match (self, other) {
            (AnimValue::Scalar(a), AnimValue::Scalar(b)) => AnimValue::Scalar(a + (b - a) * t),
            (AnimValue::Point(a), AnimValue::Point(b)) => AnimValue::Point(a.lerp(b, t)),
            (AnimValue::Rect(a), AnimValue::Rect(b)) => AnimValue::Rect(a.lerp(b, t)),
            (AnimValue::Color(a), AnimValue::Color(b)) => AnimValue::Color(a.lerp(b, t)),
            (a, b) => {
                if t >= 1.0 { b } else { a }
            }
        }
    }

    pub fn as_scalar(self) -> Option<f32> {
        match self {
            AnimValue::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_point(self) -> Option<Vec2> {
        match self {
            AnimValue::Point(v) => Some(v),
            AnimValue::Rect(r) => Some(r.origin),
            _ => None,
        }
    }

    pub fn as_rect(self) -> Option<Rect> {
        match self {
            AnimValue::Rect(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_color(self) -> Option<Color> {
        match self {
            AnimValue::Color(c) => Some(c),
            _ => None,
        }
    }
}

impl From<f32> for AnimValue {
    fn from(v: f32) -> Self {
        AnimValue::Scalar(v)
    }
}

impl From<Vec2> for AnimValue {
    fn from(v: Vec2) -> Self {
        AnimValue::Point(v)
    }
}

impl From<Rect> for AnimValue {
    fn from(v: Rect) -> Self {
        AnimValue::Rect(v)
    }
}

impl From<Color> for AnimValue {
    fn from(v: Color) -> Self {
        AnimValue::Color(v)
    }
}
