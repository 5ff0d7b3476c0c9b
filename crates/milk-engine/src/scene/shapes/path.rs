use crate::coords::Vec2;
use crate::paint::{Color, Paint};
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::Stroke;

/// Closed filled polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonCmd {
    pub points: Vec<Vec2>,
    pub paint: Paint,
}

/// Open stroked path.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineCmd {
    pub points: Vec<Vec2>,
    pub stroke: Stroke,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineCmd {
    pub from: Vec2,
    pub to: Vec2,
    pub stroke: Stroke,
}

impl DrawList {
    /// Records a filled polygon. Fewer than three points draw nothing.
    pub fn push_polygon(&mut self, z: ZIndex, points: Vec<Vec2>, paint: Paint) {
        if points.len() < 3 {
            return;
        }
        self.push(z, DrawCmd::Polygon(PolygonCmd { points, paint }));
    }

    /// Records an open polyline. Fewer than two points draw nothing.
    pub fn push_polyline(&mut self, z: ZIndex, points: Vec<Vec2>, stroke: Stroke) {
        if points.len() < 2 {
            return;
        }
        self.push(z, DrawCmd::Polyline(PolylineCmd { points, stroke }));
    }

    #[inline]
    pub fn push_line(&mut self, z: ZIndex, from: Vec2, to: Vec2, stroke: Stroke) {
        self.push(z, DrawCmd::Line(LineCmd { from, to, stroke }));
    }

    #[inline]
    pub fn push_solid_line(&mut self, z: ZIndex, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.push_line(z, from, to, Stroke::new(width, color));
    }
}
