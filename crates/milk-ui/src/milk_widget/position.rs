use std::fmt;
use std::str::FromStr;

use milk_engine::anim::presets::SlideEdge;
use milk_engine::coords::{Rect, Vec2};

/// Where a widget sits on screen.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Position {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    #[default]
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
    /// Explicit x/y; never recomputed.
    Manual,
}

impl Position {
    pub const ANCHORS: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::CenterLeft,
        Position::Center,
        Position::CenterRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Position::TopLeft => "top-left",
            Position::TopCenter => "top-center",
            Position::TopRight => "top-right",
            Position::CenterLeft => "center-left",
            Position::Center => "center",
            Position::CenterRight => "center-right",
            Position::BottomLeft => "bottom-left",
            Position::BottomCenter => "bottom-center",
            Position::BottomRight => "bottom-right",
            Position::Manual => "manual",
        }
    }

    /// Top-left corner for a widget of `size` on `screen`, `margin` pixels in
    /// from the anchored edges. `None` for [`Position::Manual`].
    pub fn origin(self, size: Vec2, margin: f32, screen: &ScreenGeometry) -> Option<Vec2> {
        let avail = screen.available;
        let left = avail.x() + margin;
        let right = avail.x() + avail.width() - size.x - margin;
        let top = avail.y() + margin;
        let bottom = avail.y() + avail.height() - size.y - margin;
        let center_x = avail.center().x - size.x / 2.0;
        let center_y = avail.center().y - size.y / 2.0;

        let at = match self {
            Position::TopLeft => Vec2::new(left, top),
            Position::TopCenter => Vec2::new(center_x, top),
            Position::TopRight => Vec2::new(right, top),
            Position::CenterLeft => Vec2::new(left, center_y),
            Position::Center => Vec2::new(center_x, center_y),
            Position::CenterRight => Vec2::new(right, center_y),
            Position::BottomLeft => Vec2::new(left, bottom),
            Position::BottomCenter => Vec2::new(center_x, bottom),
            Position::BottomRight => Vec2::new(right, bottom),
            Position::Manual => return None,
        };
        Some(at)
    }

    /// Screen edge used when sliding towards or away from this anchor.
    pub fn slide_edge(self) -> SlideEdge {
        match self {
            Position::TopLeft | Position::TopCenter | Position::TopRight => SlideEdge::Top,
            Position::BottomLeft | Position::BottomCenter | Position::BottomRight => SlideEdge::Bottom,
            Position::CenterLeft => SlideEdge::Left,
            Position::CenterRight => SlideEdge::Right,
            Position::Center | Position::Manual => SlideEdge::None,
        }
    }
}

impl FromStr for Position {
    type Err = ();

    /// Case-insensitive; `-` and `_` are treated as spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        match v.as_str() {
            "top left" | "topleft" => Ok(Position::TopLeft),
            "top center" | "topcenter" | "top" => Ok(Position::TopCenter),
            "top right" | "topright" => Ok(Position::TopRight),
            "center left" | "centerleft" | "left" => Ok(Position::CenterLeft),
            "center" | "middle" => Ok(Position::Center),
            "center right" | "centerright" | "right" => Ok(Position::CenterRight),
            "bottom left" | "bottomleft" => Ok(Position::BottomLeft),
            "bottom center" | "bottomcenter" | "bottom" => Ok(Position::BottomCenter),
            "bottom right" | "bottomright" => Ok(Position::BottomRight),
            "manual" => Ok(Position::Manual),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ScreenGeometry ────────────────────────────────────────────────────────

/// The screen a widget is placed on.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenGeometry {
    /// Full screen bounds.
    pub bounds: Rect,
    /// Bounds minus panels and docks; anchors are computed against this.
    pub available: Rect,
}

impl ScreenGeometry {
    pub const DEFAULT_SIZE: Vec2 = Vec2::new(1920.0, 1080.0);

    pub fn new(width: f32, height: f32) -> Self {
        let r = Rect::new(0.0, 0.0, width, height);
        Self { bounds: r, available: r }
    }

    pub fn with_available(mut self, available: Rect) -> Self {
        self.available = available;
        self
    }

    pub fn size(&self) -> Vec2 {
        self.bounds.size
    }

    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }
}

impl Default for ScreenGeometry {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE.x, Self::DEFAULT_SIZE.y)
    }
}
