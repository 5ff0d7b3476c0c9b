use crate::scene::shapes::arc::ArcCmd;
use crate::scene::shapes::circle::CircleCmd;
use crate::scene::shapes::ellipse::EllipseCmd;
use crate::scene::shapes::image::ImageCmd;
use crate::scene::shapes::path::{LineCmd, PolygonCmd, PolylineCmd};
use crate::scene::shapes::rect::RectCmd;
use crate::scene::shapes::rounded_rect::RoundedRectCmd;
use crate::scene::shapes::shadow::ShadowCmd;
use crate::scene::shapes::text::TextCmd;

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here
/// - implement push helpers inside that shape module
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    RoundedRect(RoundedRectCmd),
    Circle(CircleCmd),
    Ellipse(EllipseCmd),
    Polygon(PolygonCmd),
    Polyline(PolylineCmd),
    Line(LineCmd),
    Arc(ArcCmd),
    Text(TextCmd),
    Image(ImageCmd),
    Shadow(ShadowCmd),
}

impl DrawCmd {
    /// Short lowercase tag, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCmd::Rect(_) => "rect",
            DrawCmd::RoundedRect(_) => "rounded_rect",
            DrawCmd::Circle(_) => "circle",
            DrawCmd::Ellipse(_) => "ellipse",
            DrawCmd::Polygon(_) => "polygon",
            DrawCmd::Polyline(_) => "polyline",
            DrawCmd::Line(_) => "line",
            DrawCmd::Arc(_) => "arc",
            DrawCmd::Text(_) => "text",
            DrawCmd::Image(_) => "image",
            DrawCmd::Shadow(_) => "shadow",
        }
    }
}
