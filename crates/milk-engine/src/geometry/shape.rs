use core::fmt;
use core::str::FromStr;

/// Outline family of a widget.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Shape {
    #[default]
    Rectangle,
    RoundedRect,
    Circle,
    Ellipse,
    /// Rectangle forced to equal width and height.
    Square,
    /// Host-provided mask; painted and hit-tested as the bounding rect here.
    Custom,
}

impl Shape {
    /// Shapes whose width and height are kept equal on every resize.
    #[inline]
    pub fn is_square_locked(self) -> bool {
        matches!(self, Shape::Circle | Shape::Square)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Rectangle => "rect",
            Shape::RoundedRect => "rounded",
            Shape::Circle => "circle",
            Shape::Ellipse => "ellipse",
            Shape::Square => "square",
            Shape::Custom => "custom",
        }
    }
}

impl FromStr for Shape {
    type Err = ();

    /// Accepts the markup aliases; case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rect" | "rectangle" => Ok(Shape::Rectangle),
            "rounded" | "roundedrect" | "rounded-rect" => Ok(Shape::RoundedRect),
            "circle" => Ok(Shape::Circle),
            "ellipse" | "oval" => Ok(Shape::Ellipse),
            "square" => Ok(Shape::Square),
            "custom" => Ok(Shape::Custom),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
