/// Font selection and decoration for a run of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub family: String,
    /// Font size in logical pixels.
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl TextStyle {
    pub const DEFAULT_FAMILY: &'static str = "Sans Serif";
    pub const MONOSPACE_FAMILY: &'static str = "Monospace";

    pub fn new(size: f32) -> Self {
        Self { size, ..Self::default() }
    }

    pub fn family(mut self, family: impl Into<String>) -> Self {
        self.family = family.into();
        self
    }

    pub fn bold(mut self, v: bool) -> Self {
        self.bold = v;
        self
    }

    pub fn italic(mut self, v: bool) -> Self {
        self.italic = v;
        self
    }

    pub fn is_monospace(&self) -> bool {
        let f = self.family.to_ascii_lowercase();
        f.contains("mono") || f.contains("courier") || f.contains("consol")
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            family: Self::DEFAULT_FAMILY.to_string(),
            size: 12.0,
            bold: false,
            italic: false,
            underline: false,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum VAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

impl HAlign {
    /// Offset of a run of width `content` inside `available`.
    pub fn offset(self, available: f32, content: f32) -> f32 {
        match self {
            HAlign::Left => 0.0,
            HAlign::Center => (available - content) / 2.0,
            HAlign::Right => available - content,
        }
    }
}

impl VAlign {
    pub fn offset(self, available: f32, content: f32) -> f32 {
        match self {
            VAlign::Top => 0.0,
            VAlign::Center => (available - content) / 2.0,
            VAlign::Bottom => available - content,
        }
    }
}
