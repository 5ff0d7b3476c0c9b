//! Style sheets: the value type produced by the CSS parser and consumed by
//! [`MilkWidget::set_style`](crate::MilkWidget::set_style).
//!
//! Every field is an `Option`: `None` means "not specified", so merging a
//! sheet never resets a value the base sheet already carried.

use std::fmt::Write as _;
use std::str::FromStr;

use milk_engine::coords::Vec2;
use milk_engine::paint::{Color, Gradient};

use crate::constraints::Edges;

// ── enums ─────────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum BlurMode {
    #[default]
    None,
    /// Blur what is behind the widget.
    Background,
    /// Glass morphism.
    Glass,
    Frosted,
}

impl BlurMode {
    pub fn as_str(self) -> &'static str {
        match self {
            BlurMode::None => "none",
            BlurMode::Background => "background",
            BlurMode::Glass => "glass",
            BlurMode::Frosted => "frosted",
        }
    }
}

impl FromStr for BlurMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(BlurMode::None),
            "background" => Ok(BlurMode::Background),
            "glass" => Ok(BlurMode::Glass),
            "frosted" => Ok(BlurMode::Frosted),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum BorderStyle {
    None,
    #[default]
    Solid,
    Dashed,
    Dotted,
    Gradient,
}

impl BorderStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            BorderStyle::None => "none",
            BorderStyle::Solid => "solid",
            BorderStyle::Dashed => "dashed",
            BorderStyle::Dotted => "dotted",
            BorderStyle::Gradient => "gradient",
        }
    }
}

impl FromStr for BorderStyle {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(BorderStyle::None),
            "solid" => Ok(BorderStyle::Solid),
            "dashed" => Ok(BorderStyle::Dashed),
            "dotted" => Ok(BorderStyle::Dotted),
            "gradient" => Ok(BorderStyle::Gradient),
            _ => Err(()),
        }
    }
}

// ── ShadowSpec ────────────────────────────────────────────────────────────

/// Drop shadow parameters shared by style sheets and the widget effect slot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShadowSpec {
    pub color: Color,
    pub blur: f32,
    pub offset: Vec2,
    pub spread: f32,
}

impl ShadowSpec {
    pub fn new(color: Color, blur: f32, offset: Vec2) -> Self {
        Self { color, blur: blur.max(0.0), offset, spread: 0.0 }
    }

    pub fn spread(mut self, spread: f32) -> Self {
        self.spread = spread;
        self
    }
}

impl Default for ShadowSpec {
    fn default() -> Self {
        Self { color: Color::rgba(0, 0, 0, 80), blur: 10.0, offset: Vec2::new(0.0, 2.0), spread: 0.0 }
    }
}

// ── StyleSheet ────────────────────────────────────────────────────────────

/// A bag of optional style properties.
///
/// Build with the chained setters, which enforce the value invariants
/// (opacity in `[0, 1]`, non-negative radii and widths).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleSheet {
    pub background: Option<Color>,
    pub background_gradient: Option<Gradient>,
    pub background_image: Option<String>,

    pub text_color: Option<Color>,
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
    pub font_bold: Option<bool>,
    pub font_italic: Option<bool>,

    pub border_color: Option<Color>,
    pub border_width: Option<f32>,
    pub border_style: Option<BorderStyle>,
    pub corner_radius: Option<f32>,
    pub shadow: Option<ShadowSpec>,
    pub margin: Option<Edges>,
    pub padding: Option<Edges>,

    pub opacity: Option<f32>,
    pub blur_mode: Option<BlurMode>,
    pub blur_radius: Option<f32>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    // ── setters ───────────────────────────────────────────────────────────

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn background_gradient(mut self, gradient: Gradient) -> Self {
        self.background_gradient = Some(gradient);
        self
    }

    pub fn background_image(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        if !path.is_empty() {
            self.background_image = Some(path);
        }
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        let family = family.into();
        if !family.is_empty() {
            self.font_family = Some(family);
        }
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        if size > 0.0 {
            self.font_size = Some(size);
        }
        self
    }

    pub fn bold(mut self, v: bool) -> Self {
        self.font_bold = Some(v);
        self
    }

    pub fn italic(mut self, v: bool) -> Self {
        self.font_italic = Some(v);
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = Some(color);
        self
    }

    pub fn border_width(mut self, width: f32) -> Self {
        self.border_width = Some(width.max(0.0));
        self
    }

    pub fn border_style(mut self, style: BorderStyle) -> Self {
        self.border_style = Some(style);
        self
    }

    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = Some(radius.max(0.0));
        self
    }

    pub fn shadow(mut self, shadow: ShadowSpec) -> Self {
        self.shadow = Some(shadow);
        self
    }

    pub fn margin(mut self, edges: Edges) -> Self {
        self.margin = Some(edges);
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = Some(edges);
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity.clamp(0.0, 1.0));
        self
    }

    pub fn blur(mut self, mode: BlurMode, radius: f32) -> Self {
        self.blur_mode = Some(mode);
        self.blur_radius = Some(radius.max(0.0));
        self
    }

    // ── combination ───────────────────────────────────────────────────────

    /// Field-wise override: every field set in `over` replaces `self`'s,
    /// unset fields keep `self`'s value.
    #[must_use]
    pub fn merge(&self, over: &StyleSheet) -> StyleSheet {
        StyleSheet {
            background: over.background.or(self.background),
            background_gradient: over.background_gradient.or(self.background_gradient),
            background_image: over.background_image.clone().or_else(|| self.background_image.clone()),
            text_color: over.text_color.or(self.text_color),
            font_family: over.font_family.clone().or_else(|| self.font_family.clone()),
            font_size: over.font_size.or(self.font_size),
            font_bold: over.font_bold.or(self.font_bold),
            font_italic: over.font_italic.or(self.font_italic),
            border_color: over.border_color.or(self.border_color),
            border_width: over.border_width.or(self.border_width),
            border_style: over.border_style.or(self.border_style),
            corner_radius: over.corner_radius.or(self.corner_radius),
            shadow: over.shadow.or(self.shadow),
            margin: over.margin.or(self.margin),
            padding: over.padding.or(self.padding),
            opacity: over.opacity.or(self.opacity),
            blur_mode: over.blur_mode.or(self.blur_mode),
            blur_radius: over.blur_radius.or(self.blur_radius),
        }
    }

    /// Content margins a widget derives from this sheet: padding plus margin,
    /// or `None` when neither is set.
    pub fn content_margins(&self) -> Option<Edges> {
        match (self.padding, self.margin) {
            (None, None) => None,
            (p, m) => Some(p.unwrap_or_default() + m.unwrap_or_default()),
        }
    }

    // ── serialisation ─────────────────────────────────────────────────────

    /// Set fields as CSS declarations, one per line, two-space indented.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        // Writing into a String cannot fail.
        let mut line = |decl: String| {
            let _ = writeln!(css, "  {decl};");
        };

        if let Some(g) = self.background_gradient {
            line(format!("background: linear-gradient({}deg, {}, {})", g.angle, g.start, g.end));
        }
        if let Some(c) = self.background {
            line(format!("background-color: {c}"));
        }
        if let Some(img) = &self.background_image {
            line(format!("background-image: url(\"{img}\")"));
        }
        if let Some(c) = self.text_color {
            line(format!("color: {c}"));
        }
        if let Some(f) = &self.font_family {
            line(format!("font-family: \"{f}\""));
        }
        if let Some(s) = self.font_size {
            line(format!("font-size: {s}px"));
        }
        if let Some(b) = self.font_bold {
            line(format!("font-weight: {}", if b { "bold" } else { "normal" }));
        }
        if let Some(i) = self.font_italic {
            line(format!("font-style: {}", if i { "italic" } else { "normal" }));
        }
        match (self.border_width, self.border_color) {
            (Some(w), Some(c)) => {
                let style = self.border_style.unwrap_or_default();
                line(format!("border: {w}px {} {c}", style.as_str()));
            }
            (w, c) => {
                if let Some(w) = w {
                    line(format!("border-width: {w}px"));
                }
                if let Some(c) = c {
                    line(format!("border-color: {c}"));
                }
                if let Some(s) = self.border_style {
                    line(format!("border-style: {}", s.as_str()));
                }
            }
        }
        if let Some(r) = self.corner_radius {
            line(format!("border-radius: {r}px"));
        }
        if let Some(s) = self.shadow {
            line(format!("box-shadow: {}px {}px {}px {}px {}", s.offset.x, s.offset.y, s.blur, s.spread, s.color));
        }
        if let Some(m) = self.margin {
            line(format!("margin: {}", edges_css(m)));
        }
        if let Some(p) = self.padding {
            line(format!("padding: {}", edges_css(p)));
        }
        if let Some(o) = self.opacity {
            line(format!("opacity: {o}"));
        }
        if self.blur_mode.is_some_and(|m| m != BlurMode::None) {
            let radius = self.blur_radius.unwrap_or(10.0);
            line(format!("backdrop-filter: blur({radius}px)"));
        }
        css
    }
}

fn edges_css(e: Edges) -> String {
    format!("{}px {}px {}px {}px", e.top, e.right, e.bottom, e.left)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> StyleSheet {
        StyleSheet::new()
            .background(Color::rgb(30, 30, 40))
            .text_color(Color::WHITE)
            .font_size(12.0)
            .corner_radius(8.0)
    }

    // ── merge ─────────────────────────────────────────────────────────────

    #[test]
    fn unset_fields_never_erase() {
        let merged = base().merge(&StyleSheet::new());
        assert_eq!(merged, base());
    }

    #[test]
    fn set_fields_always_override() {
        let over = StyleSheet::new().text_color(Color::RED).font_family("Mono").opacity(0.5);
        let merged = base().merge(&over);
        assert_eq!(merged.text_color, Some(Color::RED));
        assert_eq!(merged.font_family.as_deref(), Some("Mono"));
        assert_eq!(merged.opacity, Some(0.5));
        assert_eq!(merged.background, Some(Color::rgb(30, 30, 40)));
        assert_eq!(merged.corner_radius, Some(8.0));
    }

    #[test]
    fn merge_of_every_field_pair() {
        // Exhaustive over the set/unset combinations of two representative fields.
        for a_set in [false, true] {
            for b_set in [false, true] {
                let mut a = StyleSheet::new();
                let mut b = StyleSheet::new();
                if a_set {
                    a = a.font_size(10.0).border_color(Color::BLUE);
                }
                if b_set {
                    b = b.font_size(20.0).border_color(Color::GREEN);
                }
                let m = a.merge(&b);
                let want_size = if b_set { Some(20.0) } else if a_set { Some(10.0) } else { None };
                assert_eq!(m.font_size, want_size);
                let want_color = if b_set { Some(Color::GREEN) } else if a_set { Some(Color::BLUE) } else { None };
                assert_eq!(m.border_color, want_color);
            }
        }
    }

    // ── invariants ────────────────────────────────────────────────────────

    #[test]
    fn setters_clamp() {
        let s = StyleSheet::new().opacity(1.7).corner_radius(-3.0).border_width(-1.0).font_size(0.0);
        assert_eq!(s.opacity, Some(1.0));
        assert_eq!(s.corner_radius, Some(0.0));
        assert_eq!(s.border_width, Some(0.0));
        assert_eq!(s.font_size, None);
        assert_eq!(StyleSheet::new().opacity(-0.2).opacity, Some(0.0));
    }

    #[test]
    fn content_margins_add_padding_and_margin() {
        assert_eq!(StyleSheet::new().content_margins(), None);
        let s = StyleSheet::new().padding(Edges::all(4.0)).margin(Edges::all(1.0));
        assert_eq!(s.content_margins(), Some(Edges::all(5.0)));
        assert_eq!(StyleSheet::new().margin(Edges::all(2.0)).content_margins(), Some(Edges::all(2.0)));
    }

    // ── to_css ────────────────────────────────────────────────────────────

    #[test]
    fn to_css_lists_only_set_fields() {
        let css = StyleSheet::new().text_color(Color::rgb(74, 158, 255)).font_size(18.0).to_css();
        assert_eq!(css, "  color: #4a9eff;\n  font-size: 18px;\n");
        assert_eq!(StyleSheet::new().to_css(), "");
    }

    #[test]
    fn to_css_border_shorthand() {
        let css = StyleSheet::new().border_width(2.0).border_color(Color::WHITE).to_css();
        assert_eq!(css, "  border: 2px solid #ffffff;\n");
    }

    #[test]
    fn blur_mode_names() {
        assert_eq!("Glass".parse::<BlurMode>(), Ok(BlurMode::Glass));
        assert_eq!(BlurMode::Frosted.as_str(), "frosted");
        assert!("foggy".parse::<BlurMode>().is_err());
    }
}
