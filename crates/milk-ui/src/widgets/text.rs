use milk_engine::coords::{Rect, Vec2};
use milk_engine::paint::Color;
use milk_engine::text::{self, HAlign, TextStyle, VAlign};

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::painter::Painter;
use crate::style::{ShadowSpec, StyleSheet};
use crate::widget::Widget;

const ELLIPSIS: &str = "…";

/// Translucent box drawn behind code-styled text.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CodeBox {
    background: Color,
    padding: f32,
    radius: f32,
}

impl Default for CodeBox {
    fn default() -> Self {
        Self { background: Color::rgba(0, 0, 0, 50), padding: 4.0, radius: 3.0 }
    }
}

/// Decoration painted under the glyphs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextEffect {
    Glow { color: Color, radius: f32 },
    Shadow(ShadowSpec),
}

/// A label: one or more lines of styled text.
///
/// Wraps at the width it is given by default. With `max_lines > 0` only
/// that many lines are laid out; `ellipsis` then marks the cut with `…`.
///
/// # Example
/// ```rust,ignore
/// Text::title("System")
///     .color(Color::rgb(74, 158, 255))
///     .align(HAlign::Center)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    text: String,
    style: TextStyle,
    color: Color,
    h_align: HAlign,
    v_align: VAlign,
    wrap: bool,
    max_lines: usize,
    ellipsis: bool,
    effect: Option<TextEffect>,
    code: Option<CodeBox>,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
            color: Color::WHITE,
            h_align: HAlign::Left,
            v_align: VAlign::Center,
            wrap: true,
            max_lines: 0,
            ellipsis: false,
            effect: None,
            code: None,
        }
    }

    // ── presets ───────────────────────────────────────────────────────────

    pub fn title(text: impl Into<String>) -> Self {
        let mut t = Self::new(text);
        t.set_title();
        t
    }

    pub fn subtitle(text: impl Into<String>) -> Self {
        let mut t = Self::new(text);
        t.set_subtitle();
        t
    }

    pub fn caption(text: impl Into<String>) -> Self {
        let mut t = Self::new(text);
        t.set_caption();
        t
    }

    pub fn code(text: impl Into<String>) -> Self {
        let mut t = Self::new(text);
        t.set_code();
        t
    }

    /// 18 px bold.
    pub fn set_title(&mut self) {
        self.style.size = 18.0;
        self.style.bold = true;
    }

    pub fn set_subtitle(&mut self) {
        self.style.size = 14.0;
    }

    pub fn set_body(&mut self) {
        self.style.size = 12.0;
    }

    /// 10 px in mid gray.
    pub fn set_caption(&mut self) {
        self.style.size = 10.0;
        self.color = Color::rgb(150, 150, 150);
    }

    /// Monospace family at the current size.
    pub fn set_monospace(&mut self) {
        self.style.family = TextStyle::MONOSPACE_FAMILY.to_string();
    }

    /// Monospace on a translucent black box.
    pub fn set_code(&mut self) {
        self.set_monospace();
        self.code = Some(CodeBox::default());
    }

    // ── builders ──────────────────────────────────────────────────────────

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    pub fn align(mut self, h: HAlign) -> Self {
        self.h_align = h;
        self
    }

    // ── setters ───────────────────────────────────────────────────────────

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn append_text(&mut self, more: &str) {
        self.text.push_str(more);
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_font(&mut self, family: impl Into<String>, size: f32) {
        self.style.family = family.into();
        self.set_font_size(size);
    }

    /// Non-positive sizes are ignored.
    pub fn set_font_size(&mut self, size: f32) {
        if size > 0.0 {
            self.style.size = size;
        }
    }

    pub fn set_bold(&mut self, v: bool) {
        self.style.bold = v;
    }

    pub fn set_italic(&mut self, v: bool) {
        self.style.italic = v;
    }

    pub fn set_underline(&mut self, v: bool) {
        self.style.underline = v;
    }

    pub fn set_align(&mut self, h: HAlign) {
        self.h_align = h;
    }

    pub fn set_vertical_align(&mut self, v: VAlign) {
        self.v_align = v;
    }

    pub fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    /// `0` means unlimited.
    pub fn set_max_lines(&mut self, lines: usize) {
        self.max_lines = lines;
    }

    pub fn set_ellipsis(&mut self, v: bool) {
        self.ellipsis = v;
    }

    /// Halo around the glyphs; replaces any shadow.
    pub fn set_glow(&mut self, color: Color, radius: f32) {
        self.effect = Some(TextEffect::Glow { color, radius: radius.max(0.0) });
    }

    /// Offset copy under the glyphs; replaces any glow.
    pub fn set_shadow(&mut self, shadow: ShadowSpec) {
        self.effect = Some(TextEffect::Shadow(shadow));
    }

    pub fn clear_effect(&mut self) {
        self.effect = None;
    }

    /// Applies the font and color fields a style sheet sets.
    pub fn apply_style(&mut self, sheet: &StyleSheet) {
        if let Some(c) = sheet.text_color {
            self.color = c;
        }
        if let Some(f) = &sheet.font_family {
            self.style.family = f.clone();
        }
        if let Some(s) = sheet.font_size {
            self.set_font_size(s);
        }
        if let Some(b) = sheet.font_bold {
            self.style.bold = b;
        }
        if let Some(i) = sheet.font_italic {
            self.style.italic = i;
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn text_color(&self) -> Color {
        self.color
    }

    pub fn text_style(&self) -> &TextStyle {
        &self.style
    }

    pub fn h_align(&self) -> HAlign {
        self.h_align
    }

    pub fn effect(&self) -> Option<TextEffect> {
        self.effect
    }

    pub fn is_code(&self) -> bool {
        self.code.is_some()
    }

    // ── line breaking ─────────────────────────────────────────────────────

    fn padding(&self) -> Edges {
        self.code.map_or(Edges::default(), |c| Edges::all(c.padding))
    }

    /// Lines as laid out against `max_width`, truncated to `max_lines`.
    pub fn layout_lines(&self, max_width: Option<f32>) -> Vec<String> {
        let limit = if self.wrap { max_width.filter(|w| *w > 0.0) } else { None };
        let mut lines = Vec::new();
        for raw in self.text.split('\n') {
            match limit {
                Some(limit) => self.wrap_into(raw, limit, &mut lines),
                None => lines.push(raw.to_string()),
            }
        }

        if self.max_lines > 0 && lines.len() > self.max_lines {
            lines.truncate(self.max_lines);
            if self.ellipsis {
                if let Some(last) = lines.last_mut() {
                    *last = self.elide(last, max_width);
                }
            }
        }
        lines
    }

    fn width_of(&self, s: &str) -> f32 {
        text::measure(s, &self.style, None).x
    }

    fn wrap_into(&self, raw: &str, limit: f32, out: &mut Vec<String>) {
        let mut current = String::new();
        for word in raw.split(' ') {
            let candidate = if current.is_empty() { word.to_string() } else { format!("{current} {word}") };
            if !current.is_empty() && self.width_of(&candidate) > limit {
                out.push(std::mem::take(&mut current));
                current = word.to_string();
            } else {
                current = candidate;
            }
        }
        out.push(current);
    }

    /// Appends `…`, dropping trailing characters until it fits.
    fn elide(&self, line: &str, max_width: Option<f32>) -> String {
        let mut chars: Vec<char> = line.trim_end().chars().collect();
        loop {
            let s: String = chars.iter().collect::<String>() + ELLIPSIS;
            let fits = max_width.is_none_or(|w| self.width_of(&s) <= w);
            if fits || chars.is_empty() {
                return s;
            }
            chars.pop();
        }
    }
}

impl Widget for Text {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        let pad = self.padding();
        let inner_w = constraints.shrink(pad).max_width();
        let lines = self.layout_lines(inner_w);
        let joined = lines.join("\n");
        let size = text::measure(&joined, &self.style, None);
        constraints.constrain(Vec2::new(size.x + pad.h(), size.y + pad.v()))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let mut inner = rect;
        if let Some(code) = self.code {
            painter.fill_rounded_rect(rect, code.radius, code.background, None);
            inner = inset_rect(rect, Edges::all(code.padding));
        }

        let body = self.layout_lines(Some(inner.width())).join("\n");

        match self.effect {
            Some(TextEffect::Shadow(s)) => {
                let r = inner.translate(s.offset);
                painter.text(body.clone(), &self.style, s.color, r, self.h_align, self.v_align, false);
            }
            Some(TextEffect::Glow { color, radius }) => {
                let reach = (radius / 4.0).clamp(1.0, 3.0);
                let halo = color.scale_alpha(0.5);
                for (dx, dy) in [(-1.0, 0.0), (1.0, 0.0), (0.0, -1.0), (0.0, 1.0)] {
                    let r = inner.translate(Vec2::new(dx * reach, dy * reach));
                    painter.text(body.clone(), &self.style, halo, r, self.h_align, self.v_align, false);
                }
            }
            None => {}
        }

        painter.text(body, &self.style, self.color, inner, self.h_align, self.v_align, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use milk_engine::scene::{DrawCmd, DrawList};

    fn paint(t: &Text, rect: Rect) -> DrawList {
        let mut list = DrawList::new();
        let now = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let mut p = Painter::new(&mut list, now);
        t.paint(&mut p, rect);
        list
    }

    #[test]
    fn presets_set_font() {
        let t = Text::title("x");
        assert_eq!(t.text_style().size, 18.0);
        assert!(t.text_style().bold);
        let c = Text::caption("x");
        assert_eq!(c.text_style().size, 10.0);
        assert_eq!(c.text_color(), Color::rgb(150, 150, 150));
        assert_eq!(Text::subtitle("x").text_style().size, 14.0);
    }

    #[test]
    fn code_preset_draws_box_under_text() {
        let t = Text::code("let x = 1;");
        assert!(t.text_style().is_monospace());
        let list = paint(&t, Rect::new(0.0, 0.0, 200.0, 30.0));
        assert!(matches!(list.items()[0].cmd, DrawCmd::RoundedRect(_)));
        match &list.items()[1].cmd {
            DrawCmd::Text(cmd) => assert_eq!(cmd.rect, Rect::new(4.0, 4.0, 192.0, 22.0)),
            other => panic!("unexpected {}", other.kind()),
        }
    }

    #[test]
    fn wraps_on_word_boundaries() {
        let t = Text::new("aaaa bbbb cccc");
        let lines = t.layout_lines(Some(t.width_of("aaaa bbbb") + 0.5));
        assert_eq!(lines, vec!["aaaa bbbb", "cccc"]);
    }

    #[test]
    fn max_lines_with_ellipsis() {
        let mut t = Text::new("one\ntwo\nthree");
        t.set_max_lines(2);
        assert_eq!(t.layout_lines(None), vec!["one", "two"]);
        t.set_ellipsis(true);
        assert_eq!(t.layout_lines(None), vec!["one", "two…"]);
    }

    #[test]
    fn no_wrap_keeps_long_lines() {
        let mut t = Text::new("aaaa bbbb cccc");
        t.set_wrap(false);
        assert_eq!(t.layout_lines(Some(10.0)).len(), 1);
    }

    #[test]
    fn glow_paints_halo_first() {
        let mut t = Text::new("hot");
        t.set_glow(Color::RED, 8.0);
        let list = paint(&t, Rect::new(0.0, 0.0, 100.0, 20.0));
        assert_eq!(list.len(), 5);
        match &list.items()[4].cmd {
            DrawCmd::Text(cmd) => assert_eq!(cmd.color, Color::WHITE),
            other => panic!("unexpected {}", other.kind()),
        }
    }

    #[test]
    fn style_sheet_overrides_set_fields_only() {
        let mut t = Text::new("x");
        t.apply_style(&StyleSheet::new().font_size(20.0));
        assert_eq!(t.text_style().size, 20.0);
        assert_eq!(t.text_color(), Color::WHITE);
    }
}
