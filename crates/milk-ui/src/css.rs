//! Style sheets from CSS text.
//!
//! Only the whitelisted properties below are understood; anything else is
//! ignored, as is any value that does not parse. Each selector of a rule
//! receives the same [`StyleSheet`], and a later rule for the same selector
//! replaces the earlier one.
//!
//! | Property | Field |
//! |----------|-------|
//! | `background`, `background-color`, `bg` | color or `linear-gradient([Ndeg,] a, b)` |
//! | `background-image` | `url(..)` |
//! | `color`, `font-family`, `font-size`, `font-weight`, `font-style` | text |
//! | `border`, `border-color`, `border-width`, `border-style`, `border-radius` | box |
//! | `box-shadow` | `ox oy [blur [spread]] color` |
//! | `margin[-side]`, `padding[-side]` | 1 to 4 values |
//! | `opacity`, `backdrop-filter`, `blur` | effects |

use std::collections::BTreeMap;
use std::path::Path;

use milk_engine::coords::Vec2;
use milk_engine::paint::{Color, Gradient};
use milk_markup::css;

use crate::constraints::Edges;
use crate::error::{MilkError, Result};
use crate::milk_widget::MilkWidget;
use crate::style::{BlurMode, BorderStyle, ShadowSpec, StyleSheet};

/// Selector → style sheet.
#[derive(Debug, Clone, Default)]
pub struct CssParser {
    styles: BTreeMap<String, StyleSheet>,
}

impl CssParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every rule in `src`. Returns the number of rules read.
    pub fn parse_str(&mut self, src: &str) -> usize {
        let rules = css::parse_rules(src);
        for rule in &rules {
            let mut sheet = StyleSheet::new();
            for decl in &rule.declarations {
                apply_declaration(&mut sheet, &decl.property, &decl.value);
            }
            for selector in &rule.selectors {
                self.styles.insert(selector.clone(), sheet.clone());
            }
        }
        rules.len()
    }

    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|e| MilkError::io(path, e))?;
        let n = self.parse_str(&src);
        log::debug!("{}: {n} rule(s)", path.display());
        Ok(n)
    }

    /// Sheet for `.class`; the leading dot is optional. Unknown classes give
    /// an empty sheet.
    pub fn get_style(&self, class: &str) -> StyleSheet {
        let key = if class.starts_with('.') { class.to_string() } else { format!(".{class}") };
        self.styles.get(&key).cloned().unwrap_or_default()
    }

    /// Sheet for a bare type selector such as `text`.
    pub fn get_type_style(&self, type_name: &str) -> StyleSheet {
        self.styles.get(&type_name.to_ascii_lowercase()).cloned().unwrap_or_default()
    }

    /// Applies `.class` to `widget`.
    pub fn apply_style(&self, widget: &mut MilkWidget, class: &str) {
        widget.set_style(&self.get_style(class));
    }

    /// Applies the sheet for the widget's own class, if it has one.
    pub fn apply_class(&self, widget: &mut MilkWidget) {
        if let Some(class) = widget.style_class().map(str::to_string) {
            self.apply_style(widget, &class);
        }
    }

    /// Every selector seen, sorted.
    pub fn class_names(&self) -> Vec<&str> {
        self.styles.keys().map(String::as_str).collect()
    }

    pub fn styles(&self) -> &BTreeMap<String, StyleSheet> {
        &self.styles
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn clear(&mut self) {
        self.styles.clear();
    }

    /// Declarations for the set fields of `sheet`.
    pub fn to_css(sheet: &StyleSheet) -> String {
        sheet.to_css()
    }

    /// Fields set in `over` replace those in `base`.
    pub fn merge(base: &StyleSheet, over: &StyleSheet) -> StyleSheet {
        base.merge(over)
    }
}

// ── declarations ──────────────────────────────────────────────────────────

fn apply_declaration(s: &mut StyleSheet, property: &str, value: &str) {
    let value = value.trim();
    match property {
        "background" | "background-color" | "bg" => {
            if value.starts_with("linear-gradient") {
                if let Some(g) = gradient(value) {
                    s.background_gradient = Some(g);
                }
            } else if let Some(c) = Color::parse(value) {
                s.background = Some(c);
            }
        }
        "background-image" => {
            if let Some(url) = value.strip_prefix("url(").and_then(|v| v.strip_suffix(')')) {
                s.background_image = Some(unquote(url).to_string());
            }
        }

        "color" => set(&mut s.text_color, Color::parse(value)),
        "font-family" => s.font_family = Some(unquote(value).to_string()),
        "font-size" => set(&mut s.font_size, pixels(value)),
        "font-weight" => {
            s.font_bold = Some(value.eq_ignore_ascii_case("bold") || value.parse::<u32>().is_ok_and(|w| w >= 700));
        }
        "font-style" => s.font_italic = Some(value.eq_ignore_ascii_case("italic")),

        "border" => {
            for token in tokens(value) {
                if token.ends_with("px") || token.starts_with(|c: char| c.is_ascii_digit()) {
                    set(&mut s.border_width, pixels(token));
                } else if let Ok(style) = token.parse::<BorderStyle>() {
                    s.border_style = Some(style);
                } else {
                    set(&mut s.border_color, Color::parse(token));
                }
            }
        }
        "border-color" => set(&mut s.border_color, Color::parse(value)),
        "border-width" => set(&mut s.border_width, pixels(value)),
        "border-style" => set(&mut s.border_style, value.parse().ok()),
        "border-radius" => set(&mut s.corner_radius, pixels(value)),

        "box-shadow" => set(&mut s.shadow, shadow(value)),

        "margin" => set(&mut s.margin, edges(value)),
        "padding" => set(&mut s.padding, edges(value)),
        side if side.starts_with("margin-") => set_side(&mut s.margin, &side["margin-".len()..], value),
        side if side.starts_with("padding-") => set_side(&mut s.padding, &side["padding-".len()..], value),

        "opacity" => set(&mut s.opacity, value.parse::<f32>().ok().map(|o| o.clamp(0.0, 1.0))),
        "backdrop-filter" | "blur" => {
            if value.contains("blur") {
                s.blur_mode = Some(BlurMode::Background);
                if let Some(r) = function_arg(value, "blur").and_then(pixels) {
                    s.blur_radius = Some(r);
                }
            }
        }
        _ => log::trace!("ignoring css property {property}"),
    }
}

fn set<T>(field: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *field = value;
    }
}

fn set_side(field: &mut Option<Edges>, side: &str, value: &str) {
    let Some(v) = pixels(value) else {
        return;
    };
    let e = field.get_or_insert_with(Edges::default);
    match side {
        "top" => e.top = v,
        "right" => e.right = v,
        "bottom" => e.bottom = v,
        "left" => e.left = v,
        _ => {}
    }
}

// ── values ────────────────────────────────────────────────────────────────

/// Length with any of the `px`, `pt`, `em`, `rem` suffixes dropped.
/// Negative lengths clamp to zero.
fn pixels(v: &str) -> Option<f32> {
    let v = v.trim().to_ascii_lowercase();
    let num = ["rem", "px", "pt", "em"].iter().fold(v.as_str(), |acc, unit| acc.strip_suffix(unit).unwrap_or(acc));
    num.trim().parse::<f32>().ok().filter(|n| n.is_finite()).map(|n| n.max(0.0))
}

fn edges(v: &str) -> Option<Edges> {
    let values: Option<Vec<f32>> = tokens(v).into_iter().map(pixels).collect();
    Edges::from_css_values(&values?)
}

/// Numbers are `ox oy [blur [spread]]`; one non-numeric token is the color.
fn shadow(v: &str) -> Option<ShadowSpec> {
    let mut numbers = Vec::new();
    let mut color = None;
    for token in tokens(v) {
        match token.trim_end_matches("px").parse::<f32>() {
            Ok(n) => numbers.push(n),
            Err(_) => color = Color::parse(token),
        }
    }
    let (ox, oy) = (*numbers.first()?, *numbers.get(1)?);
    let base = ShadowSpec::default();
    let spec = ShadowSpec::new(color.unwrap_or(base.color), numbers.get(2).copied().unwrap_or(base.blur), Vec2::new(ox, oy));
    Some(spec.spread(numbers.get(3).copied().unwrap_or(0.0)))
}

/// `linear-gradient(135deg, a, b)` or `linear-gradient(a, b)`.
fn gradient(v: &str) -> Option<Gradient> {
    let inner = function_arg(v, "linear-gradient")?;
    let parts = split_top_level(inner, ',');
    let (angle, colors) = match parts.first()?.trim().strip_suffix("deg") {
        Some(deg) => (deg.trim().parse::<f32>().ok()?, &parts[1..]),
        None => (Gradient::DEFAULT_ANGLE, &parts[..]),
    };
    match colors {
        [a, b, ..] => Some(Gradient::new(Color::parse(a)?, Color::parse(b)?, angle)),
        _ => None,
    }
}

/// Argument list of `name(...)` inside `v`.
fn function_arg<'a>(v: &'a str, name: &str) -> Option<&'a str> {
    let start = v.find(name)? + name.len();
    let rest = v[start..].trim_start().strip_prefix('(')?;
    let mut depth = 1usize;
    for (i, c) in rest.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&rest[..i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Whitespace-separated tokens, keeping `rgba(0, 0, 0, 0.5)` in one piece.
fn tokens(v: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = None;
    for (i, c) in v.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    out.push(&v[s..i]);
                }
                continue;
            }
            _ => {}
        }
        start.get_or_insert(i);
    }
    if let Some(s) = start {
        out.push(&v[s..]);
    }
    out
}

fn split_top_level(v: &str, sep: char) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in v.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                out.push(v[start..i].trim());
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    out.push(v[start..].trim());
    out
}

fn unquote(v: &str) -> &str {
    v.trim().trim_matches(|c| c == '"' || c == '\'')
}
