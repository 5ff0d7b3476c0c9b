use std::str::FromStr;
use std::time::Duration;

use milk_engine::coords::{Rect, Vec2};
use milk_engine::paint::Color;
use milk_engine::scene::Stroke;
use milk_engine::text::{HAlign, TextStyle, VAlign};

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::util::format_printf;
use crate::widget::Widget;
use crate::widgets::SmoothedValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GaugeStyle {
    /// Sweep from `start_angle` to `end_angle`.
    #[default]
    Arc,
    /// Full ring starting at twelve o'clock.
    Circle,
    /// Straight horizontal track.
    Linear,
    /// Upper half ring, left to right.
    Semicircle,
}

impl GaugeStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            GaugeStyle::Arc => "arc",
            GaugeStyle::Circle => "circle",
            GaugeStyle::Linear => "linear",
            GaugeStyle::Semicircle => "semicircle",
        }
    }
}

impl FromStr for GaugeStyle {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arc" => Ok(GaugeStyle::Arc),
            "circle" | "ring" => Ok(GaugeStyle::Circle),
            "linear" | "bar" => Ok(GaugeStyle::Linear),
            "semicircle" | "half" => Ok(GaugeStyle::Semicircle),
            _ => Err(()),
        }
    }
}

/// A dial showing a value as a swept arc with a centred readout.
///
/// Angles are in degrees, 0° at three o'clock and counter-clockwise
/// positive; the default sweep runs clockwise from 225° to −45°. The readout
/// is the display value through a printf-style format plus the unit.
#[derive(Debug, Clone)]
pub struct Gauge {
    value: SmoothedValue,
    style: GaugeStyle,
    background: Color,
    fill: Color,
    fill_end: Option<Color>,
    text_color: Color,
    thickness: f32,
    start_angle: f32,
    end_angle: f32,
    show_value: bool,
    value_format: String,
    label: String,
    unit: String,
}

impl Gauge {
    pub const MIN_SIZE: f32 = 80.0;

    pub fn new() -> Self {
        Self {
            value: SmoothedValue::new(0.0, 100.0),
            style: GaugeStyle::Arc,
            background: Color::rgba(60, 60, 70, 150),
            fill: Color::rgb(0, 200, 255),
            fill_end: None,
            text_color: Color::WHITE,
            thickness: 10.0,
            start_angle: 225.0,
            end_angle: -45.0,
            show_value: true,
            value_format: "%.0f".to_string(),
            label: String::new(),
            unit: String::new(),
        }
    }

    // ── value ─────────────────────────────────────────────────────────────

    pub fn set_value(&mut self, v: f64) {
        self.value.set(v);
    }

    pub fn set_range(&mut self, min: f64, max: f64) {
        self.value.set_range(min, max);
    }

    pub fn set_animated(&mut self, animated: bool) {
        self.value.set_animated(animated);
    }

    pub fn value(&self) -> f64 {
        self.value.value()
    }

    pub fn display_value(&self) -> f64 {
        self.value.display()
    }

    // ── appearance ────────────────────────────────────────────────────────

    pub fn set_style(&mut self, style: GaugeStyle) {
        self.style = style;
    }

    pub fn set_colors(&mut self, background: Color, fill: Color) {
        self.background = background;
        self.fill = fill;
    }

    /// Value arc color moves from `start` to `end` as the value rises.
    pub fn set_gradient(&mut self, start: Color, end: Color) {
        self.fill = start;
        self.fill_end = Some(end);
    }

    pub fn set_thickness(&mut self, t: f32) {
        self.thickness = t.max(1.0);
    }

    pub fn set_start_angle(&mut self, deg: f32) {
        self.start_angle = deg;
    }

    pub fn set_end_angle(&mut self, deg: f32) {
        self.end_angle = deg;
    }

    pub fn set_show_value(&mut self, on: bool) {
        self.show_value = on;
    }

    pub fn set_value_format(&mut self, f: impl Into<String>) {
        self.value_format = f.into();
    }

    pub fn set_label(&mut self, l: impl Into<String>) {
        self.label = l.into();
    }

    pub fn set_unit(&mut self, u: impl Into<String>) {
        self.unit = u.into();
    }

    pub fn set_text_color(&mut self, c: Color) {
        self.text_color = c;
    }

    pub fn style(&self) -> GaugeStyle {
        self.style
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn angles(&self) -> (f32, f32) {
        (self.start_angle, self.end_angle)
    }

    /// Formatted readout, e.g. `72°C`.
    pub fn readout(&self) -> String {
        format_printf(&self.value_format, self.value.display()) + &self.unit
    }

    // ── geometry ──────────────────────────────────────────────────────────

    /// Start angle and full sweep (clockwise, so negative) for the style.
    fn sweep(&self) -> (f32, f32) {
        match self.style {
            GaugeStyle::Arc | GaugeStyle::Linear => (self.start_angle, -(self.start_angle - self.end_angle)),
            GaugeStyle::Circle => (90.0, -360.0),
            GaugeStyle::Semicircle => (180.0, -180.0),
        }
    }

    /// Square dial area: shorter side, centred, inset by the thickness.
    pub fn dial_rect(&self, rect: Rect) -> Rect {
        let side = rect.width().min(rect.height());
        Rect::from_center(rect.center(), Vec2::splat(side)).inset(self.thickness)
    }

    fn value_color(&self, pct: f32) -> Color {
        match self.fill_end {
            Some(end) => self.fill.lerp(end, pct),
            None => self.fill,
        }
    }

    fn paint_arc(&self, painter: &mut Painter, rect: Rect, pct: f32) {
        let dial = self.dial_rect(rect);
        let center = dial.center();
        let radius = dial.width() / 2.0;
        let (start, span) = self.sweep();

        painter.arc(center, radius, start, span, Stroke::new(self.thickness, self.background).round());
        painter.arc(center, radius, start, span * pct, Stroke::new(self.thickness, self.value_color(pct)).round());

        let side = rect.width().min(rect.height());
        if self.show_value {
            let style = TextStyle::new((side / 6.0).floor().max(1.0)).bold(true);
            painter.centered_text(self.readout(), &style, self.text_color, dial);
        }
        if !self.label.is_empty() {
            let style = TextStyle::new((side / 12.0).floor().max(1.0));
            let below = Rect::new(dial.x(), center.y + side / 8.0, dial.width(), side / 6.0);
            painter.text(self.label.clone(), &style, self.text_color, below, HAlign::Center, VAlign::Top, false);
        }
    }

    fn paint_linear(&self, painter: &mut Painter, rect: Rect, pct: f32) {
        let track = Rect::new(rect.x(), rect.max().y - self.thickness, rect.width(), self.thickness);
        let r = self.thickness / 2.0;
        painter.fill_rounded_rect(track, r, self.background, None);
        if pct > 0.0 {
            let fill = Rect::new(track.x(), track.y(), track.width() * pct, track.height());
            painter.fill_rounded_rect(fill, r, self.value_color(pct), None);
        }

        let above = Rect::new(rect.x(), rect.y(), rect.width(), (rect.height() - self.thickness).max(0.0));
        let style = TextStyle::new((above.height() / 2.0).clamp(8.0, 24.0)).bold(true);
        if self.show_value {
            painter.text(self.readout(), &style, self.text_color, above, HAlign::Right, VAlign::Center, false);
        }
        if !self.label.is_empty() {
            painter.text(self.label.clone(), &style.clone().bold(false), self.text_color, above, HAlign::Left, VAlign::Center, false);
        }
    }
}

impl Default for Gauge {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Gauge {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        let size = match self.style {
            GaugeStyle::Linear => Vec2::new(constraints.max_width().unwrap_or(200.0), 40.0),
            _ => Vec2::splat(Self::MIN_SIZE),
        };
        constraints.constrain(size)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let pct = self.value.fraction() as f32;
        match self.style {
            GaugeStyle::Linear => self.paint_linear(painter, rect, pct),
            _ => self.paint_arc(painter, rect, pct),
        }
    }

    fn tick(&mut self, dt: Duration) -> bool {
        self.value.tick(dt)
    }

    fn is_expanding(&self) -> bool {
        self.style != GaugeStyle::Linear
    }
}
