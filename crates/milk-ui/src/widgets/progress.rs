use std::time::Duration;

use milk_engine::coords::{Rect, Vec2};
use milk_engine::paint::{Color, LinearGradient, Paint};
use milk_engine::text::TextStyle;

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::widget::Widget;
use crate::widgets::SmoothedValue;

/// A horizontal bar showing a value within `[min, max]`.
///
/// The painted fill follows a smoothed display value (see [`SmoothedValue`]).
/// When a fill end color is set the fill is a left-to-right gradient.
/// The optional label expands `%v` to the target value and `%m` to the
/// maximum, both as integers.
///
/// # Example
/// ```rust,ignore
/// let mut bar = ProgressBar::new();
/// bar.set_colors(Color::rgba(40, 40, 50, 200), Color::rgb(74, 158, 255));
/// bar.set_value(42.0);
/// ```
#[derive(Debug, Clone)]
pub struct ProgressBar {
    value: SmoothedValue,
    background: Color,
    fill: Color,
    fill_end: Option<Color>,
    text_color: Color,
    radius: f32,
    show_text: bool,
    text_format: String,
    height: Option<f32>,
}

impl ProgressBar {
    pub const MIN_HEIGHT: f32 = 8.0;
    pub const MAX_HEIGHT: f32 = 30.0;

    pub fn new() -> Self {
        Self {
            value: SmoothedValue::new(0.0, 100.0),
            background: Color::rgba(60, 60, 70, 150),
            fill: Color::rgb(0, 150, 255),
            fill_end: None,
            text_color: Color::WHITE,
            radius: 4.0,
            show_text: false,
            text_format: "%v%".to_string(),
            height: None,
        }
    }

    // ── value ─────────────────────────────────────────────────────────────

    pub fn set_value(&mut self, v: f64) {
        self.value.set(v);
    }

    pub fn set_min(&mut self, min: f64) {
        self.value.set_range(min, self.value.max());
    }

    pub fn set_max(&mut self, max: f64) {
        self.value.set_range(self.value.min(), max);
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

    pub fn min(&self) -> f64 {
        self.value.min()
    }

    pub fn max(&self) -> f64 {
        self.value.max()
    }

    // ── appearance ────────────────────────────────────────────────────────

    pub fn set_colors(&mut self, background: Color, fill: Color) {
        self.background = background;
        self.fill = fill;
    }

    pub fn set_background(&mut self, c: Color) {
        self.background = c;
    }

    pub fn set_fill(&mut self, c: Color) {
        self.fill = c;
    }

    /// Fill fades from `start` at the left edge to `end` at the right.
    pub fn set_gradient(&mut self, start: Color, end: Color) {
        self.fill = start;
        self.fill_end = Some(end);
    }

    pub fn set_rounded(&mut self, radius: f32) {
        self.radius = radius.max(0.0);
    }

    /// Fixed bar height, clamped to `[8, 30]`.
    pub fn set_height(&mut self, h: f32) {
        self.height = Some(h.clamp(Self::MIN_HEIGHT, Self::MAX_HEIGHT));
    }

    pub fn set_show_text(&mut self, show: bool) {
        self.show_text = show;
    }

    pub fn set_text_format(&mut self, format: impl Into<String>) {
        self.text_format = format.into();
    }

    pub fn set_text_color(&mut self, c: Color) {
        self.text_color = c;
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn fill_end(&self) -> Option<Color> {
        self.fill_end
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// The label with `%v` and `%m` expanded.
    pub fn label(&self) -> String {
        self.text_format
            .replace("%v", &(self.value.value() as i64).to_string())
            .replace("%m", &(self.value.max() as i64).to_string())
    }

    fn fill_rect(&self, rect: Rect) -> Rect {
        Rect::new(rect.x(), rect.y(), rect.width() * self.value.fraction() as f32, rect.height())
    }
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for ProgressBar {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        let w = constraints.max_width().unwrap_or(200.0);
        let h = self.height.unwrap_or(Self::MIN_HEIGHT * 2.0);
        constraints.constrain(Vec2::new(w, h))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        painter.fill_rounded_rect(rect, self.radius, self.background, None);

        let fill_rect = self.fill_rect(rect);
        if fill_rect.width() > 0.0 {
            let paint = match self.fill_end {
                Some(end) => Paint::LinearGradient(LinearGradient::horizontal(fill_rect, self.fill, end)),
                None => Paint::Solid(self.fill),
            };
            painter.fill_rounded_rect(fill_rect, self.radius, paint, None);
        }

        if self.show_text {
            let style = TextStyle::new((rect.height() * 0.6).max(8.0));
            painter.centered_text(self.label(), &style, self.text_color, rect);
        }
    }

    fn tick(&mut self, dt: Duration) -> bool {
        self.value.tick(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use milk_engine::scene::{DrawCmd, DrawList};

    fn paint(bar: &ProgressBar, rect: Rect) -> DrawList {
        let mut list = DrawList::new();
        let now = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        bar.paint(&mut Painter::new(&mut list, now), rect);
        list
    }

    #[test]
    fn defaults() {
        let bar = ProgressBar::new();
        assert_eq!(bar.background(), Color::rgba(60, 60, 70, 150));
        assert_eq!(bar.fill(), Color::rgb(0, 150, 255));
        assert_eq!(bar.radius(), 4.0);
        assert_eq!((bar.min(), bar.max()), (0.0, 100.0));
    }

    #[test]
    fn value_is_clamped() {
        let mut bar = ProgressBar::new();
        bar.set_value(250.0);
        assert_eq!(bar.value(), 100.0);
        bar.set_value(-1.0);
        assert_eq!(bar.value(), 0.0);
    }

    #[test]
    fn display_value_approaches_target() {
        let mut bar = ProgressBar::new();
        bar.set_value(100.0);
        assert!(bar.tick(Duration::from_millis(16)));
        assert!((bar.display_value() - 15.0).abs() < 1e-9);
    }

    #[test]
    fn label_expands_placeholders() {
        let mut bar = ProgressBar::new();
        bar.set_animated(false);
        bar.set_value(42.7);
        assert_eq!(bar.label(), "42%");
        bar.set_text_format("%v / %m");
        assert_eq!(bar.label(), "42 / 100");
    }

    #[test]
    fn fill_width_tracks_display_value() {
        let mut bar = ProgressBar::new();
        bar.set_animated(false);
        bar.set_value(25.0);
        let list = paint(&bar, Rect::new(0.0, 0.0, 200.0, 10.0));
        match &list.items()[1].cmd {
            DrawCmd::RoundedRect(cmd) => assert_eq!(cmd.rect.width(), 50.0),
            other => panic!("unexpected {}", other.kind()),
        }
    }

    #[test]
    fn gradient_fill_runs_left_to_right() {
        let mut bar = ProgressBar::new();
        bar.set_animated(false);
        bar.set_gradient(Color::GREEN, Color::RED);
        bar.set_value(100.0);
        let list = paint(&bar, Rect::new(0.0, 0.0, 100.0, 10.0));
        match &list.items()[1].cmd {
            DrawCmd::RoundedRect(cmd) => assert!(matches!(cmd.paint, Paint::LinearGradient(_))),
            other => panic!("unexpected {}", other.kind()),
        }
    }

    #[test]
    fn empty_bar_draws_only_track() {
        let list = paint(&ProgressBar::new(), Rect::new(0.0, 0.0, 100.0, 10.0));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn height_is_clamped() {
        let mut bar = ProgressBar::new();
        bar.set_height(100.0);
        let m = bar.measure(Constraints::loose(Vec2::new(300.0, 300.0)), &LayoutCtx::now());
        assert_eq!(m, Vec2::new(300.0, 30.0));
    }
}
