use std::collections::VecDeque;
use std::str::FromStr;

use milk_engine::coords::{Rect, Vec2};
use milk_engine::paint::{Color, LinearGradient, Paint};
use milk_engine::scene::Stroke;
use milk_engine::text::{HAlign, TextStyle, VAlign};

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::widget::Widget;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphType {
    #[default]
    Line,
    Area,
    Bar,
    /// Drawn like `Line`; a compact inline variant.
    Sparkline,
}

impl GraphType {
    pub fn as_str(self) -> &'static str {
        match self {
            GraphType::Line => "line",
            GraphType::Area => "area",
            GraphType::Bar => "bar",
            GraphType::Sparkline => "sparkline",
        }
    }
}

impl FromStr for GraphType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(GraphType::Line),
            "area" | "fill" => Ok(GraphType::Area),
            "bar" | "bars" => Ok(GraphType::Bar),
            "sparkline" | "spark" => Ok(GraphType::Sparkline),
            _ => Err(()),
        }
    }
}

/// A rolling time-series chart.
///
/// Keeps at most `max_points` samples, oldest first. The x step is fixed at
/// `width / (max_points - 1)` so the series scrolls in from the left until
/// the buffer is full. With auto-scale on, the value range tracks the
/// buffer's min and max after every sample.
#[derive(Debug, Clone)]
pub struct Graph {
    values: VecDeque<f64>,
    max_points: usize,
    min: f64,
    max: f64,
    auto_scale: bool,
    kind: GraphType,
    line_color: Color,
    fill_color: Color,
    grid_color: Color,
    line_width: f32,
    show_grid: bool,
    show_labels: bool,
}

impl Graph {
    pub const DEFAULT_MAX_POINTS: usize = 60;
    pub const MIN_HEIGHT: f32 = 50.0;

    pub fn new() -> Self {
        Self {
            values: VecDeque::with_capacity(Self::DEFAULT_MAX_POINTS),
            max_points: Self::DEFAULT_MAX_POINTS,
            min: 0.0,
            max: 100.0,
            auto_scale: false,
            kind: GraphType::Line,
            line_color: Color::rgb(0, 200, 255),
            fill_color: Color::rgba(0, 200, 255, 50),
            grid_color: Color::rgba(255, 255, 255, 30),
            line_width: 2.0,
            show_grid: true,
            show_labels: false,
        }
    }

    // ── data ──────────────────────────────────────────────────────────────

    /// Appends a sample, evicting the oldest beyond `max_points`.
    pub fn add_value(&mut self, v: f64) {
        self.values.push_back(v);
        self.trim();
        self.rescale();
    }

    pub fn set_values(&mut self, values: impl IntoIterator<Item = f64>) {
        self.values = values.into_iter().collect();
        self.trim();
        self.rescale();
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn trim(&mut self) {
        while self.values.len() > self.max_points {
            self.values.pop_front();
        }
    }

    fn rescale(&mut self) {
        if !self.auto_scale || self.values.is_empty() {
            return;
        }
        let (lo, hi) = self.values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        self.min = lo;
        self.max = if (hi - lo).abs() <= f64::EPSILON * lo.abs().max(1.0) { lo + 1.0 } else { hi };
    }

    // ── configuration ─────────────────────────────────────────────────────

    /// At least two points are kept so the x step stays finite.
    pub fn set_max_points(&mut self, n: usize) {
        self.max_points = n.max(2);
        self.trim();
    }

    pub fn set_range(&mut self, min: f64, max: f64) {
        self.min = min;
        self.max = max;
    }

    pub fn set_min(&mut self, min: f64) {
        self.min = min;
    }

    pub fn set_max(&mut self, max: f64) {
        self.max = max;
    }

    pub fn set_auto_scale(&mut self, on: bool) {
        self.auto_scale = on;
    }

    pub fn set_type(&mut self, kind: GraphType) {
        self.kind = kind;
    }

    pub fn set_line_color(&mut self, c: Color) {
        self.line_color = c;
    }

    pub fn set_fill_color(&mut self, c: Color) {
        self.fill_color = c;
    }

    pub fn set_grid_color(&mut self, c: Color) {
        self.grid_color = c;
    }

    pub fn set_line_width(&mut self, w: f32) {
        self.line_width = w.max(0.0);
    }

    pub fn set_show_grid(&mut self, on: bool) {
        self.show_grid = on;
    }

    pub fn set_show_labels(&mut self, on: bool) {
        self.show_labels = on;
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn graph_type(&self) -> GraphType {
        self.kind
    }

    // ── geometry ──────────────────────────────────────────────────────────

    fn span(&self) -> f64 {
        let r = self.max - self.min;
        if r <= 0.0 { 1.0 } else { r }
    }

    /// Sample positions inside `rect`.
    pub fn points(&self, rect: Rect) -> Vec<Vec2> {
        let range = self.span();
        let x_step = rect.width() / (self.max_points - 1) as f32;
        let h = rect.height() as f64;
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let y = h - (v - self.min) / range * h;
                Vec2::new(rect.x() + i as f32 * x_step, rect.y() + y as f32)
            })
            .collect()
    }

    /// Bar rects inside `rect`: `width / n - 2` wide with a 2 px gap.
    pub fn bars(&self, rect: Rect) -> Vec<Rect> {
        let n = self.values.len();
        if n == 0 {
            return Vec::new();
        }
        let range = self.span();
        let bar_w = rect.width() / n as f32 - 2.0;
        if bar_w <= 0.0 {
            return Vec::new();
        }
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let bar_h = ((v - self.min) / range * rect.height() as f64) as f32;
                Rect::new(rect.x() + i as f32 * (bar_w + 2.0), rect.max().y - bar_h, bar_w, bar_h)
            })
            .collect()
    }

    // ── painting ──────────────────────────────────────────────────────────

    fn paint_grid(&self, painter: &mut Painter, rect: Rect) {
        let stroke = Stroke::new(1.0, self.grid_color);
        for i in 1..4 {
            let y = rect.y() + rect.height() * i as f32 / 4.0;
            painter.line(Vec2::new(rect.x(), y), Vec2::new(rect.max().x, y), stroke.clone());
        }
        for i in 1..4 {
            let x = rect.x() + rect.width() * i as f32 / 4.0;
            painter.line(Vec2::new(x, rect.y()), Vec2::new(x, rect.max().y), stroke.clone());
        }
    }

    fn paint_line(&self, painter: &mut Painter, rect: Rect) {
        if self.values.len() < 2 {
            return;
        }
        painter.polyline(self.points(rect), Stroke::new(self.line_width, self.line_color).round());
    }

    fn paint_area(&self, painter: &mut Painter, rect: Rect) {
        if self.values.len() < 2 {
            return;
        }
        let points = self.points(rect);
        let bottom = rect.max().y;
        let last_x = points.last().map_or(rect.x(), |p| p.x);

        let mut poly = Vec::with_capacity(points.len() + 2);
        poly.push(Vec2::new(rect.x(), bottom));
        poly.extend(points.iter().copied());
        poly.push(Vec2::new(last_x, bottom));

        let fade = LinearGradient::vertical(rect, self.fill_color, self.fill_color.with_alpha(20));
        painter.fill_polygon(poly, Paint::LinearGradient(fade));
        painter.polyline(points, Stroke::new(self.line_width, self.line_color).round());
    }

    fn paint_bars(&self, painter: &mut Painter, rect: Rect) {
        for bar in self.bars(rect) {
            painter.fill_rect(bar, self.line_color);
        }
    }

    fn paint_labels(&self, painter: &mut Painter, rect: Rect) {
        let style = TextStyle::new(9.0);
        let color = Color::rgba(255, 255, 255, 150);
        let fmt = |v: f64| format!("{}", v.round() as i64);
        painter.text(fmt(self.max), &style, color, rect, HAlign::Left, VAlign::Top, false);
        painter.text(fmt(self.min), &style, color, rect, HAlign::Left, VAlign::Bottom, false);
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Graph {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        let w = constraints.max_width().unwrap_or(200.0);
        constraints.constrain(Vec2::new(w, Self::MIN_HEIGHT))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        if self.show_grid {
            self.paint_grid(painter, rect);
        }
        match self.kind {
            GraphType::Line | GraphType::Sparkline => self.paint_line(painter, rect),
            GraphType::Area => self.paint_area(painter, rect),
            GraphType::Bar => self.paint_bars(painter, rect),
        }
        if self.show_labels {
            self.paint_labels(painter, rect);
        }
    }

    fn is_expanding(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use milk_engine::scene::{DrawCmd, DrawList};

    fn paint(g: &Graph, rect: Rect) -> DrawList {
        let mut list = DrawList::new();
        let now = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        g.paint(&mut Painter::new(&mut list, now), rect);
        list
    }

    #[test]
    fn buffer_is_fifo_bounded() {
        let mut g = Graph::new();
        g.set_max_points(3);
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            g.add_value(v);
        }
        assert_eq!(g.values().collect::<Vec<_>>(), vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn set_values_trims_oldest() {
        let mut g = Graph::new();
        g.set_max_points(2);
        g.set_values([1.0, 2.0, 3.0]);
        assert_eq!(g.values().collect::<Vec<_>>(), vec![2.0, 3.0]);
    }

    #[test]
    fn auto_scale_tracks_extremes() {
        let mut g = Graph::new();
        g.set_auto_scale(true);
        g.add_value(5.0);
        assert_eq!(g.range(), (5.0, 6.0));
        g.add_value(9.0);
        g.add_value(2.0);
        assert_eq!(g.range(), (2.0, 9.0));
    }

    #[test]
    fn points_use_fixed_step() {
        let mut g = Graph::new();
        g.set_max_points(5);
        g.set_values([0.0, 50.0, 100.0]);
        let pts = g.points(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(pts, vec![Vec2::new(0.0, 100.0), Vec2::new(25.0, 50.0), Vec2::new(50.0, 0.0)]);
    }

    #[test]
    fn zero_range_is_treated_as_one() {
        let mut g = Graph::new();
        g.set_range(10.0, 10.0);
        g.set_values([10.5, 10.5]);
        let pts = g.points(Rect::new(0.0, 0.0, 59.0, 100.0));
        assert!((pts[0].y - 50.0).abs() < 1e-4);
    }

    #[test]
    fn bar_layout() {
        let mut g = Graph::new();
        g.set_values([50.0, 100.0]);
        let bars = g.bars(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(bars[0], Rect::new(0.0, 50.0, 48.0, 50.0));
        assert_eq!(bars[1], Rect::new(50.0, 0.0, 48.0, 100.0));
    }

    #[test]
    fn grid_is_six_lines() {
        let g = Graph::new();
        let list = paint(&g, Rect::new(0.0, 0.0, 100.0, 80.0));
        assert_eq!(list.len(), 6);
        assert!(list.items().iter().all(|i| matches!(i.cmd, DrawCmd::Line(_))));
    }

    #[test]
    fn single_sample_draws_no_line() {
        let mut g = Graph::new();
        g.set_show_grid(false);
        g.add_value(1.0);
        assert!(paint(&g, Rect::new(0.0, 0.0, 100.0, 80.0)).is_empty());
    }

    #[test]
    fn area_is_closed_to_the_baseline_then_stroked() {
        let mut g = Graph::new();
        g.set_show_grid(false);
        g.set_type(GraphType::Area);
        g.set_max_points(3);
        g.set_values([0.0, 100.0]);
        let list = paint(&g, Rect::new(0.0, 0.0, 100.0, 50.0));
        match &list.items()[0].cmd {
            DrawCmd::Polygon(p) => {
                assert_eq!(p.points.first(), Some(&Vec2::new(0.0, 50.0)));
                assert_eq!(p.points.last(), Some(&Vec2::new(50.0, 50.0)));
            }
            other => panic!("unexpected {}", other.kind()),
        }
        assert!(matches!(list.items()[1].cmd, DrawCmd::Polyline(_)));
    }

    #[test]
    fn parse_type_names() {
        assert_eq!("Area".parse::<GraphType>(), Ok(GraphType::Area));
        assert_eq!("sparkline".parse::<GraphType>(), Ok(GraphType::Sparkline));
        assert!("pie".parse::<GraphType>().is_err());
    }
}
