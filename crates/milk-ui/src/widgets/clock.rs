use std::str::FromStr;
use std::time::Duration;

use chrono::{Datelike, NaiveDateTime, Timelike};
use milk_engine::coords::{Rect, Vec2};
use milk_engine::paint::Color;
use milk_engine::scene::Stroke;
use milk_engine::text::{self, HAlign, TextStyle, VAlign};
use milk_engine::time::IntervalTimer;

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::widget::Widget;

// ── pattern rendering ─────────────────────────────────────────────────────

/// Renders a Qt-style date/time pattern.
///
/// | token | meaning |
/// |---|---|
/// | `h` `hh` `H` `HH` | hour, 12-hour when the pattern has `AP`/`ap` |
/// | `m` `mm`, `s` `ss` | minute, second |
/// | `AP` `ap` | AM/PM marker |
/// | `d` `dd` `ddd` `dddd` | day of month, short or long weekday name |
/// | `M` `MM` `MMM` `MMMM` | month number, short or long month name |
/// | `yy` `yyyy` | year |
/// | `'text'` | literal; `''` is a single quote |
///
/// Single-letter forms are unpadded, doubled forms pad to two digits.
pub fn format_pattern(pattern: &str, at: &NaiveDateTime) -> String {
    let twelve_hour = pattern.contains("AP") || pattern.contains("ap");
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
                continue;
            }
            let end = chars[i + 1..].iter().position(|&q| q == '\'').map_or(chars.len(), |p| i + 1 + p);
            out.extend(&chars[i + 1..end]);
            i = end + 1;
            continue;
        }

        if (c == 'A' || c == 'a') && matches!(chars.get(i + 1), Some('P' | 'p')) {
            let marker = if at.hour() < 12 { "AM" } else { "PM" };
            out.push_str(&if c == 'a' { marker.to_lowercase() } else { marker.to_string() });
            i += 2;
            continue;
        }

        let run = chars[i..].iter().take_while(|&&x| x == c).count();
        let used = match c {
            'h' | 'H' => {
                let hour = if twelve_hour {
                    match at.hour() % 12 {
                        0 => 12,
                        h => h,
                    }
                } else {
                    at.hour()
                };
                push_number(&mut out, hour, run);
                run.min(2)
            }
            'm' => {
                push_number(&mut out, at.minute(), run);
                run.min(2)
            }
            's' => {
                push_number(&mut out, at.second(), run);
                run.min(2)
            }
            'd' => match run {
                1 | 2 => {
                    push_number(&mut out, at.day(), run);
                    run
                }
                3 => {
                    out.push_str(&at.format("%a").to_string());
                    3
                }
                _ => {
                    out.push_str(&at.format("%A").to_string());
                    4
                }
            },
            'M' => match run {
                1 | 2 => {
                    push_number(&mut out, at.month(), run);
                    run
                }
                3 => {
                    out.push_str(&at.format("%b").to_string());
                    3
                }
                _ => {
                    out.push_str(&at.format("%B").to_string());
                    4
                }
            },
            'y' if run >= 4 => {
                out.push_str(&format!("{:04}", at.year()));
                4
            }
            'y' if run >= 2 => {
                out.push_str(&format!("{:02}", at.year().rem_euclid(100)));
                2
            }
            _ => {
                out.push(c);
                1
            }
        };
        i += used;
    }
    out
}

fn push_number(out: &mut String, n: u32, run: usize) {
    if run >= 2 {
        out.push_str(&format!("{n:02}"));
    } else {
        out.push_str(&n.to_string());
    }
}

/// Clockwise angles from twelve o'clock for the hour, minute and second hands.
pub fn hand_angles(at: &NaiveDateTime) -> (f32, f32, f32) {
    let (h, m, s) = (at.hour() as f32, at.minute() as f32, at.second() as f32);
    (30.0 * (h + m / 60.0), 6.0 * (m + s / 60.0), 6.0 * s)
}

// ── Clock ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockStyle {
    #[default]
    Digital,
    Analog,
    Minimal,
}

impl ClockStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            ClockStyle::Digital => "digital",
            ClockStyle::Analog => "analog",
            ClockStyle::Minimal => "minimal",
        }
    }
}

impl FromStr for ClockStyle {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s.trim().to_ascii_lowercase().as_str() {
            "digital" => Ok(ClockStyle::Digital),
            "analog" | "analogue" => Ok(ClockStyle::Analog),
            "minimal" => Ok(ClockStyle::Minimal),
            _ => Err(()),
        }
    }
}

/// Wall-clock display, digital or analog.
///
/// The time comes from the painter's frame clock; `tick` only reports a
/// repaint once per second.
#[derive(Debug, Clone)]
pub struct Clock {
    style: ClockStyle,
    time_format: String,
    date_format: String,
    use_24h: bool,
    show_seconds: bool,
    show_date: bool,
    font_family: String,
    text_color: Color,
    hour_hand: Color,
    minute_hand: Color,
    second_hand: Color,
    dial: Color,
    show_ticks: bool,
    refresh: IntervalTimer,
}

impl Clock {
    pub fn new(style: ClockStyle) -> Self {
        let mut refresh = IntervalTimer::new(Duration::from_secs(1));
        refresh.start();
        Self {
            style,
            time_format: "hh:mm:ss".to_string(),
            date_format: "dddd, MMMM d".to_string(),
            use_24h: true,
            show_seconds: true,
            show_date: true,
            font_family: TextStyle::DEFAULT_FAMILY.to_string(),
            text_color: Color::WHITE,
            hour_hand: Color::WHITE,
            minute_hand: Color::rgb(200, 200, 200),
            second_hand: Color::rgb(255, 100, 100),
            dial: Color::rgb(40, 40, 50),
            show_ticks: true,
            refresh,
        }
    }

    pub fn digital() -> Self {
        Self::new(ClockStyle::Digital)
    }

    pub fn analog() -> Self {
        Self::new(ClockStyle::Analog)
    }

    // ── format ────────────────────────────────────────────────────────────

    pub fn set_style(&mut self, style: ClockStyle) {
        self.style = style;
    }

    pub fn set_format(&mut self, pattern: impl Into<String>) {
        self.time_format = pattern.into();
    }

    /// Rewrites the time pattern for the hour cycle.
    pub fn set_24_hour(&mut self, on: bool) {
        self.use_24h = on;
        self.rewrite_format();
    }

    /// Rewrites the time pattern with or without seconds.
    pub fn set_show_seconds(&mut self, on: bool) {
        self.show_seconds = on;
        self.rewrite_format();
    }

    fn rewrite_format(&mut self) {
        self.time_format = match (self.use_24h, self.show_seconds) {
            (true, true) => "hh:mm:ss",
            (true, false) => "hh:mm",
            (false, true) => "h:mm:ss AP",
            (false, false) => "h:mm AP",
        }
        .to_string();
    }

    pub fn set_show_date(&mut self, on: bool) {
        self.show_date = on;
    }

    pub fn set_date_format(&mut self, pattern: impl Into<String>) {
        self.date_format = pattern.into();
    }

    // ── appearance ────────────────────────────────────────────────────────

    pub fn set_font_family(&mut self, family: impl Into<String>) {
        self.font_family = family.into();
    }

    pub fn set_text_color(&mut self, c: Color) {
        self.text_color = c;
    }

    pub fn set_hand_colors(&mut self, hour: Color, minute: Color, second: Color) {
        self.hour_hand = hour;
        self.minute_hand = minute;
        self.second_hand = second;
    }

    pub fn set_dial_color(&mut self, c: Color) {
        self.dial = c;
    }

    pub fn set_show_ticks(&mut self, on: bool) {
        self.show_ticks = on;
    }

    pub fn style(&self) -> ClockStyle {
        self.style
    }

    pub fn time_format(&self) -> &str {
        &self.time_format
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    // ── rendering ─────────────────────────────────────────────────────────

    pub fn time_text(&self, at: &NaiveDateTime) -> String {
        match self.style {
            ClockStyle::Minimal => format_pattern(if self.show_seconds { "hh:mm:ss" } else { "hh:mm" }, at),
            _ => format_pattern(&self.time_format, at),
        }
    }

    pub fn date_text(&self, at: &NaiveDateTime) -> String {
        format_pattern(&self.date_format, at)
    }

    fn font(&self, size: f32) -> TextStyle {
        TextStyle::new(size.floor().max(1.0)).family(self.font_family.clone())
    }

    fn paint_digital(&self, painter: &mut Painter, rect: Rect) {
        let h = rect.height();
        let now = painter.now;
        painter.centered_text(self.time_text(&now), &self.font(h / 3.0).bold(true), self.text_color, rect);
        if self.show_date {
            let top = rect.center().y + h / 6.0;
            let below = Rect::new(rect.x(), top, rect.width(), (rect.max().y - top).max(0.0));
            let date = self.date_text(&now);
            painter.text(date, &self.font(h / 6.0), self.text_color, below, HAlign::Center, VAlign::Top, false);
        }
    }

    fn paint_minimal(&self, painter: &mut Painter, rect: Rect) {
        let now = painter.now;
        painter.centered_text(self.time_text(&now), &self.font(rect.height() / 2.0), self.text_color, rect);
    }

    /// Dial in a 200-unit design space scaled to the shorter side.
    fn paint_analog(&self, painter: &mut Painter, rect: Rect) {
        let k = rect.width().min(rect.height()) / 200.0;
        let c = rect.center();
        let at = |p: Vec2, deg: f32| c + p.rotated(deg) * k;

        painter.fill_circle(c, 95.0 * k, self.dial, None);

        if self.show_ticks {
            let stroke = Stroke::new(2.0 * k, self.text_color);
            for i in 0..12 {
                let deg = i as f32 * 30.0;
                painter.line(at(Vec2::new(0.0, -88.0), deg), at(Vec2::new(0.0, -78.0), deg), stroke.clone());
            }
        }

        let now = painter.now;
        let (hour, minute, second) = hand_angles(&now);
        let hand = |half_w: f32, len: f32, deg: f32| {
            vec![at(Vec2::new(-half_w, 0.0), deg), at(Vec2::new(0.0, -len), deg), at(Vec2::new(half_w, 0.0), deg)]
        };
        painter.fill_polygon(hand(4.0, 50.0, hour), self.hour_hand);
        painter.fill_polygon(hand(3.0, 70.0, minute), self.minute_hand);
        if self.show_seconds {
            let stroke = Stroke::new(k.max(1.0), self.second_hand);
            painter.line(at(Vec2::new(0.0, 10.0), second), at(Vec2::new(0.0, -80.0), second), stroke);
        }
        painter.fill_circle(c, 5.0 * k, self.text_color, None);
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::digital()
    }
}

impl Widget for Clock {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let size = match self.style {
            ClockStyle::Analog => Vec2::splat(100.0),
            ClockStyle::Digital | ClockStyle::Minimal => {
                let min_h = 40.0;
                let t = text::measure(&self.time_text(&ctx.now), &self.font(min_h / 3.0).bold(true), None);
                let height = if self.style == ClockStyle::Digital && self.show_date { 60.0 } else { min_h };
                Vec2::new(t.x.max(100.0), height)
            }
        };
        constraints.constrain(size)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        match self.style {
            ClockStyle::Digital => self.paint_digital(painter, rect),
            ClockStyle::Analog => self.paint_analog(painter, rect),
            ClockStyle::Minimal => self.paint_minimal(painter, rect),
        }
    }

    fn tick(&mut self, dt: Duration) -> bool {
        self.refresh.tick(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use milk_engine::scene::{DrawCmd, DrawList};

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn default_patterns() {
        let t = at(14, 5, 9);
        assert_eq!(format_pattern("hh:mm:ss", &t), "14:05:09");
        assert_eq!(format_pattern("h:mm:ss AP", &t), "2:05:09 PM");
        assert_eq!(format_pattern("dddd, MMMM d", &t), "Friday, March 15");
    }

    #[test]
    fn twelve_hour_edges() {
        assert_eq!(format_pattern("h AP", &at(0, 0, 0)), "12 AM");
        assert_eq!(format_pattern("hh ap", &at(12, 0, 0)), "12 pm");
        assert_eq!(format_pattern("h", &at(0, 0, 0)), "0");
    }

    #[test]
    fn short_names_and_years() {
        let t = at(9, 0, 0);
        assert_eq!(format_pattern("ddd d MMM yyyy", &t), "Fri 15 Mar 2024");
        assert_eq!(format_pattern("dd/MM/yy", &t), "15/03/24");
    }

    #[test]
    fn quoted_literals() {
        let t = at(9, 30, 0);
        assert_eq!(format_pattern("'at' h:mm", &t), "at 9:30");
        assert_eq!(format_pattern("h''mm", &t), "9'30");
    }

    #[test]
    fn hour_cycle_and_seconds_rewrite_pattern() {
        let mut c = Clock::digital();
        c.set_24_hour(false);
        assert_eq!(c.time_format(), "h:mm:ss AP");
        c.set_show_seconds(false);
        assert_eq!(c.time_format(), "h:mm AP");
        c.set_24_hour(true);
        assert_eq!(c.time_format(), "hh:mm");
    }

    #[test]
    fn hands() {
        assert_eq!(hand_angles(&at(3, 30, 0)), (105.0, 180.0, 0.0));
        assert_eq!(hand_angles(&at(12, 0, 30)), (360.0, 3.0, 180.0));
    }

    #[test]
    fn ticks_once_per_second() {
        let mut c = Clock::digital();
        assert!(!c.tick(Duration::from_millis(500)));
        assert!(c.tick(Duration::from_millis(500)));
    }

    #[test]
    fn digital_paints_time_and_date() {
        let c = Clock::digital();
        let mut list = DrawList::new();
        c.paint(&mut Painter::new(&mut list, at(8, 1, 2)), Rect::new(0.0, 0.0, 200.0, 60.0));
        let texts: Vec<&str> = list
            .items()
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["08:01:02", "Friday, March 15"]);
    }

    #[test]
    fn analog_draws_ticks_and_hands() {
        let c = Clock::analog();
        let mut list = DrawList::new();
        c.paint(&mut Painter::new(&mut list, at(3, 0, 0)), Rect::new(0.0, 0.0, 200.0, 200.0));
        // dial + 12 ticks + 2 hands + second hand + hub
        assert_eq!(list.len(), 17);
        match &list.items()[13].cmd {
            DrawCmd::Polygon(p) => {
                // Hour hand at 3 o'clock points right.
                assert!((p.points[1].x - 150.0).abs() < 1e-3);
                assert!((p.points[1].y - 100.0).abs() < 1e-3);
            }
            other => panic!("unexpected {}", other.kind()),
        }
    }
}
