use chrono::{Datelike, Months, NaiveDate};
use milk_engine::coords::{Rect, Vec2};
use milk_engine::paint::Color;
use milk_engine::text::TextStyle;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Widget;
use crate::widgets::clock::format_pattern;

const HEADER_H: f32 = 25.0;
const WEEKDAY_Y: f32 = 28.0;
const WEEKDAY_H: f32 = 20.0;
const GRID_Y: f32 = 50.0;
const WEEKDAYS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// Column of the first day of `date`'s month, Monday = 0.
pub fn month_offset(date: NaiveDate) -> usize {
    date.with_day(1).map_or(0, |first| first.weekday().num_days_from_monday() as usize)
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    let Some(first) = date.with_day(1) else { return 0 };
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map_or(31, |last| last.day())
}

/// A Monday-first month grid.
///
/// Day `d` sits in cell `offset + d - 1` (row-major, seven columns), where
/// `offset` is the first day's weekday column. Clicking a cell selects that
/// day; cells before the 1st or after the last day are ignored.
pub struct Calendar {
    /// Any day in the displayed month.
    month: NaiveDate,
    selected: NaiveDate,
    header: Color,
    day: Color,
    today: Color,
    selected_color: Color,
    weekend: Color,
    highlight_today: bool,
    on_select: Option<Box<dyn FnMut(NaiveDate)>>,
}

impl Calendar {
    /// Opens on today's month with today selected.
    pub fn new() -> Self {
        Self::at(chrono::Local::now().date_naive())
    }

    pub fn at(date: NaiveDate) -> Self {
        Self {
            month: date,
            selected: date,
            header: Color::rgb(60, 130, 200),
            day: Color::WHITE,
            today: Color::rgb(255, 180, 100),
            selected_color: Color::rgb(100, 180, 255),
            weekend: Color::rgb(200, 100, 100),
            highlight_today: true,
            on_select: None,
        }
    }

    pub fn on_date_selected(mut self, f: impl FnMut(NaiveDate) + 'static) -> Self {
        self.on_select = Some(Box::new(f));
        self
    }

    // ── navigation ────────────────────────────────────────────────────────

    pub fn set_date(&mut self, date: NaiveDate) {
        self.month = date;
    }

    /// Returns the new `(year, month)`.
    pub fn next_month(&mut self) -> (i32, u32) {
        if let Some(d) = self.month.checked_add_months(Months::new(1)) {
            self.month = d;
        }
        (self.month.year(), self.month.month())
    }

    pub fn prev_month(&mut self) -> (i32, u32) {
        if let Some(d) = self.month.checked_sub_months(Months::new(1)) {
            self.month = d;
        }
        (self.month.year(), self.month.month())
    }

    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.month = today;
        self.selected = today;
    }

    /// Selects `day` of the displayed month; out-of-range days are rejected.
    pub fn select_day(&mut self, day: u32) -> Option<NaiveDate> {
        if day < 1 || day > days_in_month(self.month) {
            return None;
        }
        let date = self.month.with_day(day)?;
        self.selected = date;
        if let Some(f) = &mut self.on_select {
            f(date);
        }
        Some(date)
    }

    pub fn month(&self) -> (i32, u32) {
        (self.month.year(), self.month.month())
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    // ── colors ────────────────────────────────────────────────────────────

    pub fn set_header_color(&mut self, c: Color) {
        self.header = c;
    }

    pub fn set_day_color(&mut self, c: Color) {
        self.day = c;
    }

    pub fn set_today_color(&mut self, c: Color) {
        self.today = c;
    }

    pub fn set_selected_color(&mut self, c: Color) {
        self.selected_color = c;
    }

    pub fn set_weekend_color(&mut self, c: Color) {
        self.weekend = c;
    }

    pub fn set_highlight_today(&mut self, on: bool) {
        self.highlight_today = on;
    }

    // ── grid mapping ──────────────────────────────────────────────────────

    /// Cell index of `day` in the displayed month; `None` outside
    /// `1..=days_in_month`.
    pub fn cell_of(&self, day: u32) -> Option<usize> {
        if !(1..=days_in_month(self.month)).contains(&day) {
            return None;
        }
        (month_offset(self.month) + day as usize).checked_sub(1)
    }

    /// Day shown in cell `index`, if any.
    pub fn day_at(&self, index: usize) -> Option<u32> {
        let day = (index + 1).checked_sub(month_offset(self.month))? as u32;
        (1..=days_in_month(self.month)).contains(&day).then_some(day)
    }

    fn cell_size(rect: Rect) -> Vec2 {
        Vec2::new(rect.width() / 7.0, (rect.height() - 30.0) / 7.0)
    }

    pub fn cell_rect(&self, rect: Rect, index: usize) -> Rect {
        let cell = Self::cell_size(rect);
        let (row, col) = (index / 7, index % 7);
        Rect::new(rect.x() + col as f32 * cell.x, rect.y() + GRID_Y + row as f32 * cell.y, cell.x, cell.y)
    }

    /// Day under `pos` within a calendar occupying `rect`.
    pub fn hit_test(&self, rect: Rect, pos: Vec2) -> Option<u32> {
        let cell = Self::cell_size(rect);
        if cell.x <= 0.0 || cell.y <= 0.0 {
            return None;
        }
        let local = pos - rect.origin;
        if local.x < 0.0 || local.y < GRID_Y {
            return None;
        }
        let col = (local.x / cell.x).floor() as usize;
        let row = ((local.y - GRID_Y) / cell.y).floor() as usize;
        if col >= 7 {
            return None;
        }
        self.day_at(row * 7 + col)
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Calendar {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        constraints.constrain(Vec2::new(200.0, 180.0))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let cell = Self::cell_size(rect);

        let header = Rect::new(rect.x(), rect.y(), rect.width(), HEADER_H);
        painter.fill_rect(header, self.header);
        let title = self.month.and_hms_opt(0, 0, 0).map(|d| format_pattern("MMMM yyyy", &d)).unwrap_or_default();
        painter.centered_text(title, &TextStyle::default().bold(true), Color::WHITE, header);

        let small = TextStyle::new(9.0);
        for (i, name) in WEEKDAYS.iter().enumerate() {
            let r = Rect::new(rect.x() + i as f32 * cell.x, rect.y() + WEEKDAY_Y, cell.x, WEEKDAY_H);
            let color = if i >= 5 { self.weekend } else { self.day };
            painter.centered_text(*name, &small, color, r);
        }

        let today = painter.now.date();
        let style = TextStyle::new(10.0);
        for day in 1..=days_in_month(self.month) {
            let Some(index) = self.cell_of(day) else {
                continue;
            };
            let r = self.cell_rect(rect, index);
            let date = self.month.with_day(day);
            let color = if date == Some(self.selected) {
                painter.fill_rect(r.inset(2.0), self.selected_color);
                Color::WHITE
            } else if self.highlight_today && date == Some(today) {
                self.today
            } else if index % 7 >= 5 {
                self.weekend
            } else {
                self.day
            };
            painter.centered_text(day.to_string(), &style, color, r);
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx) -> EventResult {
        let UiEvent::Press { pos } = *event else {
            return EventResult::Ignored;
        };
        match self.hit_test(rect, pos).and_then(|d| self.select_day(d)) {
            Some(_) => EventResult::Consumed,
            None => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_shapes() {
        // March 2024 starts on a Friday.
        assert_eq!(month_offset(date(2024, 3, 20)), 4);
        assert_eq!(days_in_month(date(2024, 2, 10)), 29);
        assert_eq!(days_in_month(date(2023, 2, 10)), 28);
        assert_eq!(days_in_month(date(2024, 12, 31)), 31);
    }

    #[test]
    fn cell_mapping_is_a_bijection_over_the_month() {
        for (y, m) in [(2024, 1), (2024, 2), (2024, 9), (2025, 6)] {
            let cal = Calendar::at(date(y, m, 1));
            for d in 1..=days_in_month(date(y, m, 1)) {
                assert_eq!(cal.cell_of(d).and_then(|i| cal.day_at(i)), Some(d));
            }
            let first = cal.cell_of(1).unwrap();
            assert_eq!(cal.day_at(first + days_in_month(date(y, m, 1)) as usize), None);
        }
    }

    #[test]
    fn out_of_month_days_have_no_cell() {
        // April 2024 starts on a Monday.
        let cal = Calendar::at(date(2024, 4, 1));
        assert_eq!(cal.cell_of(1), Some(0));
        assert_eq!(cal.cell_of(0), None);
        assert_eq!(cal.cell_of(31), None);
    }

    #[test]
    fn cells_before_the_first_are_empty() {
        let cal = Calendar::at(date(2024, 3, 1));
        assert_eq!(cal.day_at(0), None);
        assert_eq!(cal.day_at(3), None);
        assert_eq!(cal.day_at(4), Some(1));
    }

    #[test]
    fn click_selects_day() {
        let picked = Rc::new(Cell::new(None));
        let p = picked.clone();
        let mut cal = Calendar::at(date(2024, 3, 1)).on_date_selected(move |d| p.set(Some(d)));
        let rect = Rect::new(0.0, 0.0, 210.0, 240.0);
        // cells are 30 × 30; the 1st is at column 4, row 0.
        let pos = Vec2::new(4.0 * 30.0 + 5.0, GRID_Y + 5.0);
        let r = cal.on_event(&UiEvent::Press { pos }, rect, &LayoutCtx::now());
        assert!(r.is_consumed());
        assert_eq!(picked.get(), Some(date(2024, 3, 1)));
        assert_eq!(cal.selected(), date(2024, 3, 1));
    }

    #[test]
    fn click_outside_month_is_rejected() {
        let mut cal = Calendar::at(date(2024, 3, 15));
        let rect = Rect::new(0.0, 0.0, 210.0, 240.0);
        assert_eq!(cal.hit_test(rect, Vec2::new(5.0, GRID_Y + 5.0)), None);
        assert_eq!(cal.hit_test(rect, Vec2::new(5.0, 10.0)), None);
        assert_eq!(cal.select_day(32), None);
        assert_eq!(cal.select_day(0), None);
        assert_eq!(cal.selected(), date(2024, 3, 15));
    }

    #[test]
    fn month_navigation() {
        let mut cal = Calendar::at(date(2024, 1, 31));
        assert_eq!(cal.next_month(), (2024, 2));
        assert_eq!(cal.prev_month(), (2024, 1));
        assert_eq!(cal.prev_month(), (2023, 12));
        cal.go_to_today(date(2024, 6, 5));
        assert_eq!(cal.month(), (2024, 6));
        assert_eq!(cal.selected(), date(2024, 6, 5));
    }
}
