use std::path::Path;
use std::rc::Rc;

use milk_engine::coords::{Rect, Vec2};
use milk_engine::paint::Color;
use milk_engine::scene::{Border, ImageData};
use milk_engine::text::{self, TextStyle};

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::error::Result;
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Widget;
use crate::widgets::picture::decode_file;

/// A clickable label with normal, hover and pressed backgrounds.
///
/// Hover visuals are read from the painter's pointer state. A click fires
/// when the pointer is released inside the button after a press that also
/// started inside it.
///
/// # Example
/// ```rust,ignore
/// Button::new("Refresh")
///     .on_click(|| log::info!("refresh"))
/// ```
pub struct Button {
    label: String,
    style: TextStyle,
    text_color: Color,
    background: Color,
    hover_background: Color,
    pressed_background: Color,
    border: Option<Border>,
    radius: f32,
    padding: Edges,
    icon: Option<Rc<ImageData>>,
    icon_size: f32,
    on_click: Option<Box<dyn FnMut()>>,
    pressed: bool,
    clicks: u32,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            style: TextStyle::default(),
            text_color: Color::WHITE,
            background: Color::rgba(60, 60, 80, 200),
            hover_background: Color::rgba(80, 80, 100, 200),
            pressed_background: Color::rgba(50, 50, 70, 200),
            border: None,
            radius: 6.0,
            padding: Edges::symmetric(8.0, 16.0),
            icon: None,
            icon_size: 16.0,
            on_click: None,
            pressed: false,
            clicks: 0,
        }
    }

    pub fn on_click(mut self, f: impl FnMut() + 'static) -> Self {
        self.set_on_click(f);
        self
    }

    pub fn set_on_click(&mut self, f: impl FnMut() + 'static) {
        self.on_click = Some(Box::new(f));
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn set_background(&mut self, c: Color) {
        self.background = c;
    }

    pub fn set_hover_background(&mut self, c: Color) {
        self.hover_background = c;
    }

    pub fn set_pressed_background(&mut self, c: Color) {
        self.pressed_background = c;
    }

    pub fn set_text_color(&mut self, c: Color) {
        self.text_color = c;
    }

    pub fn set_rounded(&mut self, r: f32) {
        self.radius = r.max(0.0);
    }

    /// A zero width removes the border.
    pub fn set_border(&mut self, color: Color, width: f32) {
        self.border = (width > 0.0).then(|| Border::new(width, color));
    }

    pub fn set_icon(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.icon = Some(Rc::new(decode_file(path.as_ref())?));
        Ok(())
    }

    pub fn set_icon_size(&mut self, size: f32) {
        self.icon_size = size.max(0.0);
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Clicks delivered so far.
    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn icon_extent(&self) -> f32 {
        if self.icon.is_some() { self.icon_size + 6.0 } else { 0.0 }
    }
}

impl Widget for Button {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        let t = text::measure(&self.label, &self.style, None);
        let w = t.x + self.icon_extent() + self.padding.h();
        let h = t.y.max(if self.icon.is_some() { self.icon_size } else { 0.0 }) + self.padding.v();
        constraints.constrain(Vec2::new(w, h))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let bg = if self.pressed || painter.is_pressed(rect) {
            self.pressed_background
        } else if painter.is_hovered(rect) {
            self.hover_background
        } else {
            self.background
        };
        painter.fill_rounded_rect(rect, self.radius, bg, self.border.clone());

        let mut inner = inset_rect(rect, self.padding);
        if let Some(icon) = &self.icon {
            let at = Rect::new(inner.x(), inner.center().y - self.icon_size / 2.0, self.icon_size, self.icon_size);
            painter.image(icon.clone(), at, None);
            let shift = self.icon_extent();
            inner = Rect::new(inner.x() + shift, inner.y(), (inner.width() - shift).max(0.0), inner.height());
        }
        painter.centered_text(self.label.clone(), &self.style, self.text_color, inner);
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx) -> EventResult {
        match *event {
            UiEvent::Press { pos } if rect.contains(pos) => {
                self.pressed = true;
                EventResult::Consumed
            }
            UiEvent::Release { pos } if self.pressed => {
                self.pressed = false;
                if !rect.contains(pos) {
                    return EventResult::Ignored;
                }
                self.clicks += 1;
                if let Some(f) = &mut self.on_click {
                    f();
                }
                EventResult::Consumed
            }
            UiEvent::Leave => {
                self.pressed = false;
                EventResult::Ignored
            }
            _ => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use chrono::NaiveDate;
    use milk_engine::paint::Paint;
    use milk_engine::scene::{DrawCmd, DrawList};

    fn ctx() -> LayoutCtx {
        LayoutCtx::now()
    }

    fn bg_at(b: &Button, pointer: Option<Vec2>, down: bool) -> Paint {
        let mut list = DrawList::new();
        let now = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let mut p = Painter::new(&mut list, now).with_pointer(pointer, down);
        b.paint(&mut p, Rect::new(0.0, 0.0, 80.0, 30.0));
        match &list.items()[0].cmd {
            DrawCmd::RoundedRect(cmd) => cmd.paint.clone(),
            other => panic!("unexpected {}", other.kind()),
        }
    }

    #[test]
    fn click_on_release_inside() {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let mut b = Button::new("Go").on_click(move || h.set(h.get() + 1));
        let rect = Rect::new(0.0, 0.0, 80.0, 30.0);
        let at = Vec2::new(10.0, 10.0);
        assert!(b.on_event(&UiEvent::Press { pos: at }, rect, &ctx()).is_consumed());
        assert!(b.on_event(&UiEvent::Release { pos: at }, rect, &ctx()).is_consumed());
        assert_eq!(hits.get(), 1);
        assert_eq!(b.clicks(), 1);
    }

    #[test]
    fn release_outside_cancels() {
        let mut b = Button::new("Go");
        let rect = Rect::new(0.0, 0.0, 80.0, 30.0);
        b.on_event(&UiEvent::Press { pos: Vec2::new(5.0, 5.0) }, rect, &ctx());
        b.on_event(&UiEvent::Release { pos: Vec2::new(200.0, 5.0) }, rect, &ctx());
        assert_eq!(b.clicks(), 0);
        assert!(!b.is_pressed());
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut b = Button::new("Go");
        let r = b.on_event(&UiEvent::Release { pos: Vec2::new(5.0, 5.0) }, Rect::new(0.0, 0.0, 80.0, 30.0), &ctx());
        assert_eq!(r, EventResult::Ignored);
        assert_eq!(b.clicks(), 0);
    }

    #[test]
    fn visual_states() {
        let b = Button::new("Go");
        assert_eq!(bg_at(&b, None, false), Paint::Solid(Color::rgba(60, 60, 80, 200)));
        assert_eq!(bg_at(&b, Some(Vec2::new(5.0, 5.0)), false), Paint::Solid(Color::rgba(80, 80, 100, 200)));
        assert_eq!(bg_at(&b, Some(Vec2::new(5.0, 5.0)), true), Paint::Solid(Color::rgba(50, 50, 70, 200)));
    }

    #[test]
    fn zero_width_border_is_none() {
        let mut b = Button::new("Go");
        b.set_border(Color::WHITE, 0.0);
        assert!(b.border.is_none());
        b.set_border(Color::WHITE, 2.0);
        assert_eq!(b.border, Some(Border::new(2.0, Color::WHITE)));
    }
}
