use std::rc::Rc;

use chrono::NaiveDateTime;
use milk_engine::coords::{CornerRadii, Rect, Vec2};
use milk_engine::geometry::Outline;
use milk_engine::paint::{Color, Paint};
use milk_engine::scene::{Border, DrawList, ImageData, Stroke, ZIndex};
use milk_engine::text::{HAlign, TextStyle, VAlign};

use crate::constraints::LayoutCtx;

/// Drawing surface passed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// Wraps the engine's `DrawList` with a higher-level API and exposes the
/// per-frame pointer state and wall clock so widgets can express hover and
/// pressed visuals, or time-driven content, directly in `paint`.
pub struct Painter<'a> {
    pub(crate) draw_list: &'a mut DrawList,
    z: i32,
    /// Pointer position in widget-local logical pixels.
    pub mouse_pos: Option<Vec2>,
    /// True while the primary button is held down.
    pub mouse_pressed: bool,
    /// Wall-clock time for this frame.
    pub now: NaiveDateTime,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList, now: NaiveDateTime) -> Self {
        Self { draw_list, z: 0, mouse_pos: None, mouse_pressed: false, now }
    }

    pub fn with_pointer(mut self, pos: Option<Vec2>, pressed: bool) -> Self {
        self.mouse_pos = pos;
        self.mouse_pressed = pressed;
        self
    }

    // ── input queries ─────────────────────────────────────────────────────

    #[inline]
    pub fn is_hovered(&self, rect: Rect) -> bool {
        self.mouse_pos.is_some_and(|p| rect.contains(p))
    }

    #[inline]
    pub fn is_pressed(&self, rect: Rect) -> bool {
        self.mouse_pressed && self.is_hovered(rect)
    }

    #[inline]
    pub fn layout_ctx(&self) -> LayoutCtx {
        LayoutCtx::new(self.now)
    }

    // ── drawing ───────────────────────────────────────────────────────────

    pub fn fill_rect(&mut self, rect: Rect, paint: impl Into<Paint>) {
        let z = self.next_z();
        self.draw_list.push_rect(z, rect, paint.into());
    }

    /// Rounded rectangle with optional border. `radius = 0.0` for sharp corners.
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, paint: impl Into<Paint>, border: Option<Border>) {
        let z = self.next_z();
        self.draw_list.push_rounded_rect(z, rect, CornerRadii::all(radius), paint.into(), border);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, paint: impl Into<Paint>, border: Option<Border>) {
        let z = self.next_z();
        self.draw_list.push_circle(z, center, radius, paint.into(), border);
    }

    pub fn fill_outline(&mut self, outline: Outline, paint: impl Into<Paint>, border: Option<Border>) {
        let z = self.next_z();
        outline.push_fill(self.draw_list, z, paint.into(), border);
    }

    pub fn fill_polygon(&mut self, points: Vec<Vec2>, paint: impl Into<Paint>) {
        let z = self.next_z();
        self.draw_list.push_polygon(z, points, paint.into());
    }

    pub fn polyline(&mut self, points: Vec<Vec2>, stroke: Stroke) {
        let z = self.next_z();
        self.draw_list.push_polyline(z, points, stroke);
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, stroke: Stroke) {
        let z = self.next_z();
        self.draw_list.push_line(z, from, to, stroke);
    }

    /// Arc in degrees, 0° at three o'clock, positive counter-clockwise.
    pub fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, span: f32, stroke: Stroke) {
        let z = self.next_z();
        self.draw_list.push_arc(z, center, radius, start_angle, span, stroke);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn text(
        &mut self,
        text: impl Into<String>,
        style: &TextStyle,
        color: Color,
        rect: Rect,
        h_align: HAlign,
        v_align: VAlign,
        wrap: bool,
    ) {
        let z = self.next_z();
        self.draw_list.push_text(z, text, style.clone(), color, rect, h_align, v_align, wrap);
    }

    /// Single line centred in `rect`.
    pub fn centered_text(&mut self, text: impl Into<String>, style: &TextStyle, color: Color, rect: Rect) {
        self.text(text, style, color, rect, HAlign::Center, VAlign::Center, false);
    }

    pub fn image(&mut self, image: Rc<ImageData>, rect: Rect, mask: Option<Outline>) {
        let z = self.next_z();
        match mask {
            Some(mask) => self.draw_list.push_masked_image(z, image, rect, mask),
            None => self.draw_list.push_image(z, image, rect),
        }
    }

    // ── widget chrome ─────────────────────────────────────────────────────

    /// Drop shadow or glow under everything else the widget draws.
    pub fn shadow(&mut self, outline: Outline, color: Color, blur: f32, offset: Vec2, spread: f32) {
        self.draw_list.push_shadow(ZIndex::SHADOW, outline, color, blur, offset, spread);
    }

    /// Background fill under all content.
    pub fn background(&mut self, outline: Outline, paint: impl Into<Paint>, border: Option<Border>) {
        outline.push_fill(self.draw_list, ZIndex::BACKGROUND, paint.into(), border);
    }

    /// Background image, above the background fill and under all content.
    pub fn background_image(&mut self, image: Rc<ImageData>, rect: Rect, mask: Outline) {
        self.draw_list.push_masked_image(ZIndex::BACKGROUND.above(), image, rect, mask);
    }

    // ── clipping and opacity ──────────────────────────────────────────────

    pub fn push_clip(&mut self, rect: Rect) {
        self.draw_list.push_clip(rect);
    }

    pub fn pop_clip(&mut self) {
        self.draw_list.pop_clip();
    }

    pub fn push_opacity(&mut self, opacity: f32) {
        self.draw_list.push_opacity(opacity);
    }

    pub fn pop_opacity(&mut self) {
        self.draw_list.pop_opacity();
    }

    // ── internal ──────────────────────────────────────────────────────────

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex::new(self.z);
        self.z += 1;
        z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn z_increases_per_command() {
        let mut list = DrawList::new();
        let mut p = Painter::new(&mut list, noon());
        p.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::RED);
        p.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::BLUE);
        let zs: Vec<i32> = list.items().iter().map(|i| i.key.z.0).collect();
        assert_eq!(zs, vec![0, 1]);
    }

    #[test]
    fn hover_needs_a_pointer() {
        let mut list = DrawList::new();
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        let p = Painter::new(&mut list, noon());
        assert!(!p.is_hovered(r));
        let p = p.with_pointer(Some(Vec2::new(5.0, 5.0)), true);
        assert!(p.is_hovered(r));
        assert!(p.is_pressed(r));
    }
}
