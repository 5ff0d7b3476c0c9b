use std::any::Any;
use std::time::Duration;

use milk_engine::coords::{Rect, Vec2};

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;

// ── Widget trait ──────────────────────────────────────────────────────────

/// Upcast helper so [`Element`] can hand out the concrete widget type.
/// Implemented for every `'static` type.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// The core trait every child component of a [`MilkWidget`](crate::MilkWidget)
/// implements.
///
/// # Implementing a custom widget
///
/// ```rust,ignore
/// use milk_ui::prelude::*;
///
/// pub struct Dot { color: Color, size: f32 }
///
/// impl Widget for Dot {
///     fn measure(&self, c: Constraints, _ctx: &LayoutCtx) -> Vec2 {
///         c.constrain(Vec2::splat(self.size))
///     }
///     fn paint(&self, painter: &mut Painter, rect: Rect) {
///         painter.fill_circle(rect.center(), rect.size.x / 2.0, self.color, None);
///     }
/// }
/// ```
pub trait Widget: AsAny + 'static {
    /// Size this widget wants given the available space.
    ///
    /// Must be deterministic; containers call it more than once per frame.
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2;

    /// Draw into `painter` within `rect`, the space allocated by the parent.
    fn paint(&self, painter: &mut Painter, rect: Rect);

    /// Route a pointer event. Return [`EventResult::Consumed`] to stop propagation.
    fn on_event(&mut self, _event: &UiEvent, _rect: Rect, _ctx: &LayoutCtx) -> EventResult {
        EventResult::Ignored
    }

    /// Advances time-driven state (value smoothing). Returns `true` when the
    /// widget needs a repaint.
    fn tick(&mut self, _dt: Duration) -> bool {
        false
    }

    /// Expanding widgets share the space left over by their siblings.
    fn is_expanding(&self) -> bool {
        false
    }

    fn children(&self) -> &[Element] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Element] {
        &mut []
    }
}

// ── Element ───────────────────────────────────────────────────────────────

/// A type-erased widget with the identity the markup gave it.
///
/// Any `Widget` converts to `Element` via `From` / `Into`. The `id` makes a
/// child addressable from update callbacks through [`Element::find_mut`].
pub struct Element {
    widget: Box<dyn Widget>,
    id: Option<String>,
    class: Option<String>,
}

impl Element {
    pub fn new<W: Widget>(w: W) -> Self {
        Self { widget: Box::new(w), id: None, class: None }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    #[inline]
    pub fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        self.widget.measure(constraints, ctx)
    }

    #[inline]
    pub fn paint(&self, painter: &mut Painter, rect: Rect) {
        self.widget.paint(painter, rect)
    }

    #[inline]
    pub fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
        self.widget.on_event(event, rect, ctx)
    }

    /// Ticks this element and its whole subtree.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let mut dirty = self.widget.tick(dt);
        for child in self.widget.children_mut() {
            dirty |= child.tick(dt);
        }
        dirty
    }

    #[inline]
    pub fn is_expanding(&self) -> bool {
        self.widget.is_expanding()
    }

    pub fn children(&self) -> &[Element] {
        self.widget.children()
    }

    pub fn children_mut(&mut self) -> &mut [Element] {
        self.widget.children_mut()
    }

    /// Visits this element and every descendant, depth first.
    pub fn walk_mut(&mut self, f: &mut dyn FnMut(&mut Element)) {
        f(self);
        for child in self.widget.children_mut() {
            child.walk_mut(f);
        }
    }

    // ── downcasting ───────────────────────────────────────────────────────

    pub fn is<W: Widget>(&self) -> bool {
        self.widget.as_ref().as_any().is::<W>()
    }

    pub fn downcast_ref<W: Widget>(&self) -> Option<&W> {
        self.widget.as_ref().as_any().downcast_ref::<W>()
    }

    pub fn downcast_mut<W: Widget>(&mut self) -> Option<&mut W> {
        self.widget.as_mut().as_any_mut().downcast_mut::<W>()
    }

    // ── lookup ────────────────────────────────────────────────────────────

    /// Depth-first search of this subtree for `id`.
    pub fn find(&self, id: &str) -> Option<&Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.widget.children().iter().find_map(|c| c.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.widget.children_mut().iter_mut().find_map(|c| c.find_mut(id))
    }
}

impl<W: Widget> From<W> for Element {
    fn from(w: W) -> Self {
        Self::new(w)
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.id)
            .field("class", &self.class)
            .field("children", &self.children().len())
            .finish()
    }
}
