use milk_engine::coords::{Rect, Vec2};
use milk_engine::paint::Color;

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};
use crate::widgets::Spacer;

// ── Layout ────────────────────────────────────────────────────────────────

/// How a [`Container`] arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Top to bottom; children stretch to the full width.
    Vertical,
    /// Left to right; children stretch to the full height.
    Horizontal,
    /// Row-major cells, `columns` per row, equal column widths.
    Grid { columns: usize },
}

impl Layout {
    pub const DEFAULT_GRID_COLUMNS: usize = 2;

    /// `vertical`/`vbox`, `horizontal`/`hbox`, `grid`. Anything else is `None`.
    pub fn parse(s: &str) -> Option<Layout> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vertical" | "vbox" | "v" | "column" => Some(Layout::Vertical),
            "horizontal" | "hbox" | "h" | "row" => Some(Layout::Horizontal),
            "grid" => Some(Layout::Grid { columns: Self::DEFAULT_GRID_COLUMNS }),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Vertical => "vertical",
            Layout::Horizontal => "horizontal",
            Layout::Grid { .. } => "grid",
        }
    }
}

// ── Container ─────────────────────────────────────────────────────────────

/// Multi-child box with a vertical, horizontal or grid arrangement.
///
/// Spacing defaults to 5 px and margins to zero. Expanding children
/// (see [`Spacer::expanding`]) split whatever space is left along the main
/// axis once fixed children are placed.
///
/// # Example
/// ```rust,ignore
/// Container::vertical()
///     .spacing(8.0)
///     .child(Text::title("CPU"))
///     .child(ProgressBar::new())
/// ```
pub struct Container {
    layout: Layout,
    children: Vec<Element>,
    /// Explicit grid cell per child, `None` for auto placement.
    cells: Vec<Option<(usize, usize)>>,
    spacing: f32,
    margins: Edges,
    background: Color,
}

impl Container {
    pub const DEFAULT_SPACING: f32 = 5.0;

    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            children: Vec::new(),
            cells: Vec::new(),
            spacing: Self::DEFAULT_SPACING,
            margins: Edges::default(),
            background: Color::TRANSPARENT,
        }
    }

    pub fn vertical() -> Self {
        Self::new(Layout::Vertical)
    }

    pub fn horizontal() -> Self {
        Self::new(Layout::Horizontal)
    }

    pub fn grid(columns: usize) -> Self {
        Self::new(Layout::Grid { columns: columns.max(1) })
    }

    pub fn spacing(mut self, v: f32) -> Self {
        self.set_spacing(v);
        self
    }

    pub fn margins(mut self, edges: Edges) -> Self {
        self.margins = edges;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.push(child);
        self
    }

    pub fn children(mut self, iter: impl IntoIterator<Item = impl Into<Element>>) -> Self {
        for c in iter {
            self.push(c);
        }
        self
    }

    // ── mutation ──────────────────────────────────────────────────────────

    pub fn push(&mut self, child: impl Into<Element>) {
        self.children.push(child.into());
        self.cells.push(None);
    }

    /// Places `child` at `(row, column)` in a grid; appends otherwise.
    pub fn push_at(&mut self, child: impl Into<Element>, row: usize, column: usize) {
        self.children.push(child.into());
        let cell = matches!(self.layout, Layout::Grid { .. }).then_some((row, column));
        self.cells.push(cell);
    }

    /// Fixed gap along the main axis. Ignored by grids.
    pub fn add_spacing(&mut self, size: f32) {
        match self.layout {
            Layout::Vertical => self.push(Spacer::vertical(size)),
            Layout::Horizontal => self.push(Spacer::horizontal(size)),
            Layout::Grid { .. } => {}
        }
    }

    /// Expanding gap. Ignored by grids.
    pub fn add_stretch(&mut self) {
        if !matches!(self.layout, Layout::Grid { .. }) {
            self.push(Spacer::expanding());
        }
    }

    pub fn clear(&mut self) {
        self.children.clear();
        self.cells.clear();
    }

    pub fn set_spacing(&mut self, v: f32) {
        self.spacing = v.max(0.0);
    }

    pub fn set_margins(&mut self, edges: Edges) {
        self.margins = edges;
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn get_spacing(&self) -> f32 {
        self.spacing
    }

    pub fn get_margins(&self) -> Edges {
        self.margins
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn elements(&self) -> &[Element] {
        &self.children
    }

    pub fn elements_mut(&mut self) -> &mut [Element] {
        &mut self.children
    }

    // ── layout ────────────────────────────────────────────────────────────

    /// Rects for every child when the container occupies `rect`, in child order.
    pub fn child_rects(&self, rect: Rect, ctx: &LayoutCtx) -> Vec<Rect> {
        let inner = inset_rect(rect, self.margins);
        match self.layout {
            Layout::Vertical => self.stack_rects(inner, ctx, Axis::Vertical),
            Layout::Horizontal => self.stack_rects(inner, ctx, Axis::Horizontal),
            Layout::Grid { columns } => self.grid_rects(inner, ctx, columns),
        }
    }

    fn gaps(&self, n: usize) -> f32 {
        self.spacing * n.saturating_sub(1) as f32
    }

    fn stack_rects(&self, inner: Rect, ctx: &LayoutCtx, axis: Axis) -> Vec<Rect> {
        let cross = axis.cross(inner.size);
        let child_c = axis.stretch_constraints(cross);

        let mains: Vec<Option<f32>> = self
            .children
            .iter()
            .map(|c| (!c.is_expanding()).then(|| axis.main(c.measure(child_c, ctx))))
            .collect();

        let fixed: f32 = mains.iter().flatten().sum();
        let expanders = mains.iter().filter(|m| m.is_none()).count();
        let leftover = (axis.main(inner.size) - fixed - self.gaps(self.children.len())).max(0.0);
        let share = if expanders > 0 { leftover / expanders as f32 } else { 0.0 };

        let mut cursor = axis.main(inner.origin);
        mains
            .into_iter()
            .map(|m| {
                let len = m.unwrap_or(share);
                let r = axis.rect(inner, cursor, len);
                cursor += len + self.spacing;
                r
            })
            .collect()
    }

    fn grid_cells(&self, columns: usize) -> Vec<(usize, usize)> {
        let mut next = 0usize;
        self.cells
            .iter()
            .map(|cell| match *cell {
                Some(rc) => rc,
                None => {
                    let rc = (next / columns, next % columns);
                    next += 1;
                    rc
                }
            })
            .collect()
    }

    fn grid_rects(&self, inner: Rect, ctx: &LayoutCtx, columns: usize) -> Vec<Rect> {
        let columns = columns.max(1);
        let cells = self.grid_cells(columns);
        let col_count = cells.iter().map(|&(_, c)| c + 1).max().unwrap_or(0).max(columns);
        let row_count = cells.iter().map(|&(r, _)| r + 1).max().unwrap_or(0);

        let cell_w = ((inner.width() - self.gaps(col_count)) / col_count as f32).max(0.0);
        let child_c = Axis::Vertical.stretch_constraints(cell_w);

        let mut row_h = vec![0.0f32; row_count];
        for (child, &(r, _)) in self.children.iter().zip(&cells) {
            row_h[r] = row_h[r].max(child.measure(child_c, ctx).y);
        }
        let mut row_y = Vec::with_capacity(row_count);
        let mut y = inner.y();
        for h in &row_h {
            row_y.push(y);
            y += h + self.spacing;
        }

        cells
            .iter()
            .map(|&(r, c)| Rect::new(inner.x() + c as f32 * (cell_w + self.spacing), row_y[r], cell_w, row_h[r]))
            .collect()
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::vertical()
    }
}

impl Widget for Container {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let inner = constraints.shrink(self.margins);
        let content = match self.layout {
            Layout::Vertical | Layout::Horizontal => {
                let axis = if self.layout == Layout::Vertical { Axis::Vertical } else { Axis::Horizontal };
                let child_c = axis.stretch_constraints(axis.cross(inner.max));
                let mut main = self.gaps(self.children.len());
                let mut cross = 0.0f32;
                for c in &self.children {
                    let s = c.measure(child_c, ctx);
                    main += axis.main(s);
                    cross = cross.max(axis.cross(s));
                }
                axis.size(main, cross)
            }
            Layout::Grid { .. } => {
                let probe = Rect::new(0.0, 0.0, finite_or(inner.max.x, 0.0), 0.0);
                self.child_rects(probe, ctx)
                    .iter()
                    .fold(Vec2::zero(), |acc, r| Vec2::new(acc.x.max(r.max().x), acc.y.max(r.max().y)))
            }
        };
        constraints.constrain(Vec2::new(content.x + self.margins.h(), content.y + self.margins.v()))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        if self.background.a > 0 {
            painter.fill_rect(rect, self.background);
        }
        let ctx = painter.layout_ctx();
        for (child, r) in self.children.iter().zip(self.child_rects(rect, &ctx)) {
            child.paint(painter, r);
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
        let rects = self.child_rects(rect, ctx);
        let mut result = EventResult::Ignored;
        for (child, r) in self.children.iter_mut().zip(rects) {
            match event {
                // Presses go to the child under the pointer only.
                UiEvent::Press { pos } if !r.contains(*pos) => continue,
                _ => {}
            }
            if child.on_event(event, r, ctx).is_consumed() {
                result = EventResult::Consumed;
                if matches!(event, UiEvent::Press { .. }) {
                    break;
                }
            }
        }
        result
    }

    fn is_expanding(&self) -> bool {
        self.children.iter().any(Element::is_expanding)
    }

    fn children(&self) -> &[Element] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Element] {
        &mut self.children
    }
}

// ── axis helpers ──────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    fn main(self, v: Vec2) -> f32 {
        match self {
            Axis::Vertical => v.y,
            Axis::Horizontal => v.x,
        }
    }

    fn cross(self, v: Vec2) -> f32 {
        match self {
            Axis::Vertical => v.x,
            Axis::Horizontal => v.y,
        }
    }

    fn size(self, main: f32, cross: f32) -> Vec2 {
        match self {
            Axis::Vertical => Vec2::new(cross, main),
            Axis::Horizontal => Vec2::new(main, cross),
        }
    }

    /// Children fill the cross axis when it is bounded and size freely
    /// along the main axis.
    fn stretch_constraints(self, cross: f32) -> Constraints {
        let min_cross = finite_or(cross, 0.0);
        Constraints { min: self.size(0.0, min_cross), max: self.size(f32::INFINITY, cross) }
    }

    fn rect(self, inner: Rect, at: f32, len: f32) -> Rect {
        match self {
            Axis::Vertical => Rect::new(inner.x(), at, inner.width(), len),
            Axis::Horizontal => Rect::new(at, inner.y(), len, inner.height()),
        }
    }
}

fn finite_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() { v } else { fallback }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::Text;

    fn ctx() -> LayoutCtx {
        LayoutCtx::now()
    }

    #[test]
    fn vertical_stacks_with_spacing() {
        let c = Container::vertical().child(Spacer::new(10.0)).child(Spacer::new(20.0));
        let rects = c.child_rects(Rect::new(0.0, 0.0, 100.0, 100.0), &ctx());
        assert_eq!(rects[0], Rect::new(0.0, 0.0, 100.0, 10.0));
        assert_eq!(rects[1], Rect::new(0.0, 15.0, 100.0, 20.0));
    }

    #[test]
    fn expanding_children_share_leftover() {
        let c = Container::horizontal()
            .spacing(0.0)
            .child(Spacer::new(20.0))
            .child(Spacer::expanding())
            .child(Spacer::expanding());
        let rects = c.child_rects(Rect::new(0.0, 0.0, 100.0, 30.0), &ctx());
        assert_eq!(rects[1].width(), 40.0);
        assert_eq!(rects[2].x(), 60.0);
        assert_eq!(rects[2].height(), 30.0);
    }

    #[test]
    fn margins_inset_children() {
        let c = Container::vertical().margins(Edges::all(15.0)).child(Spacer::new(10.0));
        let r = c.child_rects(Rect::new(0.0, 0.0, 300.0, 200.0), &ctx())[0];
        assert_eq!(r.origin, Vec2::new(15.0, 15.0));
        assert_eq!(r.width(), 270.0);
    }

    #[test]
    fn grid_fills_row_major() {
        let c = Container::grid(2)
            .spacing(0.0)
            .children([Spacer::new(10.0), Spacer::new(10.0), Spacer::new(10.0)]);
        let rects = c.child_rects(Rect::new(0.0, 0.0, 100.0, 100.0), &ctx());
        assert_eq!(rects[1].origin, Vec2::new(50.0, 0.0));
        assert_eq!(rects[2].origin, Vec2::new(0.0, 10.0));
    }

    #[test]
    fn grid_explicit_cells() {
        let mut c = Container::grid(2).spacing(0.0);
        c.push_at(Spacer::new(10.0), 1, 1);
        let r = c.child_rects(Rect::new(0.0, 0.0, 100.0, 100.0), &ctx())[0];
        assert_eq!(r.x(), 50.0);
    }

    #[test]
    fn measure_sums_main_axis() {
        let c = Container::vertical().child(Spacer::new(10.0)).child(Spacer::new(20.0));
        let m = c.measure(Constraints::loose(Vec2::new(100.0, 500.0)), &ctx());
        assert_eq!(m.y, 35.0);
    }

    #[test]
    fn grid_ignores_spacing_helpers() {
        let mut c = Container::grid(3);
        c.add_spacing(10.0);
        c.add_stretch();
        assert!(c.is_empty());
        let mut v = Container::vertical();
        v.add_stretch();
        assert!(v.is_expanding());
    }

    #[test]
    fn children_are_reachable_for_lookup() {
        let c = Container::vertical().child(Element::new(Text::new("a")).with_id("a"));
        let root = Element::new(c);
        assert!(root.find("a").is_some());
    }
}
