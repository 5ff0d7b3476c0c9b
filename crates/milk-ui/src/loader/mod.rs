//! XML widget definitions.
//!
//! A document holds one `<widget>` root, or several under `<widgets>` or
//! `<milk>`. Widget attributes configure the window; child tags go through a
//! [`TagRegistry`] that maps tag names to factories, so hosts can add their
//! own tags next to the built-ins.
//!
//! ```rust,ignore
//! let mut loader = XmlLoader::new();
//! let widgets = loader.parse_str(r#"<widget width="320"><progress id="cpu"/></widget>"#);
//! if widgets.is_empty() {
//!     eprintln!("{}", loader.last_error().unwrap_or("no widgets"));
//! }
//! ```
//!
//! Parsing is permissive: unknown tags and attributes are skipped, malformed
//! values keep their defaults.

pub mod attrs;
mod builtins;
mod registry;

pub use registry::{BuildCtx, TagFactory, TagRegistry};

use std::path::{Path, PathBuf};

use milk_markup::{parse_str, Element as Markup};

use crate::constraints::Edges;
use crate::error::{MilkError, Result};
use crate::milk_widget::{MilkWidget, Position, DEFAULT_SIZE};
use crate::style::BlurMode;
use crate::widget::Element;

/// Intensity of a `glow` given without one.
const DEFAULT_GLOW_INTENSITY: f32 = 10.0;

/// Builds [`MilkWidget`]s from XML.
#[derive(Debug)]
pub struct XmlLoader {
    registry: TagRegistry,
    last_error: Option<String>,
}

impl XmlLoader {
    /// Loader with the built-in tags.
    pub fn new() -> Self {
        Self::with_registry(TagRegistry::with_builtins())
    }

    pub fn with_registry(registry: TagRegistry) -> Self {
        Self { registry, last_error: None }
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    /// Adds or replaces a child tag.
    pub fn register(&mut self, tag: &str, factory: impl Fn(&Markup, &BuildCtx<'_>) -> Option<Element> + 'static) {
        self.registry.register(tag, factory);
    }

    /// Message of the last failed parse, cleared by every parse call.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ── lenient entry points ──────────────────────────────────────────────

    /// Widgets in `xml`; empty on failure, with the reason in
    /// [`last_error`](Self::last_error).
    pub fn parse_str(&mut self, xml: &str) -> Vec<MilkWidget> {
        let result = self.try_parse_str(xml);
        self.settle(result)
    }

    /// As [`parse_str`](Self::parse_str), resolving relative resources
    /// against the file's directory.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Vec<MilkWidget> {
        let result = self.try_parse_file(path);
        self.settle(result)
    }

    fn settle(&mut self, result: Result<Vec<MilkWidget>>) -> Vec<MilkWidget> {
        match result {
            Ok(widgets) => {
                self.last_error = None;
                widgets
            }
            Err(e) => {
                log::warn!("{e}");
                self.last_error = Some(e.to_string());
                Vec::new()
            }
        }
    }

    // ── strict entry points ───────────────────────────────────────────────

    pub fn try_parse_str(&self, xml: &str) -> Result<Vec<MilkWidget>> {
        self.load(xml, None)
    }

    pub fn try_parse_file(&self, path: impl AsRef<Path>) -> Result<Vec<MilkWidget>> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path).map_err(|e| MilkError::io(path, e))?;
        let base = path.parent().map(absolute);
        let widgets = self.load(&xml, base.as_deref())?;
        log::debug!("{}: {} widget(s)", path.display(), widgets.len());
        Ok(widgets)
    }

    fn load(&self, xml: &str, base_dir: Option<&Path>) -> Result<Vec<MilkWidget>> {
        let doc = parse_str(xml)?;
        let ctx = BuildCtx::new(&self.registry, base_dir);
        let root = &doc.root;
        match root.name.as_str() {
            "widget" => Ok(vec![self.build_widget(root, &ctx)]),
            "widgets" | "milk" => {
                Ok(root.elements().filter(|e| e.name == "widget").map(|e| self.build_widget(e, &ctx)).collect())
            }
            other => Err(MilkError::UnexpectedRoot(other.to_string())),
        }
    }

    // ── widget ────────────────────────────────────────────────────────────

    /// One `<widget>` element: attributes first, then children.
    pub fn build_widget(&self, m: &Markup, ctx: &BuildCtx<'_>) -> MilkWidget {
        let width = attrs::number(m, "width").unwrap_or(DEFAULT_SIZE.x);
        let height = attrs::number(m, "height").unwrap_or(DEFAULT_SIZE.y);
        let mut w = MilkWidget::new(width, height);
        apply_widget_attrs(&mut w, m, ctx);
        for child in ctx.build_children(m) {
            w.add(child);
        }
        w
    }
}

impl Default for XmlLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn absolute(p: &Path) -> PathBuf {
    if p.as_os_str().is_empty() {
        return std::env::current_dir().unwrap_or_default();
    }
    std::fs::canonicalize(p).unwrap_or_else(|_| p.to_path_buf())
}

fn apply_widget_attrs(w: &mut MilkWidget, m: &Markup, ctx: &BuildCtx<'_>) {
    use attrs::{color, flag, number};

    // `bg` wins over `background` when both are present.
    if let Some(c) = color(m, "bg").or_else(|| color(m, "background")) {
        w.set_background(c);
    }
    if let Some(src) = m.attr("background-image") {
        if let Err(e) = w.set_background_image(ctx.resolve(src)) {
            log::warn!("line {}: {e}", m.line);
        }
    }

    if let Some(shape) = m.attr("shape").and_then(|s| s.parse().ok()) {
        w.set_shape(shape);
    }
    if let Some(r) = number(m, "radius").or_else(|| number(m, "rounded")) {
        w.set_rounded(r);
    }

    if let Some(p) = m.attr_any(&["pos", "position"]) {
        w.set_position(p.parse().unwrap_or(Position::Center));
    }
    if let (Some(x), Some(y)) = (number(m, "x"), number(m, "y")) {
        w.set_position_xy(x, y);
    }

    if let Some((c, width)) = m.attr("border").and_then(attrs::border) {
        w.set_border(c, width);
    }
    if let (Some(c), Some(width)) = (color(m, "border-color"), number(m, "border-width")) {
        w.set_border(c, width);
    }

    if let Some(o) = number(m, "opacity") {
        w.set_opacity(o);
    }
    if let Some(on) = flag(m, "glass") {
        w.set_glass(on);
    }
    if let Some(r) = number(m, "blur") {
        w.set_blur(BlurMode::Glass, r);
    }
    if let Some((c, intensity)) = m.attr("glow").and_then(attrs::color_and_number) {
        w.set_glow(c, intensity.unwrap_or(DEFAULT_GLOW_INTENSITY));
    }
    if let Some((c, blur, ox, oy)) = m.attr("shadow").and_then(attrs::shadow) {
        w.set_shadow(c, blur, ox, oy);
    }

    if let Some(on) = flag(m, "draggable") {
        w.set_draggable(on);
    }
    if let Some(on) = flag(m, "always-on-top") {
        w.set_always_on_top(on);
    }
    if let Some(on) = flag(m, "click-through") {
        w.set_click_through(on);
    }
    if let Some(kind) = m.attr("window-type").and_then(|s| s.parse().ok()) {
        w.set_window_type(kind);
    }

    if let Some(v) = number(m, "margin") {
        w.set_margins(Edges::all(v));
    }
    if let Some(v) = number(m, "padding") {
        w.set_padding(v);
    }
    if let Some(v) = number(m, "spacing") {
        w.set_spacing(v);
    }
    if let Some(ms) = number(m, "update-interval") {
        w.set_update_interval(std::time::Duration::from_millis(ms.max(0.0) as u64));
    }
    if let Some(class) = m.attr("class") {
        w.set_style_class(class);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use milk_engine::geometry::Shape;
    use milk_engine::paint::Color;

    use crate::milk_widget::Effect;
    use crate::widgets::{ProgressBar, Text};

    #[test]
    fn progress_colors_from_xml() {
        let mut loader = XmlLoader::new();
        let widgets =
            loader.parse_str(r##"<widget width="320" height="200"><progress id="cpu" bg="#333" color="#FF6B6B"/></widget>"##);
        assert_eq!(widgets.len(), 1);
        let w = &widgets[0];
        assert_eq!(w.size().x, 320.0);
        assert_eq!(w.size().y, 200.0);
        assert_eq!(w.content().len(), 1);
        let bar = w.child::<ProgressBar>("cpu").unwrap();
        assert_eq!(bar.background(), Color::rgb(51, 51, 51));
        assert_eq!(bar.fill(), Color::rgb(255, 107, 107));
    }

    #[test]
    fn collection_roots() {
        let mut loader = XmlLoader::new();
        let xml = r#"<milk><widget/><note/><widget width="100"/></milk>"#;
        let widgets = loader.parse_str(xml);
        assert_eq!(widgets.len(), 2);
        assert_eq!(widgets[1].width(), 100.0);
        assert_eq!(loader.parse_str("<widgets></widgets>").len(), 0);
        assert!(loader.last_error().is_none());
    }

    #[test]
    fn syntax_error_is_reported() {
        let mut loader = XmlLoader::new();
        assert!(loader.parse_str("<widget>\n  <text>hi</label>\n</widget>").is_empty());
        let msg = loader.last_error().unwrap();
        assert!(msg.starts_with("XML parse error at line 2, column "), "{msg}");
    }

    #[test]
    fn unexpected_root_is_an_error() {
        let mut loader = XmlLoader::new();
        assert!(loader.parse_str("<html/>").is_empty());
        assert!(loader.last_error().unwrap().contains("html"));
    }

    #[test]
    fn missing_file() {
        let mut loader = XmlLoader::new();
        assert!(loader.parse_file("/nonexistent/w.xml").is_empty());
        assert_eq!(loader.last_error(), Some("Cannot open file: /nonexistent/w.xml"));
    }

    #[test]
    fn widget_attributes() {
        let mut loader = XmlLoader::new();
        let xml = r##"<widget width="300" height="200" bg="#102030" shape="circle" pos="bottom-right"
            border="2px #fff" opacity="0.8" glow="#0ff 20" draggable="false" click-through="true"
            spacing="4" class="panel"/>"##;
        let w = loader.parse_str(xml).remove(0);
        assert_eq!(w.background(), Color::rgb(16, 32, 48));
        assert_eq!(w.shape(), Shape::Circle);
        assert_eq!(w.size().x, 200.0);
        assert_eq!(w.position(), Position::BottomRight);
        assert_eq!(w.border().map(|b| b.width), Some(2.0));
        assert_eq!(w.opacity(), 0.8);
        assert_eq!(w.effect(), Effect::Glow { color: Color::CYAN, blur: 40.0 });
        assert!(!w.is_draggable());
        assert!(w.is_click_through());
        assert_eq!(w.content().get_spacing(), 4.0);
        assert_eq!(w.style_class(), Some("panel"));
    }

    #[test]
    fn xy_switches_to_manual() {
        let mut loader = XmlLoader::new();
        let w = loader.parse_str(r#"<widget pos="top-left" x="10" y="20"/>"#).remove(0);
        assert_eq!(w.position(), Position::Manual);
        assert_eq!(w.pos().x, 10.0);
    }

    #[test]
    fn glass_lowers_alpha() {
        let mut loader = XmlLoader::new();
        let w = loader.parse_str(r#"<widget glass="true"/>"#).remove(0);
        assert_eq!(w.background().a, 100);
    }

    #[test]
    fn to_xml_reloads() {
        let mut original = MilkWidget::new(240.0, 120.0);
        original.set_background(Color::rgb(1, 2, 3));
        original.set_rounded(8.0);
        let mut loader = XmlLoader::new();
        let w = loader.parse_str(&original.to_xml()).remove(0);
        assert_eq!(w.size(), original.size());
        assert_eq!(w.background(), original.background());
        assert_eq!(w.corner_radius(), 8.0);
    }

    #[test]
    fn custom_tags() {
        let mut loader = XmlLoader::new();
        loader.register("greeting", |m, _| Some(Text::new(format!("hello {}", m.attr("who").unwrap_or("?"))).into()));
        let w = loader.parse_str(r#"<widget><greeting id="g" who="milk"/></widget>"#).remove(0);
        assert_eq!(w.child::<Text>("g").map(Text::text), Some("hello milk"));
    }

    #[test]
    fn image_paths_resolve_against_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("w.xml");
        std::fs::write(&path, r#"<widget><img id="logo" src="logo.png"/></widget>"#).unwrap();
        let mut loader = XmlLoader::new();
        let w = loader.parse_file(&path).remove(0);
        let img = w.child::<crate::widgets::Image>("logo").unwrap();
        let expected = std::fs::canonicalize(dir.path()).unwrap().join("logo.png");
        assert_eq!(img.source(), Some(expected.as_path()));
    }
}
