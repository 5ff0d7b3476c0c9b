//! The top-level desktop widget: one frameless window with a shaped,
//! styled background and a tree of child components.
//!
//! A `MilkWidget` is a pure state machine. It never talks to a window system
//! itself; the [`Application`](crate::Application) ticks it, routes pointer
//! input to it and hands its [`WindowRequest`] plus draw list to a host
//! [`Surface`](crate::app::Surface).

mod drag;
mod effect;
mod position;
mod signal;
mod update;
mod window;

pub use drag::{DragOutcome, DragState};
pub use effect::{glass_shadow, Effect};
pub use position::{Position, ScreenGeometry};
pub use signal::{AnimationKind, WidgetSignal};
pub use update::{UpdateCtx, UpdateFn};
pub use window::{WindowFlags, WindowRequest, WindowType};

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::NaiveDateTime;
use milk_engine::anim::presets::{self, SlideEdge};
use milk_engine::anim::{props, AnimHandle, AnimTarget, AnimationEngine, Easing, SharedEngine, TargetId, Tween};
use milk_engine::coords::{Rect, Vec2};
use milk_engine::geometry::{Outline, Shape};
use milk_engine::paint::{Color, Gradient, Paint};
use milk_engine::scene::{Border, DrawList, ImageData};
use milk_engine::time::IntervalTimer;

use crate::constraints::{Edges, LayoutCtx};
use crate::error::{MilkError, Result};
use crate::event::UiEvent;
use crate::mailbox::Mailbox;
use crate::painter::Painter;
use crate::providers::Services;
use crate::style::{BlurMode, ShadowSpec, StyleSheet};
use crate::widget::{Element, Widget};
use crate::widgets::picture::decode_file;
use crate::widgets::{Container, Text};

// ── defaults ──────────────────────────────────────────────────────────────

pub const DEFAULT_SIZE: Vec2 = Vec2::new(300.0, 200.0);
pub const DEFAULT_BACKGROUND: Color = Color::rgba(30, 30, 40, 220);
pub const DEFAULT_MARGIN: f32 = 15.0;
pub const DEFAULT_SPACING: f32 = 8.0;
pub const DEFAULT_SCREEN_MARGIN: f32 = 50.0;
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_millis(1000);
/// Duration of the fades run by `show` and `hide`.
pub const VISIBILITY_FADE: Duration = Duration::from_millis(200);

/// Glass backgrounds more opaque than this are thinned to `GLASS_ALPHA`.
const GLASS_ALPHA_LIMIT: u8 = 150;
const GLASS_ALPHA: u8 = 100;

// ── WidgetId ──────────────────────────────────────────────────────────────

/// Process-unique identity of a widget, used to address mailbox posts.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct WidgetId(u64);

impl WidgetId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        WidgetId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Pointer input in screen coordinates, as delivered by the host.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointerEvent {
    Enter,
    Leave,
    Move(Vec2),
    Press(Vec2),
    Release(Vec2),
}

// ── MilkWidget ────────────────────────────────────────────────────────────

/// A themeable overlay widget.
///
/// Geometry is in screen coordinates. Children live in a vertical root
/// [`Container`] (margins 15, spacing 8) and are laid out in widget-local
/// coordinates at paint time.
///
/// Animations need an engine: until [`attach`](Self::attach) is called every
/// animation method is a no-op and `show`/`hide` switch visibility at once.
pub struct MilkWidget {
    id: WidgetId,
    geometry: Rect,
    min_size: Vec2,
    max_size: Option<Vec2>,
    position: Position,
    screen: ScreenGeometry,
    screen_margin: f32,

    shape: Shape,
    corner_radius: f32,
    background: Color,
    background_gradient: Option<Gradient>,
    background_image: Option<PathBuf>,
    background_pixels: Option<Rc<ImageData>>,
    border: Option<Border>,
    effect: Effect,
    /// Configured opacity; fades run towards it.
    opacity: f32,
    /// Opacity currently presented, including running fades.
    window_opacity: f32,

    window_type: WindowType,
    flags: WindowFlags,
    draggable: bool,
    visible: bool,

    root: Container,
    style: StyleSheet,
    class: Option<String>,

    target: AnimTarget,
    engine: Option<SharedEngine>,
    /// Running animations that report completion, by slot name.
    pending: HashMap<&'static str, AnimationKind>,

    update_timer: IntervalTimer,
    /// Set once the interval was chosen for this widget rather than inherited.
    custom_interval: bool,
    on_update: Option<UpdateFn>,
    on_click: Option<Box<dyn FnMut()>>,
    on_hover: Option<Box<dyn FnMut(bool)>>,
    on_fade: Option<Box<dyn FnMut()>>,

    drag: DragState,
    /// Pointer in widget-local coordinates while inside the window.
    pointer: Option<Vec2>,
    pointer_down: bool,
    hovered: bool,

    signals: Vec<WidgetSignal>,
}

impl MilkWidget {
    pub fn new(width: f32, height: f32) -> Self {
        let size = Vec2::new(width.max(0.0), height.max(0.0));
        let mut w = Self {
            id: WidgetId::next(),
            geometry: Rect::from_origin_size(Vec2::zero(), size),
            min_size: Vec2::zero(),
            max_size: None,
            position: Position::Center,
            screen: ScreenGeometry::default(),
            screen_margin: DEFAULT_SCREEN_MARGIN,
            shape: Shape::Rectangle,
            corner_radius: 0.0,
            background: DEFAULT_BACKGROUND,
            background_gradient: None,
            background_image: None,
            background_pixels: None,
            border: None,
            effect: Effect::None,
            opacity: 1.0,
            window_opacity: 1.0,
            window_type: WindowType::Normal,
            flags: WindowType::Normal.flags(),
            draggable: true,
            visible: false,
            root: Container::vertical().margins(Edges::all(DEFAULT_MARGIN)).spacing(DEFAULT_SPACING),
            style: StyleSheet::default(),
            class: None,
            target: AnimTarget::new(),
            engine: None,
            pending: HashMap::new(),
            update_timer: IntervalTimer::new(DEFAULT_UPDATE_INTERVAL),
            custom_interval: false,
            on_update: None,
            on_click: None,
            on_hover: None,
            on_fade: None,
            drag: DragState::Idle,
            pointer: None,
            pointer_down: false,
            hovered: false,
            signals: vec![WidgetSignal::Created],
        };
        w.update_position();
        w
    }

    pub fn circle(diameter: f32) -> Self {
        let mut w = Self::new(diameter, diameter);
        w.set_shape(Shape::Circle);
        w
    }

    pub fn square(size: f32) -> Self {
        let mut w = Self::new(size, size);
        w.set_shape(Shape::Square);
        w
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Identity of this widget's animation target.
    pub fn target_id(&self) -> TargetId {
        self.target.id()
    }

    // ── engine ────────────────────────────────────────────────────────────

    /// Connects the widget to an animation engine, enabling animations.
    pub fn attach(&mut self, engine: SharedEngine) {
        self.engine = Some(engine);
        self.push_to_target();
    }

    /// Cancels running animations and disconnects from the engine.
    pub fn detach(&mut self) {
        self.stop_animations();
        self.engine = None;
    }

    pub fn is_attached(&self) -> bool {
        self.engine.is_some()
    }

    // ── shape & geometry ──────────────────────────────────────────────────

    /// Circle and Square force a square size, using the shorter side.
    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
        if shape.is_square_locked() {
            let s = self.geometry.width().min(self.geometry.height());
            self.apply_size(Vec2::splat(s));
        }
    }

    /// Rounded-rect outline with corner radius `radius`.
    pub fn set_rounded(&mut self, radius: f32) {
        self.corner_radius = radius.max(0.0);
        self.shape = Shape::RoundedRect;
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        let mut size = Vec2::new(width.max(0.0), height.max(0.0));
        if self.shape.is_square_locked() {
            size = Vec2::splat(size.x.min(size.y));
        }
        self.apply_size(size);
    }

    pub fn set_min_size(&mut self, width: f32, height: f32) {
        self.min_size = Vec2::new(width.max(0.0), height.max(0.0));
        self.apply_size(self.geometry.size);
    }

    pub fn set_max_size(&mut self, width: f32, height: f32) {
        self.max_size = Some(Vec2::new(width.max(0.0), height.max(0.0)));
        self.apply_size(self.geometry.size);
    }

    fn apply_size(&mut self, size: Vec2) {
        let mut s = Vec2::new(size.x.max(self.min_size.x), size.y.max(self.min_size.y));
        if let Some(max) = self.max_size {
            s = Vec2::new(s.x.min(max.x), s.y.min(max.y));
        }
        if self.shape.is_square_locked() {
            s = Vec2::splat(s.x.min(s.y));
        }
        self.geometry.size = s;
        self.update_position();
        self.push_to_target();
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    pub fn size(&self) -> Vec2 {
        self.geometry.size
    }

    pub fn width(&self) -> f32 {
        self.geometry.width()
    }

    pub fn height(&self) -> f32 {
        self.geometry.height()
    }

    /// Screen-space window rect.
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    pub fn pos(&self) -> Vec2 {
        self.geometry.origin
    }

    /// Window rect in widget-local coordinates.
    pub fn local_rect(&self) -> Rect {
        Rect::from_origin_size(Vec2::zero(), self.geometry.size)
    }

    /// Paint and hit mask in widget-local coordinates.
    pub fn outline(&self) -> Outline {
        Outline::resolve(self.shape, self.corner_radius, self.local_rect())
    }

    // ── positioning ───────────────────────────────────────────────────────

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
        self.update_position();
    }

    /// Manual placement; the widget stops following its anchor.
    pub fn set_position_xy(&mut self, x: f32, y: f32) {
        self.position = Position::Manual;
        self.geometry.origin = Vec2::new(x, y);
        self.push_to_target();
    }

    pub fn set_screen_margin(&mut self, margin: f32) {
        self.screen_margin = margin;
        self.update_position();
    }

    pub fn set_screen(&mut self, screen: ScreenGeometry) {
        self.screen = screen;
        self.update_position();
    }

    pub fn center(&mut self) {
        self.set_position(Position::Center);
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn screen_margin(&self) -> f32 {
        self.screen_margin
    }

    pub fn screen(&self) -> &ScreenGeometry {
        &self.screen
    }

    fn update_position(&mut self) {
        if let Some(origin) = self.position.origin(self.geometry.size, self.screen_margin, &self.screen) {
            self.geometry.origin = origin;
            self.push_to_target();
        }
    }

    // ── background & border ───────────────────────────────────────────────

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
        self.background_gradient = None;
    }

    pub fn set_background_gradient(&mut self, start: Color, end: Color, angle: f32) {
        self.background_gradient = Some(Gradient::new(start, end, angle));
    }

    /// Loads an image drawn over the background, clipped to the outline.
    /// On failure the previous image is dropped and the error returned.
    pub fn set_background_image(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.clear_background_image();
        let pixels = decode_file(path)?;
        self.background_image = Some(path.to_path_buf());
        self.background_pixels = Some(Rc::new(pixels));
        Ok(())
    }

    pub fn clear_background_image(&mut self) {
        self.background_image = None;
        self.background_pixels = None;
    }

    /// A zero width removes the border.
    pub fn set_border(&mut self, color: Color, width: f32) {
        self.border = (width > 0.0).then(|| Border::new(width, color));
    }

    pub fn remove_border(&mut self) {
        self.border = None;
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn background_gradient(&self) -> Option<Gradient> {
        self.background_gradient
    }

    pub fn background_image(&self) -> Option<&Path> {
        self.background_image.as_deref()
    }

    pub fn border(&self) -> Option<&Border> {
        self.border.as_ref()
    }

    /// Configured opacity, clamped to `[0, 1]`. Also sets the presented
    /// opacity, cutting short any visible fade.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
        self.window_opacity = self.opacity;
        self.target.set(props::OPACITY, self.window_opacity);
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn window_opacity(&self) -> f32 {
        self.window_opacity
    }

    // ── effects ───────────────────────────────────────────────────────────

    pub fn set_shadow(&mut self, color: Color, blur: f32, offset_x: f32, offset_y: f32) {
        self.effect = Effect::Shadow(ShadowSpec::new(color, blur, Vec2::new(offset_x, offset_y)));
    }

    pub fn set_shadow_spec(&mut self, spec: ShadowSpec) {
        self.effect = Effect::Shadow(spec);
    }

    /// Clears the effect slot, whatever it held.
    pub fn remove_shadow(&mut self) {
        self.effect = Effect::None;
    }

    pub fn set_glow(&mut self, color: Color, intensity: f32) {
        self.effect = Effect::glow(color, intensity);
    }

    pub fn remove_glow(&mut self) {
        self.remove_shadow();
    }

    /// Installs the blur stand-in and thins an opaque background.
    pub fn set_blur(&mut self, mode: BlurMode, radius: f32) {
        self.effect = Effect::blur(mode, radius);
        if !self.effect.is_none() && self.background.a > GLASS_ALPHA_LIMIT {
            self.background = self.background.with_alpha(GLASS_ALPHA);
        }
    }

    pub fn set_glass(&mut self, enabled: bool) {
        let mode = if enabled { BlurMode::Glass } else { BlurMode::None };
        self.set_blur(mode, 10.0);
    }

    pub fn effect(&self) -> Effect {
        self.effect
    }

    // ── window behaviour ──────────────────────────────────────────────────

    /// Replaces the stacking and input flags with the ones `kind` implies.
    pub fn set_window_type(&mut self, kind: WindowType) {
        self.window_type = kind;
        let implied = kind.flags();
        self.flags = WindowFlags { sticky: self.flags.sticky, skip_pager: self.flags.skip_pager, ..implied };
    }

    pub fn window_type(&self) -> WindowType {
        self.window_type
    }

    pub fn set_draggable(&mut self, on: bool) {
        self.draggable = on;
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    pub fn set_click_through(&mut self, on: bool) {
        self.flags.input_transparent = on;
    }

    pub fn is_click_through(&self) -> bool {
        self.flags.input_transparent
    }

    pub fn set_always_on_top(&mut self, on: bool) {
        self.flags.stay_on_top = on;
        if on {
            self.flags.stay_on_bottom = false;
        }
    }

    pub fn set_sticky(&mut self, on: bool) {
        self.flags.sticky = on;
    }

    pub fn set_skip_taskbar(&mut self, on: bool) {
        self.flags.skip_taskbar = on;
    }

    pub fn set_skip_pager(&mut self, on: bool) {
        self.flags.skip_pager = on;
    }

    pub fn flags(&self) -> WindowFlags {
        self.flags
    }

    /// Placement request for the host surface.
    pub fn window_request(&self) -> WindowRequest {
        WindowRequest {
            geometry: self.geometry,
            opacity: self.window_opacity,
            visible: self.visible,
            flags: self.flags,
            mask: self.outline(),
        }
    }

    // ── visibility ────────────────────────────────────────────────────────

    /// Makes the widget visible and fades it in.
    pub fn show(&mut self) {
        self.visible = true;
        if self.is_attached() {
            self.fade_in(VISIBILITY_FADE, Easing::OutCubic);
        } else {
            self.window_opacity = self.opacity;
        }
        self.signals.push(WidgetSignal::Shown);
    }

    /// Fades out, then hides. Without an engine the widget hides at once.
    pub fn hide(&mut self) {
        if self.is_attached() {
            self.fade_out(VISIBILITY_FADE, Easing::OutCubic);
        } else {
            self.set_hidden();
        }
    }

    pub fn toggle(&mut self) {
        if self.visible { self.hide() } else { self.show() }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// True between `hide` and the end of its fade.
    pub fn is_hiding(&self) -> bool {
        matches!(self.pending.get(presets::FADE), Some(AnimationKind::FadeOut))
            || matches!(self.pending.get(presets::SLIDE), Some(AnimationKind::SlideOut))
    }

    fn set_hidden(&mut self) {
        if self.visible {
            self.visible = false;
            self.signals.push(WidgetSignal::Hidden);
        }
    }

    // ── animations ────────────────────────────────────────────────────────

    fn play(
        &mut self,
        kind: Option<(&'static str, AnimationKind)>,
        start: impl FnOnce(&mut AnimationEngine, &AnimTarget) -> AnimHandle,
    ) -> Option<AnimHandle> {
        let engine = self.engine.clone()?;
        self.push_to_target();
        let handle = start(&mut engine.borrow_mut(), &self.target);
        match kind {
            Some((slot, kind)) => {
                self.pending.insert(slot, kind);
            }
            None => {
                let slot = handle.name.as_str();
                self.pending.retain(|s, _| *s != slot);
            }
        }
        Some(handle)
    }

    /// Fades from transparent to the configured opacity.
    pub fn fade_in(&mut self, duration: Duration, easing: Easing) -> Option<AnimHandle> {
        let end = self.opacity;
        let handle = self.play(Some((presets::FADE, AnimationKind::FadeIn)), |engine, target| {
            target.set(props::OPACITY, 0.0);
            engine.play(target, presets::FADE, Tween::new(props::OPACITY, end, duration).from(0.0).easing(easing))
        })?;
        self.window_opacity = 0.0;
        Some(handle)
    }

    /// Fades to transparent, then hides the widget.
    pub fn fade_out(&mut self, duration: Duration, easing: Easing) -> Option<AnimHandle> {
        self.play(Some((presets::FADE, AnimationKind::FadeOut)), |engine, target| {
            engine.play(target, presets::FADE, Tween::new(props::OPACITY, 0.0, duration).easing(easing))
        })
    }

    /// Fades the presented opacity to `opacity` without changing visibility.
    pub fn fade_to(&mut self, opacity: f32, duration: Duration, easing: Easing) -> Option<AnimHandle> {
        let end = opacity.clamp(0.0, 1.0);
        self.play(None, |engine, target| {
            engine.play(target, presets::FADE, Tween::new(props::OPACITY, end, duration).easing(easing))
        })
    }

    /// Grows to 1.05× about the centre and settles back with a bounce.
    pub fn bounce(&mut self, duration: Duration) -> Option<AnimHandle> {
        let current = self.geometry;
        let bounced = Rect::from_center(current.center(), current.size * 1.05);
        self.play(Some((presets::BOUNCE, AnimationKind::Bounce)), |engine, target| {
            let tween = Tween::new(props::GEOMETRY, current, duration)
                .from(current)
                .key(0.5, bounced)
                .easing(Easing::OutBounce);
            engine.play(target, presets::BOUNCE, tween)
        })
    }

    /// Dips the opacity to 70% and back, forever.
    pub fn pulse(&mut self, duration: Duration) -> Option<AnimHandle> {
        let base = self.opacity;
        self.play(None, |engine, target| {
            let tween = Tween::new(props::OPACITY, base, duration)
                .from(base)
                .key(0.5, base * 0.7)
                .easing(Easing::InOutQuad)
                .loops(-1);
            engine.play(target, presets::PULSE, tween)
        })
    }

    pub fn shake(&mut self, duration: Duration, intensity: f32) -> Option<AnimHandle> {
        self.play(Some((presets::SHAKE, AnimationKind::Shake)), |engine, target| {
            presets::shake(engine, target, duration, intensity)
        })
    }

    /// Resizes about the centre to `scale`× the current size.
    pub fn scale_to(&mut self, scale: f32, duration: Duration) -> Option<AnimHandle> {
        self.play(Some((presets::SCALE, AnimationKind::Scale)), |engine, target| {
            presets::scale(engine, target, 1.0, scale, duration)
        })
    }

    pub fn move_to(&mut self, x: f32, y: f32, duration: Duration, easing: Easing) -> Option<AnimHandle> {
        self.play(None, |engine, target| presets::move_to(engine, target, Vec2::new(x, y), duration, easing))
    }

    /// Shows the widget by sliding it from beyond the screen edge nearest
    /// `from` to its anchored position.
    pub fn slide_in(&mut self, from: Position, duration: Duration) -> Option<AnimHandle> {
        self.engine.as_ref()?;
        if let Some(origin) = self.position.origin(self.geometry.size, self.screen_margin, &self.screen) {
            self.geometry.origin = origin;
        }
        self.visible = true;
        self.window_opacity = self.opacity;
        let screen = self.screen.size();
        let handle = self.play(Some((presets::SLIDE, AnimationKind::SlideIn)), |engine, target| {
            presets::slide_in(engine, target, from.slide_edge(), screen, duration)
        })?;
        self.sync_animated();
        Some(handle)
    }

    /// Slides beyond the screen edge nearest `to`, then hides.
    pub fn slide_out(&mut self, to: Position, duration: Duration) -> Option<AnimHandle> {
        let screen = self.screen.size();
        let edge: SlideEdge = to.slide_edge();
        self.play(Some((presets::SLIDE, AnimationKind::SlideOut)), |engine, target| {
            presets::slide_out(engine, target, edge, screen, duration)
        })
    }

    pub fn stop_animation(&mut self, slot: &str) {
        if let Some(engine) = &self.engine {
            engine.borrow_mut().stop(self.target.id(), slot);
        }
        self.pending.retain(|s, _| *s != slot);
    }

    pub fn stop_animations(&mut self) {
        if let Some(engine) = &self.engine {
            engine.borrow_mut().stop_all(self.target.id());
        }
        self.pending.clear();
    }

    pub fn is_animating(&self) -> bool {
        self.engine.as_ref().is_some_and(|e| e.borrow().is_animating(self.target.id()))
    }

    /// Called after fade-in and fade-out complete.
    pub fn set_animation_callback(&mut self, f: impl FnMut() + 'static) {
        self.on_fade = Some(Box::new(f));
    }

    /// Reads animated values back after the engine advanced. Returns true
    /// when anything visible changed.
    pub fn sync_animated(&mut self) -> bool {
        let mut changed = false;
        if let Some(o) = self.target.scalar(props::OPACITY) {
            let o = o.clamp(0.0, 1.0);
            if o != self.window_opacity {
                self.window_opacity = o;
                changed = true;
            }
        }

        let geometry = self.target.get(props::GEOMETRY).and_then(|v| v.as_rect());
        let pos = self.target.get(props::POS).and_then(|v| v.as_point());
        if let Some(g) = geometry.filter(|g| *g != self.geometry) {
            self.geometry = g;
            changed = true;
        } else if let Some(p) = pos.filter(|p| *p != self.geometry.origin) {
            self.geometry.origin = p;
            changed = true;
        }
        if changed {
            self.push_to_target();
        }
        changed
    }

    /// Handles completion of the animation in `slot`.
    pub fn on_animation_finished(&mut self, slot: &str) {
        let Some(kind) = self.pending.remove(slot) else {
            return;
        };
        log::trace!("widget {} finished {kind:?}", self.id);
        match kind {
            AnimationKind::FadeOut | AnimationKind::SlideOut => self.set_hidden(),
            _ => {}
        }
        if matches!(kind, AnimationKind::FadeIn | AnimationKind::FadeOut) {
            if let Some(f) = &mut self.on_fade {
                f();
            }
        }
        self.signals.push(WidgetSignal::AnimationFinished(kind));
    }

    fn push_to_target(&self) {
        self.target.set(props::GEOMETRY, self.geometry);
        self.target.set(props::POS, self.geometry.origin);
        self.target.set(props::OPACITY, self.window_opacity);
    }

    // ── children & layout ─────────────────────────────────────────────────

    pub fn add(&mut self, child: impl Into<Element>) {
        self.root.push(child);
    }

    pub fn add_spacing(&mut self, size: f32) {
        self.root.add_spacing(size);
    }

    pub fn add_stretch(&mut self) {
        self.root.add_stretch();
    }

    pub fn set_margin(&mut self, margin: f32) {
        self.root.set_margins(Edges::all(margin));
    }

    pub fn set_margins(&mut self, edges: Edges) {
        self.root.set_margins(edges);
    }

    /// Same as [`set_margin`](Self::set_margin); the widget has one inner box.
    pub fn set_padding(&mut self, padding: f32) {
        self.set_margin(padding);
    }

    pub fn set_spacing(&mut self, spacing: f32) {
        self.root.set_spacing(spacing);
    }

    pub fn content(&self) -> &Container {
        &self.root
    }

    pub fn content_mut(&mut self) -> &mut Container {
        &mut self.root
    }

    pub fn find(&self, id: &str) -> Option<&Element> {
        self.root.elements().iter().find_map(|e| e.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.root.elements_mut().iter_mut().find_map(|e| e.find_mut(id))
    }

    /// Descendant `id` downcast to `W`.
    pub fn child<W: Widget>(&self, id: &str) -> Option<&W> {
        self.find(id)?.downcast_ref::<W>()
    }

    pub fn child_mut<W: Widget>(&mut self, id: &str) -> Option<&mut W> {
        self.find_mut(id)?.downcast_mut::<W>()
    }

    // ── style ─────────────────────────────────────────────────────────────

    /// Applies the set fields of `sheet` on top of the current style.
    ///
    /// Box properties go to the widget, text properties to every [`Text`]
    /// descendant, padding plus margin to the content margins.
    pub fn set_style(&mut self, sheet: &StyleSheet) {
        self.style = self.style.merge(sheet);

        if let Some(c) = sheet.background {
            self.set_background(c);
        }
        if let Some(g) = sheet.background_gradient {
            self.background_gradient = Some(g);
        }
        if let Some(path) = &sheet.background_image {
            if let Err(e) = self.set_background_image(path) {
                log::warn!("widget {}: {e}", self.id);
            }
        }
        if let Some(r) = sheet.corner_radius.filter(|r| *r > 0.0) {
            self.set_rounded(r);
        }
        if let Some(w) = sheet.border_width {
            let color = sheet.border_color.or(self.border.as_ref().map(|b| b.color)).unwrap_or(Color::WHITE);
            self.set_border(color, w);
        } else if let (Some(c), Some(b)) = (sheet.border_color, self.border.as_mut()) {
            b.color = c;
        }
        if let Some(s) = sheet.shadow {
            self.set_shadow_spec(s);
        }
        if let Some(o) = sheet.opacity {
            self.set_opacity(o);
        }
        if let Some(mode) = sheet.blur_mode.filter(|m| *m != BlurMode::None) {
            self.set_blur(mode, sheet.blur_radius.unwrap_or(10.0));
        }
        if let Some(m) = sheet.content_margins() {
            self.root.set_margins(m);
        }

        for child in self.root.elements_mut() {
            child.walk_mut(&mut |e| {
                if let Some(t) = e.downcast_mut::<Text>() {
                    t.apply_style(sheet);
                }
            });
        }
    }

    pub fn style(&self) -> &StyleSheet {
        &self.style
    }

    pub fn set_style_class(&mut self, class: impl Into<String>) {
        self.class = Some(class.into());
    }

    pub fn style_class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    // ── callbacks & signals ───────────────────────────────────────────────

    pub fn on_click(&mut self, f: impl FnMut() + 'static) {
        self.on_click = Some(Box::new(f));
    }

    pub fn on_hover(&mut self, f: impl FnMut(bool) + 'static) {
        self.on_hover = Some(Box::new(f));
    }

    /// Installs the periodic update callback and starts its timer.
    pub fn on_update(&mut self, f: impl FnMut(&mut UpdateCtx<'_>) + 'static) {
        self.on_update = Some(Box::new(f));
        if !self.update_timer.is_running() {
            self.update_timer.start();
        }
    }

    pub fn set_update_interval(&mut self, interval: Duration) {
        self.update_timer.set_period(interval);
        self.custom_interval = true;
    }

    /// Takes an interval from the application without marking it as the
    /// widget's own.
    pub(crate) fn inherit_update_interval(&mut self, interval: Duration) {
        if !self.custom_interval {
            self.update_timer.set_period(interval);
        }
    }

    /// True when [`set_update_interval`](Self::set_update_interval) was
    /// called; an application only hands its global interval to widgets
    /// without one.
    pub fn has_custom_update_interval(&self) -> bool {
        self.custom_interval
    }

    pub fn update_interval(&self) -> Duration {
        self.update_timer.period()
    }

    /// Stops the update timer and drops the callback.
    pub fn stop_updates(&mut self) {
        self.update_timer.stop();
        self.on_update = None;
    }

    /// Runs the update callback now, outside the timer.
    pub fn update_now(&mut self, services: &Services, mailbox: &Mailbox) {
        if let Some(f) = &mut self.on_update {
            f(&mut UpdateCtx::new(services, mailbox, self.id, &mut self.root));
        }
    }

    /// Signals emitted since the last call, oldest first.
    pub fn take_signals(&mut self) -> Vec<WidgetSignal> {
        std::mem::take(&mut self.signals)
    }

    // ── tick ──────────────────────────────────────────────────────────────

    /// Advances the update timer and every child. Returns true when a
    /// repaint is needed.
    pub fn tick(&mut self, dt: Duration, services: &Services, mailbox: &Mailbox) -> bool {
        let mut dirty = false;
        if self.on_update.is_some() && self.update_timer.tick(dt) {
            self.update_now(services, mailbox);
            dirty = true;
        }
        for child in self.root.elements_mut() {
            dirty |= child.tick(dt);
        }
        dirty
    }

    // ── input ─────────────────────────────────────────────────────────────

    /// Routes one pointer event. Returns true when the widget used it.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        if self.flags.input_transparent || !self.visible {
            return false;
        }
        let ctx = LayoutCtx::now();
        let rect = self.local_rect();
        let origin = self.geometry.origin;

        match event {
            PointerEvent::Enter => {
                self.set_hovered(true);
                true
            }
            PointerEvent::Leave => {
                self.pointer = None;
                self.root.on_event(&UiEvent::Leave, rect, &ctx);
                self.set_hovered(false);
                true
            }
            PointerEvent::Move(at) => {
                let local = at - origin;
                self.pointer = Some(local);
                if !self.pointer_down {
                    self.root.on_event(&UiEvent::Hover { pos: local }, rect, &ctx);
                    return true;
                }
                if let DragOutcome::MoveTo(o) = self.drag.motion(at, self.draggable) {
                    self.position = Position::Manual;
                    self.geometry.origin = o;
                    self.push_to_target();
                    self.signals.push(WidgetSignal::PositionChanged(o));
                }
                true
            }
            PointerEvent::Press(at) => {
                let local = at - origin;
                if !self.outline().contains(local) {
                    return false;
                }
                self.pointer = Some(local);
                self.pointer_down = true;
                if self.root.on_event(&UiEvent::Press { pos: local }, rect, &ctx).is_consumed() {
                    self.drag.capture();
                } else {
                    self.drag.press(at, origin);
                }
                true
            }
            PointerEvent::Release(at) => {
                if !self.pointer_down {
                    return false;
                }
                let local = at - origin;
                self.pointer_down = false;
                self.root.on_event(&UiEvent::Release { pos: local }, rect, &ctx);
                if self.drag.release() == DragOutcome::Click {
                    if let Some(f) = &mut self.on_click {
                        f();
                    }
                    self.signals.push(WidgetSignal::Clicked);
                }
                true
            }
        }
    }

    fn set_hovered(&mut self, on: bool) {
        if self.hovered == on {
            return;
        }
        self.hovered = on;
        if let Some(f) = &mut self.on_hover {
            f(on);
        }
        self.signals.push(WidgetSignal::Hovered(on));
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    // ── paint ─────────────────────────────────────────────────────────────

    /// Records the widget in local coordinates: effect shadow, background
    /// fill and border, background image, then the children.
    pub fn paint(&self, list: &mut DrawList, now: NaiveDateTime) {
        let rect = self.local_rect();
        let outline = self.outline();
        let mut painter = Painter::new(list, now).with_pointer(self.pointer, self.pointer_down);

        if let Some(s) = self.effect.painted_shadow() {
            painter.shadow(outline, s.color, s.blur, s.offset, s.spread);
        }
        let fill = match &self.background_gradient {
            Some(g) => Paint::gradient(g, rect),
            None => Paint::Solid(self.background),
        };
        painter.background(outline, fill, self.border.clone());
        if let Some(img) = &self.background_pixels {
            painter.background_image(img.clone(), rect, outline);
        }
        self.root.paint(&mut painter, rect);
    }

    // ── serialisation ─────────────────────────────────────────────────────

    /// The widget element with its box attributes; children are not written.
    pub fn to_xml(&self) -> String {
        let mut xml = format!(
            "<widget width=\"{}\" height=\"{}\" background=\"{}\"",
            self.width(),
            self.height(),
            self.background
        );
        if self.corner_radius > 0.0 {
            xml.push_str(&format!(" rounded=\"{}\"", self.corner_radius));
        }
        xml.push_str(">\n</widget>");
        xml
    }

    pub fn to_css(&self) -> String {
        let mut css = String::from(".widget {\n");
        css.push_str(&format!("  background-color: {};\n", self.background));
        css.push_str(&format!("  width: {}px;\n", self.width()));
        css.push_str(&format!("  height: {}px;\n", self.height()));
        if self.corner_radius > 0.0 {
            css.push_str(&format!("  border-radius: {}px;\n", self.corner_radius));
        }
        if let Some(b) = &self.border {
            css.push_str(&format!("  border: {}px solid {};\n", b.width, b.color));
        }
        if let Some(img) = &self.background_image {
            css.push_str(&format!("  background-image: url(\"{}\");\n", img.display()));
        }
        css.push_str("}\n");
        css
    }

    /// Writes an XML declaration followed by [`to_xml`](Self::to_xml).
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let doc = format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}", self.to_xml());
        std::fs::write(path, doc).map_err(|e| MilkError::io(path, e))
    }
}

impl Default for MilkWidget {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE.x, DEFAULT_SIZE.y)
    }
}

impl fmt::Debug for MilkWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MilkWidget")
            .field("id", &self.id)
            .field("geometry", &self.geometry)
            .field("position", &self.position)
            .field("shape", &self.shape)
            .field("visible", &self.visible)
            .field("children", &self.root.len())
            .finish_non_exhaustive()
    }
}
