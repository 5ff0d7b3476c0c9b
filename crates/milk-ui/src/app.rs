use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDateTime;

use milk_engine::anim::{AnimationEngine, SharedEngine};
use milk_engine::scene::DrawList;

use crate::config::{self, AppConfig};
use crate::error::{MilkError, Result};
use crate::loader::XmlLoader;
use crate::mailbox::Mailbox;
use crate::milk_widget::{
    DEFAULT_SCREEN_MARGIN, DEFAULT_UPDATE_INTERVAL, MilkWidget, PointerEvent, ScreenGeometry, WidgetId, WidgetSignal,
    WindowRequest,
};
use crate::providers::Services;
use crate::theme::{self, ThemeManager};
use crate::watcher::{ConfigWatcher, WatchEvent};

// ── Surface ───────────────────────────────────────────────────────────────

/// The windowing backend: receives one window per widget each frame.
///
/// `request` carries geometry, opacity, flags and the input mask; `list` is
/// empty for hidden widgets.
pub trait Surface {
    fn present(&mut self, id: WidgetId, request: &WindowRequest, list: &DrawList);
}

// ── AppEvent ──────────────────────────────────────────────────────────────

/// Notifications queued for the host; drain with [`Application::take_events`].
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    WidgetAdded(WidgetId),
    WidgetRemoved(WidgetId),
    ThemeChanged(String),
    /// A watched file changed and its widgets were rebuilt.
    ConfigReloaded(PathBuf),
    /// A signal raised by one widget.
    Widget(WidgetId, WidgetSignal),
}

// ── Application ───────────────────────────────────────────────────────────

/// Owns every widget plus the services, animation engine, loaders and file
/// watcher they share, and drives them all from [`tick`](Self::tick).
pub struct Application {
    engine: SharedEngine,
    services: Services,
    mailbox: Mailbox,

    widgets: Vec<MilkWidget>,
    /// File each loaded widget came from, for reloading.
    sources: HashMap<WidgetId, PathBuf>,
    /// Every widget file loaded so far, including ones that currently
    /// yield no widgets.
    files: HashSet<PathBuf>,

    loader: XmlLoader,
    themes: ThemeManager,
    watcher: Option<ConfigWatcher>,

    config_dir: Option<PathBuf>,
    theme_dir: Option<PathBuf>,
    auto_reload: bool,
    update_interval: Duration,
    screen: ScreenGeometry,
    screen_margin: f32,

    events: Vec<AppEvent>,
}

impl Application {
    pub fn new() -> Self {
        let config_dir = config::config_dir();
        let theme_dir = config::theme_dir();
        let watcher = match ConfigWatcher::new() {
            Ok(w) => Some(w),
            Err(e) => {
                log::warn!("auto-reload unavailable: {e}");
                None
            }
        };
        Self {
            engine: AnimationEngine::shared(),
            services: Services::default(),
            mailbox: Mailbox::new(),
            widgets: Vec::new(),
            sources: HashMap::new(),
            files: HashSet::new(),
            loader: XmlLoader::new(),
            themes: ThemeManager::with_user_dir(theme_dir.clone()),
            watcher,
            config_dir,
            theme_dir,
            auto_reload: true,
            update_interval: DEFAULT_UPDATE_INTERVAL,
            screen: ScreenGeometry::default(),
            screen_margin: DEFAULT_SCREEN_MARGIN,
            events: Vec::new(),
        }
    }

    /// Application with the settings of `config` applied. The theme and
    /// widget files it names are not loaded; see [`load_config`](Self::load_config).
    pub fn from_config(config: &AppConfig) -> Self {
        let mut app = Self::new();
        app.set_auto_reload(config.auto_reload);
        app.update_interval = config.update_interval();
        app.screen = config.screen.geometry();
        app.screen_margin = config.screen_margin;
        app
    }

    pub fn with_services(mut self, services: Services) -> Self {
        self.services = services;
        self
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn mailbox(&self) -> &Mailbox {
        &self.mailbox
    }

    pub fn engine(&self) -> &SharedEngine {
        &self.engine
    }

    pub fn loader_mut(&mut self) -> &mut XmlLoader {
        &mut self.loader
    }

    pub fn themes(&self) -> &ThemeManager {
        &self.themes
    }

    // ── directories ───────────────────────────────────────────────────────

    pub fn config_dir(&self) -> Option<&Path> {
        self.config_dir.as_deref()
    }

    pub fn set_config_dir(&mut self, dir: impl Into<PathBuf>) {
        self.config_dir = Some(dir.into());
    }

    pub fn theme_dir(&self) -> Option<&Path> {
        self.theme_dir.as_deref()
    }

    /// Sets the user theme directory and adds it to the theme search paths.
    pub fn set_theme_dir(&mut self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        self.themes.add_theme_path(dir.clone());
        self.theme_dir = Some(dir);
    }

    /// Creates the config and theme directories if missing.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.config_dir, &self.theme_dir].into_iter().flatten() {
            std::fs::create_dir_all(dir).map_err(|e| MilkError::io(dir, e))?;
        }
        Ok(())
    }

    // ── loading ───────────────────────────────────────────────────────────

    /// Loads every widget in `path` and registers it. A file that fails to
    /// load yields nothing; the reason is logged and kept as the loader's
    /// last error.
    pub fn load_widgets(&mut self, path: impl AsRef<Path>) -> Vec<WidgetId> {
        let path = absolute(path.as_ref());
        let widgets = self.loader.parse_file(&path);
        let ids: Vec<WidgetId> = widgets.into_iter().map(|w| self.register(w)).collect();
        for id in &ids {
            self.sources.insert(*id, path.clone());
        }
        self.files.insert(path.clone());
        if self.auto_reload {
            self.watch(&path);
        }
        log::info!("{}: {} widget(s)", path.display(), ids.len());
        ids
    }

    /// Loads every `*.xml` and `*.milk` file in `dir`, in name order.
    pub fn load_directory(&mut self, dir: impl AsRef<Path>) -> Result<Vec<WidgetId>> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|e| MilkError::io(dir, e))?;
        let mut files: Vec<PathBuf> = entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && theme::has_widget_extension(p))
            .collect();
        files.sort();
        Ok(files.iter().flat_map(|f| self.load_widgets(f)).collect())
    }

    /// Makes `name_or_path` the current theme, loads its widget files and
    /// styles every widget that has a class.
    pub fn load_theme(&mut self, name_or_path: &str) -> Result<Vec<WidgetId>> {
        let theme = self.themes.load_theme(name_or_path)?.clone();
        if let Some(sheet) = theme.stylesheet.as_deref().filter(|_| self.auto_reload) {
            self.watch(&absolute(sheet));
        }
        let ids = theme.widget_files.iter().flat_map(|f| self.load_widgets(f)).collect();
        self.restyle();
        self.events.push(AppEvent::ThemeChanged(theme.name));
        Ok(ids)
    }

    /// Loads the theme and extra widget files named in `config`.
    pub fn load_config(&mut self, config: &AppConfig) -> Vec<WidgetId> {
        let mut ids = Vec::new();
        if let Some(theme) = &config.theme {
            match self.load_theme(theme) {
                Ok(loaded) => ids.extend(loaded),
                Err(e) => log::warn!("theme {theme:?}: {e}"),
            }
        }
        for path in config.widget_paths() {
            ids.extend(self.load_widgets(path));
        }
        ids
    }

    pub fn last_error(&self) -> Option<&str> {
        self.loader.last_error()
    }

    // ── registry ──────────────────────────────────────────────────────────

    /// Takes ownership of `widget`, attaches it to the engine and places it
    /// on the application's screen. Widgets without an update interval of
    /// their own get the global one.
    pub fn register(&mut self, mut widget: MilkWidget) -> WidgetId {
        let id = widget.id();
        if self.widget(id).is_some() {
            return id;
        }
        widget.attach(self.engine.clone());
        widget.set_screen_margin(self.screen_margin);
        widget.set_screen(self.screen);
        widget.inherit_update_interval(self.update_interval);
        if widget.style_class().is_some() {
            self.themes.css().apply_class(&mut widget);
        }
        self.widgets.push(widget);
        self.events.push(AppEvent::WidgetAdded(id));
        id
    }

    /// Removes the widget, cancelling its animations.
    pub fn unregister(&mut self, id: WidgetId) -> Option<MilkWidget> {
        let index = self.widgets.iter().position(|w| w.id() == id)?;
        let mut widget = self.widgets.remove(index);
        widget.detach();
        self.sources.remove(&id);
        self.events.push(AppEvent::WidgetRemoved(id));
        Some(widget)
    }

    pub fn widgets(&self) -> &[MilkWidget] {
        &self.widgets
    }

    pub fn widget(&self, id: WidgetId) -> Option<&MilkWidget> {
        self.widgets.iter().find(|w| w.id() == id)
    }

    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut MilkWidget> {
        self.widgets.iter_mut().find(|w| w.id() == id)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn show_all(&mut self) {
        self.widgets.iter_mut().for_each(MilkWidget::show);
    }

    pub fn hide_all(&mut self) {
        self.widgets.iter_mut().for_each(MilkWidget::hide);
    }

    pub fn toggle_all(&mut self) {
        self.widgets.iter_mut().for_each(MilkWidget::toggle);
    }

    // ── settings ──────────────────────────────────────────────────────────

    pub fn auto_reload(&self) -> bool {
        self.auto_reload
    }

    pub fn set_auto_reload(&mut self, enabled: bool) {
        self.auto_reload = enabled;
        if let Some(w) = &mut self.watcher {
            w.set_enabled(enabled);
        }
    }

    pub fn global_update_interval(&self) -> Duration {
        self.update_interval
    }

    /// Sets the update interval of every widget that has none of its own.
    pub fn set_global_update_interval(&mut self, interval: Duration) {
        self.update_interval = interval;
        for w in &mut self.widgets {
            w.inherit_update_interval(interval);
        }
    }

    pub fn screen(&self) -> &ScreenGeometry {
        &self.screen
    }

    /// Moves every anchored widget onto the new screen.
    pub fn set_screen(&mut self, screen: ScreenGeometry) {
        self.screen = screen;
        for w in &mut self.widgets {
            w.set_screen(screen);
        }
    }

    pub fn watched_paths(&self) -> Vec<&Path> {
        self.watcher.as_ref().map(ConfigWatcher::watched_paths).unwrap_or_default()
    }

    // ── frame ─────────────────────────────────────────────────────────────

    /// Runs one frame: animations, widget timers, mailbox deliveries and
    /// file reloads, in that order. Returns true when anything needs a
    /// repaint.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let completed = self.engine.borrow_mut().advance(dt);
        let finished = completed.fire();

        let mut dirty = false;
        for w in &mut self.widgets {
            dirty |= w.sync_animated();
            let target = w.target_id();
            for ev in finished.iter().filter(|ev| ev.target == target) {
                w.on_animation_finished(&ev.name);
                dirty = true;
            }
        }

        for w in &mut self.widgets {
            dirty |= w.tick(dt, &self.services, &self.mailbox);
        }
        dirty |= self.mailbox.drain(&mut self.widgets) > 0;

        for w in &mut self.widgets {
            let id = w.id();
            self.events.extend(w.take_signals().into_iter().map(|s| AppEvent::Widget(id, s)));
        }

        let changes = self.watcher.as_mut().map(ConfigWatcher::drain).unwrap_or_default();
        for change in changes {
            if let WatchEvent::FileChanged(path) = change {
                dirty |= self.reload_file(&path);
            }
        }
        dirty
    }

    /// Rebuilds whatever came from `path`: the theme style sheet restyles
    /// every widget, a widget file replaces its widgets. Returns true when
    /// `path` was known.
    pub fn reload_file(&mut self, path: &Path) -> bool {
        let path = absolute(path);
        let path = path.as_path();
        let sheet = self.themes.theme().and_then(|t| t.stylesheet.as_deref()).map(absolute);
        if sheet.as_deref() == Some(path) {
            log::info!("style sheet changed: {}", path.display());
            self.rewatch(path);
            if let Err(e) = self.themes.reload() {
                log::warn!("theme reload: {e}");
                return false;
            }
            self.restyle();
            self.events.push(AppEvent::ConfigReloaded(path.to_path_buf()));
            return true;
        }

        if !self.files.contains(path) {
            return false;
        }
        log::info!("config file changed: {}", path.display());
        self.rewatch(path);
        let stale: Vec<WidgetId> = self.sources.iter().filter(|(_, p)| p.as_path() == path).map(|(id, _)| *id).collect();
        let was_visible = stale.iter().any(|id| self.widget(*id).is_some_and(MilkWidget::is_visible));
        for id in stale {
            self.unregister(id);
        }
        let fresh = self.load_widgets(path);
        if was_visible {
            for id in &fresh {
                if let Some(w) = self.widget_mut(*id) {
                    w.show();
                }
            }
        }
        self.events.push(AppEvent::ConfigReloaded(path.to_path_buf()));
        true
    }

    pub fn take_events(&mut self) -> Vec<AppEvent> {
        std::mem::take(&mut self.events)
    }

    /// Routes a pointer event to one widget.
    pub fn handle_pointer(&mut self, id: WidgetId, event: PointerEvent) -> bool {
        self.widget_mut(id).is_some_and(|w| w.handle_pointer(event))
    }

    // ── painting ──────────────────────────────────────────────────────────

    /// Draw list for one widget at the current local time.
    pub fn paint(&self, id: WidgetId) -> Option<DrawList> {
        self.paint_at(id, chrono::Local::now().naive_local())
    }

    pub fn paint_at(&self, id: WidgetId, now: NaiveDateTime) -> Option<DrawList> {
        let widget = self.widget(id)?;
        let mut list = DrawList::new();
        widget.paint(&mut list, now);
        Some(list)
    }

    /// Hands every widget's window request and draw list to `surface`.
    pub fn present(&self, surface: &mut dyn Surface) {
        let now = chrono::Local::now().naive_local();
        for w in &self.widgets {
            let mut list = DrawList::new();
            if w.is_visible() {
                w.paint(&mut list, now);
            }
            surface.present(w.id(), &w.window_request(), &list);
        }
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn watch(&mut self, path: &Path) {
        let Some(watcher) = &mut self.watcher else {
            return;
        };
        if let Err(e) = watcher.watch(path) {
            log::warn!("cannot watch {}: {e}", path.display());
        }
    }

    fn rewatch(&mut self, path: &Path) {
        if !self.auto_reload {
            return;
        }
        let Some(watcher) = &mut self.watcher else {
            return;
        };
        if let Err(e) = watcher.rewatch(path) {
            log::warn!("cannot watch {}: {e}", path.display());
        }
    }

    fn restyle(&mut self) {
        let css = self.themes.css();
        for w in &mut self.widgets {
            css.apply_class(w);
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("widgets", &self.widgets.len())
            .field("theme", &self.themes.current_theme())
            .field("auto_reload", &self.auto_reload)
            .field("screen", &self.screen)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::milk_widget::Position;
    use crate::widgets::ProgressBar;
    use milk_engine::coords::Vec2;
    use milk_engine::paint::Color;
    use std::fs;

    fn app() -> Application {
        let mut a = Application::new();
        a.set_auto_reload(false);
        a
    }

    fn run(a: &mut Application, total: Duration) {
        let step = Duration::from_millis(16);
        let mut t = Duration::ZERO;
        while t < total {
            a.tick(step);
            t += step;
        }
    }

    #[test]
    fn register_and_unregister_emit_events() {
        let mut a = app();
        let id = a.register(MilkWidget::new(100.0, 100.0));
        assert_eq!(a.register(MilkWidget::new(10.0, 10.0)), a.widgets()[1].id());
        assert!(a.widget(id).unwrap().is_attached());

        let w = a.unregister(id).unwrap();
        assert!(!w.is_attached());
        assert!(a.unregister(id).is_none());
        let events = a.take_events();
        assert_eq!(events[0], AppEvent::WidgetAdded(id));
        assert_eq!(events.last(), Some(&AppEvent::WidgetRemoved(id)));
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn bottom_right_on_default_screen() {
        let mut a = app();
        let mut w = MilkWidget::new(300.0, 200.0);
        w.set_position(Position::BottomRight);
        let id = a.register(w);
        assert_eq!(a.widget(id).unwrap().pos(), Vec2::new(1570.0, 830.0));

        a.set_screen(ScreenGeometry::new(2560.0, 1440.0));
        assert_eq!(a.widget(id).unwrap().pos(), Vec2::new(2210.0, 1190.0));
    }

    #[test]
    fn show_and_hide_run_through_the_engine() {
        let mut a = app();
        let id = a.register(MilkWidget::new(50.0, 50.0));
        a.show_all();
        run(&mut a, Duration::from_millis(300));
        let w = a.widget(id).unwrap();
        assert!(w.is_visible());
        assert_eq!(w.window_opacity(), 1.0);

        a.take_events();
        a.hide_all();
        assert!(a.widget(id).unwrap().is_visible());
        run(&mut a, Duration::from_millis(300));
        assert!(!a.widget(id).unwrap().is_visible());
        assert!(a.take_events().contains(&AppEvent::Widget(id, WidgetSignal::Hidden)));

        a.toggle_all();
        assert!(a.widget(id).unwrap().is_visible());
    }

    #[test]
    fn mailbox_posts_reach_live_widgets_only() {
        let mut a = app();
        let id = a.register(MilkWidget::new(50.0, 50.0));
        let gone = a.register(MilkWidget::new(50.0, 50.0));
        a.unregister(gone);

        a.mailbox().post(id, |w| w.set_background(Color::RED));
        a.mailbox().post(gone, |w| w.set_background(Color::RED));
        assert!(a.tick(Duration::from_millis(1)));
        assert_eq!(a.widget(id).unwrap().background(), Color::RED);
        assert!(a.mailbox().is_empty());
    }

    #[test]
    fn global_interval_drives_updates() {
        let mut a = app();
        let mut w = MilkWidget::new(100.0, 40.0);
        w.add(crate::widget::Element::new(ProgressBar::new()).with_id("bar"));
        w.on_update(|ctx| {
            if let Some(bar) = ctx.child_mut::<ProgressBar>("bar") {
                bar.set_value(bar.value() + 10.0);
            }
        });
        let id = a.register(w);
        a.set_global_update_interval(Duration::from_millis(100));
        assert_eq!(a.widget(id).unwrap().update_interval(), Duration::from_millis(100));

        a.tick(Duration::from_millis(100));
        a.tick(Duration::from_millis(100));
        assert_eq!(a.widget(id).unwrap().child::<ProgressBar>("bar").map(|b| b.value()), Some(20.0));
    }

    #[test]
    fn loads_files_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.xml"), r#"<widget width="10" height="10"/>"#).unwrap();
        fs::write(dir.path().join("a.milk"), r#"<widgets><widget/><widget/></widgets>"#).unwrap();
        fs::write(dir.path().join("notes.txt"), "<widget/>").unwrap();

        let mut a = app();
        let ids = a.load_directory(dir.path()).unwrap();
        assert_eq!(ids.len(), 3);
        assert_eq!(a.widget(ids[2]).unwrap().width(), 10.0);
        assert!(a.last_error().is_none());

        fs::write(dir.path().join("broken.xml"), "<widget").unwrap();
        assert!(a.load_widgets(dir.path().join("broken.xml")).is_empty());
        assert!(a.last_error().unwrap().starts_with("XML parse error"));
        assert!(a.load_directory(dir.path().join("missing")).is_err());
    }

    #[test]
    fn reload_replaces_widgets_from_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("w.xml");
        fs::write(&path, r#"<widget width="100"/>"#).unwrap();

        let mut a = app();
        let old = a.load_widgets(&path);
        a.show_all();
        fs::write(&path, r#"<widget width="250"/>"#).unwrap();
        a.take_events();

        assert!(a.reload_file(&path));
        assert!(a.widget(old[0]).is_none());
        assert_eq!(a.len(), 1);
        let w = &a.widgets()[0];
        assert_eq!(w.width(), 250.0);
        assert!(w.is_visible());
        assert!(a.take_events().contains(&AppEvent::ConfigReloaded(path.clone())));
        assert!(!a.reload_file(&dir.path().join("other.xml")));
    }

    #[test]
    fn reload_recovers_after_a_broken_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("w.xml");
        fs::write(&path, r#"<widget width="100"/>"#).unwrap();

        let mut a = app();
        a.load_widgets(&path);
        fs::write(&path, "<widget").unwrap();
        assert!(a.reload_file(&path));
        assert!(a.is_empty());
        assert!(a.last_error().is_some());

        fs::write(&path, r#"<widget width="120"/>"#).unwrap();
        assert!(a.reload_file(&path));
        assert_eq!(a.len(), 1);
        assert_eq!(a.widgets()[0].width(), 120.0);
    }

    #[test]
    fn auto_reload_survives_rename_saves() {
        fn wait_reload(a: &mut Application, path: &Path) -> bool {
            let deadline = std::time::Instant::now() + Duration::from_secs(5);
            while std::time::Instant::now() < deadline {
                a.tick(Duration::from_millis(16));
                if a.take_events().contains(&AppEvent::ConfigReloaded(path.to_path_buf())) {
                    return true;
                }
                std::thread::sleep(Duration::from_millis(20));
            }
            false
        }

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let path = root.join("w.xml");
        fs::write(&path, r#"<widget width="100"/>"#).unwrap();

        let mut a = Application::new();
        a.load_widgets(&path);
        if a.watched_paths().is_empty() {
            // no notify backend on this host
            return;
        }

        let swap = root.join(".w.xml.tmp");
        fs::write(&swap, r#"<widget width="200"/>"#).unwrap();
        fs::rename(&swap, &path).unwrap();
        assert!(wait_reload(&mut a, &path));
        assert_eq!(a.widgets()[0].width(), 200.0);
        std::thread::sleep(Duration::from_millis(100));
        a.tick(Duration::from_millis(16));
        a.take_events();

        fs::write(&path, r#"<widget width="300"/>"#).unwrap();
        assert!(wait_reload(&mut a, &path));
        assert_eq!(a.widgets()[0].width(), 300.0);
    }

    #[test]
    fn theme_styles_classed_widgets() {
        let root = tempfile::tempdir().unwrap();
        let theme = root.path().join("glass");
        fs::create_dir_all(theme.join("widgets")).unwrap();
        fs::write(theme.join("theme.css"), ".panel { background: #112233; }").unwrap();
        fs::write(theme.join("widgets/w.xml"), r#"<widget class="panel"/>"#).unwrap();

        let mut a = app();
        a.set_theme_dir(root.path());
        let ids = a.load_theme("glass").unwrap();
        assert_eq!(ids.len(), 1);
        assert_eq!(a.widget(ids[0]).unwrap().background(), Color::rgb(0x11, 0x22, 0x33));
        assert!(a.take_events().contains(&AppEvent::ThemeChanged("glass".into())));

        fs::write(theme.join("theme.css"), ".panel { background: #445566; }").unwrap();
        assert!(a.reload_file(&theme.join("theme.css")));
        assert_eq!(a.widget(ids[0]).unwrap().background(), Color::rgb(0x44, 0x55, 0x66));

        assert!(matches!(a.load_theme("missing"), Err(MilkError::ThemeNotFound(_))));
    }

    #[test]
    fn config_settings_apply() {
        let cfg = AppConfig {
            auto_reload: false,
            update_interval_ms: 250,
            screen_margin: 10.0,
            screen: config::ScreenConfig { width: 800.0, height: 600.0 },
            ..AppConfig::default()
        };
        let mut a = Application::from_config(&cfg);
        assert!(!a.auto_reload());
        assert_eq!(a.global_update_interval(), Duration::from_millis(250));
        let mut w = MilkWidget::new(100.0, 100.0);
        w.set_position(Position::TopRight);
        let id = a.register(w);
        assert_eq!(a.widget(id).unwrap().pos(), Vec2::new(690.0, 10.0));
        assert_eq!(a.widget(id).unwrap().update_interval(), Duration::from_millis(250));

        let mut own = MilkWidget::default();
        own.set_update_interval(Duration::from_millis(5000));
        let own = a.register(own);
        a.set_global_update_interval(Duration::from_millis(500));
        assert_eq!(a.widget(id).unwrap().update_interval(), Duration::from_millis(500));
        assert_eq!(a.widget(own).unwrap().update_interval(), Duration::from_millis(5000));
    }

    #[test]
    fn markup_interval_beats_global_interval() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("w.xml");
        fs::write(&path, r#"<widgets><widget update-interval="2000"/><widget/></widgets>"#).unwrap();

        let cfg = AppConfig { auto_reload: false, update_interval_ms: 250, ..AppConfig::default() };
        let mut a = Application::from_config(&cfg);
        let ids = a.load_widgets(&path);
        assert_eq!(a.widget(ids[0]).unwrap().update_interval(), Duration::from_millis(2000));
        assert_eq!(a.widget(ids[1]).unwrap().update_interval(), Duration::from_millis(250));
    }

    #[test]
    fn paint_and_present() {
        struct Recorder(Vec<(WidgetId, bool, usize)>);
        impl Surface for Recorder {
            fn present(&mut self, id: WidgetId, request: &WindowRequest, list: &DrawList) {
                self.0.push((id, request.visible, list.len()));
            }
        }

        let mut a = app();
        let shown = a.register(MilkWidget::new(50.0, 50.0));
        let hidden = a.register(MilkWidget::new(50.0, 50.0));
        a.widget_mut(shown).unwrap().show();

        assert!(!a.paint(shown).unwrap().is_empty());
        assert!(a.paint(MilkWidget::default().id()).is_none());

        let mut r = Recorder(Vec::new());
        a.present(&mut r);
        assert_eq!(r.0.len(), 2);
        assert!(r.0[0].0 == shown && r.0[0].1 && r.0[0].2 > 0);
        assert_eq!(r.0[1], (hidden, false, 0));
    }
}
