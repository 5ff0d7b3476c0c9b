//! MilkWidget UI: frameless desktop widgets on top of `milk-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use milk_ui::prelude::*;
//!
//! let mut app = Application::new();
//! app.load_widgets("~/.config/milkwidget/cpu.xml");
//! app.show_all();
//!
//! // Once per frame:
//! if app.tick(dt) {
//!     app.present(&mut my_surface);
//! }
//! ```
//!
//! # Building widgets in code
//!
//! ```rust,ignore
//! use milk_ui::prelude::*;
//!
//! let mut w = MilkWidget::new(300.0, 120.0);
//! w.set_position(Position::TopRight);
//! w.set_glass(true);
//! w.add(Element::new(Text::title("CPU")));
//! w.add(Element::new(ProgressBar::new()).with_id("cpu"));
//! w.on_update(|ctx| {
//!     let usage = ctx.services().system.snapshot().cpu;
//!     if let Some(bar) = ctx.child_mut::<ProgressBar>("cpu") {
//!         bar.set_value(usage);
//!     }
//! });
//! ```
//!
//! Custom child widgets implement [`Widget`]; custom XML tags are added with
//! [`XmlLoader::register`].

pub mod app;
pub mod config;
pub mod constraints;
pub mod css;
pub mod error;
pub mod event;
pub mod loader;
pub mod mailbox;
pub mod milk_widget;
pub mod painter;
pub mod providers;
pub mod style;
pub mod theme;
pub mod util;
pub mod watcher;
pub mod widget;
pub mod widgets;

pub use app::{AppEvent, Application, Surface};
pub use config::AppConfig;
pub use css::CssParser;
pub use error::{MilkError, Result};
pub use loader::XmlLoader;
pub use milk_widget::{MilkWidget, WidgetId};
pub use theme::ThemeManager;
pub use widget::{Element, Widget};

/// The types most widget code needs.
pub mod prelude {
    pub use crate::app::{AppEvent, Application, Surface};
    pub use crate::config::AppConfig;
    pub use crate::constraints::{Constraints, Edges, LayoutCtx};
    pub use crate::css::CssParser;
    pub use crate::error::{MilkError, Result};
    pub use crate::event::{EventResult, UiEvent};
    pub use crate::loader::{BuildCtx, TagRegistry, XmlLoader};
    pub use crate::mailbox::Mailbox;
    pub use crate::milk_widget::{
        Effect, MilkWidget, PointerEvent, Position, ScreenGeometry, UpdateCtx, WidgetId, WidgetSignal, WindowRequest,
        WindowType,
    };
    pub use crate::painter::Painter;
    pub use crate::providers::{
        MediaProvider, NetworkInfoProvider, NotificationSink, Services, SystemInfoProvider, WeatherProvider,
    };
    pub use crate::style::{BlurMode, BorderStyle, ShadowSpec, StyleSheet};
    pub use crate::theme::ThemeManager;
    pub use crate::widget::{Element, Widget};
    pub use crate::widgets::{
        Button, Calendar, Clock, ClockStyle, Container, Gauge, GaugeStyle, Graph, GraphType, Image, Layout,
        ProgressBar, Spacer, Text,
    };

    pub use milk_engine::anim::Easing;
    pub use milk_engine::coords::{Rect, Vec2};
    pub use milk_engine::geometry::Shape;
    pub use milk_engine::paint::{Color, Gradient};
    pub use milk_engine::scene::DrawList;
}
