//! `milkwidget`: loads widget files and themes and runs them.
//!
//! Windows are not created here; every frame is handed to a [`LogSurface`]
//! that reports window state through the logger, which is enough to develop
//! and check themes headlessly.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Parser;

use milk_engine::logging::{LoggingConfig, init_logging};
use milk_engine::scene::DrawList;
use milk_engine::time::FrameClock;
use milk_ui::config::{self, CONFIG_FILE};
use milk_ui::milk_widget::{WidgetId, WindowRequest};
use milk_ui::{AppConfig, AppEvent, Application, Surface};

const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(name = "milkwidget", version, about = "Desktop widget engine")]
struct Cli {
    /// Widget files to load. Defaults to the XML files in the config directory.
    files: Vec<PathBuf>,

    /// Theme name or directory.
    #[arg(short, long)]
    theme: Option<String>,

    /// Config directory instead of `$XDG_CONFIG_HOME/milkwidget`.
    #[arg(short, long, value_name = "DIR")]
    config: Option<PathBuf>,

    /// Print the available themes and exit.
    #[arg(long)]
    list_themes: bool,

    /// Debug logging.
    #[arg(short, long)]
    verbose: bool,

    /// Plain log output without colors.
    #[arg(long)]
    no_color: bool,

    /// Exit after this many frames.
    #[arg(long, value_name = "N")]
    frames: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_dir = cli.config.clone().or_else(config::config_dir);
    let app_config = match &config_dir {
        Some(dir) => {
            let path = dir.join(CONFIG_FILE);
            AppConfig::load(&path).with_context(|| format!("reading {}", path.display()))?
        }
        None => AppConfig::default(),
    };

    init_logging(LoggingConfig {
        env_filter: if cli.verbose { Some("debug".into()) } else { app_config.log_filter.clone() },
        write_style: if cli.no_color { env_logger::WriteStyle::Never } else { env_logger::WriteStyle::Auto },
    });

    let mut app = Application::from_config(&app_config);
    if let Some(dir) = &config_dir {
        app.set_config_dir(dir);
        app.set_theme_dir(dir.join("themes"));
    }
    if let Err(e) = app.ensure_dirs() {
        log::warn!("{e}");
    }

    if cli.list_themes {
        println!("Available themes:");
        for theme in app.themes().available_themes() {
            println!("  {theme}");
        }
        return Ok(());
    }

    let mut loaded = Vec::new();
    if let Some(theme) = cli.theme.as_deref().or(app_config.theme.as_deref()) {
        loaded.extend(app.load_theme(theme).with_context(|| format!("loading theme {theme:?}"))?);
    }
    for path in app_config.widget_paths() {
        loaded.extend(app.load_widgets(path));
    }

    let mut files = cli.files.clone();
    if files.is_empty() && loaded.is_empty() {
        files = default_files(config_dir.as_deref());
    }
    for file in &files {
        if !file.exists() {
            log::warn!("file not found: {}", file.display());
            continue;
        }
        let ids = app.load_widgets(file);
        log::info!("loaded {} widget(s) from {}", ids.len(), file.display());
        loaded.extend(ids);
    }

    if loaded.is_empty() {
        if let Some(err) = app.last_error() {
            log::error!("{err}");
        }
        bail!("no widgets loaded; pass widget files or use --help for usage");
    }
    log::info!("{} widget(s) loaded", loaded.len());

    app.show_all();
    run(&mut app, cli.frames);
    Ok(())
}

/// `*.xml` directly inside the config directory.
fn default_files(config_dir: Option<&Path>) -> Vec<PathBuf> {
    let Some(entries) = config_dir.and_then(|d| std::fs::read_dir(d).ok()) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|e| e == "xml"))
        .collect();
    files.sort();
    files
}

fn run(app: &mut Application, frames: Option<u64>) {
    let mut clock = FrameClock::new();
    let mut surface = LogSurface::default();
    loop {
        let frame = clock.tick();
        if frames.is_some_and(|n| frame.frame_index >= n) {
            break;
        }
        if app.tick(frame.dt) || frame.frame_index == 0 {
            app.present(&mut surface);
        }
        for event in app.take_events() {
            match event {
                AppEvent::Widget(id, signal) => log::debug!("widget {id}: {signal:?}"),
                other => log::info!("{other:?}"),
            }
        }
        std::thread::sleep(FRAME.saturating_sub(frame.now.elapsed()));
    }
}

/// Reports window changes instead of drawing.
#[derive(Debug, Default)]
struct LogSurface {
    shown: HashMap<WidgetId, bool>,
}

impl Surface for LogSurface {
    fn present(&mut self, id: WidgetId, request: &WindowRequest, list: &DrawList) {
        let was = self.shown.insert(id, request.visible);
        if was != Some(request.visible) {
            log::info!(
                "window {id}: {} at {:?} ({}x{})",
                if request.visible { "shown" } else { "hidden" },
                request.geometry.origin,
                request.geometry.width(),
                request.geometry.height(),
            );
        }
        log::trace!("window {id}: opacity {:.2}, {} draw command(s)", request.opacity, list.len());
    }
}
