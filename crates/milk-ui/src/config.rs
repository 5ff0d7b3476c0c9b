//! `milkwidget.toml`, the user's application settings.
//!
//! ```toml
//! theme = "glass"
//! auto_reload = true
//! update_interval_ms = 1000
//! screen_margin = 50
//! log_filter = "milk_ui=debug"
//! widgets = ["~/widgets/cpu.xml"]
//!
//! [screen]
//! width = 2560
//! height = 1440
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{MilkError, Result};
use crate::milk_widget::{DEFAULT_SCREEN_MARGIN, DEFAULT_UPDATE_INTERVAL, ScreenGeometry};

pub const CONFIG_FILE: &str = "milkwidget.toml";
const APP_DIR: &str = "milkwidget";

/// `$XDG_CONFIG_HOME/milkwidget`, or `None` without a home directory.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR))
}

/// `<config_dir>/themes`.
pub fn theme_dir() -> Option<PathBuf> {
    config_dir().map(|d| d.join("themes"))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        let size = ScreenGeometry::DEFAULT_SIZE;
        Self { width: size.x, height: size.y }
    }
}

impl ScreenConfig {
    pub fn geometry(&self) -> ScreenGeometry {
        ScreenGeometry::new(self.width, self.height)
    }
}

/// Every field is optional in the file; missing ones take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Theme name or directory loaded at startup.
    pub theme: Option<String>,
    /// Reload widget files when they change on disk.
    pub auto_reload: bool,
    pub update_interval_ms: u64,
    pub screen_margin: f32,
    pub screen: ScreenConfig,
    /// `env_logger` filter; `RUST_LOG` applies when unset.
    pub log_filter: Option<String>,
    /// Widget files loaded in addition to the theme's.
    pub widgets: Vec<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: None,
            auto_reload: true,
            update_interval_ms: DEFAULT_UPDATE_INTERVAL.as_millis() as u64,
            screen_margin: DEFAULT_SCREEN_MARGIN,
            screen: ScreenConfig::default(),
            log_filter: None,
            widgets: Vec::new(),
        }
    }
}

impl AppConfig {
    /// `<config_dir>/milkwidget.toml`.
    pub fn default_path() -> Option<PathBuf> {
        config_dir().map(|d| d.join(CONFIG_FILE))
    }

    /// Reads `path`. A missing file gives the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(src) => Self::from_toml(&src),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("{} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(MilkError::io(path, e)),
        }
    }

    /// Reads the file at [`default_path`](Self::default_path), if there is one.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(src: &str) -> Result<Self> {
        Ok(toml::from_str(src)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes the config, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| MilkError::io(dir, e))?;
        }
        std::fs::write(path, self.to_toml()?).map_err(|e| MilkError::io(path, e))
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }

    /// Widget paths with a leading `~/` expanded.
    pub fn widget_paths(&self) -> Vec<PathBuf> {
        self.widgets.iter().map(|p| expand_home(p)).collect()
    }
}

fn expand_home(p: &Path) -> PathBuf {
    match (p.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => p.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
        let d = AppConfig::default();
        assert!(d.auto_reload);
        assert_eq!(d.update_interval(), Duration::from_millis(1000));
        assert_eq!(d.screen.geometry().size(), ScreenGeometry::DEFAULT_SIZE);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let c = AppConfig::from_toml("theme = \"glass\"\n[screen]\nwidth = 2560\n").unwrap();
        assert_eq!(c.theme.as_deref(), Some("glass"));
        assert_eq!(c.screen.width, 2560.0);
        assert_eq!(c.screen.height, 1080.0);
        assert_eq!(c.screen_margin, DEFAULT_SCREEN_MARGIN);
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        let err = AppConfig::from_toml("auto_reload = \"sometimes\"").unwrap_err();
        assert!(matches!(err, MilkError::Config(_)));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let c = AppConfig::load(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(c, AppConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let c = AppConfig {
            theme: Some("dark".into()),
            auto_reload: false,
            update_interval_ms: 250,
            log_filter: Some("debug".into()),
            widgets: vec![PathBuf::from("/tmp/a.xml")],
            ..AppConfig::default()
        };
        c.save(&path).unwrap();
        assert_eq!(AppConfig::load(&path).unwrap(), c);
    }

    #[test]
    fn absolute_widget_paths_are_untouched() {
        let c = AppConfig { widgets: vec![PathBuf::from("/etc/w.xml")], ..AppConfig::default() };
        assert_eq!(c.widget_paths(), vec![PathBuf::from("/etc/w.xml")]);
    }
}
