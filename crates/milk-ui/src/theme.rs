//! Theme directories.
//!
//! A theme is a directory holding a style sheet (`theme.css`, or
//! `style.css`), widget files under `widgets/` and resources under
//! `assets/`. Themes are found by name in the search paths, first path
//! first, or loaded directly from a directory.

use std::path::{Path, PathBuf};

use crate::css::CssParser;
use crate::error::{MilkError, Result};
use crate::style::StyleSheet;

pub const SYSTEM_THEME_DIRS: [&str; 2] = ["/usr/share/milkwidget/themes", "/usr/local/share/milkwidget/themes"];

const STYLE_FILES: [&str; 2] = ["theme.css", "style.css"];
const WIDGET_EXTENSIONS: [&str; 2] = ["xml", "milk"];

/// A loaded theme directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub path: PathBuf,
    /// The style sheet that was read, if the theme has one.
    pub stylesheet: Option<PathBuf>,
    /// `widgets/*.xml` and `widgets/*.milk`, sorted.
    pub widget_files: Vec<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ThemeManager {
    search_paths: Vec<PathBuf>,
    current: Option<Theme>,
    css: CssParser,
}

impl ThemeManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Manager searching `user_dir` and then the system theme directories.
    pub fn with_user_dir(user_dir: Option<PathBuf>) -> Self {
        let mut m = Self::new();
        if let Some(dir) = user_dir {
            m.add_theme_path(dir);
        }
        for dir in SYSTEM_THEME_DIRS {
            m.add_theme_path(dir);
        }
        m
    }

    pub fn add_theme_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.search_paths.contains(&path) {
            self.search_paths.push(path);
        }
    }

    pub fn set_theme_paths(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        self.search_paths.clear();
        for p in paths {
            self.add_theme_path(p);
        }
    }

    pub fn theme_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Theme names found in the search paths, sorted and deduplicated.
    pub fn available_themes(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .search_paths
            .iter()
            .filter_map(|dir| std::fs::read_dir(dir).ok())
            .flatten()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Directory for `name_or_path`: an existing directory is used as is,
    /// anything else is looked up by name in the search paths.
    pub fn find(&self, name_or_path: &str) -> Option<PathBuf> {
        let direct = Path::new(name_or_path);
        if direct.is_dir() {
            return Some(direct.to_path_buf());
        }
        self.search_paths.iter().map(|dir| dir.join(name_or_path)).find(|p| p.is_dir())
    }

    /// Makes `name_or_path` the current theme and reads its style sheet.
    pub fn load_theme(&mut self, name_or_path: &str) -> Result<&Theme> {
        let path = self.find(name_or_path).ok_or_else(|| MilkError::ThemeNotFound(name_or_path.to_string()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| name_or_path.to_string());

        let mut css = CssParser::new();
        let stylesheet = STYLE_FILES.iter().map(|f| path.join(f)).find(|p| p.is_file());
        if let Some(sheet) = &stylesheet {
            css.parse_file(sheet)?;
        }
        let widget_files = widget_files(&path.join("widgets"));

        log::info!(
            "theme {name:?}: {} style(s), {} widget file(s)",
            css.len(),
            widget_files.len()
        );
        self.css = css;
        Ok(&*self.current.insert(Theme { name, path, stylesheet, widget_files }))
    }

    /// Reads the current theme again from disk.
    pub fn reload(&mut self) -> Result<Option<&Theme>> {
        let Some(path) = self.current.as_ref().map(|t| t.path.to_string_lossy().into_owned()) else {
            return Ok(None);
        };
        self.load_theme(&path).map(Some)
    }

    pub fn current_theme(&self) -> Option<&str> {
        self.current.as_ref().map(|t| t.name.as_str())
    }

    pub fn theme(&self) -> Option<&Theme> {
        self.current.as_ref()
    }

    /// Style for `class` in the current theme; empty without one.
    pub fn get_style(&self, class: &str) -> StyleSheet {
        self.css.get_style(class)
    }

    pub fn css(&self) -> &CssParser {
        &self.css
    }

    /// `<theme>/assets/<name>` in the current theme.
    pub fn asset_path(&self, name: &str) -> Option<PathBuf> {
        self.current.as_ref().map(|t| t.path.join("assets").join(name))
    }
}

fn widget_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && has_widget_extension(p))
        .collect();
    files.sort();
    files
}

pub(crate) fn has_widget_extension(p: &Path) -> bool {
    p.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| WIDGET_EXTENSIONS.iter().any(|w| e.eq_ignore_ascii_case(w)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use milk_engine::paint::Color;
    use std::fs;

    fn make_theme(root: &Path, name: &str, css_file: &str) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(dir.join("widgets")).unwrap();
        fs::write(dir.join(css_file), ".title { color: #4A9EFF; }").unwrap();
        fs::write(dir.join("widgets/b.xml"), "<widget/>").unwrap();
        fs::write(dir.join("widgets/a.milk"), "<widget/>").unwrap();
        fs::write(dir.join("widgets/notes.txt"), "").unwrap();
        dir
    }

    fn manager(root: &Path) -> ThemeManager {
        let mut m = ThemeManager::new();
        m.add_theme_path(root);
        m
    }

    #[test]
    fn loads_by_name() {
        let root = tempfile::tempdir().unwrap();
        let dir = make_theme(root.path(), "glass", "theme.css");
        let mut m = manager(root.path());

        let theme = m.load_theme("glass").unwrap().clone();
        assert_eq!(theme.name, "glass");
        assert_eq!(theme.stylesheet, Some(dir.join("theme.css")));
        assert_eq!(theme.widget_files, vec![dir.join("widgets/a.milk"), dir.join("widgets/b.xml")]);
        assert_eq!(m.current_theme(), Some("glass"));
        assert_eq!(m.get_style("title").text_color, Some(Color::rgb(74, 158, 255)));
        assert_eq!(m.asset_path("bg.png"), Some(dir.join("assets/bg.png")));
    }

    #[test]
    fn loads_by_path_with_style_css() {
        let root = tempfile::tempdir().unwrap();
        let dir = make_theme(root.path(), "plain", "style.css");
        let mut m = ThemeManager::new();
        let theme = m.load_theme(dir.to_str().unwrap()).unwrap();
        assert_eq!(theme.stylesheet, Some(dir.join("style.css")));
    }

    #[test]
    fn unknown_theme_keeps_current() {
        let root = tempfile::tempdir().unwrap();
        make_theme(root.path(), "glass", "theme.css");
        let mut m = manager(root.path());
        m.load_theme("glass").unwrap();
        assert!(matches!(m.load_theme("nope"), Err(MilkError::ThemeNotFound(n)) if n == "nope"));
        assert_eq!(m.current_theme(), Some("glass"));
    }

    #[test]
    fn available_themes_merge_paths() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        make_theme(a.path(), "dark", "theme.css");
        make_theme(b.path(), "dark", "theme.css");
        make_theme(b.path(), "light", "theme.css");
        let mut m = manager(a.path());
        m.add_theme_path(b.path());
        m.add_theme_path(a.path());
        assert_eq!(m.theme_paths().len(), 2);
        assert_eq!(m.available_themes(), vec!["dark", "light"]);
    }

    #[test]
    fn reload_picks_up_edits() {
        let root = tempfile::tempdir().unwrap();
        let dir = make_theme(root.path(), "glass", "theme.css");
        let mut m = manager(root.path());
        assert!(m.reload().unwrap().is_none());
        m.load_theme("glass").unwrap();

        fs::write(dir.join("theme.css"), ".title { color: red; }").unwrap();
        m.reload().unwrap();
        assert_eq!(m.get_style(".title").text_color, Some(Color::RED));
    }

    #[test]
    fn system_dirs_follow_user_dir() {
        let m = ThemeManager::with_user_dir(Some(PathBuf::from("/home/u/.config/milkwidget/themes")));
        assert_eq!(m.theme_paths()[0], PathBuf::from("/home/u/.config/milkwidget/themes"));
        assert_eq!(m.theme_paths()[1], PathBuf::from(SYSTEM_THEME_DIRS[0]));
    }
}
