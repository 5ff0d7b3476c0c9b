//! Change notifications for loaded widget and theme files.
//!
//! The `notify` backend runs on its own thread and forwards raw events
//! through a channel; [`ConfigWatcher::drain`] collects them on the UI tick.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::Result;

/// A watched path that changed since the last drain.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum WatchEvent {
    FileChanged(PathBuf),
    DirectoryChanged(PathBuf),
}

impl WatchEvent {
    pub fn path(&self) -> &Path {
        match self {
            WatchEvent::FileChanged(p) | WatchEvent::DirectoryChanged(p) => p,
        }
    }
}

pub struct ConfigWatcher {
    watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    paths: BTreeSet<PathBuf>,
    enabled: bool,
}

impl ConfigWatcher {
    pub fn new() -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let watcher = notify::recommended_watcher(tx)?;
        Ok(Self { watcher, rx, paths: BTreeSet::new(), enabled: true })
    }

    /// Starts watching `path`. Directories are watched without recursion.
    pub fn watch(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref().to_path_buf();
        if self.paths.contains(&path) {
            return Ok(());
        }
        self.watcher.watch(&path, RecursiveMode::NonRecursive)?;
        log::debug!("watching {}", path.display());
        self.paths.insert(path);
        Ok(())
    }

    /// Drops and re-adds the watch on `path`. An editor that saves by
    /// renaming a new file over the old one leaves the previous watch on the
    /// replaced inode.
    pub fn rewatch(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.unwatch(path);
        self.watch(path)
    }

    pub fn unwatch(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if self.paths.remove(path) {
            if let Err(e) = self.watcher.unwatch(path) {
                log::debug!("unwatch {}: {e}", path.display());
            }
        }
    }

    pub fn clear(&mut self) {
        for path in std::mem::take(&mut self.paths) {
            if let Err(e) = self.watcher.unwatch(&path) {
                log::debug!("unwatch {}: {e}", path.display());
            }
        }
    }

    pub fn watched_paths(&self) -> Vec<&Path> {
        self.paths.iter().map(PathBuf::as_path).collect()
    }

    pub fn is_watching(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    /// While disabled, drained notifications are discarded.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Changes queued since the last call, one per path.
    pub fn drain(&mut self) -> Vec<WatchEvent> {
        let mut out = BTreeSet::new();
        for msg in self.rx.try_iter() {
            let event = match msg {
                Ok(event) => event,
                Err(e) => {
                    log::warn!("file watcher: {e}");
                    continue;
                }
            };
            if !self.enabled || !is_change(&event.kind) {
                continue;
            }
            for path in event.paths {
                if let Some(changed) = self.classify(path) {
                    out.insert(changed);
                }
            }
        }
        out.into_iter().collect()
    }

    /// Maps an event path to the watched entry it belongs to.
    fn classify(&self, path: PathBuf) -> Option<WatchEvent> {
        if self.paths.contains(&path) {
            return Some(if path.is_dir() { WatchEvent::DirectoryChanged(path) } else { WatchEvent::FileChanged(path) });
        }
        let parent = path.parent()?;
        self.paths.contains(parent).then(|| WatchEvent::DirectoryChanged(parent.to_path_buf()))
    }
}

impl std::fmt::Debug for ConfigWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigWatcher")
            .field("paths", &self.paths)
            .field("enabled", &self.enabled)
            .finish()
    }
}

fn is_change(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for(w: &mut ConfigWatcher, want: &WatchEvent) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if w.drain().contains(want) {
                return true;
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        false
    }

    #[test]
    fn watch_bookkeeping() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.xml");
        let b = dir.path().join("b.xml");
        std::fs::write(&a, "<widget/>").unwrap();
        std::fs::write(&b, "<widget/>").unwrap();

        let mut w = ConfigWatcher::new().unwrap();
        w.watch(&a).unwrap();
        w.watch(&b).unwrap();
        w.watch(&a).unwrap();
        assert_eq!(w.watched_paths(), vec![a.as_path(), b.as_path()]);

        w.unwatch(&a);
        assert!(!w.is_watching(&a));
        w.clear();
        assert!(w.watched_paths().is_empty());
    }

    #[test]
    fn missing_path_is_an_error() {
        let mut w = ConfigWatcher::new().unwrap();
        assert!(w.watch("/nonexistent/milkwidget/w.xml").is_err());
        assert!(w.watched_paths().is_empty());
    }

    #[test]
    fn reports_file_edits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().canonicalize().unwrap().join("w.xml");
        std::fs::write(&path, "<widget/>").unwrap();

        let mut w = ConfigWatcher::new().unwrap();
        w.watch(&path).unwrap();
        std::fs::write(&path, "<widget width=\"10\"/>").unwrap();
        assert!(wait_for(&mut w, &WatchEvent::FileChanged(path)));
    }

    #[test]
    fn rewatch_follows_rename_saves() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let path = root.join("w.xml");
        let swap = root.join(".w.xml.swp");
        std::fs::write(&path, "<widget/>").unwrap();

        let mut w = ConfigWatcher::new().unwrap();
        w.watch(&path).unwrap();
        std::fs::write(&swap, "<widget width=\"10\"/>").unwrap();
        std::fs::rename(&swap, &path).unwrap();
        assert!(wait_for(&mut w, &WatchEvent::FileChanged(path.clone())));

        w.rewatch(&path).unwrap();
        assert!(w.is_watching(&path));
        w.drain();
        std::fs::write(&path, "<widget width=\"20\"/>").unwrap();
        assert!(wait_for(&mut w, &WatchEvent::FileChanged(path)));
    }

    #[test]
    fn disabled_watcher_discards() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().canonicalize().unwrap().join("w.xml");
        std::fs::write(&path, "").unwrap();

        let mut w = ConfigWatcher::new().unwrap();
        w.watch(&path).unwrap();
        w.set_enabled(false);
        std::fs::write(&path, "changed").unwrap();
        std::thread::sleep(Duration::from_millis(200));
        assert!(w.drain().is_empty());
    }
}
