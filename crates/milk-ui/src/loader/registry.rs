use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use milk_markup::Element as Markup;

use crate::widget::Element;

/// Builds a child element from its markup. `None` skips the tag.
pub type TagFactory = Rc<dyn Fn(&Markup, &BuildCtx<'_>) -> Option<Element>>;

// ── TagRegistry ───────────────────────────────────────────────────────────

/// Lower-case tag name → factory.
#[derive(Clone, Default)]
pub struct TagRegistry {
    factories: HashMap<String, TagFactory>,
}

impl TagRegistry {
    /// An empty registry; see [`with_builtins`](Self::with_builtins).
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with every built-in tag.
    pub fn with_builtins() -> Self {
        let mut r = Self::new();
        super::builtins::register_all(&mut r);
        r
    }

    /// Registers `factory` under `tag`, replacing any earlier entry.
    pub fn register(&mut self, tag: &str, factory: impl Fn(&Markup, &BuildCtx<'_>) -> Option<Element> + 'static) {
        self.factories.insert(tag.to_ascii_lowercase(), Rc::new(factory));
    }

    /// Registers the same factory under several names.
    pub fn register_aliases(&mut self, tags: &[&str], factory: TagFactory) {
        for tag in tags {
            self.factories.insert(tag.to_ascii_lowercase(), factory.clone());
        }
    }

    pub fn get(&self, tag: &str) -> Option<&TagFactory> {
        self.factories.get(&tag.to_ascii_lowercase())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    /// Registered tag names, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut t: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        t.sort_unstable();
        t
    }
}

impl fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagRegistry").field("tags", &self.tags()).finish()
    }
}

// ── BuildCtx ──────────────────────────────────────────────────────────────

/// What a factory can see while building: the registry for nested children
/// and the directory relative resources resolve against.
pub struct BuildCtx<'a> {
    registry: &'a TagRegistry,
    base_dir: Option<&'a Path>,
}

impl<'a> BuildCtx<'a> {
    pub fn new(registry: &'a TagRegistry, base_dir: Option<&'a Path>) -> Self {
        Self { registry, base_dir }
    }

    /// Builds one element, tagging it with its `id` and `class` attributes.
    /// Unknown tags give `None`.
    pub fn build(&self, markup: &Markup) -> Option<Element> {
        let Some(factory) = self.registry.get(&markup.name) else {
            log::debug!("line {}: skipping unknown tag <{}>", markup.line, markup.name);
            return None;
        };
        let mut element = factory(markup, self)?;
        if let Some(id) = markup.attr("id") {
            element = element.with_id(id);
        }
        if let Some(class) = markup.attr("class") {
            element = element.with_class(class);
        }
        Some(element)
    }

    /// Builds every child element of `markup`, skipping unknown tags.
    pub fn build_children(&self, markup: &Markup) -> Vec<Element> {
        markup.elements().filter_map(|m| self.build(m)).collect()
    }

    /// Relative paths resolve against the document's directory.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        match self.base_dir {
            Some(base) if p.is_relative() => base.join(p),
            _ => p.to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir
    }
}
