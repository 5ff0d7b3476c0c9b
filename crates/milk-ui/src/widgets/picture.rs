use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::str::FromStr;

use milk_engine::coords::{Rect, Vec2};
use milk_engine::geometry::Outline;
use milk_engine::paint::Color;
use milk_engine::scene::ImageData;

use crate::constraints::{Constraints, LayoutCtx};
use crate::error::{MilkError, Result};
use crate::painter::Painter;
use crate::widget::Widget;

// ── FillMode ──────────────────────────────────────────────────────────────

/// How the picture is scaled into the widget rect. It is always centred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillMode {
    /// Fit inside, preserving aspect ratio.
    #[default]
    Keep,
    /// Stretch to the rect.
    Ignore,
    /// Cover the rect, preserving aspect ratio; the overflow is clipped.
    Crop,
}

impl FillMode {
    /// Size of a `natural`-sized picture placed into `area`.
    pub fn fit(self, natural: Vec2, area: Vec2) -> Vec2 {
        if natural.x <= 0.0 || natural.y <= 0.0 {
            return Vec2::zero();
        }
        let sx = area.x / natural.x;
        let sy = area.y / natural.y;
        match self {
            FillMode::Ignore => area,
            FillMode::Keep => natural * sx.min(sy),
            FillMode::Crop => natural * sx.max(sy),
        }
    }
}

impl FromStr for FillMode {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep" | "contain" | "fit" => Ok(FillMode::Keep),
            "ignore" | "stretch" | "fill" => Ok(FillMode::Ignore),
            "crop" | "cover" | "expand" => Ok(FillMode::Crop),
            _ => Err(()),
        }
    }
}

// ── decoding ──────────────────────────────────────────────────────────────

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg") || e.eq_ignore_ascii_case("svgz"))
}

/// Decodes a raster or SVG file into straight-alpha RGBA8.
pub fn decode_file(path: &Path) -> Result<ImageData> {
    if is_svg(path) { decode_svg(path) } else { decode_raster(path) }
}

fn decode_raster(path: &Path) -> Result<ImageData> {
    let img = image::open(path).map_err(|e| MilkError::image(path, e.to_string()))?.to_rgba8();
    let (w, h) = img.dimensions();
    ImageData::new(w, h, img.into_raw()).ok_or_else(|| MilkError::image(path, "pixel buffer size mismatch"))
}

fn decode_svg(path: &Path) -> Result<ImageData> {
    use resvg::{tiny_skia, usvg};

    let bytes = std::fs::read(path).map_err(|e| MilkError::io(path, e))?;
    let tree = usvg::Tree::from_data(&bytes, &usvg::Options::default()).map_err(|e| MilkError::image(path, e.to_string()))?;
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| MilkError::image(path, "svg has an empty canvas"))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let rgba = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    ImageData::new(size.width(), size.height(), rgba).ok_or_else(|| MilkError::image(path, "pixel buffer size mismatch"))
}

// ── Image ─────────────────────────────────────────────────────────────────

/// A picture loaded from disk.
///
/// Failures don't panic or propagate to the tree: the widget paints nothing
/// and reports the reason through [`Image::load_error`].
#[derive(Debug, Clone)]
pub struct Image {
    source: Option<PathBuf>,
    original: Option<Rc<ImageData>>,
    /// `original` with tint and grayscale applied.
    processed: Option<Rc<ImageData>>,
    load_error: Option<String>,
    fill_mode: FillMode,
    radius: f32,
    circular: bool,
    opacity: f32,
    grayscale: bool,
    tint: Option<Color>,
}

impl Image {
    pub fn new() -> Self {
        Self {
            source: None,
            original: None,
            processed: None,
            load_error: None,
            fill_mode: FillMode::Keep,
            radius: 0.0,
            circular: false,
            opacity: 1.0,
            grayscale: false,
            tint: None,
        }
    }

    /// Loads `path` right away; check [`is_loaded`](Self::is_loaded).
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let mut img = Self::new();
        // The error is kept on the widget.
        let _ = img.set_source(path);
        img
    }

    pub fn from_data(data: ImageData) -> Self {
        let mut img = Self::new();
        img.set_data(data);
        img
    }

    // ── source ────────────────────────────────────────────────────────────

    pub fn set_source(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.source = Some(path.to_path_buf());
        match decode_file(path) {
            Ok(data) => {
                self.set_data(data);
                Ok(())
            }
            Err(e) => {
                log::warn!("image {}: {e}", path.display());
                self.original = None;
                self.processed = None;
                self.load_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn set_data(&mut self, data: ImageData) {
        self.original = Some(Rc::new(data));
        self.load_error = None;
        self.reprocess();
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.original.is_some()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Pixels as painted.
    pub fn data(&self) -> Option<&ImageData> {
        self.processed.as_deref()
    }

    pub fn natural_size(&self) -> Option<Vec2> {
        self.original.as_ref().map(|d| Vec2::new(d.width as f32, d.height as f32))
    }

    // ── appearance ────────────────────────────────────────────────────────

    pub fn set_fill_mode(&mut self, mode: FillMode) {
        self.fill_mode = mode;
    }

    pub fn set_rounded(&mut self, radius: f32) {
        self.radius = radius.max(0.0);
    }

    pub fn set_circular(&mut self, on: bool) {
        self.circular = on;
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn set_grayscale(&mut self, on: bool) {
        self.grayscale = on;
        self.reprocess();
    }

    /// Blends `color` over every pixel by the tint's alpha, keeping the
    /// pixel's own alpha. `None` removes it.
    pub fn set_tint(&mut self, color: Option<Color>) {
        self.tint = color;
        self.reprocess();
    }

    pub fn fill_mode(&self) -> FillMode {
        self.fill_mode
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    fn reprocess(&mut self) {
        let Some(original) = &self.original else {
            self.processed = None;
            return;
        };
        if !self.grayscale && self.tint.is_none() {
            self.processed = Some(original.clone());
            return;
        }

        let mut rgba = original.rgba.clone();
        for px in rgba.chunks_exact_mut(4) {
            if self.grayscale {
                let y = (0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32).round() as u8;
                px[0] = y;
                px[1] = y;
                px[2] = y;
            }
            if let Some(t) = self.tint {
                let k = t.a as f32 / 255.0;
                let blend = |c: u8, tc: u8| (c as f32 + (tc as f32 - c as f32) * k).round() as u8;
                px[0] = blend(px[0], t.r);
                px[1] = blend(px[1], t.g);
                px[2] = blend(px[2], t.b);
            }
        }
        self.processed = ImageData::new(original.width, original.height, rgba).map(Rc::new);
    }

    /// Where the picture lands inside `rect`.
    pub fn placed_rect(&self, rect: Rect) -> Option<Rect> {
        let natural = self.natural_size()?;
        Some(Rect::from_center(rect.center(), self.fill_mode.fit(natural, rect.size)))
    }
}

impl Default for Image {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Image {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        let Some(natural) = self.natural_size() else {
            return constraints.constrain(Vec2::zero());
        };
        let size = match constraints.max_width() {
            Some(w) if natural.x > w => FillMode::Keep.fit(natural, Vec2::new(w, f32::INFINITY)),
            _ => natural,
        };
        constraints.constrain(size)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let (Some(data), Some(placed)) = (&self.processed, self.placed_rect(rect)) else {
            return;
        };

        let mask = if self.circular {
            Some(Outline::Ellipse(placed))
        } else if self.radius > 0.0 {
            Some(Outline::RoundedRect { rect: placed, radius: self.radius })
        } else {
            None
        };

        let crop = self.fill_mode == FillMode::Crop;
        if crop {
            painter.push_clip(rect);
        }
        painter.push_opacity(self.opacity);
        painter.image(data.clone(), placed, mask);
        painter.pop_opacity();
        if crop {
            painter.pop_clip();
        }
    }
}
