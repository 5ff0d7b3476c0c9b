//! Color manipulation, contrast analysis and palette generation.
//!
//! Lightness/saturation adjustments work in HSL with channels on a 0..=255
//! scale, so `amount` is a fraction of the full range (0.1 ≈ 25 steps).

use rand::Rng;

use super::Color;
use super::color::srgb_to_linear;

impl Color {
    // ── manipulation ──────────────────────────────────────────────────────

    pub fn lighten(self, amount: f32) -> Color {
        let (h, s, l) = self.to_hsl_parts();
        Color::from_hsl(h, s, shift(l, amount), self.a)
    }

    pub fn darken(self, amount: f32) -> Color {
        self.lighten(-amount)
    }

    pub fn saturate(self, amount: f32) -> Color {
        let (h, s, l) = self.to_hsl_parts();
        Color::from_hsl(h, shift(s, amount), l, self.a)
    }

    pub fn desaturate(self, amount: f32) -> Color {
        self.saturate(-amount)
    }

    /// Channel-wise mix including alpha; `ratio` 0 yields `self`, 1 yields `other`.
    /// Channels are truncated, not rounded.
    pub fn mix(self, other: Color, ratio: f32) -> Color {
        let t = ratio.clamp(0.0, 1.0);
        let m = |a: u8, b: u8| (a as f32 * (1.0 - t) + b as f32 * t) as u8;
        Color::rgba(m(self.r, other.r), m(self.g, other.g), m(self.b, other.b), m(self.a, other.a))
    }

    /// Mixes `blend` over `self` weighted by `blend`'s alpha.
    pub fn overlay(self, blend: Color) -> Color {
        self.mix(blend, blend.alpha_f())
    }

    // ── analysis ──────────────────────────────────────────────────────────

    /// Relative luminance in [0, 1].
    pub fn luminance(self) -> f32 {
        let c = |v: u8| srgb_to_linear(v as f32 / 255.0);
        0.2126 * c(self.r) + 0.7152 * c(self.g) + 0.0722 * c(self.b)
    }

    /// Contrast ratio between two colors, always ≥ 1.
    pub fn contrast(self, other: Color) -> f32 {
        let l1 = self.luminance();
        let l2 = other.luminance();
        let (hi, lo) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
        (hi + 0.05) / (lo + 0.05)
    }

    pub fn is_dark(self) -> bool {
        self.luminance() < 0.5
    }

    pub fn is_light(self) -> bool {
        !self.is_dark()
    }

    /// White on dark backgrounds, black on light ones.
    pub fn contrasting_text(self) -> Color {
        if self.is_dark() { Color::WHITE } else { Color::BLACK }
    }

    // ── generation ────────────────────────────────────────────────────────

    pub fn random() -> Color {
        let mut rng = rand::thread_rng();
        Color::rgb(rng.r#gen(), rng.r#gen(), rng.r#gen())
    }

    pub fn random_pastel() -> Color {
        let h = rand::thread_rng().gen_range(0..360);
        Color::from_hsl(h, 128, 200, 255)
    }

    pub fn random_vibrant() -> Color {
        let h = rand::thread_rng().gen_range(0..360);
        Color::from_hsl(h, 255, 128, 255)
    }

    /// `count` colors sharing `base`'s saturation and lightness, hue rotated in
    /// equal steps starting at `base`'s hue.
    pub fn palette(base: Color, count: usize) -> Vec<Color> {
        if count == 0 {
            return Vec::new();
        }
        let (h, s, l) = base.to_hsl_parts();
        let step = 360 / count as i32;
        (0..count as i32)
            .map(|i| Color::from_hsl((h + i * step) % 360, s, l, 255))
            .collect()
    }

    /// `steps` colors from `start` to `end` inclusive.
    pub fn gradient(start: Color, end: Color, steps: usize) -> Vec<Color> {
        match steps {
            0 => Vec::new(),
            1 => vec![start],
            n => (0..n).map(|i| start.mix(end, i as f32 / (n - 1) as f32)).collect(),
        }
    }
}

fn shift(v: u8, amount: f32) -> u8 {
    (v as f32 + 255.0 * amount).clamp(0.0, 255.0) as u8
}
