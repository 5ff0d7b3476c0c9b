use core::fmt;

/// Straight-alpha sRGB color with 8-bit channels.
///
/// This is the authoring representation: theme files, style sheets and widget
/// properties all speak in bytes. Hosts that blend in linear premultiplied
/// space convert with [`Color::to_premul_f32`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const PURPLE: Color = Color::rgb(128, 0, 128);
    pub const PINK: Color = Color::rgb(255, 192, 203);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const DARK_GRAY: Color = Color::rgb(64, 64, 64);
    pub const LIGHT_GRAY: Color = Color::rgb(192, 192, 192);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Sets alpha from a fraction in [0, 1].
    #[inline]
    pub fn adjust_alpha(self, alpha: f32) -> Self {
        self.with_alpha(unit_to_byte(alpha))
    }

    /// Multiplies the current alpha by `factor` (clamped to [0, 1]).
    #[inline]
    pub fn scale_alpha(self, factor: f32) -> Self {
        self.with_alpha((self.a as f32 * factor.clamp(0.0, 1.0)).round() as u8)
    }

    #[inline]
    pub fn alpha_f(self) -> f32 {
        self.a as f32 / 255.0
    }

    #[inline]
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Channel-wise interpolation including alpha, rounded to nearest.
    #[inline]
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let l = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8;
        Color::rgba(l(self.r, other.r), l(self.g, other.g), l(self.b, other.b), l(self.a, other.a))
    }

    /// Linear-light premultiplied `[r, g, b, a]` for GPU-style compositing.
    pub fn to_premul_f32(self) -> [f32; 4] {
        let a = self.alpha_f();
        let lin = |c: u8| srgb_to_linear(c as f32 / 255.0) * a;
        [lin(self.r), lin(self.g), lin(self.b), a]
    }

    // ── HSL ───────────────────────────────────────────────────────────────

    /// Builds a color from hue in degrees and saturation/lightness on a 0..=255 scale.
    pub fn from_hsl(h: i32, s: u8, l: u8, a: u8) -> Color {
        let s = s as f32 / 255.0;
        let l = l as f32 / 255.0;
        let h = h.rem_euclid(360) as f32 / 360.0;

        if s <= 0.0 {
            let v = unit_to_byte(l);
            return Color::rgba(v, v, v, a);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let channel = |mut t: f32| {
            if t < 0.0 {
                t += 1.0;
            }
            if t > 1.0 {
                t -= 1.0;
            }
            let v = if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            };
            unit_to_byte(v)
        };

        Color::rgba(channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0), a)
    }

    /// Returns `(hue°, saturation, lightness)`; hue is 0 for achromatic colors,
    /// saturation and lightness are on a 0..=255 scale.
    pub fn to_hsl_parts(self) -> (i32, u8, u8) {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let d = max - min;

        if d <= f32::EPSILON {
            return (0, 0, unit_to_byte(l));
        }

        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        let hue = ((h * 60.0).round() as i32).rem_euclid(360);
        (hue, unit_to_byte(s), unit_to_byte(l))
    }

    // ── parsing ───────────────────────────────────────────────────────────

    /// Parses a CSS-style color.
    ///
    /// Accepted forms (case-insensitive, surrounding whitespace ignored):
    /// `#RGB`, `#RRGGBB`, `#RRGGBBAA`, `rgb(r, g, b)`, `rgba(r, g, b, a)` where an
    /// alpha containing `.` is a 0..1 fraction, `hsl(h, s%, l%)`, and the named
    /// colors `transparent white black red green blue yellow cyan magenta orange
    /// purple pink gray grey`.
    pub fn parse(input: &str) -> Option<Color> {
        let s = input.trim().to_ascii_lowercase();

        if let Some(inner) = function_args(&s, "rgba") {
            let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
            if parts.len() < 4 {
                return None;
            }
            let alpha = if parts[3].contains('.') {
                (parts[3].parse::<f32>().ok()? * 255.0) as i32
            } else {
                parts[3].parse::<i32>().ok()?
            };
            return Some(Color::rgba(
                channel(parts[0])?,
                channel(parts[1])?,
                channel(parts[2])?,
                alpha.clamp(0, 255) as u8,
            ));
        }

        if let Some(inner) = function_args(&s, "rgb") {
            let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
            if parts.len() < 3 {
                return None;
            }
            return Some(Color::rgb(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?));
        }

        if let Some(inner) = function_args(&s, "hsl") {
            let parts: Vec<&str> = inner.split(',').map(|p| p.trim().trim_end_matches('%')).collect();
            if parts.len() < 3 {
                return None;
            }
            let h = parts[0].parse::<f32>().ok()? as i32;
            let sat = parts[1].parse::<f32>().ok()?.clamp(0.0, 100.0) as i32;
            let light = parts[2].parse::<f32>().ok()?.clamp(0.0, 100.0) as i32;
            return Some(Color::from_hsl(h, (sat * 255 / 100) as u8, (light * 255 / 100) as u8, 255));
        }

        if let Some(named) = named(&s) {
            return Some(named);
        }

        let hex = s.strip_prefix('#')?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
        match hex.len() {
            3 => Some(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    // ── formatting ────────────────────────────────────────────────────────

    /// `#rrggbb`, or `#rrggbbaa` when `include_alpha` and not opaque.
    pub fn to_hex(self, include_alpha: bool) -> String {
        if include_alpha && self.a < 255 {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        } else {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        }
    }

    pub fn to_rgb(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    pub fn to_rgba(self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }

    pub fn to_hsl(self) -> String {
        let (h, s, l) = self.to_hsl_parts();
        format!("hsl({}, {}%, {}%)", h, s as u32 * 100 / 255, l as u32 * 100 / 255)
    }

    /// Hex when opaque, `rgba(...)` otherwise. Round-trips through [`Color::parse`].
    pub fn to_css_string(self) -> String {
        if self.a < 255 { self.to_rgba() } else { self.to_hex(false) }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css_string())
    }
}

#[inline]
pub(crate) fn unit_to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[inline]
pub(crate) fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.03928 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
}

fn function_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?.trim_start().strip_prefix('(')?.strip_suffix(')')
}

fn channel(s: &str) -> Option<u8> {
    let v = s.parse::<f32>().ok()?;
    Some(v.clamp(0.0, 255.0) as u8)
}

fn named(s: &str) -> Option<Color> {
    Some(match s {
        "transparent" => Color::TRANSPARENT,
        "white" => Color::WHITE,
        "black" => Color::BLACK,
        "red" => Color::RED,
        "green" => Color::GREEN,
        "blue" => Color::BLUE,
        "yellow" => Color::YELLOW,
        "cyan" => Color::CYAN,
        "magenta" => Color::MAGENTA,
        "orange" => Color::ORANGE,
        "purple" => Color::PURPLE,
        "pink" => Color::PINK,
        "gray" | "grey" => Color::GRAY,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Color {
        Color::parse(s).unwrap()
    }

    // ── parse ─────────────────────────────────────────────────────────────

    #[test]
    fn parse_hex_forms() {
        assert_eq!(p("#333"), Color::rgb(51, 51, 51));
        assert_eq!(p("#FF6B6B"), Color::rgb(255, 107, 107));
        assert_eq!(p("#4a9eff80"), Color::rgba(74, 158, 255, 128));
    }

    #[test]
    fn parse_functions() {
        assert_eq!(p("rgb(10, 20, 30)"), Color::rgb(10, 20, 30));
        assert_eq!(p("RGBA(10,20,30,128)"), Color::rgba(10, 20, 30, 128));
        assert_eq!(p("rgba(0, 0, 0, 0.5)"), Color::rgba(0, 0, 0, 127));
        let red = p("hsl(0, 100%, 50%)");
        assert!(red.r >= 254 && red.g == 0 && red.b == 0);
        assert_eq!(p("hsl(200, 0%, 100%)"), Color::WHITE);
    }

    #[test]
    fn parse_named() {
        assert_eq!(p("  Orange "), Color::ORANGE);
        assert_eq!(p("grey"), Color::GRAY);
        assert_eq!(p("transparent"), Color::TRANSPARENT);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Color::parse("notacolor").is_none());
        assert!(Color::parse("#12").is_none());
        assert!(Color::parse("#zzzzzz").is_none());
        assert!(Color::parse("rgb(1, 2)").is_none());
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn css_string_round_trips() {
        for c in [Color::rgb(1, 2, 3), Color::rgba(30, 30, 40, 220)] {
            assert_eq!(p(&c.to_css_string()), c);
        }
    }

    #[test]
    fn hsl_format() {
        assert_eq!(Color::RED.to_hsl(), "hsl(0, 100%, 50%)");
    }

    #[test]
    fn hue_of_primaries() {
        assert_eq!(Color::RED.to_hsl_parts().0, 0);
        assert_eq!(Color::GREEN.to_hsl_parts().0, 120);
        assert_eq!(Color::BLUE.to_hsl_parts().0, 240);
        assert_eq!(Color::GRAY.to_hsl_parts().1, 0);
    }
}
