//! Lenient attribute readers. Missing or malformed values come back as
//! `None` so callers keep their defaults.

use milk_engine::paint::Color;
use milk_engine::text::HAlign;
use milk_markup::Element as Markup;

use crate::util::to_bool;

/// Number with an optional `px` suffix.
pub fn number(elem: &Markup, name: &str) -> Option<f32> {
    elem.attr(name).and_then(parse_number)
}

pub fn number_f64(elem: &Markup, name: &str) -> Option<f64> {
    elem.attr(name).and_then(|v| v.trim().trim_end_matches("px").trim().parse().ok())
}

pub fn color(elem: &Markup, name: &str) -> Option<Color> {
    elem.attr(name).and_then(Color::parse)
}

/// `true`/`yes`/`1`/`on` and their negations; anything else is `None`.
pub fn flag(elem: &Markup, name: &str) -> Option<bool> {
    let v = elem.attr(name)?;
    let on = to_bool(v, true);
    (on == to_bool(v, false)).then_some(on)
}

pub fn parse_number(v: &str) -> Option<f32> {
    v.trim().trim_end_matches("px").trim().parse().ok()
}

/// `"<color> <number>"` pairs such as `glow="#0ff 12"`. A lone color yields
/// `(color, None)`.
pub fn color_and_number(v: &str) -> Option<(Color, Option<f32>)> {
    let mut parts = v.split_whitespace();
    let color = Color::parse(parts.next()?)?;
    Some((color, parts.next().and_then(parse_number)))
}

/// `"2px #fff"` borders. A lone color means width 1.
pub fn border(v: &str) -> Option<(Color, f32)> {
    let parts: Vec<&str> = v.split_whitespace().collect();
    match parts.as_slice() {
        [width, color, ..] => Some((Color::parse(color)?, parse_number(width)?)),
        [color] => Some((Color::parse(color)?, 1.0)),
        [] => None,
    }
}

/// `"color blur ox oy"`, all four required.
pub fn shadow(v: &str) -> Option<(Color, f32, f32, f32)> {
    let parts: Vec<&str> = v.split_whitespace().collect();
    match parts.as_slice() {
        [color, blur, ox, oy, ..] => {
            Some((Color::parse(color)?, parse_number(blur)?, parse_number(ox)?, parse_number(oy)?))
        }
        _ => None,
    }
}

pub fn h_align(v: &str) -> Option<HAlign> {
    match v.trim().to_ascii_lowercase().as_str() {
        "left" => Some(HAlign::Left),
        "center" | "centre" => Some(HAlign::Center),
        "right" => Some(HAlign::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_accept_px() {
        let e = Markup::new("w").with_attr("width", "320px").with_attr("height", "abc");
        assert_eq!(number(&e, "width"), Some(320.0));
        assert_eq!(number(&e, "height"), None);
        assert_eq!(number(&e, "missing"), None);
    }

    #[test]
    fn flags_are_lenient() {
        let e = Markup::new("w").with_attr("a", "yes").with_attr("b", "off").with_attr("c", "maybe");
        assert_eq!(flag(&e, "a"), Some(true));
        assert_eq!(flag(&e, "b"), Some(false));
        assert_eq!(flag(&e, "c"), None);
    }

    #[test]
    fn border_forms() {
        assert_eq!(border("2px #fff"), Some((Color::WHITE, 2.0)));
        assert_eq!(border("#ff0000"), Some((Color::RED, 1.0)));
        assert_eq!(border("2px nonsense"), None);
    }

    #[test]
    fn shadow_needs_four_parts() {
        assert_eq!(shadow("#000 10 0 2"), Some((Color::BLACK, 10.0, 0.0, 2.0)));
        assert_eq!(shadow("#000 10"), None);
    }

    #[test]
    fn glow_pair() {
        assert_eq!(color_and_number("#0ff 12"), Some((Color::CYAN, Some(12.0))));
        assert_eq!(color_and_number("cyan"), Some((Color::CYAN, None)));
    }
}
