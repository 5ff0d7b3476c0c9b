use crate::coords::Vec2;

use super::TextStyle;

const LINE_HEIGHT: f32 = 1.25;

/// Estimated extent of `text` laid out in `style`.
///
/// Lines split on `\n`; when `max_width` is set, words wrap greedily.
/// Returns `(widest line, line count × line height)`.
pub fn measure(text: &str, style: &TextStyle, max_width: Option<f32>) -> Vec2 {
    let advance = char_advance(style);
    let line_h = style.size * LINE_HEIGHT;
    if text.is_empty() {
        return Vec2::new(0.0, line_h);
    }

    let mut widest = 0.0f32;
    let mut lines = 0usize;
    for raw in text.split('\n') {
        match max_width {
            Some(limit) if limit > 0.0 => {
                let mut current = 0.0f32;
                lines += 1;
                for word in raw.split(' ') {
                    let w = word.chars().count() as f32 * advance;
                    let with_space = if current > 0.0 { current + advance + w } else { w };
                    if with_space > limit && current > 0.0 {
                        widest = widest.max(current);
                        lines += 1;
                        current = w;
                    } else {
                        current = with_space;
                    }
                }
                widest = widest.max(current.min(limit));
            }
            _ => {
                lines += 1;
                widest = widest.max(raw.chars().count() as f32 * advance);
            }
        }
    }

    Vec2::new(widest, lines as f32 * line_h)
}

fn char_advance(style: &TextStyle) -> f32 {
    let base = if style.is_monospace() { 0.6 } else { 0.55 };
    let bold = if style.bold { 1.06 } else { 1.0 };
    style.size * base * bold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_one_line_height() {
        let m = measure("", &TextStyle::new(10.0), None);
        assert_eq!(m, Vec2::new(0.0, 12.5));
    }

    #[test]
    fn newline_adds_lines() {
        let m = measure("ab\nabcd", &TextStyle::new(10.0).family("Monospace"), None);
        assert!((m.x - 24.0).abs() < 1e-4);
        assert!((m.y - 25.0).abs() < 1e-4);
    }

    #[test]
    fn wrapping_never_exceeds_limit() {
        let m = measure("aaaa bbbb cccc dddd", &TextStyle::new(10.0), Some(60.0));
        assert!(m.x <= 60.0);
        assert!(m.y > 12.5);
    }
}
