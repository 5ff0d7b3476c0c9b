//! Identifier case conversions and length clipping.

/// `"cpu_usage-max value"` → `"cpuUsageMax Value"`-style camel case: each
/// `_`, `-` or space is dropped and the following character upper-cased;
/// everything else is lower-cased.
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper_next = false;
    for c in s.chars() {
        if matches!(c, '_' | '-' | ' ') {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Inserts `_` before every upper-case character except the first, then
/// lower-cases.
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            out.push('_');
        }
        out.extend(c.to_lowercase());
    }
    out
}

pub fn to_kebab_case(s: &str) -> String {
    to_snake_case(s).replace('_', "-")
}

/// Capitalises the first character of every whitespace-separated word.
pub fn to_title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper_next = true;
    for c in s.chars() {
        if c.is_whitespace() {
            out.push(c);
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Clips `s` to `max_chars` characters, the last of which are `suffix`.
pub fn truncate(s: &str, max_chars: usize, suffix: &str) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let keep = max_chars.saturating_sub(suffix.chars().count());
    let mut out: String = s.chars().take(keep).collect();
    out.push_str(suffix);
    out
}

pub fn ellipsis(s: &str, max_chars: usize) -> String {
    truncate(s, max_chars, "...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case() {
        assert_eq!(to_camel_case("cpu_usage"), "cpuUsage");
        assert_eq!(to_camel_case("show-date now"), "showDateNow");
        assert_eq!(to_camel_case("ABC"), "abc");
    }

    #[test]
    fn snake_and_kebab() {
        assert_eq!(to_snake_case("cpuUsage"), "cpu_usage");
        assert_eq!(to_snake_case("CpuUsage"), "cpu_usage");
        assert_eq!(to_kebab_case("showSeconds"), "show-seconds");
    }

    #[test]
    fn title_case() {
        assert_eq!(to_title_case("hello WORLD  again"), "Hello World  Again");
    }

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("short", 10, "..."), "short");
        assert_eq!(ellipsis("Hello, world", 8), "Hello...");
        assert_eq!(truncate("°°°°°°", 4, "…"), "°°°…");
        assert_eq!(truncate("abcdef", 2, "..."), "...");
    }
}
