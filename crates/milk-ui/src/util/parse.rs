//! Lenient conversions: bad input yields the caller's default.

pub fn to_int(s: &str, default: i64) -> i64 {
    s.trim().parse().unwrap_or(default)
}

pub fn to_double(s: &str, default: f64) -> f64 {
    s.trim().parse().unwrap_or(default)
}

/// `true/yes/1/on` and `false/no/0/off`, case-insensitive; anything else is `default`.
pub fn to_bool(s: &str, default: bool) -> bool {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => true,
        "false" | "no" | "0" | "off" => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_fall_back() {
        assert_eq!(to_int(" 42 ", 0), 42);
        assert_eq!(to_int("4.2", -1), -1);
        assert_eq!(to_double("2.5", 0.0), 2.5);
        assert_eq!(to_double("two", 7.0), 7.0);
    }

    #[test]
    fn bool_words() {
        assert!(to_bool("Yes", false));
        assert!(to_bool("ON", false));
        assert!(!to_bool("off", true));
        assert!(!to_bool("0", true));
        assert!(to_bool("maybe", true));
        assert!(!to_bool("", false));
    }
}
