//! Human-readable formatting for sizes, durations and readings.

const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// `512 B`, `1.5 KB`, … up to PB. Bytes are integral, larger units carry
/// one decimal.
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 { format!("{bytes} B") } else { format!("{value:.1} {}", UNITS[unit]) }
}

/// `1d 2h 3m`, `1h 2m 3s`, `1m 2s` or `3s`, whichever is the largest unit present.
pub fn format_duration(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    let secs = seconds % 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

pub fn format_duration_ms(millis: u64) -> String {
    format_duration(millis / 1000)
}

pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}%")
}

pub fn format_temperature(celsius: f64, fahrenheit: bool) -> String {
    if fahrenheit {
        format!("{:.1}°F", celsius * 9.0 / 5.0 + 32.0)
    } else {
        format!("{celsius:.1}°C")
    }
}

/// Renders a single number through a printf-style pattern.
///
/// Supports `%f` (six decimals), `%.Nf`, `%d`/`%i` (truncated), `%g`
/// (shortest) and `%%`. Text around the conversion is kept; unknown
/// conversions are copied verbatim.
pub fn format_printf(pattern: &str, value: f64) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let mut spec = String::new();
        while let Some(&d) = chars.peek() {
            if d.is_ascii_digit() || d == '.' {
                spec.push(d);
                chars.next();
            } else {
                break;
            }
        }
        match chars.next() {
            Some('%') if spec.is_empty() => out.push('%'),
            Some('f') => {
                let precision = spec.strip_prefix('.').and_then(|p| p.parse::<usize>().ok()).unwrap_or(6);
                out.push_str(&format!("{value:.precision$}"));
            }
            Some('d' | 'i') => out.push_str(&format!("{}", value.trunc() as i64)),
            Some('g') => out.push_str(&format!("{value}")),
            Some(other) => {
                out.push('%');
                out.push_str(&spec);
                out.push(other);
            }
            None => {
                out.push('%');
                out.push_str(&spec);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_scale_through_units() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_bytes(u64::MAX), "16384.0 PB");
    }

    #[test]
    fn durations_pick_largest_unit() {
        assert_eq!(format_duration(3), "3s");
        assert_eq!(format_duration(62), "1m 2s");
        assert_eq!(format_duration(3723), "1h 2m 3s");
        assert_eq!(format_duration(93_784), "1d 2h 3m");
        assert_eq!(format_duration_ms(61_500), "1m 1s");
    }

    #[test]
    fn percent_and_temperature() {
        assert_eq!(format_percent(42.0, 0), "42%");
        assert_eq!(format_percent(42.345, 1), "42.3%");
        assert_eq!(format_temperature(21.55, false), "21.6°C");
        assert_eq!(format_temperature(100.0, true), "212.0°F");
    }

    #[test]
    fn printf_conversions() {
        assert_eq!(format_printf("%.0f", 72.6), "73");
        assert_eq!(format_printf("%.1f°", 21.26), "21.3°");
        assert_eq!(format_printf("%d rpm", 1499.9), "1499 rpm");
        assert_eq!(format_printf("%f", 1.0), "1.000000");
        assert_eq!(format_printf("100%%", 0.0), "100%");
        assert_eq!(format_printf("%x", 3.0), "%x");
        assert_eq!(format_printf("load", 3.0), "load");
    }
}
