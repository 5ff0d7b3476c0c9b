//! Formatting, string and timing helpers for widget authors.

pub mod case;
pub mod format;
pub mod parse;
pub mod timing;

pub use case::{ellipsis, to_camel_case, to_kebab_case, to_snake_case, to_title_case, truncate};
pub use format::{format_bytes, format_duration, format_duration_ms, format_percent, format_printf, format_temperature};
pub use parse::{to_bool, to_double, to_int};
pub use timing::{Debouncer, Throttler};
