use std::path::PathBuf;

use milk_markup::ParseError;

/// Errors surfaced by loaders, themes, config and image decoding.
///
/// Widgets never propagate these upward at paint time; components log the
/// error, keep it as their last error and keep running in a degraded state.
#[derive(Debug, thiserror::Error)]
pub enum MilkError {
    #[error("Cannot open file: {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML parse error at line {}, column {}: {}", .0.line, .0.col, .0.message)]
    Parse(#[from] ParseError),

    #[error("unexpected root element <{0}>, expected <widget>, <widgets> or <milk>")]
    UnexpectedRoot(String),

    #[error("image {}: {message}", path.display())]
    Image { path: PathBuf, message: String },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("cannot serialize config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("file watcher: {0}")]
    Watch(#[from] notify::Error),

    #[error("theme not found: {0}")]
    ThemeNotFound(String),
}

impl MilkError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MilkError::Io { path: path.into(), source }
    }

    pub(crate) fn image(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        MilkError::Image { path: path.into(), message: message.to_string() }
    }
}

pub type Result<T, E = MilkError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_the_file() {
        let e = MilkError::io("/nope/w.xml", std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(e.to_string(), "Cannot open file: /nope/w.xml");
    }

    #[test]
    fn parse_error_reports_position() {
        let err = milk_markup::parse_str("<widget>\n</text>").unwrap_err();
        let e = MilkError::from(err);
        assert!(e.to_string().starts_with("XML parse error at line 2, column "));
    }
}
