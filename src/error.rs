//! Error types for mdstyle

use thiserror::Error;

use crate::range::TextRange;

/// Result type alias for mdstyle operations
pub type Result<T> = std::result::Result<T, StyleError>;

/// Styling error types
#[derive(Error, Debug)]
pub enum StyleError {
    /// A highlighter's pattern could not be compiled
    #[error("failed to compile pattern `{pattern}`: {source}")]
    Initialization {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("range {range} is out of bounds for text of length {len}")]
    OutOfRange { range: TextRange, len: usize },

    #[error("position {position} is out of bounds for text of length {len}")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid style configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("unknown color: {0}")]
    InvalidColor(String),

    #[error("superscript font ratio must be in (0, 1], got {0}")]
    InvalidFontRatio(f32),
}

impl StyleError {
    /// Build an initialization error for a pattern that failed to compile
    pub fn initialization(pattern: &str, source: regex::Error) -> Self {
        StyleError::Initialization {
            pattern: pattern.to_string(),
            source,
        }
    }

    /// Whether this error comes from addressing text outside its bounds
    pub fn is_range_error(&self) -> bool {
        matches!(
            self,
            StyleError::OutOfRange { .. } | StyleError::PositionOutOfRange { .. }
        )
    }
}
