//! Error types for wordtally-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// A config file named explicitly (e.g. `--config`) does not exist.
    #[error("config file not found: {path}")]
    MissingFile {
        /// The path that was given.
        path: Utf8PathBuf,
    },
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading a stop-word list.
#[derive(Error, Debug)]
pub enum StopWordsError {
    /// The stop-word file does not exist.
    #[error("stop-word list not found: {path}")]
    NotFound {
        /// The path that was looked up.
        path: Utf8PathBuf,
    },

    /// The stop-word file exists but could not be read.
    #[error("failed to read stop-word list {path}")]
    Read {
        /// The path that failed to read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`StopWordsError`].
pub type StopWordsResult<T> = Result<T, StopWordsError>;

/// Errors that can occur while rendering a word cloud.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    /// The font range is empty or inverted.
    #[error("invalid font range: min {min}px must be positive and not above max {max}px")]
    InvalidFontRange {
        /// Smallest font size in pixels.
        min: u32,
        /// Largest font size in pixels.
        max: u32,
    },
}

/// Result type alias using [`RenderError`].
pub type RenderResult<T> = Result<T, RenderError>;
