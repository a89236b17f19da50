//! Error types for the shift-dl library.

use thiserror::Error;

/// Errors that can occur while planning or running a download session.
#[derive(Error, Debug)]
pub enum Error {
    /// A facet axis resolved to no usable values.
    #[error("No '{axis}' is specified to download. If you want to download all {axis}s, use '--{flag} all'.")]
    Configuration {
        /// Human name of the axis (e.g. "frame rate").
        axis: String,
        /// Command-line flag that selects the axis.
        flag: String,
    },

    /// A selection or shift string could not be parsed.
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} for {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// Response status code.
        status: u16,
    },

    /// The transfer did not finish within the configured time.
    #[error("Timed out after {seconds}s: {url}")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured limit in seconds.
        seconds: u64,
    },

    /// The transfer panicked before finishing.
    #[error("Transfer panicked: {url}")]
    Panicked {
        /// Requested URL.
        url: String,
    },

    /// The configuration file could not be parsed.
    #[error("Config file error: {0}")]
    ConfigFile(#[from] toml::de::Error),
}

/// A specialized `Result` type for shift-dl operations.
pub type Result<T> = std::result::Result<T, Error>;
