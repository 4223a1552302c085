//! Error types for the snippet renderer

use thiserror::Error;

/// Result type alias for rendering operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning source code into an image
#[derive(Error, Debug)]
pub enum Error {
    /// The line range string is not of the form `start-end`
    #[error("invalid line range '{0}': use start-end (e.g. 10-20)")]
    Format(String),

    /// The line range is inverted after clamping to the document
    #[error("start line {start} cannot be greater than end line {end}")]
    Range { start: usize, end: usize },

    /// The lexer failed on the input text
    #[error("tokenization failed: {0}")]
    Tokenize(String),

    /// Font staging, font loading, or image encoding failed
    #[error("drawing failed: {0}")]
    Draw(String),

    /// Neither a file argument nor piped data was provided
    #[error("no input provided")]
    EmptyInput,

    /// The input file could not be read
    #[error("failed to read input '{path}': {source}")]
    Input {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid render configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The clipboard rejected the image
    #[error("clipboard error: {0}")]
    Clipboard(String),
}

impl Error {
    /// Whether the binary should exit with a failure status for this error.
    /// Missing input is a usage no-op rather than a failure.
    pub fn is_failure(&self) -> bool {
        !matches!(self, Error::EmptyInput)
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Draw(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}
