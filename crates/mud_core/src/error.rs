//! Render error types.

use mud_parser::ParseError;
use thiserror::Error;

/// Errors returned by the fallible entry points of [`crate::Mud`] and
/// [`crate::RenderOptions`].
///
/// Rendering a parsed tree never fails; these cover parsing, configuration
/// loading and reading Markdown files.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The Markdown front end rejected the source.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
