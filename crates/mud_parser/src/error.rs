//! Errors of the Markdown front end.

use thiserror::Error;

/// Why a source could not be turned into a tree.
///
/// Plain CommonMark with the GFM extensions always parses, so in practice
/// these only surface for inputs the grammar library itself rejects.
#[derive(Debug, Error)]
pub enum ParseError {
    /// markdown-rs rejected the source.
    #[error("Invalid source: {0}")]
    InvalidSource(String),

    /// markdown-rs returned a tree without a root node.
    #[error("Internal parser error: {0}")]
    Internal(String),
}

impl ParseError {
    /// Wraps a message reported by markdown-rs.
    pub fn invalid_source(message: impl Into<String>) -> Self {
        Self::InvalidSource(message.into())
    }

    /// Creates an error for a broken adapter invariant.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
