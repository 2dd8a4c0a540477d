//! Render configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::RenderError;
use crate::template::Theme;

/// Options of a [`crate::Mud`] instance.
///
/// Every field has a default, so a configuration file only lists what it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Theme of full documents.
    pub theme: Theme,

    /// Replace `:alias:` shortcodes with emoji in Up mode.
    pub emoji_shortcodes: bool,

    /// Consult the highlighter for code blocks.
    pub highlight_code: bool,

    /// Emit `<base href>` in Up documents.
    pub include_base_tag: bool,

    /// Inline local images as `data:` URIs when no resolver is given.
    pub embed_local_images: bool,

    /// Display toggles added to the `<html>` element.
    pub html_classes: Vec<HtmlClass>,
}

impl RenderOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
            emoji_shortcodes: true,
            highlight_code: true,
            include_base_tag: true,
            embed_local_images: false,
            html_classes: Vec::new(),
        }
    }

    /// Loads options from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| RenderError::config(format!("Failed to read config: {}", e)))?;
        Self::from_json(&content)
    }

    /// Parses options from a JSON string.
    ///
    /// ```rust
    /// use mud_core::{RenderOptions, Theme};
    ///
    /// let options = RenderOptions::from_json(r#"{ "theme": "riot" }"#).unwrap();
    /// assert_eq!(options.theme, Theme::Riot);
    /// assert!(options.highlight_code);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        serde_json::from_str(json).map_err(|e| RenderError::config(format!("Invalid config: {}", e)))
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// A document-level display toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HtmlClass {
    /// Show the line-number column of Down mode.
    HasLineNumbers,
    /// Wrap long lines instead of scrolling.
    HasWordWrap,
    /// Limit Up mode to a centred reading column.
    IsReadableColumn,
}

impl HtmlClass {
    /// The class name as written in HTML.
    pub const fn as_str(self) -> &'static str {
        match self {
            HtmlClass::HasLineNumbers => "has-line-numbers",
            HtmlClass::HasWordWrap => "has-word-wrap",
            HtmlClass::IsReadableColumn => "is-readable-column",
        }
    }
}

/// Rendering mode of a whole file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Formatted HTML.
    Up,
    /// Line-numbered, syntax-marked source.
    Down,
}
