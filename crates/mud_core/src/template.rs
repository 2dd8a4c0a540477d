//! Full HTML documents around rendered fragments.
//!
//! Stylesheets are compiled into the binary. Each document carries the
//! selected theme's custom properties in `<style id="mud-theme">`, followed
//! by the shared and mode-specific rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::escape::push_escaped;
use crate::options::HtmlClass;

const SHARED_CSS: &str = include_str!("../assets/mud.css");
const UP_CSS: &str = include_str!("../assets/mud-up.css");
const DOWN_CSS: &str = include_str!("../assets/mud-down.css");

/// Colour theme of a rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Austere,
    Blues,
    #[default]
    Earthy,
    Riot,
}

impl Theme {
    /// Every theme, in display order.
    pub const ALL: [Theme; 4] = [Theme::Austere, Theme::Blues, Theme::Earthy, Theme::Riot];

    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Theme::Austere => "austere",
            Theme::Blues => "blues",
            Theme::Earthy => "earthy",
            Theme::Riot => "riot",
        }
    }

    /// The theme's stylesheet: custom properties only.
    pub const fn css(self) -> &'static str {
        match self {
            Theme::Austere => include_str!("../assets/theme-austere.css"),
            Theme::Blues => include_str!("../assets/theme-blues.css"),
            Theme::Earthy => include_str!("../assets/theme-earthy.css"),
            Theme::Riot => include_str!("../assets/theme-riot.css"),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A theme name that is not one of the bundled themes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown theme: {0}")]
pub struct UnknownThemeError(pub String);

impl FromStr for Theme {
    type Err = UnknownThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| UnknownThemeError(s.to_owned()))
    }
}

/// Returns the stylesheet of the named theme, or earthy's for an unknown
/// name.
pub fn theme_css(name: &str) -> &'static str {
    name.parse::<Theme>().unwrap_or_default().css()
}

/// Settings of an Up mode document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpDocument {
    /// Text of `<title>`; escaped on output.
    pub title: String,
    /// URL of the Markdown file, used for `<base href>`.
    pub base_url: Option<Url>,
    pub theme: Theme,
    /// Classes added to `<html>`.
    pub html_classes: Vec<HtmlClass>,
    /// Emit `<base href>` when a base URL is known. Turn off when images are
    /// embedded and the file is opened elsewhere, where a file base would
    /// break in-page anchors.
    pub include_base_tag: bool,
}

impl Default for UpDocument {
    fn default() -> Self {
        Self {
            title: String::new(),
            base_url: None,
            theme: Theme::default(),
            html_classes: Vec::new(),
            include_base_tag: true,
        }
    }
}

/// Settings of a Down mode document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownDocument {
    pub title: String,
    pub theme: Theme,
    pub html_classes: Vec<HtmlClass>,
}

/// Wraps an Up mode fragment in a complete document.
///
/// ```rust
/// use mud_core::template::{UpDocument, wrap_up};
///
/// let doc = wrap_up("<p>hi</p>", &UpDocument::default());
/// assert!(doc.starts_with("<!DOCTYPE html>\n<html>\n"));
/// assert!(doc.contains("<article class=\"up-mode-output\">\n<p>hi</p>\n    </article>"));
/// ```
pub fn wrap_up(body: &str, doc: &UpDocument) -> String {
    let mut out = String::with_capacity(body.len() + SHARED_CSS.len() + UP_CSS.len() + 2048);
    open_document(&mut out, &doc.html_classes);
    out.push_str(
        "    <meta http-equiv=\"Content-Security-Policy\" content=\"default-src 'none'; \
         img-src mud-asset: data: https:; style-src 'unsafe-inline'; script-src 'none'\">\n",
    );
    if let Some(base) = doc.base_url.as_ref().filter(|_| doc.include_base_tag) {
        out.push_str("    <base href=\"");
        push_escaped(&mut out, base.as_str());
        out.push_str("\">\n");
    }
    head_tail(&mut out, &doc.title, doc.theme, UP_CSS);
    out.push_str("<body>\n    <article class=\"up-mode-output\">\n");
    out.push_str(body);
    out.push_str("\n    </article>\n</body>\n</html>\n");
    out
}

/// Wraps a Down mode table in a complete document.
pub fn wrap_down(table: &str, doc: &DownDocument) -> String {
    let mut out = String::with_capacity(table.len() + SHARED_CSS.len() + DOWN_CSS.len() + 1024);
    open_document(&mut out, &doc.html_classes);
    head_tail(&mut out, &doc.title, doc.theme, DOWN_CSS);
    out.push_str("<body>\n    <div class=\"down-mode-output\">\n        ");
    out.push_str(table);
    out.push_str("\n    </div>\n</body>\n</html>\n");
    out
}

fn open_document(out: &mut String, classes: &[HtmlClass]) {
    out.push_str("<!DOCTYPE html>\n");
    if classes.is_empty() {
        out.push_str("<html>\n");
    } else {
        let names: Vec<&str> = classes.iter().map(|c| c.as_str()).collect();
        out.push_str("<html class=\"");
        out.push_str(&names.join(" "));
        out.push_str("\">\n");
    }
    out.push_str("<head>\n    <meta charset=\"utf-8\">\n");
    out.push_str("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
}

fn head_tail(out: &mut String, title: &str, theme: Theme, mode_css: &str) {
    out.push_str("    <title>");
    push_escaped(out, title);
    out.push_str("</title>\n    <style id=\"mud-theme\">");
    out.push_str(theme.css());
    out.push_str("</style>\n    <style>");
    out.push_str(SHARED_CSS);
    out.push_str(mode_css);
    out.push_str("</style>\n</head>\n");
}
