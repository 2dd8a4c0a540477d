//! # mud_core
//!
//! Dual-mode Markdown rendering for Mud.
//!
//! This crate provides:
//! - Up mode: the document rendered as formatted HTML, with heading
//!   anchors, GFM alerts and asides, emoji shortcodes and highlighted code
//! - Down mode: the raw source as a line-numbered table whose syntax is
//!   marked with `md-*` spans
//! - The heading outline of a document
//! - Full HTML documents with bundled themes
//! - Render options loaded from JSON
//!
//! ## Architecture
//!
//! Both renderers walk a `mud_ast` tree produced by `mud_parser`. Up mode
//! writes HTML while visiting; Down mode collects open/close span events
//! from the tree's source ranges, sorts them, and replays them over the
//! source lines. Code highlighting goes through the [`Highlighter`] trait,
//! backed by `syntect` when the `syntax-highlighting` feature is on.
//!
//! ## Example
//!
//! ```rust
//! use mud_core::{Mud, RenderOptions};
//!
//! let mud = Mud::new(RenderOptions::default());
//!
//! let html = mud.render_up("> [!TIP]\n> Try it", None, None).unwrap();
//! assert!(html.starts_with("<blockquote class=\"alert alert-tip\">"));
//!
//! let outline = mud.extract_headings("# One\n## Two").unwrap();
//! assert_eq!(outline[1].id, "two");
//! ```

pub mod alert;
mod down;
mod error;
mod escape;
mod heading;
mod highlight;
pub mod image_data_uri;
mod line_splitter;
mod options;
mod renderer;
mod shortcodes;
mod slug;
pub mod template;
mod up;

pub use down::{DownRenderer, SpanEvent};
pub use error::RenderError;
pub use escape::escape_html;
pub use heading::{OutlineHeading, OutlineTextSegment, extract_headings};
#[cfg(feature = "syntax-highlighting")]
pub use highlight::SyntectHighlighter;
pub use highlight::{Highlighter, NoHighlighter, default_highlighter};
pub use line_splitter::split_by_line;
pub use options::{HtmlClass, Mode, RenderOptions};
pub use renderer::Mud;
pub use shortcodes::{emoji_for, replace_shortcodes};
pub use slug::{SlugTracker, slugify};
pub use template::{DownDocument, Theme, UpDocument};
pub use up::{ImageResolver, UpRenderer};

/// Version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
