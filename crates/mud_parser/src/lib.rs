//! # mud_parser
//!
//! Parser abstraction layer for Mud.
//!
//! This crate provides:
//! - A `Parser` trait for plugging in a Markdown front end
//! - A GFM Markdown parser built on `markdown-rs`
//! - A `LineIndex` for mapping byte offsets to 1-based positions
//!
//! ## Architecture
//!
//! Parsers convert source text into `mud_ast` nodes allocated in a
//! caller-provided arena. The grammar itself lives in the external crate;
//! this crate only adapts its tree: reference links are resolved, soft
//! breaks are made explicit and table sections are synthesized.
//!
//! ## Example
//!
//! ```rust
//! use mud_ast::{AstArena, NodeKind};
//! use mud_parser::{MarkdownParser, Parser};
//!
//! let arena = AstArena::new();
//! let parser = MarkdownParser::new();
//! let source = "# Hello\n\nThis is a paragraph.";
//!
//! let ast = parser.parse(&arena, source).unwrap();
//! assert!(matches!(ast.kind, NodeKind::Document { .. }));
//! assert_eq!(ast.children().len(), 2);
//! ```

mod error;
mod line_index;
mod markdown;
mod traits;

pub use error::ParseError;
pub use line_index::LineIndex;
pub use markdown::MarkdownParser;
pub use traits::Parser;
