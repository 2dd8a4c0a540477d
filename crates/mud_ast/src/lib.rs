//! # mud_ast
//!
//! Markdown AST definitions for Mud.
//!
//! This crate provides the tree both renderers read: a closed set of node
//! kinds, each carrying its own data, plus 1-based source ranges that the
//! Down renderer uses to place highlighting spans over the raw text.
//!
//! ## Architecture
//!
//! - Uses `bumpalo` for Arena allocation
//! - All nodes of one document live in a single arena
//! - Nodes are `Copy` and borrow their children and strings from the arena
//! - The tree is read-only once built; renders never mutate it
//!
//! ## Example
//!
//! ```rust
//! use mud_ast::{AstArena, Node, NodeKind, Position, SourceRange};
//!
//! let arena = AstArena::new();
//!
//! let text = Node::new(
//!     NodeKind::Text { text: arena.alloc_str("Hello") },
//!     Some(SourceRange::new(Position::new(1, 3), Position::new(1, 7))),
//! );
//! let children = arena.alloc_slice_copy(&[text]);
//! let heading = Node::new(NodeKind::Heading { level: 1, children }, None);
//!
//! assert_eq!(heading.children().len(), 1);
//! assert_eq!(heading.plain_text(), "Hello");
//! ```

mod arena;
mod node;
mod range;
pub mod visitor;

pub use arena::AstArena;
pub use node::{Checkbox, ColumnAlignment, Node, NodeKind};
pub use range::{Position, SourceRange};

// Re-export commonly used visitor items for convenience
pub use visitor::{VisitResult, Visitor, walk_children, walk_node};
