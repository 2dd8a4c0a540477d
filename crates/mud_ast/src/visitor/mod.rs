//! Read-only traversal of a Mud tree.
//!
//! A renderer implements [`Visitor`], overriding the hooks for the kinds it
//! writes, and starts the walk with [`walk_node`] on the document root.
//! Hooks that take over a container call [`walk_children`] themselves,
//! which lets the Up renderer emit an opening tag, walk, then close it.
//!
//! ```rust
//! use mud_ast::{AstArena, Node, NodeKind};
//! use mud_ast::visitor::{Visitor, VisitResult, walk_node};
//! use std::ops::ControlFlow;
//!
//! /// Counts inline code spans.
//! struct CodeSpans(usize);
//!
//! impl<'a> Visitor<'a> for CodeSpans {
//!     fn visit_inline_code(&mut self, _node: &Node<'a>, _code: &'a str) -> VisitResult {
//!         self.0 += 1;
//!         ControlFlow::Continue(())
//!     }
//! }
//!
//! let arena = AstArena::new();
//! let inlines = arena.alloc_slice_copy(&[
//!     Node::new(NodeKind::InlineCode { code: "a" }, None),
//!     Node::new(NodeKind::Text { text: " and " }, None),
//!     Node::new(NodeKind::InlineCode { code: "b" }, None),
//! ]);
//! let paragraph = Node::new(NodeKind::Paragraph { children: inlines }, None);
//! let doc = Node::new(
//!     NodeKind::Document { children: arena.alloc_slice_copy(&[paragraph]) },
//!     None,
//! );
//!
//! let mut spans = CodeSpans(0);
//! assert!(walk_node(&mut spans, &doc).is_continue());
//! assert_eq!(spans.0, 2);
//! ```

mod visit;
mod walk;

pub use visit::{VisitResult, Visitor};
pub use walk::{walk_children, walk_node};
