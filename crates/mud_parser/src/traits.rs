//! The seam between a Markdown grammar and the Mud tree.

use mud_ast::{AstArena, Node};

use crate::ParseError;

/// Turns Markdown source into a Mud tree.
///
/// The returned root is always a `Document`. Every node, child list and
/// copied string lives in `arena`; text that can be borrowed straight from
/// the source is not copied. Source ranges are 1-based with an inclusive
/// end column, the form the Down renderer slices lines with.
///
/// ```rust
/// use mud_ast::{AstArena, Node, NodeKind};
/// use mud_parser::{ParseError, Parser};
///
/// /// Reads every line as its own paragraph.
/// struct LinesParser;
///
/// impl Parser for LinesParser {
///     fn parse<'a>(&self, arena: &'a AstArena, source: &str) -> Result<Node<'a>, ParseError> {
///         let blocks: Vec<Node<'a>> = source
///             .lines()
///             .map(|line| {
///                 let text = Node::new(NodeKind::Text { text: arena.alloc_str(line) }, None);
///                 let children = arena.alloc_slice_copy(&[text]);
///                 Node::new(NodeKind::Paragraph { children }, None)
///             })
///             .collect();
///         let children = arena.alloc_slice_copy(&blocks);
///         Ok(Node::new(NodeKind::Document { children }, None))
///     }
/// }
///
/// let arena = AstArena::new();
/// let doc = LinesParser.parse(&arena, "one\ntwo").unwrap();
/// assert_eq!(doc.children().len(), 2);
/// assert_eq!(doc.children()[1].plain_text(), "two");
/// ```
pub trait Parser {
    /// Parses `source` into a tree allocated in `arena`.
    fn parse<'a>(&self, arena: &'a AstArena, source: &str) -> Result<Node<'a>, ParseError>;
}
