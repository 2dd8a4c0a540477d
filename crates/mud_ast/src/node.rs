//! Node definitions.
//!
//! The core AST node type shared by both renderers.

use serde::Serialize;

use crate::SourceRange;

/// A node in the Markdown AST.
///
/// Nodes are small `Copy` values that borrow their children and string data
/// from an [`AstArena`](crate::AstArena). The `'a` lifetime ties a node to
/// that arena.
///
/// # Example
///
/// ```rust
/// use mud_ast::{AstArena, Node, NodeKind};
///
/// let arena = AstArena::new();
///
/// let text = Node::new(NodeKind::Text { text: arena.alloc_str("bold") }, None);
/// let children = arena.alloc_slice_copy(&[text]);
/// let strong = Node::new(NodeKind::Strong { children }, None);
///
/// assert!(strong.is_container());
/// assert_eq!(strong.plain_text(), "bold");
/// ```
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Node<'a> {
    /// The kind of this node, with its kind-specific data.
    #[serde(flatten)]
    pub kind: NodeKind<'a>,

    /// Source extent, when the parser could attribute one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<SourceRange>,
}

/// Closed set of node kinds.
///
/// Container kinds carry a `children` slice; leaf kinds carry only their own
/// data.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "type")]
pub enum NodeKind<'a> {
    // Document structure
    /// Root document node.
    Document { children: &'a [Node<'a>] },

    // Block elements
    /// ATX or setext heading.
    Heading { level: u8, children: &'a [Node<'a>] },
    /// Paragraph containing inline content.
    Paragraph { children: &'a [Node<'a>] },
    /// Block quote.
    BlockQuote { children: &'a [Node<'a>] },
    /// Ordered or unordered list. `start` is 1 for unordered lists.
    List {
        ordered: bool,
        start: u32,
        children: &'a [Node<'a>],
    },
    /// Item in a list; `checkbox` is set for GFM task items.
    ListItem {
        #[serde(skip_serializing_if = "Option::is_none")]
        checkbox: Option<Checkbox>,
        children: &'a [Node<'a>],
    },
    /// Fenced or indented code block.
    CodeBlock {
        #[serde(skip_serializing_if = "Option::is_none")]
        language: Option<&'a str>,
        code: &'a str,
    },
    /// Thematic break (`---`).
    ThematicBreak,
    /// Raw HTML block.
    HtmlBlock { html: &'a str },

    // Tables (GFM)
    /// Table with one alignment entry per column.
    Table {
        alignments: &'a [Option<ColumnAlignment>],
        children: &'a [Node<'a>],
    },
    /// Header section of a table (a single row).
    TableHead { children: &'a [Node<'a>] },
    /// Body section of a table.
    TableBody { children: &'a [Node<'a>] },
    /// Table row.
    TableRow { children: &'a [Node<'a>] },
    /// Table cell.
    TableCell { children: &'a [Node<'a>] },

    // Inline elements
    /// Literal text.
    Text { text: &'a str },
    /// Soft line break inside a paragraph.
    SoftBreak,
    /// Hard line break (two trailing spaces or a backslash).
    LineBreak,
    /// Emphasis (italic).
    Emphasis { children: &'a [Node<'a>] },
    /// Strong emphasis (bold).
    Strong { children: &'a [Node<'a>] },
    /// Strikethrough text (GFM).
    Strikethrough { children: &'a [Node<'a>] },
    /// Inline code span.
    InlineCode { code: &'a str },
    /// Hyperlink.
    Link {
        destination: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<&'a str>,
        children: &'a [Node<'a>],
    },
    /// Image.
    Image {
        source: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<&'a str>,
        alt: &'a str,
    },
    /// Raw inline HTML.
    InlineHtml { html: &'a str },
}

/// State of a GFM task-list checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Checkbox {
    Checked,
    Unchecked,
}

/// Column alignment declared in a table's delimiter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAlignment {
    Left,
    Center,
    Right,
}

impl ColumnAlignment {
    /// Value of the HTML `align` attribute.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ColumnAlignment::Left => "left",
            ColumnAlignment::Center => "center",
            ColumnAlignment::Right => "right",
        }
    }
}

impl<'a> Node<'a> {
    /// Creates a node.
    #[inline]
    pub const fn new(kind: NodeKind<'a>, range: Option<SourceRange>) -> Self {
        Self { kind, range }
    }

    /// Returns the child nodes. Leaf kinds return an empty slice.
    #[inline]
    pub const fn children(&self) -> &'a [Node<'a>] {
        match self.kind {
            NodeKind::Document { children }
            | NodeKind::Heading { children, .. }
            | NodeKind::Paragraph { children }
            | NodeKind::BlockQuote { children }
            | NodeKind::List { children, .. }
            | NodeKind::ListItem { children, .. }
            | NodeKind::Table { children, .. }
            | NodeKind::TableHead { children }
            | NodeKind::TableBody { children }
            | NodeKind::TableRow { children }
            | NodeKind::TableCell { children }
            | NodeKind::Emphasis { children }
            | NodeKind::Strong { children }
            | NodeKind::Strikethrough { children }
            | NodeKind::Link { children, .. } => children,
            NodeKind::CodeBlock { .. }
            | NodeKind::ThematicBreak
            | NodeKind::HtmlBlock { .. }
            | NodeKind::Text { .. }
            | NodeKind::SoftBreak
            | NodeKind::LineBreak
            | NodeKind::InlineCode { .. }
            | NodeKind::Image { .. }
            | NodeKind::InlineHtml { .. } => &[],
        }
    }

    /// Returns true if this kind can hold children, even when it holds none.
    #[inline]
    pub const fn is_container(&self) -> bool {
        !matches!(
            self.kind,
            NodeKind::CodeBlock { .. }
                | NodeKind::ThematicBreak
                | NodeKind::HtmlBlock { .. }
                | NodeKind::Text { .. }
                | NodeKind::SoftBreak
                | NodeKind::LineBreak
                | NodeKind::InlineCode { .. }
                | NodeKind::Image { .. }
                | NodeKind::InlineHtml { .. }
        )
    }

    /// Returns the text of a `Text` node.
    #[inline]
    pub const fn text(&self) -> Option<&'a str> {
        match self.kind {
            NodeKind::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Returns the flattened plain text of this node and its descendants.
    ///
    /// Code spans contribute their content, line breaks become a single
    /// space and images contribute their alt text. Raw HTML is dropped.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.write_plain_text(&mut out);
        out
    }

    fn write_plain_text(&self, out: &mut String) {
        match self.kind {
            NodeKind::Text { text } => out.push_str(text),
            NodeKind::InlineCode { code } => out.push_str(code),
            NodeKind::SoftBreak | NodeKind::LineBreak => out.push(' '),
            NodeKind::Image { alt, .. } => out.push_str(alt),
            NodeKind::CodeBlock { code, .. } => out.push_str(code),
            _ => {
                for child in self.children() {
                    child.write_plain_text(out);
                }
            }
        }
    }
}

impl NodeKind<'_> {
    /// Stable name of the kind, used in logs and diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            NodeKind::Document { .. } => "Document",
            NodeKind::Heading { .. } => "Heading",
            NodeKind::Paragraph { .. } => "Paragraph",
            NodeKind::BlockQuote { .. } => "BlockQuote",
            NodeKind::List { .. } => "List",
            NodeKind::ListItem { .. } => "ListItem",
            NodeKind::CodeBlock { .. } => "CodeBlock",
            NodeKind::ThematicBreak => "ThematicBreak",
            NodeKind::HtmlBlock { .. } => "HtmlBlock",
            NodeKind::Table { .. } => "Table",
            NodeKind::TableHead { .. } => "TableHead",
            NodeKind::TableBody { .. } => "TableBody",
            NodeKind::TableRow { .. } => "TableRow",
            NodeKind::TableCell { .. } => "TableCell",
            NodeKind::Text { .. } => "Text",
            NodeKind::SoftBreak => "SoftBreak",
            NodeKind::LineBreak => "LineBreak",
            NodeKind::Emphasis { .. } => "Emphasis",
            NodeKind::Strong { .. } => "Strong",
            NodeKind::Strikethrough { .. } => "Strikethrough",
            NodeKind::InlineCode { .. } => "InlineCode",
            NodeKind::Link { .. } => "Link",
            NodeKind::Image { .. } => "Image",
            NodeKind::InlineHtml { .. } => "InlineHtml",
        }
    }
}

impl std::fmt::Display for NodeKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
