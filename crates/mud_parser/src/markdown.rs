//! Markdown parser using markdown-rs (wooorm/markdown-rs).
//!
//! This parser converts the mdast produced by the `markdown` crate into the
//! Mud AST. The conversion:
//!
//! - resolves reference links and images against their definitions and
//!   drops the definitions themselves,
//! - coalesces adjacent text runs and splits them at line endings into
//!   `Text` / `SoftBreak` / `Text`,
//! - tells block HTML from inline HTML by the parent context,
//! - wraps the first table row in `TableHead` and the rest in `TableBody`.

use std::collections::HashMap;

use markdown::mdast::{self, AlignKind};
use markdown::{Constructs, ParseOptions, to_mdast};
use mud_ast::{AstArena, Checkbox, ColumnAlignment, Node, NodeKind, SourceRange};
use tracing::debug;

use crate::{LineIndex, ParseError, Parser};

/// Markdown parser implementation.
///
/// Uses `markdown-rs` with CommonMark plus the GFM extensions (tables,
/// strikethrough, autolink literals, task list items). Footnotes are turned
/// off; both renderers treat `[^x]` as literal text.
pub struct MarkdownParser;

impl MarkdownParser {
    /// Creates a new Markdown parser with default options.
    pub fn new() -> Self {
        Self
    }

    /// Gets default parse options (GFM without footnotes).
    fn default_options() -> ParseOptions {
        ParseOptions {
            constructs: Constructs {
                gfm_footnote_definition: false,
                gfm_label_start_footnote: false,
                ..Constructs::gfm()
            },
            ..ParseOptions::gfm()
        }
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for MarkdownParser {
    fn parse<'a>(&self, arena: &'a AstArena, source: &str) -> Result<Node<'a>, ParseError> {
        let options = Self::default_options();
        let mdast =
            to_mdast(source, &options).map_err(|e| ParseError::invalid_source(e.to_string()))?;

        let mdast::Node::Root(root) = &mdast else {
            return Err(ParseError::internal("markdown parser did not return a root"));
        };

        let mut converter = Converter::new(arena, source);
        converter.collect_definitions(&root.children);

        let children = converter.convert_children(&root.children, false);
        let range = converter.range_of(&mdast);

        debug!(
            "Parsed {} bytes into {} top-level blocks ({} definitions)",
            source.len(),
            children.len(),
            converter.definitions.len()
        );

        Ok(Node::new(NodeKind::Document { children }, range))
    }
}

/// Target of a link reference definition.
struct Definition {
    url: String,
    title: Option<String>,
}

/// Per-parse conversion state.
struct Converter<'a, 's> {
    arena: &'a AstArena,
    source: &'s str,
    index: LineIndex,
    definitions: HashMap<String, Definition>,
}

impl<'a, 's> Converter<'a, 's> {
    fn new(arena: &'a AstArena, source: &'s str) -> Self {
        Self {
            arena,
            source,
            index: LineIndex::new(source),
            definitions: HashMap::new(),
        }
    }

    /// Records every definition in the tree. The first definition of a label
    /// wins.
    fn collect_definitions(&mut self, nodes: &[mdast::Node]) {
        for node in nodes {
            if let mdast::Node::Definition(def) = node {
                self.definitions
                    .entry(normalize_label(&def.identifier))
                    .or_insert_with(|| Definition {
                        url: def.url.clone(),
                        title: def.title.clone(),
                    });
            } else if let Some(children) = node.children() {
                self.collect_definitions(children);
            }
        }
    }

    fn range_of(&self, node: &mdast::Node) -> Option<SourceRange> {
        node.position()
            .map(|pos| self.index.range(pos.start.offset, pos.end.offset))
    }

    fn alloc_opt(&self, value: Option<&String>) -> Option<&'a str> {
        value.map(|v| self.arena.alloc_str(v))
    }

    /// Converts a list of mdast children to an arena slice.
    ///
    /// `inline` is true when the parent holds phrasing content.
    fn convert_children(&self, children: &[mdast::Node], inline: bool) -> &'a [Node<'a>] {
        let mut out = Vec::with_capacity(children.len());
        let mut pending: Option<PendingText> = None;

        for child in children {
            if let mdast::Node::Text(text) = child {
                let span = text.position.as_ref().map(|p| (p.start.offset, p.end.offset));
                match pending.as_mut() {
                    Some(run) => run.push(&text.value, span),
                    None => pending = Some(PendingText::new(&text.value, span)),
                }
                continue;
            }

            if let Some(run) = pending.take() {
                self.push_text(&mut out, &run);
            }
            self.convert_into(&mut out, child, inline);
        }

        if let Some(run) = pending.take() {
            self.push_text(&mut out, &run);
        }

        self.arena.alloc_slice_copy(&out)
    }

    /// Converts one mdast node, appending zero or more nodes to `out`.
    fn convert_into(&self, out: &mut Vec<Node<'a>>, node: &mdast::Node, inline: bool) {
        let range = self.range_of(node);

        let kind = match node {
            mdast::Node::Root(root) => NodeKind::Document {
                children: self.convert_children(&root.children, false),
            },

            mdast::Node::Paragraph(para) => NodeKind::Paragraph {
                children: self.convert_children(&para.children, true),
            },

            mdast::Node::Heading(heading) => NodeKind::Heading {
                level: heading.depth,
                children: self.convert_children(&heading.children, true),
            },

            mdast::Node::Blockquote(quote) => NodeKind::BlockQuote {
                children: self.convert_children(&quote.children, false),
            },

            mdast::Node::List(list) => NodeKind::List {
                ordered: list.ordered,
                start: list.start.unwrap_or(1),
                children: self.convert_children(&list.children, false),
            },

            mdast::Node::ListItem(item) => NodeKind::ListItem {
                checkbox: item.checked.map(|checked| {
                    if checked {
                        Checkbox::Checked
                    } else {
                        Checkbox::Unchecked
                    }
                }),
                children: self.convert_children(&item.children, false),
            },

            mdast::Node::Code(code) => NodeKind::CodeBlock {
                language: self.alloc_opt(code.lang.as_ref()),
                code: self.arena.alloc_str(&code.value),
            },

            mdast::Node::ThematicBreak(_) => NodeKind::ThematicBreak,

            mdast::Node::Html(html) => {
                let html = self.arena.alloc_str(&html.value);
                if inline {
                    NodeKind::InlineHtml { html }
                } else {
                    NodeKind::HtmlBlock { html }
                }
            }

            // Table support (GFM)
            mdast::Node::Table(table) => self.convert_table(table),

            mdast::Node::TableRow(row) => NodeKind::TableRow {
                children: self.convert_children(&row.children, false),
            },

            mdast::Node::TableCell(cell) => NodeKind::TableCell {
                children: self.convert_children(&cell.children, true),
            },

            mdast::Node::Text(text) => {
                let span = text.position.as_ref().map(|p| (p.start.offset, p.end.offset));
                self.push_text(out, &PendingText::new(&text.value, span));
                return;
            }

            mdast::Node::Break(_) => NodeKind::LineBreak,

            mdast::Node::Emphasis(em) => NodeKind::Emphasis {
                children: self.convert_children(&em.children, true),
            },

            mdast::Node::Strong(strong) => NodeKind::Strong {
                children: self.convert_children(&strong.children, true),
            },

            mdast::Node::Delete(del) => NodeKind::Strikethrough {
                children: self.convert_children(&del.children, true),
            },

            mdast::Node::InlineCode(code) => NodeKind::InlineCode {
                code: self.arena.alloc_str(&code.value),
            },

            mdast::Node::Link(link) => NodeKind::Link {
                destination: self.arena.alloc_str(&link.url),
                title: self.alloc_opt(link.title.as_ref()),
                children: self.convert_children(&link.children, true),
            },

            mdast::Node::Image(image) => NodeKind::Image {
                source: self.arena.alloc_str(&image.url),
                title: self.alloc_opt(image.title.as_ref()),
                alt: self.arena.alloc_str(&image.alt),
            },

            // Reference nodes resolve to plain links and images
            mdast::Node::LinkReference(reference) => {
                let children = self.convert_children(&reference.children, true);
                match self.definitions.get(&normalize_label(&reference.identifier)) {
                    Some(def) => NodeKind::Link {
                        destination: self.arena.alloc_str(&def.url),
                        title: self.alloc_opt(def.title.as_ref()),
                        children,
                    },
                    None => {
                        debug!("Unresolved link reference `{}`", reference.identifier);
                        out.extend_from_slice(children);
                        return;
                    }
                }
            }

            mdast::Node::ImageReference(reference) => {
                match self.definitions.get(&normalize_label(&reference.identifier)) {
                    Some(def) => NodeKind::Image {
                        source: self.arena.alloc_str(&def.url),
                        title: self.alloc_opt(def.title.as_ref()),
                        alt: self.arena.alloc_str(&reference.alt),
                    },
                    None => {
                        debug!("Unresolved image reference `{}`", reference.identifier);
                        NodeKind::Text {
                            text: self.arena.alloc_str(&reference.alt),
                        }
                    }
                }
            }

            mdast::Node::Definition(_) => return,

            // Constructs that are switched off never reach here; keep any
            // content they carry.
            other => {
                debug!("Flattening unsupported mdast node: {:?}", other.position());
                if let Some(children) = other.children() {
                    out.extend_from_slice(self.convert_children(children, inline));
                }
                return;
            }
        };

        out.push(Node::new(kind, range));
    }

    fn convert_table(&self, table: &mdast::Table) -> NodeKind<'a> {
        let alignments = self
            .arena
            .alloc_slice_fill_iter(table.align.iter().map(|align| match align {
                AlignKind::Left => Some(ColumnAlignment::Left),
                AlignKind::Center => Some(ColumnAlignment::Center),
                AlignKind::Right => Some(ColumnAlignment::Right),
                AlignKind::None => None,
            }));

        let (head_rows, body_rows) = match table.children.split_first() {
            Some((first, rest)) => (std::slice::from_ref(first), rest),
            None => (&[][..], &[][..]),
        };

        let head = Node::new(
            NodeKind::TableHead {
                children: self.convert_children(head_rows, false),
            },
            head_rows.first().and_then(|row| self.range_of(row)),
        );

        let body_range = match (
            body_rows.first().and_then(|row| row.position()),
            body_rows.last().and_then(|row| row.position()),
        ) {
            (Some(first), Some(last)) => Some(self.index.range(first.start.offset, last.end.offset)),
            _ => None,
        };
        let body = Node::new(
            NodeKind::TableBody {
                children: self.convert_children(body_rows, false),
            },
            body_range,
        );

        NodeKind::Table {
            alignments,
            children: self.arena.alloc_slice_copy(&[head, body]),
        }
    }

    /// Emits a coalesced text run, splitting it at line endings.
    fn push_text(&self, out: &mut Vec<Node<'a>>, run: &PendingText) {
        if !run.value.contains('\n') {
            let range = run.span.map(|(start, end)| self.index.range(start, end));
            out.push(Node::new(
                NodeKind::Text {
                    text: self.arena.alloc_str(&run.value),
                },
                range,
            ));
            return;
        }

        // Continuation lines lose their indentation in the value, so each
        // piece is located in the source from a moving cursor.
        let (mut cursor, end) = run.span.unwrap_or((0, 0));
        for (i, segment) in run.value.split('\n').enumerate() {
            if i > 0 {
                let range = self.find(cursor, end, "\n").map(|at| {
                    cursor = at + 1;
                    self.index.range(at, at + 1)
                });
                out.push(Node::new(NodeKind::SoftBreak, range));
            }
            if segment.is_empty() {
                continue;
            }
            let range = self.find(cursor, end, segment).map(|at| {
                cursor = at + segment.len();
                self.index.range(at, cursor)
            });
            out.push(Node::new(
                NodeKind::Text {
                    text: self.arena.alloc_str(segment),
                },
                range,
            ));
        }
    }

    fn find(&self, from: usize, to: usize, needle: &str) -> Option<usize> {
        self.source
            .get(from..to)?
            .find(needle)
            .map(|offset| from + offset)
    }
}

/// Adjacent text runs waiting to be emitted as one.
struct PendingText {
    value: String,
    span: Option<(usize, usize)>,
}

impl PendingText {
    fn new(value: &str, span: Option<(usize, usize)>) -> Self {
        Self {
            value: value.to_owned(),
            span,
        }
    }

    fn push(&mut self, value: &str, span: Option<(usize, usize)>) {
        self.value.push_str(value);
        self.span = match (self.span, span) {
            (Some((start, _)), Some((_, end))) => Some((start, end)),
            _ => None,
        };
    }
}

/// Normalizes a reference label: whitespace runs collapse to one space and
/// case is folded.
fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
