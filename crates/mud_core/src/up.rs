//! Up mode: the tree rendered as formatted HTML.

use std::fmt::Write as _;
use std::ops::ControlFlow;

use mud_ast::visitor::{VisitResult, Visitor, walk_children, walk_node};
use mud_ast::{Checkbox, ColumnAlignment, Node, NodeKind};
use tracing::{debug, trace};
use url::Url;

use crate::alert::{self, Callout, CalloutTitle};
use crate::escape::push_escaped;
use crate::highlight::Highlighter;
use crate::shortcodes::replace_shortcodes;
use crate::slug::SlugTracker;

/// Rewrites an image `src`, given the document's base URL.
///
/// Returning `None` keeps the source as written.
pub type ImageResolver<'f> = dyn Fn(&str, &Url) -> Option<String> + 'f;

/// Renders a tree to an HTML fragment.
///
/// The fragment is meant to sit inside `<article class="up-mode-output">`.
/// Rendering never fails: unknown languages, unresolved images and
/// unrecognized callouts fall back to plain output.
///
/// # Example
///
/// ```rust
/// use mud_ast::AstArena;
/// use mud_core::{NoHighlighter, UpRenderer};
/// use mud_parser::{MarkdownParser, Parser};
///
/// let arena = AstArena::new();
/// let doc = MarkdownParser::new().parse(&arena, "# Hello\n\n**bold**").unwrap();
///
/// let html = UpRenderer::new(&NoHighlighter).render(&doc);
/// assert_eq!(html, "<h1 id=\"hello\">Hello</h1>\n<p><strong>bold</strong></p>\n");
/// ```
pub struct UpRenderer<'r> {
    highlighter: &'r dyn Highlighter,
    base_url: Option<&'r Url>,
    image_resolver: Option<&'r ImageResolver<'r>>,
    shortcodes: bool,
    highlight_code: bool,
}

impl<'r> UpRenderer<'r> {
    /// Creates a renderer with shortcodes and highlighting enabled.
    pub fn new(highlighter: &'r dyn Highlighter) -> Self {
        Self {
            highlighter,
            base_url: None,
            image_resolver: None,
            shortcodes: true,
            highlight_code: true,
        }
    }

    /// Sets the URL of the document, handed to the image resolver.
    pub fn with_base_url(mut self, base_url: Option<&'r Url>) -> Self {
        self.base_url = base_url;
        self
    }

    /// Sets the image resolver. It is only consulted when a base URL is
    /// also set.
    pub fn with_image_resolver(mut self, resolver: Option<&'r ImageResolver<'r>>) -> Self {
        self.image_resolver = resolver;
        self
    }

    /// Enables or disables `:shortcode:` substitution in text.
    pub fn with_shortcodes(mut self, enabled: bool) -> Self {
        self.shortcodes = enabled;
        self
    }

    /// Enables or disables code block highlighting.
    pub fn with_code_highlighting(mut self, enabled: bool) -> Self {
        self.highlight_code = enabled;
        self
    }

    /// Renders `root` and its descendants.
    pub fn render(&self, root: &Node<'_>) -> String {
        let mut visitor = UpVisitor {
            opts: self,
            out: String::new(),
            slugs: SlugTracker::new(),
            tight: false,
            alignments: &[],
            column: 0,
            in_head: false,
        };
        let _ = walk_node(&mut visitor, root);
        debug!(bytes = visitor.out.len(), "rendered up html");
        visitor.out
    }
}

struct UpVisitor<'s, 'a> {
    opts: &'s UpRenderer<'s>,
    out: String,
    slugs: SlugTracker,
    /// Tightness of the innermost enclosing list.
    tight: bool,
    alignments: &'a [Option<ColumnAlignment>],
    column: usize,
    in_head: bool,
}

impl<'a> UpVisitor<'_, 'a> {
    fn push_text(&mut self, text: &str) {
        if self.opts.shortcodes {
            push_escaped(&mut self.out, &replace_shortcodes(text));
        } else {
            push_escaped(&mut self.out, text);
        }
    }

    fn callout(&mut self, children: &'a [Node<'a>], callout: Callout<'a>) -> VisitResult {
        let _ = writeln!(self.out, "<blockquote class=\"alert {}\">", callout.category.css_class());
        self.out.push_str("<p class=\"alert-title\">");
        self.out.push_str(callout.category.icon());
        match callout.title {
            CalloutTitle::Text(title) => push_escaped(&mut self.out, title),
            CalloutTitle::Status(value) => {
                self.out.push_str("Status: <strong>");
                push_escaped(&mut self.out, value);
                self.out.push_str("</strong>");
            }
        }
        self.out.push_str("</p>\n");

        let Some((first, rest)) = children.split_first() else {
            self.out.push_str("</blockquote>\n");
            return ControlFlow::Continue(());
        };
        let inlines = first.children();
        let mut index = 0;
        let mut opened = false;

        if let Some(remainder) = callout.remainder {
            index = 1;
            if !remainder.is_empty() {
                self.out.push_str("<p>");
                self.push_text(remainder);
                opened = true;
            }
            // The line break ending the tag line never reaches the body.
            if matches!(inlines.get(1).map(|n| n.kind), Some(NodeKind::SoftBreak)) {
                index = 2;
            }
        }
        if index < inlines.len() {
            if !opened {
                self.out.push_str("<p>");
                opened = true;
            }
            for inline in &inlines[index..] {
                walk_node(self, inline)?;
            }
        }
        if opened {
            self.out.push_str("</p>\n");
        }
        for block in rest {
            walk_node(self, block)?;
        }
        self.out.push_str("</blockquote>\n");
        ControlFlow::Continue(())
    }
}

impl<'a> Visitor<'a> for UpVisitor<'_, 'a> {
    fn visit_block_quote(&mut self, node: &Node<'a>) -> VisitResult {
        let children = node.children();
        if let Some(callout) = alert::classify(children) {
            return self.callout(children, callout);
        }
        self.out.push_str("<blockquote>\n");
        walk_children(self, node)?;
        self.out.push_str("</blockquote>\n");
        ControlFlow::Continue(())
    }

    fn visit_list(&mut self, node: &Node<'a>, ordered: bool, start: u32) -> VisitResult {
        let outer = self.tight;
        self.tight = !is_loose_list(node.children());
        let tag = if ordered { "ol" } else { "ul" };
        if ordered && start != 1 {
            let _ = writeln!(self.out, "<ol start=\"{start}\">");
        } else {
            let _ = writeln!(self.out, "<{tag}>");
        }
        let flow = walk_children(self, node);
        let _ = writeln!(self.out, "</{tag}>");
        self.tight = outer;
        flow
    }

    fn visit_list_item(&mut self, node: &Node<'a>, checkbox: Option<Checkbox>) -> VisitResult {
        self.out.push_str(if self.tight { "<li>" } else { "<li>\n" });
        if let Some(checkbox) = checkbox {
            self.out.push_str("<input type=\"checkbox\" disabled=\"\"");
            if checkbox == Checkbox::Checked {
                self.out.push_str(" checked=\"\"");
            }
            self.out.push_str(" /> ");
        }
        for child in node.children() {
            if self.tight && matches!(child.kind, NodeKind::Paragraph { .. }) {
                walk_children(self, child)?;
                self.out.push('\n');
            } else {
                walk_node(self, child)?;
            }
        }
        self.out.push_str("</li>\n");
        ControlFlow::Continue(())
    }

    fn visit_heading(&mut self, node: &Node<'a>, level: u8) -> VisitResult {
        let slug = self.slugs.slug(&node.plain_text());
        let _ = write!(self.out, "<h{level} id=\"{slug}\">");
        walk_children(self, node)?;
        let _ = writeln!(self.out, "</h{level}>");
        ControlFlow::Continue(())
    }

    fn visit_paragraph(&mut self, node: &Node<'a>) -> VisitResult {
        self.out.push_str("<p>");
        walk_children(self, node)?;
        self.out.push_str("</p>\n");
        ControlFlow::Continue(())
    }

    fn visit_code_block(
        &mut self,
        _node: &Node<'a>,
        language: Option<&'a str>,
        code: &'a str,
    ) -> VisitResult {
        let language = language.filter(|l| !l.is_empty());
        match language {
            Some(lang) => {
                self.out.push_str("<pre><code class=\"language-");
                push_escaped(&mut self.out, lang);
                self.out.push_str("\">");
            }
            None => self.out.push_str("<pre><code>"),
        }

        let mut code = code.to_owned();
        if !code.is_empty() {
            code.push('\n');
        }
        let highlighted = match language {
            Some(lang) if self.opts.highlight_code => self.opts.highlighter.highlight(&code, Some(lang)),
            _ => None,
        };
        match highlighted {
            Some(html) => self.out.push_str(&html),
            None => {
                trace!(language, "code block emitted unhighlighted");
                push_escaped(&mut self.out, &code);
            }
        }
        self.out.push_str("</code></pre>\n");
        ControlFlow::Continue(())
    }

    fn visit_html_block(&mut self, _node: &Node<'a>, html: &'a str) -> VisitResult {
        self.out.push_str(html);
        self.out.push('\n');
        ControlFlow::Continue(())
    }

    fn visit_thematic_break(&mut self, _node: &Node<'a>) -> VisitResult {
        self.out.push_str("<hr />\n");
        ControlFlow::Continue(())
    }

    fn visit_table(
        &mut self,
        node: &Node<'a>,
        alignments: &'a [Option<ColumnAlignment>],
    ) -> VisitResult {
        self.alignments = alignments;
        self.out.push_str("<table>\n");
        let flow = walk_children(self, node);
        self.out.push_str("</table>\n");
        self.alignments = &[];
        flow
    }

    fn visit_table_head(&mut self, node: &Node<'a>) -> VisitResult {
        self.in_head = true;
        self.out.push_str("<thead>\n");
        let flow = walk_children(self, node);
        self.out.push_str("</thead>\n");
        self.in_head = false;
        flow
    }

    fn visit_table_body(&mut self, node: &Node<'a>) -> VisitResult {
        if node.children().is_empty() {
            return ControlFlow::Continue(());
        }
        self.out.push_str("<tbody>\n");
        walk_children(self, node)?;
        self.out.push_str("</tbody>\n");
        ControlFlow::Continue(())
    }

    fn visit_table_row(&mut self, node: &Node<'a>) -> VisitResult {
        self.column = 0;
        self.out.push_str("<tr>\n");
        walk_children(self, node)?;
        self.out.push_str("</tr>\n");
        ControlFlow::Continue(())
    }

    fn visit_table_cell(&mut self, node: &Node<'a>) -> VisitResult {
        let tag = if self.in_head { "th" } else { "td" };
        match self.alignments.get(self.column).copied().flatten() {
            Some(align) => {
                let _ = write!(self.out, "<{tag} align=\"{}\">", align.as_str());
            }
            None => {
                let _ = write!(self.out, "<{tag}>");
            }
        }
        walk_children(self, node)?;
        let _ = writeln!(self.out, "</{tag}>");
        self.column += 1;
        ControlFlow::Continue(())
    }

    fn visit_emphasis(&mut self, node: &Node<'a>) -> VisitResult {
        self.out.push_str("<em>");
        walk_children(self, node)?;
        self.out.push_str("</em>");
        ControlFlow::Continue(())
    }

    fn visit_strong(&mut self, node: &Node<'a>) -> VisitResult {
        self.out.push_str("<strong>");
        walk_children(self, node)?;
        self.out.push_str("</strong>");
        ControlFlow::Continue(())
    }

    fn visit_strikethrough(&mut self, node: &Node<'a>) -> VisitResult {
        self.out.push_str("<del>");
        walk_children(self, node)?;
        self.out.push_str("</del>");
        ControlFlow::Continue(())
    }

    fn visit_link(
        &mut self,
        node: &Node<'a>,
        destination: &'a str,
        title: Option<&'a str>,
    ) -> VisitResult {
        self.out.push_str("<a href=\"");
        push_escaped(&mut self.out, destination);
        self.out.push('"');
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            self.out.push_str(" title=\"");
            push_escaped(&mut self.out, title);
            self.out.push('"');
        }
        self.out.push('>');
        walk_children(self, node)?;
        self.out.push_str("</a>");
        ControlFlow::Continue(())
    }

    fn visit_image(
        &mut self,
        _node: &Node<'a>,
        source: &'a str,
        title: Option<&'a str>,
        alt: &'a str,
    ) -> VisitResult {
        let resolved = match (self.opts.base_url, self.opts.image_resolver) {
            (Some(base), Some(resolve)) => resolve(source, base),
            _ => None,
        };
        self.out.push_str("<img src=\"");
        push_escaped(&mut self.out, resolved.as_deref().unwrap_or(source));
        self.out.push_str("\" alt=\"");
        push_escaped(&mut self.out, alt);
        self.out.push('"');
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            self.out.push_str(" title=\"");
            push_escaped(&mut self.out, title);
            self.out.push('"');
        }
        self.out.push_str(" />");
        ControlFlow::Continue(())
    }

    fn visit_text(&mut self, _node: &Node<'a>, text: &'a str) -> VisitResult {
        self.push_text(text);
        ControlFlow::Continue(())
    }

    fn visit_inline_code(&mut self, _node: &Node<'a>, code: &'a str) -> VisitResult {
        self.out.push_str("<code>");
        push_escaped(&mut self.out, code);
        self.out.push_str("</code>");
        ControlFlow::Continue(())
    }

    fn visit_inline_html(&mut self, _node: &Node<'a>, html: &'a str) -> VisitResult {
        self.out.push_str(html);
        ControlFlow::Continue(())
    }

    fn visit_line_break(&mut self, _node: &Node<'a>) -> VisitResult {
        self.out.push_str("<br />\n");
        ControlFlow::Continue(())
    }

    fn visit_soft_break(&mut self, _node: &Node<'a>) -> VisitResult {
        self.out.push('\n');
        ControlFlow::Continue(())
    }
}

/// Returns true if blank lines separate two items of the list, or two
/// blocks inside one item.
///
/// The gap after an item is measured from the end of its last block, since
/// an item's own range may extend over trailing blank lines.
fn is_loose_list(items: &[Node<'_>]) -> bool {
    let mut prev_item_end: Option<u32> = None;
    for item in items {
        let Some(range) = item.range else { continue };
        if prev_item_end.is_some_and(|end| range.start.line > end + 1) {
            return true;
        }
        prev_item_end = Some(
            item.children()
                .last()
                .and_then(|last| last.range)
                .map_or(range.end.line, |r| r.end.line),
        );

        let mut prev_block_end: Option<u32> = None;
        for block in item.children() {
            let Some(block_range) = block.range else { continue };
            if prev_block_end.is_some_and(|end| block_range.start.line > end + 1) {
                return true;
            }
            prev_block_end = Some(block_range.end.line);
        }
    }
    false
}
