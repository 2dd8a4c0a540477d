//! Down mode: the source itself, one table row per line, with Markdown
//! syntax wrapped in `md-*` spans.
//!
//! Rendering runs in three phases:
//!
//! 1. Walk the tree and turn every highlightable node's source range into
//!    an open and a close [`SpanEvent`].
//! 2. Sort the events.
//! 3. Replay them line by line. Spans still open at the end of a row are
//!    closed there and reopened at the start of the next row, so every row
//!    is well-formed on its own.

use std::cmp::Ordering;
use std::fmt::Write as _;
use std::ops::ControlFlow;

use mud_ast::visitor::{VisitResult, Visitor, walk_children, walk_node};
use mud_ast::{Checkbox, ColumnAlignment, Node, Position, SourceRange};
use tracing::{debug, trace, warn};

use crate::escape::push_escaped;
use crate::highlight::Highlighter;
use crate::line_splitter::split_by_line;

const HEADING: &str = "md-heading";
const BLOCKQUOTE: &str = "md-blockquote";
const EMPHASIS: &str = "md-emphasis";
const STRONG: &str = "md-strong";
const LINK: &str = "md-link";
const IMAGE: &str = "md-image";
const STRIKETHROUGH: &str = "md-strikethrough";
const TABLE: &str = "md-table";
const TASK: &str = "md-task";
const CODE: &str = "md-code";
const CODE_FENCE: &str = "md-code-fence";
const CODE_BLOCK: &str = "md-code-block";
const CODE_INFO: &str = "md-code-info";
const HR: &str = "md-hr";
const HTML: &str = "md-html";

/// Opening or closing of one `md-*` span at a source position.
///
/// Events sort by line, then column. At equal positions closes come before
/// opens; among closes the deeper node closes first, among opens the
/// shallower node opens first. The class name breaks any remaining tie so
/// the order is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanEvent {
    /// 1-based source line.
    pub line: u32,
    /// 1-based byte column the tag is placed before.
    pub column: u32,
    pub is_close: bool,
    /// Number of ancestors of the node that produced the event.
    pub depth: u32,
    pub class: &'static str,
}

impl Ord for SpanEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then(self.column.cmp(&other.column))
            .then(other.is_close.cmp(&self.is_close))
            .then_with(|| {
                if self.is_close {
                    other.depth.cmp(&self.depth)
                } else {
                    self.depth.cmp(&other.depth)
                }
            })
            .then(self.class.cmp(other.class))
    }
}

impl PartialOrd for SpanEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Renders Markdown source as a line-numbered table.
///
/// # Example
///
/// ```rust
/// use mud_ast::AstArena;
/// use mud_core::{DownRenderer, NoHighlighter};
/// use mud_parser::{MarkdownParser, Parser};
///
/// let source = "# Hi\n";
/// let arena = AstArena::new();
/// let doc = MarkdownParser::new().parse(&arena, source).unwrap();
///
/// let html = DownRenderer::new(&NoHighlighter).render(source, &doc);
/// assert_eq!(
///     html,
///     "<table class=\"down-lines\"><tbody>\
///      <tr><td class=\"ln\">1</td><td class=\"lc\"><span class=\"md-heading\"># Hi</span></td></tr>\
///      </tbody></table>"
/// );
/// ```
pub struct DownRenderer<'r> {
    highlighter: &'r dyn Highlighter,
    highlight_code: bool,
}

impl<'r> DownRenderer<'r> {
    /// Creates a renderer with code highlighting enabled.
    pub fn new(highlighter: &'r dyn Highlighter) -> Self {
        Self {
            highlighter,
            highlight_code: true,
        }
    }

    /// Enables or disables highlighting inside fenced code blocks.
    pub fn with_code_highlighting(mut self, enabled: bool) -> Self {
        self.highlight_code = enabled;
        self
    }

    /// Renders `source`, whose parsed tree is `root`.
    pub fn render(&self, source: &str, root: &Node<'_>) -> String {
        // A CRLF line ending leaves no '\r' in the cell.
        let lines: Vec<&str> = source
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();

        let mut collector = EventCollector {
            lines: &lines,
            highlighter: self.highlighter,
            highlight_code: self.highlight_code,
            depth: 0,
            events: Vec::new(),
            blocks: Vec::new(),
        };
        let _ = walk_node(&mut collector, root);

        let EventCollector {
            mut events, blocks, ..
        } = collector;
        events.sort();

        let rows = if source.ends_with('\n') {
            lines.len() - 1
        } else {
            lines.len().max(1)
        };
        debug!(
            rows,
            events = events.len(),
            highlighted_blocks = blocks.len(),
            "rendering down table"
        );
        emit_table(&lines, rows, &events, &blocks)
    }
}

/// Pre-highlighted content lines of one fenced code block.
struct HighlightedBlock {
    first_line: u32,
    last_line: u32,
    lines: Vec<String>,
}

impl HighlightedBlock {
    fn line(&self, line: u32) -> Option<&str> {
        if line < self.first_line || line > self.last_line {
            return None;
        }
        self.lines
            .get((line - self.first_line) as usize)
            .map(String::as_str)
    }
}

struct EventCollector<'s> {
    lines: &'s [&'s str],
    highlighter: &'s dyn Highlighter,
    highlight_code: bool,
    /// Nodes entered but not yet exited, including the current one.
    depth: u32,
    events: Vec<SpanEvent>,
    blocks: Vec<HighlightedBlock>,
}

impl EventCollector<'_> {
    /// Depth of the node being visited.
    fn node_depth(&self) -> u32 {
        self.depth.saturating_sub(1)
    }

    /// Byte length of a 1-based line; 0 past the end.
    fn line_len(&self, line: u32) -> u32 {
        (line as usize)
            .checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map_or(0, |l| l.len() as u32)
    }

    fn line(&self, line: u32) -> Option<&str> {
        (line as usize)
            .checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .copied()
    }

    /// Returns the node's range if it can be used to place spans.
    fn usable_range(&self, node: &Node<'_>) -> Option<SourceRange> {
        let range = node.range?;
        if !range.is_well_formed() || range.end.line as usize > self.lines.len() {
            warn!(kind = %node.kind, ?range, "skipping spans for node with unusable source range");
            return None;
        }
        Some(range)
    }

    fn span(&mut self, class: &'static str, depth: u32, open: (u32, u32), close: (u32, u32)) {
        self.events.push(SpanEvent {
            line: open.0,
            column: open.1,
            is_close: false,
            depth,
            class,
        });
        self.events.push(SpanEvent {
            line: close.0,
            column: close.1,
            is_close: true,
            depth,
            class,
        });
    }

    /// Spans the node's whole range. The close lands just past the last
    /// byte.
    fn span_range(&mut self, class: &'static str, range: SourceRange) {
        let depth = self.node_depth();
        self.span(
            class,
            depth,
            (range.start.line, range.start.column),
            (range.end.line, range.end.column + 1),
        );
    }

    fn container(&mut self, node: &Node<'_>, class: &'static str) {
        if let Some(range) = self.usable_range(node) {
            self.span_range(class, range);
        }
    }

    /// Length of the backtick or tilde run at `pos`, 0 if there is none.
    fn fence_at(&self, pos: Position) -> (u8, u32) {
        let Some(line) = self.line(pos.line) else {
            return (0, 0);
        };
        let bytes = line.as_bytes();
        let start = pos.column as usize - 1;
        match bytes.get(start) {
            Some(&c @ (b'`' | b'~')) => {
                let len = bytes[start..].iter().take_while(|&&b| b == c).count();
                (c, len as u32)
            }
            _ => (0, 0),
        }
    }

    /// A closing fence is a run of at least `min_len` fence characters and
    /// nothing else, once container markers and indentation are stripped.
    fn is_closing_fence(&self, line: u32, fence: u8, min_len: u32) -> bool {
        let Some(text) = self.line(line) else {
            return false;
        };
        let body = text
            .trim()
            .trim_start_matches(|c: char| c == '>' || c == ' ' || c == '\t');
        !body.is_empty()
            && body.bytes().all(|b| b == fence)
            && body.len() as u32 >= min_len
    }

    /// Column of the language on the opening fence line.
    fn info_column(&self, pos: Position, fence_len: u32, language: &str) -> u32 {
        let after_fence = (pos.column + fence_len - 1) as usize;
        self.line(pos.line)
            .and_then(|line| line.get(after_fence..))
            .and_then(|rest| rest.find(language))
            .map_or(pos.column + fence_len, |offset| {
                (after_fence + offset) as u32 + 1
            })
    }

    fn fenced_code(
        &mut self,
        range: SourceRange,
        fence: u8,
        fence_len: u32,
        language: Option<&str>,
        code: &str,
    ) {
        let depth = self.node_depth();
        let open_line = range.start.line;
        self.span(
            CODE_FENCE,
            depth,
            (open_line, range.start.column),
            (open_line, self.line_len(open_line) + 1),
        );

        let closed = range.end.line > open_line && self.is_closing_fence(range.end.line, fence, fence_len);
        let first = open_line + 1;
        let last = if closed { range.end.line - 1 } else { range.end.line };
        if first <= last {
            self.span(
                CODE_BLOCK,
                depth,
                (first, 1),
                (last, self.line_len(last).max(1) + 1),
            );
            self.cache_highlighted(first, last, language, code);
        }

        if closed {
            let close_line = range.end.line;
            self.span(
                CODE_FENCE,
                depth,
                (close_line, 1),
                (close_line, self.line_len(close_line) + 1),
            );
        }

        if let Some(lang) = language {
            let column = self.info_column(range.start, fence_len, lang);
            self.span(
                CODE_INFO,
                depth + 1,
                (open_line, column),
                (open_line, column + lang.len() as u32),
            );
        }
    }

    /// Highlights the block once, for direct substitution of its rows.
    ///
    /// Only done when the source lines are exactly the code text; blocks
    /// inside quotes or lists keep their prefixes in the source and take the
    /// generic path.
    fn cache_highlighted(&mut self, first: u32, last: u32, language: Option<&str>, code: &str) {
        if !self.highlight_code {
            return;
        }
        let Some(lang) = language else { return };
        let source_lines = &self.lines[(first - 1) as usize..last as usize];
        if !source_lines.iter().copied().eq(code.split('\n')) {
            trace!(first, last, "code block differs from its source lines, not highlighting");
            return;
        }
        let mut text = String::with_capacity(code.len() + 1);
        text.push_str(code);
        text.push('\n');
        let Some(html) = self.highlighter.highlight(&text, Some(lang)) else {
            trace!(language = lang, "no highlighting for code block");
            return;
        };
        self.blocks.push(HighlightedBlock {
            first_line: first,
            last_line: last,
            lines: split_by_line(&html),
        });
    }
}

impl<'a> Visitor<'a> for EventCollector<'_> {
    fn enter_node(&mut self, _node: &Node<'a>) -> VisitResult {
        self.depth += 1;
        ControlFlow::Continue(())
    }

    fn exit_node(&mut self, _node: &Node<'a>) -> VisitResult {
        self.depth -= 1;
        ControlFlow::Continue(())
    }

    fn visit_heading(&mut self, node: &Node<'a>, _level: u8) -> VisitResult {
        self.container(node, HEADING);
        walk_children(self, node)
    }

    fn visit_block_quote(&mut self, node: &Node<'a>) -> VisitResult {
        self.container(node, BLOCKQUOTE);
        walk_children(self, node)
    }

    fn visit_list_item(&mut self, node: &Node<'a>, checkbox: Option<Checkbox>) -> VisitResult {
        if checkbox.is_some() {
            self.container(node, TASK);
        }
        walk_children(self, node)
    }

    fn visit_table(
        &mut self,
        node: &Node<'a>,
        _alignments: &'a [Option<ColumnAlignment>],
    ) -> VisitResult {
        self.container(node, TABLE);
        walk_children(self, node)
    }

    fn visit_emphasis(&mut self, node: &Node<'a>) -> VisitResult {
        self.container(node, EMPHASIS);
        walk_children(self, node)
    }

    fn visit_strong(&mut self, node: &Node<'a>) -> VisitResult {
        self.container(node, STRONG);
        walk_children(self, node)
    }

    fn visit_strikethrough(&mut self, node: &Node<'a>) -> VisitResult {
        self.container(node, STRIKETHROUGH);
        walk_children(self, node)
    }

    fn visit_link(&mut self, node: &Node<'a>, _destination: &'a str, _title: Option<&'a str>) -> VisitResult {
        self.container(node, LINK);
        walk_children(self, node)
    }

    fn visit_image(
        &mut self,
        node: &Node<'a>,
        _source: &'a str,
        _title: Option<&'a str>,
        _alt: &'a str,
    ) -> VisitResult {
        self.container(node, IMAGE);
        ControlFlow::Continue(())
    }

    fn visit_inline_code(&mut self, node: &Node<'a>, _code: &'a str) -> VisitResult {
        self.container(node, CODE);
        ControlFlow::Continue(())
    }

    fn visit_thematic_break(&mut self, node: &Node<'a>) -> VisitResult {
        self.container(node, HR);
        ControlFlow::Continue(())
    }

    fn visit_html_block(&mut self, node: &Node<'a>, _html: &'a str) -> VisitResult {
        self.container(node, HTML);
        ControlFlow::Continue(())
    }

    fn visit_inline_html(&mut self, node: &Node<'a>, _html: &'a str) -> VisitResult {
        self.container(node, HTML);
        ControlFlow::Continue(())
    }

    fn visit_code_block(&mut self, node: &Node<'a>, language: Option<&'a str>, code: &'a str) -> VisitResult {
        let Some(range) = self.usable_range(node) else {
            return ControlFlow::Continue(());
        };
        let language = language.filter(|l| !l.is_empty());
        let (fence, fence_len) = self.fence_at(range.start);
        if fence_len > 0 {
            self.fenced_code(range, fence, fence_len, language, code);
        } else {
            let depth = self.node_depth();
            self.span(
                CODE_BLOCK,
                depth,
                (range.start.line, range.start.column),
                (range.end.line, self.line_len(range.end.line) + 1),
            );
        }
        ControlFlow::Continue(())
    }
}

fn emit_table(lines: &[&str], rows: usize, events: &[SpanEvent], blocks: &[HighlightedBlock]) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 64).sum::<usize>() + 64);
    out.push_str("<table class=\"down-lines\"><tbody>");
    let mut open: Vec<&'static str> = Vec::new();
    let mut next = 0;

    for row in 0..rows {
        let line_no = row as u32 + 1;

        // Events left behind on earlier lines only update the open set
        while let Some(event) = events.get(next).filter(|e| e.line < line_no) {
            track(event, &mut open);
            next += 1;
        }

        let _ = write!(out, "<tr><td class=\"ln\">{line_no}</td><td class=\"lc\">");
        for class in &open {
            open_tag(&mut out, class);
        }

        if let Some(html) = blocks.iter().find_map(|b| b.line(line_no)) {
            while let Some(event) = events
                .get(next)
                .filter(|e| e.line == line_no && e.column <= 1)
            {
                emit_event(event, &mut out, &mut open);
                next += 1;
            }
            out.push_str(html);
        } else if let Some(line) = lines.get(row) {
            emit_line(line, line_no, events, &mut next, &mut out, &mut open);
        }

        // Events past the end of the line
        while let Some(event) = events.get(next).filter(|e| e.line == line_no) {
            emit_event(event, &mut out, &mut open);
            next += 1;
        }

        for _ in &open {
            out.push_str("</span>");
        }
        out.push_str("</td></tr>");
    }

    out.push_str("</tbody></table>");
    out
}

/// Emits one source line, escaping the text between event positions.
fn emit_line(
    line: &str,
    line_no: u32,
    events: &[SpanEvent],
    next: &mut usize,
    out: &mut String,
    open: &mut Vec<&'static str>,
) {
    let mut written = 0;
    while let Some(event) = events
        .get(*next)
        .filter(|e| e.line == line_no && (e.column as usize) <= line.len())
    {
        let mut target = (event.column as usize).saturating_sub(1);
        while !line.is_char_boundary(target) {
            target += 1;
        }
        if target > written {
            push_escaped(out, &line[written..target]);
            written = target;
        }
        emit_event(event, out, open);
        *next += 1;
    }
    if written < line.len() {
        push_escaped(out, &line[written..]);
    }
}

fn emit_event(event: &SpanEvent, out: &mut String, open: &mut Vec<&'static str>) {
    if event.is_close {
        if track(event, open) {
            out.push_str("</span>");
        }
    } else {
        open_tag(out, event.class);
        track(event, open);
    }
}

/// Applies an event to the open set. Returns false for a close whose span
/// is not open.
fn track(event: &SpanEvent, open: &mut Vec<&'static str>) -> bool {
    if !event.is_close {
        open.push(event.class);
        return true;
    }
    match open.iter().rposition(|&c| c == event.class) {
        Some(idx) => {
            open.remove(idx);
            true
        }
        None => false,
    }
}

fn open_tag(out: &mut String, class: &str) {
    out.push_str("<span class=\"");
    out.push_str(class);
    out.push_str("\">");
}
