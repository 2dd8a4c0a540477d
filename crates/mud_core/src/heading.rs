//! Heading outline extraction.

use std::ops::ControlFlow;

use mud_ast::visitor::{VisitResult, Visitor, walk_node};
use mud_ast::{Node, NodeKind};
use serde::Serialize;
use tracing::debug;

use crate::slug::SlugTracker;

/// A styled run of heading text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum OutlineTextSegment {
    /// Ordinary text, including emphasised or linked text.
    Plain(String),
    /// Text of a code span.
    Code(String),
}

/// A heading of the document, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineHeading {
    /// Slug, identical to the `id` the Up renderer gives the `<hN>`.
    pub id: String,
    /// Heading level, 1 to 6.
    pub level: u8,
    /// Flattened plain text.
    pub text: String,
    /// Styled segments for display.
    pub segments: Vec<OutlineTextSegment>,
    /// 1-based line of the heading, or 0 when the node has no range.
    pub source_line: u32,
}

/// Collects every heading of a tree.
///
/// Slugs are deduplicated in document order with a fresh tracker, so they
/// match the ids of an Up render of the same tree.
///
/// # Example
///
/// ```rust
/// use mud_ast::AstArena;
/// use mud_core::extract_headings;
/// use mud_parser::{MarkdownParser, Parser};
///
/// let arena = AstArena::new();
/// let doc = MarkdownParser::new().parse(&arena, "# Intro\n\n## Intro").unwrap();
///
/// let ids: Vec<_> = extract_headings(&doc).into_iter().map(|h| h.id).collect();
/// assert_eq!(ids, ["intro", "intro-1"]);
/// ```
pub fn extract_headings(root: &Node<'_>) -> Vec<OutlineHeading> {
    let mut extractor = HeadingExtractor::default();
    let _ = walk_node(&mut extractor, root);
    debug!(headings = extractor.headings.len(), "extracted headings");
    extractor.headings
}

#[derive(Default)]
struct HeadingExtractor {
    headings: Vec<OutlineHeading>,
    slugs: SlugTracker,
}

impl<'a> Visitor<'a> for HeadingExtractor {
    fn visit_heading(&mut self, node: &Node<'a>, level: u8) -> VisitResult {
        let text = node.plain_text();
        let mut segments = Vec::new();
        collect_segments(node.children(), &mut segments);

        self.headings.push(OutlineHeading {
            id: self.slugs.slug(&text),
            level,
            text,
            segments,
            source_line: node.range.map_or(0, |r| r.start.line),
        });
        // Headings never nest
        ControlFlow::Continue(())
    }
}

fn collect_segments(children: &[Node<'_>], out: &mut Vec<OutlineTextSegment>) {
    for child in children {
        match child.kind {
            NodeKind::InlineCode { code } => out.push(OutlineTextSegment::Code(code.to_owned())),
            NodeKind::Text { text } => out.push(OutlineTextSegment::Plain(text.to_owned())),
            NodeKind::SoftBreak => out.push(OutlineTextSegment::Plain(" ".to_owned())),
            NodeKind::Image { alt, .. } => out.push(OutlineTextSegment::Plain(alt.to_owned())),
            _ => collect_segments(child.children(), out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mud_ast::AstArena;
    use mud_parser::{MarkdownParser, Parser};
    use pretty_assertions::assert_eq;

    fn headings(source: &str) -> Vec<OutlineHeading> {
        let arena = AstArena::new();
        let doc = MarkdownParser::new().parse(&arena, source).unwrap();
        extract_headings(&doc)
    }

    #[test]
    fn test_levels_and_lines() {
        let found = headings("# One\n\ntext\n\n## Two\n\n### Three\n");
        let summary: Vec<_> = found
            .iter()
            .map(|h| (h.level, h.text.as_str(), h.source_line))
            .collect();
        assert_eq!(summary, vec![(1, "One", 1), (2, "Two", 5), (3, "Three", 7)]);
    }

    #[test]
    fn test_duplicate_ids_are_suffixed() {
        let ids: Vec<_> = headings("# Features\n# Features\n# Features\n")
            .into_iter()
            .map(|h| h.id)
            .collect();
        assert_eq!(ids, vec!["features", "features-1", "features-2"]);
    }

    #[test]
    fn test_segments_split_code_spans() {
        let found = headings("## Use `render()` *now*\n");
        assert_eq!(
            found[0].segments,
            vec![
                OutlineTextSegment::Plain("Use ".into()),
                OutlineTextSegment::Code("render()".into()),
                OutlineTextSegment::Plain(" ".into()),
                OutlineTextSegment::Plain("now".into()),
            ]
        );
        assert_eq!(found[0].text, "Use render() now");
        assert_eq!(found[0].id, "use-render-now");
    }

    #[test]
    fn test_setext_heading() {
        let found = headings("Title\n=====\n\nSub\n---\n");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].level, 1);
        assert_eq!(found[1].level, 2);
        assert_eq!(found[1].source_line, 4);
    }

    #[test]
    fn test_headings_inside_containers() {
        let found = headings("> # Quoted\n\n- ## Listed\n");
        let texts: Vec<_> = found.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, vec!["Quoted", "Listed"]);
    }

    #[test]
    fn test_no_headings() {
        assert!(headings("just a paragraph\n").is_empty());
    }

    #[test]
    fn test_serializes_camel_case() {
        let found = headings("# Hi `x`\n");
        let json = serde_json::to_value(&found[0]).unwrap();
        assert_eq!(json["sourceLine"], 1);
        assert_eq!(json["segments"][1]["kind"], "code");
        assert_eq!(json["segments"][1]["text"], "x");
    }
}
