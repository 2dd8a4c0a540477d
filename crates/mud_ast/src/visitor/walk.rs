//! Dispatch from a node to its [`Visitor`] hook.

use std::ops::ControlFlow;

use crate::{Node, NodeKind};

use super::visit::{VisitResult, Visitor};

/// Visits `node`: `enter_node`, then the hook for its kind, then
/// `exit_node`. A `Break` from any of them is returned as is and the
/// remaining steps are skipped.
pub fn walk_node<'a, V>(visitor: &mut V, node: &Node<'a>) -> VisitResult
where
    V: Visitor<'a>,
{
    visitor.enter_node(node)?;

    match node.kind {
        NodeKind::Document { .. } => walk_children(visitor, node),
        NodeKind::Heading { level, .. } => visitor.visit_heading(node, level),
        NodeKind::Paragraph { .. } => visitor.visit_paragraph(node),
        NodeKind::BlockQuote { .. } => visitor.visit_block_quote(node),
        NodeKind::List { ordered, start, .. } => visitor.visit_list(node, ordered, start),
        NodeKind::ListItem { checkbox, .. } => visitor.visit_list_item(node, checkbox),
        NodeKind::CodeBlock { language, code } => visitor.visit_code_block(node, language, code),
        NodeKind::ThematicBreak => visitor.visit_thematic_break(node),
        NodeKind::HtmlBlock { html } => visitor.visit_html_block(node, html),
        NodeKind::Table { alignments, .. } => visitor.visit_table(node, alignments),
        NodeKind::TableHead { .. } => visitor.visit_table_head(node),
        NodeKind::TableBody { .. } => visitor.visit_table_body(node),
        NodeKind::TableRow { .. } => visitor.visit_table_row(node),
        NodeKind::TableCell { .. } => visitor.visit_table_cell(node),
        NodeKind::Text { text } => visitor.visit_text(node, text),
        NodeKind::SoftBreak => visitor.visit_soft_break(node),
        NodeKind::LineBreak => visitor.visit_line_break(node),
        NodeKind::Emphasis { .. } => visitor.visit_emphasis(node),
        NodeKind::Strong { .. } => visitor.visit_strong(node),
        NodeKind::Strikethrough { .. } => visitor.visit_strikethrough(node),
        NodeKind::InlineCode { code } => visitor.visit_inline_code(node, code),
        NodeKind::Link {
            destination, title, ..
        } => visitor.visit_link(node, destination, title),
        NodeKind::Image { source, title, alt } => visitor.visit_image(node, source, title, alt),
        NodeKind::InlineHtml { html } => visitor.visit_inline_html(node, html),
    }?;

    visitor.exit_node(node)
}

/// Walks the children of `node` in source order, stopping at the first
/// `Break`.
#[inline]
pub fn walk_children<'a, V>(visitor: &mut V, node: &Node<'a>) -> VisitResult
where
    V: Visitor<'a>,
{
    for child in node.children() {
        walk_node(visitor, child)?;
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AstArena;
    use pretty_assertions::assert_eq;

    fn text<'a>(arena: &'a AstArena, value: &str) -> Node<'a> {
        Node::new(
            NodeKind::Text {
                text: arena.alloc_str(value),
            },
            None,
        )
    }

    fn document<'a>(arena: &'a AstArena, blocks: &[Node<'a>]) -> Node<'a> {
        Node::new(
            NodeKind::Document {
                children: arena.alloc_slice_copy(blocks),
            },
            None,
        )
    }

    /// Records where link destinations appear, the way an outline or a
    /// link checker would.
    #[derive(Default)]
    struct LinkCollector<'a> {
        destinations: Vec<&'a str>,
        depth: usize,
        deepest: usize,
    }

    impl<'a> Visitor<'a> for LinkCollector<'a> {
        fn enter_node(&mut self, _node: &Node<'a>) -> VisitResult {
            self.depth += 1;
            self.deepest = self.deepest.max(self.depth);
            ControlFlow::Continue(())
        }

        fn exit_node(&mut self, _node: &Node<'a>) -> VisitResult {
            self.depth -= 1;
            ControlFlow::Continue(())
        }

        fn visit_link(
            &mut self,
            node: &Node<'a>,
            destination: &'a str,
            _title: Option<&'a str>,
        ) -> VisitResult {
            self.destinations.push(destination);
            walk_children(self, node)
        }
    }

    #[test]
    fn test_default_hooks_reach_nested_links() {
        let arena = AstArena::new();

        // Document > BlockQuote > Paragraph > Strong > Link > Text
        let link = Node::new(
            NodeKind::Link {
                destination: "https://example.com",
                title: None,
                children: arena.alloc_slice_copy(&[text(&arena, "site")]),
            },
            None,
        );
        let strong = Node::new(
            NodeKind::Strong {
                children: arena.alloc_slice_copy(&[link]),
            },
            None,
        );
        let paragraph = Node::new(
            NodeKind::Paragraph {
                children: arena.alloc_slice_copy(&[strong]),
            },
            None,
        );
        let quote = Node::new(
            NodeKind::BlockQuote {
                children: arena.alloc_slice_copy(&[paragraph]),
            },
            None,
        );
        let doc = document(&arena, &[quote]);

        let mut collector = LinkCollector::default();
        assert!(walk_node(&mut collector, &doc).is_continue());
        assert_eq!(collector.destinations, vec!["https://example.com"]);
        assert_eq!(collector.deepest, 6);
        assert_eq!(collector.depth, 0);
    }

    #[test]
    fn test_leaf_hooks_receive_kind_data() {
        #[derive(Default)]
        struct Leaves(Vec<String>);

        impl<'a> Visitor<'a> for Leaves {
            fn visit_code_block(
                &mut self,
                _node: &Node<'a>,
                language: Option<&'a str>,
                code: &'a str,
            ) -> VisitResult {
                self.0.push(format!("code {} {code:?}", language.unwrap_or("-")));
                ControlFlow::Continue(())
            }

            fn visit_image(
                &mut self,
                _node: &Node<'a>,
                source: &'a str,
                _title: Option<&'a str>,
                alt: &'a str,
            ) -> VisitResult {
                self.0.push(format!("image {source} {alt}"));
                ControlFlow::Continue(())
            }

            fn visit_list_item(
                &mut self,
                node: &Node<'a>,
                checkbox: Option<crate::Checkbox>,
            ) -> VisitResult {
                self.0.push(format!("item {checkbox:?}"));
                walk_children(self, node)
            }
        }

        let arena = AstArena::new();
        let image = Node::new(
            NodeKind::Image {
                source: "logo.png",
                title: None,
                alt: "Logo",
            },
            None,
        );
        let item = Node::new(
            NodeKind::ListItem {
                checkbox: Some(crate::Checkbox::Checked),
                children: arena.alloc_slice_copy(&[image]),
            },
            None,
        );
        let list = Node::new(
            NodeKind::List {
                ordered: false,
                start: 1,
                children: arena.alloc_slice_copy(&[item]),
            },
            None,
        );
        let code = Node::new(
            NodeKind::CodeBlock {
                language: None,
                code: "ls\n",
            },
            None,
        );
        let doc = document(&arena, &[list, code]);

        let mut leaves = Leaves::default();
        let _ = walk_node(&mut leaves, &doc);

        assert_eq!(
            leaves.0,
            vec![
                "item Some(Checked)".to_string(),
                "image logo.png Logo".to_string(),
                "code - \"ls\\n\"".to_string(),
            ]
        );
    }

    #[test]
    fn test_break_skips_remaining_blocks() {
        struct FirstHeading(Option<u8>);

        impl<'a> Visitor<'a> for FirstHeading {
            fn visit_heading(&mut self, _node: &Node<'a>, level: u8) -> VisitResult {
                self.0 = Some(level);
                ControlFlow::Break(())
            }
        }

        let arena = AstArena::new();
        let heading = |level| Node::new(NodeKind::Heading { level, children: &[] }, None);
        let doc = document(&arena, &[heading(2), heading(1)]);

        let mut finder = FirstHeading(None);
        assert!(walk_node(&mut finder, &doc).is_break());
        assert_eq!(finder.0, Some(2));
    }

    #[test]
    fn test_exit_follows_children() {
        #[derive(Default)]
        struct Trace(Vec<String>);

        impl<'a> Visitor<'a> for Trace {
            fn enter_node(&mut self, node: &Node<'a>) -> VisitResult {
                self.0.push(format!("+{}", node.kind));
                ControlFlow::Continue(())
            }

            fn exit_node(&mut self, node: &Node<'a>) -> VisitResult {
                self.0.push(format!("-{}", node.kind));
                ControlFlow::Continue(())
            }
        }

        let arena = AstArena::new();
        let cell = Node::new(
            NodeKind::TableCell {
                children: arena.alloc_slice_copy(&[text(&arena, "a")]),
            },
            None,
        );
        let row = Node::new(
            NodeKind::TableRow {
                children: arena.alloc_slice_copy(&[cell]),
            },
            None,
        );

        let mut trace = Trace::default();
        let _ = walk_node(&mut trace, &row);

        assert_eq!(
            trace.0,
            vec!["+TableRow", "+TableCell", "+Text", "-Text", "-TableCell", "-TableRow"]
        );
    }

    #[test]
    fn test_empty_document() {
        let doc = Node::new(NodeKind::Document { children: &[] }, None);
        let mut collector = LinkCollector::default();

        assert!(walk_children(&mut collector, &doc).is_continue());
        assert_eq!(collector.deepest, 0);
    }
}
