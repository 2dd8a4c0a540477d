//! The traversal hooks renderers implement.

use std::ops::ControlFlow;

use crate::{Checkbox, ColumnAlignment, Node};

use super::walk::walk_children;

/// `Break` ends the walk; `?` forwards it from nested walks.
pub type VisitResult = ControlFlow<()>;

/// One hook per node kind, called with that kind's data unpacked.
///
/// Container hooks default to walking the children, leaf hooks to doing
/// nothing, so an outline pass overrides `visit_heading` alone while the
/// Up renderer overrides nearly everything. The document root has no hook
/// of its own; [`walk_node`](super::walk_node) descends into it directly.
///
/// `'a` is the arena lifetime, so a visitor may keep `&'a str` slices
/// of the tree after the walk.
pub trait Visitor<'a>: Sized {
    /// Runs before a node's hook. The Down renderer tracks depth here.
    #[inline]
    fn enter_node(&mut self, _node: &Node<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Runs after a node's hook, children included.
    #[inline]
    fn exit_node(&mut self, _node: &Node<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    // Blocks

    fn visit_heading(&mut self, node: &Node<'a>, _level: u8) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_paragraph(&mut self, node: &Node<'a>) -> VisitResult {
        walk_children(self, node)
    }

    /// Also reached for GFM alerts and asides, which are block quotes
    /// until a renderer looks at their first line.
    fn visit_block_quote(&mut self, node: &Node<'a>) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_list(&mut self, node: &Node<'a>, _ordered: bool, _start: u32) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_list_item(&mut self, node: &Node<'a>, _checkbox: Option<Checkbox>) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_code_block(
        &mut self,
        _node: &Node<'a>,
        _language: Option<&'a str>,
        _code: &'a str,
    ) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_thematic_break(&mut self, _node: &Node<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_html_block(&mut self, _node: &Node<'a>, _html: &'a str) -> VisitResult {
        ControlFlow::Continue(())
    }

    // Tables

    fn visit_table(
        &mut self,
        node: &Node<'a>,
        _alignments: &'a [Option<ColumnAlignment>],
    ) -> VisitResult {
        walk_children(self, node)
    }

    /// Wraps the first row only.
    fn visit_table_head(&mut self, node: &Node<'a>) -> VisitResult {
        walk_children(self, node)
    }

    /// Absent when the table has no rows below the delimiter line.
    fn visit_table_body(&mut self, node: &Node<'a>) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_table_row(&mut self, node: &Node<'a>) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_table_cell(&mut self, node: &Node<'a>) -> VisitResult {
        walk_children(self, node)
    }

    // Inlines

    fn visit_text(&mut self, _node: &Node<'a>, _text: &'a str) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_soft_break(&mut self, _node: &Node<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_line_break(&mut self, _node: &Node<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_emphasis(&mut self, node: &Node<'a>) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_strong(&mut self, node: &Node<'a>) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_strikethrough(&mut self, node: &Node<'a>) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_inline_code(&mut self, _node: &Node<'a>, _code: &'a str) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// `destination` is already resolved for reference links.
    fn visit_link(
        &mut self,
        node: &Node<'a>,
        _destination: &'a str,
        _title: Option<&'a str>,
    ) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_image(
        &mut self,
        _node: &Node<'a>,
        _source: &'a str,
        _title: Option<&'a str>,
        _alt: &'a str,
    ) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_inline_html(&mut self, _node: &Node<'a>, _html: &'a str) -> VisitResult {
        ControlFlow::Continue(())
    }
}
