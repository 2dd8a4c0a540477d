//! Per-render storage for the Mud tree.
//!
//! A render parses one document into one arena, walks it, and drops the
//! arena with everything in it. Nodes are `Copy` and only hold borrowed
//! slices, so nothing in the tree needs its own destructor.

use bumpalo::Bump;

/// Bytes of arena reserved per byte of Markdown source.
///
/// A node plus its child slice costs a few dozen bytes and typical
/// documents carry one node for every handful of characters.
const BYTES_PER_SOURCE_BYTE: usize = 4;

/// Bump storage backing a parsed document.
///
/// The parser copies text that markdown-rs owns (unescaped titles,
/// coalesced text runs) with [`alloc_str`](Self::alloc_str) and stores
/// child lists with [`alloc_slice_copy`](Self::alloc_slice_copy) or
/// [`alloc_slice_fill_iter`](Self::alloc_slice_fill_iter).
///
/// # Example
///
/// ```rust
/// use mud_ast::{AstArena, Node, NodeKind};
///
/// let source = "Hello";
/// let arena = AstArena::for_source(source);
///
/// let text = Node::new(NodeKind::Text { text: arena.alloc_str(source) }, None);
/// let children = arena.alloc_slice_copy(&[text]);
/// let paragraph = Node::new(NodeKind::Paragraph { children }, None);
///
/// assert_eq!(paragraph.plain_text(), "Hello");
/// assert!(arena.allocated_bytes() >= source.len());
/// ```
pub struct AstArena {
    bump: Bump,
}

impl AstArena {
    /// Creates an empty arena that grows on first use.
    #[inline]
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Creates an arena with `capacity` bytes reserved up front.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bump: Bump::with_capacity(capacity),
        }
    }

    /// Creates an arena sized so that most documents of this length parse
    /// without another chunk being requested.
    pub fn for_source(source: &str) -> Self {
        Self::with_capacity(source.len().saturating_mul(BYTES_PER_SOURCE_BYTE))
    }

    /// Copies a string into the arena.
    #[inline]
    pub fn alloc_str(&self, s: &str) -> &str {
        self.bump.alloc_str(s)
    }

    /// Copies a child list into the arena.
    #[inline]
    pub fn alloc_slice_copy<T: Copy>(&self, slice: &[T]) -> &[T] {
        self.bump.alloc_slice_copy(slice)
    }

    /// Moves the items of an exact-size iterator into the arena.
    #[inline]
    pub fn alloc_slice_fill_iter<T, I>(&self, iter: I) -> &[T]
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        self.bump.alloc_slice_fill_iter(iter)
    }

    /// Bytes held by the arena, including unused reserved space.
    #[inline]
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }
}

impl Default for AstArena {
    fn default() -> Self {
        Self::new()
    }
}
