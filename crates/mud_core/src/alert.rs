//! Callout blockquotes: GFM alerts, documentation asides and status notes.
//!
//! A blockquote is checked in order against three forms and rendered as a
//! titled callout when one matches:
//!
//! 1. GFM alert: the first paragraph starts with `[!NOTE]`, `[!TIP]`,
//!    `[!IMPORTANT]`, `[!WARNING]` or `[!CAUTION]`.
//! 2. Aside: the first text run starts with a known `Kind:` tag such as
//!    `Tip:` or `See Also:`.
//! 3. Status: the first text run starts with `Status:` and a value.

use mud_ast::{Node, NodeKind};

/// Visual category of a callout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertCategory {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
    Status,
}

impl AlertCategory {
    /// Lowercase name, used in CSS classes.
    pub const fn as_str(self) -> &'static str {
        match self {
            AlertCategory::Note => "note",
            AlertCategory::Tip => "tip",
            AlertCategory::Important => "important",
            AlertCategory::Warning => "warning",
            AlertCategory::Caution => "caution",
            AlertCategory::Status => "status",
        }
    }

    /// CSS class added next to `alert`, e.g. `alert-note`.
    pub fn css_class(self) -> String {
        format!("alert-{}", self.as_str())
    }

    /// Default title of a GFM alert of this category.
    pub const fn title(self) -> &'static str {
        match self {
            AlertCategory::Note => "Note",
            AlertCategory::Tip => "Tip",
            AlertCategory::Important => "Important",
            AlertCategory::Warning => "Warning",
            AlertCategory::Caution => "Caution",
            AlertCategory::Status => "Status",
        }
    }

    /// Inline SVG icon emitted before the title.
    pub const fn icon(self) -> &'static str {
        match self {
            AlertCategory::Note => include_str!("../assets/icons/alert-note.svg"),
            AlertCategory::Tip => include_str!("../assets/icons/alert-tip.svg"),
            AlertCategory::Important => include_str!("../assets/icons/alert-important.svg"),
            AlertCategory::Warning => include_str!("../assets/icons/alert-warning.svg"),
            AlertCategory::Caution => include_str!("../assets/icons/alert-caution.svg"),
            AlertCategory::Status => include_str!("../assets/icons/alert-status.svg"),
        }
    }
}

const GFM_TAGS: [(&str, AlertCategory); 5] = [
    ("[!NOTE]", AlertCategory::Note),
    ("[!TIP]", AlertCategory::Tip),
    ("[!IMPORTANT]", AlertCategory::Important),
    ("[!WARNING]", AlertCategory::Warning),
    ("[!CAUTION]", AlertCategory::Caution),
];

/// Returns the GFM alert tag that `text` starts with. Tags are
/// case-sensitive.
pub fn gfm_alert_tag(text: &str) -> Option<(&'static str, AlertCategory)> {
    if !text.starts_with("[!") {
        return None;
    }
    GFM_TAGS.iter().copied().find(|(tag, _)| text.starts_with(tag))
}

/// A recognized aside kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsideKind {
    /// Identifier form, e.g. `SeeAlso`.
    pub name: &'static str,
    /// Human form used as the callout title, e.g. `See Also`.
    pub display_name: &'static str,
    /// Visual category.
    pub category: AlertCategory,
}

const fn aside(name: &'static str, display_name: &'static str, category: AlertCategory) -> AsideKind {
    AsideKind {
        name,
        display_name,
        category,
    }
}

const ASIDE_KINDS: &[AsideKind] = &[
    aside("Note", "Note", AlertCategory::Note),
    aside("Remark", "Remark", AlertCategory::Note),
    aside("Tip", "Tip", AlertCategory::Tip),
    aside("Experiment", "Experiment", AlertCategory::Tip),
    aside("Important", "Important", AlertCategory::Important),
    aside("Attention", "Attention", AlertCategory::Important),
    aside("Warning", "Warning", AlertCategory::Warning),
    aside("Precondition", "Precondition", AlertCategory::Warning),
    aside("Postcondition", "Postcondition", AlertCategory::Warning),
    aside("Requires", "Requires", AlertCategory::Warning),
    aside("Invariant", "Invariant", AlertCategory::Warning),
    aside("Bug", "Bug", AlertCategory::Caution),
    aside("Throws", "Throws", AlertCategory::Caution),
    // Recognized kinds without a visual of their own
    aside("Author", "Author", AlertCategory::Note),
    aside("Authors", "Authors", AlertCategory::Note),
    aside("Complexity", "Complexity", AlertCategory::Note),
    aside("Copyright", "Copyright", AlertCategory::Note),
    aside("Date", "Date", AlertCategory::Note),
    aside("MutatingVariant", "Mutating Variant", AlertCategory::Note),
    aside("NonMutatingVariant", "Non-Mutating Variant", AlertCategory::Note),
    aside("Since", "Since", AlertCategory::Note),
    aside("ToDo", "To Do", AlertCategory::Note),
    aside("Version", "Version", AlertCategory::Note),
    aside("SeeAlso", "See Also", AlertCategory::Note),
];

impl AsideKind {
    /// Looks up a tag, case-insensitively, by identifier or display name.
    ///
    /// ```rust
    /// use mud_core::alert::{AlertCategory, AsideKind};
    ///
    /// let kind = AsideKind::from_tag("see also").unwrap();
    /// assert_eq!(kind.display_name, "See Also");
    /// assert_eq!(kind.category, AlertCategory::Note);
    /// assert!(AsideKind::from_tag("Banana").is_none());
    /// ```
    pub fn from_tag(tag: &str) -> Option<AsideKind> {
        let tag = tag.trim();
        ASIDE_KINDS
            .iter()
            .copied()
            .find(|k| k.name.eq_ignore_ascii_case(tag) || k.display_name.eq_ignore_ascii_case(tag))
    }
}

const STATUS_PREFIX: &str = "Status:";

/// Title line of a classified callout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CalloutTitle<'a> {
    /// Fixed title text.
    Text(&'static str),
    /// `Status: <strong>value</strong>`.
    Status(&'a str),
}

/// A blockquote recognized as a callout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Callout<'a> {
    pub category: AlertCategory,
    pub title: CalloutTitle<'a>,
    /// Text left in the first text run once the tag is stripped. `None`
    /// when the first inline is not a text run and is emitted as is.
    pub remainder: Option<&'a str>,
}

/// Classifies the children of a blockquote. First match wins.
pub(crate) fn classify<'a>(children: &[Node<'a>]) -> Option<Callout<'a>> {
    let paragraph = children.first()?;
    let NodeKind::Paragraph { children: inlines } = paragraph.kind else {
        return None;
    };
    let first_text = inlines.first().and_then(|n| n.text());

    if let Some((tag, category)) = gfm_alert_tag(&paragraph.plain_text()) {
        let remainder = first_text.map(|text| strip_tag(text, tag));
        return Some(Callout {
            category,
            title: CalloutTitle::Text(category.title()),
            remainder,
        });
    }

    let text = first_text?;

    if let Some((tag, rest)) = text.split_once(':') {
        if let Some(kind) = AsideKind::from_tag(tag) {
            return Some(Callout {
                category: kind.category,
                title: CalloutTitle::Text(kind.display_name),
                remainder: Some(rest.trim_start_matches(' ')),
            });
        }
    }

    let value = text.strip_prefix(STATUS_PREFIX)?.trim_start_matches(' ');
    if value.is_empty() {
        return None;
    }
    Some(Callout {
        category: AlertCategory::Status,
        title: CalloutTitle::Status(value),
        remainder: Some(""),
    })
}

/// Drops `tag` (a prefix of the paragraph's plain text) from the first text
/// run, then any leading spaces.
fn strip_tag<'a>(text: &'a str, tag: &str) -> &'a str {
    text.strip_prefix(tag).unwrap_or("").trim_start_matches(' ')
}
