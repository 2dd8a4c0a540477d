//! GitHub-style heading slugs.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("slug pattern is valid"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Converts heading text to a GitHub-style slug.
///
/// Lowercases, strips everything except word characters, whitespace and
/// hyphens, trims, then turns each whitespace run into one hyphen. Word
/// characters are Unicode-aware, so digits and non-ASCII letters survive.
///
/// # Example
///
/// ```rust
/// use mud_core::slugify;
///
/// assert_eq!(slugify("What's new?"), "whats-new");
/// assert_eq!(slugify("Ñoño 2"), "ñoño-2");
/// ```
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let stripped = NON_WORD.replace_all(&lower, "");
    WHITESPACE.replace_all(stripped.trim(), "-").into_owned()
}

/// Deduplicates slugs within one document.
///
/// The first occurrence of a slug is returned bare; repeats get `-1`,
/// `-2`, and so on.
#[derive(Debug, Default, Clone)]
pub struct SlugTracker {
    counts: HashMap<String, usize>,
}

impl SlugTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the unique slug for `text`.
    pub fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let seen = self.counts.entry(base.clone()).or_insert(0);
        let n = *seen;
        *seen += 1;
        if n == 0 { base } else { format!("{base}-{n}") }
    }
}
