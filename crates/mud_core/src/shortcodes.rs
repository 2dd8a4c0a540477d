//! `:shortcode:` to emoji substitution, backed by the gemoji alias set of
//! the `emojis` crate.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static SHORTCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":[a-zA-Z0-9_+\-]+:").expect("shortcode pattern is valid"));

/// Replaces known `:shortcode:` tokens with their emoji.
///
/// Tokens are matched left to right without overlap. Unknown tokens, and
/// incidental matches such as the `:30:` in `10:30:00`, are kept verbatim.
/// Text without a colon is returned borrowed.
///
/// # Example
///
/// ```rust
/// use mud_core::replace_shortcodes;
///
/// assert_eq!(replace_shortcodes("Ship it :rocket:"), "Ship it 🚀");
/// assert_eq!(replace_shortcodes("10:30:00"), "10:30:00");
/// ```
pub fn replace_shortcodes(text: &str) -> Cow<'_, str> {
    if !text.contains(':') {
        return Cow::Borrowed(text);
    }
    SHORTCODE.replace_all(text, |caps: &Captures<'_>| {
        let token = &caps[0];
        let alias = &token[1..token.len() - 1];
        match emoji_for(alias) {
            Some(emoji) => emoji.to_owned(),
            None => token.to_owned(),
        }
    })
}

/// Looks up the emoji for a bare alias (no colons).
pub fn emoji_for(alias: &str) -> Option<&'static str> {
    emojis::get_by_shortcode(alias).map(|emoji| emoji.as_str())
}
