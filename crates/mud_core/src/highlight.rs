//! Code highlighting boundary.
//!
//! Renderers never talk to a highlighting engine directly. They hold a
//! [`Highlighter`] handle and treat `None` as "emit escaped plain text".

use std::sync::Arc;

/// Language-keyed source to HTML highlighter.
///
/// Returned HTML must consist only of escaped text and `<span …>` /
/// `</span>` tags so the Down renderer can split it per line.
///
/// Closures with the matching signature implement this trait:
///
/// ```rust
/// use mud_core::Highlighter;
///
/// let upper = |code: &str, _lang: Option<&str>| Some(code.to_uppercase());
/// assert_eq!(upper.highlight("let", Some("rust")).as_deref(), Some("LET"));
/// ```
pub trait Highlighter: Send + Sync {
    /// Highlights `code`. `None` means no highlighting is available for
    /// this input.
    fn highlight(&self, code: &str, language: Option<&str>) -> Option<String>;
}

impl<F> Highlighter for F
where
    F: Fn(&str, Option<&str>) -> Option<String> + Send + Sync,
{
    fn highlight(&self, code: &str, language: Option<&str>) -> Option<String> {
        self(code, language)
    }
}

/// Highlighter that never highlights.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHighlighter;

impl Highlighter for NoHighlighter {
    #[inline]
    fn highlight(&self, _code: &str, _language: Option<&str>) -> Option<String> {
        None
    }
}

/// Returns the highlighter used when the caller supplies none.
pub fn default_highlighter() -> Arc<dyn Highlighter> {
    #[cfg(feature = "syntax-highlighting")]
    {
        Arc::new(SyntectHighlighter::new())
    }
    #[cfg(not(feature = "syntax-highlighting"))]
    {
        Arc::new(NoHighlighter)
    }
}

#[cfg(feature = "syntax-highlighting")]
pub use self::syntect_impl::SyntectHighlighter;

#[cfg(feature = "syntax-highlighting")]
mod syntect_impl {
    use std::sync::LazyLock;

    use syntect::html::{ClassStyle, ClassedHTMLGenerator};
    use syntect::parsing::{SyntaxReference, SyntaxSet};
    use syntect::util::LinesWithEndings;
    use tracing::trace;

    use super::Highlighter;

    static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

    /// CSS class prefix of every emitted span (`hl-keyword`, `hl-string`, …).
    pub const CLASS_PREFIX: &str = "hl-";

    /// Highlighter backed by `syntect`'s bundled grammars.
    ///
    /// Emits class-based markup (`<span class="hl-source hl-rust">`) so the
    /// theme stylesheet decides colours. The syntax set is loaded once per
    /// process and is immutable, so no lock is needed.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SyntectHighlighter;

    impl SyntectHighlighter {
        /// Creates a highlighter.
        pub fn new() -> Self {
            Self
        }

        /// Returns true if `language` resolves to a bundled grammar.
        pub fn supports(&self, language: &str) -> bool {
            find_syntax(language).is_some()
        }
    }

    impl Highlighter for SyntectHighlighter {
        fn highlight(&self, code: &str, language: Option<&str>) -> Option<String> {
            let language = language?;
            let Some(syntax) = find_syntax(language) else {
                trace!(language, "no grammar for language");
                return None;
            };

            let mut generator = ClassedHTMLGenerator::new_with_class_style(
                syntax,
                &SYNTAX_SET,
                ClassStyle::SpacedPrefixed {
                    prefix: CLASS_PREFIX,
                },
            );
            for line in LinesWithEndings::from(code) {
                if let Err(err) = generator.parse_html_for_line_which_includes_newline(line) {
                    trace!(language, error = %err, "highlighting failed");
                    return None;
                }
            }
            Some(generator.finalize())
        }
    }

    fn find_syntax(language: &str) -> Option<&'static SyntaxReference> {
        let lang = language.trim().to_lowercase();
        if lang.is_empty() {
            return None;
        }
        if let Some(syntax) = SYNTAX_SET.find_syntax_by_token(&lang) {
            return Some(syntax);
        }
        let canonical = resolve_alias(&lang);
        if canonical != lang {
            if let Some(syntax) = SYNTAX_SET.find_syntax_by_token(canonical) {
                return Some(syntax);
            }
        }
        SYNTAX_SET.find_syntax_by_extension(&lang)
    }

    fn resolve_alias(lang: &str) -> &str {
        match lang {
            "js" | "mjs" | "cjs" | "jsx" => "javascript",
            "ts" | "mts" | "cts" | "tsx" => "typescript",
            "rs" => "rust",
            "py" | "python3" | "py3" | "gyp" => "python",
            "rb" | "gemspec" | "podspec" => "ruby",
            "sh" | "zsh" | "shell" | "console" | "shellsession" => "bash",
            "md" | "mkd" | "mkdown" => "markdown",
            "htm" | "xhtml" => "html",
            "yml" => "yaml",
            "c++" | "cxx" | "hpp" | "hxx" | "cc" | "hh" => "cpp",
            "h" => "c",
            "objc" | "obj-c" | "objective-c" => "objective-c",
            "kt" | "kts" => "kotlin",
            "cs" | "csharp" | "c#" => "c#",
            "golang" => "go",
            "pl" | "pm" => "perl",
            "mk" | "mak" | "make" => "makefile",
            "diff" | "patch" => "diff",
            "svg" | "plist" | "xsl" | "xslt" => "xml",
            "jsonc" | "json5" => "json",
            "tex" | "latex" => "latex",
            "text" | "txt" | "plaintext" => "plain text",
            _ => lang,
        }
    }

}
