//! The rendering facade.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use mud_ast::{AstArena, Node};
use mud_parser::{MarkdownParser, Parser};
use tracing::{debug, warn};
use url::Url;

use crate::heading::{OutlineHeading, extract_headings};
use crate::highlight::{Highlighter, default_highlighter};
use crate::image_data_uri;
use crate::template::{DownDocument, UpDocument, wrap_down, wrap_up};
use crate::{DownRenderer, ImageResolver, Mode, RenderError, RenderOptions, UpRenderer};

/// Renders Markdown in either mode.
///
/// Every call parses the source into its own arena, renders, and drops the
/// arena again; nothing is cached between calls. A `Mud` is `Send + Sync`
/// and can be shared across threads.
///
/// # Example
///
/// ```rust
/// use mud_core::Mud;
///
/// let mud = Mud::default();
/// let html = mud.render_up("# Hi :wave:", None, None).unwrap();
/// assert_eq!(html, "<h1 id=\"hi-wave\">Hi 👋</h1>\n");
///
/// let table = mud.render_down("*x*").unwrap();
/// assert!(table.contains("<span class=\"md-emphasis\">*x*</span>"));
/// ```
pub struct Mud {
    options: RenderOptions,
    highlighter: Arc<dyn Highlighter>,
    parser: MarkdownParser,
}

impl Mud {
    /// Creates a renderer with the default highlighter.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            highlighter: default_highlighter(),
            parser: MarkdownParser::new(),
        }
    }

    /// Replaces the highlighter.
    pub fn with_highlighter(mut self, highlighter: Arc<dyn Highlighter>) -> Self {
        self.highlighter = highlighter;
        self
    }

    /// The options this renderer was built with.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders Markdown to an Up mode HTML fragment.
    ///
    /// `resolver` rewrites image sources relative to `base_url`. Without
    /// one, local images are inlined when `embed_local_images` is set.
    pub fn render_up(
        &self,
        markdown: &str,
        base_url: Option<&Url>,
        resolver: Option<&ImageResolver<'_>>,
    ) -> Result<String, RenderError> {
        let embed: &ImageResolver<'_> = &image_data_uri::encode;
        let resolver: Option<&ImageResolver<'_>> = match resolver {
            Some(resolver) => Some(resolver),
            None if self.options.embed_local_images => Some(embed),
            None => None,
        };

        self.with_tree(markdown, |root| {
            UpRenderer::new(self.highlighter.as_ref())
                .with_base_url(base_url)
                .with_image_resolver(resolver)
                .with_shortcodes(self.options.emoji_shortcodes)
                .with_code_highlighting(self.options.highlight_code)
                .render(root)
        })
    }

    /// Renders Markdown to a complete Up mode document.
    pub fn render_up_document(
        &self,
        markdown: &str,
        document: &UpDocument,
    ) -> Result<String, RenderError> {
        let body = self.render_up(markdown, document.base_url.as_ref(), None)?;
        Ok(wrap_up(&body, document))
    }

    /// Renders Markdown to the Down mode source table.
    pub fn render_down(&self, markdown: &str) -> Result<String, RenderError> {
        self.with_tree(markdown, |root| {
            DownRenderer::new(self.highlighter.as_ref())
                .with_code_highlighting(self.options.highlight_code)
                .render(markdown, root)
        })
    }

    /// Renders Markdown to a complete Down mode document.
    pub fn render_down_document(
        &self,
        markdown: &str,
        document: &DownDocument,
    ) -> Result<String, RenderError> {
        let table = self.render_down(markdown)?;
        Ok(wrap_down(&table, document))
    }

    /// Lists the headings of a Markdown document.
    pub fn extract_headings(&self, markdown: &str) -> Result<Vec<OutlineHeading>, RenderError> {
        self.with_tree(markdown, extract_headings)
    }

    /// Up mode document settings taken from these options.
    pub fn up_document(&self, title: impl Into<String>, base_url: Option<Url>) -> UpDocument {
        UpDocument {
            title: title.into(),
            base_url,
            theme: self.options.theme,
            html_classes: self.options.html_classes.clone(),
            include_base_tag: self.options.include_base_tag,
        }
    }

    /// Down mode document settings taken from these options.
    pub fn down_document(&self, title: impl Into<String>) -> DownDocument {
        DownDocument {
            title: title.into(),
            theme: self.options.theme,
            html_classes: self.options.html_classes.clone(),
        }
    }

    /// Reads a Markdown file and renders it to a complete document.
    ///
    /// The file name becomes the title. In Up mode the file's URL is the
    /// base URL, so relative links and images resolve next to it.
    pub fn render_file(&self, path: impl AsRef<Path>, mode: Mode) -> Result<String, RenderError> {
        let path = path.as_ref();
        let markdown = fs::read_to_string(path)?;
        let title = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!(path = %path.display(), ?mode, "rendering file");

        match mode {
            Mode::Up => {
                let base_url = fs::canonicalize(path)
                    .ok()
                    .and_then(|abs| Url::from_file_path(abs).ok());
                if base_url.is_none() {
                    warn!(path = %path.display(), "no file URL for document; relative links stay unresolved");
                }
                self.render_up_document(&markdown, &self.up_document(title, base_url))
            }
            Mode::Down => self.render_down_document(&markdown, &self.down_document(title)),
        }
    }

    fn with_tree<T>(
        &self,
        markdown: &str,
        render: impl FnOnce(&Node<'_>) -> T,
    ) -> Result<T, RenderError> {
        let arena = AstArena::for_source(markdown);
        let root = self.parser.parse(&arena, markdown)?;
        debug!(
            bytes = markdown.len(),
            arena_bytes = arena.allocated_bytes(),
            "parsed markdown"
        );
        Ok(render(&root))
    }
}

impl Default for Mud {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HtmlClass, NoHighlighter, Theme};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn plain(options: RenderOptions) -> Mud {
        Mud::new(options).with_highlighter(Arc::new(NoHighlighter))
    }

    #[test]
    fn test_mud_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Mud>();
    }

    #[test]
    fn test_render_up_options() {
        let source = "Ship it :rocket:\n";
        let on = plain(RenderOptions::default());
        assert_eq!(on.render_up(source, None, None).unwrap(), "<p>Ship it 🚀</p>\n");

        let off = plain(RenderOptions {
            emoji_shortcodes: false,
            ..Default::default()
        });
        assert_eq!(
            off.render_up(source, None, None).unwrap(),
            "<p>Ship it :rocket:</p>\n"
        );
    }

    #[test]
    fn test_highlighting_can_be_disabled() {
        let marker = |code: &str, _: Option<&str>| Some(format!("<span class=\"k\">{code}</span>"));
        let source = "```rust\nx\n```\n";

        let on = plain(RenderOptions::default()).with_highlighter(Arc::new(marker));
        assert!(on.render_up(source, None, None).unwrap().contains("class=\"k\""));

        let off = plain(RenderOptions {
            highlight_code: false,
            ..Default::default()
        })
        .with_highlighter(Arc::new(marker));
        assert!(!off.render_up(source, None, None).unwrap().contains("class=\"k\""));
        assert!(!off.render_down(source).unwrap().contains("class=\"k\""));
    }

    #[test]
    fn test_embeds_local_images() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.png"), b"abc").unwrap();
        let base = Url::from_file_path(dir.path().join("doc.md")).unwrap();
        let source = "![a](a.png)\n";

        let embedding = plain(RenderOptions {
            embed_local_images: true,
            ..Default::default()
        });
        let html = embedding.render_up(source, Some(&base), None).unwrap();
        assert!(html.contains("src=\"data:image/png;base64,YWJj\""), "{html}");

        let default = plain(RenderOptions::default());
        let html = default.render_up(source, Some(&base), None).unwrap();
        assert!(html.contains("src=\"a.png\""), "{html}");
    }

    #[test]
    fn test_explicit_resolver_wins() {
        let base = Url::parse("https://example.com/docs/readme.md").unwrap();
        let resolver = |src: &str, base: &Url| base.join(src).ok().map(String::from);
        let mud = plain(RenderOptions {
            embed_local_images: true,
            ..Default::default()
        });

        let html = mud.render_up("![x](img/x.png)", Some(&base), Some(&resolver)).unwrap();
        assert!(
            html.contains("src=\"https://example.com/docs/img/x.png\""),
            "{html}"
        );
    }

    #[test]
    fn test_documents_use_options() {
        let mud = plain(RenderOptions {
            theme: Theme::Blues,
            html_classes: vec![HtmlClass::IsReadableColumn],
            include_base_tag: false,
            ..Default::default()
        });

        let up = mud.up_document("t", Url::parse("file:///tmp/t.md").ok());
        assert_eq!(up.theme, Theme::Blues);
        assert!(!up.include_base_tag);

        let html = mud.render_up_document("# T", &up).unwrap();
        assert!(html.contains("<html class=\"is-readable-column\">"));
        assert!(html.contains(Theme::Blues.css()));
        assert!(!html.contains("<base"));

        let down = mud.render_down_document("# T", &mud.down_document("t")).unwrap();
        assert!(down.contains("<div class=\"down-mode-output\">"));
        assert!(down.contains("md-heading"));
    }

    #[test]
    fn test_extract_headings() {
        let mud = plain(RenderOptions::default());
        let headings = mud.extract_headings("# A\n## B\n").unwrap();
        let ids: Vec<_> = headings.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_render_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes & todo.md");
        fs::write(&path, "# Notes\n").unwrap();
        let mud = plain(RenderOptions::default());

        let up = mud.render_file(&path, Mode::Up).unwrap();
        assert!(up.contains("<title>notes &amp; todo.md</title>"));
        assert!(up.contains("<base href=\"file://"));
        assert!(up.contains("<h1 id=\"notes\">Notes</h1>"));

        let down = mud.render_file(&path, Mode::Down).unwrap();
        assert!(down.contains("<td class=\"ln\">1</td>"));
        assert!(!down.contains("<base"));
    }

    #[test]
    fn test_render_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = plain(RenderOptions::default())
            .render_file(dir.path().join("absent.md"), Mode::Up)
            .unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }
}
