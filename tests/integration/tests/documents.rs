//! Full documents, file rendering and configuration.

mod common;

use std::fs;
use std::sync::Arc;

use common::{fixtures_dir, init_tracing};
use mud_core::{HtmlClass, Mode, Mud, NoHighlighter, RenderError, RenderOptions, Theme};
use tempfile::TempDir;
use url::Url;

fn mud_with(options: RenderOptions) -> Mud {
    init_tracing();
    Mud::new(options).with_highlighter(Arc::new(NoHighlighter))
}

#[test]
fn up_file_document() {
    let mud = mud_with(RenderOptions::default());
    let html = mud
        .render_file(fixtures_dir().join("tour.md"), Mode::Up)
        .unwrap();

    assert!(html.starts_with("<!DOCTYPE html>\n<html>\n"));
    assert!(html.contains("<title>tour.md</title>"));
    assert!(html.contains("<base href=\"file://"));
    assert!(html.contains("Content-Security-Policy"));
    assert!(html.contains(&format!("<style id=\"mud-theme\">{}</style>", Theme::Earthy.css())));
    assert!(html.contains("<article class=\"up-mode-output\">\n<h1 id=\"mud-tour\">"));
}

#[test]
fn down_file_document() {
    let mud = mud_with(RenderOptions::default());
    let html = mud
        .render_file(fixtures_dir().join("tour.md"), Mode::Down)
        .unwrap();

    assert!(html.contains("<div class=\"down-mode-output\">\n        <table class=\"down-lines\">"));
    assert!(!html.contains("<base"));
    assert!(!html.contains("Content-Security-Policy"));
}

#[test]
fn embeds_fixture_image() {
    let mud = mud_with(RenderOptions {
        embed_local_images: true,
        include_base_tag: false,
        ..Default::default()
    });
    let html = mud
        .render_file(fixtures_dir().join("tour.md"), Mode::Up)
        .unwrap();

    assert!(html.contains("src=\"data:image/png;base64,UE5H\""), "{html}");
    assert!(!html.contains("<base"));
}

#[test]
fn options_from_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("mud.json");
    fs::write(
        &config,
        r#"{ "theme": "riot", "html_classes": ["has-line-numbers", "has-word-wrap"] }"#,
    )
    .unwrap();

    let options = RenderOptions::from_file(&config).unwrap();
    assert_eq!(options.theme, Theme::Riot);
    assert_eq!(
        options.html_classes,
        vec![HtmlClass::HasLineNumbers, HtmlClass::HasWordWrap]
    );

    let doc = dir.path().join("doc.md");
    fs::write(&doc, "plain\n").unwrap();
    let html = mud_with(options).render_file(&doc, Mode::Down).unwrap();
    assert!(html.contains("<html class=\"has-line-numbers has-word-wrap\">"));
    assert!(html.contains(Theme::Riot.css()));
}

#[test]
fn rejects_bad_config() {
    let err = RenderOptions::from_json(r#"{ "theme": "plaid" }"#).unwrap_err();
    assert!(matches!(err, RenderError::Config(_)), "{err}");
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = mud_with(RenderOptions::default())
        .render_file(dir.path().join("nope.md"), Mode::Down)
        .unwrap_err();
    assert!(matches!(err, RenderError::Io(_)), "{err}");
}

#[test]
fn custom_document_settings() {
    let mud = mud_with(RenderOptions::default());
    let base = Url::parse("https://example.com/docs/page.md").unwrap();
    let mut doc = mud.up_document("Docs <1>", Some(base));
    doc.theme = Theme::Austere;

    let html = mud.render_up_document("hi", &doc).unwrap();
    assert!(html.contains("<title>Docs &lt;1&gt;</title>"));
    assert!(html.contains("<base href=\"https://example.com/docs/page.md\">"));
    assert!(html.contains(Theme::Austere.css()));
}

#[test]
fn version_is_set() {
    assert!(!mud_core::VERSION.is_empty());
}
