//! End-to-end tests of Up mode through the `Mud` facade.

mod common;

use common::{fixture, plain_mud};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn renders_heading_with_anchor() {
    let html = plain_mud().render_up("# Hello", None, None).unwrap();
    assert!(html.contains("<h1 id=\"hello\">Hello</h1>"), "{html}");
}

#[test]
fn renders_strong() {
    let html = plain_mud().render_up("**bold**", None, None).unwrap();
    assert!(html.contains("<strong>bold</strong>"), "{html}");
}

#[rstest]
#[case::loose("- one\n\n- two", true)]
#[case::tight("- one\n- two", false)]
fn list_tightness_controls_paragraphs(#[case] source: &str, #[case] has_paragraphs: bool) {
    let html = plain_mud().render_up(source, None, None).unwrap();
    assert_eq!(html.contains("<p>"), has_paragraphs, "{html}");
}

#[test]
fn gfm_alert_hides_its_tag() {
    let html = plain_mud()
        .render_up("> [!NOTE]\n> Content here", None, None)
        .unwrap();
    assert!(html.contains("class=\"alert alert-note\""), "{html}");
    assert!(html.contains("Content here"), "{html}");
    assert!(!html.contains("[!NOTE]"), "{html}");
}

#[test]
fn status_aside_shows_value() {
    let mud = plain_mud();
    let html = mud.render_up("> Status: Planning", None, None).unwrap();
    assert!(html.contains("Status: <strong>Planning</strong>"), "{html}");

    let html = mud.render_up("> Status:", None, None).unwrap();
    assert!(html.starts_with("<blockquote>\n"), "{html}");
    assert!(!html.contains("alert"), "{html}");
}

#[rstest]
#[case::remark("> Remark: keep it short", "alert-note", "Remark")]
#[case::see_also("> seealso: the guide", "alert-note", "See Also")]
#[case::experiment("> Experiment: try it", "alert-tip", "Experiment")]
#[case::precondition("> Precondition: x > 0", "alert-warning", "Precondition")]
#[case::throws("> Throws: on overflow", "alert-caution", "Throws")]
fn aside_kinds_map_to_categories(
    #[case] source: &str,
    #[case] class: &str,
    #[case] title: &str,
) {
    let html = plain_mud().render_up(source, None, None).unwrap();
    assert!(html.contains(&format!("class=\"alert {class}\"")), "{html}");
    assert!(html.contains(&format!("</svg>{title}</p>")), "{html}");
}

#[test]
fn unknown_aside_stays_a_blockquote() {
    let html = plain_mud().render_up("> Caveat: none", None, None).unwrap();
    assert_eq!(html, "<blockquote>\n<p>Caveat: none</p>\n</blockquote>\n");
}

#[rstest]
#[case::clock("10:30:00", "10:30:00")]
#[case::rocket(":rocket:", "🚀")]
#[case::thumbs_up(":+1:", "👍")]
#[case::unknown(":not_a_real_shortcode:", ":not_a_real_shortcode:")]
fn shortcodes_in_text(#[case] source: &str, #[case] expected: &str) {
    let html = plain_mud().render_up(source, None, None).unwrap();
    assert_eq!(html, format!("<p>{expected}</p>\n"));
}

#[test]
fn shortcodes_are_left_alone_in_code() {
    let html = plain_mud().render_up("`:rocket:`", None, None).unwrap();
    assert_eq!(html, "<p><code>:rocket:</code></p>\n");
}

#[test]
fn heading_ids_match_outline() {
    let mud = plain_mud();
    let source = fixture("tour.md");
    let html = mud.render_up(&source, None, None).unwrap();

    for heading in mud.extract_headings(&source).unwrap() {
        assert!(
            html.contains(&format!("<h{} id=\"{}\">", heading.level, heading.id)),
            "missing {} in {html}",
            heading.id
        );
    }
}

#[test]
fn tour_fixture_renders_every_construct() {
    let html = plain_mud()
        .render_up(&fixture("tour.md"), None, None)
        .unwrap();

    for needle in [
        "<h1 id=\"mud-tour\">Mud Tour</h1>",
        "<strong>Mud</strong> 👋",
        "<input type=\"checkbox\" disabled=\"\" checked=\"\" />",
        "<ol>\n",
        "<pre><code class=\"language-rust\">fn main() {\n    println!(&quot;hi&quot;);\n}\n</code></pre>",
        "<th align=\"left\">Name</th>",
        "<td align=\"right\">1</td>",
        "class=\"alert alert-warning\"",
        "Status: <strong>Draft</strong>",
        "<hr />",
        "<img src=\"images/logo.png\" alt=\"logo\" title=\"Logo\" />",
    ] {
        assert!(html.contains(needle), "missing {needle:?} in {html}");
    }
}

#[test]
fn renders_are_independent() {
    let mud = plain_mud();
    let first = mud.render_up("# Same\n# Same", None, None).unwrap();
    let second = mud.render_up("# Same\n# Same", None, None).unwrap();
    assert_eq!(first, second);
    assert!(first.contains("id=\"same-1\""));
}

#[test]
fn renders_in_parallel() {
    let mud = plain_mud();
    let expected = mud.render_up(&fixture("tour.md"), None, None).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| mud.render_up(&fixture("tour.md"), None, None).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
