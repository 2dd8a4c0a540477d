//! End-to-end tests of Down mode through the `Mud` facade.

mod common;

use common::{down_cells, fixture, plain_mud};
use pretty_assertions::assert_eq;

fn line_numbers(table: &str) -> Vec<String> {
    table
        .split("<td class=\"ln\">")
        .skip(1)
        .map(|cell| cell.split("</td>").next().unwrap_or_default().to_owned())
        .collect()
}

fn assert_balanced(cell: &str) {
    assert_eq!(
        cell.matches("<span").count(),
        cell.matches("</span>").count(),
        "unbalanced row: {cell}"
    );
}

#[test]
fn one_row_per_line() {
    let table = plain_mud().render_down("one\ntwo\nthree\n").unwrap();
    assert_eq!(line_numbers(&table), vec!["1", "2", "3"]);
}

#[test]
fn empty_source_has_one_row() {
    let table = plain_mud().render_down("").unwrap();
    assert_eq!(
        table,
        "<table class=\"down-lines\"><tbody><tr><td class=\"ln\">1</td><td class=\"lc\"></td></tr></tbody></table>"
    );
}

#[test]
fn fenced_block_rows_are_well_formed() {
    let table = plain_mud().render_down("```\na\nb\n```").unwrap();
    let cells = down_cells(&table);
    assert_eq!(cells.len(), 4);
    for cell in &cells {
        assert_balanced(cell);
    }
}

#[test]
fn same_position_spans_nest() {
    let table = plain_mud().render_down("# [x](y)").unwrap();
    assert_eq!(
        down_cells(&table),
        vec!["<span class=\"md-heading\"># <span class=\"md-link\">[x](y)</span></span>"]
    );

    let table = plain_mud().render_down("***x***").unwrap();
    let cell = &down_cells(&table)[0];
    assert!(cell.ends_with("***</span></span>"), "{cell}");
    assert_balanced(cell);
}

#[test]
fn source_text_is_escaped() {
    let table = plain_mud().render_down("a < b & \"c\"").unwrap();
    assert_eq!(down_cells(&table), vec!["a &lt; b &amp; &quot;c&quot;"]);
}

#[test]
fn tour_fixture_rows_are_balanced() {
    let source = fixture("tour.md");
    let table = plain_mud().render_down(&source).unwrap();
    let cells = down_cells(&table);

    assert_eq!(cells.len(), source.lines().count());
    for cell in &cells {
        assert_balanced(cell);
    }
    for class in [
        "md-heading",
        "md-strong",
        "md-emphasis",
        "md-task",
        "md-code-fence",
        "md-code-info",
        "md-code-block",
        "md-table",
        "md-blockquote",
        "md-hr",
        "md-image",
    ] {
        assert!(table.contains(&format!("class=\"{class}\"")), "missing {class}");
    }
}

#[test]
fn highlighted_code_is_split_per_line() {
    use std::sync::Arc;

    let wrap = |code: &str, _: Option<&str>| {
        Some(format!("<span class=\"hl-x\">{}</span>", code.trim_end()))
    };
    let mud = plain_mud().with_highlighter(Arc::new(wrap));
    let table = mud.render_down("```x\na\nb\n```\n").unwrap();
    let cells = down_cells(&table);

    assert_eq!(
        cells[1],
        "<span class=\"md-code-block\"><span class=\"hl-x\">a</span></span>"
    );
    assert_eq!(
        cells[2],
        "<span class=\"md-code-block\"><span class=\"hl-x\">b</span></span>"
    );
}
