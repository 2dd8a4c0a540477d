//! Splits highlighted HTML into independently valid lines.

const SPAN_CLOSE: &str = "</span>";
const SPAN_OPEN_PREFIX: &str = "<span";

/// Splits `html` at newlines, balancing `<span>` tags across each break.
///
/// The input holds only `<span …>` / `</span>` tags and literal text, which
/// is what the code highlighter emits. At every newline all open spans are
/// closed, and the same opening tags, attributes included, are replayed at
/// the start of the next line. A trailing empty line is dropped.
///
/// # Example
///
/// ```rust
/// use mud_core::split_by_line;
///
/// let lines = split_by_line("<span class=\"c\">a\nb</span>\n");
/// assert_eq!(
///     lines,
///     vec!["<span class=\"c\">a</span>", "<span class=\"c\">b</span>"]
/// );
/// ```
pub fn split_by_line(html: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut open_tags: Vec<&str> = Vec::new();
    let mut rest = html;

    while let Some(ch) = rest.chars().next() {
        if ch == '\n' {
            for _ in &open_tags {
                current.push_str(SPAN_CLOSE);
            }
            lines.push(std::mem::take(&mut current));
            for tag in &open_tags {
                current.push_str(tag);
            }
            rest = &rest[1..];
        } else if rest.starts_with(SPAN_CLOSE) {
            current.push_str(SPAN_CLOSE);
            open_tags.pop();
            rest = &rest[SPAN_CLOSE.len()..];
        } else if rest.starts_with(SPAN_OPEN_PREFIX) {
            match rest.find('>') {
                Some(gt) => {
                    let tag = &rest[..=gt];
                    open_tags.push(tag);
                    current.push_str(tag);
                    rest = &rest[gt + 1..];
                }
                None => {
                    current.push('<');
                    rest = &rest[1..];
                }
            }
        } else {
            // Copy the text run up to the next tag or line break.
            let end = match rest.find(['\n', '<']) {
                Some(0) => ch.len_utf8(),
                Some(end) => end,
                None => rest.len(),
            };
            current.push_str(&rest[..end]);
            rest = &rest[end..];
        }
    }

    lines.push(current);
    if lines.len() > 1 && lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_text_lines() {
        assert_eq!(split_by_line("a\nb\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_trailing_newline_dropped() {
        assert_eq!(split_by_line("a\nb\n"), vec!["a", "b"]);
    }

    #[test]
    fn test_only_one_trailing_line_dropped() {
        assert_eq!(split_by_line("a\n\n"), vec!["a", ""]);
    }

    #[test]
    fn test_empty_input_yields_one_empty_line() {
        assert_eq!(split_by_line(""), vec![""]);
    }

    #[test]
    fn test_span_within_line_untouched() {
        let html = r#"let <span class="hl-keyword">x</span> = 1"#;
        assert_eq!(split_by_line(html), vec![html]);
    }

    #[test]
    fn test_span_crossing_lines_is_reopened() {
        let html = "<span class=\"hl-comment\">/* one\ntwo */</span> x";
        assert_eq!(
            split_by_line(html),
            vec![
                "<span class=\"hl-comment\">/* one</span>",
                "<span class=\"hl-comment\">two */</span> x",
            ]
        );
    }

    #[test]
    fn test_nested_spans_reopened_in_order() {
        let html = "<span class=\"a\"><span class=\"b\">1\n2</span>3</span>";
        assert_eq!(
            split_by_line(html),
            vec![
                "<span class=\"a\"><span class=\"b\">1</span></span>",
                "<span class=\"a\"><span class=\"b\">2</span>3</span>",
            ]
        );
    }

    #[test]
    fn test_span_spanning_three_lines() {
        let html = "<span class=\"s\">a\nb\nc</span>";
        assert_eq!(
            split_by_line(html),
            vec![
                "<span class=\"s\">a</span>",
                "<span class=\"s\">b</span>",
                "<span class=\"s\">c</span>",
            ]
        );
    }

    #[test]
    fn test_escaped_text_passes_through() {
        assert_eq!(
            split_by_line("&lt;div&gt;\n&amp;"),
            vec!["&lt;div&gt;", "&amp;"]
        );
    }

    #[test]
    fn test_unterminated_tag_is_literal() {
        assert_eq!(split_by_line("<span class"), vec!["<span class"]);
    }

    #[test]
    fn test_non_ascii_text() {
        assert_eq!(
            split_by_line("<span class=\"s\">\"héllo\nwörld\"</span>"),
            vec![
                "<span class=\"s\">\"héllo</span>",
                "<span class=\"s\">wörld\"</span>",
            ]
        );
    }
}
