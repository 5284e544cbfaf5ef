/// One-line preview of markup for log lines: whitespace runs collapse to a single
/// space, and anything past `max_chars` characters becomes `...`.
pub fn preview(markup: &str, max_chars: usize) -> String {
    let flat = markup.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    if max_chars <= 3 {
        return flat.chars().take(max_chars).collect();
    }
    let end = flat
        .char_indices()
        .nth(max_chars - 3)
        .map_or(flat.len(), |(i, _)| i);
    format!("{}...", &flat[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_markup_unchanged() {
        assert_eq!(preview("<p>Hi</p>", 20), "<p>Hi</p>");
    }

    #[test]
    fn whitespace_collapses() {
        assert_eq!(
            preview("<article>\n    <p>a</p>\n</article>", 80),
            "<article> <p>a</p> </article>"
        );
    }

    #[test]
    fn long_markup_truncated_with_ellipsis() {
        let result = preview("<p>hello world this is long</p>", 10);
        assert_eq!(result, "<p>hell...");
        assert_eq!(result.chars().count(), 10);
    }

    #[test]
    fn multibyte_is_cut_on_char_boundary() {
        let result = preview("<p>こんにちは世界</p>", 6);
        assert_eq!(result, "<p>...");
        assert_eq!(preview("日本語テキスト", 5), "日本...");
    }

    #[test]
    fn tiny_limits_hard_truncate() {
        assert_eq!(preview("hello", 0), "");
        assert_eq!(preview("hello", 3), "hel");
    }
}
