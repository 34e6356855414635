/// Locates the first balanced `[...]` literal at or after byte offset `from`.
///
/// Scans with a depth counter: `[` increments, `]` decrements, and the literal
/// ends when depth returns to zero. Returns the inclusive byte range of the
/// literal, or `None` when no `[` exists after `from` or the brackets never
/// balance. Brackets inside string literals are not special-cased; the source
/// pages do not embed them in trace payloads.
pub(crate) fn balanced_array(text: &str, from: usize) -> Option<(usize, usize)> {
    let open = text[from..].find('[')? + from;
    let mut depth = 0usize;
    for (i, b) in text.as_bytes()[open..].iter().enumerate() {
        match b {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some((open, open + i));
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_array() {
        let text = "Plotly.newPlot([1,2,3], {})";
        let (s, e) = balanced_array(text, 0).unwrap();
        assert_eq!(&text[s..=e], "[1,2,3]");
    }

    #[test]
    fn nested_arrays_to_arbitrary_depth() {
        let text = "pad [[1,[2,[3,[4]]]],[5]] tail ]";
        let (s, e) = balanced_array(text, 0).unwrap();
        assert_eq!(&text[s..=e], "[[1,[2,[3,[4]]]],[5]]");
    }

    #[test]
    fn starts_scanning_at_offset() {
        let text = "[skip me] marker [1,2]";
        let offset = text.find("marker").unwrap();
        let (s, e) = balanced_array(text, offset).unwrap();
        assert_eq!(&text[s..=e], "[1,2]");
    }

    #[test]
    fn unbalanced_returns_none() {
        assert!(balanced_array("[[1,2]", 0).is_none());
    }

    #[test]
    fn no_opening_bracket_returns_none() {
        assert!(balanced_array("nothing here", 0).is_none());
    }
}
