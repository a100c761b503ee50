/// Split a stored response into its answer labels, one per question column.
///
/// Each `|`-separated token loses its first two characters (the question
/// marker). An empty response has no columns.
pub fn answer_labels(response: &str) -> Vec<&str> {
    if response.is_empty() {
        return Vec::new();
    }
    response.split('|').map(strip_marker).collect()
}

/// Drop the `default_` prefix the creative adds to segmentation labels.
pub fn segment_label(segmentation: &str) -> &str {
    segmentation
        .strip_prefix("default_")
        .unwrap_or(segmentation)
}

fn strip_marker(token: &str) -> &str {
    match token.char_indices().nth(2) {
        Some((offset, _)) => &token[offset..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_two_character_markers() {
        assert_eq!(answer_labels("1:A|3:BC"), vec!["A", "BC"]);
        assert_eq!(answer_labels("A:x|B:y"), vec!["x", "y"]);
    }

    #[test]
    fn short_tokens_become_empty_labels() {
        assert_eq!(answer_labels("1:|5"), vec!["", ""]);
        assert!(answer_labels("").is_empty());
    }

    #[test]
    fn markers_are_counted_in_characters() {
        assert_eq!(answer_labels("é:oui"), vec!["oui"]);
    }

    #[test]
    fn segment_prefix_is_removed() {
        assert_eq!(segment_label("default_expose"), "expose");
        assert_eq!(segment_label("control"), "control");
        assert_eq!(segment_label("preview"), "preview");
    }
}
