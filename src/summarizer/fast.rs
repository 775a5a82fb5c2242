//! Positional fast path
//!
//! No similarity scoring and no ranking: a handful of sentences at fixed
//! positions in the document.

use crate::nlp::tokenizer::char_prefix;

/// Documents up to this many sentences just keep their opening sentences.
const SHORT_DOCUMENT_SENTENCES: usize = 5;

/// Pick sentences by position.
///
/// Returns `None` when the document already fits in `num_sentences`. Up to
/// five sentences, the first `num_sentences` are kept. Longer documents
/// yield the first sentence, the middle one and one about three quarters
/// through (never the last).
pub fn positional_pick(sentences: &[String], num_sentences: usize) -> Option<Vec<&str>> {
    let n = sentences.len();
    if n <= num_sentences {
        return None;
    }

    if n <= SHORT_DOCUMENT_SENTENCES {
        return Some(sentences[..num_sentences].iter().map(String::as_str).collect());
    }

    let middle = n / 2;
    let near_end = (n - 2).min(n * 3 / 4);
    Some(vec![
        sentences[0].as_str(),
        sentences[middle].as_str(),
        sentences[near_end].as_str(),
    ])
}

/// Flatten newlines and cut to `max_chars` characters, marking the cut with
/// an ellipsis.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    let flat = text.replace('\n', " ");
    let mut out = char_prefix(&flat, max_chars).to_string();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("S{i}.")).collect()
    }

    #[test]
    fn test_fits_already() {
        assert!(positional_pick(&numbered(3), 3).is_none());
        assert!(positional_pick(&numbered(2), 3).is_none());
    }

    #[test]
    fn test_short_document_takes_leading() {
        let sentences = numbered(5);
        assert_eq!(
            positional_pick(&sentences, 3).unwrap(),
            vec!["S0.", "S1.", "S2."]
        );
        assert_eq!(positional_pick(&numbered(4), 1).unwrap(), vec!["S0."]);
    }

    #[test]
    fn test_long_document_positions() {
        let sentences = numbered(8);
        assert_eq!(
            positional_pick(&sentences, 3).unwrap(),
            vec!["S0.", "S4.", "S6."]
        );

        let sentences = numbered(20);
        assert_eq!(
            positional_pick(&sentences, 3).unwrap(),
            vec!["S0.", "S10.", "S15."]
        );

        let sentences = numbered(6);
        assert_eq!(
            positional_pick(&sentences, 3).unwrap(),
            vec!["S0.", "S3.", "S4."]
        );
    }

    #[test]
    fn test_long_document_ignores_count() {
        let sentences = numbered(12);
        let picked = positional_pick(&sentences, 5).unwrap();
        assert_eq!(picked.len(), 3);
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("ab\ncd", 3), "ab ...");
        assert_eq!(truncate_with_ellipsis("short", 500), "short...");
        assert_eq!(truncate_with_ellipsis("", 10), "...");
    }
}
