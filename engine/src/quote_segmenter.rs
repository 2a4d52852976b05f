use crate::models::{EvidenceFragment, FragmentSequence};
use regex::Regex;
use std::sync::LazyLock;

// `(p.None)` is what the QA service prints when it lost the page number.
static PAGE_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*p\.\s*None\s*\)").expect("valid page placeholder regex"));
static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n]+").expect("valid line break regex"));

/// Splits a support quote into evidence fragments, one per line.
pub struct QuoteSegmenter;

impl QuoteSegmenter {
    pub fn new() -> Self {
        Self
    }

    pub fn segment(&self, quote: &str) -> FragmentSequence {
        let cleaned = PAGE_PLACEHOLDER.replace_all(quote, "");

        LINE_BREAKS
            .split(&cleaned)
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(EvidenceFragment::new)
            .collect()
    }
}

impl Default for QuoteSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(quote: &str) -> Vec<String> {
        QuoteSegmenter::new()
            .segment(quote)
            .into_iter()
            .map(|fragment| fragment.text)
            .collect()
    }

    #[test]
    fn strips_placeholders_and_splits_lines() {
        assert_eq!(texts("Evidence A (p.None)\nEvidence B"), vec!["Evidence A", "Evidence B"]);
    }

    #[test]
    fn placeholder_on_its_own_line_leaves_no_fragment() {
        assert_eq!(
            texts("Leadership requires trust.\n(p.None)\nTrust is built over time."),
            vec!["Leadership requires trust.", "Trust is built over time."]
        );
    }

    #[test]
    fn tolerates_spaced_placeholders_and_keeps_real_pages() {
        assert_eq!(texts("One (p. None) two (p.12)"), vec!["One  two (p.12)"]);
    }

    #[test]
    fn collapses_line_break_runs_and_crlf() {
        assert_eq!(texts("a\n\n\nb\r\nc\r\rd"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn drops_blank_lines_and_keeps_duplicates_in_order() {
        assert_eq!(texts("  \n same \n\t\n same \nother"), vec!["same", "same", "other"]);
    }

    #[test]
    fn empty_quote_yields_no_fragments() {
        assert!(texts("").is_empty());
        assert!(texts("(p.None)\n \n").is_empty());
    }
}
