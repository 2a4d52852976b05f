use crate::models::{EvidenceFragment, FragmentSequence};

/// Re-joins quote lines that the QA model broke apart mid-sentence.
///
/// Two neighbouring fragments are one piece of evidence when their
/// normalized concatenation occurs in the document. The merged fragment
/// keeps both raw texts joined by a newline and is immediately tested
/// against its next neighbour, so a sentence split three ways collapses
/// back into one fragment. Order is never changed and only adjacent
/// fragments are ever joined.
pub struct FragmentMerger;

impl FragmentMerger {
    pub fn new() -> Self {
        Self
    }

    pub fn merge(&self, fragments: FragmentSequence, full_normalized_text: &str) -> FragmentSequence {
        let mut fragments = fragments;
        let mut i = 0;

        while i + 1 < fragments.len() {
            let combined = fragments[i].normalized() + &fragments[i + 1].normalized();

            if !combined.is_empty() && full_normalized_text.contains(&combined) {
                let next = fragments.remove(i + 1);
                let merged = format!("{}\n{}", fragments[i].text, next.text);
                log::debug!("Merged quote fragments {} and {}", i, i + 1);
                fragments[i] = EvidenceFragment::new(merged);
            } else {
                i += 1;
            }
        }

        fragments
    }
}

impl Default for FragmentMerger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragments(texts: &[&str]) -> FragmentSequence {
        texts.iter().map(|text| EvidenceFragment::new(*text)).collect()
    }

    fn merged_texts(texts: &[&str], full: &str) -> Vec<String> {
        FragmentMerger::new()
            .merge(fragments(texts), full)
            .into_iter()
            .map(|fragment| fragment.text)
            .collect()
    }

    #[test]
    fn joins_contiguous_split_sentence() {
        assert_eq!(
            merged_texts(&["The quick brown", "fox jumps"], "thequickbrownfoxjumps"),
            vec!["The quick brown\nfox jumps"]
        );
    }

    #[test]
    fn leaves_non_contiguous_fragments_apart() {
        assert_eq!(
            merged_texts(&["The quick", "jumps over"], "thequickbrownfoxjumpsover"),
            vec!["The quick", "jumps over"]
        );
    }

    #[test]
    fn merged_fragment_keeps_merging_with_its_new_neighbour() {
        assert_eq!(
            merged_texts(&["one two", "three", "four five", "unrelated"], "onetwothreefourfivesix"),
            vec!["one two\nthree\nfour five", "unrelated"]
        );
    }

    #[test]
    fn never_joins_across_a_gap() {
        // "a" + "c" is in the text, but they are not neighbours.
        assert_eq!(merged_texts(&["a", "zzz", "c"], "ac"), vec!["a", "zzz", "c"]);
    }

    #[test]
    fn later_pairs_still_merge_after_a_miss() {
        assert_eq!(
            merged_texts(&["nothing here", "split", "line"], "asplitlineb"),
            vec!["nothing here", "split\nline"]
        );
    }

    #[test]
    fn empty_and_single_sequences_are_unchanged() {
        assert!(merged_texts(&[], "anything").is_empty());
        assert_eq!(merged_texts(&["solo"], "solo"), vec!["solo"]);
    }

    #[test]
    fn nothing_merges_against_an_empty_document() {
        assert_eq!(merged_texts(&["a", "b"], ""), vec!["a", "b"]);
    }

    #[test]
    fn merge_is_case_and_whitespace_insensitive() {
        assert_eq!(
            merged_texts(&["LEADERSHIP  requires", "Trust."], "leadershiprequirestrust.andmore"),
            vec!["LEADERSHIP  requires\nTrust."]
        );
    }
}
