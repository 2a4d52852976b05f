use crate::document_index::DocumentTextIndex;
use crate::models::EvidenceFragment;

/// Finds the pages a fragment is quoted from.
pub struct PageResolver;

impl PageResolver {
    pub fn new() -> Self {
        Self
    }

    /// Every page whose normalized text contains the fragment, ascending.
    /// A fragment that is a paraphrase rather than a verbatim quote simply
    /// resolves to no pages.
    pub fn resolve(&self, fragment: &EvidenceFragment, index: &DocumentTextIndex) -> Vec<usize> {
        let needle = fragment.normalized();
        if needle.is_empty() {
            return Vec::new();
        }

        index
            .pages()
            .filter(|(_, text)| text.contains(&needle))
            .map(|(page, _)| page)
            .collect()
    }
}

impl Default for PageResolver {
    fn default() -> Self {
        Self::new()
    }
}
