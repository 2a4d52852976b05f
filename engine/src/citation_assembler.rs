use crate::document_index::DocumentTextIndex;
use crate::models::{Citation, FragmentSequence};
use crate::page_resolver::PageResolver;
use rayon::prelude::*;

/// Pairs each merged fragment with its resolved pages.
pub struct CitationAssembler {
    resolver: PageResolver,
}

impl CitationAssembler {
    pub fn new(resolver: PageResolver) -> Self {
        Self { resolver }
    }

    pub fn assemble(&self, fragments: &FragmentSequence, index: &DocumentTextIndex) -> Vec<Citation> {
        // Each scan only reads the shared index; the indexed collect keeps
        // fragment order.
        fragments
            .par_iter()
            .enumerate()
            .map(|(fragment_index, fragment)| {
                let pages = self.resolver.resolve(fragment, index);
                log::debug!("Fragment {} resolved to pages {:?}", fragment_index, pages);
                Citation {
                    fragment_index,
                    text: fragment.text.clone(),
                    pages,
                }
            })
            .collect()
    }
}

impl Default for CitationAssembler {
    fn default() -> Self {
        Self::new(PageResolver::new())
    }
}
