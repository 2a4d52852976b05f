//! Resolves the supporting quote of a QA answer to the pages of the book it
//! was taken from.

pub mod citation_assembler;
pub mod citation_service;
pub mod document_index;
pub mod error;
pub mod fragment_merger;
pub mod models;
pub mod page_resolver;
pub mod payload_parser;
pub mod quote_segmenter;
pub mod text_normalizer;

pub use citation_assembler::CitationAssembler;
pub use citation_service::CitationService;
pub use document_index::{DocumentTextIndex, PageTextSource};
pub use error::CitationError;
pub use fragment_merger::FragmentMerger;
pub use models::*;
pub use page_resolver::PageResolver;
pub use payload_parser::AnswerPayloadParser;
pub use quote_segmenter::QuoteSegmenter;
pub use text_normalizer::normalize;

/// Parses `raw_answer` and resolves its quote against `index`. Never fails.
pub fn resolve_citations(raw_answer: &str, index: &DocumentTextIndex) -> ResolvedAnswer {
    CitationService::default().resolve(raw_answer, index)
}

/// Builds the index for a freshly opened document, one string per page.
pub fn build_document_index<I, S>(pages: I) -> DocumentTextIndex
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    DocumentTextIndex::build(pages)
}
