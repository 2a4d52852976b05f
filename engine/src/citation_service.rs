use crate::citation_assembler::CitationAssembler;
use crate::document_index::DocumentTextIndex;
use crate::error::CitationError;
use crate::fragment_merger::FragmentMerger;
use crate::models::*;
use crate::payload_parser::AnswerPayloadParser;
use crate::quote_segmenter::QuoteSegmenter;

/// Runs one QA answer through parse, segment, merge and page resolution.
///
/// Holds no per-message state; the same service can serve every open
/// document concurrently.
pub struct CitationService {
    parser: AnswerPayloadParser,
    segmenter: QuoteSegmenter,
    merger: FragmentMerger,
    assembler: CitationAssembler,
}

impl CitationService {
    pub fn new(
        parser: AnswerPayloadParser,
        segmenter: QuoteSegmenter,
        merger: FragmentMerger,
        assembler: CitationAssembler,
    ) -> Self {
        Self {
            parser,
            segmenter,
            merger,
            assembler,
        }
    }

    /// Never fails: a malformed payload yields an unavailable answer with no
    /// citations, and an empty index yields citations without pages.
    pub fn resolve(&self, raw_answer: &str, index: &DocumentTextIndex) -> ResolvedAnswer {
        match self.parser.parse(raw_answer) {
            Ok(payload) => self.resolve_payload(payload, index),
            Err(err) => {
                log::warn!("Answer unavailable: {}", err);
                ResolvedAnswer::unavailable(err)
            }
        }
    }

    pub fn resolve_response(&self, response: &QaResponse, index: &DocumentTextIndex) -> ResolvedAnswer {
        self.resolve(&response.raw_answer(), index)
    }

    pub fn resolve_payload(&self, payload: AnswerPayload, index: &DocumentTextIndex) -> ResolvedAnswer {
        let fragments = self.segmenter.segment(&payload.support.quote);
        let fragment_count = fragments.len();
        let fragments = self.merger.merge(fragments, index.full_text());
        let citations = self.assembler.assemble(&fragments, index);

        let issue = if index.is_empty() {
            log::warn!("Resolving {} citations against an empty document index", citations.len());
            Some(CitationError::EmptyDocumentIndex)
        } else {
            None
        };

        log::info!(
            "Resolved {} quote fragments into {} citations ({} located)",
            fragment_count,
            citations.len(),
            citations.iter().filter(|c| !c.pages.is_empty()).count()
        );

        ResolvedAnswer {
            found: payload.found,
            answer_text: payload.answer,
            citations,
            policy: payload.policy,
            issue,
        }
    }
}

impl Default for CitationService {
    fn default() -> Self {
        Self::new(
            AnswerPayloadParser::new(),
            QuoteSegmenter::new(),
            FragmentMerger::new(),
            CitationAssembler::default(),
        )
    }
}
