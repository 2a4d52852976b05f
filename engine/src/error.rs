use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a message's citations could not be (fully) resolved.
///
/// None of these are fatal: the pipeline turns each of them into a
/// degraded [`ResolvedAnswer`](crate::ResolvedAnswer) instead of failing.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CitationError {
    #[error("answer payload is malformed: {reason}")]
    MalformedPayload { reason: String },
    #[error("document index has no pages")]
    EmptyDocumentIndex,
}
