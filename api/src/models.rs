use citation_engine::{Citation, CitationError, DocumentTextIndex, Policy, ResolvedAnswer};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Deserialize)]
pub struct PagesRequest {
    pub pages: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub document_id: String,
    pub total_pages: usize,
    pub normalized_chars: usize,
}

impl DocumentInfo {
    pub fn new(document_id: String, index: &DocumentTextIndex) -> Self {
        Self {
            document_id,
            total_pages: index.total_pages(),
            normalized_chars: index.full_text().chars().count(),
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub documents: usize,
}

/// AI chat message as the reader UI renders it.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub content: String,
    pub found: bool,
    pub citations: Vec<Citation>,
    pub page_references: Vec<usize>,
    pub policy: Policy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<CitationError>,
    pub processing_time_ms: u128,
}

impl ChatMessage {
    pub fn from_resolved(resolved: ResolvedAnswer, processing_time_ms: u128) -> Self {
        let page_references = resolved.page_references();

        Self {
            id: Uuid::new_v4(),
            content: resolved.answer_text,
            found: resolved.found,
            citations: resolved.citations,
            page_references,
            policy: resolved.policy,
            issue: resolved.issue,
            processing_time_ms,
        }
    }
}
