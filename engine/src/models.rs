use crate::error::CitationError;
use crate::text_normalizer::normalize;
use serde::{Deserialize, Deserializer, Serialize};

/// Structured answer decoded from the QA service's wrapped JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub found: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub support: Support,
    #[serde(default, deserialize_with = "null_as_default")]
    pub answer: String,
    /// Upstream citation entries. Their shape is not guaranteed, so they
    /// are carried through untouched.
    #[serde(default, deserialize_with = "null_as_default")]
    pub citations: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub policy: Policy,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Support {
    #[serde(default, deserialize_with = "null_as_default")]
    pub quote: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    #[serde(default, alias = "negativeRejection", deserialize_with = "null_as_default")]
    pub negative_rejection: bool,
    #[serde(default, alias = "bestScore", deserialize_with = "null_as_default")]
    pub best_score: f64,
}

/// Response envelope returned by the QA service's `/query` route.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QaResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub question: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rewritten: String,
    /// Either the fenced JSON string or an already-decoded object.
    #[serde(default)]
    pub answer: serde_json::Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub context: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub citations: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub policy: Policy,
}

impl QaResponse {
    pub fn raw_answer(&self) -> String {
        match &self.answer {
            serde_json::Value::String(raw) => raw.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// One unit of quoted evidence. The normalized form is always derived
/// from `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceFragment {
    pub text: String,
}

impl EvidenceFragment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn normalized(&self) -> String {
        normalize(&self.text)
    }
}

pub type FragmentSequence = Vec<EvidenceFragment>;

/// A fragment together with the pages it was found on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    pub fragment_index: usize,
    pub text: String,
    pub pages: Vec<usize>,
}

/// Everything the chat UI needs to render one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAnswer {
    pub found: bool,
    pub answer_text: String,
    pub citations: Vec<Citation>,
    pub policy: Policy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<CitationError>,
}

impl ResolvedAnswer {
    pub fn unavailable(issue: CitationError) -> Self {
        Self {
            found: false,
            answer_text: String::new(),
            citations: Vec::new(),
            policy: Policy::default(),
            issue: Some(issue),
        }
    }

    /// Pages flattened in fragment order. A page cited by two fragments
    /// appears twice.
    pub fn page_references(&self) -> Vec<usize> {
        self.citations
            .iter()
            .flat_map(|citation| citation.pages.iter().copied())
            .collect()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
