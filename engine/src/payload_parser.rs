use crate::error::CitationError;
use crate::models::AnswerPayload;
use regex::Regex;
use std::sync::LazyLock;

static LEADING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*```[A-Za-z0-9_+.\-]*").expect("valid leading fence regex"));
static TRAILING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```\s*$").expect("valid trailing fence regex"));

/// Decodes the answer JSON that the QA model wraps in a markdown code fence.
pub struct AnswerPayloadParser;

impl AnswerPayloadParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, raw: &str) -> Result<AnswerPayload, CitationError> {
        let unfenced = strip_fences(raw);
        if unfenced.is_empty() {
            return Err(malformed("answer is empty"));
        }

        match decode(unfenced) {
            Ok(payload) => Ok(payload),
            Err(err) => {
                // The model sometimes talks around the fenced block.
                if let Some(span) = outermost_object(unfenced).filter(|s| s.len() < unfenced.len()) {
                    if let Ok(payload) = decode(span) {
                        log::debug!("Recovered answer payload from surrounding prose");
                        return Ok(payload);
                    }
                }
                Err(err)
            }
        }
    }
}

impl Default for AnswerPayloadParser {
    fn default() -> Self {
        Self::new()
    }
}

fn strip_fences(raw: &str) -> &str {
    let start = LEADING_FENCE.find(raw).map_or(0, |m| m.end());
    let rest = &raw[start..];
    let end = TRAILING_FENCE.find(rest).map_or(rest.len(), |m| m.start());
    rest[..end].trim()
}

// Only a JSON object is a payload; serde would also accept a sequence for
// a struct with defaulted fields.
fn decode(text: &str) -> Result<AnswerPayload, CitationError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|err| malformed(err.to_string()))?;
    if !value.is_object() {
        return Err(malformed("answer is not a JSON object"));
    }
    serde_json::from_value(value).map_err(|err| malformed(err.to_string()))
}

fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn malformed(reason: impl Into<String>) -> CitationError {
    CitationError::MalformedPayload { reason: reason.into() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<AnswerPayload, CitationError> {
        AnswerPayloadParser::new().parse(raw)
    }

    #[test]
    fn parses_fenced_payload() {
        let raw = "```json\n{\"found\":true,\"support\":{\"quote\":\"A\\nB\"},\"answer\":\"Yes.\",\"citations\":[{\"page\":3}],\"policy\":{\"negative_rejection\":true,\"best_score\":0.42}}\n```";
        let payload = parse(raw).unwrap();
        assert!(payload.found);
        assert_eq!(payload.support.quote, "A\nB");
        assert_eq!(payload.answer, "Yes.");
        assert_eq!(payload.citations.len(), 1);
        assert!(payload.policy.negative_rejection);
        assert!((payload.policy.best_score - 0.42).abs() < f64::EPSILON);
    }

    #[test]
    fn parses_unfenced_and_bare_fenced_payloads() {
        assert!(parse(r#"{"found":true}"#).unwrap().found);
        assert!(parse("```\n{\"found\":true}\n```").unwrap().found);
        assert!(parse("```JSON{\"found\":true}```").unwrap().found);
    }

    #[test]
    fn missing_and_null_fields_default_to_empty() {
        let payload = parse(r#"{"answer":"Only an answer","support":null,"citations":null}"#).unwrap();
        assert!(!payload.found);
        assert_eq!(payload.support.quote, "");
        assert_eq!(payload.answer, "Only an answer");
        assert!(payload.citations.is_empty());
        assert!(!payload.policy.negative_rejection);
        assert_eq!(payload.policy.best_score, 0.0);
    }

    #[test]
    fn accepts_camel_case_policy_keys() {
        let payload = parse(r#"{"policy":{"negativeRejection":true,"bestScore":1.5}}"#).unwrap();
        assert!(payload.policy.negative_rejection);
        assert_eq!(payload.policy.best_score, 1.5);
    }

    #[test]
    fn recovers_payload_wrapped_in_prose() {
        let raw = "Here is the result:\n```json\n{\"found\":true,\"answer\":\"x\"}\n```\nHope this helps.";
        let payload = parse(raw).unwrap();
        assert!(payload.found);
        assert_eq!(payload.answer, "x");
    }

    #[test]
    fn rejects_broken_json() {
        let err = parse("```json\n{\"found\": tru\n```").unwrap_err();
        assert!(matches!(err, CitationError::MalformedPayload { .. }));
    }

    #[test]
    fn rejects_empty_and_non_object_input() {
        assert!(matches!(parse(""), Err(CitationError::MalformedPayload { .. })));
        assert!(matches!(parse("```json\n```"), Err(CitationError::MalformedPayload { .. })));
        assert!(matches!(parse("[1, 2]"), Err(CitationError::MalformedPayload { .. })));
        assert!(matches!(parse("[]"), Err(CitationError::MalformedPayload { .. })));
        assert!(matches!(parse("null"), Err(CitationError::MalformedPayload { .. })));
    }

    #[test]
    fn rejects_wrongly_typed_fields() {
        assert!(parse(r#"{"found":"yes"}"#).is_err());
    }
}
