//! Parse LLM output into a validated record

use crate::error::ExtractorError;
use chronicler_domain::TopicRecord;

/// Parse a structured-generation response into a validated [`TopicRecord`].
///
/// Strict mode means the response should be bare JSON, but models sometimes
/// wrap it in a markdown code block anyway; the fence is tolerated. Anything
/// that does not deserialize against the record schema (missing fields,
/// extra fields, wrong types) is a [`ExtractorError::MalformedResponse`].
pub fn parse_record(response: &str) -> Result<TopicRecord, ExtractorError> {
    let json_str = strip_code_fence(response);

    let record: TopicRecord = serde_json::from_str(json_str.trim())
        .map_err(|e| ExtractorError::MalformedResponse(format!("JSON parse error: {}", e)))?;

    record.validate().map_err(ExtractorError::RejectedRecord)?;

    Ok(record)
}

/// Remove a surrounding markdown code block, if present.
fn strip_code_fence(response: &str) -> String {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return String::new();
        }
        // Skip first line (```json or ```) and last line (```)
        let inner = &lines[1..lines.len().saturating_sub(1)];
        inner.join("\n")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "topic_id": "Natural Language Processing",
        "summary": "Computational treatment of human language",
        "evolution_timeline": "Rule-based systems to transformers",
        "key_innovations": "Word embeddings, attention",
        "major_contributors": "Academic and industrial labs",
        "main_techniques": ["tokenization", "attention"],
        "applications": ["translation", "assistants"]
    }"#;

    #[test]
    fn test_parse_valid_record() {
        let record = parse_record(VALID).unwrap();
        assert_eq!(record.topic_id, "Natural Language Processing");
        assert_eq!(record.main_techniques, vec!["tokenization", "attention"]);
    }

    #[test]
    fn test_parse_record_with_markdown_wrapper() {
        let wrapped = format!("```json\n{}\n```", VALID);
        let record = parse_record(&wrapped).unwrap();
        assert_eq!(record.topic_id, "Natural Language Processing");
    }

    #[test]
    fn test_parse_record_with_bare_fence() {
        let wrapped = format!("```\n{}\n```", VALID);
        assert!(parse_record(&wrapped).is_ok());
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let result = parse_record("This is not JSON");
        assert!(matches!(result, Err(ExtractorError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        let result = parse_record(r#"{"topic_id": "X", "summary": "y"}"#);
        assert!(matches!(result, Err(ExtractorError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_rejects_extra_field() {
        let with_extra = VALID.trim_end_matches('}').to_string() + r#", "confidence": 0.9}"#;
        let result = parse_record(&with_extra);
        assert!(matches!(result, Err(ExtractorError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_rejects_blank_topic_id() {
        let blank = VALID.replace("Natural Language Processing", "  ");
        let result = parse_record(&blank);
        assert!(matches!(result, Err(ExtractorError::RejectedRecord(_))));
    }

    #[test]
    fn test_empty_code_block() {
        assert!(parse_record("```").is_err());
        assert!(parse_record("```\n```").is_err());
    }
}
