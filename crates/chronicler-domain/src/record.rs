//! The structured record produced by extraction

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::chat::SchemaSpec;

/// Schema name announced to the provider for structured generation
pub const RECORD_SCHEMA_NAME: &str = "technology_topic_record";

/// Validated, structured knowledge about one technology topic.
///
/// Every field is required and non-null; a response that fails to satisfy
/// the schema is rejected during extraction, so a constructed `TopicRecord`
/// is always complete. Records are immutable after creation; reprocessing
/// the same content yields the cached prior record, never a mutation.
///
/// Field doc comments double as schema descriptions for the LLM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TopicRecord {
    /// The canonical name of the technology topic (e.g. Machine Learning,
    /// Expert Systems, Computer Vision)
    pub topic_id: String,

    /// Concise overview of the topic, its purpose, and scope
    pub summary: String,

    /// Chronological evolution of this topic, with notable milestones
    /// across time
    pub evolution_timeline: String,

    /// The most important breakthroughs, inventions, or discoveries that
    /// shaped this topic
    pub key_innovations: String,

    /// Key researchers, organizations, or companies that significantly
    /// advanced this topic
    pub major_contributors: String,

    /// Core methods, models, or algorithms commonly used in this topic
    pub main_techniques: Vec<String>,

    /// Practical use cases and domains where this topic has had major impact
    pub applications: Vec<String>,
}

impl TopicRecord {
    /// Validate invariants beyond what deserialization already enforces.
    ///
    /// Deserialization with `deny_unknown_fields` guarantees that all seven
    /// fields are present with the right types; this check additionally
    /// rejects a blank `topic_id`, which cannot serve as a collection key.
    pub fn validate(&self) -> Result<(), String> {
        if self.topic_id.trim().is_empty() {
            return Err("topic_id is empty".to_string());
        }
        Ok(())
    }

    /// The JSON schema for this record, derived from the type definition.
    pub fn json_schema() -> serde_json::Value {
        let schema = schemars::schema_for!(TopicRecord);
        serde_json::to_value(schema.schema)
            .unwrap_or_else(|_| serde_json::json!({"type": "object"}))
    }

    /// The strict schema envelope handed to a provider for structured
    /// generation: no extra fields allowed, all listed fields required.
    pub fn schema_spec() -> SchemaSpec {
        SchemaSpec::strict(RECORD_SCHEMA_NAME, Self::json_schema())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> TopicRecord {
        TopicRecord {
            topic_id: "Reinforcement Learning".to_string(),
            summary: "Learning by interacting with an environment".to_string(),
            evolution_timeline: "1950s dynamic programming onward".to_string(),
            key_innovations: "Temporal-difference learning, deep Q-networks".to_string(),
            major_contributors: "Sutton, Barto, DeepMind".to_string(),
            main_techniques: vec!["Q-learning".to_string(), "policy gradients".to_string()],
            applications: vec!["game playing".to_string(), "robotics".to_string()],
        }
    }

    #[test]
    fn test_valid_record() {
        assert!(sample_record().validate().is_ok());
    }

    #[test]
    fn test_blank_topic_id_rejected() {
        let mut record = sample_record();
        record.topic_id = "   ".to_string();
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_deserialize_rejects_missing_field() {
        let json = r#"{
            "topic_id": "Deep Learning",
            "summary": "Neural networks with many layers"
        }"#;
        let result: Result<TopicRecord, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_rejects_unknown_field() {
        let json = r#"{
            "topic_id": "Deep Learning",
            "summary": "s",
            "evolution_timeline": "t",
            "key_innovations": "i",
            "major_contributors": "c",
            "main_techniques": [],
            "applications": [],
            "extra_field": "not in the schema"
        }"#;
        let result: Result<TopicRecord, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_rejects_null_field() {
        let json = r#"{
            "topic_id": "Deep Learning",
            "summary": null,
            "evolution_timeline": "t",
            "key_innovations": "i",
            "major_contributors": "c",
            "main_techniques": [],
            "applications": []
        }"#;
        let result: Result<TopicRecord, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_schema_lists_all_fields_as_required() {
        let schema = TopicRecord::json_schema();
        let required: Vec<String> = schema["required"]
            .as_array()
            .expect("schema has a required list")
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect();

        for field in [
            "topic_id",
            "summary",
            "evolution_timeline",
            "key_innovations",
            "major_contributors",
            "main_techniques",
            "applications",
        ] {
            assert!(required.contains(&field.to_string()), "missing {}", field);
        }
    }

    #[test]
    fn test_schema_forbids_additional_properties() {
        let schema = TopicRecord::json_schema();
        assert_eq!(schema["additionalProperties"], serde_json::json!(false));
    }

    #[test]
    fn test_schema_spec_is_strict() {
        let spec = TopicRecord::schema_spec();
        assert_eq!(spec.name, RECORD_SCHEMA_NAME);
        assert!(spec.strict);
    }

    #[test]
    fn test_record_serde_round_trip() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let parsed: TopicRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, parsed);
    }
}
