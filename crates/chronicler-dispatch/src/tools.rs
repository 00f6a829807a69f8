//! Local tool execution
//!
//! The closed set of operations the model may select. Dispatch never
//! invokes by arbitrary name: a proposed invocation is parsed into
//! [`ToolCall`] first, and unrecognized names are rejected outright.

use crate::error::DispatchError;
use crate::schema::{COMPARE_TOOL, TRACE_TOOL};
use chronicler_domain::{RecordCollection, ToolInvocation, TopicRecord};
use serde_json::Value;
use std::fmt::Write;

/// A validated tool selection with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    /// Compare two topics' summaries, techniques, and applications
    Compare {
        /// First topic id
        first: String,
        /// Second topic id
        second: String,
    },
    /// Trace one topic's evolution
    Trace {
        /// Topic id to trace
        topic: String,
    },
}

impl ToolCall {
    /// Parse a model-proposed invocation into the closed tool set.
    ///
    /// The argument values are still advisory after this step; callers must
    /// check the referenced topics against the collection before executing.
    pub fn from_invocation(invocation: &ToolInvocation) -> Result<Self, DispatchError> {
        match invocation.name.as_str() {
            COMPARE_TOOL => Ok(ToolCall::Compare {
                first: required_string(&invocation.arguments, "first_topic")?,
                second: required_string(&invocation.arguments, "second_topic")?,
            }),
            TRACE_TOOL => Ok(ToolCall::Trace {
                topic: required_string(&invocation.arguments, "topic")?,
            }),
            other => Err(DispatchError::UnknownTool(other.to_string())),
        }
    }

    /// The topic ids this call references.
    pub fn topics(&self) -> Vec<&str> {
        match self {
            ToolCall::Compare { first, second } => vec![first, second],
            ToolCall::Trace { topic } => vec![topic],
        }
    }

    /// The declared name of the selected tool.
    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::Compare { .. } => COMPARE_TOOL,
            ToolCall::Trace { .. } => TRACE_TOOL,
        }
    }
}

fn required_string(arguments: &Value, key: &str) -> Result<String, DispatchError> {
    arguments
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| DispatchError::InvalidArguments(format!("missing or non-string '{}'", key)))
}

/// Render the comparison brief for two known topics.
///
/// Returns `None` when either topic is absent, a sentinel the dispatcher
/// reports as "not found", never a crash.
pub fn compare_brief(records: &RecordCollection, first: &str, second: &str) -> Option<String> {
    let a = records.get(first)?;
    let b = records.get(second)?;

    Some(format!(
        "Compare the following topics based on their summary, main techniques, and applications.\n\n{}\n\n{}",
        comparison_profile(a),
        comparison_profile(b)
    ))
}

fn comparison_profile(record: &TopicRecord) -> String {
    let mut profile = String::new();
    let _ = writeln!(profile, "{}:", record.topic_id);
    let _ = writeln!(profile, "Summary: {}", record.summary);
    let _ = writeln!(profile, "Main Techniques: {}", record.main_techniques.join(", "));
    let _ = write!(profile, "Applications: {}", record.applications.join(", "));
    profile
}

/// Render the evolution brief for one known topic.
///
/// Returns `None` when the topic is absent.
pub fn trace_brief(records: &RecordCollection, topic: &str) -> Option<String> {
    let record = records.get(topic)?;

    let mut brief = String::from("Trace the evolution of the following topic:\n\n");
    let _ = writeln!(brief, "{}:", record.topic_id);
    let _ = writeln!(brief, "Summary: {}", record.summary);
    let _ = writeln!(brief, "Evolution Timeline: {}", record.evolution_timeline);
    let _ = writeln!(brief, "Major Contributors: {}", record.major_contributors);
    let _ = write!(brief, "Key Innovations: {}", record.key_innovations);
    Some(brief)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(topic_id: &str) -> TopicRecord {
        TopicRecord {
            topic_id: topic_id.to_string(),
            summary: format!("{} summary", topic_id),
            evolution_timeline: "a long history".to_string(),
            key_innovations: "several firsts".to_string(),
            major_contributors: "many hands".to_string(),
            main_techniques: vec!["one".to_string(), "two".to_string()],
            applications: vec!["everywhere".to_string()],
        }
    }

    fn collection() -> RecordCollection {
        [record("Deep Learning"), record("Reinforcement Learning")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_parse_compare_invocation() {
        let invocation = ToolInvocation {
            name: COMPARE_TOOL.to_string(),
            arguments: json!({"first_topic": "A", "second_topic": "B"}),
        };
        let call = ToolCall::from_invocation(&invocation).unwrap();
        assert_eq!(
            call,
            ToolCall::Compare {
                first: "A".to_string(),
                second: "B".to_string()
            }
        );
        assert_eq!(call.topics(), vec!["A", "B"]);
    }

    #[test]
    fn test_parse_trace_invocation() {
        let invocation = ToolInvocation {
            name: TRACE_TOOL.to_string(),
            arguments: json!({"topic": "Deep Learning"}),
        };
        let call = ToolCall::from_invocation(&invocation).unwrap();
        assert_eq!(call.name(), TRACE_TOOL);
        assert_eq!(call.topics(), vec!["Deep Learning"]);
    }

    #[test]
    fn test_unknown_tool_name_is_rejected() {
        let invocation = ToolInvocation {
            name: "delete_everything".to_string(),
            arguments: json!({}),
        };
        let result = ToolCall::from_invocation(&invocation);
        assert!(matches!(result, Err(DispatchError::UnknownTool(_))));
    }

    #[test]
    fn test_missing_argument_is_rejected() {
        let invocation = ToolInvocation {
            name: COMPARE_TOOL.to_string(),
            arguments: json!({"first_topic": "A"}),
        };
        let result = ToolCall::from_invocation(&invocation);
        assert!(matches!(result, Err(DispatchError::InvalidArguments(_))));
    }

    #[test]
    fn test_non_string_argument_is_rejected() {
        let invocation = ToolInvocation {
            name: TRACE_TOOL.to_string(),
            arguments: json!({"topic": 42}),
        };
        let result = ToolCall::from_invocation(&invocation);
        assert!(matches!(result, Err(DispatchError::InvalidArguments(_))));
    }

    #[test]
    fn test_compare_brief_includes_both_profiles() {
        let brief = compare_brief(&collection(), "Deep Learning", "Reinforcement Learning").unwrap();
        assert!(brief.contains("Deep Learning summary"));
        assert!(brief.contains("Reinforcement Learning summary"));
        assert!(brief.contains("Main Techniques: one, two"));
        assert!(brief.contains("Applications: everywhere"));
    }

    #[test]
    fn test_compare_brief_missing_topic_is_none() {
        assert!(compare_brief(&collection(), "Deep Learning", "Quantum Computing").is_none());
        assert!(compare_brief(&collection(), "Quantum Computing", "Deep Learning").is_none());
    }

    #[test]
    fn test_trace_brief_includes_evolution_fields() {
        let brief = trace_brief(&collection(), "Deep Learning").unwrap();
        assert!(brief.contains("Evolution Timeline: a long history"));
        assert!(brief.contains("Major Contributors: many hands"));
        assert!(brief.contains("Key Innovations: several firsts"));
    }

    #[test]
    fn test_trace_brief_missing_topic_is_none() {
        assert!(trace_brief(&collection(), "Quantum Computing").is_none());
    }
}
