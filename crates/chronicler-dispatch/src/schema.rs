//! Tool schema generation
//!
//! Builds the declarative function schemas offered to the model during
//! selection. Topic parameters are enum-constrained to the currently known
//! topic ids, so definitions must be regenerated per dispatch call: the set
//! grows as more articles are processed.

use chronicler_domain::ToolDefinition;
use serde_json::json;

/// Name of the comparison tool
pub const COMPARE_TOOL: &str = "compare_topics";

/// Name of the evolution-tracing tool
pub const TRACE_TOOL: &str = "trace_evolution";

/// Build the tool definitions for the given set of known topic ids.
pub fn tool_definitions(topics: &[String]) -> Vec<ToolDefinition> {
    vec![compare_definition(topics), trace_definition(topics)]
}

fn compare_definition(topics: &[String]) -> ToolDefinition {
    ToolDefinition {
        name: COMPARE_TOOL.to_string(),
        description: "Compare two extracted topics".to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "first_topic": {
                    "type": "string",
                    "description": "The first topic to compare",
                    "enum": topics
                },
                "second_topic": {
                    "type": "string",
                    "description": "The second topic to compare",
                    "enum": topics
                }
            },
            "required": ["first_topic", "second_topic"]
        }),
    }
}

fn trace_definition(topics: &[String]) -> ToolDefinition {
    ToolDefinition {
        name: TRACE_TOOL.to_string(),
        description: "Trace the historical evolution of a given topic".to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "topic": {
                    "type": "string",
                    "description": "The topic to trace",
                    "enum": topics
                }
            },
            "required": ["topic"]
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics() -> Vec<String> {
        vec!["Deep Learning".to_string(), "Reinforcement Learning".to_string()]
    }

    #[test]
    fn test_two_tools_are_declared() {
        let definitions = tool_definitions(&topics());
        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].name, COMPARE_TOOL);
        assert_eq!(definitions[1].name, TRACE_TOOL);
    }

    #[test]
    fn test_enum_constraint_carries_current_topics() {
        let definitions = tool_definitions(&topics());
        let compare = &definitions[0].parameters;

        let allowed = compare["properties"]["first_topic"]["enum"]
            .as_array()
            .unwrap();
        assert_eq!(allowed.len(), 2);
        assert!(allowed.contains(&serde_json::json!("Deep Learning")));
    }

    #[test]
    fn test_definitions_track_a_growing_topic_set() {
        let first = tool_definitions(&["A".to_string()]);
        let second = tool_definitions(&["A".to_string(), "B".to_string()]);

        let count = |d: &chronicler_domain::ToolDefinition| {
            d.parameters["properties"]["topic"]["enum"]
                .as_array()
                .unwrap()
                .len()
        };
        assert_eq!(count(&first[1]), 1);
        assert_eq!(count(&second[1]), 2);
    }

    #[test]
    fn test_required_arguments_are_declared() {
        let definitions = tool_definitions(&topics());
        assert_eq!(
            definitions[0].parameters["required"],
            serde_json::json!(["first_topic", "second_topic"])
        );
        assert_eq!(definitions[1].parameters["required"], serde_json::json!(["topic"]));
    }
}
