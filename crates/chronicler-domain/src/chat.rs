//! Provider-agnostic chat and tool-call types
//!
//! These shapes are what the pipeline speaks; each provider maps them onto
//! its own wire format.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role of a chat message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions and context supplied by the application
    System,
    /// Content supplied by the end user
    User,
    /// Content produced by the model
    Assistant,
}

/// One message in a single-turn conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author role
    pub role: Role,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// A system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Declarative description of a callable local function offered to the model.
///
/// `parameters` is a JSON schema object; enum-constrained parameters carry
/// the exact allowed values. Definitions whose constraints depend on runtime
/// state (the known topic set) must be regenerated per dispatch call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Function name the model selects by
    pub name: String,
    /// Human-readable description guiding selection
    pub description: String,
    /// JSON schema for the argument object
    pub parameters: Value,
}

/// A tool invocation proposed by the model: a function name plus a
/// structured argument object. Argument values are advisory and must be
/// re-validated locally before execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Name of the selected tool
    pub name: String,
    /// Argument object as returned by the model
    pub arguments: Value,
}

/// Outcome of a tool-augmented chat completion: either plain text or a
/// proposed tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatReply {
    /// The model answered (or declined) in free text
    Text(String),
    /// The model selected a tool with concrete arguments
    ToolCall(ToolInvocation),
}

/// A schema envelope for strictly constrained structured generation.
///
/// `strict` marks the schema as exactly enforced: no extra fields, all
/// listed fields required, so the response is guaranteed parseable against
/// the target shape without ad-hoc text repair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaSpec {
    /// Schema name announced to the provider
    pub name: String,
    /// The JSON schema itself
    pub schema: Value,
    /// Whether the provider must enforce the schema exactly
    pub strict: bool,
}

impl SchemaSpec {
    /// A strictly enforced schema.
    pub fn strict(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            schema,
            strict: true,
        }
    }
}
