//! Trait definitions for external interactions
//!
//! These traits define the boundary between the pipeline and infrastructure.
//! Implementations live in other crates (chronicler-llm).

use async_trait::async_trait;

use crate::chat::{ChatMessage, ChatReply, SchemaSpec, ToolDefinition};

/// Trait for LLM provider operations
///
/// Two capabilities are consumed by the core: schema-constrained structured
/// generation (extraction) and tool-augmented chat completion (dispatch),
/// plus a plain completion used by the grounding step.
///
/// Implemented by the infrastructure layer (chronicler-llm).
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Error type for provider operations
    type Error;

    /// Generate a response constrained to the given schema.
    ///
    /// The returned string is expected to parse as the schema's target
    /// shape; callers still validate it.
    async fn generate_structured(
        &self,
        system: &str,
        user: &str,
        schema: &SchemaSpec,
    ) -> Result<String, Self::Error>;

    /// Generate a completion with a set of declared tools the model may
    /// select among.
    async fn generate_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<ChatReply, Self::Error>;

    /// Generate a plain text completion.
    async fn generate(&self, system: &str, user: &str) -> Result<String, Self::Error>;
}
