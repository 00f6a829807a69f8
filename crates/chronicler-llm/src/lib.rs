//! Chronicler LLM Provider Layer
//!
//! Implementations of the `ChatProvider` trait from `chronicler-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: deterministic scripted mock for testing
//! - `OpenAiProvider`: OpenAI-compatible chat-completions API integration
//!
//! # Examples
//!
//! ```
//! use chronicler_llm::MockProvider;
//! use chronicler_domain::traits::ChatProvider;
//!
//! # async fn example() {
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("system", "test prompt").await.unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! # }
//! ```

#![warn(missing_docs)]

pub mod openai;

use async_trait::async_trait;
use chronicler_domain::traits::ChatProvider;
use chronicler_domain::{ChatMessage, ChatReply, SchemaSpec, ToolDefinition, ToolInvocation};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use openai::OpenAiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded at the provider
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// One scripted reply for the mock provider.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Plain text response
    Text(String),
    /// A proposed tool invocation
    ToolCall {
        /// Tool name the mock "selects"
        name: String,
        /// Argument object handed back with the call
        arguments: Value,
    },
    /// A provider-level failure
    Error(String),
}

/// Mock provider for deterministic testing
///
/// Replies are served from a scripted queue in push order; once the queue is
/// drained every call returns the default response as plain text. No network
/// calls are made. Clones share the same script and call log.
///
/// # Examples
///
/// ```
/// use chronicler_llm::MockProvider;
/// use chronicler_domain::traits::ChatProvider;
///
/// # async fn example() {
/// let provider = MockProvider::new("default");
/// provider.push_text("first");
///
/// assert_eq!(provider.generate("sys", "a").await.unwrap(), "first");
/// assert_eq!(provider.generate("sys", "b").await.unwrap(), "default");
/// assert_eq!(provider.call_count(), 2);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    script: Arc<Mutex<VecDeque<MockReply>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new mock with a default response for unscripted calls.
    pub fn new(default_response: impl Into<String>) -> Self {
        Self {
            default_response: default_response.into(),
            script: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a plain text reply.
    pub fn push_text(&self, text: impl Into<String>) {
        self.script
            .lock()
            .unwrap()
            .push_back(MockReply::Text(text.into()));
    }

    /// Queue a tool-call reply.
    pub fn push_tool_call(&self, name: impl Into<String>, arguments: Value) {
        self.script.lock().unwrap().push_back(MockReply::ToolCall {
            name: name.into(),
            arguments,
        });
    }

    /// Queue a provider error.
    pub fn push_error(&self, message: impl Into<String>) {
        self.script
            .lock()
            .unwrap()
            .push_back(MockReply::Error(message.into()));
    }

    /// Number of calls served so far (all three trait methods count).
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// The user-content prompts seen so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn record(&self, user_content: &str) {
        self.prompts.lock().unwrap().push(user_content.to_string());
    }

    fn next_reply(&self) -> Option<MockReply> {
        self.script.lock().unwrap().pop_front()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    type Error = LlmError;

    async fn generate_structured(
        &self,
        _system: &str,
        user: &str,
        _schema: &SchemaSpec,
    ) -> Result<String, Self::Error> {
        self.record(user);
        match self.next_reply() {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Error(message)) => Err(LlmError::Other(message)),
            Some(MockReply::ToolCall { name, .. }) => Err(LlmError::InvalidResponse(format!(
                "tool call '{}' scripted for a structured generation",
                name
            ))),
            None => Ok(self.default_response.clone()),
        }
    }

    async fn generate_with_tools(
        &self,
        messages: &[ChatMessage],
        _tools: &[ToolDefinition],
    ) -> Result<ChatReply, Self::Error> {
        let user_content = messages
            .last()
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        self.record(user_content);
        match self.next_reply() {
            Some(MockReply::Text(text)) => Ok(ChatReply::Text(text)),
            Some(MockReply::ToolCall { name, arguments }) => {
                Ok(ChatReply::ToolCall(ToolInvocation { name, arguments }))
            }
            Some(MockReply::Error(message)) => Err(LlmError::Other(message)),
            None => Ok(ChatReply::Text(self.default_response.clone())),
        }
    }

    async fn generate(&self, _system: &str, user: &str) -> Result<String, Self::Error> {
        self.record(user);
        match self.next_reply() {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Error(message)) => Err(LlmError::Other(message)),
            Some(MockReply::ToolCall { name, .. }) => Err(LlmError::InvalidResponse(format!(
                "tool call '{}' scripted for a plain generation",
                name
            ))),
            None => Ok(self.default_response.clone()),
        }
    }
}
