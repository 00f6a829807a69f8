//! OpenAI-compatible Provider Implementation
//!
//! Integration with the chat-completions API used for both schema-constrained
//! structured generation and tool-augmented completion.
//!
//! # Features
//!
//! - Async HTTP communication via reqwest
//! - Configurable endpoint and model (works against any compatible server)
//! - Retry logic with exponential backoff
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use chronicler_llm::OpenAiProvider;
//!
//! let provider = OpenAiProvider::new("sk-...", "gpt-4o-mini");
//! ```

use crate::LlmError;
use async_trait::async_trait;
use chronicler_domain::traits::ChatProvider;
use chronicler_domain::{ChatMessage, ChatReply, Role, SchemaSpec, ToolDefinition, ToolInvocation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default model for structured extraction and dispatch
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default timeout for a single request (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Environment variable consulted by [`OpenAiProvider::from_env`]
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Chat-completions API provider.
pub struct OpenAiProvider {
    endpoint: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
}

#[derive(Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

impl From<&ChatMessage> for WireMessage {
    fn from(message: &ChatMessage) -> Self {
        let role = match message.role {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        Self {
            role,
            content: message.content.clone(),
        }
    }
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
    json_schema: WireJsonSchema,
}

#[derive(Serialize)]
struct WireJsonSchema {
    name: String,
    schema: Value,
    strict: bool,
}

#[derive(Serialize)]
struct WireTool {
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunction,
}

#[derive(Serialize)]
struct WireFunction {
    name: String,
    description: String,
    parameters: Value,
}

impl From<&ToolDefinition> for WireTool {
    fn from(tool: &ToolDefinition) -> Self {
        Self {
            kind: "function",
            function: WireFunction {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool.parameters.clone(),
            },
        }
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<WireChoice>,
}

#[derive(Deserialize)]
struct WireChoice {
    message: WireResponseMessage,
}

#[derive(Deserialize)]
struct WireResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Deserialize)]
struct WireToolCall {
    function: WireCalledFunction,
}

#[derive(Deserialize)]
struct WireCalledFunction {
    name: String,
    // The API returns arguments as a JSON-encoded string
    arguments: String,
}

impl OpenAiProvider {
    /// Create a new provider.
    ///
    /// # Parameters
    ///
    /// - `api_key`: bearer token for the API
    /// - `model`: model to use (e.g. "gpt-4o-mini")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            model: model.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create a provider reading the API key from `OPENAI_API_KEY`.
    pub fn from_env(model: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| LlmError::Other(format!("{} is not set", API_KEY_ENV)))?;
        Ok(Self::new(api_key, model))
    }

    /// Override the API endpoint (for compatible self-hosted servers).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the maximum number of retry attempts.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body(
        &self,
        messages: Vec<WireMessage>,
        schema: Option<&SchemaSpec>,
        tools: Option<&[ToolDefinition]>,
    ) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            response_format: schema.map(|s| ResponseFormat {
                kind: "json_schema",
                json_schema: WireJsonSchema {
                    name: s.name.clone(),
                    schema: s.schema.clone(),
                    strict: s.strict,
                },
            }),
            tools: tools.map(|ts| ts.iter().map(WireTool::from).collect()),
            tool_choice: tools.map(|_| "auto"),
        }
    }

    /// Issue the request with retry and exponential backoff.
    async fn send(&self, body: &ChatCompletionRequest) -> Result<ChatCompletionResponse, LlmError> {
        let url = format!("{}/chat/completions", self.endpoint);

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(body)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response.json::<ChatCompletionResponse>().await.map_err(|e| {
                            LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
                        });
                    } else if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(LlmError::ModelNotAvailable(self.model.clone()));
                    } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(LlmError::RateLimitExceeded);
                    } else {
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(LlmError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, ...
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }

    fn first_message(response: ChatCompletionResponse) -> Result<WireResponseMessage, LlmError> {
        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| LlmError::InvalidResponse("Response contained no choices".to_string()))
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    type Error = LlmError;

    async fn generate_structured(
        &self,
        system: &str,
        user: &str,
        schema: &SchemaSpec,
    ) -> Result<String, Self::Error> {
        let messages = vec![
            WireMessage {
                role: "system",
                content: system.to_string(),
            },
            WireMessage {
                role: "user",
                content: user.to_string(),
            },
        ];
        let body = self.request_body(messages, Some(schema), None);
        let response = self.send(&body).await?;

        Self::first_message(response)?
            .content
            .ok_or_else(|| LlmError::InvalidResponse("Structured response had no content".to_string()))
    }

    async fn generate_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<ChatReply, Self::Error> {
        let wire_messages = messages.iter().map(WireMessage::from).collect();
        let body = self.request_body(wire_messages, None, Some(tools));
        let response = self.send(&body).await?;

        let message = Self::first_message(response)?;
        if let Some(call) = message.tool_calls.and_then(|calls| calls.into_iter().next()) {
            let arguments: Value = serde_json::from_str(&call.function.arguments).map_err(|e| {
                LlmError::InvalidResponse(format!("Tool arguments were not valid JSON: {}", e))
            })?;
            return Ok(ChatReply::ToolCall(ToolInvocation {
                name: call.function.name,
                arguments,
            }));
        }

        message
            .content
            .map(ChatReply::Text)
            .ok_or_else(|| LlmError::InvalidResponse("Response had neither content nor tool calls".to_string()))
    }

    async fn generate(&self, system: &str, user: &str) -> Result<String, Self::Error> {
        let messages = vec![
            WireMessage {
                role: "system",
                content: system.to_string(),
            },
            WireMessage {
                role: "user",
                content: user.to_string(),
            },
        ];
        let body = self.request_body(messages, None, None);
        let response = self.send(&body).await?;

        Self::first_message(response)?
            .content
            .ok_or_else(|| LlmError::InvalidResponse("Response had no content".to_string()))
    }
}
