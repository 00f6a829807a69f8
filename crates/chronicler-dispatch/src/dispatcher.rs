//! Per-query dispatch state machine

use crate::schema::tool_definitions;
use crate::tools::{compare_brief, trace_brief, ToolCall};
use chronicler_domain::traits::ChatProvider;
use chronicler_domain::{ChatMessage, ChatReply, RecordCollection};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Fixed reply when the model selects no tool for a query.
pub const NO_MATCHING_TOOL: &str = "No function supports this query.";

/// Terminal state of one dispatched query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A grounded answer was produced
    Answered(String),
    /// The model selected no tool
    Declined,
    /// The selected tool referenced a topic absent from the collection
    NotFound {
        /// The unknown topic id
        topic: String,
    },
    /// A provider failure at either LLM step, or an uninterpretable
    /// selection. Captured and reported, never propagated
    Failed(String),
}

impl DispatchOutcome {
    /// Whether a grounded answer was produced.
    pub fn is_answered(&self) -> bool {
        matches!(self, DispatchOutcome::Answered(_))
    }

    /// Render the outcome as user-facing text.
    ///
    /// Non-answered outcomes map to fixed explanatory messages, never a
    /// fabricated answer.
    pub fn message(&self) -> String {
        match self {
            DispatchOutcome::Answered(answer) => answer.clone(),
            DispatchOutcome::Declined => NO_MATCHING_TOOL.to_string(),
            DispatchOutcome::NotFound { topic } => {
                format!("No extracted data is available for '{}'.", topic)
            }
            DispatchOutcome::Failed(reason) => format!("Error processing query: {}", reason),
        }
    }
}

/// Answers queries over a fully-populated record collection.
///
/// The collection is read-only after construction; each query runs the
/// selection → dispatch → grounding machine independently.
pub struct Dispatcher<P>
where
    P: ChatProvider,
{
    provider: Arc<P>,
    records: RecordCollection,
}

impl<P> Dispatcher<P>
where
    P: ChatProvider + Send + Sync + 'static,
    P::Error: std::fmt::Display,
{
    /// Create a dispatcher over an extracted collection.
    pub fn new(provider: P, records: RecordCollection) -> Self {
        Self {
            provider: Arc::new(provider),
            records,
        }
    }

    /// The collection being answered over.
    pub fn records(&self) -> &RecordCollection {
        &self.records
    }

    /// Answer one natural-language query.
    pub async fn answer(&self, query: &str) -> DispatchOutcome {
        if self.records.is_empty() {
            debug!("No records extracted; declining '{}'", query);
            return DispatchOutcome::Declined;
        }

        let topics = self.records.topic_ids();
        let tools = tool_definitions(&topics);
        let messages = [
            ChatMessage::system(selection_system_prompt(&topics)),
            ChatMessage::user(query),
        ];

        // Selection: the model picks zero or one tool
        let reply = match self.provider.generate_with_tools(&messages, &tools).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Tool selection failed for '{}': {}", query, e);
                return DispatchOutcome::Failed(format!("tool selection failed: {}", e));
            }
        };

        let invocation = match reply {
            ChatReply::Text(_) => {
                info!("No tool selected for '{}'", query);
                return DispatchOutcome::Declined;
            }
            ChatReply::ToolCall(invocation) => invocation,
        };

        let call = match ToolCall::from_invocation(&invocation) {
            Ok(call) => call,
            Err(e) => {
                warn!("Uninterpretable selection for '{}': {}", query, e);
                return DispatchOutcome::Failed(e.to_string());
            }
        };

        // The enum constraint is advisory from the model's side; re-validate
        // every referenced topic before executing anything
        if let Some(unknown) = call
            .topics()
            .into_iter()
            .find(|topic| !self.records.contains(topic))
        {
            info!("Selected tool referenced unknown topic '{}'", unknown);
            return DispatchOutcome::NotFound {
                topic: unknown.to_string(),
            };
        }

        info!("Dispatching {} for '{}'", call.name(), query);

        let brief = match &call {
            ToolCall::Compare { first, second } => compare_brief(&self.records, first, second),
            ToolCall::Trace { topic } => trace_brief(&self.records, topic),
        };
        let Some(brief) = brief else {
            let topic = call.topics().first().map(|t| t.to_string()).unwrap_or_default();
            return DispatchOutcome::NotFound { topic };
        };

        // Grounding: the brief becomes context for the final answer
        match self
            .provider
            .generate(&grounding_system_prompt(&brief), query)
            .await
        {
            Ok(answer) => DispatchOutcome::Answered(answer),
            Err(e) => {
                warn!("Grounding failed for '{}': {}", query, e);
                DispatchOutcome::Failed(format!("grounding failed: {}", e))
            }
        }
    }

    /// Answer a batch of queries, each processed independently.
    ///
    /// One query's failure never affects the next; outcomes come back in
    /// query order.
    pub async fn answer_all(&self, queries: &[String]) -> Vec<DispatchOutcome> {
        let mut outcomes = Vec::with_capacity(queries.len());
        for query in queries {
            outcomes.push(self.answer(query).await);
        }
        outcomes
    }
}

fn selection_system_prompt(topics: &[String]) -> String {
    format!(
        "You are a research assistant with access to detailed extracted records \
for these topics: {}.\nUse the relevant function to answer questions about \
comparisons or evolution.",
        topics.join(", ")
    )
}

fn grounding_system_prompt(brief: &str) -> String {
    format!("Use this context to answer the user query: {}", brief)
}
