//! Chronicler Dispatch
//!
//! Answers natural-language queries over a [`RecordCollection`] by letting
//! the LLM select one of a small set of local functions, executing it, and
//! grounding a final answer in the function's output.
//!
//! # State machine per query
//!
//! ```text
//! query → Selection (LLM + tool schemas) → Dispatch (local) → Grounding (LLM)
//!           │ plain text                      │ unknown topic
//!           ▼                                 ▼
//!        Declined                          NotFound
//! ```
//!
//! Tool schemas constrain topic arguments to the currently known topic ids,
//! but the model's argument values are advisory: they are re-validated
//! locally before anything executes. Every query resolves to a
//! [`DispatchOutcome`]; provider failures are captured, never propagated, so
//! one query's error cannot affect the next.
//!
//! [`RecordCollection`]: chronicler_domain::RecordCollection

#![warn(missing_docs)]

mod dispatcher;
mod error;
mod schema;
mod tools;

pub use dispatcher::{Dispatcher, DispatchOutcome, NO_MATCHING_TOOL};
pub use error::DispatchError;
pub use schema::{tool_definitions, COMPARE_TOOL, TRACE_TOOL};
pub use tools::{compare_brief, trace_brief, ToolCall};
