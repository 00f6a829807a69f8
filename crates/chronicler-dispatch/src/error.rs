//! Error types for tool dispatch

use thiserror::Error;

/// Failures while interpreting a model-proposed tool invocation.
///
/// Both variants are selection-stage failures: the model named a function we
/// never declared, or supplied arguments that do not fit the declared
/// schema. They surface as a failed outcome for that query only.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The model selected a function name outside the declared set
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The argument object did not match the tool's parameter schema
    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
}
