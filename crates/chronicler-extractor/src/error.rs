//! Error types for the extractor

use thiserror::Error;

/// Errors that can occur during extraction
///
/// Each variant carries a human-readable cause; the batch layer treats every
/// variant as a per-document failure, never an abort.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// LLM provider error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Extraction timeout
    #[error("Extraction timeout")]
    Timeout,

    /// Response did not parse against the record schema
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Response parsed but failed record validation
    #[error("Rejected record: {0}")]
    RejectedRecord(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
