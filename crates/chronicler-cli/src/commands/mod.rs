//! Command implementations.

pub mod ask;
pub mod harvest;
pub mod topics;

pub use self::ask::execute_ask;
pub use self::harvest::execute_harvest;
pub use self::topics::execute_topics;

use crate::config::Config;
use crate::error::Result;
use chronicler_domain::RecordCollection;
use chronicler_llm::OpenAiProvider;
use std::fs;
use std::path::Path;

/// Build the provider from config plus an optional per-run model override.
pub(crate) fn build_provider(config: &Config, model_override: Option<String>) -> Result<OpenAiProvider> {
    let api_key = config.resolve_api_key()?;
    let model = model_override.unwrap_or_else(|| config.model.clone());
    Ok(OpenAiProvider::new(api_key, model).with_endpoint(config.endpoint.clone()))
}

/// Load a records file written by the harvest command.
pub(crate) fn load_records(path: &Path) -> Result<RecordCollection> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
