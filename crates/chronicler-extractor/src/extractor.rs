//! Core extractor implementation

use crate::cache::{fingerprint, ExtractionCache};
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_record;
use crate::prompt::{extraction_user_prompt, EXTRACTION_SYSTEM_PROMPT};
use crate::rate_limit::RateLimiter;
use chronicler_domain::traits::ChatProvider;
use chronicler_domain::{Article, RecordCollection, SchemaSpec, TopicRecord};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Converts article text into validated topic records.
///
/// Each instance owns its own cache and rate limiter; no process-wide
/// singletons, so instances can be tested in isolation.
pub struct TopicExtractor<P>
where
    P: ChatProvider,
{
    provider: Arc<P>,
    cache: ExtractionCache,
    limiter: RateLimiter,
    config: ExtractorConfig,
    schema: SchemaSpec,
}

impl<P> TopicExtractor<P>
where
    P: ChatProvider + Send + Sync + 'static,
    P::Error: std::fmt::Display,
{
    /// Create a new extractor.
    pub fn new(provider: P, config: ExtractorConfig) -> Self {
        let limiter = RateLimiter::new(config.requests_per_minute);
        Self {
            provider: Arc::new(provider),
            cache: ExtractionCache::new(),
            limiter,
            config,
            schema: TopicRecord::schema_spec(),
        }
    }

    /// Number of records currently held by the cache.
    pub fn cached_records(&self) -> usize {
        self.cache.len()
    }

    /// Extract a single record from raw article text.
    ///
    /// Issues one schema-constrained provider call under the configured
    /// timeout and validates the result. Does not consult the cache or the
    /// rate limiter; that is [`TopicExtractor::batch_extract`]'s job.
    pub async fn extract(&self, raw_text: &str) -> Result<TopicRecord, ExtractorError> {
        debug!("Starting extraction, text length {}", raw_text.len());

        let user = extraction_user_prompt(raw_text);
        let response = timeout(
            self.config.request_timeout(),
            self.provider
                .generate_structured(EXTRACTION_SYSTEM_PROMPT, &user, &self.schema),
        )
        .await
        .map_err(|_| ExtractorError::Timeout)?
        .map_err(|e| ExtractorError::Provider(e.to_string()))?;

        debug!("LLM response length: {} chars", response.len());

        parse_record(&response)
    }

    /// Extract records from a batch of articles.
    ///
    /// Per article: unusable input (failed fetch, empty content) is skipped;
    /// a cache hit reuses the prior record and bypasses both the rate
    /// limiter and the provider; otherwise the limiter is awaited and the
    /// provider called. A failed extraction drops that article with a
    /// warning and the batch continues; one bad document never aborts the
    /// run. Results are keyed by each record's own `topic_id`, which may
    /// differ from the article title; a duplicate topic keeps the newest
    /// record.
    pub async fn batch_extract(&mut self, articles: &[Article]) -> RecordCollection {
        let mut collection = RecordCollection::new();

        for article in articles {
            if !article.is_extractable() {
                debug!("Skipping non-extractable article '{}' ({})", article.title, article.url);
                continue;
            }

            let key = fingerprint(&article.content, self.config.fingerprint_prefix_chars);
            if let Some(record) = self.cache.lookup(&key) {
                info!("Cache hit for '{}'", article.title);
                let record = record.clone();
                if let Some(displaced) = collection.insert(record) {
                    warn!("Duplicate topic '{}'; keeping the newest record", displaced.topic_id);
                }
                continue;
            }

            self.limiter.wait_if_needed().await;

            match self.extract(&article.content).await {
                Ok(record) => {
                    info!("Extracted topic '{}' from '{}'", record.topic_id, article.title);
                    self.cache.store(key, record.clone());
                    if let Some(displaced) = collection.insert(record) {
                        warn!("Duplicate topic '{}'; keeping the newest record", displaced.topic_id);
                    }
                }
                Err(e) => {
                    warn!("Extraction failed for '{}': {}", article.title, e);
                }
            }
        }

        info!(
            "Batch complete: {} of {} articles produced records",
            collection.len(),
            articles.len()
        );

        collection
    }
}
