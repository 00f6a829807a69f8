//! Chronicler Extractor
//!
//! Converts normalized article text to structured topic records using a
//! schema-constrained LLM call.
//!
//! # Overview
//!
//! The extractor is the primary ingestion pathway: it asks the provider for
//! a response that must conform to the [`TopicRecord`] schema, validates the
//! result, and assembles a [`RecordCollection`] across a batch of articles.
//! Repeated content is served from an in-process fingerprint cache, and
//! outbound calls are spaced by a rate limiter.
//!
//! # Architecture
//!
//! ```text
//! Article text → fingerprint → cache? → RateLimiter → LLM → TopicRecord
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use chronicler_extractor::{TopicExtractor, ExtractorConfig};
//! use chronicler_llm::MockProvider;
//! use chronicler_domain::Article;
//!
//! # async fn example() {
//! let provider = MockProvider::new("{}");
//! let mut extractor = TopicExtractor::new(provider, ExtractorConfig::default());
//!
//! let articles = vec![Article::fetched(
//!     "https://en.wikipedia.org/wiki/Deep_learning",
//!     "Deep learning",
//!     "Deep learning is ...",
//! )];
//! let records = extractor.batch_extract(&articles).await;
//! println!("Extracted {} topics", records.len());
//! # }
//! ```
//!
//! [`TopicRecord`]: chronicler_domain::TopicRecord
//! [`RecordCollection`]: chronicler_domain::RecordCollection

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
mod rate_limit;

#[cfg(test)]
mod tests;

pub use cache::{fingerprint, ExtractionCache, Fingerprint};
pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::TopicExtractor;
pub use rate_limit::RateLimiter;
