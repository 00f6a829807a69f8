//! Chronicler Fetcher
//!
//! Thin input collaborator: downloads reference articles over HTTP and
//! normalizes their markup into plain text the extractor can work with.
//!
//! Failure never propagates as an error: a failed fetch produces an
//! [`Article`] with `success: false` and the error description in `content`,
//! which the batch extractor skips. See `chronicler_domain::Article` for the
//! contract.

#![warn(missing_docs)]

pub mod clean;

use chronicler_domain::Article;
use std::time::Duration;
use tracing::{info, warn};

/// Default timeout for a single page fetch (seconds)
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

/// Sequential article fetcher.
pub struct ArticleFetcher {
    client: reqwest::Client,
}

impl ArticleFetcher {
    /// Create a fetcher with the default timeout.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_FETCH_TIMEOUT_SECS)
    }

    /// Create a fetcher with a specific per-request timeout.
    pub fn with_timeout(timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Fetch a single article.
    ///
    /// Never returns an error: network and HTTP failures are encoded in the
    /// returned [`Article`].
    pub async fn fetch(&self, url: &str) -> Article {
        info!("Fetching {}", url);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Fetch failed for {}: {}", url, e);
                return Article::failed(url, e.to_string());
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Fetch failed for {}: HTTP {}", url, status);
            return Article::failed(url, format!("HTTP {}", status));
        }

        let html = match response.text().await {
            Ok(html) => html,
            Err(e) => {
                warn!("Failed to read body for {}: {}", url, e);
                return Article::failed(url, e.to_string());
            }
        };

        let title = clean::title_of(&html).unwrap_or_else(|| "Unknown".to_string());
        let content = clean::article_text(&html);

        Article::fetched(url, title, content)
    }

    /// Fetch all URLs sequentially, preserving order.
    pub async fn fetch_all(&self, urls: &[String]) -> Vec<Article> {
        let mut articles = Vec::with_capacity(urls.len());
        for url in urls {
            articles.push(self.fetch(url).await);
        }
        let succeeded = articles.iter().filter(|a| a.success).count();
        info!("Fetched {}/{} articles", succeeded, urls.len());
        articles
    }
}

impl Default for ArticleFetcher {
    fn default() -> Self {
        Self::new()
    }
}
