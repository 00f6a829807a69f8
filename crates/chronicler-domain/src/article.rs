//! The input-collaborator record handed to the extraction core

use serde::{Deserialize, Serialize};

/// One fetched source document.
///
/// Fetch failure is encoded in the value rather than raised: on failure
/// `success` is false, `title` falls back to "Unknown", and `content` may
/// hold an error description instead of article text. The batch extractor
/// treats an unsuccessful or empty-content article as non-extractable and
/// skips it without failing the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Source URL (unique identifier for the document)
    pub url: String,

    /// Document title, "Unknown" when it could not be determined
    pub title: String,

    /// Normalized article text, or an error description on failure
    pub content: String,

    /// Whether the fetch produced usable content
    pub success: bool,
}

impl Article {
    /// A successfully fetched article.
    pub fn fetched(url: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            content: content.into(),
            success: true,
        }
    }

    /// A failed fetch, carrying the error description in `content`.
    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: "Unknown".to_string(),
            content: error.into(),
            success: false,
        }
    }

    /// Whether this article carries text worth extracting from.
    pub fn is_extractable(&self) -> bool {
        self.success && !self.content.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetched_article_is_extractable() {
        let article = Article::fetched("https://example.org/a", "A", "Some body text");
        assert!(article.success);
        assert!(article.is_extractable());
    }

    #[test]
    fn test_failed_article_is_not_extractable() {
        let article = Article::failed("https://example.org/a", "connection refused");
        assert!(!article.success);
        assert_eq!(article.title, "Unknown");
        assert!(!article.is_extractable());
    }

    #[test]
    fn test_empty_content_is_not_extractable() {
        let article = Article::fetched("https://example.org/a", "A", "   \n");
        assert!(!article.is_extractable());
    }
}
