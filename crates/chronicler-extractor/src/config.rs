//! Configuration for the extractor

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Maximum outbound extraction calls per minute
    pub requests_per_minute: u32,

    /// Number of leading characters of content hashed into the cache
    /// fingerprint
    pub fingerprint_prefix_chars: usize,

    /// Maximum time for a single extraction call (seconds)
    pub request_timeout_secs: u64,
}

impl ExtractorConfig {
    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.requests_per_minute == 0 {
            return Err("requests_per_minute must be greater than 0".to_string());
        }
        if self.fingerprint_prefix_chars == 0 {
            return Err("fingerprint_prefix_chars must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: 60,
            fingerprint_prefix_chars: 100,
            request_timeout_secs: 120,
        }
    }
}
