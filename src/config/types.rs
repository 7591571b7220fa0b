//! Configuration type definitions.

use crate::constants::knowledge::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_ENTITY_URL, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SUMMARY_URL,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Classification model settings.
    #[serde(default)]
    pub model: ModelSettings,

    /// Knowledge lookup settings.
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

/// Classification model settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Path to the ONNX model file.
    pub path: Option<PathBuf>,

    /// Intra-op thread count for ONNX Runtime (0 = runtime default).
    pub intra_threads: usize,
}

/// Knowledge lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// Summary-by-title endpoint.
    pub summary_url: String,

    /// Entity-by-id endpoint.
    pub entity_url: String,

    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Whole-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Custom User-Agent header.
    pub user_agent: Option<String>,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            summary_url: DEFAULT_SUMMARY_URL.to_string(),
            entity_url: DEFAULT_ENTITY_URL.to_string(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl KnowledgeConfig {
    /// Connect timeout as a [`Duration`].
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Request timeout as a [`Duration`].
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knowledge_defaults() {
        let knowledge = KnowledgeConfig::default();
        assert!(knowledge.summary_url.contains("wikipedia.org"));
        assert!(knowledge.entity_url.contains("wikidata.org"));
        assert_eq!(knowledge.request_timeout(), Duration::from_secs(15));
        assert!(knowledge.user_agent.is_none());
    }

    #[test]
    fn test_model_settings_default_has_no_path() {
        let config = Config::default();
        assert!(config.model.path.is_none());
        assert_eq!(config.model.intra_threads, 0);
    }
}
