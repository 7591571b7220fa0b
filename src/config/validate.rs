//! Configuration validation.

use crate::config::{Config, KnowledgeConfig};
use crate::constants::MAX_INTRA_THREADS;
use crate::error::{Error, Result};
use reqwest::Url;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_model(config)?;
    validate_knowledge(&config.knowledge)?;
    Ok(())
}

/// Validate model settings.
fn validate_model(config: &Config) -> Result<()> {
    if config.model.intra_threads > MAX_INTRA_THREADS {
        return Err(Error::ConfigValidation {
            message: format!(
                "model.intra_threads must be at most {MAX_INTRA_THREADS}, got {}",
                config.model.intra_threads
            ),
        });
    }

    // Existence of the model file is checked at load time so a stale path
    // surfaces as a model load error, not a config error.
    Ok(())
}

/// Validate knowledge endpoints and timeouts.
fn validate_knowledge(knowledge: &KnowledgeConfig) -> Result<()> {
    validate_endpoint("knowledge.summary_url", &knowledge.summary_url)?;
    validate_endpoint("knowledge.entity_url", &knowledge.entity_url)?;

    if knowledge.connect_timeout_secs == 0 {
        return Err(Error::ConfigValidation {
            message: "knowledge.connect_timeout_secs must be at least 1".to_string(),
        });
    }

    if knowledge.request_timeout_secs == 0 {
        return Err(Error::ConfigValidation {
            message: "knowledge.request_timeout_secs must be at least 1".to_string(),
        });
    }

    Ok(())
}

fn validate_endpoint(key: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|e| Error::ConfigValidation {
        message: format!("{key} is not a valid URL ({e}): {value}"),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::ConfigValidation {
            message: format!("{key} must use http or https, got {}", url.scheme()),
        });
    }

    if url.cannot_be_a_base() {
        return Err(Error::ConfigValidation {
            message: format!("{key} cannot be used as a base URL: {value}"),
        });
    }

    Ok(())
}
