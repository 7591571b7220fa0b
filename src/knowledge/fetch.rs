//! JSON-over-HTTP fetching.

use crate::config::KnowledgeConfig;
use crate::constants::APP_NAME;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::debug;

/// Failure of a single knowledge request.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// Connection or protocol failure.
    #[error("request failed")]
    Transport(#[source] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("server returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// Body was not valid JSON.
    #[error("response is not valid JSON")]
    Decode(#[source] serde_json::Error),

    /// JSON was valid but not shaped as expected.
    #[error("unexpected response: {0}")]
    Shape(String),

    /// URL could not be built from the configured base.
    #[error("cannot build request URL from '{0}'")]
    Url(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(e)
        }
    }
}

/// Fetches a JSON document by URL.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    /// GET `url` and decode the body as JSON.
    async fn get_json(&self, url: &Url) -> std::result::Result<Value, FetchError>;
}

/// [`JsonFetcher`] backed by a `reqwest` client with bounded timeouts.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client from knowledge settings.
    pub fn new(config: &KnowledgeConfig) -> Result<Self> {
        let user_agent = config.user_agent.clone().unwrap_or_else(|| {
            format!("{APP_NAME}/{}", env!("CARGO_PKG_VERSION"))
        });

        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::HttpClient {
                reason: e.to_string(),
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn get_json(&self, url: &Url) -> std::result::Result<Value, FetchError> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(FetchError::Decode)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn test_http_fetcher_builds_from_defaults() {
        assert!(HttpFetcher::new(&KnowledgeConfig::default()).is_ok());
    }

    #[test]
    fn test_fetch_error_messages() {
        assert_eq!(
            FetchError::Status { status: 404 }.to_string(),
            "server returned HTTP 404"
        );
        assert_eq!(FetchError::Timeout.to_string(), "request timed out");
    }

    #[tokio::test]
    async fn test_unanswered_request_maps_to_timeout() {
        // Connections land in the backlog and are never answered
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let url = Url::parse(&format!("http://{addr}/summary/ivy_tree")).unwrap();

        let config = KnowledgeConfig {
            request_timeout_secs: 1,
            ..KnowledgeConfig::default()
        };
        let fetcher = HttpFetcher::new(&config).unwrap();

        let result = fetcher.get_json(&url).await;
        assert!(matches!(result, Err(FetchError::Timeout)), "got {result:?}");
    }
}
