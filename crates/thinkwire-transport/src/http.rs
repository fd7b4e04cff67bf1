//! HTTP transport adapter for the think service
//!
//! Issues one POST per prompt with body `{"prompt": "<text>"}` and returns
//! the decoded JSON reply. Non-2xx statuses and connection-level failures
//! are both surfaced as [`TransportError`]; a successful reply is returned
//! unchanged, with no schema enforcement.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thinkwire_core::Prompt;
use tracing::{debug, warn};

use crate::error::{Result, TransportError};

/// HTTP adapter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Think service endpoint (e.g. "http://localhost:3001/think")
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_endpoint() -> String {
    thinkwire_core::DEFAULT_THINK_ENDPOINT.to_string()
}

fn default_timeout() -> u32 {
    10
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Request body for the think endpoint
#[derive(Debug, Serialize)]
struct ThinkRequest<'a> {
    prompt: &'a str,
}

/// HTTP client for the think service
pub struct HttpThinkClient {
    config: HttpConfig,
    client: reqwest::Client,
}

impl HttpThinkClient {
    /// Create a client owning its connection pool.
    ///
    /// The endpoint URL is validated here, so `think` only ever fails for
    /// transport reasons.
    pub fn new(config: HttpConfig) -> Result<Self> {
        reqwest::Url::parse(&config.endpoint)
            .map_err(|e| TransportError::InvalidEndpoint(format!("{}: {}", config.endpoint, e)))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Endpoint this client posts to
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Send one prompt and return the service reply as JSON.
    ///
    /// Exactly one outbound request, no retries. A non-2xx status is an
    /// error and the failed response body is never parsed.
    pub async fn think(&self, prompt: &Prompt) -> Result<serde_json::Value> {
        debug!(
            "POST {} ({} chars)",
            self.config.endpoint,
            prompt.as_str().len()
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&ThinkRequest {
                prompt: prompt.as_str(),
            })
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("think request to {} returned {}", self.config.endpoint, status);
            return Err(TransportError::Status {
                code: status.as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| TransportError::MalformedResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpConfig::default();
        assert_eq!(config.endpoint, "http://localhost:3001/think");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let config = HttpConfig {
            endpoint: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            HttpThinkClient::new(config),
            Err(TransportError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(ThinkRequest { prompt: "hello" }).unwrap();
        assert_eq!(body, serde_json::json!({ "prompt": "hello" }));
    }
}
