//! Async DeepL client: endpoint selection and authenticated requests

use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::core::config::ClientConfig;
use crate::core::errors::{decode_error_response, Result, TranslationError};

/// Async client for the DeepL REST API.
///
/// Cloning is cheap; clones share the connection pool and configuration, so a
/// single client can run several independently cancellable workflows.
#[derive(Debug, Clone)]
pub struct DeepLClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl DeepLClient {
    /// Create a new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate().map_err(|e| TranslationError::ConfigError {
            message: e.to_string(),
        })?;

        let timeout = Duration::from_millis(config.timeout_ms);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .build()?;

        debug!("DeepL client for {}", config.endpoint());

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env().map_err(|e| TranslationError::ConfigError {
            message: e.to_string(),
        })?;
        Self::new(config)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.endpoint(), path.trim_start_matches('/'))
    }

    /// POST request with the auth header attached
    pub(crate) fn post(&self, path: &str) -> reqwest::RequestBuilder {
        let url = self.url(path);
        debug!("POST {}", url);
        self.http
            .post(url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.config.auth_key))
    }

    /// Send and hand back the response if its status is 2xx
    pub(crate) async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = request.send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(decode_error_response(response).await)
        }
    }
}
