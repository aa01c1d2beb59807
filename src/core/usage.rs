//! Account usage queries

use tracing::debug;

use crate::core::client::DeepLClient;
use crate::core::errors::Result;
use crate::core::models::Usage;

impl DeepLClient {
    /// Characters translated and allowed in the current billing period
    pub async fn usage(&self) -> Result<Usage> {
        let response = self.send(self.post("usage")).await?;
        let body = response.bytes().await?;
        let usage: Usage = serde_json::from_slice(&body)?;

        debug!(
            "Usage: {}/{} characters",
            usage.character_count, usage.character_limit
        );

        Ok(usage)
    }

    pub async fn character_count(&self) -> Result<u64> {
        Ok(self.usage().await?.character_count)
    }

    pub async fn character_limit(&self) -> Result<u64> {
        Ok(self.usage().await?.character_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{ClientConfig, Tier};
    use crate::core::errors::TranslationError;
    use wiremock::{
        matchers::{header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn client_for(server: &MockServer) -> DeepLClient {
        DeepLClient::new(ClientConfig::new("test-key", Tier::Free).with_base_url(server.uri()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_usage_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/usage"))
            .and(header("Authorization", "DeepL-Auth-Key test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "character_count": 180118,
                "character_limit": 1250000
            })))
            .expect(3)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let usage = client.usage().await.expect("Should succeed");
        assert_eq!(usage.character_count, 180118);
        assert_eq!(usage.character_limit, 1250000);

        assert_eq!(client.character_count().await.unwrap(), 180118);
        assert_eq!(client.character_limit().await.unwrap(), 1250000);
    }

    #[tokio::test]
    async fn test_usage_remote_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/usage"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "message": "Authorization failure"
            })))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).usage().await.unwrap_err();
        assert!(matches!(err, TranslationError::ApiError { status: 403, .. }));
    }

    #[tokio::test]
    async fn test_usage_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/usage"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).usage().await.unwrap_err();
        assert!(matches!(err, TranslationError::JsonError(_)));
    }
}
