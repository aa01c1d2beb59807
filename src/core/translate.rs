//! Text translation with split-on-413 fallback

use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::core::client::DeepLClient;
use crate::core::errors::{decode_error_response, Result, TranslationError};
use crate::core::languages::Language;
use crate::core::models::{TranslateResponse, TranslationRequest, TranslationResult};

const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?', '。', '！', '？'];

impl DeepLClient {
    /// Translate a piece of text.
    ///
    /// If the service answers 413 the text is split into sentences and sent
    /// again, once, as several `text` values in a single request.
    pub async fn translate_text(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        if request.text.is_empty() {
            return Err(TranslationError::EmptyText);
        }
        let target_lang = request
            .target_lang
            .ok_or(TranslationError::MissingTargetLanguage)?;

        let texts = [request.text.as_str()];
        let response = self
            .post("translate")
            .query(&translate_params(request, target_lang, &texts))
            .send()
            .await?;

        if response.status() == StatusCode::PAYLOAD_TOO_LARGE {
            let sentences = split_into_sentences(&request.text);
            warn!(
                "Payload too large ({} chars), retrying as {} sentences",
                request.text.chars().count(),
                sentences.len()
            );

            let retry = self
                .post("translate")
                .query(&translate_params(request, target_lang, &sentences));
            let response = self.send(retry).await?;
            return read_translation(response).await;
        }

        if !response.status().is_success() {
            return Err(decode_error_response(response).await);
        }

        read_translation(response).await
    }

    /// Shorthand for [`DeepLClient::translate_text`] with default options
    pub async fn translate(&self, text: &str, target_lang: Language) -> Result<String> {
        let request = TranslationRequest::new(text, target_lang);
        Ok(self.translate_text(&request).await?.translation)
    }
}

fn translate_params(
    request: &TranslationRequest,
    target_lang: Language,
    texts: &[&str],
) -> Vec<(&'static str, String)> {
    let mut params: Vec<(&'static str, String)> =
        texts.iter().map(|t| ("text", t.to_string())).collect();

    params.push(("target_lang", target_lang.code().to_string()));

    if let Some(source_lang) = request.source_lang {
        params.push(("source_lang", source_lang.code().to_string()));
    }
    if let Some(split) = request.split_sentences {
        params.push(("split_sentences", split.as_param().to_string()));
    }
    if request.preserve_formatting {
        params.push(("preserve_formatting", "1".to_string()));
    }

    params
}

async fn read_translation(response: reqwest::Response) -> Result<TranslationResult> {
    let body = response.bytes().await?;
    let decoded: TranslateResponse = serde_json::from_slice(&body)?;

    debug!("Received {} translated segments", decoded.translations.len());

    let detected_source_lang = decoded
        .translations
        .first()
        .and_then(|s| s.detected_source_language.clone());

    let translation = decoded
        .translations
        .into_iter()
        .map(|s| s.text)
        .collect::<String>();

    Ok(TranslationResult {
        translation,
        detected_source_lang,
    })
}

/// Split text after runs of sentence terminators, keeping each terminator
/// with its sentence. Whitespace-only pieces are dropped.
pub fn split_into_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !SENTENCE_TERMINATORS.contains(&c) {
            continue;
        }
        let next_is_terminator = chars
            .peek()
            .map(|(_, n)| SENTENCE_TERMINATORS.contains(n))
            .unwrap_or(false);
        if !next_is_terminator {
            let end = i + c.len_utf8();
            sentences.push(&text[start..end]);
            start = end;
        }
    }
    sentences.push(&text[start..]);

    sentences.retain(|s| !s.trim().is_empty());
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{ClientConfig, Tier};
    use crate::core::models::SplitSentences;
    use wiremock::{
        matchers::{header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn client_for(server: &MockServer) -> DeepLClient {
        DeepLClient::new(ClientConfig::new("test-key", Tier::Free).with_base_url(server.uri()))
            .unwrap()
    }

    #[test]
    fn test_split_keeps_terminators() {
        assert_eq!(
            split_into_sentences("Hello. How are you?! Fine"),
            vec!["Hello.", " How are you?!", " Fine"]
        );
        assert_eq!(split_into_sentences("你好。再见！"), vec!["你好。", "再见！"]);
        assert_eq!(split_into_sentences("One.  "), vec!["One."]);
    }

    #[test]
    fn test_params_include_options() {
        let request = TranslationRequest::new("hi", Language::German)
            .with_source_lang(Language::English)
            .with_split_sentences(SplitSentences::NoNewlines)
            .with_preserve_formatting(true);
        let params = translate_params(&request, Language::German, &["a", "b"]);

        assert_eq!(params[0], ("text", "a".to_string()));
        assert_eq!(params[1], ("text", "b".to_string()));
        assert!(params.contains(&("target_lang", "DE".to_string())));
        assert!(params.contains(&("source_lang", "EN".to_string())));
        assert!(params.contains(&("split_sentences", "nonewlines".to_string())));
        assert!(params.contains(&("preserve_formatting", "1".to_string())));
    }

    #[tokio::test]
    async fn test_empty_text_rejected_locally() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client
            .translate_text(&TranslationRequest::new("", Language::French))
            .await
            .unwrap_err();
        assert!(matches!(err, TranslationError::EmptyText));

        let request = TranslationRequest {
            text: "Hello".to_string(),
            ..Default::default()
        };
        let err = client.translate_text(&request).await.unwrap_err();
        assert!(matches!(err, TranslationError::MissingTargetLanguage));
    }

    #[tokio::test]
    async fn test_whitespace_text_is_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .and(query_param("text", "  "))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "translations": [{"text": "  "}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let translation = client_for(&mock_server)
            .translate("  ", Language::French)
            .await
            .expect("Should succeed");
        assert_eq!(translation, "  ");
    }

    #[tokio::test]
    async fn test_translate_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .and(header("Authorization", "DeepL-Auth-Key test-key"))
            .and(query_param("text", "Hello, world!"))
            .and(query_param("target_lang", "DE"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "translations": [
                    {"detected_source_language": "EN", "text": "Hallo, Welt!"}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server)
            .translate_text(&TranslationRequest::new("Hello, world!", Language::German))
            .await
            .expect("Should succeed");

        assert_eq!(result.translation, "Hallo, Welt!");
        assert_eq!(result.detected_source_lang.as_deref(), Some("EN"));
    }

    #[tokio::test]
    async fn test_remote_error_is_decoded() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "message": "Value for 'target_lang' not supported.",
                "detail": "XX"
            })))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server)
            .translate("Hello", Language::German)
            .await
            .unwrap_err();

        assert!(matches!(err, TranslationError::ApiError { status: 400, .. }));
        assert!(err.to_string().contains("not supported"));
    }

    #[tokio::test]
    async fn test_second_413_is_not_retried_again() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(413).set_body_json(serde_json::json!({
                "message": "Request Entity Too Large"
            })))
            .expect(2)
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server)
            .translate("One. Two.", Language::Italian)
            .await
            .unwrap_err();

        assert!(matches!(err, TranslationError::ApiError { status: 413, .. }));
    }
}
