//! Integration tests for text translation and usage queries

use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use deepl_client::{
    language_code, ClientConfig, DeepLClient, Language, SplitSentences, TranslationError,
    TranslationRequest, Tier,
};

fn create_client(server: &MockServer) -> DeepLClient {
    DeepLClient::new(ClientConfig::new("test-key", Tier::Pro).with_base_url(server.uri()))
        .expect("Failed to build client")
}

#[tokio::test]
async fn test_payload_too_large_is_split_and_concatenated() {
    let server = MockServer::start().await;
    let text = "First sentence. Second one! Third?";

    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(query_param("text", text))
        .respond_with(ResponseTemplate::new(413).set_body_json(serde_json::json!({
            "message": "Request Entity Too Large"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(header("Authorization", "DeepL-Auth-Key test-key"))
        .and(query_param("text", "First sentence."))
        .and(query_param("text", " Second one!"))
        .and(query_param("text", " Third?"))
        .and(query_param("target_lang", "DE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "translations": [
                {"detected_source_language": "EN", "text": "Erster Satz."},
                {"detected_source_language": "EN", "text": " Zweiter!"},
                {"detected_source_language": "EN", "text": " Dritter?"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = create_client(&server)
        .translate_text(&TranslationRequest::new(text, Language::German))
        .await
        .expect("Should succeed");

    assert_eq!(result.translation, "Erster Satz. Zweiter! Dritter?");
    assert_eq!(result.detected_source_lang.as_deref(), Some("EN"));
}

#[tokio::test]
async fn test_request_options_are_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(query_param("source_lang", "EN"))
        .and(query_param("target_lang", "ZH"))
        .and(query_param("split_sentences", "0"))
        .and(query_param("preserve_formatting", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "translations": [{"text": "你好"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = TranslationRequest::new("Hello", Language::Chinese)
        .with_source_lang(Language::English)
        .with_split_sentences(SplitSentences::None)
        .with_preserve_formatting(true);

    let result = create_client(&server)
        .translate_text(&request)
        .await
        .expect("Should succeed");

    assert_eq!(result.translation, "你好");
    assert_eq!(result.detected_source_lang, None);
}

#[tokio::test]
async fn test_missing_target_language_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let request = TranslationRequest {
        text: "Hello".to_string(),
        ..Default::default()
    };
    let err = create_client(&server)
        .translate_text(&request)
        .await
        .unwrap_err();

    assert!(matches!(err, TranslationError::MissingTargetLanguage));
}

#[tokio::test]
async fn test_usage_against_pro_endpoint_override() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/usage"))
        .and(header("Authorization", "DeepL-Auth-Key test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "character_count": 500000,
            "character_limit": 500000
        })))
        .expect(1)
        .mount(&server)
        .await;

    let usage = create_client(&server).usage().await.expect("Should succeed");

    assert_eq!(usage.remaining(), 0);
    assert!(usage.is_exhausted());
}

#[test]
fn test_language_table_is_total() {
    for lang in Language::ALL {
        assert_eq!(language_code(lang as i32), lang.code());
        assert_eq!(Language::try_from(lang as i32), Ok(lang));
    }
    assert_eq!(language_code(0), "");
}
