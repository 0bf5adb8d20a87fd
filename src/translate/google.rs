use super::{
    read_upstream_json, Provider, TranslateRequest, TranslateResponse, NO_TRANSLATION_FOUND,
};
use crate::config::Config;
use crate::error::ProxyError;
use serde_json::Value;

/// Query parameters for the unofficial `translate_a/single` endpoint
fn build_query(request: &TranslateRequest) -> Vec<(&'static str, String)> {
    vec![
        ("client", "gtx".to_string()),
        ("sl", request.source_or_auto().to_string()),
        ("tl", request.target_lang.clone()),
        ("dt", "t".to_string()),
        ("q", request.text.joined().into_owned()),
    ]
}

/// Translate with the free Google endpoint.
pub(super) async fn translate(
    client: &reqwest::Client,
    config: &Config,
    request: &TranslateRequest,
) -> Result<TranslateResponse, ProxyError> {
    let response = client
        .get(&config.google_api_url)
        .query(&build_query(request))
        .send()
        .await
        .map_err(|e| ProxyError::from_reqwest(Provider::Google, e))?;

    let raw = read_upstream_json(Provider::Google, response).await?;
    Ok(normalize(raw, request))
}

/// The response is a nested array: `[[["Hola","Hello",...], ...], null, "en", ...]`.
/// Element 0 of every segment in the first array is translated text; element 2
/// of the outer array is the detected source language.
fn normalize(raw: Value, request: &TranslateRequest) -> TranslateResponse {
    let translation: String = raw
        .get(0)
        .and_then(Value::as_array)
        .map(|segments| {
            segments
                .iter()
                .filter_map(|segment| segment.get(0).and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    let detected_source_language = raw
        .get(2)
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| request.source_lang.clone());

    TranslateResponse {
        translation: if translation.is_empty() {
            NO_TRANSLATION_FOUND.to_string()
        } else {
            translation
        },
        detected_source_language,
        provider: Provider::Google,
        raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn create_request(text: &str, source: Option<&str>, target: &str) -> TranslateRequest {
        TranslateRequest {
            text: text.into(),
            source_lang: source.map(str::to_string),
            target_lang: target.to_string(),
        }
    }

    fn create_test_config(api_url: &str) -> Config {
        Config {
            port: 5000,
            deepl_api_key: None,
            deepl_api_url: "http://unused".to_string(),
            google_api_url: api_url.to_string(),
            lingva_api_url: "http://unused".to_string(),
            mymemory_api_url: "http://unused".to_string(),
            upstream_timeout_secs: 5,
        }
    }

    // ==================== Query Tests ====================

    #[test]
    fn test_build_query() {
        let query = build_query(&create_request("Hello world", Some("en"), "es"));
        assert!(query.contains(&("client", "gtx".to_string())));
        assert!(query.contains(&("sl", "en".to_string())));
        assert!(query.contains(&("tl", "es".to_string())));
        assert!(query.contains(&("dt", "t".to_string())));
        assert!(query.contains(&("q", "Hello world".to_string())));
    }

    #[test]
    fn test_build_query_missing_source_is_auto() {
        let query = build_query(&create_request("Hello", None, "es"));
        assert!(query.contains(&("sl", "auto".to_string())));
    }

    // ==================== Normalization Tests ====================

    #[test]
    fn test_normalize_single_segment() {
        let raw = json!([[["Hola", "Hello", null, null, 10]], null, "en"]);
        let response = normalize(raw, &create_request("Hello", Some("auto"), "es"));

        assert_eq!(response.translation, "Hola");
        assert_eq!(response.detected_source_language.as_deref(), Some("en"));
        assert_eq!(response.provider, Provider::Google);
    }

    #[test]
    fn test_normalize_concatenates_segments() {
        let raw = json!([
            [
                ["Hola. ", "Hello. ", null, null, 10],
                ["¿Cómo estás?", "How are you?", null, null, 10],
                [null, null, "Ola", "Hello"]
            ],
            null,
            "en"
        ]);
        let response = normalize(raw, &create_request("Hello. How are you?", None, "es"));
        assert_eq!(response.translation, "Hola. ¿Cómo estás?");
    }

    #[test]
    fn test_normalize_ignores_segments_outside_first_array() {
        let raw = json!([[["Hola", "Hello"]], [["ignored", "x"]], "en"]);
        let response = normalize(raw, &create_request("Hello", None, "es"));
        assert_eq!(response.translation, "Hola");
    }

    #[test]
    fn test_normalize_falls_back_to_request_source() {
        let raw = json!([[["Hola", "Hello"]]]);
        let response = normalize(raw, &create_request("Hello", Some("en"), "es"));
        assert_eq!(response.detected_source_language.as_deref(), Some("en"));
    }

    #[test]
    fn test_normalize_unexpected_shape_uses_sentinel() {
        let response = normalize(json!({ "error": "weird" }), &create_request("Hello", None, "es"));
        assert_eq!(response.translation, NO_TRANSLATION_FOUND);
    }

    // ==================== Upstream Tests ====================

    #[tokio::test]
    async fn test_translate_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("client", "gtx"))
            .and(query_param("sl", "auto"))
            .and(query_param("tl", "es"))
            .and(query_param("q", "Hello & goodbye"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([[["Hola y adiós", "Hello & goodbye"]], null, "en"])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = create_test_config(&format!("{}/translate_a/single", mock_server.uri()));
        let request = create_request("Hello & goodbye", Some("auto"), "es");

        let response = translate(&reqwest::Client::new(), &config, &request)
            .await
            .expect("Should translate");

        assert_eq!(response.translation, "Hola y adiós");
        assert_eq!(response.detected_source_language.as_deref(), Some("en"));
    }

    #[tokio::test]
    async fn test_translate_upstream_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
            .mount(&mock_server)
            .await;

        let config = create_test_config(&format!("{}/translate_a/single", mock_server.uri()));
        let err = translate(
            &reqwest::Client::new(),
            &config,
            &create_request("Hello", None, "es"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ProxyError::Upstream { status: 429, .. }));
    }

    #[tokio::test]
    async fn test_translate_non_json_body_is_internal_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>captcha</html>"))
            .mount(&mock_server)
            .await;

        let config = create_test_config(&format!("{}/translate_a/single", mock_server.uri()));
        let err = translate(
            &reqwest::Client::new(),
            &config,
            &create_request("Hello", None, "es"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ProxyError::Internal(_)));
    }
}
