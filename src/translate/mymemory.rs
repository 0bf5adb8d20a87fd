use super::{
    read_upstream_json, Provider, TranslateRequest, TranslateResponse, NO_TRANSLATION_FOUND,
};
use crate::config::Config;
use crate::error::ProxyError;
use serde_json::Value;

/// `q` and `langpair=<source>|<target>` query parameters
fn build_query(request: &TranslateRequest) -> Vec<(&'static str, String)> {
    let source = request.source_lang.as_deref().unwrap_or("auto");
    vec![
        ("q", request.text.joined().into_owned()),
        ("langpair", format!("{}|{}", source, request.target_lang)),
    ]
}

/// Translate with MyMemory, the low-accuracy provider.
pub(super) async fn translate(
    client: &reqwest::Client,
    config: &Config,
    request: &TranslateRequest,
) -> Result<TranslateResponse, ProxyError> {
    let response = client
        .get(&config.mymemory_api_url)
        .query(&build_query(request))
        .send()
        .await
        .map_err(|e| ProxyError::from_reqwest(Provider::MyMemory, e))?;

    let raw = read_upstream_json(Provider::MyMemory, response).await?;
    Ok(normalize(raw))
}

/// A missing `responseData.translatedText` yields the placeholder, not an error.
fn normalize(raw: Value) -> TranslateResponse {
    let translation = raw
        .pointer("/responseData/translatedText")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .unwrap_or(NO_TRANSLATION_FOUND)
        .to_string();

    TranslateResponse {
        translation,
        detected_source_language: None,
        provider: Provider::MyMemory,
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
            google_api_url: "http://unused".to_string(),
            lingva_api_url: "http://unused".to_string(),
            mymemory_api_url: api_url.to_string(),
            upstream_timeout_secs: 5,
        }
    }

    #[test]
    fn test_build_query_langpair() {
        let query = build_query(&create_request("Hello", Some("en"), "it"));
        assert_eq!(query[0], ("q", "Hello".to_string()));
        assert_eq!(query[1], ("langpair", "en|it".to_string()));
    }

    #[test]
    fn test_build_query_source_defaults_to_auto() {
        let query = build_query(&create_request("Hello", None, "it"));
        assert_eq!(query[1], ("langpair", "auto|it".to_string()));
    }

    #[test]
    fn test_normalize_translated_text() {
        let raw = json!({
            "responseData": { "translatedText": "Ciao", "match": 1 },
            "responseStatus": 200
        });
        let response = normalize(raw);
        assert_eq!(response.translation, "Ciao");
        assert!(response.detected_source_language.is_none());
        assert_eq!(response.provider, Provider::MyMemory);
    }

    #[test]
    fn test_normalize_missing_translation_is_placeholder() {
        let response = normalize(json!({ "responseData": {}, "responseStatus": 200 }));
        assert_eq!(response.translation, "No translation found");

        let response = normalize(json!({ "responseStatus": 403 }));
        assert_eq!(response.translation, "No translation found");
    }

    #[tokio::test]
    async fn test_translate_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/get"))
            .and(query_param("q", "Good night"))
            .and(query_param("langpair", "en|it"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responseData": { "translatedText": "Buona notte" }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = create_test_config(&format!("{}/get", mock_server.uri()));
        let response = translate(
            &reqwest::Client::new(),
            &config,
            &create_request("Good night", Some("en"), "it"),
        )
        .await
        .expect("Should translate");

        assert_eq!(response.translation, "Buona notte");
    }

    #[tokio::test]
    async fn test_translate_absent_data_is_not_a_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/get"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "responseData": null })))
            .mount(&mock_server)
            .await;

        let config = create_test_config(&format!("{}/get", mock_server.uri()));
        let response = translate(
            &reqwest::Client::new(),
            &config,
            &create_request("zzzz", Some("en"), "it"),
        )
        .await
        .expect("Placeholder is not an error");

        assert_eq!(response.translation, NO_TRANSLATION_FOUND);
    }
}
