use super::{read_upstream_json, Provider, TranslateRequest, TranslateResponse};
use crate::config::Config;
use crate::error::ProxyError;
use serde::{Deserialize, Serialize};

/// DeepL `/v2/translate` request body
#[derive(Debug, Serialize, PartialEq)]
struct DeepLRequest {
    text: Vec<String>,
    /// Omitted entirely when the source should be detected
    #[serde(skip_serializing_if = "Option::is_none")]
    source_lang: Option<String>,
    target_lang: String,
}

#[derive(Debug, Deserialize)]
struct DeepLResponse {
    translations: Vec<DeepLTranslation>,
}

#[derive(Debug, Deserialize)]
struct DeepLTranslation {
    text: String,
    #[serde(default)]
    detected_source_language: Option<String>,
}

fn build_request(request: &TranslateRequest) -> DeepLRequest {
    DeepLRequest {
        text: request.text.to_batch(),
        source_lang: if request.is_auto_source() {
            None
        } else {
            request.source_lang.as_deref().map(str::to_uppercase)
        },
        target_lang: request.target_lang.to_uppercase(),
    }
}

/// Translate with DeepL. Requires `DEEPL_API_KEY`.
pub(super) async fn translate(
    client: &reqwest::Client,
    config: &Config,
    request: &TranslateRequest,
) -> Result<TranslateResponse, ProxyError> {
    let api_key = config
        .deepl_api_key
        .as_deref()
        .ok_or_else(|| ProxyError::Configuration("DEEPL_API_KEY is not set".to_string()))?;

    let body = build_request(request);

    let response = client
        .post(&config.deepl_api_url)
        .header("Authorization", format!("DeepL-Auth-Key {}", api_key))
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await
        .map_err(|e| ProxyError::from_reqwest(Provider::DeepL, e))?;

    let raw = read_upstream_json(Provider::DeepL, response).await?;
    normalize(raw)
}

/// Take text and detected language from the first batch element.
fn normalize(raw: serde_json::Value) -> Result<TranslateResponse, ProxyError> {
    let parsed: DeepLResponse = serde_json::from_value(raw.clone())
        .map_err(|e| ProxyError::Internal(format!("Failed to parse DeepL response: {}", e)))?;

    let first = parsed.translations.into_iter().next().ok_or_else(|| {
        ProxyError::Internal("DeepL response contained no translations".to_string())
    })?;

    Ok(TranslateResponse {
        translation: first.text,
        detected_source_language: first.detected_source_language,
        provider: Provider::DeepL,
        raw,
    })
}
