use super::{
    read_upstream_json, Provider, TranslateRequest, TranslateResponse, NO_TRANSLATION_FOUND,
};
use crate::config::Config;
use crate::error::ProxyError;
use serde_json::Value;
use urlencoding::encode;

/// `<base>/<source>/<target>/<text>`, every segment URL-encoded
fn build_url(base_url: &str, request: &TranslateRequest) -> String {
    format!(
        "{}/{}/{}/{}",
        base_url.trim_end_matches('/'),
        encode(request.source_or_auto()),
        encode(&request.target_lang),
        encode(&request.text.joined())
    )
}

/// Translate with a Lingva instance.
pub(super) async fn translate(
    client: &reqwest::Client,
    config: &Config,
    request: &TranslateRequest,
) -> Result<TranslateResponse, ProxyError> {
    let url = build_url(&config.lingva_api_url, request);

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| ProxyError::from_reqwest(Provider::Lingva, e))?;

    let raw = read_upstream_json(Provider::Lingva, response).await?;
    Ok(normalize(raw, request))
}

fn normalize(raw: Value, request: &TranslateRequest) -> TranslateResponse {
    let translation = raw
        .get("translation")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .unwrap_or(NO_TRANSLATION_FOUND)
        .to_string();

    let detected_source_language = raw
        .pointer("/info/detectedSource")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| request.source_lang.clone());

    TranslateResponse {
        translation,
        detected_source_language,
        provider: Provider::Lingva,
        raw,
    }
}
