//! Provider adapters: map a normalized request onto each upstream API and
//! normalize what comes back.
//!
//! Every adapter follows the same shape: build the upstream call from a
//! validated [`TranslateRequest`], send it, hand the JSON body to a pure
//! `normalize` function. Upstream non-success statuses become
//! [`ProxyError::Upstream`] with the status and body preserved.

mod deepl;
mod google;
mod lingva;
mod mymemory;
mod types;

pub use types::{
    Provider, TextInput, TranslatePayload, TranslateRequest, TranslateResponse, UnknownProvider,
    NO_TRANSLATION_FOUND,
};

use crate::config::Config;
use crate::error::ProxyError;
use tracing::debug;

/// Translate a validated request with the selected provider.
pub async fn translate(
    client: &reqwest::Client,
    config: &Config,
    provider: Provider,
    request: &TranslateRequest,
) -> Result<TranslateResponse, ProxyError> {
    debug!(
        "Translating via {} ({} -> {})",
        provider,
        request.source_or_auto(),
        request.target_lang
    );

    match provider {
        Provider::DeepL => deepl::translate(client, config, request).await,
        Provider::Google => google::translate(client, config, request).await,
        Provider::Lingva => lingva::translate(client, config, request).await,
        Provider::MyMemory => mymemory::translate(client, config, request).await,
    }
}

/// Check the upstream status and decode the body as JSON.
async fn read_upstream_json(
    provider: Provider,
    response: reqwest::Response,
) -> Result<serde_json::Value, ProxyError> {
    let status = response.status();

    if !status.is_success() {
        let details = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
        return Err(ProxyError::Upstream {
            provider,
            status: status.as_u16(),
            details,
        });
    }

    response
        .json()
        .await
        .map_err(|e| ProxyError::from_reqwest(provider, e))
}
