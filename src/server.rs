//! HTTP surface of the translation proxy.

use crate::config::Config;
use crate::error::ProxyError;
use crate::translate::{self, Provider, TranslatePayload, TranslateRequest, TranslateResponse};
use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

/// Shared, read-only state for every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Pooled client used for all upstream calls
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.upstream_timeout())
            .build()
            .context("Failed to build upstream HTTP client")?;

        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/translate", post(translate_deepl))
        .route("/api/translate/google", post(translate_google))
        .route("/api/translate/lingva", post(translate_lingva))
        .route("/api/translate/mymemory", post(translate_mymemory))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Backend server is running",
    }))
}

async fn translate_deepl(
    State(state): State<AppState>,
    payload: Result<Json<TranslatePayload>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ProxyError> {
    handle_translate(&state, Provider::DeepL, payload).await
}

async fn translate_google(
    State(state): State<AppState>,
    payload: Result<Json<TranslatePayload>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ProxyError> {
    handle_translate(&state, Provider::Google, payload).await
}

async fn translate_lingva(
    State(state): State<AppState>,
    payload: Result<Json<TranslatePayload>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ProxyError> {
    handle_translate(&state, Provider::Lingva, payload).await
}

async fn translate_mymemory(
    State(state): State<AppState>,
    payload: Result<Json<TranslatePayload>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ProxyError> {
    handle_translate(&state, Provider::MyMemory, payload).await
}

/// Shared validate -> dispatch -> normalize path for every provider route.
async fn handle_translate(
    state: &AppState,
    provider: Provider,
    payload: Result<Json<TranslatePayload>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ProxyError> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!("Rejected {} request body: {}", provider, rejection.body_text());
        ProxyError::InvalidRequest(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let request = TranslateRequest::validate(payload)?;
    let response = translate::translate(&state.client, &state.config, provider, &request).await?;

    debug!(
        "{} translation complete ({} chars)",
        provider,
        response.translation.chars().count()
    );

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> Config {
        Config {
            port: 0,
            deepl_api_key: None,
            deepl_api_url: "http://127.0.0.1:9/v2/translate".to_string(),
            google_api_url: "http://127.0.0.1:9/translate_a/single".to_string(),
            lingva_api_url: "http://127.0.0.1:9/api/v1".to_string(),
            mymemory_api_url: "http://127.0.0.1:9/get".to_string(),
            upstream_timeout_secs: 2,
        }
    }

    #[test]
    fn test_app_state_builds() {
        let state = AppState::new(create_test_config()).expect("Should build state");
        assert_eq!(state.config.upstream_timeout_secs, 2);
    }

    #[tokio::test]
    async fn test_health_check_body() {
        let Json(body) = health_check().await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["message"], "Backend server is running");
    }

    #[tokio::test]
    async fn test_invalid_payload_short_circuits_before_upstream() {
        let state = AppState::new(create_test_config()).expect("Should build state");

        for provider in Provider::ALL {
            let result =
                handle_translate(&state, provider, Ok(Json(TranslatePayload::default()))).await;
            assert!(
                matches!(result, Err(ProxyError::InvalidRequest(_))),
                "{} should reject an empty payload",
                provider
            );
        }
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_internal_error() {
        let state = AppState::new(create_test_config()).expect("Should build state");
        let payload = TranslatePayload {
            text: Some("Hello".into()),
            source_lang: Some("en".to_string()),
            target_lang: Some("es".to_string()),
        };

        let result = handle_translate(&state, Provider::Google, Ok(Json(payload))).await;
        assert!(matches!(result, Err(ProxyError::Internal(_))));
    }
}
