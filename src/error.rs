use crate::translate::Provider;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errors produced while serving a translate request.
///
/// Every variant maps to a structured JSON body; nothing escapes as a panic.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Client input is malformed (missing text, missing target, bad JSON)
    #[error("{0}")]
    InvalidRequest(String),

    /// The server lacks a required secret
    #[error("Server configuration error: {0}")]
    Configuration(String),

    /// The provider answered with a non-success status
    #[error("{provider} API error ({status}): {details}")]
    Upstream {
        provider: Provider,
        status: u16,
        details: String,
    },

    /// The provider did not answer within the configured timeout
    #[error("{0} request timed out")]
    UpstreamTimeout(Provider),

    /// Network failure, unparsable upstream payload, or anything unexpected
    #[error("{0}")]
    Internal(String),
}

impl ProxyError {
    pub fn missing_fields() -> Self {
        ProxyError::InvalidRequest(
            "Missing required fields: text and target_lang are required".to_string(),
        )
    }

    /// Classify a transport error from an upstream call.
    pub fn from_reqwest(provider: Provider, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProxyError::UpstreamTimeout(provider)
        } else {
            ProxyError::Internal(format!("{} request failed: {}", provider.display_name(), err))
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::Upstream { status, .. } => {
                // Upstream statuses are passed through; anything that isn't a
                // valid error status becomes 502
                StatusCode::from_u16(*status)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ProxyError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            ProxyError::InvalidRequest(message) => json!({ "error": message }),
            ProxyError::Configuration(_) => json!({ "error": self.to_string() }),
            ProxyError::Upstream {
                provider, details, ..
            } => {
                warn!("{}", self);
                json!({
                    "error": format!(
                        "Failed to fetch translation from {}",
                        provider.display_name()
                    ),
                    "details": details,
                })
            }
            ProxyError::UpstreamTimeout(provider) => {
                warn!("{}", self);
                json!({
                    "error": "Upstream request timed out",
                    "provider": provider,
                })
            }
            ProxyError::Internal(message) => {
                error!("Translation error: {}", message);
                json!({
                    "error": "Internal server error",
                    "message": message,
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Status Mapping Tests ====================

    #[test]
    fn test_invalid_request_is_400() {
        assert_eq!(ProxyError::missing_fields().status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_configuration_is_500() {
        let err = ProxyError::Configuration("DEEPL_API_KEY is not set".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "Server configuration error: DEEPL_API_KEY is not set"
        );
    }

    #[test]
    fn test_upstream_status_passthrough() {
        let err = ProxyError::Upstream {
            provider: Provider::DeepL,
            status: 456,
            details: "Quota exceeded".to_string(),
        };
        assert_eq!(err.status_code().as_u16(), 456);
    }

    #[test]
    fn test_upstream_success_status_becomes_bad_gateway() {
        let err = ProxyError::Upstream {
            provider: Provider::Google,
            status: 302,
            details: String::new(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_timeout_is_504() {
        let err = ProxyError::UpstreamTimeout(Provider::Lingva);
        assert_eq!(err.status_code(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(err.to_string(), "lingva request timed out");
    }

    #[test]
    fn test_internal_is_500() {
        let err = ProxyError::Internal("boom".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    // ==================== Response Tests ====================

    #[test]
    fn test_into_response_keeps_status() {
        let response = ProxyError::missing_fields().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ProxyError::Upstream {
            provider: Provider::MyMemory,
            status: 429,
            details: "slow down".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
