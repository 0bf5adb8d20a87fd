//! HTTP client for the translation proxy, used by the translate controller.

use crate::controller::Snapshot;
use crate::translate::NO_TRANSLATION_FOUND;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Why a proxy call failed. Shown to users only as a generic message.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("translation proxy did not respond in time")]
    Timeout,

    #[error("failed to reach translation proxy: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("translation proxy returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid response from translation proxy: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_decode() {
            ClientError::InvalidResponse(err.to_string())
        } else {
            ClientError::Transport(err)
        }
    }
}

/// What a successful proxy call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    Translated(String),
    /// The provider answered but had nothing to offer
    NoTranslationAvailable,
}

#[derive(Debug, Serialize)]
struct ProxyRequest<'a> {
    text: &'a str,
    source_lang: &'a str,
    target_lang: &'a str,
}

#[derive(Debug, Deserialize)]
struct ProxyReply {
    #[serde(default)]
    translation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProxyErrorReply {
    #[serde(default)]
    error: Option<String>,
}

/// Thin wrapper around `reqwest::Client` bound to one proxy base URL.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build proxy HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the snapshot to the endpoint of its provider.
    pub async fn translate(&self, snapshot: &Snapshot) -> Result<TranslationOutcome, ClientError> {
        let url = format!("{}{}", self.base_url, snapshot.provider.endpoint_path());

        let body = ProxyRequest {
            text: &snapshot.text,
            source_lang: &snapshot.source_lang,
            target_lang: &snapshot.target_lang,
        };

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProxyErrorReply>(&text)
                .ok()
                .and_then(|reply| reply.error)
                .unwrap_or_else(|| {
                    format!(
                        "Failed to fetch translation from {}.",
                        snapshot.provider.display_name()
                    )
                });
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let reply: ProxyReply = response.json().await?;

        let text = reply.translation.ok_or_else(|| {
            ClientError::InvalidResponse("reply has no translation field".to_string())
        })?;

        Ok(if text.is_empty() || text == NO_TRANSLATION_FOUND {
            TranslationOutcome::NoTranslationAvailable
        } else {
            TranslationOutcome::Translated(text)
        })
    }
}
