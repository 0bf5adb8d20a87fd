use crate::error::ProxyError;
use crate::i18n::AUTO_DETECT;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Placeholder returned when a provider answers without any translated text.
pub const NO_TRANSLATION_FOUND: &str = "No translation found";

/// Upstream translation service selected per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    DeepL,
    Google,
    Lingva,
    MyMemory,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown provider '{0}' (expected one of: deepl, google, lingva, mymemory)")]
pub struct UnknownProvider(pub String);

impl Provider {
    pub const ALL: [Provider; 4] = [
        Provider::MyMemory,
        Provider::Google,
        Provider::Lingva,
        Provider::DeepL,
    ];

    /// Wire tag, as used in JSON and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::DeepL => "deepl",
            Provider::Google => "google",
            Provider::Lingva => "lingva",
            Provider::MyMemory => "mymemory",
        }
    }

    /// Service name used in error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::DeepL => "DeepL",
            Provider::Google => "Google Translate",
            Provider::Lingva => "Lingva",
            Provider::MyMemory => "MyMemory",
        }
    }

    /// Label shown in the provider picker.
    pub fn label(&self) -> &'static str {
        match self {
            Provider::DeepL => "DeepL (Premium)",
            Provider::Google => "Google (Free)",
            Provider::Lingva => "Lingva (Private)",
            Provider::MyMemory => "Standard (Fast)",
        }
    }

    /// Proxy route serving this provider.
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            Provider::DeepL => "/api/translate",
            Provider::Google => "/api/translate/google",
            Provider::Lingva => "/api/translate/lingva",
            Provider::MyMemory => "/api/translate/mymemory",
        }
    }

    /// MyMemory needs an explicit source language pair.
    pub fn supports_auto_detect(&self) -> bool {
        !matches!(self, Provider::MyMemory)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deepl" => Ok(Provider::DeepL),
            "google" => Ok(Provider::Google),
            "lingva" => Ok(Provider::Lingva),
            "mymemory" | "standard" => Ok(Provider::MyMemory),
            _ => Err(UnknownProvider(s.to_string())),
        }
    }
}

/// Text to translate: a single string or an ordered batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextInput {
    Single(String),
    Batch(Vec<String>),
}

impl TextInput {
    pub fn is_empty(&self) -> bool {
        match self {
            TextInput::Single(text) => text.is_empty(),
            TextInput::Batch(texts) => texts.is_empty(),
        }
    }

    /// Coerce to a batch (DeepL accepts arrays natively).
    pub fn to_batch(&self) -> Vec<String> {
        match self {
            TextInput::Single(text) => vec![text.clone()],
            TextInput::Batch(texts) => texts.clone(),
        }
    }

    /// Flatten to one string for providers that take a single query.
    /// Batch entries are joined with newlines.
    pub fn joined(&self) -> Cow<'_, str> {
        match self {
            TextInput::Single(text) => Cow::Borrowed(text),
            TextInput::Batch(texts) => Cow::Owned(texts.join("\n")),
        }
    }
}

impl From<&str> for TextInput {
    fn from(text: &str) -> Self {
        TextInput::Single(text.to_string())
    }
}

/// Request body as received, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslatePayload {
    #[serde(default)]
    pub text: Option<TextInput>,
    #[serde(default)]
    pub source_lang: Option<String>,
    #[serde(default)]
    pub target_lang: Option<String>,
}

/// A validated translate request.
///
/// `text` is non-empty and `target_lang` is a concrete code (never "auto").
/// A missing or "auto" source means the provider should detect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateRequest {
    pub text: TextInput,
    pub source_lang: Option<String>,
    pub target_lang: String,
}

impl TranslateRequest {
    pub fn validate(payload: TranslatePayload) -> Result<Self, ProxyError> {
        let text = payload
            .text
            .filter(|text| !text.is_empty())
            .ok_or_else(ProxyError::missing_fields)?;

        let target_lang = payload
            .target_lang
            .map(|lang| lang.trim().to_string())
            .filter(|lang| !lang.is_empty())
            .ok_or_else(ProxyError::missing_fields)?;

        if target_lang.eq_ignore_ascii_case(AUTO_DETECT) {
            return Err(ProxyError::InvalidRequest(
                "target_lang must be a concrete language code, not \"auto\"".to_string(),
            ));
        }

        let source_lang = payload
            .source_lang
            .map(|lang| lang.trim().to_string())
            .filter(|lang| !lang.is_empty());

        Ok(Self {
            text,
            source_lang,
            target_lang,
        })
    }

    /// Whether the provider should detect the source language.
    pub fn is_auto_source(&self) -> bool {
        self.source_lang
            .as_deref()
            .map_or(true, |lang| lang.eq_ignore_ascii_case(AUTO_DETECT))
    }

    /// Source code for providers that spell auto-detection as "auto".
    pub fn source_or_auto(&self) -> &str {
        if self.is_auto_source() {
            AUTO_DETECT
        } else {
            self.source_lang.as_deref().unwrap_or(AUTO_DETECT)
        }
    }
}

/// Normalized translation result, identical in shape for every provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_source_language: Option<String>,
    pub provider: Provider,
    /// Upstream payload, passed through for diagnostics
    pub raw: serde_json::Value,
}
