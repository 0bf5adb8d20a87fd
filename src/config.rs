use std::time::Duration;

/// Proxy server configuration, loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,

    // DeepL (premium, requires a key)
    pub deepl_api_key: Option<String>,
    pub deepl_api_url: String,

    // Free providers
    pub google_api_url: String,
    pub lingva_api_url: String,
    pub mymemory_api_url: String,

    // Upstream calls
    pub upstream_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),

            // An empty key is treated the same as a missing one
            deepl_api_key: std::env::var("DEEPL_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            deepl_api_url: std::env::var("DEEPL_API_URL")
                .unwrap_or_else(|_| "https://api-free.deepl.com/v2/translate".to_string()),

            google_api_url: std::env::var("GOOGLE_API_URL").unwrap_or_else(|_| {
                "https://translate.googleapis.com/translate_a/single".to_string()
            }),
            lingva_api_url: std::env::var("LINGVA_API_URL")
                .unwrap_or_else(|_| "https://lingva.ml/api/v1".to_string()),
            mymemory_api_url: std::env::var("MYMEMORY_API_URL")
                .unwrap_or_else(|_| "https://api.mymemory.translated.net/get".to_string()),

            upstream_timeout_secs: std::env::var("UPSTREAM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(15),
        }
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

/// Client-side configuration for the translate controller.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub backend_url: String,
    pub debounce_ms: u64,
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self {
            backend_url: std::env::var("BACKEND_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
            debounce_ms: std::env::var("DEBOUNCE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(800),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(20),
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
