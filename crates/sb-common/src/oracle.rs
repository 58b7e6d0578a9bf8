use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

/// Knobs for a single generation call.
#[derive(Debug, Clone, Copy)]
pub struct GenerationOptions {
    pub temperature: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 1024,
        }
    }
}

/// Best-effort remote text generator. Implementations return `None` on any
/// failure (network errors, auth problems, rate limiting) and callers must
/// degrade to a local algorithm instead of surfacing the error.
#[async_trait]
pub trait TextOracle: Send + Sync {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Option<String>;

    /// Whether the oracle is worth calling at all right now.
    fn available(&self) -> bool {
        true
    }
}

/// Oracle that never answers; used in tests and when no API key is set.
#[derive(Debug, Default)]
pub struct NullOracle;

#[async_trait]
impl TextOracle for NullOracle {
    async fn generate(&self, _prompt: &str, _options: &GenerationOptions) -> Option<String> {
        None
    }

    fn available(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone)]
pub struct OracleConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl OracleConfig {
    /// Read `SB_ORACLE_*` variables; a missing key disables remote calls.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("SB_ORACLE_API_KEY").ok().filter(|k| !k.is_empty()),
            base_url: std::env::var("SB_ORACLE_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".into()),
            model: std::env::var("SB_ORACLE_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".into()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Gemini-style `generateContent` client.
///
/// The free tier allows roughly 10 requests/minute; on the first HTTP 429
/// the client latches `rate_limited` and skips every further remote attempt
/// until process restart. The flag is shared across all concurrent callers.
pub struct HttpTextOracle {
    client: reqwest::Client,
    config: OracleConfig,
    rate_limited: AtomicBool,
}

impl HttpTextOracle {
    pub fn new(config: OracleConfig) -> Self {
        if config.api_key.is_none() {
            warn!("SB_ORACLE_API_KEY not set; similarity falls back to local algorithms");
        }

        Self {
            client: reqwest::Client::new(),
            config,
            rate_limited: AtomicBool::new(false),
        }
    }

    pub fn from_env() -> Self {
        Self::new(OracleConfig::from_env())
    }

    fn endpoint(&self, key: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, key
        )
    }
}

#[async_trait]
impl TextOracle for HttpTextOracle {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Option<String> {
        if !self.available() {
            return None;
        }
        let key = self.config.api_key.as_deref()?;

        let body = json!({
            "contents": [
                { "role": "user", "parts": [{ "text": prompt }] }
            ],
            "generationConfig": {
                "temperature": options.temperature,
                "topK": 40,
                "topP": 0.95,
                "maxOutputTokens": options.max_output_tokens,
            }
        });

        let response = match self.client.post(self.endpoint(key)).json(&body).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "oracle request failed");
                return None;
            }
        };

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            if !self.rate_limited.swap(true, Ordering::SeqCst) {
                warn!("oracle rate limit reached; using local similarity until restart");
            }
            return None;
        }
        if !status.is_success() {
            warn!(status = %status, "oracle returned non-success status");
            return None;
        }

        let parsed: GenerateResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(error = %err, "failed to decode oracle response");
                return None;
            }
        };

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .unwrap_or_default();

        debug!(chars = text.len(), "oracle responded");
        Some(text)
    }

    fn available(&self) -> bool {
        self.config.api_key.is_some() && !self.rate_limited.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn null_oracle_always_declines() {
        let oracle = NullOracle;
        assert!(!oracle.available());
        assert_eq!(
            oracle.generate("anything", &GenerationOptions::default()).await,
            None
        );
    }

    #[test]
    fn missing_api_key_disables_http_oracle() {
        let oracle = HttpTextOracle::new(OracleConfig {
            api_key: None,
            base_url: "http://localhost:0".into(),
            model: "test".into(),
        });

        assert!(!oracle.available());
    }

    #[test]
    fn rate_limit_flag_disables_further_attempts() {
        let oracle = HttpTextOracle::new(OracleConfig {
            api_key: Some("key".into()),
            base_url: "http://localhost:0".into(),
            model: "test".into(),
        });

        assert!(oracle.available());
        oracle.rate_limited.store(true, Ordering::SeqCst);
        assert!(!oracle.available());
    }
}
