use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{debug, warn};

use crate::api::{first_candidate_text, GenerateContentRequest};
use crate::core::error::ChatError;
use crate::utils::url::generate_content_url;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(15_000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiSettings {
    pub base_url: String,
    pub model: String,
    /// Hard deadline for the whole exchange, body included.
    pub timeout: Duration,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// What a successful (2xx) exchange produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Text(String),
    /// The body was JSON but had no usable candidate text.
    Fallback,
}

#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    settings: GeminiSettings,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(settings: GeminiSettings) -> Self {
        Self::with_http_client(reqwest::Client::new(), settings)
    }

    pub fn with_http_client(http: reqwest::Client, settings: GeminiSettings) -> Self {
        let endpoint = generate_content_url(&settings.base_url, &settings.model);
        Self {
            http,
            settings,
            endpoint,
        }
    }

    pub fn settings(&self) -> &GeminiSettings {
        &self.settings
    }

    /// Endpoint URL without the credential.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one `generateContent` request. There is no retry; a request still
    /// pending when the deadline passes is dropped, closing its connection.
    pub async fn generate(
        &self,
        body: &GenerateContentRequest,
        api_key: &str,
    ) -> Result<GenerationOutcome, ChatError> {
        let deadline = self.settings.timeout;
        let started = Instant::now();
        debug!(
            endpoint = %self.endpoint,
            timeout_ms = deadline.as_millis() as u64,
            "calling generateContent"
        );

        tokio::select! {
            result = self.exchange(body, api_key) => {
                debug!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    ok = result.is_ok(),
                    "generateContent finished"
                );
                result
            }
            _ = tokio::time::sleep(deadline) => {
                warn!(
                    endpoint = %self.endpoint,
                    timeout_ms = deadline.as_millis() as u64,
                    "generateContent timed out, request aborted"
                );
                Err(ChatError::Timeout { after: deadline })
            }
        }
    }

    async fn exchange(
        &self,
        body: &GenerateContentRequest,
        api_key: &str,
    ) -> Result<GenerationOutcome, ChatError> {
        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", api_key)])
            .json(body)
            .send()
            .await
            .map_err(ChatError::from)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            let err = ChatError::Api {
                status: status.as_u16(),
                body: error_text,
            };
            warn!(
                status = status.as_u16(),
                summary = %err.summary().unwrap_or_default(),
                "generateContent rejected the request"
            );
            return Err(err);
        }

        let text = response
            .text()
            .await
            .map_err(ChatError::from)?;
        parse_generation(&text)
    }
}

/// Classify a 2xx body: non-JSON is an error, JSON without candidate text is a
/// soft fallback.
pub fn parse_generation(body: &str) -> Result<GenerationOutcome, ChatError> {
    let value: Value =
        serde_json::from_str(body).map_err(|err| ChatError::Decode(err.to_string()))?;

    match first_candidate_text(&value)
        .map(str::trim)
        .filter(|text| !text.is_empty())
    {
        Some(text) => Ok(GenerationOutcome::Text(text.to_string())),
        None => {
            warn!("generateContent response had no candidate text");
            Ok(GenerationOutcome::Fallback)
        }
    }
}
