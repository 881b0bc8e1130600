use std::error::Error as StdError;
use std::fmt;

use tracing::debug;

use crate::api::{GenerateContentRequest, GenerateContentResponse};
use crate::core::constants::SCENE_MODEL;
use crate::core::generator::{GenerateError, SceneGenerator};
use crate::utils::url::construct_api_url;

/// Why a client handle could not be built at startup.
#[derive(Debug)]
pub enum ClientInitError {
    /// Neither the configured nor the fallback variable holds a key.
    MissingApiKey { checked: Vec<String> },
    /// The HTTP client itself failed to build (TLS backend, etc.).
    Http(reqwest::Error),
}

impl fmt::Display for ClientInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientInitError::MissingApiKey { checked } => write!(
                f,
                "no API key found; set one of: {}",
                checked.join(", ")
            ),
            ClientInitError::Http(source) => write!(f, "failed to build HTTP client: {source}"),
        }
    }
}

impl StdError for ClientInitError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ClientInitError::Http(source) => Some(source),
            ClientInitError::MissingApiKey { .. } => None,
        }
    }
}

pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: &str) -> Result<Self, ClientInitError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("screenwright/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientInitError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            api_key,
            model: SCENE_MODEL.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        construct_api_url(
            &self.base_url,
            &format!("models/{}:generateContent", self.model),
        )
    }
}

#[async_trait::async_trait]
impl SceneGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let request = GenerateContentRequest::from_prompt(prompt);
        let url = self.endpoint();
        debug!(model = %self.model, prompt_len = prompt.len(), "Sending generateContent request");

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(GenerateError::Status {
                status: status.as_u16(),
                summary: summarize_error_body(&body),
            });
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| GenerateError::Decode(e.to_string()))?;

        // Only missing text is an error; blank text passes through.
        parsed.text().ok_or_else(|| GenerateError::EmptyResponse {
            finish_reason: parsed.finish_reason().map(str::to_owned),
        })
    }
}

fn extract_error_summary(value: &serde_json::Value) -> Option<String> {
    let summary = value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .or_else(|| {
            value
                .get("error")
                .and_then(|v| v.as_str().map(str::to_owned))
        })
        .or_else(|| {
            value
                .get("message")
                .and_then(|v| v.as_str().map(str::to_owned))
        });

    summary.map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// One-line description of an error body for the diagnostic log.
pub(crate) fn summarize_error_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty>".to_string();
    }

    if let Ok(json_value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        if let Some(summary) = extract_error_summary(&json_value) {
            if !summary.is_empty() {
                return summary;
            }
        }
    }

    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}
