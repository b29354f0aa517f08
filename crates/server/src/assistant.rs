//! Gateway to the external text-generation service.
//!
//! One attempt per request, no retries. Missing configuration and upstream
//! failures both surface as fixed user-facing replies; the underlying cause
//! only reaches the logs.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) const NOT_CONFIGURED_REPLY: &str =
    "The assistant is not configured yet. Set an API key to enable it.";
pub(crate) const FAILURE_REPLY: &str = "The assistant hit an error. Please try again.";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
enum AssistantError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("service answered {0}")]
    Status(reqwest::StatusCode),
    #[error("service answered without text")]
    EmptyReply,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Debug, Deserialize)]
struct TextPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Clone)]
pub struct Assistant {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl Assistant {
    /// Builds the gateway. `api_key = None` means "not configured": requests
    /// are answered locally with a notice instead of calling out.
    pub fn new(api_key: Option<String>, model: Option<String>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Sends the prompt and returns a best-effort reply.
    ///
    /// Never fails at this surface: the caller always gets text suitable for
    /// the end user.
    pub async fn ask(&self, prompt: &str) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!("assistant request skipped: no API key configured");
            return NOT_CONFIGURED_REPLY.to_string();
        };

        match self.generate(api_key, prompt).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::error!("assistant request failed: {err}");
                FAILURE_REPLY.to_string()
            }
        }
    }

    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, AssistantError> {
        let endpoint = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let res = self
            .http
            .post(endpoint)
            // The key travels in a header so it can never end up in logged URLs.
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(AssistantError::Status(status));
        }

        let parsed: GenerateResponse = res.json().await?;
        let reply = parsed
            .candidates
            .into_iter()
            .find_map(|candidate| {
                candidate
                    .content
                    .and_then(|content| content.parts.into_iter().next())
            })
            .map(|part| part.text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(AssistantError::EmptyReply)?;

        Ok(reply)
    }
}
