use std::env;

use serde::{Deserialize, Serialize};

use super::llm::LlmProvider;
use crate::errors::{CurlgenError, ModelError, Result};

/// Environment variable holding the bearer credential.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Model used for the suggestion call itself.
const DEFAULT_MODEL: &str = "gpt-4o";

/// Default API base URL.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI Chat Completions API provider.
///
/// Also supports OpenAI-compatible endpoints via `OPENAI_API_BASE` or
/// `OPENAI_BASE_URL`.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    /// Create a provider from environment variables.
    ///
    /// Reads `OPENAI_API_KEY` (required), `OPENAI_MODEL` (optional, defaults
    /// to `gpt-4o`), and `OPENAI_API_BASE` or `OPENAI_BASE_URL` (optional,
    /// defaults to `https://api.openai.com/v1`).
    ///
    /// Returns [`CurlgenError::MissingCredential`] if the key is unset or empty.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var(API_KEY_VAR)
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CurlgenError::MissingCredential {
                var: API_KEY_VAR.to_string(),
            })?;
        let base_url = env::var("OPENAI_API_BASE")
            .or_else(|_| env::var("OPENAI_BASE_URL"))
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model = env::var("OPENAI_MODEL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Ok(Self::new(api_key, base_url, model))
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct RequestBody<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ResponseBody {
    choices: Vec<Choice>,
}

impl LlmProvider for OpenAiProvider {
    fn generate(&self, system: &str, user: &str) -> std::result::Result<String, ModelError> {
        let url = self.completions_url();

        let body = RequestBody {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: system,
                },
                Message {
                    role: "user",
                    content: user,
                },
            ],
            temperature: 0.0,
        };

        tracing::debug!(%url, model = %self.model, "sending chat completion request");
        let mut response = ureq::post(&url)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .send_json(&body)
            .map_err(|e| match e {
                ureq::Error::StatusCode(status) => ModelError::from_status(status),
                other => ModelError::Network {
                    message: other.to_string(),
                },
            })?;
        tracing::debug!(status = %response.status(), "chat completion response received");

        let resp: ResponseBody =
            response
                .body_mut()
                .read_json()
                .map_err(|e| ModelError::MalformedResponse {
                    message: e.to_string(),
                })?;

        resp.choices
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::MalformedResponse {
                message: "response contained no choices".to_string(),
            })?
            .message
            .content
            .ok_or_else(|| ModelError::MalformedResponse {
                message: "first choice has no message content".to_string(),
            })
    }
}
