//! Turning a selection record into a suggested `curl` command.
//!
//! The record text is embedded verbatim into a fixed instruction and sent to
//! a chat-completion model. The reply is returned as-is apart from trimming;
//! it is never validated or executed.

pub mod llm;
pub mod openai;

use crate::errors::{CurlgenError, Result};
use crate::models::OperationSelection;

use llm::LlmProvider;

/// System message sent with every suggestion request.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that generates curl commands.";

/// Wording choices for the instruction sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptConfig {
    /// Model the generated command should use for non-embedding calls.
    pub chat_model: String,
    /// Model the generated command should use for embedding calls.
    pub embedding_model: String,
    /// Name of the variable holding the bearer token, quoted literally.
    pub credential_var: String,
    /// Ask the model to double-check shell quoting.
    pub quoting_check: bool,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            chat_model: "gpt-4o".to_string(),
            embedding_model: "text-embedding-ada-002".to_string(),
            credential_var: openai::API_KEY_VAR.to_string(),
            quoting_check: true,
        }
    }
}

/// Build the user message for a hand-off payload.
#[must_use]
pub fn build_prompt(payload: &str, config: &PromptConfig) -> String {
    let mut prompt = format!(
        "You are a command-line assistant.\n\n\
         I will provide you with a JSON object:\n\n\
         {payload}\n\n\
         Craft a curl command based on this.\n\
         The Bearer token is in ${}\n\
         Do not use placeholders, use the actual values.\n",
        config.credential_var
    );
    if config.quoting_check {
        prompt.push_str("Verify closely there are no quoting issues.\n");
    }
    prompt.push_str(&format!(
        "Always suggest - if required - model {}\n\
         For embedding related suggestions use {}.\n\
         Only use required parameters in payloads.\n",
        config.chat_model, config.embedding_model
    ));
    prompt
}

/// Check that a payload was actually supplied.
pub fn require_payload(payload: Option<String>) -> Result<String> {
    payload
        .filter(|p| !p.trim().is_empty())
        .ok_or(CurlgenError::MissingPayload)
}

/// Ask the model for a command and return its trimmed reply.
pub fn suggest(provider: &dyn LlmProvider, payload: &str, config: &PromptConfig) -> Result<String> {
    match OperationSelection::from_handoff(payload) {
        Ok(record) => tracing::debug!(
            method = %record.method,
            endpoint = %record.endpoint,
            "suggesting command for selection"
        ),
        Err(e) => tracing::warn!("payload is not a selection record ({e}); forwarding verbatim"),
    }

    let prompt = build_prompt(payload, config);
    let reply = provider.generate(SYSTEM_PROMPT, &prompt)?;
    Ok(reply.trim().to_string())
}
