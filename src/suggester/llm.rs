use crate::errors::ModelError;

/// Trait for chat-completion providers.
///
/// Synchronous, not async. The provider struct holds the API key and model
/// configuration; callers only supply the two messages.
pub trait LlmProvider: Send + Sync {
    /// Generate a reply given a system prompt and a user message.
    fn generate(&self, system: &str, user: &str) -> Result<String, ModelError>;
}
