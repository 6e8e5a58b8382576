pub mod document;
pub mod errors;
pub mod explorer;
pub mod fetch;
pub mod models;
pub mod suggester;

// Re-export key types at crate root for convenience.
pub use document::{format_endpoint_list, normalize, ApiDocument};
pub use errors::{CurlgenError, ModelError, Result};
pub use explorer::{explore, explore_url, LinePrompter, Prompter, TerminalPrompter};
pub use fetch::{fetch_spec, DEFAULT_SPEC_URL};
pub use models::OperationSelection;
pub use suggester::llm::LlmProvider;
pub use suggester::openai::OpenAiProvider;
pub use suggester::{build_prompt, require_payload, suggest, PromptConfig};
