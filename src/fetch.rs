use crate::errors::{CurlgenError, Result};

/// Where the OpenAI OpenAPI document is published.
pub const DEFAULT_SPEC_URL: &str =
    "https://raw.githubusercontent.com/openai/openai-openapi/refs/heads/master/openapi.yaml";

/// Upper bound on the spec body. The published document is several megabytes,
/// above the HTTP client's default body limit.
const MAX_SPEC_BYTES: u64 = 64 * 1024 * 1024;

/// Download the spec document as text with a plain GET.
pub fn fetch_spec(url: &str) -> Result<String> {
    tracing::info!(%url, "fetching spec document");
    let fetch_err = |e: ureq::Error| CurlgenError::Fetch {
        url: url.to_string(),
        message: e.to_string(),
    };

    let mut response = ureq::get(url).call().map_err(fetch_err)?;
    let text = response
        .body_mut()
        .with_config()
        .limit(MAX_SPEC_BYTES)
        .read_to_string()
        .map_err(fetch_err)?;

    tracing::debug!(bytes = text.len(), "spec document downloaded");
    Ok(text)
}
