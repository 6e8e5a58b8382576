use thiserror::Error;

/// Errors that can occur while exploring a spec or suggesting a command.
#[derive(Error, Debug)]
pub enum CurlgenError {
    /// Downloading the spec document failed.
    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// The spec document could not be parsed.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// The user picked an endpoint or method that does not exist.
    #[error("invalid selection: {message}")]
    Selection { message: String },

    /// Input ended before the user answered a prompt.
    #[error("input closed before a selection was made")]
    InputClosed,

    /// The model credential is not set.
    #[error("Error: {var} environment variable is not set.")]
    MissingCredential { var: String },

    /// No hand-off payload was given to the suggester.
    #[error("Error: selection payload is not set (pass --payload or --payload-file).")]
    MissingPayload,

    /// The chat-completion call failed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Filesystem or console I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ways a chat-completion call can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The request never got an HTTP response.
    #[error("network error: {message}")]
    Network { message: String },

    /// The service rejected the credential.
    #[error("authentication failed (HTTP {status})")]
    Authentication { status: u16 },

    /// The service asked us to slow down.
    #[error("rate limited (HTTP 429)")]
    RateLimited,

    /// Any other non-success status.
    #[error("unexpected HTTP status {status}")]
    Http { status: u16 },

    /// The body was not a chat-completion response.
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },
}

impl ModelError {
    /// Map a non-success HTTP status to its error kind.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ModelError::Authentication { status },
            429 => ModelError::RateLimited,
            _ => ModelError::Http { status },
        }
    }

    /// Whether trying the same request again later could succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            ModelError::Network { .. } | ModelError::RateLimited => true,
            ModelError::Http { status } => *status >= 500,
            ModelError::Authentication { .. } | ModelError::MalformedResponse { .. } => false,
        }
    }
}

/// Convenience alias for `Result<T, CurlgenError>`.
pub type Result<T> = std::result::Result<T, CurlgenError>;
