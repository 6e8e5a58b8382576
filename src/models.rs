use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Result;

/// One operation picked out of a spec document, ready to hand to the suggester.
///
/// Field order matches the hand-off JSON: `method`, `endpoint`, `baseurl`,
/// `schema`. A missing schema is written as `null`, never omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationSelection {
    /// Lower-case HTTP method key, e.g. `post`.
    pub method: String,
    /// Path template as declared in `paths`, e.g. `/chat/completions`.
    pub endpoint: String,
    /// First server URL of the document.
    pub baseurl: String,
    /// Resolved request body schema, if the operation references one.
    #[serde(default)]
    pub schema: Option<Value>,
}

impl OperationSelection {
    /// Encode as the pretty-printed JSON hand-off text.
    pub fn to_handoff(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode hand-off text produced by [`to_handoff`](Self::to_handoff).
    pub fn from_handoff(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
