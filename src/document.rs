//! OpenAPI document loading and lookups.
//!
//! The document is normalized from YAML into a `serde_json::Value` with
//! mapping order preserved, so every listing below is in document order.

use serde_json::{Map, Number, Value};
use serde_yaml_ng::Value as Yaml;

use crate::errors::{CurlgenError, Result};

/// `$ref` prefix of named component schemas.
const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Media type whose request body schema is resolved.
const JSON_MEDIA_TYPE: &str = "application/json";

/// A parsed spec document.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiDocument {
    root: Value,
}

impl ApiDocument {
    /// Parse YAML (or JSON) text into a document.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(Self::from_value(normalize(text)?))
    }

    /// Wrap an already-normalized JSON value.
    #[must_use]
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Keys of `paths`, in document order.
    #[must_use]
    pub fn endpoints(&self) -> Vec<&str> {
        self.root
            .get("paths")
            .and_then(Value::as_object)
            .map(|paths| paths.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Keys declared under `paths[endpoint]`, in document order.
    ///
    /// Every key is listed, including non-method entries such as
    /// `parameters` or `summary`.
    #[must_use]
    pub fn methods(&self, endpoint: &str) -> Vec<&str> {
        self.path_item(endpoint)
            .and_then(Value::as_object)
            .map(|item| item.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// `servers[0].url`, if declared.
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.root
            .get("servers")
            .and_then(Value::as_array)
            .and_then(|servers| servers.first())
            .and_then(|server| server.get("url"))
            .and_then(Value::as_str)
    }

    /// The `$ref` of the JSON request body schema of an operation.
    #[must_use]
    pub fn schema_ref(&self, endpoint: &str, method: &str) -> Option<&str> {
        self.path_item(endpoint)?
            .get(method)?
            .get("requestBody")?
            .get("content")?
            .get(JSON_MEDIA_TYPE)?
            .get("schema")?
            .get("$ref")?
            .as_str()
    }

    /// Look up `components.schemas[name]`.
    #[must_use]
    pub fn component_schema(&self, name: &str) -> Option<&Value> {
        self.root
            .get("components")?
            .get("schemas")?
            .get(name)
            .filter(|v| !v.is_null())
    }

    /// Resolve the request body schema of an operation to its full component
    /// definition. `None` when the operation has no JSON body, the body does
    /// not reference a component, or the component does not exist.
    #[must_use]
    pub fn resolve_schema(&self, endpoint: &str, method: &str) -> Option<Value> {
        let reference = self.schema_ref(endpoint, method)?;
        let name = component_name(reference);
        let schema = self.component_schema(&name).cloned();
        if schema.is_none() {
            tracing::debug!(%reference, "request body references an unknown component");
        }
        schema
    }

    fn path_item(&self, endpoint: &str) -> Option<&Value> {
        self.root.get("paths")?.get(endpoint)
    }
}

/// Strip the component prefix from a `$ref` and undo JSON-pointer escapes.
///
/// A reference without the prefix is returned unchanged, so it only
/// matches a component literally named like the whole reference.
fn component_name(reference: &str) -> String {
    let name = reference
        .strip_prefix(SCHEMA_REF_PREFIX)
        .unwrap_or(reference);
    name.replace("~1", "/").replace("~0", "~")
}

/// Convert YAML text into JSON, keeping mapping order and every key.
pub fn normalize(text: &str) -> Result<Value> {
    let mut yaml: Yaml = serde_yaml_ng::from_str(text).map_err(|e| CurlgenError::Parse {
        message: e.to_string(),
    })?;
    yaml.apply_merge().map_err(|e| CurlgenError::Parse {
        message: e.to_string(),
    })?;
    Ok(yaml_to_json(yaml))
}

fn yaml_to_json(yaml: Yaml) -> Value {
    match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(items.into_iter().map(yaml_to_json).collect()),
        Yaml::Mapping(mapping) => {
            let mut object = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                object.insert(key_to_string(key), yaml_to_json(value));
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

/// JSON object keys are strings; render scalar YAML keys the way `yq` does.
fn key_to_string(key: Yaml) -> String {
    match key {
        Yaml::String(s) => s,
        Yaml::Null => "null".to_string(),
        Yaml::Bool(b) => b.to_string(),
        Yaml::Number(n) => n.to_string(),
        Yaml::Tagged(tagged) => key_to_string(tagged.value),
        complex @ (Yaml::Sequence(_) | Yaml::Mapping(_)) => yaml_to_json(complex).to_string(),
    }
}

/// Render endpoints as a numbered list starting at 1, one per line.
#[must_use]
pub fn format_endpoint_list(endpoints: &[&str]) -> String {
    endpoints
        .iter()
        .enumerate()
        .map(|(i, endpoint)| format!("{:>2}. {endpoint}\n", i + 1))
        .collect()
}
