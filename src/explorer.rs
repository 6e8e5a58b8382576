//! Interactive selection of one operation from a spec document.
//!
//! The flow is linear: fetch, normalize, pick an endpoint, pick a method,
//! resolve the request schema, assemble the record. Nothing loops back; a
//! bad answer ends the run with [`CurlgenError::Selection`].

use std::io::{BufRead, Write};

use crate::document::{format_endpoint_list, ApiDocument};
use crate::errors::{CurlgenError, Result};
use crate::fetch::fetch_spec;
use crate::models::OperationSelection;

const ENDPOINT_PROMPT: &str = "Enter the number of the endpoint you want to use";
const METHOD_PROMPT: &str = "Enter the method you want to use (e.g., get, post, delete)";

/// Path item keys that name an operation.
const OPERATION_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Source of answers to the explorer's questions.
pub trait Prompter {
    /// Show `prompt` and return the user's answer without its line ending.
    fn ask(&mut self, prompt: &str) -> Result<String>;
}

/// Reads answers line by line. Used when stdin is not a terminal.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}: ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CurlgenError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Terminal prompts rendered by `dialoguer`.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        Ok(dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?)
    }
}

/// Map a 1-based index typed by the user to an endpoint.
pub fn select_endpoint<'a>(endpoints: &[&'a str], answer: &str) -> Result<&'a str> {
    if endpoints.is_empty() {
        return Err(CurlgenError::Selection {
            message: "the document declares no endpoints".to_string(),
        });
    }
    let out_of_range = || CurlgenError::Selection {
        message: format!(
            "'{}' is not an endpoint number between 1 and {}",
            answer.trim(),
            endpoints.len()
        ),
    };
    let index: usize = answer.trim().parse().map_err(|_| out_of_range())?;
    index
        .checked_sub(1)
        .and_then(|i| endpoints.get(i))
        .copied()
        .ok_or_else(out_of_range)
}

/// Lower-case the typed method and check it is an operation declared under
/// `endpoint`.
///
/// Path items also carry keys such as `parameters` or `summary`; those are
/// listed but never accepted.
pub fn select_method(doc: &ApiDocument, endpoint: &str, answer: &str) -> Result<String> {
    let method = answer.trim().to_lowercase();
    let operations: Vec<&str> = doc
        .methods(endpoint)
        .into_iter()
        .filter(|key| OPERATION_METHODS.contains(key))
        .collect();
    if operations.contains(&method.as_str()) {
        return Ok(method);
    }
    let message = if OPERATION_METHODS.contains(&method.as_str()) {
        format!("'{method}' is not declared for {endpoint}")
    } else {
        format!("'{method}' is not an HTTP method")
    };
    Err(CurlgenError::Selection {
        message: format!("{message} (available: {})", operations.join(", ")),
    })
}

/// Build the record for a chosen operation.
#[must_use]
pub fn assemble(doc: &ApiDocument, endpoint: &str, method: &str) -> OperationSelection {
    let baseurl = match doc.base_url() {
        Some(url) => url.to_string(),
        None => {
            tracing::warn!("document declares no server URL; baseurl left empty");
            String::new()
        }
    };
    OperationSelection {
        method: method.to_string(),
        endpoint: endpoint.to_string(),
        baseurl,
        schema: doc.resolve_schema(endpoint, method),
    }
}

/// Walk the user through picking one operation of `doc`.
///
/// Listings and the final record are written to `out`; answers come from
/// `prompter`.
pub fn explore(
    doc: &ApiDocument,
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
) -> Result<OperationSelection> {
    let baseurl = doc.base_url().unwrap_or_default();
    writeln!(out, "Base URL: {baseurl}")?;

    let endpoints = doc.endpoints();
    writeln!(out, "\nAvailable Endpoints:")?;
    write!(out, "{}", format_endpoint_list(&endpoints))?;

    writeln!(out)?;
    out.flush()?;
    let answer = prompter.ask(ENDPOINT_PROMPT)?;
    let endpoint = select_endpoint(&endpoints, &answer)?;
    writeln!(out, "Selected endpoint: {endpoint}")?;
    tracing::debug!(%endpoint, "endpoint selected");

    writeln!(out, "\nAvailable methods for {endpoint}:")?;
    for method in doc.methods(endpoint) {
        writeln!(out, "{method}")?;
    }

    writeln!(out)?;
    out.flush()?;
    let answer = prompter.ask(METHOD_PROMPT)?;
    let method = select_method(doc, endpoint, &answer)?;
    tracing::debug!(%method, "method selected");

    let record = assemble(doc, endpoint, &method);
    writeln!(out, "\nGenerated selection record:\n")?;
    writeln!(out, "{}", record.to_handoff()?)?;
    out.flush()?;
    Ok(record)
}

/// Fetch the document at `url`, normalize it, then run [`explore`].
pub fn explore_url(
    url: &str,
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
) -> Result<OperationSelection> {
    writeln!(out, "Downloading OpenAPI spec from {url}...")?;
    out.flush()?;
    let text = fetch_spec(url)?;

    writeln!(out, "Converting YAML to JSON...")?;
    let doc = ApiDocument::parse(&text)?;
    tracing::debug!(endpoints = doc.endpoints().len(), "spec document normalized");

    explore(&doc, prompter, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    /// Answers prompts from a fixed list and records what was asked.
    struct ScriptedPrompter {
        answers: Vec<&'static str>,
        asked: Vec<String>,
    }

    impl ScriptedPrompter {
        fn new(answers: &[&'static str]) -> Self {
            Self {
                answers: answers.iter().rev().copied().collect(),
                asked: Vec::new(),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn ask(&mut self, prompt: &str) -> Result<String> {
            self.asked.push(prompt.to_string());
            self.answers
                .pop()
                .map(str::to_string)
                .ok_or(CurlgenError::InputClosed)
        }
    }

    fn scenario_doc() -> ApiDocument {
        ApiDocument::from_value(json!({
            "servers": [{"url": "https://api.example.com/v1"}],
            "paths": {
                "/models": {"get": {"operationId": "listModels"}},
                "/chat/completions": {
                    "post": {
                        "requestBody": {"content": {"application/json": {
                            "schema": {"$ref": "#/components/schemas/CreateChatCompletionRequest"}
                        }}}
                    }
                }
            },
            "components": {"schemas": {
                "CreateChatCompletionRequest": {
                    "type": "object",
                    "required": ["model", "messages"]
                }
            }}
        }))
    }

    #[test]
    fn scenario_chat_completions_post() {
        let doc = scenario_doc();
        let mut prompter = ScriptedPrompter::new(&["2", "post"]);
        let mut out = Vec::<u8>::new();
        let record = explore(&doc, &mut prompter, &mut out).unwrap();
        assert_eq!(
            record,
            OperationSelection {
                method: "post".to_string(),
                endpoint: "/chat/completions".to_string(),
                baseurl: "https://api.example.com/v1".to_string(),
                schema: Some(json!({"type": "object", "required": ["model", "messages"]})),
            }
        );
        assert_eq!(prompter.asked, vec![ENDPOINT_PROMPT, METHOD_PROMPT]);
    }

    #[test]
    fn transcript_lists_endpoints_and_methods() {
        let doc = scenario_doc();
        let mut prompter = ScriptedPrompter::new(&["2", "POST"]);
        let mut out = Vec::<u8>::new();
        explore(&doc, &mut prompter, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Base URL: https://api.example.com/v1"));
        assert!(text.contains(" 1. /models\n 2. /chat/completions\n"));
        assert!(text.contains("Selected endpoint: /chat/completions"));
        assert!(text.contains("Available methods for /chat/completions:\npost\n"));
        assert!(text.contains("\"endpoint\": \"/chat/completions\""));
    }

    #[test]
    fn operation_without_body_has_absent_schema() {
        let doc = scenario_doc();
        let mut prompter = ScriptedPrompter::new(&["1", "get"]);
        let record = explore(&doc, &mut prompter, &mut Vec::<u8>::new()).unwrap();
        assert_eq!(record.endpoint, "/models");
        assert_eq!(record.method, "get");
        assert!(record.schema.is_none());
    }

    #[test]
    fn method_is_case_folded() {
        let doc = scenario_doc();
        assert_eq!(select_method(&doc, "/models", " GeT ").unwrap(), "get");
    }

    #[test]
    fn undeclared_method_is_rejected() {
        let doc = scenario_doc();
        let err = select_method(&doc, "/models", "delete").unwrap_err();
        match err {
            CurlgenError::Selection { message } => {
                assert!(message.contains("delete"));
                assert!(message.contains("available: get"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_operation_keys_are_rejected() {
        let doc = ApiDocument::from_value(json!({
            "paths": {"/files": {
                "summary": "Files",
                "parameters": [{"name": "purpose", "in": "query"}],
                "get": {},
                "post": {}
            }}
        }));
        assert_eq!(
            doc.methods("/files"),
            vec!["summary", "parameters", "get", "post"]
        );
        for key in ["Parameters", "summary"] {
            match select_method(&doc, "/files", key).unwrap_err() {
                CurlgenError::Selection { message } => {
                    assert!(message.contains("is not an HTTP method"), "{message}");
                    assert!(message.ends_with("(available: get, post)"), "{message}");
                }
                other => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(select_method(&doc, "/files", "POST").unwrap(), "post");
    }

    #[test]
    fn non_operation_key_ends_run_without_record() {
        let doc = ApiDocument::from_value(json!({
            "paths": {"/files": {"parameters": [], "get": {}}}
        }));
        let mut prompter = ScriptedPrompter::new(&["1", "parameters"]);
        let mut out = Vec::<u8>::new();
        let err = explore(&doc, &mut prompter, &mut out).unwrap_err();
        assert!(matches!(err, CurlgenError::Selection { .. }));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Available methods for /files:\nparameters\nget\n"));
        assert!(!text.contains("Generated selection record"));
    }

    #[test]
    fn endpoint_index_bounds() {
        let endpoints = ["/a", "/b", "/c"];
        assert_eq!(select_endpoint(&endpoints, "1").unwrap(), "/a");
        assert_eq!(select_endpoint(&endpoints, " 3 ").unwrap(), "/c");
        assert!(select_endpoint(&endpoints, "0").is_err());
        assert!(select_endpoint(&endpoints, "4").is_err());
        assert!(select_endpoint(&endpoints, "-1").is_err());
        assert!(select_endpoint(&endpoints, "two").is_err());
        assert!(select_endpoint(&endpoints, "").is_err());
    }

    #[test]
    fn no_endpoints_is_a_selection_error() {
        let err = select_endpoint(&[], "1").unwrap_err();
        assert!(err.to_string().contains("no endpoints"));
    }

    #[test]
    fn out_of_range_index_ends_run() {
        let doc = scenario_doc();
        let mut prompter = ScriptedPrompter::new(&["9", "get"]);
        let err = explore(&doc, &mut prompter, &mut Vec::<u8>::new()).unwrap_err();
        assert!(matches!(err, CurlgenError::Selection { .. }));
        assert_eq!(prompter.asked.len(), 1, "method prompt must not be shown");
    }

    #[test]
    fn missing_server_leaves_baseurl_empty() {
        let doc = ApiDocument::from_value(json!({"paths": {"/x": {"get": {}}}}));
        let record = assemble(&doc, "/x", "get");
        assert_eq!(record.baseurl, "");
    }

    #[test]
    fn baseurl_is_first_server_entry() {
        let doc = ApiDocument::from_value(json!({
            "servers": [{"url": "https://one"}, {"url": "https://two"}],
            "paths": {"/x": {"get": {}}}
        }));
        assert_eq!(assemble(&doc, "/x", "get").baseurl, "https://one");
    }

    #[test]
    fn line_prompter_reads_lines() {
        let mut output = Vec::new();
        let mut p = LinePrompter::new(Cursor::new("2\r\npost\n"), &mut output);
        assert_eq!(p.ask("First").unwrap(), "2");
        assert_eq!(p.ask("Second").unwrap(), "post");
        assert!(matches!(p.ask("Third"), Err(CurlgenError::InputClosed)));
        drop(p);
        assert_eq!(String::from_utf8(output).unwrap(), "First: Second: Third: ");
    }
}
