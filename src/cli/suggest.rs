use std::io::{self, Read};
use std::path::{Path, PathBuf};

use curlgen::{CurlgenError, LlmProvider, OpenAiProvider, PromptConfig};

pub(crate) fn run(payload: Option<String>, payload_file: Option<PathBuf>, config: PromptConfig) {
    let provider = match OpenAiProvider::from_env() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };
    tracing::debug!(model = %provider.model(), "model provider configured");

    let payload = match payload_file {
        Some(path) => match read_payload_file(&path) {
            Ok(text) => Some(text),
            Err(e) => {
                eprintln!("curlgen suggest: {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => payload,
    };
    emit(&provider, payload, &config);
}

/// Print the suggested command, or report why there is none.
///
/// Missing payload and model failures are reported and the run ends
/// normally.
pub(crate) fn emit(provider: &dyn LlmProvider, payload: Option<String>, config: &PromptConfig) {
    let payload = match curlgen::require_payload(payload) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };
    match curlgen::suggest(provider, &payload, config) {
        Ok(command) => {
            println!("Generated curl command:");
            println!("{command}");
        }
        Err(e) => {
            if let CurlgenError::Model(err) = &e {
                tracing::debug!(retryable = err.is_retryable(), "model call failed");
            }
            eprintln!("An error occurred: {e}");
        }
    }
}

fn read_payload_file(path: &Path) -> io::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
    }
}
