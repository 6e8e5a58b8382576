use std::io;

use curlgen::{OpenAiProvider, PromptConfig};

pub(crate) fn run(spec_url: String, config: PromptConfig) {
    let mut stdout = io::stdout();
    let record = match super::explore_on_console(&spec_url, &mut stdout, Box::new(io::stdout())) {
        Ok(record) => record,
        Err(e) => {
            eprintln!("curlgen run: {e}");
            std::process::exit(1);
        }
    };

    println!("\nGenerating curl command...");
    let provider = match OpenAiProvider::from_env() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };
    let payload = match record.to_handoff() {
        Ok(json) => json,
        Err(e) => {
            eprintln!("curlgen run: {e}");
            std::process::exit(1);
        }
    };
    super::suggest::emit(&provider, Some(payload), &config);
}
