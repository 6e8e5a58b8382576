use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use curlgen::{LinePrompter, OperationSelection, PromptConfig, TerminalPrompter};

mod explore;
mod run;
mod suggest;

#[derive(Parser)]
#[command(
    name = "curlgen",
    version,
    about = "Pick an OpenAPI operation and let a chat model draft the curl command"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Show project information
    #[arg(long)]
    about: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Where the spec document comes from.
#[derive(Args, Clone)]
struct SpecSource {
    /// URL of the OpenAPI YAML document
    #[arg(long, default_value = curlgen::DEFAULT_SPEC_URL)]
    spec_url: String,
}

impl Default for SpecSource {
    fn default() -> Self {
        Self {
            spec_url: curlgen::DEFAULT_SPEC_URL.to_string(),
        }
    }
}

/// Wording of the instruction sent to the model.
#[derive(Args, Clone, Default)]
struct PromptArgs {
    /// Model the suggested command should use [default: gpt-4o]
    #[arg(long)]
    recommend_model: Option<String>,
    /// Model the suggested command should use for embeddings [default: text-embedding-ada-002]
    #[arg(long)]
    embedding_model: Option<String>,
    /// Leave out the instruction to double-check shell quoting
    #[arg(long)]
    no_quoting_check: bool,
}

impl From<PromptArgs> for PromptConfig {
    fn from(args: PromptArgs) -> Self {
        let defaults = PromptConfig::default();
        PromptConfig {
            chat_model: args.recommend_model.unwrap_or(defaults.chat_model),
            embedding_model: args.embedding_model.unwrap_or(defaults.embedding_model),
            credential_var: defaults.credential_var,
            quoting_check: !args.no_quoting_check,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Pick an operation, then suggest a curl command for it (default)
    Run {
        #[command(flatten)]
        source: SpecSource,
        #[command(flatten)]
        prompt: PromptArgs,
    },
    /// Pick an operation and print its selection record as JSON
    Explore {
        #[command(flatten)]
        source: SpecSource,
    },
    /// Suggest a curl command for a selection record produced by `explore`
    Suggest {
        /// Selection record JSON
        #[arg(long, conflicts_with = "payload_file")]
        payload: Option<String>,
        /// File holding the selection record JSON (`-` for stdin)
        #[arg(long)]
        payload_file: Option<PathBuf>,
        #[command(flatten)]
        prompt: PromptArgs,
    },
}

pub fn run(cli: Cli) {
    if cli.about {
        print_about();
        return;
    }

    match cli.command {
        Some(Commands::Run { source, prompt }) => run::run(source.spec_url, prompt.into()),
        Some(Commands::Explore { source }) => explore::run(source.spec_url),
        Some(Commands::Suggest {
            payload,
            payload_file,
            prompt,
        }) => suggest::run(payload, payload_file, prompt.into()),
        None => run::run(
            SpecSource::default().spec_url,
            PromptArgs::default().into(),
        ),
    }
}

fn print_about() {
    println!(
        "curlgen: OpenAPI operation to curl command\n\
         ├─ version:    {}\n\
         ├─ spec:       {}\n\
         └─ licence:    {} https://www.apache.org/licenses/LICENSE-2.0",
        env!("CARGO_PKG_VERSION"),
        curlgen::DEFAULT_SPEC_URL,
        env!("CARGO_PKG_LICENSE"),
    );
}

/// Run the explorer against the console.
///
/// A terminal gets `dialoguer` prompts; piped input is read line by line
/// with prompts written to `prompt_out`.
fn explore_on_console(
    spec_url: &str,
    out: &mut dyn Write,
    prompt_out: Box<dyn Write>,
) -> curlgen::Result<OperationSelection> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        curlgen::explore_url(spec_url, &mut TerminalPrompter, out)
    } else {
        let mut prompter = LinePrompter::new(stdin.lock(), prompt_out);
        curlgen::explore_url(spec_url, &mut prompter, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn prompt_args_default_to_prompt_config_default() {
        let config: PromptConfig = PromptArgs::default().into();
        assert_eq!(config, PromptConfig::default());
    }

    #[test]
    fn prompt_args_override_models() {
        let config: PromptConfig = PromptArgs {
            recommend_model: Some("gpt-4.1".to_string()),
            embedding_model: None,
            no_quoting_check: true,
        }
        .into();
        assert_eq!(config.chat_model, "gpt-4.1");
        assert_eq!(config.embedding_model, "text-embedding-ada-002");
        assert!(!config.quoting_check);
    }
}
