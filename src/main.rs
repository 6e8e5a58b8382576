use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

fn main() {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose);
    cli::run(cli);
}

/// Log to stderr so stdout only carries the transcript and the command.
///
/// `CURLGEN_LOG` sets the filter; `-v` and `-vv` override it.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env("CURLGEN_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("curlgen=debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
