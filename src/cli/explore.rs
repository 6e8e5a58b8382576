use std::io;

/// Transcript goes to stderr so stdout carries only the hand-off JSON.
pub(crate) fn run(spec_url: String) {
    let mut transcript = io::stderr();
    match super::explore_on_console(&spec_url, &mut transcript, Box::new(io::stderr())) {
        Ok(record) => match record.to_handoff() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("curlgen explore: {e}");
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("curlgen explore: {e}");
            std::process::exit(1);
        }
    }
}
