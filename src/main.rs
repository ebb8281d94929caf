mod cli;
mod config;
mod error;
mod matcher;
mod prompt;
mod session;
mod trello;

use std::process::ExitCode;

use error::Error;
use prompt::TerminalPrompter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let parsed = match cli::parse_args(&args) {
        Ok(parsed) => parsed,
        Err(err) => {
            println!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut prompter = TerminalPrompter;
    match cli::run(&parsed, &mut prompter).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

/// A failed fuzzy match gets the friendly listing; everything else prints
/// the error chain.
fn report(err: &anyhow::Error) {
    if let Some(Error::NoMatch { needle, available }) = err.downcast_ref::<Error>() {
        println!("\nNo matches found for '{needle}'");
        println!("Available options:");
        for name in available {
            println!("- {name}");
        }
        return;
    }
    eprintln!("Error: {err:#}");
}
