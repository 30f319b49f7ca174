//! YesPlan harvesting CLI binary.
//!
//! Fetches every collection, prints previews and a summary, and writes the
//! results to a JSON file.

use std::io;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::Level;
use yesplan::cli::Cli;
use yesplan::{banner, Harvester, YesplanClient, YesplanError, API_KEY_ENV};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let client = match build_client(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            if matches!(e, YesplanError::ConfigMissing(_)) {
                eprintln!("Hint: Set {API_KEY_ENV} environment variable");
            }
            return ExitCode::FAILURE;
        }
    };

    let harvester = Harvester::new()
        .endpoints(&cli.endpoints)
        .preview_limit(cli.limit)
        .output(cli.output);

    println!("{}", banner(client.base_url().as_str()));

    let mut stdout = io::stdout().lock();
    match harvester.run(&client, &mut stdout).await {
        // endpoint failures are reported in the summary, not the exit code
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn build_client(cli: &Cli) -> yesplan::Result<YesplanClient> {
    let api_key = cli.api_key.as_deref().unwrap_or_default();
    YesplanClient::with_timeout(api_key, &cli.base_url, Duration::from_secs(cli.timeout))
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}
