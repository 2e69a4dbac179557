// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (stderr, filtered by RUST_LOG)
// 2. Parse command-line arguments using clap
// 3. Dispatch to a scan, `login` or `logout`
// 4. Print the report, or a single "An error occurred" line
//
// stdout only ever carries the report (or the error line). Progress and
// diagnostics go through `tracing` to stderr. The process exits normally in
// both the success and the failure case.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod census;        // src/census/ - letter counting and aggregation
mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - validated settings
mod credentials;   // src/credentials.rs - keychain token storage
mod github;        // src/github/ - GitHub client and tree walk
mod report;        // src/report.rs - output formatting
mod scan;          // src/scan.rs - walk + aggregate

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, ScanArgs};
use config::Settings;
use credentials::CredentialStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    let outcome = run().await;
    println!("{}", render_outcome(outcome));
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("letter_census=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// Maps the result of a command to exactly what goes on stdout
//
// Errors become one line: {:#} prints the whole context chain joined by ": ",
// and any newline inside a source error is folded into a space.
fn render_outcome(outcome: Result<String>) -> String {
    match outcome {
        Ok(output) => output,
        Err(e) => {
            let message = format!("{:#}", e);
            format!("An error occurred: {}", message.lines().collect::<Vec<_>>().join(" "))
        }
    }
}

async fn run() -> Result<String> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Login { token }) => handle_login(&token),
        Some(Commands::Logout) => handle_logout(),
        None => handle_scan(&cli.scan).await,
    }
}

async fn handle_scan(args: &ScanArgs) -> Result<String> {
    let token = config::resolve_token(args.token.clone(), CredentialStore::retrieve_token);
    scan_report(args, token).await
}

async fn scan_report(args: &ScanArgs, token: Option<String>) -> Result<String> {
    let settings = Settings::from_args(args, token)?;
    let table = scan::run_scan(&settings).await?;
    report::render(&table, settings.output)
}

fn handle_login(token: &str) -> Result<String> {
    let token = token.trim();
    if token.is_empty() {
        anyhow::bail!("Token cannot be empty");
    }

    CredentialStore::store_token(token)?;
    Ok("Token stored in the OS keychain".to_string())
}

fn handle_logout() -> Result<String> {
    if CredentialStore::delete_token()? {
        Ok("Token removed from the OS keychain".to_string())
    } else {
        Ok("No stored token to remove".to_string())
    }
}
