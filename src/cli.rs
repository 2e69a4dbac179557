// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Running `letter-census` with no subcommand scans a repository (the scan
// flags live directly on the top-level command). The `login` and `logout`
// subcommands manage a GitHub token stored in the OS keychain.
//
// Rust concepts:
// - #[command(flatten)]: Reuse one struct's arguments inside another
// - Option<Commands>: Subcommands are optional here
// - env = "...": Let a flag fall back to an environment variable
// =============================================================================

use clap::{Args, Parser, Subcommand};

/// Repository scanned when `--repo` is not given
pub const DEFAULT_REPO: &str = "lodash/lodash";

/// Branch used to build raw-content URLs
pub const DEFAULT_BRANCH: &str = "master";

/// GitHub REST API base
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Host that serves raw file contents
pub const DEFAULT_RAW_URL: &str = "https://raw.githubusercontent.com";

// This struct represents our entire CLI application
//
// args_conflicts_with_subcommands means `letter-census login --repo x` is
// rejected: scan flags only make sense without a subcommand.
#[derive(Parser, Debug)]
#[command(
    name = "letter-census",
    version = "0.1.0",
    about = "Count letter frequencies across the source files of a GitHub repository",
    long_about = "letter-census walks a GitHub repository through the contents API, downloads \
                  every file with a matching extension and prints how often each letter occurs.",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub scan: ScanArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store a GitHub token in the OS keychain
    ///
    /// Example: letter-census login --token ghp_xxx
    Login {
        /// Token to store (read from GITHUB_TOKEN if omitted)
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: String,
    },

    /// Remove the stored GitHub token from the OS keychain
    Logout,
}

/// Arguments for the default scan
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Repository to scan, as owner/name
    #[arg(long, env = "LETTER_CENSUS_REPO", default_value = DEFAULT_REPO)]
    pub repo: String,

    /// Branch (or any git ref) to read files from
    #[arg(long, env = "LETTER_CENSUS_BRANCH", default_value = DEFAULT_BRANCH)]
    pub branch: String,

    /// File extension to include, without the dot (repeatable)
    ///
    /// Matching is a case-sensitive suffix check: `--ext js` matches
    /// `index.js` but not `INDEX.JS`.
    #[arg(long = "ext", value_name = "EXT", default_values = ["js", "ts"])]
    pub extensions: Vec<String>,

    /// Start the walk from this contents-API URL instead of the repository root
    #[arg(long)]
    pub listing_url: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Base URL that serves raw file contents
    #[arg(long, default_value = DEFAULT_RAW_URL)]
    pub raw_url: String,

    /// GitHub token (falls back to the keychain entry written by `login`)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Per-request timeout in seconds (no timeout unless given)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Log and skip files that fail to download instead of aborting
    #[arg(long)]
    pub skip_failed: bool,

    /// Output results in JSON format instead of text lines
    #[arg(long)]
    pub json: bool,
}
