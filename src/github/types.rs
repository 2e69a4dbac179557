// src/github/types.rs
// =============================================================================
// Data types for the GitHub contents API and repository identifiers.
//
// A GET on /repos/{owner}/{repo}/contents/{dir} returns a JSON array with one
// object per child. We only keep the three fields the walk needs; serde
// ignores the rest (sha, size, html_url, ...).
//
// Rust concepts:
// - serde derive: Turn JSON objects into Rust structs
// - Option<T>: Fields the API may omit or send as null
// - FromStr: Parse a type from a string with "owner/repo".parse()
// =============================================================================

use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// One child of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentEntry {
    /// Path relative to the repository root (e.g. "src/index.js")
    pub path: Option<String>,

    /// What kind of entry this is; missing or null means "unknown"
    #[serde(rename = "type")]
    pub entry_type: Option<EntryType>,

    /// Contents-API URL of this entry (used to list directories)
    pub url: Option<String>,
}

/// The `type` field of a listing entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Dir,
    Symlink,
    Submodule,
    /// Anything GitHub adds in the future
    #[serde(other)]
    Other,
}

/// A repository identified by owner and name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

// Supported formats:
//   - owner/repo
//   - https://github.com/owner/repo
//   - https://github.com/owner/repo.git
//   - github.com/owner/repo/tree/main (anything after the name is ignored)
impl FromStr for RepoSlug {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self> {
        let input = input.trim();
        let without_scheme = input
            .trim_start_matches("https://")
            .trim_start_matches("http://");
        let had_scheme = without_scheme.len() != input.len();
        let host_relative = without_scheme.trim_start_matches("www.");

        let path = match host_relative.strip_prefix("github.com/") {
            Some(path) => path,
            None if had_scheme => return Err(anyhow!("Not a GitHub URL: {}", input)),
            None => host_relative,
        };

        let mut parts = path.split('/').filter(|p| !p.is_empty());
        let (owner, name) = match (parts.next(), parts.next()) {
            (Some(owner), Some(name)) => (owner, name.trim_end_matches(".git")),
            _ => return Err(anyhow!("Invalid repository '{}': expected owner/name", input)),
        };

        // GitHub owners are alphanumerics and hyphens only
        let owner_ok = owner.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !owner_ok || name.is_empty() {
            return Err(anyhow!("Invalid repository '{}': expected owner/name", input));
        }

        Ok(RepoSlug {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
