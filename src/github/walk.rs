// src/github/walk.rs
// =============================================================================
// Walks a repository tree through the contents API and collects the paths of
// files whose extension we care about.
//
// How it works:
// 1. Start with the root listing URL in a queue
// 2. Pop a URL, fetch that page of entries
// 3. Files with a matching extension go into the result list
// 4. Directories push their own listing URL onto the queue
// 5. A `Link: <...>; rel="next"` header pushes the next page onto the queue
// 6. Repeat until the queue is empty
//
// Using a queue instead of recursion keeps stack depth flat no matter how
// deeply the repository is nested. Requests run strictly one at a time.
//
// Rust concepts:
// - VecDeque: Double-ended queue used as the worklist
// - HashSet: Remember which URLs were already listed
// =============================================================================

use crate::github::client::{GitHubClient, GitHubError};
use crate::github::types::{ContentEntry, EntryType};
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info, warn};

/// Decides which file paths are kept, by case-sensitive suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    // Stored with the leading dot: ".js"
    suffixes: Vec<String>,
}

impl ExtensionFilter {
    /// Accepts extensions with or without the leading dot ("js" or ".js")
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let suffixes = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .map(|ext| format!(".{}", ext))
            .collect();

        Self { suffixes }
    }

    pub fn matches(&self, path: &str) -> bool {
        self.suffixes.iter().any(|suffix| path.ends_with(suffix.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }
}

// What to do with a single listing entry
#[derive(Debug, PartialEq, Eq)]
enum Visit {
    Collect(String),
    Descend(String),
    Skip,
}

fn classify(entry: ContentEntry, filter: &ExtensionFilter) -> Visit {
    // Entries without a path are skipped rather than treated as a fault
    let Some(path) = entry.path else {
        debug!("skipping entry without a path");
        return Visit::Skip;
    };

    match entry.entry_type {
        Some(EntryType::File) if filter.matches(&path) => Visit::Collect(path),
        Some(EntryType::Dir) => match entry.url {
            Some(url) => Visit::Descend(url),
            None => {
                warn!(path = %path, "directory entry has no listing URL, skipping");
                Visit::Skip
            }
        },
        _ => Visit::Skip,
    }
}

/// Lists every file under `start_url` whose path passes `filter`
///
/// Any failed request aborts the whole walk; no partial list is returned.
pub async fn walk(
    client: &GitHubClient,
    start_url: &str,
    filter: &ExtensionFilter,
) -> Result<Vec<String>, GitHubError> {
    let mut queue = VecDeque::new();
    queue.push_back(start_url.to_string());

    // A server that links a page to itself must not loop us forever
    let mut visited = HashSet::new();
    let mut paths = Vec::new();
    let mut pages = 0usize;

    while let Some(url) = queue.pop_front() {
        if !visited.insert(url.clone()) {
            continue;
        }

        info!(url = %url, "listing");
        let page = client.list_contents(&url).await?;
        pages += 1;

        for entry in page.entries {
            match classify(entry, filter) {
                Visit::Collect(path) => paths.push(path),
                Visit::Descend(dir_url) => queue.push_back(dir_url),
                Visit::Skip => {}
            }
        }

        if let Some(next) = page.next {
            queue.push_back(next);
        }
    }

    info!(pages, files = paths.len(), "walk finished");
    Ok(paths)
}
