// src/census/aggregate.rs
// =============================================================================
// Downloads each collected file from the raw-content host and folds its text
// into one shared LetterTable.
//
// Files are fetched one after another, in the order the walk found them.
// The same path listed twice is counted twice.
// =============================================================================

use crate::census::{count_letters, LetterTable};
use crate::github::{GitHubClient, GitHubError};
use tracing::{info, warn};
use url::Url;

/// What happens when one file cannot be downloaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the run on the first failure
    Abort,
    /// Log the failure and keep going with the remaining files
    Skip,
}

/// Builds `<base>/<path>`, percent-encoding each path segment
pub fn content_url(base: &Url, path: &str) -> Result<Url, GitHubError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| GitHubError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(path.split('/').filter(|segment| !segment.is_empty()));
    Ok(url)
}

/// Fetches every path below `content_base` and counts its letters
pub async fn aggregate(
    client: &GitHubClient,
    paths: &[String],
    content_base: &Url,
    policy: FailurePolicy,
) -> Result<LetterTable, GitHubError> {
    let mut table = LetterTable::new();
    let mut skipped = 0usize;

    for (index, path) in paths.iter().enumerate() {
        let url = content_url(content_base, path)?;
        info!(file = %path, "downloading {}/{}", index + 1, paths.len());

        match client.fetch_text(url.as_str()).await {
            Ok(text) => count_letters(&text, &mut table),
            Err(e) if policy == FailurePolicy::Skip => {
                warn!(file = %path, error = %e, "skipping file");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    if skipped > 0 {
        warn!(skipped, "some files could not be downloaded");
    }

    Ok(table)
}
