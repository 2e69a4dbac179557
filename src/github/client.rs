// src/github/client.rs
// =============================================================================
// A thin wrapper around reqwest for talking to GitHub.
//
// Every request carries:
// - User-Agent: letter-census (GitHub rejects requests without one)
// - Accept: application/vnd.github.v3+json
// - Authorization: token <value> (only when a token was configured)
//
// The token is handed to `GitHubClient::new` by the caller. The client never
// looks it up by itself.
//
// Rust concepts:
// - thiserror: Derive Display/Error for our own error enum
// - HeaderMap: Default headers applied to every request
// =============================================================================

use crate::github::pagination::next_page_url;
use crate::github::types::ContentEntry;
use reqwest::{header, Client, Response, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const USER_AGENT: &str = "letter-census";

/// Everything that can go wrong while talking to GitHub
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("could not parse directory listing from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid URL '{0}'")]
    InvalidUrl(String),

    #[error("invalid GitHub token: {0}")]
    InvalidToken(String),

    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// One page of a directory listing
#[derive(Debug)]
pub struct ListingPage {
    pub entries: Vec<ContentEntry>,
    /// URL of the following page, from the `Link` header
    pub next: Option<String>,
}

pub struct GitHubClient {
    http: Client,
}

impl GitHubClient {
    /// Builds a client that sends `token` (if any) with every request
    ///
    /// Without a `timeout` requests may wait as long as the server keeps the
    /// connection open.
    pub fn new(token: Option<&str>, timeout: Option<Duration>) -> Result<Self, GitHubError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let mut value = header::HeaderValue::from_str(&format!("token {}", token))
                .map_err(|e| GitHubError::InvalidToken(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(GitHubError::Client)?;

        Ok(Self { http })
    }

    /// Fetches one page of a contents-API directory listing
    pub async fn list_contents(&self, url: &str) -> Result<ListingPage, GitHubError> {
        let response = self.get(url).await?;

        // Link may be split over several header lines
        let next = response
            .headers()
            .get_all(header::LINK)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(next_page_url);

        let body = response.text().await.map_err(|source| GitHubError::Request {
            url: url.to_string(),
            source,
        })?;

        let entries: Vec<ContentEntry> =
            serde_json::from_str(&body).map_err(|source| GitHubError::Parse {
                url: url.to_string(),
                source,
            })?;

        debug!(url, entries = entries.len(), has_next = next.is_some(), "listing page");
        Ok(ListingPage { entries, next })
    }

    /// Downloads a URL and returns its body as text
    pub async fn fetch_text(&self, url: &str) -> Result<String, GitHubError> {
        let response = self.get(url).await?;
        let text = response.text().await.map_err(|source| GitHubError::Request {
            url: url.to_string(),
            source,
        })?;

        debug!(url, bytes = text.len(), "fetched file");
        Ok(text)
    }

    // Sends a GET and turns any non-2xx status into GitHubError::Status
    async fn get(&self, url: &str) -> Result<Response, GitHubError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| GitHubError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GitHubError::Status {
                url: url.to_string(),
                status,
            });
        }

        Ok(response)
    }
}
