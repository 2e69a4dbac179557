// src/scan.rs
// =============================================================================
// Runs one full scan: walk the repository, then download and count.
//
// The walk finishes completely before the first file is downloaded. Any
// failure in either phase ends the scan with an error (unless --skip-failed
// relaxes the download phase).
// =============================================================================

use crate::census::{self, LetterTable};
use crate::config::Settings;
use crate::github::{self, GitHubClient};
use anyhow::{Context, Result};
use tracing::info;

pub async fn run_scan(settings: &Settings) -> Result<LetterTable> {
    let client = GitHubClient::new(settings.token.as_deref(), settings.timeout)?;

    info!(repo = %settings.repo, "walking repository");
    let paths = github::walk(&client, settings.listing_url.as_str(), &settings.extensions)
        .await
        .context("Failed to list repository files")?;

    if paths.is_empty() {
        info!("no matching files found");
        return Ok(LetterTable::new());
    }

    info!(files = paths.len(), "counting letters");
    let table = census::aggregate(&client, &paths, &settings.content_base, settings.failure_policy)
        .await
        .context("Failed to download file contents")?;

    info!(letters = table.len(), total = table.total(), "scan finished");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::report::{render, OutputFormat};
    use clap::Parser;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings_for(mock_server: &MockServer) -> Settings {
        let uri = mock_server.uri();
        let listing = format!("{}/repos/o/r/contents", uri);
        let cli = Cli::try_parse_from([
            "letter-census",
            "--repo",
            "o/r",
            "--branch",
            "main",
            "--listing-url",
            listing.as_str(),
            "--raw-url",
            uri.as_str(),
        ])
        .unwrap();
        Settings::from_args(&cli.scan, None).unwrap()
    }

    async fn mount_tree(mock_server: &MockServer) {
        let uri = mock_server.uri();

        Mock::given(method("GET"))
            .and(path("/repos/o/r/contents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"path": "a.js", "type": "file"},
                {"path": "README.md", "type": "file"},
                {"path": "sub", "type": "dir", "url": format!("{}/repos/o/r/contents/sub", uri)}
            ])))
            .mount(mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/repos/o/r/contents/sub"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"path": "sub/b.ts", "type": "file"}
            ])))
            .mount(mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/o/r/main/a.js"))
            .respond_with(ResponseTemplate::new(200).set_body_string("aab"))
            .mount(mock_server)
            .await;
    }

    #[tokio::test]
    async fn test_end_to_end_report() {
        let mock_server = MockServer::start().await;
        mount_tree(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/o/r/main/sub/b.ts"))
            .respond_with(ResponseTemplate::new(200).set_body_string("bbc"))
            .mount(&mock_server)
            .await;

        let settings = settings_for(&mock_server);
        let table = run_scan(&settings).await.unwrap();

        assert_eq!(
            render(&table, OutputFormat::Text).unwrap(),
            "Letter Frequency:\nb: 3\na: 2\nc: 1"
        );
    }

    #[tokio::test]
    async fn test_missing_file_aborts_scan() {
        let mock_server = MockServer::start().await;
        mount_tree(&mock_server).await;

        let settings = settings_for(&mock_server);
        let err = run_scan(&settings).await.unwrap_err();

        let message = format!("{:#}", err);
        assert!(message.starts_with("Failed to download file contents"));
        assert!(message.contains("404"));
    }

    #[tokio::test]
    async fn test_listing_failure_aborts_scan() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/o/r/contents"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let err = run_scan(&settings_for(&mock_server)).await.unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.starts_with("Failed to list repository files"));
        assert!(message.contains("500"));
    }

    #[tokio::test]
    async fn test_repository_without_matches() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/o/r/contents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"path": "setup.py", "type": "file"}
            ])))
            .mount(&mock_server)
            .await;

        let table = run_scan(&settings_for(&mock_server)).await.unwrap();
        assert!(table.is_empty());
    }
}
