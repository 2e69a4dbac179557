// src/config.rs
// =============================================================================
// Turns parsed command-line arguments into a validated `Settings` value.
//
// Settings is built once in main and passed down by reference. Nothing here
// is global: the GitHub token in particular only ever lives inside Settings
// and the HTTP client built from it.
//
// Token lookup order:
// 1. --token flag (or GITHUB_TOKEN, which clap maps onto the same flag)
// 2. The OS keychain entry written by `letter-census login`
// 3. No token: requests go out unauthenticated (lower rate limit)
// =============================================================================

use crate::census::FailurePolicy;
use crate::cli::ScanArgs;
use crate::credentials::CredentialError;
use crate::github::{ExtensionFilter, RepoSlug};
use crate::report::OutputFormat;
use anyhow::{anyhow, bail, Context, Result};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

#[derive(Debug, Clone)]
pub struct Settings {
    pub repo: RepoSlug,
    /// Where the walk starts
    pub listing_url: Url,
    /// Raw file URLs are `<content_base>/<path>`
    pub content_base: Url,
    pub extensions: ExtensionFilter,
    pub token: Option<String>,
    /// None leaves reqwest's default (no timeout)
    pub timeout: Option<Duration>,
    pub failure_policy: FailurePolicy,
    pub output: OutputFormat,
}

impl Settings {
    pub fn from_args(args: &ScanArgs, token: Option<String>) -> Result<Self> {
        let repo: RepoSlug = args.repo.parse()?;

        let branch = args.branch.trim();
        if branch.is_empty() {
            bail!("Branch name cannot be empty");
        }

        let extensions = ExtensionFilter::new(&args.extensions);
        if extensions.is_empty() {
            bail!("At least one non-empty --ext is required");
        }

        let listing_url = match &args.listing_url {
            Some(url) => parse_base_url(url, "--listing-url")?,
            None => {
                let mut url = parse_base_url(&args.api_url, "--api-url")?;
                extend_path(&mut url, ["repos", repo.owner.as_str(), repo.name.as_str(), "contents"])?;
                url.query_pairs_mut().append_pair("ref", branch);
                url
            }
        };

        let mut content_base = parse_base_url(&args.raw_url, "--raw-url")?;
        extend_path(&mut content_base, [repo.owner.as_str(), repo.name.as_str()])?;
        extend_path(&mut content_base, branch.split('/'))?;

        Ok(Settings {
            repo,
            listing_url,
            content_base,
            extensions,
            token: token
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            timeout: args.timeout.map(Duration::from_secs),
            failure_policy: if args.skip_failed {
                FailurePolicy::Skip
            } else {
                FailurePolicy::Abort
            },
            output: if args.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
        })
    }
}

/// Picks the explicit token if there is one, otherwise asks the keychain
///
/// A keychain that cannot be read is logged and treated as "no token".
pub fn resolve_token<F>(explicit: Option<String>, stored: F) -> Option<String>
where
    F: FnOnce() -> Result<Option<String>, CredentialError>,
{
    let explicit = explicit
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    if let Some(token) = explicit {
        debug!("using token from --token / GITHUB_TOKEN");
        return Some(token);
    }

    match stored() {
        Ok(Some(token)) => {
            debug!("using token from keychain");
            Some(token)
        }
        Ok(None) => {
            debug!("no GitHub token configured, sending unauthenticated requests");
            None
        }
        Err(e) => {
            warn!(error = %e, "could not read token from keychain, continuing without one");
            None
        }
    }
}

fn parse_base_url(raw: &str, flag: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("Invalid {} '{}'", flag, raw))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("Invalid {} '{}': only http and https are supported", flag, raw);
    }
    Ok(url)
}

fn extend_path<'a, I>(url: &mut Url, segments: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let display = url.to_string();
    url.path_segments_mut()
        .map_err(|_| anyhow!("URL '{}' cannot have a path", display))?
        .pop_if_empty()
        .extend(segments.into_iter().filter(|s| !s.is_empty()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn args(extra: &[&str]) -> ScanArgs {
        let mut argv = vec!["letter-census"];
        argv.extend_from_slice(extra);
        Cli::try_parse_from(argv).unwrap().scan
    }

    #[test]
    fn test_default_urls() {
        let settings = Settings::from_args(
            &args(&["--repo", "lodash/lodash", "--branch", "master", "--api-url", "https://api.github.com"]),
            None,
        )
        .unwrap();

        assert_eq!(
            settings.listing_url.as_str(),
            "https://api.github.com/repos/lodash/lodash/contents?ref=master"
        );
        assert_eq!(
            settings.content_base.as_str(),
            "https://raw.githubusercontent.com/lodash/lodash/master"
        );
        assert_eq!(settings.failure_policy, FailurePolicy::Abort);
        assert_eq!(settings.output, OutputFormat::Text);
        assert!(settings.extensions.matches("a.ts"));
    }

    #[test]
    fn test_enterprise_api_url_and_nested_branch() {
        let settings = Settings::from_args(
            &args(&[
                "--repo",
                "https://github.com/acme/widgets.git",
                "--branch",
                "release/2.x",
                "--api-url",
                "https://ghe.example.com/api/v3/",
                "--raw-url",
                "https://raw.example.com/",
            ]),
            None,
        )
        .unwrap();

        assert_eq!(
            settings.listing_url.as_str(),
            "https://ghe.example.com/api/v3/repos/acme/widgets/contents?ref=release%2F2.x"
        );
        assert_eq!(
            settings.content_base.as_str(),
            "https://raw.example.com/acme/widgets/release/2.x"
        );
    }

    #[test]
    fn test_listing_url_override_and_flags() {
        let settings = Settings::from_args(
            &args(&[
                "--listing-url",
                "http://localhost:9000/custom",
                "--skip-failed",
                "--json",
            ]),
            Some("abc".to_string()),
        )
        .unwrap();

        assert_eq!(settings.listing_url.as_str(), "http://localhost:9000/custom");
        assert_eq!(settings.failure_policy, FailurePolicy::Skip);
        assert_eq!(settings.output, OutputFormat::Json);
        assert_eq!(settings.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_invalid_settings() {
        assert!(Settings::from_args(&args(&["--repo", "nope"]), None).is_err());
        assert!(Settings::from_args(&args(&["--api-url", "ftp://x"]), None).is_err());
        assert!(Settings::from_args(&args(&["--raw-url", "not a url"]), None).is_err());
        assert!(Settings::from_args(&args(&["--ext", ""]), None).is_err());
    }

    #[test]
    fn test_timeout_unset_without_flag() {
        let settings = Settings::from_args(&args(&[]), None).unwrap();
        assert_eq!(settings.timeout, None);

        let settings = Settings::from_args(&args(&["--timeout", "45"]), None).unwrap();
        assert_eq!(settings.timeout, Some(Duration::from_secs(45)));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(Cli::try_parse_from(["letter-census", "--timeout", "0"]).is_err());
    }

    #[test]
    fn test_token_is_trimmed() {
        let settings = Settings::from_args(&args(&[]), Some(" abc \n".to_string())).unwrap();
        assert_eq!(settings.token.as_deref(), Some("abc"));

        let settings = Settings::from_args(&args(&[]), Some("   ".to_string())).unwrap();
        assert_eq!(settings.token, None);

        let token = resolve_token(Some("  flag ".to_string()), || Ok(None));
        assert_eq!(token.as_deref(), Some("flag"));
    }

    #[test]
    fn test_explicit_token_wins() {
        let token = resolve_token(Some("flag".to_string()), || Ok(Some("stored".to_string())));
        assert_eq!(token.as_deref(), Some("flag"));
    }

    #[test]
    fn test_falls_back_to_stored_token() {
        let token = resolve_token(None, || Ok(Some("stored".to_string())));
        assert_eq!(token.as_deref(), Some("stored"));

        let token = resolve_token(Some("  ".to_string()), || Ok(Some("stored".to_string())));
        assert_eq!(token.as_deref(), Some("stored"));
    }

    #[test]
    fn test_no_token_anywhere() {
        assert_eq!(resolve_token(None, || Ok(None)), None);
        let token = resolve_token(None, || {
            Err(CredentialError::Retrieve(keyring::Error::NoStorageAccess(
                "keychain locked".into(),
            )))
        });
        assert_eq!(token, None);
    }
}
