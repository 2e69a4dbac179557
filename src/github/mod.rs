// src/github/mod.rs
// =============================================================================
// This module handles everything that talks to GitHub.
//
// Submodules:
// - client: HTTP client with auth headers and typed errors
// - types: Listing entries and repository identifiers
// - pagination: `Link` header parsing
// - walk: Breadth-first walk of a repository tree
//
// Only the pieces other modules need are re-exported here.
// =============================================================================

mod client;
mod pagination;
mod types;
mod walk;

pub use client::{GitHubClient, GitHubError};
pub use types::RepoSlug;
pub use walk::{walk, ExtensionFilter};
