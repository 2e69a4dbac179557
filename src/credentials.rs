// src/credentials.rs
// =============================================================================
// Stores the GitHub token in the operating system's keychain.
//
// Platform support:
// - macOS: Keychain
// - Windows: Credential Manager
// - Linux: kernel keyutils
//
// The token is only ever read once, while building `Settings`; nothing in the
// program keeps it in a global.
// =============================================================================

use keyring::Entry;
use thiserror::Error;

/// Service name for keyring entries
const KEYRING_SERVICE: &str = "letter-census";

/// Account name the token is filed under
const TOKEN_KEY: &str = "github-token";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("failed to open keychain entry: {0}")]
    Entry(#[source] keyring::Error),

    #[error("failed to store token in keychain: {0}")]
    Store(#[source] keyring::Error),

    #[error("failed to read token from keychain: {0}")]
    Retrieve(#[source] keyring::Error),

    #[error("failed to delete token from keychain: {0}")]
    Delete(#[source] keyring::Error),
}

pub struct CredentialStore;

impl CredentialStore {
    fn entry() -> Result<Entry, CredentialError> {
        Entry::new(KEYRING_SERVICE, TOKEN_KEY).map_err(CredentialError::Entry)
    }

    /// Save a token, replacing any previous one
    pub fn store_token(token: &str) -> Result<(), CredentialError> {
        Self::entry()?
            .set_password(token)
            .map_err(CredentialError::Store)
    }

    /// Read the stored token
    ///
    /// Returns Ok(None) when no token has been stored yet.
    pub fn retrieve_token() -> Result<Option<String>, CredentialError> {
        match Self::entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(CredentialError::Retrieve(e)),
        }
    }

    /// Remove the stored token
    ///
    /// Returns false if there was nothing to remove.
    pub fn delete_token() -> Result<bool, CredentialError> {
        match Self::entry()?.delete_credential() {
            Ok(()) => Ok(true),
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(e) => Err(CredentialError::Delete(e)),
        }
    }
}
