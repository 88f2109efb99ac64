//! Error types for settings loading.
//!
//! Responsibilities:
//! - Define the failure taxonomy for a load attempt ([`LoadError`]).
//! - Wrap every load failure once with the fixed context prefix
//!   ([`SettingsError`]).
//!
//! Invariants:
//! - Variants carry the paths and sources needed for debugging.
//! - The prefix string is part of the public contract; callers may match on
//!   it.

use std::path::PathBuf;

use thiserror::Error;

use crate::cipher::CipherError;

/// Individual failures inside a settings load attempt.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("config directory could not be found")]
    ConfigDirNotFound,

    #[error("could not determine the working directory: {source}")]
    Cwd {
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("settings in {path} must be a JSON object")]
    NotAnObject { path: PathBuf },

    /// A secrets file exists but no decryptor capability is bound.
    /// Raised only at the point secrets are actually needed.
    #[error("decryptor is undefined")]
    DecryptorMissing,

    #[error("failed to decrypt secrets: {0}")]
    Decrypt(#[from] CipherError),
}

/// Error returned by [`SettingsContext::get_settings`](crate::SettingsContext::get_settings).
///
/// Wraps the underlying [`LoadError`] once, prefixing its message with the
/// fixed `"Failed to read config file: "` context string.
#[derive(Debug, Error)]
#[error("Failed to read config file: {source}")]
pub struct SettingsError {
    #[from]
    source: LoadError,
}

impl SettingsError {
    /// The underlying failure, for matching on the error kind.
    pub fn kind(&self) -> &LoadError {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_error_carries_fixed_prefix() {
        let error = SettingsError::from(LoadError::ConfigDirNotFound);
        assert_eq!(
            error.to_string(),
            "Failed to read config file: config directory could not be found"
        );
    }

    #[test]
    fn test_decryptor_missing_message() {
        let error = SettingsError::from(LoadError::DecryptorMissing);
        assert_eq!(
            error.to_string(),
            "Failed to read config file: decryptor is undefined"
        );
        assert!(matches!(error.kind(), LoadError::DecryptorMissing));
    }
}
