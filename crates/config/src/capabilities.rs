//! Capability traits consumed by the settings loader.
//!
//! Responsibilities:
//! - Define the `Logger` and `Decryptor` seams injected through
//!   [`SettingsContext`](crate::SettingsContext).
//! - Provide a `tracing`-backed logger implementation.
//!
//! Does NOT handle:
//! - The default cipher implementation (see `cipher.rs`).
//! - Deciding when capabilities are required (see loader).

use serde_json::{Map, Value};

use crate::cipher::CipherError;

/// Logging capability consumed by the loader.
///
/// When no logger is bound on a context, log emission is silently skipped.
pub trait Logger {
    /// Records an informational message.
    fn info(&self, message: &str);

    /// Records a warning.
    fn warn(&self, message: &str);
}

/// A [`Logger`] that forwards to the `tracing` macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: "upconf", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "upconf", "{message}");
    }
}

/// Decryption capability for `.secrets` sidecar files.
pub trait Decryptor {
    /// Turns the raw sidecar text into a map whose keys are dotted paths
    /// (e.g. `"db.password"`).
    ///
    /// `env` is the resolved environment name; implementations may use it as
    /// fallback key material, as [`DefaultDecryptor`](crate::DefaultDecryptor)
    /// does.
    ///
    /// # Errors
    ///
    /// Returns a [`CipherError`] when the ciphertext cannot be decoded or
    /// decrypted, or when the plaintext is not a JSON object.
    fn decrypt(&self, ciphertext: &str, env: &str) -> Result<Map<String, Value>, CipherError>;
}
