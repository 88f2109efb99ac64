//! The settings context: capability bindings plus the memoized settings.
//!
//! Responsibilities:
//! - Own the logger/decryptor bindings and the once-per-context cache.
//! - Expose `get_settings` (lazy, memoized) and `configure` (capability
//!   updates).
//!
//! Does NOT handle:
//! - The load pipeline itself (see `load.rs`).
//!
//! Invariants / Assumptions:
//! - `get_settings` returns the identical instance on every call after the
//!   first success, with zero additional I/O.
//! - Capability updates only affect loads that have not been cached yet.
//! - Reconfiguration requires `&mut`, so it cannot race an in-flight load.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::capabilities::{Decryptor, Logger};
use crate::cipher::DefaultDecryptor;
use crate::types::Settings;

use super::error::SettingsError;
use super::load::load_settings;

/// Capability updates for [`SettingsContext::configure`].
///
/// An outer `None` leaves the binding unchanged. `logger: Some(None)` clears
/// the logger; the decryptor can be replaced but not cleared here — use
/// [`SettingsContext::without_decryptor`] when constructing a context that
/// must reject secrets files.
#[derive(Default)]
pub struct Configure {
    /// Keep (`None`), clear (`Some(None)`), or install (`Some(Some(_))`) the
    /// logger binding.
    pub logger: Option<Option<Box<dyn Logger>>>,
    /// Replace the decryptor binding when `Some`.
    pub decryptor: Option<Box<dyn Decryptor>>,
}

/// Owns the capability bindings and the memoized settings for one process.
///
/// Construct one at startup and pass it by reference to anything that needs
/// configuration. [`DefaultDecryptor`] is installed by default; no logger is.
pub struct SettingsContext {
    base_dir: Option<PathBuf>,
    logger: Option<Box<dyn Logger>>,
    decryptor: Option<Box<dyn Decryptor>>,
    cache: OnceLock<Settings>,
}

impl Default for SettingsContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsContext {
    /// Creates a context with the default decryptor and no logger.
    pub fn new() -> Self {
        Self {
            base_dir: None,
            logger: None,
            decryptor: Some(Box::new(DefaultDecryptor)),
            cache: OnceLock::new(),
        }
    }

    /// Resolve the config directory starting from `dir` instead of the
    /// process working directory (primarily for testing).
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Installs a logger.
    pub fn with_logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Some(Box::new(logger));
        self
    }

    /// Replaces the decryptor.
    pub fn with_decryptor(mut self, decryptor: impl Decryptor + 'static) -> Self {
        self.decryptor = Some(Box::new(decryptor));
        self
    }

    /// Removes the decryptor. A later load that finds a secrets file fails
    /// with [`LoadError::DecryptorMissing`](super::LoadError::DecryptorMissing).
    pub fn without_decryptor(mut self) -> Self {
        self.decryptor = None;
        self
    }

    /// Applies capability updates.
    ///
    /// Safe to call before or after [`get_settings`](Self::get_settings),
    /// but updates only affect loads not yet cached. An empty update is a
    /// no-op.
    pub fn configure(&mut self, update: Configure) {
        if let Some(logger) = update.logger {
            self.logger = logger;
        }
        if let Some(decryptor) = update.decryptor {
            self.decryptor = Some(decryptor);
        }
    }

    /// Returns the composed settings, loading them on the first call.
    ///
    /// Subsequent calls return the identical cached instance without
    /// touching the filesystem. A failed load caches nothing; the next call
    /// retries from scratch.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the configuration directory cannot be
    /// found, the settings file cannot be read or parsed, or secrets cannot
    /// be decrypted.
    pub fn get_settings(&self) -> Result<&Settings, SettingsError> {
        if let Some(settings) = self.cache.get() {
            return Ok(settings);
        }
        let loaded = load_settings(self)?;
        Ok(self.cache.get_or_init(|| loaded))
    }

    pub(crate) fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    pub(crate) fn decryptor(&self) -> Option<&dyn Decryptor> {
        self.decryptor.as_deref()
    }

    pub(crate) fn log_info(&self, message: &str) {
        if let Some(logger) = &self.logger {
            logger.info(message);
        }
    }

    pub(crate) fn log_warn(&self, message: &str) {
        if let Some(logger) = &self.logger {
            logger.warn(message);
        }
    }
}
