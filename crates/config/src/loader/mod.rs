//! Settings loading and the configuration API.
//!
//! Responsibilities:
//! - Resolve the active environment and configuration directory.
//! - Read, comment-strip, and parse `{env}.json`; merge decrypted secrets.
//! - Memoize the composed [`Settings`](crate::Settings) on a
//!   [`SettingsContext`] and expose capability injection.
//!
//! Does NOT handle:
//! - The directory walk itself (see `resolve.rs`).
//! - Cipher mechanics (see `cipher.rs`).
//!
//! Invariants / Assumptions:
//! - A load attempt either caches a fully composed settings object or
//!   caches nothing; a failure never poisons the cache.
//! - Every failure inside a load attempt surfaces as [`SettingsError`] with
//!   the fixed `"Failed to read config file: "` context prefix.
//! - A missing secrets file is a warning, never an error.

mod context;
mod env;
mod error;
mod load;

pub use context::{Configure, SettingsContext};
pub use env::env_var_or_none;
pub use error::{LoadError, SettingsError};
