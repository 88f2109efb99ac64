//! Environment-specific settings loading with encrypted secrets sidecars.
//!
//! This crate locates a `config/` directory by walking up from a base
//! directory, reads `{env}.json` (comments allowed) for the active
//! environment, optionally merges decrypted overrides from a companion
//! `{env}.secrets` file addressed by dotted path, and memoizes the composed
//! result on a [`SettingsContext`].
//!
//! ```no_run
//! use upconf::SettingsContext;
//!
//! let context = SettingsContext::new();
//! let settings = context.get_settings()?;
//! println!("running in {}", settings.env());
//! # Ok::<(), upconf::SettingsError>(())
//! ```

mod capabilities;
mod cipher;
pub mod constants;
mod loader;
mod merge;
mod resolve;
mod types;

pub use capabilities::{Decryptor, Logger, TracingLogger};
pub use cipher::{CipherError, DefaultDecryptor, decrypt_secrets, encrypt_secrets};
pub use loader::{Configure, LoadError, SettingsContext, SettingsError, env_var_or_none};
pub use merge::set_path;
pub use resolve::find_config_dir;
pub use types::Settings;
