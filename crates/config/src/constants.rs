//! Centralized constants for settings resolution.
//!
//! This module contains the environment variable names and defaults used
//! across the crate to avoid magic string duplication.

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable selecting the active environment name.
pub const ENV_NAME_VAR: &str = "APP_ENV";

/// Environment variable overriding the config subdirectory name searched for
/// under ancestor directories.
pub const CONFIG_DIR_VAR: &str = "CONFIG_DIR";

/// Environment variable holding the passphrase for the default decryptor.
pub const CONFIG_SECRET_VAR: &str = "CONFIG_SECRET";

// =============================================================================
// Defaults
// =============================================================================

/// Environment name used when [`ENV_NAME_VAR`] is unset.
pub const DEFAULT_ENV: &str = "development";

/// Config subdirectory name used when [`CONFIG_DIR_VAR`] is unset.
pub const DEFAULT_CONFIG_SUBDIR: &str = "config";

// =============================================================================
// Resolution Bounds
// =============================================================================

/// Defensive cap on upward steps during directory resolution. Reaching the
/// filesystem root is the primary termination condition; this bound only
/// guards against pathological path implementations that never converge.
pub const MAX_UPWARD_STEPS: usize = 100;

// =============================================================================
// File Naming
// =============================================================================

/// Extension of the plaintext settings file, `{env}.json`.
pub const SETTINGS_EXT: &str = "json";

/// Extension of the encrypted sidecar file, `{env}.secrets`.
pub const SECRETS_EXT: &str = "secrets";
