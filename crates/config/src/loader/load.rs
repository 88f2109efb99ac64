//! The settings load pipeline.
//!
//! Responsibilities:
//! - Resolve the environment name and configuration directory.
//! - Read and parse `{env}.json` with comments stripped.
//! - Decrypt and merge `{env}.secrets` when present.
//!
//! Does NOT handle:
//! - Caching (see `context.rs`); one call here is one full load attempt.
//!
//! Invariants:
//! - The `env` field of the result always equals the resolved environment
//!   name, overwriting any value from the file.
//! - Secrets values win over plaintext values at the same dotted path.
//! - The decryptor is required only when a secrets file actually exists.

use std::fs;
use std::path::Path;

use json_comments::StripComments;
use serde_json::Value;

use crate::constants::{
    CONFIG_DIR_VAR, DEFAULT_CONFIG_SUBDIR, DEFAULT_ENV, ENV_NAME_VAR, SECRETS_EXT, SETTINGS_EXT,
};
use crate::merge::set_path;
use crate::resolve::find_config_dir;
use crate::types::Settings;

use super::context::SettingsContext;
use super::env::env_var_or_none;
use super::error::{LoadError, SettingsError};

/// Runs one full load attempt, wrapping any failure with the fixed context
/// prefix.
pub(crate) fn load_settings(context: &SettingsContext) -> Result<Settings, SettingsError> {
    load_inner(context).map_err(SettingsError::from)
}

fn load_inner(context: &SettingsContext) -> Result<Settings, LoadError> {
    let env = env_var_or_none(ENV_NAME_VAR).unwrap_or_else(|| DEFAULT_ENV.to_string());

    let base = match context.base_dir() {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().map_err(|source| LoadError::Cwd { source })?,
    };
    let subdir =
        env_var_or_none(CONFIG_DIR_VAR).unwrap_or_else(|| DEFAULT_CONFIG_SUBDIR.to_string());
    let config_dir = find_config_dir(&base, &subdir).ok_or(LoadError::ConfigDirNotFound)?;

    let settings_file = config_dir.join(format!("{env}.{SETTINGS_EXT}"));
    context.log_info(&format!(
        "Reading configuration from {}",
        settings_file.display()
    ));
    let text = read_file(&settings_file)?;
    let parsed: Value = serde_json::from_reader(StripComments::new(text.as_bytes())).map_err(
        |source| LoadError::Parse {
            path: settings_file.clone(),
            source,
        },
    )?;
    let Value::Object(mut root) = parsed else {
        return Err(LoadError::NotAnObject {
            path: settings_file,
        });
    };
    root.insert("env".to_string(), Value::String(env.clone()));

    let secrets_file = config_dir.join(format!("{env}.{SECRETS_EXT}"));
    if secrets_file.exists() {
        context.log_info(&format!("Reading secrets from {}", secrets_file.display()));
        let ciphertext = read_file(&secrets_file)?;
        let decryptor = context.decryptor().ok_or(LoadError::DecryptorMissing)?;
        let secrets = decryptor.decrypt(ciphertext.trim(), &env)?;
        for (path, value) in secrets {
            set_path(&mut root, &path, value);
        }
    } else {
        context.log_warn("Secrets file could not be found");
    }

    Ok(Settings::new(env, root))
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}
