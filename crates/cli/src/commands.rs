//! Subcommand implementations.
//!
//! Responsibilities:
//! - Read secrets documents (stdin or file, comments allowed) and run them
//!   through the `upconf` cipher.
//! - Print resolved settings as pretty JSON.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use json_comments::StripComments;
use secrecy::SecretString;
use serde_json::{Map, Value};

use upconf::constants::{CONFIG_SECRET_VAR, DEFAULT_ENV};
use upconf::{SettingsContext, TracingLogger, decrypt_secrets, encrypt_secrets, env_var_or_none};

use crate::args::CipherArgs;

pub fn encrypt(args: &CipherArgs) -> Result<()> {
    let text = read_input(args.file.as_deref())?;
    let parsed: Value = serde_json::from_reader(StripComments::new(text.as_bytes()))
        .context("secrets input is not valid JSON")?;
    let Value::Object(map) = parsed else {
        bail!("secrets input must be a JSON object of dotted paths");
    };

    let payload = encrypt_secrets(&map, &resolve_passphrase(args))?;
    println!("{payload}");
    Ok(())
}

pub fn decrypt(args: &CipherArgs) -> Result<()> {
    let text = read_input(args.file.as_deref())?;
    let secrets: Map<String, Value> = decrypt_secrets(text.trim(), &resolve_passphrase(args))?;
    println!("{}", serde_json::to_string_pretty(&Value::Object(secrets))?);
    Ok(())
}

pub fn show(dir: Option<&Path>) -> Result<()> {
    let mut context = SettingsContext::new().with_logger(TracingLogger);
    if let Some(dir) = dir {
        context = context.with_base_dir(dir);
    }
    let settings = context.get_settings()?;
    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}

/// Key precedence: `--key`, then `CONFIG_SECRET`, then the environment name
/// (`--env`, `APP_ENV`, or the built-in default). Mirrors the library's
/// default decryptor so the CLI and the loader agree on key material.
fn resolve_passphrase(args: &CipherArgs) -> SecretString {
    let passphrase = args
        .key
        .clone()
        .or_else(|| env_var_or_none(CONFIG_SECRET_VAR))
        .or_else(|| args.env.clone())
        .unwrap_or_else(|| DEFAULT_ENV.to_string());
    SecretString::from(passphrase)
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}
