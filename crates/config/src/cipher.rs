//! AES-256-CBC cipher for secrets sidecars and the default decryptor.
//!
//! Responsibilities:
//! - Decode and decrypt `.secrets` payloads: `base64(iv[16] || ciphertext)`.
//! - Derive the cipher key from a passphrase via SHA-256.
//! - Provide the inverse `encrypt_secrets` helper for authoring payloads.
//!
//! Does NOT handle:
//! - Locating or reading sidecar files (see loader).
//! - Merging decrypted values into settings (see `merge.rs`).
//!
//! Invariants:
//! - Plaintext is a JSON object whose top-level keys are dotted paths.
//! - Passphrases are held as `SecretString` and never logged.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use rand::RngExt;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::capabilities::Decryptor;
use crate::constants::CONFIG_SECRET_VAR;
use crate::loader::env_var_or_none;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Length of the IV prefixed to every ciphertext.
const IV_LEN: usize = 16;

/// Errors that can occur while encrypting or decrypting a secrets payload.
#[derive(Debug, Error)]
pub enum CipherError {
    #[error("ciphertext is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("encryption failed: {0}")]
    Encrypt(String),

    #[error("decryption failed: {0}")]
    Decrypt(String),

    #[error("decrypted payload is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("malformed secrets JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("secrets payload must be a JSON object of dotted paths")]
    NotAnObject,

    /// Escape hatch for custom [`Decryptor`] implementations.
    #[error("{0}")]
    Custom(String),
}

/// Derives the 32-byte cipher key from a passphrase.
fn derive_key(passphrase: &str) -> [u8; 32] {
    Sha256::digest(passphrase.as_bytes()).into()
}

/// Encrypts a map of dotted-path secrets into the sidecar wire format.
///
/// The output is `base64(iv || ciphertext)` with a freshly generated IV, and
/// decrypts with [`decrypt_secrets`] under the same passphrase.
///
/// # Errors
///
/// Returns [`CipherError::Json`] when the map cannot be serialized, or
/// [`CipherError::Encrypt`] when the cipher cannot be constructed.
pub fn encrypt_secrets(
    secrets: &Map<String, Value>,
    passphrase: &SecretString,
) -> Result<String, CipherError> {
    let key = derive_key(passphrase.expose_secret());
    let plaintext = serde_json::to_vec(secrets)?;

    let mut iv = [0u8; IV_LEN];
    rand::rng().fill(&mut iv);

    let ciphertext = Aes256CbcEnc::new_from_slices(&key, &iv)
        .map_err(|e| CipherError::Encrypt(e.to_string()))?
        .encrypt_padded_vec_mut::<Pkcs7>(&plaintext);

    let mut payload = iv.to_vec();
    payload.extend_from_slice(&ciphertext);
    Ok(BASE64.encode(payload))
}

/// Decrypts a sidecar payload produced by [`encrypt_secrets`].
///
/// # Errors
///
/// Returns a [`CipherError`] when the payload is not valid base64, is shorter
/// than the IV prefix, fails to decrypt (wrong key or garbled ciphertext), or
/// does not decode to a JSON object.
pub fn decrypt_secrets(
    ciphertext: &str,
    passphrase: &SecretString,
) -> Result<Map<String, Value>, CipherError> {
    let payload = BASE64.decode(ciphertext.trim())?;
    if payload.len() < IV_LEN {
        return Err(CipherError::Decrypt(
            "payload is shorter than the IV prefix".to_string(),
        ));
    }
    let (iv, body) = payload.split_at(IV_LEN);

    let key = derive_key(passphrase.expose_secret());
    let plaintext = Aes256CbcDec::new_from_slices(&key, iv)
        .map_err(|e| CipherError::Decrypt(e.to_string()))?
        .decrypt_padded_vec_mut::<Pkcs7>(body)
        .map_err(|e| CipherError::Decrypt(e.to_string()))?;

    let text = String::from_utf8(plaintext)?;
    match serde_json::from_str(&text)? {
        Value::Object(map) => Ok(map),
        _ => Err(CipherError::NotAnObject),
    }
}

/// Default [`Decryptor`]: AES-256-CBC keyed from the `CONFIG_SECRET`
/// environment variable.
///
/// When `CONFIG_SECRET` is unset the passphrase falls back to the resolved
/// environment name. That fallback is deliberately weak and only acceptable
/// for environments whose secrets are not actually secret.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultDecryptor;

impl Decryptor for DefaultDecryptor {
    fn decrypt(&self, ciphertext: &str, env: &str) -> Result<Map<String, Value>, CipherError> {
        let passphrase = env_var_or_none(CONFIG_SECRET_VAR)
            .map(SecretString::from)
            .unwrap_or_else(|| SecretString::from(env.to_string()));
        decrypt_secrets(ciphertext, &passphrase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serial_test::serial;

    fn secrets_fixture() -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("db.password".to_string(), json!("hunter2"));
        map.insert("port".to_string(), json!(8080));
        map
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let passphrase = SecretString::from("correct horse".to_string());
        let payload = encrypt_secrets(&secrets_fixture(), &passphrase).unwrap();

        let decrypted = decrypt_secrets(&payload, &passphrase).unwrap();
        assert_eq!(decrypted, secrets_fixture());
    }

    #[test]
    fn test_wrong_passphrase_fails() {
        let payload = encrypt_secrets(
            &secrets_fixture(),
            &SecretString::from("right key".to_string()),
        )
        .unwrap();

        let result = decrypt_secrets(&payload, &SecretString::from("wrong key".to_string()));
        assert!(matches!(result, Err(CipherError::Decrypt(_))));
    }

    #[test]
    fn test_invalid_base64_fails() {
        let passphrase = SecretString::from("key".to_string());
        let result = decrypt_secrets("not!!valid##base64", &passphrase);
        assert!(matches!(result, Err(CipherError::Decode(_))));
    }

    #[test]
    fn test_truncated_payload_fails() {
        let passphrase = SecretString::from("key".to_string());
        let short = BASE64.encode([0u8; 4]);
        let result = decrypt_secrets(&short, &passphrase);
        assert!(matches!(result, Err(CipherError::Decrypt(_))));
    }

    #[test]
    fn test_trailing_newline_is_tolerated() {
        let passphrase = SecretString::from("key".to_string());
        let payload = encrypt_secrets(&secrets_fixture(), &passphrase).unwrap();

        let decrypted = decrypt_secrets(&format!("{payload}\n"), &passphrase).unwrap();
        assert_eq!(decrypted, secrets_fixture());
    }

    #[test]
    fn test_non_object_plaintext_is_rejected() {
        // Encrypt a bare array with the raw primitives to bypass the typed
        // encrypt_secrets entry point.
        let passphrase = SecretString::from("key".to_string());
        let key = derive_key("key");
        let iv = [7u8; IV_LEN];
        let ciphertext = Aes256CbcEnc::new_from_slices(&key, &iv)
            .unwrap()
            .encrypt_padded_vec_mut::<Pkcs7>(b"[1, 2, 3]");
        let mut payload = iv.to_vec();
        payload.extend_from_slice(&ciphertext);

        let result = decrypt_secrets(&BASE64.encode(payload), &passphrase);
        assert!(matches!(result, Err(CipherError::NotAnObject)));
    }

    #[test]
    #[serial]
    fn test_default_decryptor_uses_config_secret_var() {
        let _guard = crate::test_util::global_test_lock().lock().unwrap();
        let payload = encrypt_secrets(
            &secrets_fixture(),
            &SecretString::from("from-env-var".to_string()),
        )
        .unwrap();

        temp_env::with_vars([(CONFIG_SECRET_VAR, Some("from-env-var"))], || {
            let decrypted = DefaultDecryptor.decrypt(&payload, "development").unwrap();
            assert_eq!(decrypted, secrets_fixture());
        });
    }

    #[test]
    #[serial]
    fn test_default_decryptor_falls_back_to_env_name() {
        let _guard = crate::test_util::global_test_lock().lock().unwrap();
        let payload = encrypt_secrets(
            &secrets_fixture(),
            &SecretString::from("staging".to_string()),
        )
        .unwrap();

        temp_env::with_vars([(CONFIG_SECRET_VAR, None::<&str>)], || {
            let decrypted = DefaultDecryptor.decrypt(&payload, "staging").unwrap();
            assert_eq!(decrypted, secrets_fixture());

            let wrong_env = DefaultDecryptor.decrypt(&payload, "production");
            assert!(matches!(wrong_env, Err(CipherError::Decrypt(_))));
        });
    }
}
