//! Passphrase-keyed encryption for configuration files at rest.
//!
//! Responsibilities:
//! - Provide AES-256-GCM encryption and decryption.
//! - Derive keys from a passphrase using Argon2id.
//! - Frame ciphertext in a self-describing envelope (magic, salt, nonce, body).
//!
//! Does NOT handle:
//! - Locating or reading config files (see `locator.rs` and `provider.rs`).
//! - Storing passphrases. The passphrase lives only as long as the caller keeps it.
//!
//! Invariants:
//! - Envelope layout is `MAGIC || salt(16) || nonce(12) || ciphertext+tag`.
//! - Decryption is deterministic for a given envelope and passphrase.
//! - Encryption draws a fresh salt and nonce on every call.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use argon2::Argon2;
use rand::RngExt;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Leading bytes of every sealed config file.
pub const MAGIC: &[u8; 4] = b"DCF1";

const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const HEADER_LEN: usize = MAGIC.len() + SALT_LEN + NONCE_LEN;

/// Errors that can occur during encryption operations.
#[derive(Debug, Error)]
pub enum EncryptionError {
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Invalid envelope: {0}")]
    InvalidEnvelope(&'static str),
}

pub type Result<T> = std::result::Result<T, EncryptionError>;

/// Core cryptographic logic for AES-256-GCM.
pub struct Encryptor;

impl Encryptor {
    /// Encrypts data using AES-256-GCM.
    /// Returns (ciphertext + tag, nonce).
    pub fn encrypt(data: &[u8], key: &[u8; 32]) -> Result<(Vec<u8>, [u8; NONCE_LEN])> {
        let cipher = Aes256Gcm::new(key.into());
        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::rng().fill(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, data)
            .map_err(|e| EncryptionError::EncryptionFailed(e.to_string()))?;

        Ok((ciphertext, nonce_bytes))
    }

    /// Decrypts data using AES-256-GCM.
    pub fn decrypt(ciphertext: &[u8], key: &[u8; 32], nonce: &[u8; NONCE_LEN]) -> Result<Vec<u8>> {
        let cipher = Aes256Gcm::new(key.into());
        let nonce = Nonce::from_slice(nonce);

        // aead::Error is opaque: a wrong key and a tampered body look the same.
        cipher.decrypt(nonce, ciphertext).map_err(|_| {
            EncryptionError::DecryptionFailed("wrong passphrase or corrupted data".to_string())
        })
    }

    /// Derives a 32-byte key from a passphrase and salt using Argon2id.
    pub fn derive_key(passphrase: &SecretString, salt: &[u8]) -> Result<[u8; 32]> {
        let argon2 = Argon2::default();
        let mut key = [0u8; 32];
        argon2
            .hash_password_into(passphrase.expose_secret().as_bytes(), salt, &mut key)
            .map_err(|e| EncryptionError::KeyDerivationFailed(e.to_string()))?;
        Ok(key)
    }

    /// Generates a random 16-byte salt for key derivation.
    pub fn generate_salt() -> [u8; SALT_LEN] {
        let mut salt = [0u8; SALT_LEN];
        rand::rng().fill(&mut salt);
        salt
    }
}

/// Seals `plaintext` into an envelope keyed by `passphrase`.
pub fn encrypt(plaintext: &[u8], passphrase: &SecretString) -> Result<Vec<u8>> {
    let salt = Encryptor::generate_salt();
    let key = Encryptor::derive_key(passphrase, &salt)?;
    let (ciphertext, nonce) = Encryptor::encrypt(plaintext, &key)?;

    let mut envelope = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    envelope.extend_from_slice(MAGIC);
    envelope.extend_from_slice(&salt);
    envelope.extend_from_slice(&nonce);
    envelope.extend_from_slice(&ciphertext);
    Ok(envelope)
}

/// Opens an envelope produced by [`encrypt`].
///
/// Fails with [`EncryptionError::InvalidEnvelope`] when the input is not an
/// envelope at all and with [`EncryptionError::DecryptionFailed`] when the
/// passphrase does not match.
pub fn decrypt(envelope: &[u8], passphrase: &SecretString) -> Result<Vec<u8>> {
    if envelope.len() < HEADER_LEN {
        return Err(EncryptionError::InvalidEnvelope("input shorter than header"));
    }
    let (magic, rest) = envelope.split_at(MAGIC.len());
    if magic != MAGIC {
        return Err(EncryptionError::InvalidEnvelope("missing magic header"));
    }
    let (salt, rest) = rest.split_at(SALT_LEN);
    let (nonce, ciphertext) = rest.split_at(NONCE_LEN);
    let nonce: [u8; NONCE_LEN] = nonce
        .try_into()
        .map_err(|_| EncryptionError::InvalidEnvelope("invalid nonce size"))?;

    let key = Encryptor::derive_key(passphrase, salt)?;
    Encryptor::decrypt(ciphertext, &key, &nonce)
}

/// Returns true when `content` starts with the envelope magic.
pub fn is_sealed(content: &[u8]) -> bool {
    content.starts_with(MAGIC)
}
