//! Cryptographic capabilities.
//!
//! huddle never implements cryptography itself. Signature verification,
//! encryption, and key lookup are consumed through the traits below so the
//! trust and guard logic can run against any backend, including test
//! doubles.
//!
//! ## Backends
//!
//! - **gpg**: the only production backend. Drives the `gpg` CLI.
//!
//! ## Adding a New Backend
//!
//! 1. Implement `Verifier`, `Cipher`, and `KeyRing`
//! 2. Add the implementation in a new file next to `gpg.rs`
//! 3. Re-export from this module

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::domain::{Fingerprint, Recipients};
use crate::core::types::Ciphertext;
use crate::error::Result;

mod gpg;
mod listing;
mod status;

pub use gpg::Gpg;

/// Outcome of checking one signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureCheck {
    /// Whether the signature verified cryptographically.
    pub valid: bool,
    /// Fingerprint (or, for unknown keys, key id) of the signer.
    pub signer: String,
}

/// Result of verifying a signed document.
#[derive(Debug, Clone, Default)]
pub struct Verification {
    /// The signed payload, without any signature wrapper.
    pub content: Vec<u8>,
    /// One entry per signature found.
    pub signatures: Vec<SignatureCheck>,
}

/// Signature verification.
pub trait Verifier {
    /// Verify `signed`.
    ///
    /// With `detached`, `signed` is the payload and `detached` the
    /// signature. Otherwise `signed` carries an inline or cleartext
    /// signature.
    ///
    /// A bad signature is not an error: it is reported as a
    /// `SignatureCheck` with `valid: false`. Errors are reserved for the
    /// verifier itself failing to run.
    fn verify(&self, signed: &[u8], detached: Option<&[u8]>) -> Result<Verification>;
}

/// Public-key encryption.
pub trait Cipher {
    /// Encrypt plaintext for every recipient in the set.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::EncryptionFailed` if the backend fails.
    fn encrypt(&self, plaintext: &str, recipients: &Recipients) -> Result<Ciphertext>;

    /// Decrypt with whatever private key the backend holds.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::DecryptionFailed` if the backend fails or the
    /// plaintext is not UTF-8.
    fn decrypt(&self, ciphertext: &[u8]) -> Result<String>;

    /// Backend name for logs.
    fn name(&self) -> &'static str;
}

/// Public key availability.
pub trait KeyRing {
    /// Whether a usable encryption key for `key` is available.
    fn has_key(&self, key: &Fingerprint) -> Result<bool>;

    /// Import key material. Returns whether the import succeeded.
    fn import(&self, material: &[u8]) -> Result<bool>;

    /// Details about a key, if present.
    fn describe(&self, key: &Fingerprint) -> Result<Option<KeyInfo>>;

    /// Fetch keys from a keyserver into the keyring.
    fn receive(&self, keyserver: &str, keys: &[Fingerprint]) -> Result<()>;
}

/// What the keyring knows about a public key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyInfo {
    pub fingerprint: String,
    pub user_id: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub expires: Option<DateTime<Utc>>,
    /// Validity letter from the keyring listing (`u`, `f`, `r`, `e`, ...).
    pub validity: char,
    pub can_encrypt: bool,
}

impl KeyInfo {
    /// Not revoked, expired, invalid, or disabled, and able to encrypt.
    pub fn usable(&self) -> bool {
        self.can_encrypt && !matches!(self.validity, 'r' | 'e' | 'i' | 'd')
    }
}

/// Whether `data` looks like an OpenPGP message: ASCII armor or a binary
/// packet stream starting with an encryption or compression packet.
pub fn looks_encrypted(data: &[u8]) -> bool {
    const ARMOR: &[u8] = b"-----BEGIN PGP MESSAGE-----";

    let trimmed = match data.iter().position(|b| !b.is_ascii_whitespace()) {
        Some(start) => &data[start..],
        None => return false,
    };
    if trimmed.starts_with(ARMOR) {
        return true;
    }

    let tag = trimmed[0];
    if tag & 0x80 == 0 {
        return false;
    }
    let packet = if tag & 0x40 != 0 {
        tag & 0x3f
    } else {
        (tag >> 2) & 0x0f
    };
    // Public-key session key, symmetric session key, compressed data.
    matches!(packet, 1 | 3 | 8)
}
