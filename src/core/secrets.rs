//! Secret file operations.
//!
//! Every secret is a single file: plaintext starting with an `access:`
//! line, stored encrypted to whoever that line resolves to. All writes of
//! ciphertext go through the encryption guard.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::cipher::{self, Cipher, KeyRing};
use crate::core::guard;
use crate::core::roster::Roster;
use crate::core::types::Ciphertext;
use crate::error::{CipherError, EnvError, Result};

/// Secret operations bound to one roster and one crypto backend.
pub struct Secrets<'a> {
    roster: &'a Roster,
    cipher: &'a dyn Cipher,
    keys: &'a dyn KeyRing,
}

impl<'a> Secrets<'a> {
    pub fn new(roster: &'a Roster, cipher: &'a dyn Cipher, keys: &'a dyn KeyRing) -> Self {
        Self {
            roster,
            cipher,
            keys,
        }
    }

    /// Fail early if `path` already exists, before anyone types a secret.
    pub fn ensure_absent(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(EnvError::AlreadyExists(path.to_path_buf()).into());
        }
        Ok(())
    }

    /// Guard and encrypt plaintext without writing it anywhere.
    pub fn seal(&self, plaintext: &str) -> Result<Ciphertext> {
        guard::seal(plaintext, self.roster, self.keys, self.cipher)
    }

    /// Decrypt an existing secret.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::NotFound` if the file is missing and
    /// `EnvError::NotEncrypted` if it holds plaintext.
    pub fn read(&self, path: &Path) -> Result<Zeroizing<String>> {
        let data = read_existing(path)?;
        if !cipher::looks_encrypted(&data) {
            return Err(EnvError::NotEncrypted(path.to_path_buf()).into());
        }
        debug!(path = %path.display(), "decrypting");
        Ok(Zeroizing::new(self.cipher.decrypt(&data)?))
    }

    /// Encrypt `plaintext` into a new file.
    pub fn create(&self, path: &Path, plaintext: &str) -> Result<()> {
        Self::ensure_absent(path)?;
        let ciphertext = self.seal(plaintext)?;
        create_file(path, ciphertext.as_bytes())?;
        info!(path = %path.display(), "secret created");
        Ok(())
    }

    /// Encrypt `plaintext` over an existing file.
    pub fn store(&self, path: &Path, plaintext: &str) -> Result<()> {
        let ciphertext = self.seal(plaintext)?;
        replace_file(path, ciphertext.as_bytes())?;
        info!(path = %path.display(), "secret stored");
        Ok(())
    }

    /// Encrypt a file in place.
    ///
    /// A plaintext file is encrypted; an encrypted one is decrypted and
    /// re-encrypted for whoever its access line names today. Returns
    /// `true` in the second case.
    pub fn encrypt_in_place(&self, path: &Path) -> Result<bool> {
        let data = read_existing(path)?;

        let (plaintext, reencrypt) = if cipher::looks_encrypted(&data) {
            (Zeroizing::new(self.cipher.decrypt(&data)?), true)
        } else {
            let text = String::from_utf8(data).map_err(|_| {
                CipherError::EncryptionFailed(format!("{} is not UTF-8 text", path.display()))
            })?;
            (Zeroizing::new(text), false)
        };

        self.store(path, &plaintext)?;
        Ok(reencrypt)
    }

    /// Replace an encrypted file with its plaintext.
    pub fn decrypt_in_place(&self, path: &Path) -> Result<()> {
        let plaintext = self.read(path)?;
        replace_file(path, plaintext.as_bytes())?;
        info!(path = %path.display(), "secret decrypted in place");
        Ok(())
    }
}

fn read_existing(path: &Path) -> Result<Vec<u8>> {
    match std::fs::read(path) {
        Ok(data) => Ok(data),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(EnvError::NotFound(path.to_path_buf()).into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Write a new file, owner-only. Fails if `path` already exists.
fn create_file(path: &Path, contents: &[u8]) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::AlreadyExists {
            EnvError::AlreadyExists(path.to_path_buf()).into()
        } else {
            crate::error::Error::from(e)
        }
    })?;
    file.write_all(contents)?;
    file.sync_all()?;
    Ok(())
}

/// Replace `path` with `contents`.
///
/// The new bytes go to an owner-only temp file next to `path`, which is
/// renamed over it once synced. Until then the old file is untouched.
fn replace_file(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".huddle-");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o600));
    }

    let mut file = builder.tempfile_in(dir)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    debug!(path = %path.display(), "file replaced");
    Ok(())
}

/// Scratch file suffix for editing `path`, ignoring `.gpg`/`.asc`.
pub fn scratch_suffix(path: &Path) -> String {
    let mut name = Path::new(path.file_name().unwrap_or_default());
    if matches!(
        name.extension().and_then(|e| e.to_str()),
        Some("gpg" | "asc" | "pgp")
    ) {
        name = Path::new(name.file_stem().unwrap_or_default());
    }
    name.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}
