//! GPG backend.
//!
//! Drives GnuPG through the `gpg` CLI. All invocations run in batch mode
//! with data piped through stdin and stdout; the user's keyring (or
//! `$GNUPGHOME`) is used as is.
//!
//! ## Requirements
//!
//! - `gpg` CLI must be installed (or configured via `settings.gpg`)
//! - Recipient public keys must be in the keyring (`huddle keys refresh`)
//! - A private key must be available for decryption

use std::io::Write;
use std::process::{Command, Output, Stdio};

use tracing::{debug, trace};

use super::{listing, status, Cipher, KeyInfo, KeyRing, Verification, Verifier};
use crate::core::domain::{Fingerprint, Recipients};
use crate::core::types::Ciphertext;
use crate::error::{CipherError, Result};

/// GPG backend using the gpg CLI.
#[derive(Debug, Clone)]
pub struct Gpg {
    program: String,
}

impl Gpg {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run gpg with `args`, feeding `input` on stdin.
    ///
    /// A non-zero exit status is not an error here; callers decide.
    fn run(&self, args: &[&str], input: &[u8]) -> Result<Output> {
        trace!(program = %self.program, ?args, input_len = input.len(), "running gpg");

        let mut child = Command::new(&self.program)
            .arg("--batch")
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|_| CipherError::NotFound(self.program.clone()))?;

        // Write stdin from a separate thread so large outputs cannot
        // deadlock against a full stdout pipe.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = input.to_vec();
            std::thread::spawn(move || stdin.write_all(&input))
        });

        let output = child.wait_with_output()?;

        if let Some(writer) = writer {
            match writer.join() {
                Ok(Ok(())) => {}
                // gpg may exit before reading all input, e.g. on a bad key.
                Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                Ok(Err(e)) => return Err(e.into()),
                Err(_) => {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        "gpg stdin writer panicked",
                    )
                    .into());
                }
            }
        }

        trace!(status = ?output.status, stdout_len = output.stdout.len(), "gpg finished");
        Ok(output)
    }
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

impl Verifier for Gpg {
    fn verify(&self, signed: &[u8], detached: Option<&[u8]>) -> Result<Verification> {
        let verification = match detached {
            Some(signature) => {
                let mut sig_file = tempfile::Builder::new()
                    .prefix("huddle-sig-")
                    .tempfile()?;
                sig_file.write_all(signature)?;
                sig_file.flush()?;

                let sig_path = sig_file.path().to_string_lossy().to_string();
                let output = self.run(&["--status-fd", "2", "--verify", &sig_path, "-"], signed)?;
                Verification {
                    content: signed.to_vec(),
                    signatures: status::parse_signatures(&String::from_utf8_lossy(
                        &output.stderr,
                    )),
                }
            }
            None => {
                let output = self.run(&["--status-fd", "2", "--decrypt"], signed)?;
                Verification {
                    signatures: status::parse_signatures(&String::from_utf8_lossy(
                        &output.stderr,
                    )),
                    content: output.stdout,
                }
            }
        };

        debug!(
            signatures = verification.signatures.len(),
            detached = detached.is_some(),
            "signatures checked"
        );
        Ok(verification)
    }
}

impl Cipher for Gpg {
    fn encrypt(&self, plaintext: &str, recipients: &Recipients) -> Result<Ciphertext> {
        trace!(
            recipients = recipients.len(),
            plaintext_len = plaintext.len(),
            "encrypting with GPG"
        );

        if recipients.is_empty() {
            return Err(CipherError::EncryptionFailed("no recipients provided".to_string()).into());
        }

        let mut args = vec!["--encrypt", "--armor", "--trust-model", "always", "--yes"];
        for key in recipients.fingerprints() {
            args.push("--recipient");
            args.push(key.as_str());
        }

        let output = self.run(&args, plaintext.as_bytes())?;
        if !output.status.success() {
            return Err(CipherError::EncryptionFailed(stderr_of(&output)).into());
        }

        let ciphertext = String::from_utf8(output.stdout)
            .map_err(|e| CipherError::EncryptionFailed(format!("UTF-8 error: {}", e)))?;

        trace!(ciphertext_len = ciphertext.len(), "encrypted with GPG");
        Ok(ciphertext)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<String> {
        trace!(ciphertext_len = ciphertext.len(), "decrypting with GPG");

        let output = self.run(&["--decrypt", "--quiet", "--yes"], ciphertext)?;
        if !output.status.success() {
            return Err(CipherError::DecryptionFailed(format!(
                "{}. Ensure you have the private key in your keyring.",
                stderr_of(&output)
            ))
            .into());
        }

        let plaintext = String::from_utf8(output.stdout)
            .map_err(|e| CipherError::DecryptionFailed(format!("UTF-8 error: {}", e)))?;

        trace!(plaintext_len = plaintext.len(), "decrypted with GPG");
        Ok(plaintext)
    }

    fn name(&self) -> &'static str {
        "gpg"
    }
}

impl KeyRing for Gpg {
    fn has_key(&self, key: &Fingerprint) -> Result<bool> {
        let usable = self.describe(key)?.is_some_and(|info| info.usable());
        trace!(key = %key, usable, "key lookup");
        Ok(usable)
    }

    fn import(&self, material: &[u8]) -> Result<bool> {
        let output = self.run(&["--import"], material)?;
        debug!(success = output.status.success(), "key import");
        Ok(output.status.success())
    }

    fn describe(&self, key: &Fingerprint) -> Result<Option<KeyInfo>> {
        let output = self.run(
            &["--with-colons", "--fixed-list-mode", "--list-keys", "--", key.as_str()],
            &[],
        )?;

        // gpg exits non-zero when the key is simply absent.
        if !output.status.success() {
            debug!(key = %key, stderr = %stderr_of(&output), "key not listed");
            return Ok(None);
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|e| CipherError::KeyLookupFailed(format!("UTF-8 error: {}", e)))?;

        Ok(listing::parse_keys(&stdout)
            .into_iter()
            .find(|info| info.fingerprint == key.as_str()))
    }

    fn receive(&self, keyserver: &str, keys: &[Fingerprint]) -> Result<()> {
        if keys.is_empty() {
            return Ok(());
        }

        let mut args = vec!["--keyserver", keyserver, "--recv-keys"];
        args.extend(keys.iter().map(Fingerprint::as_str));

        let output = self.run(&args, &[])?;
        if !output.status.success() {
            return Err(CipherError::KeyFetchFailed(stderr_of(&output)).into());
        }

        debug!(keys = keys.len(), keyserver, "keys received");
        Ok(())
    }
}
