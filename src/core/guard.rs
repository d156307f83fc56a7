//! Encryption guard.
//!
//! Nothing is encrypted until the access line resolves to a non-empty
//! recipient set and every recipient's key is present in the keyring.

use tracing::{debug, info, warn};

use crate::core::access;
use crate::core::cipher::{Cipher, KeyRing};
use crate::core::domain::Recipients;
use crate::core::roster::Roster;
use crate::core::types::Ciphertext;
use crate::error::{GuardError, Result};

/// Check that `content` may be encrypted and return its recipients.
///
/// The content itself is passed through untouched.
///
/// # Errors
///
/// - `GuardError::EmptyContent` for empty content
/// - `GuardError::MissingOrEmptyAccessLine` from the access line codec
/// - `ResolveError` variants from recipient resolution
/// - `GuardError::NoRecipients` when the expression resolves to nothing
/// - `GuardError::MissingKeysForRecipients` naming every recipient whose
///   key is not usable
pub fn prepare_for_encryption<'a>(
    content: &'a str,
    roster: &Roster,
    keys: &dyn KeyRing,
) -> Result<(&'a str, Recipients)> {
    if content.is_empty() {
        return Err(GuardError::EmptyContent.into());
    }

    let expression = access::extract(content)?;
    let recipients = roster.resolve(&expression)?;

    if recipients.is_empty() {
        return Err(GuardError::NoRecipients.into());
    }

    // Every recipient is checked so the error lists all of them.
    let mut missing = Vec::new();
    for (key, user) in recipients.iter() {
        if !keys.has_key(key)? {
            missing.push(format!("{} ({})", user, key.short()));
        }
    }

    if !missing.is_empty() {
        warn!(missing = missing.len(), "recipients without usable keys");
        return Err(GuardError::MissingKeysForRecipients(missing).into());
    }

    debug!(recipients = recipients.len(), "content ready for encryption");
    Ok((content, recipients))
}

/// Guard `content` and hand it to `cipher` for encryption.
///
/// The cipher is never called unless [`prepare_for_encryption`] succeeds.
pub fn seal(
    content: &str,
    roster: &Roster,
    keys: &dyn KeyRing,
    cipher: &dyn Cipher,
) -> Result<Ciphertext> {
    let (content, recipients) = prepare_for_encryption(content, roster, keys)?;

    info!(
        cipher = cipher.name(),
        recipients = recipients.len(),
        "encrypting"
    );
    cipher.encrypt(content, &recipients)
}
