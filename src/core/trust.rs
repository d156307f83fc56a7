//! Signature gate for roster files.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::core::cipher::Verifier;
use crate::core::domain::Fingerprint;
use crate::error::{Result, TrustError};

/// Roster bytes whose signature has been accepted.
#[derive(Debug, Clone)]
pub struct VerifiedContent {
    text: String,
    signer: Fingerprint,
}

impl VerifiedContent {
    /// The signed payload with any signature wrapper removed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The trusted signer whose signature was accepted.
    pub fn signer(&self) -> &Fingerprint {
        &self.signer
    }
}

/// Verify a roster and return its payload.
///
/// At least one signature must be both valid and made by a key in
/// `trusted`. Other signatures, good or bad, are ignored.
///
/// # Errors
///
/// Returns `TrustError::UntrustedOrInvalidSignature` when no signature
/// qualifies, `TrustError::NotUtf8` when the payload is not text, and
/// propagates failures of the verifier itself.
pub fn verify(
    signed: &[u8],
    detached: Option<&[u8]>,
    trusted: &BTreeSet<Fingerprint>,
    verifier: &dyn Verifier,
) -> Result<VerifiedContent> {
    let verification = verifier.verify(signed, detached)?;

    let accepted = verification.signatures.iter().find_map(|check| {
        let signer = Fingerprint::parse(&check.signer)?;
        (check.valid && trusted.contains(&signer)).then_some(signer)
    });

    let Some(signer) = accepted else {
        warn!(
            signatures = verification.signatures.len(),
            "no valid signature from a trusted signer"
        );
        return Err(TrustError::UntrustedOrInvalidSignature.into());
    };

    debug!(signer = %signer, "roster signature accepted");

    let text = String::from_utf8(verification.content).map_err(|_| TrustError::NotUtf8)?;
    Ok(VerifiedContent { text, signer })
}
