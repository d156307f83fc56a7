//! The directory scope a command runs in.
//!
//! A scope ties a directory to its verified roster. Opening it reads
//! `.users`, checks the signature against the signers trusted for that
//! directory, and parses the result.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::cipher::Verifier;
use crate::core::config::Config;
use crate::core::constants;
use crate::core::domain::Fingerprint;
use crate::core::roster::Roster;
use crate::core::trust;
use crate::error::{ConfigError, Result};

/// A directory together with its verified roster.
#[derive(Debug)]
pub struct Scope {
    dir: PathBuf,
    roster: Roster,
    signer: Fingerprint,
}

impl Scope {
    /// Open the scope for the current working directory.
    pub fn open(config: &Config, verifier: &dyn Verifier) -> Result<Self> {
        let dir = std::env::current_dir()?;
        Self::open_in(&dir, config, verifier)
    }

    /// Open the scope for `dir`.
    ///
    /// # Errors
    ///
    /// - `ConfigError::ScopeNotTrusted` if the config has no entry for `dir`
    /// - `ConfigError::MissingRoster` if `dir/.users` does not exist
    /// - `TrustError` if the signature is not acceptable
    /// - `RosterError` if the verified roster does not parse
    pub fn open_in(dir: &Path, config: &Config, verifier: &dyn Verifier) -> Result<Self> {
        let dir = dir.canonicalize()?;
        debug!(dir = %dir.display(), "opening scope");

        let trusted: BTreeSet<Fingerprint> = config.trusted_signers(&dir)?;

        let roster_path = dir.join(constants::ROSTER_FILE);
        let signed = read_roster_file(&roster_path)?
            .ok_or_else(|| ConfigError::MissingRoster(roster_path.clone()))?;

        let signature_path = dir.join(constants::ROSTER_SIGNATURE_FILE);
        let detached = read_roster_file(&signature_path)?;

        let verified = trust::verify(&signed, detached.as_deref(), &trusted, verifier)?;
        let roster = Roster::parse(verified.text(), config.comment_policy())?;

        info!(
            users = roster.user_count(),
            groups = roster.group_count(),
            signer = %verified.signer().short(),
            "roster loaded"
        );

        Ok(Self {
            dir,
            roster,
            signer: verified.signer().clone(),
        })
    }

    /// Canonical directory of this scope.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The trusted key whose signature on the roster was accepted.
    pub fn signer(&self) -> &Fingerprint {
        &self.signer
    }
}

/// Read a roster-related file; `None` when it does not exist.
fn read_roster_file(path: &Path) -> Result<Option<Vec<u8>>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigError::ReadRoster {
            path: path.to_path_buf(),
            source,
        }
        .into()),
    }
}
