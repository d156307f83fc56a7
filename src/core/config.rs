//! Configuration file management.
//!
//! Handles reading and validating `~/.huddle/config.toml`, which names the
//! signers trusted to sign each directory's roster.
//!
//! ```toml
//! [settings]
//! gpg = "gpg"
//! keyserver = "hkps://keys.openpgp.org"
//! skip_comments = true
//!
//! [trust]
//! "/srv/secrets/ops" = ["0123456789ABCDEF0123456789ABCDEF01234567"]
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::core::domain::Fingerprint;
use crate::core::roster::CommentPolicy;
use crate::error::{ConfigError, Result};

/// User configuration stored in `~/.huddle/config.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Tool settings
    #[serde(default)]
    pub settings: Settings,
    /// Absolute directory path to the fingerprints trusted to sign its roster
    #[serde(default)]
    pub trust: BTreeMap<String, Vec<String>>,
}

/// The `[settings]` section.
#[derive(Debug, Serialize, Deserialize)]
pub struct Settings {
    /// gpg program to run
    #[serde(default = "default_gpg")]
    pub gpg: String,
    /// Keyserver for `keys refresh`
    #[serde(default = "default_keyserver")]
    pub keyserver: String,
    /// Editor command, tried before `$VISUAL` and `$EDITOR`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
    /// Skip blank and `#` lines in rosters; `false` is the legacy strict mode
    #[serde(default = "default_true")]
    pub skip_comments: bool,
}

fn default_gpg() -> String {
    constants::DEFAULT_GPG.to_string()
}

fn default_keyserver() -> String {
    constants::DEFAULT_KEYSERVER.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gpg: default_gpg(),
            keyserver: default_keyserver(),
            editor: None,
            skip_comments: true,
        }
    }
}

impl Config {
    /// Default configuration path (`~/.huddle/config.toml`).
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
        Ok(home.join(constants::CONFIG_DIR).join(constants::CONFIG_FILE))
    }

    /// Load configuration from `path`, or from the default path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file doesn't exist,
    /// `ConfigError::Parse` if the TOML is malformed, or
    /// `ConfigError::InvalidValue` if a trust entry is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            return Err(ConfigError::NotFound(path).into());
        }
        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
        let config = Self::parse(&contents)?;

        debug!(scopes = config.trust.len(), "config loaded");
        Ok(config)
    }

    /// Parse and validate configuration text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the trust table.
    ///
    /// Checks:
    /// - Every scope is an absolute path
    /// - Every scope lists at least one signer
    /// - Every signer is a 40-character hex fingerprint
    pub fn validate(&self) -> Result<()> {
        for (scope, signers) in &self.trust {
            if !Path::new(scope).is_absolute() {
                return Err(ConfigError::InvalidValue {
                    field: "trust",
                    reason: format!("scope must be an absolute path: {}", scope),
                }
                .into());
            }
            if signers.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "trust",
                    reason: format!("no signers listed for {}", scope),
                }
                .into());
            }
            for signer in signers {
                if Fingerprint::parse(signer).is_none() {
                    return Err(ConfigError::InvalidValue {
                        field: "trust",
                        reason: format!("invalid signer fingerprint for {}: {}", scope, signer),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    /// Signers trusted for `dir`.
    ///
    /// Paths are compared after canonicalization, so symlinks and trailing
    /// separators do not matter. Only an exact directory match counts;
    /// parent directories do not extend trust to their children.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ScopeNotTrusted` if no entry matches.
    pub fn trusted_signers(&self, dir: &Path) -> Result<BTreeSet<Fingerprint>> {
        let wanted = normalize(dir);

        let signers = self
            .trust
            .iter()
            .find(|(scope, _)| normalize(Path::new(scope)) == wanted)
            .map(|(_, signers)| signers)
            .ok_or_else(|| ConfigError::ScopeNotTrusted(dir.to_path_buf()))?;

        Ok(signers
            .iter()
            .filter_map(|signer| Fingerprint::parse(signer))
            .collect())
    }

    /// gpg program, with `$HUDDLE_GPG` taking precedence.
    pub fn gpg_program(&self) -> String {
        std::env::var(constants::GPG_ENV).unwrap_or_else(|_| self.settings.gpg.clone())
    }

    pub fn comment_policy(&self) -> CommentPolicy {
        CommentPolicy::from_skip(self.settings.skip_comments)
    }
}

/// Canonicalize when possible, otherwise drop `.` and trailing separators.
fn normalize(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| {
        path.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    })
}
