//! Error types.
//!
//! Every failure is fatal to the current command. Errors are grouped by
//! where they originate so the CLI can print them verbatim.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for all huddle operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Trust(#[from] TrustError),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Guard(#[from] GuardError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Missing or unusable configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("unable to determine home directory")]
    NoHome,

    #[error("directory is not a trusted scope: {}", .0.display())]
    ScopeNotTrusted(PathBuf),

    #[error("roster not found: {}", .0.display())]
    MissingRoster(PathBuf),

    #[error("failed to read roster {}: {source}", .path.display())]
    ReadRoster {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The roster signature could not be accepted.
#[derive(Error, Debug)]
pub enum TrustError {
    #[error("roster signature is missing, invalid, or not from a trusted signer")]
    UntrustedOrInvalidSignature,

    #[error("verified roster is not valid UTF-8")]
    NotUtf8,
}

/// The verified roster text violates the roster grammar.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RosterError {
    #[error("roster line {line}: malformed: {content}")]
    MalformedLine { line: usize, content: String },

    #[error("roster line {line}: user declared twice: {name}")]
    DuplicateUser { line: usize, name: String },

    #[error("roster line {line}: group declared twice: {name}")]
    DuplicateGroup { line: usize, name: String },

    #[error("roster line {line}: reference to undeclared user or group: {name}")]
    UnknownReference { line: usize, name: String },
}

/// An access expression could not be resolved against the roster.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResolveError {
    #[error("unknown user: {0}")]
    UnknownUser(String),

    #[error("unknown group: {0}")]
    UnknownGroup(String),

    #[error("group nesting too deep at {group} (limit {limit})")]
    TooDeep { group: String, limit: usize },
}

/// Content is not ready to be encrypted.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GuardError {
    #[error("refusing to encrypt empty content")]
    EmptyContent,

    #[error("first line must be a non-empty `access: ...` line")]
    MissingOrEmptyAccessLine,

    #[error("access line resolves to no recipients")]
    NoRecipients,

    #[error("missing keys for recipients: {}", .0.join(", "))]
    MissingKeysForRecipients(Vec<String>),
}

/// Failures from the external crypto program.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("{0} not found. Install GnuPG from https://gnupg.org/download/")]
    NotFound(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("key lookup failed: {0}")]
    KeyLookupFailed(String),

    #[error("key fetch failed: {0}")]
    KeyFetchFailed(String),

    #[error("key import failed: {0}")]
    KeyImportFailed(String),
}

/// Problems with the local environment or the target file.
#[derive(Error, Debug)]
pub enum EnvError {
    #[error("no usable editor found (set $EDITOR)")]
    NoEditor,

    #[error("editor exited unsuccessfully: {0}")]
    EditorFailed(String),

    #[error("interrupted")]
    Interrupted,

    #[error("file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("file is not encrypted: {}", .0.display())]
    NotEncrypted(PathBuf),

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
