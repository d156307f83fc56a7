//! Constants used throughout huddle.
//!
//! Centralizes magic strings and configuration values.

/// Roster file name, one per directory scope.
pub const ROSTER_FILE: &str = ".users";

/// Optional detached signature for the roster.
pub const ROSTER_SIGNATURE_FILE: &str = ".users.sig";

/// Prefix of the first line of every secret's plaintext.
pub const ACCESS_PREFIX: &str = "access: ";

/// Access expression seeded into newly created secrets.
pub const ACCESS_PLACEHOLDER: &str = "FIXME";

/// Configuration directory relative to HOME (~/.huddle).
pub const CONFIG_DIR: &str = ".huddle";

/// Configuration file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the gpg program.
pub const GPG_ENV: &str = "HUDDLE_GPG";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "HUDDLE_LOG";

/// Default gpg program.
pub const DEFAULT_GPG: &str = "gpg";

/// Default keyserver for `keys refresh`.
pub const DEFAULT_KEYSERVER: &str = "hkps://keys.openpgp.org";

/// Editors tried, in order, when none is configured.
pub const FALLBACK_EDITORS: &[&str] = &["sensible-editor", "editor", "vim", "vi", "nano"];
