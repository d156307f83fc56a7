//! Input validation for roster names, fingerprints, and files.

use crate::error::{ConfigError, Result};

/// Length of a full OpenPGP v4 fingerprint in hex characters.
pub const FINGERPRINT_LEN: usize = 40;

/// Check a roster user name: `[A-Za-z0-9:-]+`.
pub fn is_user_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ':' || c == '-')
}

/// Check a roster group name: `@[A-Za-z0-9-]+`.
pub fn is_group_name(name: &str) -> bool {
    match name.strip_prefix('@') {
        Some(rest) => {
            !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        }
        None => false,
    }
}

/// Check for exactly 40 hexadecimal characters.
pub fn is_fingerprint(value: &str) -> bool {
    value.len() == FINGERPRINT_LEN && value.chars().all(|c| c.is_ascii_hexdigit())
}

/// Validate file permissions (Unix only).
///
/// Checks that a file has the expected permissions mode.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if permissions don't match.
#[cfg(unix)]
pub fn validate_file_permissions(path: &std::path::Path, expected_mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = std::fs::metadata(path)?;
    let actual_mode = metadata.permissions().mode() & 0o777;

    if actual_mode != expected_mode {
        return Err(ConfigError::InvalidValue {
            field: "permissions",
            reason: format!(
                "{} has mode {:o}, expected {:o}",
                path.display(),
                actual_mode,
                expected_mode
            ),
        }
        .into());
    }

    Ok(())
}
