//! Parsing of `gpg --with-colons --list-keys` output.

use chrono::{DateTime, Utc};

use super::KeyInfo;

/// Collect one `KeyInfo` per primary key in a colon listing.
pub fn parse_keys(output: &str) -> Vec<KeyInfo> {
    let mut keys: Vec<KeyInfo> = Vec::new();
    // Only the first `fpr` after a `pub` record belongs to the primary key.
    let mut want_fpr = false;

    for line in output.lines() {
        let fields: Vec<&str> = line.split(':').collect();
        let field = |i: usize| fields.get(i).copied().unwrap_or_default();

        match field(0) {
            "pub" => {
                keys.push(KeyInfo {
                    fingerprint: String::new(),
                    user_id: None,
                    created: timestamp(field(5)),
                    expires: timestamp(field(6)),
                    validity: field(1).chars().next().unwrap_or('-'),
                    can_encrypt: field(11).contains('E'),
                });
                want_fpr = true;
            }
            "fpr" if want_fpr => {
                if let Some(key) = keys.last_mut() {
                    key.fingerprint = field(9).to_ascii_uppercase();
                }
                want_fpr = false;
            }
            "uid" => {
                if let Some(key) = keys.last_mut() {
                    if key.user_id.is_none() && !field(9).is_empty() {
                        key.user_id = Some(field(9).to_string());
                    }
                }
            }
            "sub" => want_fpr = false,
            _ => {}
        }
    }

    keys
}

/// Seconds since the epoch; empty means none.
fn timestamp(value: &str) -> Option<DateTime<Utc>> {
    let seconds: i64 = value.parse().ok()?;
    DateTime::from_timestamp(seconds, 0)
}
