//! Resolved recipient set.

use std::collections::BTreeMap;

use crate::core::domain::Fingerprint;
use crate::core::types::UserName;

/// Deduplicated key fingerprints a secret is encrypted to.
///
/// Each fingerprint remembers the first user that contributed it so
/// diagnostics can name people rather than keys. Iteration order is
/// sorted by fingerprint, which keeps repeated runs identical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recipients {
    keys: BTreeMap<Fingerprint, UserName>,
}

impl Recipients {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key. Returns `false` if it was already present.
    pub fn insert(&mut self, key: Fingerprint, user: &str) -> bool {
        if self.keys.contains_key(&key) {
            return false;
        }
        self.keys.insert(key, user.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn fingerprints(&self) -> impl Iterator<Item = &Fingerprint> {
        self.keys.keys()
    }

    /// `(fingerprint, user name)` pairs in fingerprint order.
    pub fn iter(&self) -> impl Iterator<Item = (&Fingerprint, &str)> {
        self.keys.iter().map(|(k, u)| (k, u.as_str()))
    }
}
