//! Type aliases for domain concepts.

/// A roster user name (`[A-Za-z0-9:-]+`).
pub type UserName = String;

/// A roster group name, including the leading `@`.
pub type GroupName = String;

/// ASCII-armored ciphertext as produced by the cipher backend.
pub type Ciphertext = String;
