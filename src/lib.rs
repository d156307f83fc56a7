//! Huddle - team secrets as individually encrypted files.
//!
//! Each secret starts with an `access:` line naming users and `@groups`.
//! Recipients are never typed at encryption time: they are resolved from
//! the directory's signed `.users` roster and checked against the keyring
//! before anything is encrypted.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── add / edit    # Create and modify secrets in $EDITOR
//! │   ├── cat / crypt   # Read, decrypt, and (re-)encrypt files
//! │   ├── keys          # Display, refresh, and import roster keys
//! │   └── resolve       # Inspect the roster and access expressions
//! └── core/             # Core library components
//!     ├── config        # ~/.huddle/config.toml (trusted signers per directory)
//!     ├── trust         # Signature gate for .users
//!     ├── roster/       # Roster parsing and recipient resolution
//!     ├── access        # The access: line codec
//!     ├── guard         # Checks performed before every encryption
//!     ├── cipher/       # Capability traits and the gpg backend
//!     ├── editor        # $EDITOR and owner-only scratch files
//!     └── secrets       # File operations
//! ```

pub mod cli;
pub mod core;
pub mod error;
