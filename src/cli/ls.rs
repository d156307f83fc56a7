//! List command.
//!
//! Declared so scripts get a clear failure rather than silence.

use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Always fails: listing secrets is not implemented.
pub fn execute(path: Option<&Path>) -> Result<()> {
    debug!(path = ?path, "ls requested");
    Err(Error::NotImplemented("ls"))
}
