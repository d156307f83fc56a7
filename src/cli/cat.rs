//! Cat command - print a decrypted secret.

use std::path::Path;

use crate::cli::context::Context;
use crate::cli::output;
use crate::error::Result;

/// Print the plaintext of an encrypted file to stdout.
pub fn execute(ctx: &Context, file: &Path) -> Result<()> {
    let plaintext = ctx.secrets().read(file)?;
    output::data(plaintext.as_bytes())?;
    Ok(())
}
