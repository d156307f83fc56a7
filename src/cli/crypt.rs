//! Decrypt and encrypt commands.
//!
//! Both work in place on a single file.

use std::path::Path;

use crate::cli::context::Context;
use crate::cli::output;
use crate::error::Result;

/// Replace an encrypted file with its plaintext.
pub fn decrypt(ctx: &Context, file: &Path) -> Result<()> {
    ctx.secrets().decrypt_in_place(file)?;
    output::success(&format!("decrypted {}", output::path(file)));
    output::hint(&format!("run: huddle enc {} when done", file.display()));
    Ok(())
}

/// Encrypt a plaintext file, or re-encrypt an encrypted one.
pub fn encrypt(ctx: &Context, file: &Path) -> Result<()> {
    let reencrypted = ctx.secrets().encrypt_in_place(file)?;
    let verb = if reencrypted { "re-encrypted" } else { "encrypted" };
    output::success(&format!("{} {}", verb, output::path(file)));
    Ok(())
}
