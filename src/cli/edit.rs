//! Edit command.
//!
//! Decrypt a secret into a scratch file, open the editor, and encrypt the
//! result for whoever the (possibly changed) access line names.

use std::io::{self, IsTerminal};
use std::path::Path;

use dialoguer::Confirm;
use zeroize::Zeroizing;

use crate::cli::context::Context;
use crate::cli::output;
use crate::core::secrets;
use crate::error::{Error, Result};

/// Edit an existing secret.
pub fn execute(ctx: &Context, file: &Path) -> Result<()> {
    let secrets = ctx.secrets();
    let original = secrets.read(file)?;

    let mut unchanged = false;
    compose(ctx, file, &original, |text| {
        if text == original.as_str() {
            unchanged = true;
            return Ok(());
        }
        secrets.store(file, text)
    })?;

    if unchanged {
        output::dimmed("no changes");
    } else {
        output::success(&format!("updated {}", output::path(file)));
    }
    Ok(())
}

/// Open `initial` in the editor and pass the result to `commit`.
///
/// When `commit` rejects the text because of its access line and a human
/// is at the terminal, offer to reopen the editor on the same text rather
/// than losing it.
pub(crate) fn compose(
    ctx: &Context,
    file: &Path,
    initial: &str,
    mut commit: impl FnMut(&str) -> Result<()>,
) -> Result<()> {
    let editor = ctx.editor()?;
    let suffix = secrets::scratch_suffix(file);
    let mut text = Zeroizing::new(initial.to_string());

    loop {
        let edited = editor.edit(&text, &suffix)?;

        match commit(&edited) {
            Ok(()) => return Ok(()),
            Err(e) if can_retry(&e) => {
                output::warn(&e.to_string());
                let again = Confirm::new()
                    .with_prompt("Edit again?")
                    .default(true)
                    .interact()?;
                if !again {
                    return Err(e);
                }
                text = edited;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Only access-line problems are worth another round in the editor.
fn can_retry(error: &Error) -> bool {
    matches!(error, Error::Guard(_) | Error::Resolve(_)) && io::stdin().is_terminal()
}
